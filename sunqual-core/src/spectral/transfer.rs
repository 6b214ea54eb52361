//! Instrument transfer functions: per-detector, per-gain calibration tables
//! mapping detector voltage to spectral irradiance.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;

use sunqual_schemas::scan::{Detector, Gain};

use crate::error::SunqualError;
use crate::spectral::interp::validate_series;

/// The four calibration tables shipped with the spectroradiometer.
const TRANSFER_FILES: [(Detector, Gain, &str); 4] = [
    (Detector::Silicon, Gain::High, "Transfer-Si-HI.csv"),
    (Detector::Silicon, Gain::Low, "Transfer-Si-LO.csv"),
    (Detector::InGaAs, Gain::High, "Transfer-IGA-HI.csv"),
    (Detector::InGaAs, Gain::Low, "Transfer-IGA-LO.csv"),
];

/// One calibration table at 1 nm resolution. Factors are in W/cm^2/nm per
/// volt of detector signal.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    pub detector: Detector,
    pub gain: Gain,
    pub wavelengths_nm: Vec<f64>,
    pub factors_w_cm2_nm_v: Vec<f64>,
}

impl TransferFunction {
    /// Parse a headerless `wavelength,factor` table. `name` labels the
    /// source in error messages.
    pub fn from_csv_reader<R: Read>(
        detector: Detector,
        gain: Gain,
        name: &str,
        reader: R,
    ) -> Result<Self, SunqualError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader);

        let mut wavelengths_nm = Vec::new();
        let mut factors_w_cm2_nm_v = Vec::new();
        for row in rdr.deserialize() {
            let (wavelength, factor): (f64, f64) =
                row.map_err(|e| SunqualError::Csv(name.to_string(), e))?;
            wavelengths_nm.push(wavelength);
            factors_w_cm2_nm_v.push(factor);
        }
        validate_series(&wavelengths_nm, &factors_w_cm2_nm_v)?;

        Ok(Self {
            detector,
            gain,
            wavelengths_nm,
            factors_w_cm2_nm_v,
        })
    }

    pub fn min_wavelength_nm(&self) -> f64 {
        self.wavelengths_nm[0]
    }

    pub fn max_wavelength_nm(&self) -> f64 {
        self.wavelengths_nm[self.wavelengths_nm.len() - 1]
    }

    /// Factors over the closed integer range `[min_nm, max_nm]`. Every
    /// integer wavelength of the range must appear verbatim in the table;
    /// the first one that does not is reported.
    pub fn slice_integer_range(&self, min_nm: f64, max_nm: f64) -> Result<&[f64], SunqualError> {
        let start = self
            .wavelengths_nm
            .partition_point(|&w| w < min_nm - 1e-6);
        let count = (max_nm - min_nm) as usize + 1;

        for i in 0..count {
            let expected = min_nm + i as f64;
            match self.wavelengths_nm.get(start + i) {
                Some(&w) if (w - expected).abs() < 1e-6 => {}
                _ => {
                    return Err(SunqualError::MissingTableEntry {
                        detector: self.detector,
                        gain: self.gain,
                        wavelength: expected,
                    })
                }
            }
        }
        Ok(&self.factors_w_cm2_nm_v[start..start + count])
    }
}

/// All four calibration tables, loaded once per process and read-only
/// afterwards. Share by reference across analysis requests.
#[derive(Debug, Clone)]
pub struct TransferFunctionStore {
    si_high: TransferFunction,
    si_low: TransferFunction,
    iga_high: TransferFunction,
    iga_low: TransferFunction,
}

impl TransferFunctionStore {
    /// Assemble a store from already-parsed tables.
    pub fn from_tables(
        si_high: TransferFunction,
        si_low: TransferFunction,
        iga_high: TransferFunction,
        iga_low: TransferFunction,
    ) -> Self {
        Self {
            si_high,
            si_low,
            iga_high,
            iga_low,
        }
    }

    /// Load the four fixed tables from `dir`.
    pub fn load(dir: &Path) -> Result<Self, SunqualError> {
        let [si_high, si_low, iga_high, iga_low] =
            TRANSFER_FILES.map(|(detector, gain, file)| load_table(dir, detector, gain, file));
        Ok(Self {
            si_high: si_high?,
            si_low: si_low?,
            iga_high: iga_high?,
            iga_low: iga_low?,
        })
    }

    pub fn get(&self, detector: Detector, gain: Gain) -> &TransferFunction {
        match (detector, gain) {
            (Detector::Silicon, Gain::High) => &self.si_high,
            (Detector::Silicon, Gain::Low) => &self.si_low,
            (Detector::InGaAs, Gain::High) => &self.iga_high,
            (Detector::InGaAs, Gain::Low) => &self.iga_low,
        }
    }
}

fn load_table(
    dir: &Path,
    detector: Detector,
    gain: Gain,
    file: &str,
) -> Result<TransferFunction, SunqualError> {
    let path = dir.join(file);
    let label = path.display().to_string();
    let fh = File::open(&path).map_err(|e| SunqualError::FileIO(label.clone(), e))?;
    let table = TransferFunction::from_csv_reader(detector, gain, &label, fh)?;
    info!(
        "The {} gain transfer function for the {} detector is defined across {} - {} nm",
        gain,
        detector,
        table.min_wavelength_nm(),
        table.max_wavelength_nm()
    );
    Ok(table)
}
