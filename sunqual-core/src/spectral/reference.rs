//! Standard reference solar spectra (AM0, AM1.5G, AM1.5D).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sunqual_schemas::reference::{ReferenceSpectrum, ReferenceStandard};

use crate::error::SunqualError;
use crate::spectral::interp::validate_series;

// The source table tabulates irradiance in W/m^2/nm; the detector chain
// works in W/cm^2/nm.
const M2_PER_CM2: f64 = 1.0e4;

/// The three reference spectra, loaded once per process from the standard
/// spectra table and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ReferenceSpectrumStore {
    am0: ReferenceSpectrum,
    am15g: ReferenceSpectrum,
    am15d: ReferenceSpectrum,
}

impl ReferenceSpectrumStore {
    /// Load the standard spectra table. The file carries one header row and
    /// seven columns: wavelength, AM0/AM1.5G/AM1.5D irradiance, and
    /// AM0/AM1.5G/AM1.5D radiance. The radiance columns are ignored.
    pub fn load(path: &Path) -> Result<Self, SunqualError> {
        let label = path.display().to_string();
        let fh = File::open(path).map_err(|e| SunqualError::FileIO(label.clone(), e))?;
        Self::from_csv_reader(&label, fh)
    }

    pub fn from_csv_reader<R: Read>(name: &str, reader: R) -> Result<Self, SunqualError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut wavelengths_nm = Vec::new();
        let mut am0 = Vec::new();
        let mut am15g = Vec::new();
        let mut am15d = Vec::new();
        for row in rdr.deserialize() {
            let (wavelength, e_am0, e_am15g, e_am15d, _rad0, _rad15g, _rad15d): (
                f64,
                f64,
                f64,
                f64,
                Option<f64>,
                Option<f64>,
                Option<f64>,
            ) = row.map_err(|e| SunqualError::Csv(name.to_string(), e))?;
            wavelengths_nm.push(wavelength);
            am0.push(e_am0 / M2_PER_CM2);
            am15g.push(e_am15g / M2_PER_CM2);
            am15d.push(e_am15d / M2_PER_CM2);
        }
        validate_series(&wavelengths_nm, &am0)?;

        Ok(Self {
            am0: ReferenceSpectrum {
                standard: ReferenceStandard::Am0,
                wavelengths_nm: wavelengths_nm.clone(),
                irradiance_w_cm2_nm: am0,
            },
            am15g: ReferenceSpectrum {
                standard: ReferenceStandard::Am15G,
                wavelengths_nm: wavelengths_nm.clone(),
                irradiance_w_cm2_nm: am15g,
            },
            am15d: ReferenceSpectrum {
                standard: ReferenceStandard::Am15D,
                wavelengths_nm,
                irradiance_w_cm2_nm: am15d,
            },
        })
    }

    pub fn get(&self, standard: ReferenceStandard) -> &ReferenceSpectrum {
        match standard {
            ReferenceStandard::Am0 => &self.am0,
            ReferenceStandard::Am15G => &self.am15g,
            ReferenceStandard::Am15D => &self.am15d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = "\
Wavelengths,AM0 Irrad,AM1.5G Irrad,AM1.5D Irrad,AM0 Rad,AM1.5G Rad,AM1.5D Rad
280,0.082,0.0,0.0,0.01,0.0,0.0
280.5,0.099,0.011,0.008,0.01,0.001,0.001
281,0.15,0.02,0.015,0.02,0.002,0.001
";

    #[test]
    fn parses_the_three_irradiance_columns() {
        let store = ReferenceSpectrumStore::from_csv_reader("test", SAMPLE.as_bytes()).unwrap();

        let am0 = store.get(ReferenceStandard::Am0);
        assert_eq!(am0.wavelengths_nm, vec![280.0, 280.5, 281.0]);
        // Converted from W/m^2/nm to W/cm^2/nm on load.
        assert_relative_eq!(am0.irradiance_w_cm2_nm[0], 0.082 / 1.0e4, epsilon = 1e-15);

        let am15d = store.get(ReferenceStandard::Am15D);
        assert_eq!(am15d.standard, ReferenceStandard::Am15D);
        assert_relative_eq!(am15d.irradiance_w_cm2_nm[2], 0.015 / 1.0e4, epsilon = 1e-15);
    }

    #[test]
    fn radiance_cells_may_be_empty() {
        let csv = "\
Wavelengths,AM0 Irrad,AM1.5G Irrad,AM1.5D Irrad,AM0 Rad,AM1.5G Rad,AM1.5D Rad
280,1.0,2.0,3.0,,,
281,1.1,2.1,3.1,,,
";
        let store = ReferenceSpectrumStore::from_csv_reader("test", csv.as_bytes()).unwrap();
        assert_eq!(store.get(ReferenceStandard::Am15G).len(), 2);
    }

    #[test]
    fn non_monotonic_wavelengths_are_rejected() {
        let csv = "\
Wavelengths,AM0 Irrad,AM1.5G Irrad,AM1.5D Irrad,AM0 Rad,AM1.5G Rad,AM1.5D Rad
281,1.0,2.0,3.0,0.0,0.0,0.0
280,1.1,2.1,3.1,0.0,0.0,0.0
";
        assert!(matches!(
            ReferenceSpectrumStore::from_csv_reader("test", csv.as_bytes()),
            Err(SunqualError::NonMonotonic { .. })
        ));
    }
}
