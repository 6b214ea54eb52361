use serde::{Deserialize, Serialize};

use crate::scan::Detector;

/// Calibrated spectral irradiance from a single detector, on an integer-nm
/// grid. Irradiance is in W/cm^2/nm, the transfer functions' native unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrradianceSpectrum {
    pub detector: Detector,
    pub wavelengths_nm: Vec<f64>,
    pub irradiance_w_cm2_nm: Vec<f64>,
}

impl IrradianceSpectrum {
    pub fn len(&self) -> usize {
        self.wavelengths_nm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths_nm.is_empty()
    }
}

/// Continuous spectrum stitched from the detector sub-ranges at the
/// crossover wavelength. `crossover_nm` is None when a single detector's
/// spectrum was passed through without a merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedSpectrum {
    pub wavelengths_nm: Vec<f64>,
    pub irradiance_w_cm2_nm: Vec<f64>,
    pub crossover_nm: Option<f64>,
}

impl MergedSpectrum {
    pub fn len(&self) -> usize {
        self.wavelengths_nm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths_nm.is_empty()
    }

    pub fn min_wavelength_nm(&self) -> Option<f64> {
        self.wavelengths_nm.first().copied()
    }

    pub fn max_wavelength_nm(&self) -> Option<f64> {
        self.wavelengths_nm.last().copied()
    }
}

/// The uniform 0.1 nm grid the classifier worked on, returned for audit and
/// export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampledSpectrum {
    pub wavelengths_nm: Vec<f64>,
    pub irradiance_w_cm2_nm: Vec<f64>,
}
