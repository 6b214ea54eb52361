use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detector {
    Silicon,
    InGaAs,
}

impl std::fmt::Display for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Detector::Silicon => write!(f, "Si"),
            Detector::InGaAs => write!(f, "InGaAs"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gain {
    High,
    Low,
}

impl std::fmt::Display for Gain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gain::High => write!(f, "HI"),
            Gain::Low => write!(f, "LO"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanMetadata {
    pub filename: String,
    /// Measurement date as written by the instrument, kept verbatim.
    pub measured_on: String,
    pub detector: Option<Detector>,
    pub gain: Option<Gain>,
    pub step_nm: Option<f64>,
    pub detector_area_cm2: Option<f64>,
}

/// One parsed instrument scan. For spectroradiometer scans `signal` is in
/// volts against `wavelengths_nm`; temporal (instability) scans carry the
/// lamp current in amperes and may leave `wavelengths_nm` empty, the sample
/// index being implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub wavelengths_nm: Vec<f64>,
    pub signal: Vec<f64>,
    pub metadata: ScanMetadata,
}

impl ScanRecord {
    pub fn len(&self) -> usize {
        self.signal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    pub fn min_wavelength_nm(&self) -> Option<f64> {
        self.wavelengths_nm.first().copied()
    }

    pub fn max_wavelength_nm(&self) -> Option<f64> {
        self.wavelengths_nm.last().copied()
    }
}
