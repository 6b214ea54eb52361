use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceStandard {
    Am0,
    Am15G,
    Am15D,
}

impl std::fmt::Display for ReferenceStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceStandard::Am0 => write!(f, "AM0"),
            ReferenceStandard::Am15G => write!(f, "AM1.5G"),
            ReferenceStandard::Am15D => write!(f, "AM1.5D"),
        }
    }
}

/// A standard solar spectrum at its native tabulated resolution, in
/// W/cm^2/nm (converted from the source table's W/m^2/nm on load).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSpectrum {
    pub standard: ReferenceStandard,
    pub wavelengths_nm: Vec<f64>,
    pub irradiance_w_cm2_nm: Vec<f64>,
}

impl ReferenceSpectrum {
    pub fn len(&self) -> usize {
        self.wavelengths_nm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths_nm.is_empty()
    }
}
