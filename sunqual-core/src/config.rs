use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sunqual_schemas::scan::Gain;
use sunqual_schemas::standard::StandardProfile;

use crate::error::SunqualError;

/// Everything the operator chooses for one spectral-match run: which
/// standard to test against, which gain each detector was measured at
/// (absent means the detector was not measured), where the two detector
/// sub-ranges are stitched, and whether to keep the raw merged irradiance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Label used for the run in logs and reports.
    pub label: String,
    pub standard: StandardProfile,
    #[serde(default)]
    pub crossover_nm: Option<f64>,
    #[serde(default)]
    pub silicon_gain: Option<Gain>,
    #[serde(default)]
    pub ingaas_gain: Option<Gain>,
    /// When set, the merged spectrum is written here as CSV before
    /// classification.
    #[serde(default)]
    pub raw_irradiance_path: Option<PathBuf>,
}

impl AnalysisRequest {
    pub fn from_yaml_file(path: &Path) -> Result<Self, SunqualError> {
        let label = path.display().to_string();
        let content =
            fs::read_to_string(path).map_err(|e| SunqualError::FileIO(label.clone(), e))?;
        serde_yaml::from_str(&content).map_err(|e| SunqualError::YamlParsing(label, e))
    }
}
