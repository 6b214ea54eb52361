use serde::{Deserialize, Serialize};

use crate::scan::ScanMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridGeometry {
    Rectangular,
    Circular,
}

impl std::fmt::Display for GridGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridGeometry::Rectangular => write!(f, "Rectangular"),
            GridGeometry::Circular => write!(f, "Circular"),
        }
    }
}

/// One spatial non-uniformity scan as parsed from the instrument file.
/// `geometry` keeps the file's literal tag; the analyzer rejects tags it
/// does not recognize. Grid shape, spacing, and extent headers exist only
/// in rectangular files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformityScan {
    pub geometry: String,
    pub xs_cm: Vec<f64>,
    pub ys_cm: Vec<f64>,
    /// Detector current per measurement point, in amperes.
    pub signal_a: Vec<f64>,
    pub x_num: Option<usize>,
    pub y_num: Option<usize>,
    pub x_spacing_cm: Option<f64>,
    pub y_spacing_cm: Option<f64>,
    pub x_size_cm: Option<f64>,
    pub y_size_cm: Option<f64>,
    pub detector_area_cm2: f64,
    /// Spatial non-uniformity percentage pre-computed by the instrument,
    /// carried in the scan file's footer.
    pub nonuniformity_pct: f64,
    pub metadata: ScanMetadata,
}
