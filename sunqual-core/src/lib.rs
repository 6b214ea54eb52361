//! Analysis core for solar-simulator qualification: spatial non-uniformity,
//! temporal instability, and spectral match against the AM0/AM1.5G/AM1.5D
//! reference spectra under ASTM E927-19 and IEC 60904-9.
//!
//! File parsing of the instrument formats and all report rendering live in
//! external collaborators; this crate consumes parsed
//! [`ScanRecord`](sunqual_schemas::scan::ScanRecord)s and produces plain
//! result records.

pub mod config;
pub mod error;
pub mod export;
pub mod instability;
pub mod spectral;
pub mod uniformity;

pub use config::AnalysisRequest;
pub use error::SunqualError;
pub use instability::{analyze_instability, InstabilityResult};
pub use spectral::{run_spectral_match, MatchResult};
pub use uniformity::{analyze_uniformity, UniformityResult};
