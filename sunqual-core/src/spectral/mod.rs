//! The spectral-match pipeline: voltage scans through calibration to
//! irradiance, detector merge, and classification against the standard
//! comparison profiles.

pub mod classify;
pub mod interp;
pub mod irradiance;
pub mod reference;
pub mod standards;
pub mod transfer;

pub use classify::{classify, run_spectral_match, BinAssessment, MatchResult};
pub use irradiance::{convert, merge};
pub use reference::ReferenceSpectrumStore;
pub use standards::band_definition;
pub use transfer::{TransferFunction, TransferFunctionStore};
