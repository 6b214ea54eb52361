use thiserror::Error;

use sunqual_schemas::standard::StandardProfile;

#[derive(Debug, Error)]
pub enum SunqualError {
    #[error("No wavelength overlap between the scan ({scan_min} - {scan_max} nm) and the transfer function ({transfer_min} - {transfer_max} nm)")]
    NoOverlap {
        scan_min: f64,
        scan_max: f64,
        transfer_min: f64,
        transfer_max: f64,
    },

    #[error("Wavelength series is not strictly increasing at index {index} ({previous} nm followed by {next} nm)")]
    NonMonotonic {
        index: usize,
        previous: f64,
        next: f64,
    },

    #[error("Wavelength and signal arrays differ in length ({wavelengths} vs {values})")]
    LengthMismatch { wavelengths: usize, values: usize },

    #[error("Series contains {0} samples; at least two are required")]
    TooFewSamples(usize),

    #[error("Transfer table for the {detector} detector at {gain} gain has no entry at {wavelength} nm; the table is expected at 1 nm resolution")]
    MissingTableEntry {
        detector: sunqual_schemas::scan::Detector,
        gain: sunqual_schemas::scan::Gain,
        wavelength: f64,
    },

    #[error("Wavelength {value} nm is outside the tabulated domain ({min} - {max} nm)")]
    OutOfDomain { value: f64, min: f64, max: f64 },

    #[error("Crossover wavelength {crossover_nm} nm leaves no usable data on the {side} side of the merge")]
    InvalidCrossover { crossover_nm: f64, side: &'static str },

    #[error("Neither detector supplied a spectrum to merge")]
    NoDetectorData,

    #[error("A {0} scan was supplied without a gain selection")]
    MissingGain(sunqual_schemas::scan::Detector),

    #[error("Both detectors supplied spectra but no crossover wavelength was configured")]
    MissingCrossover,

    #[error("Spectrum covers {have_min:.1} - {have_max:.1} nm but classification against {standard} requires {need_min} - {need_max} nm")]
    InsufficientCoverage {
        standard: StandardProfile,
        need_min: u32,
        need_max: u32,
        have_min: f64,
        have_max: f64,
    },

    #[error("Measured spectrum has zero integrated energy over {lower_nm:.1} - {upper_nm:.1} nm")]
    ZeroEnergy { lower_nm: f64, upper_nm: f64 },

    #[error("Unrecognized target geometry '{0}'; expected 'Rectangular' or 'Circular'")]
    UnknownGeometry(String),

    #[error("Rectangular scan is missing its '{0}' header field")]
    MissingField(&'static str),

    #[error("Expected {expected} grid points ({x_num} x {y_num}) but the scan contains {actual}")]
    GridShapeMismatch {
        x_num: usize,
        y_num: usize,
        expected: usize,
        actual: usize,
    },

    #[error("No temporal dataset contains the minimum {minimum} samples required to compute instability")]
    InsufficientSamples { minimum: usize },

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    Csv(String, #[source] csv::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to serialize JSON: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("An error occurred while exporting results: {0}")]
    Export(#[from] anyhow::Error),
}
