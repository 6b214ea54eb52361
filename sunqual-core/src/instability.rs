//! Temporal instability analysis over repeated lamp-current scans.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use sunqual_schemas::scan::ScanRecord;

use crate::error::SunqualError;

/// Datasets shorter than this cannot support a meaningful instability
/// figure and are skipped.
pub const MIN_TEMPORAL_SAMPLES: usize = 20;

/// Source-meter acquisition constants, reported alongside the result.
pub const SAMPLE_INTERVAL_S: f64 = 0.19;
pub const POWER_LINE_CYCLES: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstabilityResult {
    /// Label of the dataset with the worst temporal instability; all other
    /// figures are computed on it.
    pub worst_label: String,
    pub num_samples: usize,
    pub temporal_instability_pct: f64,
    pub short_term_instability_pct: f64,
    pub max_irradiance_suns: f64,
    pub min_irradiance_suns: f64,
    pub mean_current_a: f64,
    /// Current samples divided by the mean, for the collaborator's 1-Sun
    /// plot. The time axis is `index * sample_interval_s`.
    pub normalized_suns: Vec<f64>,
    pub sample_interval_s: f64,
    pub power_line_cycles: u32,
}

/// Find the dataset with the worst temporal instability and characterize
/// it. Datasets with fewer than [`MIN_TEMPORAL_SAMPLES`] current samples
/// are skipped, not fatal; only an empty field of candidates is an error.
pub fn analyze_instability(
    datasets: &BTreeMap<String, ScanRecord>,
) -> Result<InstabilityResult, SunqualError> {
    let mut worst: Option<(&str, &ScanRecord, f64)> = None;
    for (label, scan) in datasets {
        if scan.signal.len() < MIN_TEMPORAL_SAMPLES {
            warn!(
                "Dataset '{}' contains insufficient (<{}) data points to properly calculate the temporal instability and will be ignored",
                label, MIN_TEMPORAL_SAMPLES
            );
            continue;
        }
        let ti = instability_pct(&scan.signal);
        match worst {
            Some((_, _, worst_ti)) if ti <= worst_ti => {}
            _ => worst = Some((label, scan, ti)),
        }
    }

    let (label, scan, temporal_instability_pct) = worst.ok_or(
        SunqualError::InsufficientSamples {
            minimum: MIN_TEMPORAL_SAMPLES,
        },
    )?;

    let short_term_instability_pct = scan
        .signal
        .windows(2)
        .map(|pair| pair_instability_pct(pair[0], pair[1]))
        .fold(f64::MIN, f64::max);

    // The mean current is assumed to correspond to nominal 1-Sun
    // irradiance.
    let mean_current_a = scan.signal.iter().sum::<f64>() / scan.signal.len() as f64;
    let (min, max) = min_max(&scan.signal);

    Ok(InstabilityResult {
        worst_label: label.to_string(),
        num_samples: scan.signal.len(),
        temporal_instability_pct,
        short_term_instability_pct,
        max_irradiance_suns: max / mean_current_a,
        min_irradiance_suns: min / mean_current_a,
        mean_current_a,
        normalized_suns: scan.signal.iter().map(|&i| i / mean_current_a).collect(),
        sample_interval_s: SAMPLE_INTERVAL_S,
        power_line_cycles: POWER_LINE_CYCLES,
    })
}

fn instability_pct(current_a: &[f64]) -> f64 {
    let (min, max) = min_max(current_a);
    100.0 * ((max - min) / (max + min)).abs()
}

fn pair_instability_pct(previous: f64, current: f64) -> f64 {
    100.0 * ((current - previous) / (current + previous)).abs()
}

fn min_max(values: &[f64]) -> (f64, f64) {
    let first = values[0];
    values
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
