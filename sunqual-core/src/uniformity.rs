//! Spatial non-uniformity analysis of a target-plane scan.

use serde::{Deserialize, Serialize};

use sunqual_schemas::uniformity::{GridGeometry, UniformityScan};

use crate::error::SunqualError;

const MA_PER_A: f64 = 1.0e3;

/// Normalized irradiance map, shaped for the collaborator's plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UniformityMap {
    /// Row-major, vertically flipped to match the physical layout: the
    /// first row is the highest y position.
    Rectangular { rows: Vec<Vec<f64>> },
    Circular {
        xs_cm: Vec<f64>,
        ys_cm: Vec<f64>,
        values: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformityResult {
    pub geometry: GridGeometry,
    pub num_points: usize,
    pub detector_area_cm2: f64,
    pub max_irradiance_suns: f64,
    pub min_irradiance_suns: f64,
    pub std_dev_suns: f64,
    /// Non-uniformity percentage as pre-computed by the instrument,
    /// carried through from the scan file's footer.
    pub nonuniformity_pct: f64,
    /// Detector diameter derived from its nominal area; circular scans
    /// only.
    pub detector_diameter_cm: Option<f64>,
    pub map: UniformityMap,
}

/// Analyze a non-uniformity scan of either recognized geometry.
pub fn analyze_uniformity(scan: &UniformityScan) -> Result<UniformityResult, SunqualError> {
    let geometry = match scan.geometry.as_str() {
        "Rectangular" => GridGeometry::Rectangular,
        "Circular" => GridGeometry::Circular,
        other => return Err(SunqualError::UnknownGeometry(other.to_string())),
    };

    match geometry {
        GridGeometry::Rectangular => analyze_rectangular(scan),
        GridGeometry::Circular => analyze_circular(scan),
    }
}

fn analyze_rectangular(scan: &UniformityScan) -> Result<UniformityResult, SunqualError> {
    let x_num = scan.x_num.ok_or(SunqualError::MissingField("xNum"))?;
    let y_num = scan.y_num.ok_or(SunqualError::MissingField("yNum"))?;
    let expected = x_num * y_num;
    if expected == 0 {
        return Err(SunqualError::TooFewSamples(0));
    }
    if scan.signal_a.len() != expected {
        return Err(SunqualError::GridShapeMismatch {
            x_num,
            y_num,
            expected,
            actual: scan.signal_a.len(),
        });
    }

    // Row-major grid in mA, flipped vertically so the first row is the top
    // of the target plane.
    let mut rows: Vec<Vec<f64>> = (0..y_num)
        .map(|y| {
            (0..x_num)
                .map(|x| scan.signal_a[y * x_num + x] * MA_PER_A)
                .collect()
        })
        .collect();
    rows.reverse();

    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    let normalized = normalize_to_suns(&flat);
    let (min, max) = min_max(&normalized);

    let mut norm_rows = Vec::with_capacity(y_num);
    let mut offset = 0;
    for _ in 0..y_num {
        norm_rows.push(normalized[offset..offset + x_num].to_vec());
        offset += x_num;
    }

    Ok(UniformityResult {
        geometry: GridGeometry::Rectangular,
        num_points: expected,
        detector_area_cm2: scan.detector_area_cm2,
        max_irradiance_suns: max,
        min_irradiance_suns: min,
        std_dev_suns: population_std_dev(&normalized),
        nonuniformity_pct: scan.nonuniformity_pct,
        detector_diameter_cm: None,
        map: UniformityMap::Rectangular { rows: norm_rows },
    })
}

fn analyze_circular(scan: &UniformityScan) -> Result<UniformityResult, SunqualError> {
    if scan.signal_a.is_empty() {
        return Err(SunqualError::TooFewSamples(0));
    }
    let normalized = normalize_to_suns(&scan.signal_a);
    let (min, max) = min_max(&normalized);

    let detector_diameter_cm = 2.0 * (scan.detector_area_cm2 / std::f64::consts::PI).sqrt();

    Ok(UniformityResult {
        geometry: GridGeometry::Circular,
        num_points: scan.signal_a.len(),
        detector_area_cm2: scan.detector_area_cm2,
        max_irradiance_suns: max,
        min_irradiance_suns: min,
        std_dev_suns: population_std_dev(&normalized),
        nonuniformity_pct: scan.nonuniformity_pct,
        detector_diameter_cm: Some(detector_diameter_cm),
        map: UniformityMap::Circular {
            xs_cm: scan.xs_cm.clone(),
            ys_cm: scan.ys_cm.clone(),
            values: normalized,
        },
    })
}

/// Normalize a signal vector to Suns: divide by whichever extremum has the
/// larger magnitude (ties take the minimum), then shift the whole dataset
/// up by half its peak-to-peak spread so it is centred around 1 Sun. The
/// target illumination level is assumed to be 1 Sun.
fn normalize_to_suns(values: &[f64]) -> Vec<f64> {
    let (min, max) = min_max(values);
    let divisor = if min.abs() >= max.abs() { min } else { max };

    let scaled: Vec<f64> = values.iter().map(|&v| v / divisor).collect();

    let (lo, hi) = min_max(&scaled);
    let half_spread = (hi - lo) / 2.0;
    scaled.iter().map(|&v| v * half_spread + v).collect()
}

fn min_max(values: &[f64]) -> (f64, f64) {
    let first = values[0];
    values
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Population standard deviation, as `numpy.std` computes it.
fn population_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}
