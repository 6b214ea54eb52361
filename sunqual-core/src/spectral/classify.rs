//! Spectral-match classification against the standard comparison profiles:
//! bin-wise energy ratios, tolerance grading, and the aggregate absolute
//! error / spectral performance coefficient diagnostics.

use log::info;
use serde::{Deserialize, Serialize};

use sunqual_schemas::reference::ReferenceSpectrum;
use sunqual_schemas::scan::{Detector, ScanRecord};
use sunqual_schemas::spectrum::{MergedSpectrum, ResampledSpectrum};
use sunqual_schemas::standard::{MatchClass, StandardProfile};

use crate::config::AnalysisRequest;
use crate::error::SunqualError;
use crate::export::write_irradiance_csv;
use crate::spectral::interp::LinearInterpolator;
use crate::spectral::irradiance::{convert, merge};
use crate::spectral::reference::ReferenceSpectrumStore;
use crate::spectral::standards::band_definition;
use crate::spectral::transfer::TransferFunctionStore;

/// Resolution of the classification grid.
pub const RESAMPLE_STEP_NM: f64 = 0.1;

/// Diagnostic error/SPC metrics are evaluated over this fixed window,
/// clipped to the measured span.
pub const DIAGNOSTIC_RANGE_NM: (f64, f64) = (300.0, 1200.0);

/// A point passes the SPC screen unless it is catastrophically
/// under-matched: scaled irradiance at or below a tenth of the reference.
const SPC_FLOOR: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinAssessment {
    pub lower_nm: u32,
    pub upper_nm: u32,
    pub target_pct: f64,
    pub measured_pct: f64,
    pub class: MatchClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub profile: StandardProfile,
    pub bins: Vec<BinAssessment>,
    pub abs_error_pct: f64,
    pub spc_pct: f64,
    /// Worst bin letter.
    pub classification: MatchClass,
    pub resampled: ResampledSpectrum,
}

/// Grade a bin's measured share of total irradiance against its target.
/// Bands nest from tightest to loosest with inclusive edges; the first
/// match wins. The C band is asymmetric (0.4x to 2.0x) per the standards.
pub fn classify_ratio(measured_pct: f64, target_pct: f64) -> MatchClass {
    if measured_pct >= target_pct * 0.875 && measured_pct <= target_pct * 1.125 {
        MatchClass::APlus
    } else if measured_pct >= target_pct * 0.75 && measured_pct <= target_pct * 1.25 {
        MatchClass::A
    } else if measured_pct >= target_pct * 0.6 && measured_pct <= target_pct * 1.4 {
        MatchClass::B
    } else if measured_pct >= target_pct * 0.4 && measured_pct <= target_pct * 2.0 {
        MatchClass::C
    } else {
        MatchClass::U
    }
}

/// Classify a merged spectrum against one comparison profile.
pub fn classify(
    spectrum: &MergedSpectrum,
    profile: StandardProfile,
    reference: &ReferenceSpectrum,
) -> Result<MatchResult, SunqualError> {
    let band = band_definition(profile);
    info!("Testing for {}", profile);

    let interp =
        LinearInterpolator::new(&spectrum.wavelengths_nm, &spectrum.irradiance_w_cm2_nm)?;
    let (spec_min, spec_max) = interp.domain();

    // Uniform 0.1 nm grid between the span's endpoints rounded to one
    // decimal, held as integer tenths so bin bounds index it exactly.
    let start_t = (spec_min * 10.0).round() as i64;
    let end_t = (spec_max * 10.0).round() as i64;
    let grid: Vec<f64> = (start_t..=end_t).map(|t| t as f64 / 10.0).collect();
    let resampled: Vec<f64> = grid
        .iter()
        .map(|&w| interp.eval_clamped(w, RESAMPLE_STEP_NM))
        .collect::<Result<_, _>>()?;

    let (need_min, need_max) = band.required_range_nm();
    if start_t > need_min as i64 * 10 || end_t < (need_max as i64) * 10 {
        return Err(SunqualError::InsufficientCoverage {
            standard: profile,
            need_min,
            need_max,
            have_min: spec_min,
            have_max: spec_max,
        });
    }
    let index_of = |nm: u32| (nm as i64 * 10 - start_t) as usize;

    // Total energy over the profile's full range. Only ever compared against
    // slices of itself, so the grid density cancels out.
    let total: f64 = resampled[index_of(need_min)..=index_of(need_max)]
        .iter()
        .sum();
    if total <= 0.0 {
        return Err(SunqualError::ZeroEnergy {
            lower_nm: need_min as f64,
            upper_nm: need_max as f64,
        });
    }

    let bins: Vec<BinAssessment> = band
        .bins
        .iter()
        .map(|bin| {
            let energy: f64 = resampled[index_of(bin.lower_nm)..=index_of(bin.upper_nm)]
                .iter()
                .sum();
            let measured_pct = energy / total * 100.0;
            BinAssessment {
                lower_nm: bin.lower_nm,
                upper_nm: bin.upper_nm,
                target_pct: bin.target_pct,
                measured_pct,
                class: classify_ratio(measured_pct, bin.target_pct),
            }
        })
        .collect();

    let (abs_error_pct, spc_pct) = shape_error_metrics(&interp, reference)?;

    let classification = bins
        .iter()
        .map(|b| b.class)
        .max()
        .unwrap_or(MatchClass::U);

    Ok(MatchResult {
        profile,
        bins,
        abs_error_pct,
        spc_pct,
        classification,
        resampled: ResampledSpectrum {
            wavelengths_nm: grid,
            irradiance_w_cm2_nm: resampled,
        },
    })
}

/// Shape-only comparison of the measured spectrum against the reference
/// over the fixed diagnostic window: the measured sample is scaled so its
/// sum matches the reference's, then the aggregate absolute error and the
/// SPC (share of reference energy not catastrophically under-matched) are
/// accumulated.
fn shape_error_metrics(
    measured: &LinearInterpolator<'_>,
    reference: &ReferenceSpectrum,
) -> Result<(f64, f64), SunqualError> {
    let (spec_min, spec_max) = measured.domain();
    let lower_nm = spec_min.max(DIAGNOSTIC_RANGE_NM.0);
    let upper_nm = spec_max.min(DIAGNOSTIC_RANGE_NM.1);
    if upper_nm <= lower_nm {
        return Err(SunqualError::ZeroEnergy { lower_nm, upper_nm });
    }

    let count = ((upper_nm - lower_nm) / RESAMPLE_STEP_NM + 1e-6).floor() as usize + 1;
    let grid: Vec<f64> = (0..count)
        .map(|k| ((lower_nm + k as f64 * RESAMPLE_STEP_NM) * 1000.0).round() / 1000.0)
        .collect();

    let measured_sample: Vec<f64> = grid
        .iter()
        .map(|&w| measured.eval_clamped(w, RESAMPLE_STEP_NM))
        .collect::<Result<_, _>>()?;
    let ref_interp = LinearInterpolator::new(
        &reference.wavelengths_nm,
        &reference.irradiance_w_cm2_nm,
    )?;
    let ref_sample = ref_interp.sample(&grid)?;

    let measured_sum: f64 = measured_sample.iter().sum();
    let ref_sum: f64 = ref_sample.iter().sum();
    if measured_sum <= 0.0 {
        return Err(SunqualError::ZeroEnergy { lower_nm, upper_nm });
    }
    let scale = ref_sum / measured_sum;

    let abs_error_pct = measured_sample
        .iter()
        .zip(&ref_sample)
        .map(|(&m, &r)| (m * scale - r).abs())
        .sum::<f64>()
        / ref_sum
        * 100.0;

    let passing: f64 = measured_sample
        .iter()
        .zip(&ref_sample)
        .filter(|&(&m, &r)| m * scale > SPC_FLOOR * r)
        .map(|(_, &r)| r)
        .sum();
    let spc_pct = passing / ref_sum * 100.0;

    Ok((abs_error_pct, spc_pct))
}

/// Run the full spectral-match pipeline for a request: convert whichever
/// detector scans were measured through their gain's transfer function,
/// merge at the configured crossover, optionally export the raw merged
/// irradiance, and classify against the requested standard.
pub fn run_spectral_match(
    si_scan: Option<&ScanRecord>,
    iga_scan: Option<&ScanRecord>,
    request: &AnalysisRequest,
    transfers: &TransferFunctionStore,
    references: &ReferenceSpectrumStore,
) -> Result<MatchResult, SunqualError> {
    let si = si_scan
        .map(|scan| {
            let gain = request
                .silicon_gain
                .ok_or(SunqualError::MissingGain(Detector::Silicon))?;
            convert(scan, transfers.get(Detector::Silicon, gain))
        })
        .transpose()?;
    let iga = iga_scan
        .map(|scan| {
            let gain = request
                .ingaas_gain
                .ok_or(SunqualError::MissingGain(Detector::InGaAs))?;
            convert(scan, transfers.get(Detector::InGaAs, gain))
        })
        .transpose()?;

    let merged = merge(si.as_ref(), iga.as_ref(), request.crossover_nm)?;

    if let Some(path) = &request.raw_irradiance_path {
        write_irradiance_csv(path, &merged)?;
        info!("Raw irradiance data saved to {}", path.display());
    }

    let reference = references.get(request.standard.reference());
    let result = classify(&merged, request.standard, reference)?;
    info!(
        "Overall classification for '{}': {}",
        request.label, result.classification
    );
    Ok(result)
}
