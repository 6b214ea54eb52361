//! Conversion of raw detector scans to spectral irradiance, and stitching
//! of the two detector sub-ranges into one continuous spectrum.

use log::debug;

use sunqual_schemas::scan::ScanRecord;
use sunqual_schemas::spectrum::{IrradianceSpectrum, MergedSpectrum};

use crate::error::SunqualError;
use crate::spectral::interp::LinearInterpolator;
use crate::spectral::transfer::TransferFunction;

/// Convert a raw voltage scan to spectral irradiance through a calibration
/// table.
///
/// The scan is resampled by linear interpolation onto integer wavelengths
/// over the range common to scan and table (rounded inward to whole nm),
/// then multiplied elementwise by the table's factors. The output covers
/// exactly `floor(min(maxes)) - ceil(max(mins)) + 1` points.
pub fn convert(
    scan: &ScanRecord,
    transfer: &TransferFunction,
) -> Result<IrradianceSpectrum, SunqualError> {
    let interp = LinearInterpolator::new(&scan.wavelengths_nm, &scan.signal)?;
    let (scan_min, scan_max) = interp.domain();

    let min_nm = scan_min.max(transfer.min_wavelength_nm()).ceil();
    let max_nm = scan_max.min(transfer.max_wavelength_nm()).floor();
    if min_nm > max_nm {
        return Err(SunqualError::NoOverlap {
            scan_min,
            scan_max,
            transfer_min: transfer.min_wavelength_nm(),
            transfer_max: transfer.max_wavelength_nm(),
        });
    }
    debug!(
        "Interpolating the {} scan over {} to {} nm",
        transfer.detector, min_nm, max_nm
    );

    let count = (max_nm - min_nm) as usize + 1;
    let wavelengths_nm: Vec<f64> = (0..count).map(|i| min_nm + i as f64).collect();
    let signal = interp.sample(&wavelengths_nm)?;
    let factors = transfer.slice_integer_range(min_nm, max_nm)?;

    let irradiance_w_cm2_nm = signal
        .iter()
        .zip(factors)
        .map(|(volts, factor)| volts * factor)
        .collect();

    Ok(IrradianceSpectrum {
        detector: transfer.detector,
        wavelengths_nm,
        irradiance_w_cm2_nm,
    })
}

/// Stitch the low- and high-wavelength detector spectra at the crossover:
/// points at or below it come from `low`, points above it from `high`.
///
/// A single supplied spectrum passes through unchanged with no crossover
/// applied. With both present, a crossover must be configured and each side
/// must contribute at least one point.
pub fn merge(
    low: Option<&IrradianceSpectrum>,
    high: Option<&IrradianceSpectrum>,
    crossover_nm: Option<f64>,
) -> Result<MergedSpectrum, SunqualError> {
    match (low, high) {
        (Some(low), Some(high)) => {
            let crossover_nm = crossover_nm.ok_or(SunqualError::MissingCrossover)?;
            if !low.wavelengths_nm.iter().any(|&w| w <= crossover_nm) {
                return Err(SunqualError::InvalidCrossover {
                    crossover_nm,
                    side: "low",
                });
            }
            if !high.wavelengths_nm.iter().any(|&w| w > crossover_nm) {
                return Err(SunqualError::InvalidCrossover {
                    crossover_nm,
                    side: "high",
                });
            }

            let mut wavelengths_nm = Vec::new();
            let mut irradiance_w_cm2_nm = Vec::new();
            for (&w, &e) in low.wavelengths_nm.iter().zip(&low.irradiance_w_cm2_nm) {
                if w <= crossover_nm {
                    wavelengths_nm.push(w);
                    irradiance_w_cm2_nm.push(e);
                }
            }
            for (&w, &e) in high.wavelengths_nm.iter().zip(&high.irradiance_w_cm2_nm) {
                if w > crossover_nm {
                    wavelengths_nm.push(w);
                    irradiance_w_cm2_nm.push(e);
                }
            }
            Ok(MergedSpectrum {
                wavelengths_nm,
                irradiance_w_cm2_nm,
                crossover_nm: Some(crossover_nm),
            })
        }
        (Some(only), None) | (None, Some(only)) => Ok(MergedSpectrum {
            wavelengths_nm: only.wavelengths_nm.clone(),
            irradiance_w_cm2_nm: only.irradiance_w_cm2_nm.clone(),
            crossover_nm: None,
        }),
        (None, None) => Err(SunqualError::NoDetectorData),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sunqual_schemas::scan::{Detector, Gain, ScanMetadata};

    fn scan(wavelengths_nm: Vec<f64>, signal: Vec<f64>) -> ScanRecord {
        ScanRecord {
            wavelengths_nm,
            signal,
            metadata: ScanMetadata::default(),
        }
    }

    fn constant_transfer(detector: Detector, min_nm: u32, max_nm: u32, factor: f64) -> TransferFunction {
        let wavelengths_nm: Vec<f64> = (min_nm..=max_nm).map(f64::from).collect();
        let factors_w_cm2_nm_v = vec![factor; wavelengths_nm.len()];
        TransferFunction {
            detector,
            gain: Gain::High,
            wavelengths_nm,
            factors_w_cm2_nm_v,
        }
    }

    fn spectrum(detector: Detector, min_nm: u32, max_nm: u32, level: f64) -> IrradianceSpectrum {
        let wavelengths_nm: Vec<f64> = (min_nm..=max_nm).map(f64::from).collect();
        let irradiance_w_cm2_nm = vec![level; wavelengths_nm.len()];
        IrradianceSpectrum {
            detector,
            wavelengths_nm,
            irradiance_w_cm2_nm,
        }
    }

    #[test]
    fn output_domain_is_the_integer_overlap() {
        let scan = scan(vec![250.3, 600.0, 1100.7], vec![0.5, 0.5, 0.5]);
        let transfer = constant_transfer(Detector::Silicon, 250, 1100, 2.0);

        let out = convert(&scan, &transfer).unwrap();
        assert_eq!(out.wavelengths_nm[0], 251.0);
        assert_eq!(*out.wavelengths_nm.last().unwrap(), 1100.0);
        assert_eq!(out.len(), 1100 - 251 + 1);
    }

    #[test]
    fn constant_scan_round_trips_the_factor() {
        let scan = scan((250..=1100).map(f64::from).collect(), vec![1.0; 851]);
        let transfer = constant_transfer(Detector::Silicon, 250, 1100, 3.5e-5);

        let out = convert(&scan, &transfer).unwrap();
        assert_eq!(out.len(), 851);
        for &e in &out.irradiance_w_cm2_nm {
            assert_relative_eq!(e, 3.5e-5, epsilon = 1e-18);
        }
    }

    #[test]
    fn interpolates_between_scan_samples() {
        // Signal ramps 0 -> 1 across 500-502 nm; transfer factor is 1.
        let scan = scan(vec![500.0, 502.0], vec![0.0, 1.0]);
        let transfer = constant_transfer(Detector::Silicon, 500, 502, 1.0);

        let out = convert(&scan, &transfer).unwrap();
        assert_eq!(out.wavelengths_nm, vec![500.0, 501.0, 502.0]);
        assert_relative_eq!(out.irradiance_w_cm2_nm[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn disjoint_domains_are_a_range_error() {
        let scan = scan(vec![250.0, 300.0], vec![1.0, 1.0]);
        let transfer = constant_transfer(Detector::InGaAs, 900, 1749, 1.0);
        assert!(matches!(
            convert(&scan, &transfer),
            Err(SunqualError::NoOverlap { .. })
        ));
    }

    #[test]
    fn non_monotonic_scan_is_an_input_error() {
        let scan = scan(vec![500.0, 499.0, 501.0], vec![1.0, 1.0, 1.0]);
        let transfer = constant_transfer(Detector::Silicon, 250, 1100, 1.0);
        assert!(matches!(
            convert(&scan, &transfer),
            Err(SunqualError::NonMonotonic { .. })
        ));
    }

    #[test]
    fn coarse_transfer_table_is_a_lookup_error() {
        let scan = scan(vec![500.0, 510.0], vec![1.0, 1.0]);
        // 5 nm steps; 501 nm is missing.
        let transfer = TransferFunction {
            detector: Detector::Silicon,
            gain: Gain::High,
            wavelengths_nm: vec![500.0, 505.0, 510.0],
            factors_w_cm2_nm_v: vec![1.0, 1.0, 1.0],
        };
        assert!(matches!(
            convert(&scan, &transfer),
            Err(SunqualError::MissingTableEntry { wavelength, .. }) if wavelength == 501.0
        ));
    }

    #[test]
    fn merge_splits_at_the_crossover() {
        let si = spectrum(Detector::Silicon, 250, 1100, 1.0);
        let iga = spectrum(Detector::InGaAs, 900, 1749, 2.0);

        let merged = merge(Some(&si), Some(&iga), Some(1000.0)).unwrap();
        assert_eq!(merged.crossover_nm, Some(1000.0));
        assert_eq!(merged.wavelengths_nm[0], 250.0);
        assert_eq!(*merged.wavelengths_nm.last().unwrap(), 1749.0);
        // 250..=1000 from Si, 1001..=1749 from InGaAs.
        assert_eq!(merged.len(), 751 + 749);
        assert_eq!(merged.irradiance_w_cm2_nm[750], 1.0);
        assert_eq!(merged.irradiance_w_cm2_nm[751], 2.0);
        // Strictly increasing with no duplicate at the crossover.
        for pair in merged.wavelengths_nm.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn single_detector_passes_through() {
        let si = spectrum(Detector::Silicon, 250, 1100, 1.0);
        let merged = merge(Some(&si), None, None).unwrap();
        assert_eq!(merged.crossover_nm, None);
        assert_eq!(merged.wavelengths_nm, si.wavelengths_nm);
        assert_eq!(merged.irradiance_w_cm2_nm, si.irradiance_w_cm2_nm);
    }

    #[test]
    fn high_detector_entirely_above_the_crossover_is_kept_whole() {
        // End-to-end scenario: Si out to 1100 nm, InGaAs starting above it.
        let si = spectrum(Detector::Silicon, 250, 1100, 1.0);
        let iga = spectrum(Detector::InGaAs, 1101, 1749, 2.0);

        let merged = merge(Some(&si), Some(&iga), Some(1100.0)).unwrap();
        assert_eq!(merged.len(), 851 + 649);
        assert_eq!(merged.irradiance_w_cm2_nm[850], 1.0);
        assert_eq!(merged.irradiance_w_cm2_nm[851], 2.0);
    }

    #[test]
    fn crossover_beyond_both_domains_is_a_config_error() {
        let si = spectrum(Detector::Silicon, 250, 1100, 1.0);
        let iga = spectrum(Detector::InGaAs, 900, 1749, 2.0);

        assert!(matches!(
            merge(Some(&si), Some(&iga), Some(1800.0)),
            Err(SunqualError::InvalidCrossover { side: "high", .. })
        ));
        assert!(matches!(
            merge(Some(&si), Some(&iga), Some(200.0)),
            Err(SunqualError::InvalidCrossover { side: "low", .. })
        ));
    }

    #[test]
    fn missing_crossover_with_two_detectors_is_a_config_error() {
        let si = spectrum(Detector::Silicon, 250, 1100, 1.0);
        let iga = spectrum(Detector::InGaAs, 900, 1749, 2.0);
        assert!(matches!(
            merge(Some(&si), Some(&iga), None),
            Err(SunqualError::MissingCrossover)
        ));
    }

    #[test]
    fn no_detector_data_is_a_config_error() {
        assert!(matches!(
            merge(None, None, Some(1000.0)),
            Err(SunqualError::NoDetectorData)
        ));
    }
}
