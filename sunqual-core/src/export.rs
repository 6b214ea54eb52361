//! Writers for the reporting collaborator: raw merged irradiance as CSV and
//! the full match result as JSON.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use sunqual_schemas::spectrum::MergedSpectrum;

use crate::spectral::classify::MatchResult;

#[derive(Debug, Serialize)]
struct IrradianceRow {
    wavelength_nm: f64,
    irradiance_w_cm2_nm: f64,
}

/// Write the merged spectrum as a two-column CSV.
pub fn write_irradiance_csv(path: &Path, spectrum: &MergedSpectrum) -> Result<(), anyhow::Error> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating irradiance export at {}", path.display()))?;

    for (&wavelength_nm, &irradiance_w_cm2_nm) in spectrum
        .wavelengths_nm
        .iter()
        .zip(&spectrum.irradiance_w_cm2_nm)
    {
        writer.serialize(IrradianceRow {
            wavelength_nm,
            irradiance_w_cm2_nm,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a match result, including the audit resample, as pretty JSON.
pub fn write_match_report_json(path: &Path, result: &MatchResult) -> Result<(), anyhow::Error> {
    let file = fs::File::create(path)
        .with_context(|| format!("creating match report at {}", path.display()))?;
    serde_json::to_writer_pretty(file, result)
        .with_context(|| format!("serializing match report to {}", path.display()))?;
    Ok(())
}
