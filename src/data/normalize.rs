use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Bin, Counts, MeasurementRecord, REPORTING_VOLUME_ML};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures while turning a decoded report document into measurement records.
///
/// The two variants are deliberately distinct so callers can tell a broken
/// document shape apart from a document that is well-formed but divides by a
/// zero tested volume.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("malformed report document: {0}")]
    Malformed(String),

    #[error("sample '{sample}': volume tested per replicate is zero")]
    ZeroVolume { sample: String },
}

// ---------------------------------------------------------------------------
// Wire-format document shapes (parse intermediates, discarded after flattening)
// ---------------------------------------------------------------------------

/// One report entry as submitted, field names exactly as on the wire.
#[derive(Debug, Deserialize)]
struct ReportDoc {
    #[serde(rename = "Report No.")]
    report_no: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Notes")]
    notes: String,
    #[serde(rename = "Samples")]
    samples: Vec<SampleDoc>,
}

#[derive(Debug, Deserialize)]
struct SampleDoc {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Counts")]
    counts: Counts,
    #[serde(rename = "Num Replicates")]
    num_replicates: u32,
    #[serde(rename = "Volume Tested per Replicate (mL)")]
    volume_ml: f64,
    #[serde(rename = "Max Particle Size (um)")]
    max_particle_size_um: f64,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Flatten a decoded report document into measurement records.
///
/// Expected document shape (top-level JSON array):
///
/// ```json
/// [
///   {
///     "Report No.": "R1",
///     "Date": "2024-03-18",
///     "Notes": "routine check",
///     "Samples": [
///       {
///         "Name": "S1",
///         "Counts": { "10um": 4, "25um": 2, "50um": 0 },
///         "Num Replicates": 1,
///         "Volume Tested per Replicate (mL)": 2.0,
///         "Max Particle Size (um)": 30.0
///       }
///     ]
///   }
/// ]
/// ```
///
/// Each sample yields exactly one record per bin. Counts are normalized to
/// counts per [`REPORTING_VOLUME_ML`]: each replicate's raw count is divided
/// by the tested volume, the per-replicate densities are summed, the sum is
/// divided by the declared replicate count, and the mean density is rescaled
/// to the reporting volume. The sum-first-then-average order matches the
/// upstream reporting tool so outputs stay bit-comparable.
///
/// Pure function: no partial output on failure, no state between calls.
pub fn normalize(document: JsonValue) -> Result<Vec<MeasurementRecord>, NormalizeError> {
    let reports: Vec<ReportDoc> =
        serde_json::from_value(document).map_err(|e| NormalizeError::Malformed(e.to_string()))?;

    let mut records = Vec::with_capacity(reports.iter().map(|r| r.samples.len() * 3).sum());

    for report in &reports {
        for sample in &report.samples {
            if sample.num_replicates == 0 {
                return Err(NormalizeError::Malformed(format!(
                    "sample '{}': 'Num Replicates' must be positive",
                    sample.name
                )));
            }
            if sample.volume_ml == 0.0 {
                return Err(NormalizeError::ZeroVolume {
                    sample: sample.name.clone(),
                });
            }
            if sample.volume_ml < 0.0 {
                return Err(NormalizeError::Malformed(format!(
                    "sample '{}': 'Volume Tested per Replicate (mL)' must be positive",
                    sample.name
                )));
            }

            let replicates = sample.counts.replicates();
            for bin in Bin::ALL {
                let mut density_per_ml = 0.0;
                for replicate in replicates {
                    density_per_ml += replicate.get(bin) as f64 / sample.volume_ml;
                }
                // Divide by the declared replicate count, not the list length.
                let count =
                    density_per_ml / f64::from(sample.num_replicates) * REPORTING_VOLUME_ML;

                records.push(MeasurementRecord {
                    report: report.report_no.clone(),
                    date: report.date.clone(),
                    sample: sample.name.clone(),
                    bin,
                    max_particle_size_um: sample.max_particle_size_um,
                    count,
                    notes: report.notes.clone(),
                });
            }
        }
    }

    Ok(records)
}
