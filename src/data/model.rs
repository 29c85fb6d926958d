use std::fmt;

use serde::Deserialize;

/// Every normalized count is reported per this fixed volume. A reporting
/// convention, not a knob.
pub const REPORTING_VOLUME_ML: f64 = 25.0;

// ---------------------------------------------------------------------------
// Bin – the fixed particle-size classes
// ---------------------------------------------------------------------------

/// One of the three fixed particle-size bins every report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bin {
    Um10,
    Um25,
    Um50,
}

impl Bin {
    /// All bins, in reporting order.
    pub const ALL: [Bin; 3] = [Bin::Um10, Bin::Um25, Bin::Um50];

    /// The wire / display label, e.g. `"10um"`.
    pub fn label(self) -> &'static str {
        match self {
            Bin::Um10 => "10um",
            Bin::Um25 => "25um",
            Bin::Um50 => "50um",
        }
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Wire-format count shapes
// ---------------------------------------------------------------------------

/// Raw counts for one replicate: a non-negative integer per bin label.
#[derive(Debug, Clone, Deserialize)]
pub struct BinCounts {
    #[serde(rename = "10um")]
    pub um10: u64,
    #[serde(rename = "25um")]
    pub um25: u64,
    #[serde(rename = "50um")]
    pub um50: u64,
}

impl BinCounts {
    pub fn get(&self, bin: Bin) -> u64 {
        match bin {
            Bin::Um10 => self.um10,
            Bin::Um25 => self.um25,
            Bin::Um50 => self.um50,
        }
    }
}

/// A sample's raw counts field: one replicate is a bare object, multiple
/// replicates are an array of objects. The shape is decided once at parse
/// time instead of re-inspected downstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Counts {
    Single(BinCounts),
    Multi(Vec<BinCounts>),
}

impl Counts {
    /// View the counts as a uniform replicate slice.
    pub fn replicates(&self) -> &[BinCounts] {
        match self {
            Counts::Single(c) => std::slice::from_ref(c),
            Counts::Multi(cs) => cs.as_slice(),
        }
    }
}

// ---------------------------------------------------------------------------
// MeasurementRecord – one flat row of the normalized dataset
// ---------------------------------------------------------------------------

/// The flattened unit of data downstream consumers operate on: one bin of one
/// sample of one report, with the count already normalized to counts per
/// [`REPORTING_VOLUME_ML`].
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub report: String,
    pub date: String,
    pub sample: String,
    pub bin: Bin,
    pub max_particle_size_um: f64,
    pub count: f64,
    pub notes: String,
}

// ---------------------------------------------------------------------------
// RecordSet – the complete normalized dataset
// ---------------------------------------------------------------------------

/// The full flat record set with a pre-computed report-id index.
#[derive(Debug, Clone)]
pub struct RecordSet {
    /// All measurement records, in document order.
    pub records: Vec<MeasurementRecord>,
    /// Distinct report identifiers, first-seen order.
    pub report_ids: Vec<String>,
}

impl RecordSet {
    /// Build the report-id index from the flat records.
    pub fn from_records(records: Vec<MeasurementRecord>) -> Self {
        let mut report_ids: Vec<String> = Vec::new();
        for rec in &records {
            if !report_ids.contains(&rec.report) {
                report_ids.push(rec.report.clone());
            }
        }
        RecordSet {
            records,
            report_ids,
        }
    }

    /// Number of measurement records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_labels_match_wire_format() {
        let labels: Vec<&str> = Bin::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["10um", "25um", "50um"]);
    }

    #[test]
    fn counts_replicates_unifies_both_shapes() {
        let single: Counts =
            serde_json::from_value(serde_json::json!({"10um": 1, "25um": 2, "50um": 3})).unwrap();
        assert_eq!(single.replicates().len(), 1);
        assert_eq!(single.replicates()[0].get(Bin::Um25), 2);

        let multi: Counts = serde_json::from_value(serde_json::json!([
            {"10um": 1, "25um": 2, "50um": 3},
            {"10um": 4, "25um": 5, "50um": 6}
        ]))
        .unwrap();
        assert_eq!(multi.replicates().len(), 2);
        assert_eq!(multi.replicates()[1].get(Bin::Um50), 6);
    }

    #[test]
    fn record_set_indexes_reports_first_seen() {
        let rec = |report: &str| MeasurementRecord {
            report: report.to_string(),
            date: "2024-01-01".to_string(),
            sample: "S".to_string(),
            bin: Bin::Um10,
            max_particle_size_um: 0.0,
            count: 0.0,
            notes: String::new(),
        };
        let set = RecordSet::from_records(vec![rec("R2"), rec("R1"), rec("R2")]);
        assert_eq!(set.report_ids, vec!["R2".to_string(), "R1".to_string()]);
        assert_eq!(set.len(), 3);
    }
}
