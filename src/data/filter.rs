use std::collections::BTreeSet;

use super::model::{Bin, MeasurementRecord};

// ---------------------------------------------------------------------------
// Selection state: which reports / samples / bins the user has chosen
// ---------------------------------------------------------------------------

/// The three selection sets driving the filtered view.
///
/// All three are conjunctive: a record must match every set. An empty set
/// selects nothing, there is no implicit "select all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub reports: BTreeSet<String>,
    pub samples: BTreeSet<String>,
    pub bins: BTreeSet<Bin>,
}

impl Selection {
    /// Fresh selection with all bins checked, matching the UI default.
    pub fn with_all_bins() -> Self {
        Selection {
            reports: BTreeSet::new(),
            samples: BTreeSet::new(),
            bins: Bin::ALL.into_iter().collect(),
        }
    }
}

/// Return the records passing all three selection sets, in input order.
///
/// Unknown identifiers in the sets simply match nothing: an out-of-date
/// selection degrades to an empty view rather than an error.
pub fn filter_records(
    records: &[MeasurementRecord],
    selection: &Selection,
) -> Vec<MeasurementRecord> {
    records
        .iter()
        .filter(|rec| {
            selection.reports.contains(&rec.report)
                && selection.samples.contains(&rec.sample)
                && selection.bins.contains(&rec.bin)
        })
        .cloned()
        .collect()
}

/// Distinct sample names (first-seen order) among records whose report id is
/// selected. Recomputed from scratch on every report-selection change so the
/// result never depends on a previous sample selection.
pub fn available_samples(
    records: &[MeasurementRecord],
    selected_reports: &BTreeSet<String>,
) -> Vec<String> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut samples = Vec::new();
    for rec in records {
        if selected_reports.contains(&rec.report) && seen.insert(&rec.sample) {
            samples.push(rec.sample.clone());
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(report: &str, sample: &str, bin: Bin) -> MeasurementRecord {
        MeasurementRecord {
            report: report.to_string(),
            date: "2024-03-18".to_string(),
            sample: sample.to_string(),
            bin,
            max_particle_size_um: 30.0,
            count: 1.0,
            notes: String::new(),
        }
    }

    fn fixture() -> Vec<MeasurementRecord> {
        vec![
            rec("R1", "S1", Bin::Um10),
            rec("R1", "S1", Bin::Um25),
            rec("R1", "S2", Bin::Um10),
            rec("R2", "S3", Bin::Um50),
        ]
    }

    fn strings(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn all_three_predicates_are_conjunctive() {
        let records = fixture();
        let selection = Selection {
            reports: strings(&["R1"]),
            samples: strings(&["S1"]),
            bins: [Bin::Um10].into_iter().collect(),
        };

        let out = filter_records(&records, &selection);
        assert_eq!(out, vec![rec("R1", "S1", Bin::Um10)]);
    }

    #[test]
    fn any_empty_set_yields_empty_result() {
        let records = fixture();
        let full = Selection {
            reports: strings(&["R1", "R2"]),
            samples: strings(&["S1", "S2", "S3"]),
            bins: Bin::ALL.into_iter().collect(),
        };
        assert_eq!(filter_records(&records, &full).len(), 4);

        for clear in [
            |s: &mut Selection| s.reports.clear(),
            |s: &mut Selection| s.samples.clear(),
            |s: &mut Selection| s.bins.clear(),
        ] {
            let mut selection = full.clone();
            clear(&mut selection);
            assert!(filter_records(&records, &selection).is_empty());
        }
    }

    #[test]
    fn unknown_identifiers_match_nothing_silently() {
        let records = fixture();
        let selection = Selection {
            reports: strings(&["no-such-report"]),
            samples: strings(&["S1"]),
            bins: Bin::ALL.into_iter().collect(),
        };
        assert!(filter_records(&records, &selection).is_empty());
    }

    #[test]
    fn filter_preserves_input_order() {
        let records = fixture();
        let selection = Selection {
            reports: strings(&["R1", "R2"]),
            samples: strings(&["S1", "S2", "S3"]),
            bins: [Bin::Um10, Bin::Um50].into_iter().collect(),
        };

        let out = filter_records(&records, &selection);
        assert_eq!(
            out,
            vec![
                rec("R1", "S1", Bin::Um10),
                rec("R1", "S2", Bin::Um10),
                rec("R2", "S3", Bin::Um50),
            ]
        );
    }

    #[test]
    fn available_samples_follows_report_selection_only() {
        let records = fixture();

        let r1 = available_samples(&records, &strings(&["R1"]));
        assert_eq!(r1, vec!["S1".to_string(), "S2".to_string()]);

        let r2 = available_samples(&records, &strings(&["R2"]));
        assert_eq!(r2, vec!["S3".to_string()]);

        // Idempotent: repeated calls with the same reports agree.
        assert_eq!(r1, available_samples(&records, &strings(&["R1"])));

        assert!(available_samples(&records, &BTreeSet::new()).is_empty());
    }
}
