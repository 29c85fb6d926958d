use std::collections::BTreeMap;

use super::model::{Bin, MeasurementRecord};

// ---------------------------------------------------------------------------
// Presentation projections over the filtered record subset
// ---------------------------------------------------------------------------

/// One sample's bar-chart series: mean normalized count per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct CountSeries {
    pub sample: String,
    /// (bin, mean count) in bin order; bins with no records are omitted.
    pub counts: Vec<(Bin, f64)>,
}

/// Group the filtered records by sample and bin for the counts bar chart.
///
/// Samples appear in first-seen order. When several records share a
/// (sample, bin) pair (the same sample name in two selected reports), the
/// series carries their mean, matching the chart's estimator upstream.
pub fn count_series(records: &[MeasurementRecord]) -> Vec<CountSeries> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: BTreeMap<(String, Bin), (f64, usize)> = BTreeMap::new();

    for rec in records {
        if !order.contains(&rec.sample) {
            order.push(rec.sample.clone());
        }
        let entry = sums.entry((rec.sample.clone(), rec.bin)).or_insert((0.0, 0));
        entry.0 += rec.count;
        entry.1 += 1;
    }

    order
        .into_iter()
        .map(|sample| {
            let counts = Bin::ALL
                .into_iter()
                .filter_map(|bin| {
                    sums.get(&(sample.clone(), bin))
                        .map(|&(sum, n)| (bin, sum / n as f64))
                })
                .collect();
            CountSeries { sample, counts }
        })
        .collect()
}

/// Distinct samples with their maximum observed particle size, largest first.
/// Ties keep first-seen order.
pub fn max_size_ranking(records: &[MeasurementRecord]) -> Vec<(String, f64)> {
    let mut ranking: Vec<(String, f64)> = Vec::new();
    for rec in records {
        if !ranking.iter().any(|(sample, _)| sample == &rec.sample) {
            ranking.push((rec.sample.clone(), rec.max_particle_size_um));
        }
    }
    ranking.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranking
}

/// One row of the display table: the fixed column projection.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub report: String,
    pub sample: String,
    pub bin: Bin,
    pub count: f64,
    pub max_particle_size_um: f64,
    pub notes: String,
}

/// Project the filtered records onto the table columns, preserving order.
pub fn table_rows(records: &[MeasurementRecord]) -> Vec<TableRow> {
    records
        .iter()
        .map(|rec| TableRow {
            report: rec.report.clone(),
            sample: rec.sample.clone(),
            bin: rec.bin,
            count: rec.count,
            max_particle_size_um: rec.max_particle_size_um,
            notes: rec.notes.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(report: &str, sample: &str, bin: Bin, count: f64, max: f64) -> MeasurementRecord {
        MeasurementRecord {
            report: report.to_string(),
            date: "2024-03-18".to_string(),
            sample: sample.to_string(),
            bin,
            max_particle_size_um: max,
            count,
            notes: "n".to_string(),
        }
    }

    #[test]
    fn count_series_groups_by_sample_then_bin() {
        let records = vec![
            rec("R1", "S1", Bin::Um10, 50.0, 30.0),
            rec("R1", "S1", Bin::Um25, 25.0, 30.0),
            rec("R1", "S2", Bin::Um10, 10.0, 15.0),
        ];

        let series = count_series(&records);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].sample, "S1");
        assert_eq!(series[0].counts, vec![(Bin::Um10, 50.0), (Bin::Um25, 25.0)]);
        assert_eq!(series[1].sample, "S2");
        assert_eq!(series[1].counts, vec![(Bin::Um10, 10.0)]);
    }

    #[test]
    fn count_series_averages_duplicate_sample_bin_pairs() {
        let records = vec![
            rec("R1", "S1", Bin::Um10, 40.0, 30.0),
            rec("R2", "S1", Bin::Um10, 60.0, 28.0),
        ];

        let series = count_series(&records);
        assert_eq!(series[0].counts, vec![(Bin::Um10, 50.0)]);
    }

    #[test]
    fn ranking_sorts_by_max_size_descending() {
        let records = vec![
            rec("R1", "S1", Bin::Um10, 1.0, 12.0),
            rec("R1", "S2", Bin::Um10, 1.0, 45.0),
            rec("R1", "S3", Bin::Um10, 1.0, 30.0),
        ];

        let ranking = max_size_ranking(&records);
        let names: Vec<&str> = ranking.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(names, vec!["S2", "S3", "S1"]);
    }

    #[test]
    fn table_rows_project_the_fixed_columns_in_order() {
        let records = vec![
            rec("R1", "S1", Bin::Um10, 50.0, 30.0),
            rec("R1", "S1", Bin::Um25, 25.0, 30.0),
        ];

        let rows = table_rows(&records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].report, "R1");
        assert_eq!(rows[0].bin, Bin::Um10);
        assert_eq!(rows[1].count, 25.0);
        assert_eq!(rows[1].notes, "n");
    }
}
