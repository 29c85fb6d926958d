use std::path::Path;

use anyhow::Context;
use serde_json::Value as JsonValue;

use crate::color::SampleColors;
use crate::data::filter::{available_samples, filter_records, Selection};
use crate::data::model::{Bin, MeasurementRecord, RecordSet};
use crate::data::normalize::normalize;
use crate::fetch::GithubSource;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Owns the one current-dataset slot: replaced wholesale on a successful
/// load, explicitly cleared on a failed one, never partially overwritten.
pub struct AppState {
    /// Remote report store.
    pub source: GithubSource,

    /// Document names available in the store.
    pub documents: Vec<String>,

    /// Name of the currently loaded document (for the picker).
    pub selected_document: Option<String>,

    /// Normalized dataset (None until a document loads).
    pub dataset: Option<RecordSet>,

    /// Report / sample / bin selection sets.
    pub selection: Selection,

    /// Sample options derived from the current report selection.
    pub sample_options: Vec<String>,

    /// Records passing the current selection (cached).
    pub filtered: Vec<MeasurementRecord>,

    /// Per-sample colours for the charts.
    pub sample_colors: SampleColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source: GithubSource::default(),
            documents: Vec::new(),
            selected_document: None,
            dataset: None,
            selection: Selection::with_all_bins(),
            sample_options: Vec::new(),
            filtered: Vec::new(),
            sample_colors: SampleColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Re-list the documents available in the remote store.
    pub fn refresh_documents(&mut self) {
        match self.source.list_documents() {
            Ok(names) => {
                log::info!("Found {} report documents", names.len());
                self.documents = names;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to list documents: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Fetch a named document from the store and ingest it.
    pub fn open_remote(&mut self, name: &str) {
        self.selected_document = Some(name.to_string());
        match self.source.fetch_document(name) {
            Ok(document) => self.ingest(document),
            Err(e) => {
                log::error!("Failed to fetch {name}: {e}");
                self.clear_dataset(format!("Error: {e}"));
            }
        }
    }

    /// Read a local report JSON file and ingest it.
    pub fn open_local(&mut self, path: &Path) {
        self.selected_document = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        let decoded = std::fs::read_to_string(path)
            .context("reading report file")
            .and_then(|text| serde_json::from_str::<JsonValue>(&text).context("decoding JSON"));
        match decoded {
            Ok(document) => self.ingest(document),
            Err(e) => {
                log::error!("Failed to read {}: {e:#}", path.display());
                self.clear_dataset(format!("Error: {e:#}"));
            }
        }
    }

    /// Normalize a decoded document into the current-dataset slot.
    ///
    /// On failure the slot is cleared, not left holding the prior dataset.
    pub fn ingest(&mut self, document: JsonValue) {
        match normalize(document) {
            Ok(records) => {
                let dataset = RecordSet::from_records(records);
                log::info!(
                    "Normalized {} records across {} reports",
                    dataset.len(),
                    dataset.report_ids.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to normalize document: {e}");
                self.clear_dataset(format!("Error: {e}"));
            }
        }
    }

    /// Install a freshly normalized dataset and reset the selection.
    fn set_dataset(&mut self, dataset: RecordSet) {
        let mut sample_names: Vec<&str> = Vec::new();
        for rec in &dataset.records {
            if !sample_names.contains(&rec.sample.as_str()) {
                sample_names.push(&rec.sample);
            }
        }
        self.sample_colors = SampleColors::new(sample_names.iter().copied());

        self.dataset = Some(dataset);
        self.selection = Selection::with_all_bins();
        self.sample_options = Vec::new();
        self.filtered = Vec::new();
        self.status_message = None;
    }

    /// Empty the current-dataset slot and show why.
    fn clear_dataset(&mut self, message: String) {
        self.dataset = None;
        self.selection = Selection::with_all_bins();
        self.sample_options = Vec::new();
        self.filtered = Vec::new();
        self.sample_colors = SampleColors::default();
        self.status_message = Some(message);
    }

    /// Toggle one report id; dependent sample options are rebuilt from
    /// scratch and stale sample selections pruned.
    pub fn toggle_report(&mut self, report: &str) {
        if !self.selection.reports.remove(report) {
            self.selection.reports.insert(report.to_string());
        }
        self.rebuild_sample_options();
        self.refilter();
    }

    pub fn toggle_sample(&mut self, sample: &str) {
        if !self.selection.samples.remove(sample) {
            self.selection.samples.insert(sample.to_string());
        }
        self.refilter();
    }

    pub fn toggle_bin(&mut self, bin: Bin) {
        if !self.selection.bins.remove(&bin) {
            self.selection.bins.insert(bin);
        }
        self.refilter();
    }

    fn rebuild_sample_options(&mut self) {
        self.sample_options = match &self.dataset {
            Some(ds) => available_samples(&ds.records, &self.selection.reports),
            None => Vec::new(),
        };
        let options = &self.sample_options;
        self.selection
            .samples
            .retain(|sample| options.contains(sample));
    }

    /// Recompute the cached filtered view after a selection change.
    fn refilter(&mut self) {
        self.filtered = match &self.dataset {
            Some(ds) => filter_records(&ds.records, &self.selection),
            None => Vec::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn good_document() -> JsonValue {
        json!([{
            "Report No.": "R1",
            "Date": "2024-03-18",
            "Notes": "",
            "Samples": [{
                "Name": "S1",
                "Counts": { "10um": 4, "25um": 2, "50um": 0 },
                "Num Replicates": 1,
                "Volume Tested per Replicate (mL)": 2.0,
                "Max Particle Size (um)": 30.0
            }]
        }])
    }

    #[test]
    fn failed_ingest_clears_the_previous_dataset() {
        let mut state = AppState::default();
        state.ingest(good_document());
        assert!(state.dataset.is_some());
        assert!(state.status_message.is_none());

        state.ingest(json!({"not": "a report list"}));
        assert!(state.dataset.is_none());
        assert!(state.filtered.is_empty());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn selection_pipeline_runs_on_each_toggle() {
        let mut state = AppState::default();
        state.ingest(good_document());

        // Nothing selected yet: no implicit select-all.
        assert!(state.filtered.is_empty());
        assert!(state.sample_options.is_empty());

        state.toggle_report("R1");
        assert_eq!(state.sample_options, vec!["S1".to_string()]);
        assert!(state.filtered.is_empty()); // sample not yet selected

        state.toggle_sample("S1");
        assert_eq!(state.filtered.len(), 3); // all bins checked by default

        state.toggle_bin(Bin::Um50);
        assert_eq!(state.filtered.len(), 2);

        // Deselecting the report prunes the stale sample selection.
        state.toggle_report("R1");
        assert!(state.sample_options.is_empty());
        assert!(state.selection.samples.is_empty());
        assert!(state.filtered.is_empty());
    }
}
