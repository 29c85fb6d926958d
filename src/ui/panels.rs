use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate;
use crate::data::model::Bin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – document picker and selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Particulate reports");
    ui.separator();

    // ---- Document picker ----
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Document");
        if ui.small_button("⟳").on_hover_text("Refresh list").clicked() {
            state.refresh_documents();
        }
    });
    let current = state.selected_document.clone().unwrap_or_default();
    let documents = state.documents.clone();
    egui::ComboBox::from_id_salt("document_picker")
        .selected_text(&current)
        .width(ui.available_width() * 0.9)
        .show_ui(ui, |ui: &mut Ui| {
            for name in &documents {
                if ui.selectable_label(current == *name, name).clicked() {
                    state.open_remote(name);
                }
            }
        });
    ui.separator();

    let report_ids = match &state.dataset {
        Some(ds) => ds.report_ids.clone(),
        None => {
            ui.label("No document loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Reports ----
            ui.strong("Reports to plot");
            for report in &report_ids {
                let mut checked = state.selection.reports.contains(report);
                if ui.checkbox(&mut checked, report).changed() {
                    state.toggle_report(report);
                }
            }
            ui.separator();

            // ---- Samples (options follow the report selection) ----
            ui.strong("Samples to plot");
            let options = state.sample_options.clone();
            if options.is_empty() {
                ui.label("Select a report first.");
            }
            for sample in &options {
                let mut checked = state.selection.samples.contains(sample);
                let text = RichText::new(sample).color(state.sample_colors.color_for(sample));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_sample(sample);
                }
            }
            ui.separator();

            // ---- Size bins ----
            ui.strong("Size bins");
            ui.horizontal(|ui: &mut Ui| {
                for bin in Bin::ALL {
                    let mut checked = state.selection.bins.contains(&bin);
                    if ui.checkbox(&mut checked, bin.label()).changed() {
                        state.toggle_bin(bin);
                    }
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Refresh remote list").clicked() {
                state.refresh_documents();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records across {} reports, {} selected",
                ds.len(),
                ds.report_ids.len(),
                state.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – display table
// ---------------------------------------------------------------------------

/// Render the filtered records as a table.
pub fn table_panel(ui: &mut Ui, state: &AppState) {
    let rows = aggregate::table_rows(&state.filtered);
    if rows.is_empty() {
        ui.label("No records selected.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in [
                "Report",
                "Sample",
                "Bin",
                "Count (#/25mL)",
                "Max Particle Size (um)",
                "Notes",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in &rows {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(&row.report);
                    });
                    table_row.col(|ui| {
                        ui.label(&row.sample);
                    });
                    table_row.col(|ui| {
                        ui.label(row.bin.label());
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.2}", row.count));
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{}", row.max_particle_size_um));
                    });
                    table_row.col(|ui| {
                        ui.label(&row.notes);
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open particulate report")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open_local(&path);
    }
}
