use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::data::aggregate::{count_series, max_size_ranking};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Charts (central panel)
// ---------------------------------------------------------------------------

/// Render the two charts: normalized counts per bin, and the max-particle-size
/// ranking.
pub fn charts(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Pick a report document to view counts");
        });
        return;
    }
    if state.filtered.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select reports, samples and bins to plot");
        });
        return;
    }

    ui.columns(2, |cols| {
        counts_chart(&mut cols[0], state);
        ranking_chart(&mut cols[1], state);
    });
}

/// Grouped bar chart: x = size bin, one bar per selected sample.
fn counts_chart(ui: &mut Ui, state: &AppState) {
    let series = count_series(&state.filtered);
    let n_samples = series.len().max(1);
    let group_width = 0.8;
    let bar_width = group_width / n_samples as f64;

    ui.strong("Particle counts");
    Plot::new("counts_plot")
        .legend(Legend::default())
        .x_axis_label("Bin")
        .y_axis_label("Count (#/25mL)")
        .x_axis_formatter(|mark, _range| bin_tick_label(mark.value))
        .show(ui, |plot_ui| {
            for (s_idx, s) in series.iter().enumerate() {
                let color = state.sample_colors.color_for(&s.sample);
                let bars: Vec<Bar> = s
                    .counts
                    .iter()
                    .map(|&(bin, count)| {
                        let group = bin as usize as f64;
                        let offset =
                            (s_idx as f64 - (n_samples as f64 - 1.0) / 2.0) * bar_width;
                        Bar::new(group + offset, count).width(bar_width * 0.95)
                    })
                    .collect();

                plot_ui.bar_chart(BarChart::new(bars).color(color).name(&s.sample));
            }
        });
}

/// Horizontal bars: samples ranked by maximum observed particle size.
fn ranking_chart(ui: &mut Ui, state: &AppState) {
    let ranking = max_size_ranking(&state.filtered);

    ui.strong("Max particle size");
    Plot::new("max_size_plot")
        .legend(Legend::default())
        .x_axis_label("Max Particle Size (um)")
        .show_axes([true, false])
        .show(ui, |plot_ui| {
            // Largest at the top.
            for (row, (sample, size)) in ranking.iter().enumerate() {
                let y = (ranking.len() - 1 - row) as f64;
                let bar = Bar::new(y, *size).width(0.6);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .horizontal()
                        .color(state.sample_colors.color_for(sample))
                        .name(sample),
                );
            }
        });
}

fn bin_tick_label(value: f64) -> String {
    let labels = ["10um", "25um", "50um"];
    let rounded = value.round();
    if (value - rounded).abs() < 1e-6 && (0.0..3.0).contains(&rounded) {
        labels[rounded as usize].to_string()
    } else {
        String::new()
    }
}
