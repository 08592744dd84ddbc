use eframe::egui::{self, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

use crate::data::aggregate::{self, YearRange};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Home – overview charts
// ---------------------------------------------------------------------------

/// Render the overview page: summary stat, papers per topic, yearly trend.
/// Both charts cover the rows matching the sidebar search.
pub fn home_page(ui: &mut Ui, state: &AppState) {
    if state.table.is_empty() {
        empty_placeholder(ui);
        return;
    }

    ui.heading("Overview");
    let total = aggregate::grand_total(&state.table, &state.visible_rows);
    ui.label(format!("Total number of papers analyzed: {total}"));
    ui.add_space(8.0);

    let chart_height = (ui.available_height() - 40.0) / 2.0;

    // ---- Papers per topic (bar chart) ----
    ui.strong("Total Papers per AI Topic");
    let topic_totals = aggregate::totals_by_topic(&state.table, &state.visible_rows);
    let bars: Vec<Bar> = topic_totals
        .iter()
        .enumerate()
        .map(|(i, (topic, total))| {
            Bar::new(i as f64, *total as f64)
                .name(topic)
                .fill(state.color_map.color_for(topic))
                .width(0.6)
        })
        .collect();

    let labels: Vec<String> = topic_totals.iter().map(|(t, _)| t.clone()).collect();
    Plot::new("topic_totals")
        .height(chart_height)
        .y_axis_label("Number of Papers")
        .x_axis_formatter(move |mark, _range| index_label(mark.value, &labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });

    // ---- Yearly trend (line chart) ----
    ui.strong("Trend of AI Research Over the Years");
    let year_totals = aggregate::totals_by_year(&state.table, &state.visible_rows);
    let points: PlotPoints = year_totals
        .iter()
        .map(|&(year, total)| [f64::from(year), total as f64])
        .collect();

    Plot::new("yearly_trend")
        .height(ui.available_height())
        .x_axis_label("Published Year")
        .y_axis_label("Number of Papers")
        .x_axis_formatter(|mark, _range| year_label(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("All topics").width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Detailed view – one topic over a year range
// ---------------------------------------------------------------------------

/// Render the detail page: topic selector, year-range controls, per-year
/// bar chart for the selected topic.
pub fn detail_page(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_empty() {
        empty_placeholder(ui);
        return;
    }

    ui.heading("Explore the AI Topics");

    // ---- Topic selector ----
    let topics: Vec<String> = state.table.topics().iter().map(|t| t.to_string()).collect();
    let current = state.selected_topic.clone().unwrap_or_default();
    egui::ComboBox::from_label("Select Topic")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for topic in &topics {
                if ui.selectable_label(current == *topic, topic).clicked() {
                    state.selected_topic = Some(topic.clone());
                }
            }
        });

    // ---- Year range (inclusive both ends) ----
    if let Some((lo, hi)) = state.table.year_bounds() {
        ui.horizontal(|ui: &mut Ui| {
            let from = ui.add(egui::Slider::new(&mut state.year_min, lo..=hi).text("From"));
            let to = ui.add(egui::Slider::new(&mut state.year_max, lo..=hi).text("To"));
            if from.changed() || to.changed() {
                state.clamp_year_range();
            }
        });
    }
    ui.add_space(8.0);

    let Some(topic) = state.selected_topic.clone() else {
        ui.label("No topic selected.");
        return;
    };

    let range = YearRange::new(state.year_min, state.year_max);
    let series = aggregate::series_for_topic(&state.table, &topic, range);

    ui.strong(format!("Number of Papers for {topic}"));
    if series.is_empty() {
        ui.label("No data in the selected year range.");
        return;
    }

    let color = state.color_map.color_for(&topic);
    let bars: Vec<Bar> = series
        .iter()
        .map(|&(year, count)| {
            Bar::new(f64::from(year), count as f64)
                .name(format!("{year}"))
                .fill(color)
                .width(0.6)
        })
        .collect();

    Plot::new("topic_detail")
        .height(ui.available_height())
        .x_axis_label("Year")
        .y_axis_label("Number of Papers")
        .x_axis_formatter(|mark, _range| year_label(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// About
// ---------------------------------------------------------------------------

pub fn about_page(ui: &mut Ui) {
    ui.heading("About the Project");
    ui.add_space(8.0);
    ui.label(
        "AI Topic Explorer is a proof-of-concept visualization tool for the \
         spread of AI research topics over time. It loads a pre-computed \
         table of paper counts per topic per year and renders it as \
         searchable, filterable charts.",
    );
    ui.add_space(8.0);
    ui.label(
        "Use the sidebar to search topics and switch pages; the detailed \
         view shows a single topic bounded to a year range.",
    );
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn empty_placeholder(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a data file to explore topics  (File → Open…)");
    });
}

/// Label integer grid marks with the topic at that index, nothing else.
fn index_label(value: f64, labels: &[String]) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Label whole years only; fractional grid marks stay blank.
fn year_label(value: f64) -> String {
    let year = value.round();
    if (value - year).abs() > 1e-6 {
        String::new()
    } else {
        format!("{year:.0}")
    }
}
