use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation and search
// ---------------------------------------------------------------------------

/// Render the left sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("AI Topic Explorer");
    ui.label("Navigate AI research trends");
    ui.separator();

    // ---- Navigation ----
    ui.strong("Select a Page");
    for page in Page::ALL {
        ui.selectable_value(&mut state.page, page, page.label());
    }
    ui.separator();

    // ---- Search bar ----
    ui.strong("Search");
    if ui.text_edit_singleline(&mut state.search).changed() {
        state.refilter();
    }
    if !state.search.trim().is_empty() {
        ui.label(format!(
            "You searched for: {} ({} match{})",
            state.search.trim(),
            state.visible_rows.len(),
            if state.visible_rows.len() == 1 { "" } else { "es" }
        ));
    }
    ui.separator();

    // ---- Dataset summary ----
    if state.table.is_empty() {
        ui.label("No dataset loaded.");
        return;
    }
    ui.strong("Dataset");
    ui.label(format!("{} topics", state.table.len()));
    if let Some((min, max)) = state.table.year_bounds() {
        ui.label(format!("Years {min}–{max}"));
    }
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
            if ui.button("Reload").clicked() {
                log::info!("reloading '{}'", state.cache.path().display());
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} topics loaded, {} visible",
            state.table.len(),
            state.visible_rows.len()
        ));

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open topic data")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("opening '{}'", path.display());
        state.open(path);
    }
}
