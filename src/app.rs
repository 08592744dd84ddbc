use std::path::PathBuf;

use eframe::egui;

use crate::state::{AppState, Page};
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TopicExplorerApp {
    pub state: AppState,
}

impl TopicExplorerApp {
    pub fn new(dataset_path: PathBuf) -> Self {
        Self {
            state: AppState::new(dataset_path),
        }
    }
}

impl eframe::App for TopicExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation and search ----
        egui::SidePanel::left("side_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the active page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => charts::home_page(ui, &self.state),
            Page::DetailedView => charts::detail_page(ui, &mut self.state),
            Page::About => charts::about_page(ui),
        });
    }
}
