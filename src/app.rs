use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchboardApp {
    pub state: AppState,
}

impl Default for LaunchboardApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl LaunchboardApp {
    /// Start with a dataset already loaded, e.g. from a path on the
    /// command line.
    pub fn with_dataset(dataset: crate::data::model::LaunchDataset) -> Self {
        let mut app = Self::default();
        app.state.set_dataset(dataset);
        app
    }
}

impl eframe::App for LaunchboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: records in view ----
        if self.state.dataset.is_some() {
            egui::TopBottomPanel::bottom("records_panel")
                .resizable(true)
                .default_height(160.0)
                .show(ctx, |ui| {
                    panels::records_table(ui, &self.state);
                });
        }

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_area(ui, &self.state);
        });
    }
}
