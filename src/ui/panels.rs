use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::loader::{COL_BOOSTER, COL_PAYLOAD, COL_SITE};
use crate::state::AppState;

// Payload sliders snap to 1000 kg increments.
const PAYLOAD_STEP_KG: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: site selector and payload range sliders.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state inside the widget closures.
    let (site_options, (min_payload, max_payload)) = match &state.dataset {
        Some(ds) => (ds.site_options(), ds.payload_bounds()),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Site selector ----
            ui.strong("Site Selection");
            let current = state.filters.selected_site.label().to_string();
            egui::ComboBox::from_id_salt("site_select")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for option in &site_options {
                        let is_selected = state.filters.selected_site == option.value;
                        if ui.selectable_label(is_selected, &option.label).clicked() {
                            state.set_site(option.value.clone());
                        }
                    }
                });
            ui.separator();

            // ---- Payload range ----
            ui.strong("Payload range (kg)");
            let mut low = state.filters.payload_range.low;
            let mut high = state.filters.payload_range.high;
            let low_changed = ui
                .add(
                    egui::Slider::new(&mut low, min_payload..=max_payload)
                        .step_by(PAYLOAD_STEP_KG)
                        .text("min"),
                )
                .changed();
            let high_changed = ui
                .add(
                    egui::Slider::new(&mut high, min_payload..=max_payload)
                        .step_by(PAYLOAD_STEP_KG)
                        .text("max"),
                )
                .changed();
            if low_changed || high_changed {
                state.set_payload_range(low, high);
            }
            ui.separator();

            // ---- Booster colour legend ----
            ui.strong("Booster categories");
            for (category, color) in state.category_colors.entries() {
                ui.label(RichText::new(category).color(super::color32(*color)));
            }
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} launches loaded, {} in view",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Records table (bottom panel)
// ---------------------------------------------------------------------------

/// Render the records currently in view as a striped table. Extra columns
/// from the source file follow the four core columns.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let extra_columns = dataset.extra_columns();
    let n_columns = 4 + extra_columns.len();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), n_columns)
        .header(20.0, |mut header| {
            for title in [COL_SITE, COL_PAYLOAD, "Outcome", COL_BOOSTER] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
            for title in extra_columns {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.visible_indices.len(), |mut row| {
                let record = &dataset.records()[state.visible_indices[row.index()]];
                row.col(|ui| {
                    ui.label(&record.site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", record.payload_kg));
                });
                row.col(|ui| {
                    ui.label(record.outcome.label());
                });
                row.col(|ui| {
                    ui.label(&record.booster_category);
                });
                for column in extra_columns {
                    row.col(|ui| {
                        match record.extra.get(column) {
                            Some(value) => ui.label(value.to_string()),
                            None => ui.label(""),
                        };
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches across {} sites",
                    dataset.len(),
                    dataset.sites().len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
