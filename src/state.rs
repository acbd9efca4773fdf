use crate::chart::{self, ChartSpec};
use crate::color::CategoryColors;
use crate::data::filter::{filtered_indices, FilterState, PayloadRange};
use crate::data::model::{LaunchDataset, SiteSelection};
use crate::data::query;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded once and read-only afterwards; every control
/// change runs exactly one recomputation cycle (`refresh_views`) that
/// re-derives both chart specs and the visible-record index list.
pub struct AppState {
    /// Loaded dataset (None until a file is opened).
    pub dataset: Option<LaunchDataset>,

    /// Current control values; only this struct's setters mutate them.
    pub filters: FilterState,

    /// Indices of records passing the current filters (backs the table).
    pub visible_indices: Vec<usize>,

    /// Stable booster-category colors for the current dataset.
    pub category_colors: CategoryColors,

    /// Outcome-distribution chart for the current filter state.
    pub distribution: Option<ChartSpec>,

    /// Payload-correlation chart for the current filter state.
    pub correlation: Option<ChartSpec>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            category_colors: CategoryColors::default(),
            distribution: None,
            correlation: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: reset the controls to full bounds,
    /// rebuild the category colors, and derive the initial views.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.filters = FilterState::full(&dataset);
        self.category_colors = CategoryColors::new(dataset.booster_categories());
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.refresh_views();
    }

    /// One synchronous recomputation cycle: filters → queries → chart specs.
    pub fn refresh_views(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.distribution = None;
            self.correlation = None;
            self.visible_indices.clear();
            return;
        };

        let aggregate = query::outcome_distribution(dataset, &self.filters.selected_site);
        self.distribution = Some(chart::distribution_chart(&aggregate));

        match query::payload_correlation(
            dataset,
            &self.filters.selected_site,
            self.filters.payload_range,
        ) {
            Ok(correlation) => {
                self.correlation =
                    Some(chart::correlation_chart(&correlation, &self.category_colors));
                self.visible_indices = filtered_indices(dataset, &self.filters);
            }
            Err(err) => {
                // Unreachable through the panel setters, which clamp first.
                log::warn!("Payload query rejected: {err}");
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Site selector change handler.
    pub fn set_site(&mut self, selection: SiteSelection) {
        self.filters.selected_site = selection;
        self.refresh_views();
    }

    /// Payload slider change handler. Values are normalized (ordered and
    /// clamped to the dataset bounds) before they reach the filter state.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        if let Some(dataset) = &self.dataset {
            self.filters.payload_range = PayloadRange::clamped(low, high, dataset.payload_bounds());
        }
        self.refresh_views();
    }
}
