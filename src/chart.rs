//! Chart synthesis: query results → declarative, renderer-agnostic specs.
//!
//! A [`ChartSpec`] says *what* to draw (kind, title, data bindings, colors)
//! and nothing about how; `ui::plot` draws them with egui, and every spec
//! serializes to tagged JSON for any other renderer.

use crate::color::{CategoryColors, Rgb, FAILED_RED, SUCCESS_BLUE};
use crate::data::loader::{COL_CLASS, COL_PAYLOAD};
use crate::data::query::{OutcomeAggregate, PayloadCorrelation};

// ---------------------------------------------------------------------------
// Spec types
// ---------------------------------------------------------------------------

/// One pie slice. `color: None` leaves the choice to the renderer's palette.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PieSpec {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

/// One scatter point with fixed binding roles: x/size are the payload mass,
/// y is the 0/1 outcome, the category names the booster version.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub category: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

/// A chart to display, as a fixed tagged schema.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind")]
pub enum ChartSpec {
    Pie(PieSpec),
    Scatter(ScatterSpec),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(spec) => &spec.title,
            ChartSpec::Scatter(spec) => &spec.title,
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Pie chart for the outcome-distribution view.
///
/// All-sites mode keeps the renderer's palette (`color: None` per slice);
/// single-site mode pins red for failures and royal blue for successes.
pub fn distribution_chart(aggregate: &OutcomeAggregate) -> ChartSpec {
    match aggregate {
        OutcomeAggregate::BySite(counts) => ChartSpec::Pie(PieSpec {
            title: "Total Launched By Site".to_string(),
            slices: counts
                .iter()
                .map(|entry| PieSlice {
                    label: entry.site.clone(),
                    value: entry.successes as f64,
                    color: None,
                })
                .collect(),
        }),
        OutcomeAggregate::SingleSite {
            site,
            successes,
            failures,
        } => ChartSpec::Pie(PieSpec {
            title: format!("Success vs Failed Launches By {site}"),
            slices: vec![
                PieSlice {
                    label: "Success".to_string(),
                    value: *successes as f64,
                    color: Some(SUCCESS_BLUE),
                },
                PieSlice {
                    label: "Failed".to_string(),
                    value: *failures as f64,
                    color: Some(FAILED_RED),
                },
            ],
        }),
    }
}

/// Scatter chart for the payload-correlation view.
///
/// An empty subset still yields a chart (zero points under the usual
/// title), so the view never disappears while the user drags the slider.
pub fn correlation_chart(correlation: &PayloadCorrelation<'_>, colors: &CategoryColors) -> ChartSpec {
    ChartSpec::Scatter(ScatterSpec {
        title: format!(
            "Correlation Between Payload and Success for {}",
            correlation.label
        ),
        x_label: COL_PAYLOAD.to_string(),
        y_label: COL_CLASS.to_string(),
        points: correlation
            .records
            .iter()
            .map(|rec| ScatterPoint {
                x: rec.payload_kg,
                y: rec.outcome.as_class(),
                size: rec.payload_kg,
                category: rec.booster_category.clone(),
                color: colors.color_for(&rec.booster_category),
            })
            .collect(),
    })
}
