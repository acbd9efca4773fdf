//! egui presentation layer: control panels, records table and chart rendering.

pub mod panels;
pub mod plot;

use eframe::egui::Color32;

use crate::color::Rgb;

/// Convert a renderer-agnostic colour into an egui colour at the framework
/// boundary. Everything below `ui/` speaks [`Rgb`].
pub(crate) fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}
