//! Library exports for reuse in integration tests and the viewer binary.

/// eframe application shell.
pub mod app;
/// Declarative chart descriptions built from query results.
pub mod chart;
/// Category palette and renderer-agnostic colour types.
pub mod color;
/// Dataset model, file loaders, filters and queries.
pub mod data;
/// Reactive state binding filters to chart views.
pub mod state;
/// egui panels and chart rendering.
pub mod ui;
