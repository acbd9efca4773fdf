use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points, Polygon};

use crate::chart::{ChartSpec, PieSpec, ScatterSpec};
use crate::color::generate_palette;
use crate::state::AppState;

use super::color32;

// ---------------------------------------------------------------------------
// Chart area (central panel)
// ---------------------------------------------------------------------------

/// Render the current chart views stacked in the central panel: outcome
/// distribution on top, payload correlation below.
pub fn chart_area(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch dataset to view charts  (File → Open…)");
        });
        return;
    }

    // Split the remaining vertical space between the two charts, leaving
    // room for their headings.
    let chart_height = (ui.available_height() / 2.0 - 40.0).max(120.0);

    if let Some(spec) = &state.distribution {
        draw_chart(ui, spec, "distribution_plot", chart_height);
    }

    ui.separator();

    if let Some(spec) = &state.correlation {
        draw_chart(ui, spec, "correlation_plot", chart_height);
    }
}

fn draw_chart(ui: &mut Ui, spec: &ChartSpec, id: &str, height: f32) {
    ui.strong(spec.title());
    match spec {
        ChartSpec::Pie(pie) => draw_pie(ui, pie, id, height),
        ChartSpec::Scatter(scatter) => draw_scatter(ui, scatter, id, height),
    }
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Draw a pie as filled circle sectors on an axis-less plot. Slices start at
/// twelve o'clock and advance clockwise; zero-valued slices draw nothing.
fn draw_pie(ui: &mut Ui, spec: &PieSpec, id: &str, height: f32) {
    let total: f64 = spec.slices.iter().map(|slice| slice.value).sum();
    let palette = generate_palette(spec.slices.len());

    Plot::new(id)
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            if total <= 0.0 {
                return;
            }

            let mut start = 0.0;
            for (i, slice) in spec.slices.iter().enumerate() {
                if slice.value <= 0.0 {
                    continue;
                }
                let fraction = slice.value / total;
                let color = slice.color.unwrap_or(palette[i]);

                let sector = Polygon::new(pie_sector(start, start + fraction))
                    .name(format!("{} ({})", slice.label, slice.value))
                    .fill_color(color32(color))
                    .stroke(Stroke::new(1.0, Color32::WHITE));
                plot_ui.polygon(sector);

                start += fraction;
            }
        });
}

/// Sector of the unit circle covering the turn fractions `[from, to]`,
/// measured clockwise from twelve o'clock.
fn pie_sector(from: f64, to: f64) -> PlotPoints<'static> {
    let span = to - from;
    let steps = ((span * 96.0).ceil() as usize).max(2);

    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let t = from + span * (i as f64 / steps as f64);
        let angle = std::f64::consts::FRAC_PI_2 - t * std::f64::consts::TAU;
        points.push([angle.cos(), angle.sin()]);
    }
    PlotPoints::from(points)
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Draw the payload scatter. Each record is its own marker so the radius can
/// scale with payload mass; markers sharing a booster category share one
/// legend entry.
fn draw_scatter(ui: &mut Ui, spec: &ScatterSpec, id: &str, height: f32) {
    let max_size = spec
        .points
        .iter()
        .map(|point| point.size)
        .fold(0.0_f64, f64::max);

    Plot::new(id)
        .height(height)
        .x_axis_label(spec.x_label.as_str())
        .y_axis_label(spec.y_label.as_str())
        .include_y(-0.25)
        .include_y(1.25)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for point in &spec.points {
                let marker = Points::new(vec![[point.x, point.y]])
                    .name(&point.category)
                    .color(color32(point.color))
                    .filled(true)
                    .radius(marker_radius(point.size, max_size));
                plot_ui.points(marker);
            }
        });
}

/// Marker radius in points, scaled by the square root of the relative size so
/// marker area tracks payload mass.
fn marker_radius(size: f64, max_size: f64) -> f32 {
    if max_size <= 0.0 {
        return 3.0;
    }
    let relative = (size / max_size).clamp(0.0, 1.0);
    2.0 + 8.0 * relative.sqrt() as f32
}
