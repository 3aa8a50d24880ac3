//! Plot rendering with egui_plot
//!
//! Draws one line per sensor series. X is seconds since the first retained
//! sample. While following, the view tracks the newest sample over the
//! configured time window and the Y range is fitted to the visible data.

use egui::{Color32, Ui};
use egui_plot::{Corner, Legend, Line, Plot, PlotBounds, PlotPoints};
use rust_i18n::t;

use crate::chart::ChartState;
use crate::config::RuntimeSettings;

/// Plot view state
#[derive(Debug, Default)]
pub struct PlotView {
    /// Set while the user drags the plot
    is_dragging: bool,
}

impl PlotView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the chart. User interaction stops following the latest data.
    pub fn render(&mut self, ui: &mut Ui, chart: &ChartState, settings: &mut RuntimeSettings) {
        let following = settings.is_following();
        let origin = chart.origin().unwrap_or_default();
        let latest = chart.latest_time().map(|t| t - origin).unwrap_or_default();

        let mut plot = Plot::new("live_chart")
            .allow_zoom(!following)
            .allow_drag(!following)
            .allow_scroll(!following)
            .show_axes(true)
            .x_axis_label("t (s)");

        if settings.show_legend {
            plot = plot.legend(
                Legend::default()
                    .position(Corner::RightTop)
                    .background_alpha(0.8),
            );
        }
        if settings.include_zero {
            plot = plot.include_y(0.0);
        }

        let window = settings.display_time_window;
        let include_zero = settings.include_zero;
        let line_width = settings.line_width;

        let response = plot.show(ui, |plot_ui| {
            if following {
                let x_max = latest.max(window);
                let x_min = x_max - window;
                let (y_min, y_max) =
                    visible_y_bounds(chart, origin, x_min, x_max, include_zero);
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
            }

            for series in chart.all_series() {
                if series.is_empty() {
                    continue;
                }
                let [r, g, b, a] = series.kind().color();
                let line = Line::new(
                    t!(series.kind().label_key()).to_string(),
                    PlotPoints::from(series.as_plot_points(origin)),
                )
                .color(Color32::from_rgba_unmultiplied(r, g, b, a))
                .width(line_width);
                plot_ui.line(line);
            }
        });

        if response.response.dragged() {
            self.is_dragging = true;
            settings.follow_latest = false;
        }
        if response.response.drag_stopped() && self.is_dragging {
            self.is_dragging = false;
            let bounds = response.transform.bounds();
            settings.update_time_window(bounds.max()[0] - bounds.min()[0]);
        }
    }
}

/// Y range covering every sample with `x_min <= x <= x_max`, padded by 5%
fn visible_y_bounds(
    chart: &ChartState,
    origin: f64,
    x_min: f64,
    x_max: f64,
    include_zero: bool,
) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for series in chart.all_series() {
        for sample in series.samples() {
            let x = sample.time - origin;
            if x >= x_min && x <= x_max {
                lo = lo.min(sample.value);
                hi = hi.max(sample.value);
            }
        }
    }

    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    let pad = ((hi - lo) * 0.05).max(0.5);
    (lo - pad, hi + pad)
}
