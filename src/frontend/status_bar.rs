//! Status bar panel: connection, device state and the latest readings.

use egui::{Color32, RichText, Ui};
use rust_i18n::t;

use crate::context::AppContext;
use crate::types::{ConnectionStatus, SensorKind};

/// Dot colour and label for a connection status
pub fn connection_indicator(status: ConnectionStatus) -> (Color32, String) {
    match status {
        ConnectionStatus::Connected => (Color32::GREEN, t!("status.connected").to_string()),
        ConnectionStatus::Disconnected => (Color32::GRAY, t!("status.disconnected").to_string()),
    }
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &AppContext) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let (status_color, status_text) = connection_indicator(ctx.connection);
        ui.colored_label(status_color, "●");
        ui.label(RichText::new(status_text).small());

        ui.separator();

        let state_text = ctx
            .device_state
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        ui.label(RichText::new(format!("{}: {}", t!("status.device_state"), state_text)).small());

        ui.separator();

        ui.label(RichText::new(format!("{}: {}", t!("status.samples"), ctx.updates_received)).small());

        ui.separator();

        let chart = ctx.chart.state();
        for kind in SensorKind::ALL {
            let Some(value) = chart.series(kind).last_value() else {
                continue;
            };
            let [r, g, b, a] = kind.color();
            ui.colored_label(
                Color32::from_rgba_unmultiplied(r, g, b, a),
                RichText::new(format!("{}: {:.2}", t!(kind.label_key()), value)).small(),
            );
        }

        if let Some(port) = ctx.selector.selected_option() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(port.label.as_str()).small().weak());
            });
        }
    });
}
