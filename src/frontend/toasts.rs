//! Toast overlay anchored to the bottom-right corner.

use egui::{Align2, Color32, Context, RichText};

use crate::notify::{Notifications, ToastKind};

fn kind_color(kind: ToastKind) -> Color32 {
    match kind {
        ToastKind::Success => Color32::from_rgb(100, 200, 100),
        ToastKind::Error => Color32::from_rgb(230, 90, 90),
        ToastKind::Info => Color32::from_rgb(120, 170, 230),
    }
}

/// Draw all live toasts, newest at the bottom
pub fn render_toasts(ctx: &Context, notifications: &Notifications) {
    if notifications.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(Align2::RIGHT_BOTTOM, [-12.0, -36.0])
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            for toast in notifications.iter() {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.colored_label(kind_color(toast.kind), toast.kind.icon());
                        ui.label(RichText::new(toast.message.as_str()));
                    });
                });
                ui.add_space(4.0);
            }
        });
}
