//! Frontend module for egui UI
//!
//! The window has a header with the port button and display controls, the
//! live chart in the centre, a status bar at the bottom and a toast overlay.
//! Frames are pulled from the transport at the start of every UI frame and
//! routed into the [`AppContext`].
//!
//! # Main Types
//!
//! - [`StormApp`] - Main application state implementing [`eframe::App`]
//! - [`PlotView`] - Chart rendering with egui_plot
//!
//! # Submodules
//!
//! - `dialogs` - Modal dialogs (port selection)
//! - `plot` - Plot rendering
//! - `status_bar` - Bottom status bar
//! - `toasts` - Toast overlay

pub mod dialogs;
mod plot;
mod status_bar;
mod toasts;

pub use plot::PlotView;
pub use status_bar::{connection_indicator, render_status_bar};
pub use toasts::render_toasts;

use dialogs::{show_dialog, PortSelectAction, PortSelectDialog, PortSelectState};
use rust_i18n::t;
use std::time::{Duration, Instant};

use crate::config::{AppConfig, RuntimeSettings};
use crate::context::AppContext;
use crate::device::SimulatorHandle;
use crate::events::EventRouter;
use crate::i18n::{current_language, set_language, Language};
use crate::notify::ToastKind;
use crate::ports::SelectionOutcome;
use crate::transport::Transport;

/// Repaint interval while the device is streaming
const LIVE_REPAINT: Duration = Duration::from_millis(30);

/// Main application state
pub struct StormApp {
    transport: Box<dyn Transport>,
    router: EventRouter,
    ctx: AppContext,
    settings: RuntimeSettings,
    config: AppConfig,
    plot: PlotView,
    port_dialog_open: bool,
    port_dialog_state: PortSelectState,
    /// Kept alive for the lifetime of the window
    simulator: Option<SimulatorHandle>,
}

impl StormApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        transport: Box<dyn Transport>,
        simulator: Option<SimulatorHandle>,
    ) -> Self {
        set_language(config.language);

        let ctx = AppContext::new(&config, Box::new(cc.egui_ctx.clone()));
        let settings = RuntimeSettings::from_chart_config(&config.chart);

        Self {
            transport,
            router: EventRouter::with_default_handlers(),
            ctx,
            settings,
            config,
            plot: PlotView::new(),
            port_dialog_open: false,
            port_dialog_state: PortSelectState,
            simulator,
        }
    }

    /// Route every pending frame. Returns true if anything arrived.
    fn process_frames(&mut self) -> bool {
        self.router.pump(&mut self.ctx, self.transport.as_mut()) > 0
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.settings.toggle_pause();
        }
    }

    fn change_language(&mut self, lang: Language) {
        if lang == current_language() {
            return;
        }
        tracing::info!("Switching language to {}", lang.code());
        set_language(lang);
        self.ctx.selector.set_placeholder(t!("port_dialog.placeholder"));

        self.config.language = lang;
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    fn request_selected_port(&mut self) {
        match self.ctx.selector.confirm_selection(self.transport.as_ref()) {
            Ok(SelectionOutcome::Sent(name)) => {
                self.ctx
                    .notifications
                    .push(ToastKind::Info, t!("toast.port_requested", name = name));
            }
            Ok(SelectionOutcome::NoSelection) | Ok(SelectionOutcome::Offline) => {}
            Err(e) => {
                tracing::error!("Failed to request port: {}", e);
                self.ctx.notifications.push(
                    ToastKind::Error,
                    t!("toast.port_request_failed", error = e.to_string()),
                );
            }
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        let mut language_choice = None;
        let mut clear_chart = false;

        ui.horizontal(|ui| {
            ui.heading(t!("header.title"));
            ui.separator();

            let (color, text) = connection_indicator(self.ctx.connection);
            ui.colored_label(color, "●").on_hover_text(text);

            if ui
                .add_enabled(
                    self.ctx.selector.is_action_enabled(),
                    egui::Button::new(t!("header.select_port")),
                )
                .clicked()
            {
                self.port_dialog_open = true;
            }

            ui.separator();

            if self.settings.is_following() {
                if ui.button(t!("header.pause")).clicked() {
                    self.settings.toggle_pause();
                }
            } else if ui.button(t!("header.resume")).clicked() {
                self.settings.paused = false;
                self.settings.follow_latest = true;
            }
            if ui.button(t!("header.clear")).clicked() {
                clear_chart = true;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let current = current_language();
                egui::ComboBox::from_id_salt("language")
                    .selected_text(current.display_name())
                    .show_ui(ui, |ui| {
                        for &lang in Language::all() {
                            if ui
                                .selectable_label(lang == current, lang.display_name())
                                .clicked()
                            {
                                language_choice = Some(lang);
                            }
                        }
                    });
                ui.label(t!("header.language"));
            });
        });

        if let Some(lang) = language_choice {
            self.change_language(lang);
        }
        if clear_chart {
            self.ctx.chart.clear();
        }
    }
}

impl eframe::App for StormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_frames = self.process_frames();
        self.handle_keyboard_shortcuts(ctx);

        let now = Instant::now();
        self.ctx.notifications.prune(now);
        if let Some(wait) = self.ctx.notifications.next_expiry(now) {
            ctx.request_repaint_after(wait);
        }
        if self.ctx.is_connected() || had_frames {
            ctx.request_repaint_after(LIVE_REPAINT);
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.render_header(ui);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                render_status_bar(ui, &self.ctx);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.plot
                .render(ui, self.ctx.chart.state(), &mut self.settings);
        });

        let action = show_dialog::<PortSelectDialog>(
            ctx,
            &mut self.port_dialog_open,
            &mut self.port_dialog_state,
            &mut self.ctx.selector,
        );
        if let Some(PortSelectAction::Confirm) = action {
            self.request_selected_port();
        }

        render_toasts(ctx, &self.ctx.notifications);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(simulator) = self.simulator.take() {
            // Free the queue so the goodbye frame is not left waiting
            let mut discarded = 0usize;
            while self.transport.poll().is_some() {
                discarded += 1;
            }
            tracing::debug!(
                "Discarded {} pending frames, {} dropped by the device",
                discarded,
                simulator.dropped_frames()
            );
            simulator.shutdown();
        }
        tracing::info!("Storm Monitor closed");
    }
}
