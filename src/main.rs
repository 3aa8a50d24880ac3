//! Storm Monitor - Main Entry Point
//!
//! Live dashboard for a serial-attached thrust test stand. Without hardware
//! attached the dashboard is fed by the simulated device.

use anyhow::Context as _;
use storm_monitor::{
    config::{self, AppConfig, LOG_DIR},
    device::spawn_simulator,
    ChannelTransport, StormApp,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. The returned guard flushes the log file
/// and must outlive the application.
fn init_logging(config: &AppConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = if config.logging.file {
        match config::ensure_app_data_dir() {
            Ok(dir) => {
                let appender = tracing_appender::rolling::daily(dir.join(LOG_DIR), "storm-monitor.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("File logging disabled: {}", e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

fn main() -> anyhow::Result<()> {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    let _log_guard = init_logging(&config);
    tracing::info!("Starting Storm Monitor");
    if let Err(e) = &loaded {
        tracing::warn!("Failed to load config, using defaults: {}", e);
    }

    let (transport, link) = ChannelTransport::pair();
    let simulator = spawn_simulator(link, config.device.clone())
        .context("failed to start the simulated device")?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 680.0])
            .with_min_inner_size([640.0, 420.0])
            .with_title("Storm Monitor"),
        ..Default::default()
    };

    eframe::run_native(
        "Storm Monitor",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(StormApp::new(
                cc,
                config,
                Box::new(transport),
                Some(simulator),
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    tracing::info!("Shutting down...");
    Ok(())
}
