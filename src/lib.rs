//! # Storm Monitor
//!
//! A live dashboard for a serial-attached thrust test stand. Sensor updates
//! (voltage, current, thrust, throttle) arrive as named frames over a
//! real-time channel and are plotted as they come in; the available serial
//! ports are offered in a selection dialog.
//!
//! ## Architecture
//!
//! - **Transport**: named JSON frames over crossbeam channels ([`transport`])
//! - **Event adapter**: routes frames by event name to handlers ([`events`])
//! - **Controllers**: port selector ([`ports`]) and live chart ([`chart`]),
//!   both owned by a single [`AppContext`]
//! - **Frontend**: eframe/egui with egui_plot ([`frontend`])
//! - **Device**: a simulated test stand feeding the transport ([`device`])
//!
//! Everything except the device runs on the UI thread; frames are handled
//! one at a time, to completion.
//!
//! ## Example
//!
//! ```ignore
//! use storm_monitor::{AppConfig, AppContext, ChannelTransport, EventRouter};
//!
//! let config = AppConfig::default();
//! let (mut transport, link) = ChannelTransport::pair();
//! let _device = storm_monitor::device::spawn_simulator(link, config.device.clone())?;
//!
//! let router = EventRouter::with_default_handlers();
//! let mut ctx = AppContext::headless(&config);
//! router.pump(&mut ctx, &mut transport);
//! ```

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod chart;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod events;
pub mod frontend;
pub mod i18n;
pub mod notify;
pub mod ports;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use app::StormApp;
pub use chart::{ChartState, LiveChart};
pub use config::AppConfig;
pub use context::AppContext;
pub use error::{Result, StormError};
pub use events::EventRouter;
pub use ports::{PortSelector, SelectionOutcome};
pub use transport::{ChannelTransport, DeviceLink, Frame, Transport};
pub use types::{Port, SensorKind, SensorReading};
