//! Application state shared by every event handler.
//!
//! One [`AppContext`] is built at startup and owned by the UI. Handlers get
//! `&mut AppContext`; each piece of state has a single owning controller.

use crate::chart::{LiveChart, NoRedraw, RedrawHook};
use crate::config::AppConfig;
use crate::notify::Notifications;
use crate::ports::PortSelector;
use crate::types::{ConnectionStatus, Port};
use rust_i18n::t;

pub struct AppContext {
    /// Last non-empty port list received
    pub ports: Vec<Port>,
    pub selector: PortSelector,
    pub chart: LiveChart,
    pub notifications: Notifications,
    pub connection: ConnectionStatus,
    /// Last device state code reported with sensor data
    pub device_state: Option<i64>,
    /// Number of sensor updates applied to the chart
    pub updates_received: u64,
}

impl AppContext {
    pub fn new(config: &AppConfig, redraw: Box<dyn RedrawHook>) -> Self {
        let mut selector = PortSelector::new(t!("port_dialog.placeholder"));
        selector.bind();

        Self {
            ports: Vec::new(),
            selector,
            chart: LiveChart::new(config.chart.history_limit, redraw),
            notifications: Notifications::new(config.notifications.lifetime()),
            connection: ConnectionStatus::Disconnected,
            device_state: None,
            updates_received: 0,
        }
    }

    /// Context without a renderer attached
    pub fn headless(config: &AppConfig) -> Self {
        Self::new(config, Box::new(NoRedraw))
    }

    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionStatus::Connected
    }
}
