//! Named-frame transport between the UI and the device side.
//!
//! Every message is a [`Frame`]: an event name plus a JSON payload. The
//! names and payload shapes match the device protocol:
//!
//! | Event | Direction | Payload |
//! |---|---|---|
//! | `connect` | in | none |
//! | `disconnect` | in | none |
//! | `new_port` | in | `[{index, value}]` or `["name"]` |
//! | `update_serial_data` | in | `{voltage?, current?, weight?, pwm?, state?}` |
//! | `select_port` | out | `{name}` |
//!
//! The UI only depends on the [`Transport`] trait; [`ChannelTransport`] is
//! the in-process implementation backed by crossbeam channels.

mod channel;

pub use channel::{ChannelTransport, DeviceLink};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EVENT_CONNECT: &str = "connect";
pub const EVENT_DISCONNECT: &str = "disconnect";
pub const EVENT_NEW_PORT: &str = "new_port";
pub const EVENT_SERIAL_DATA: &str = "update_serial_data";
/// Older device firmware bridges emit sensor data under this name
pub const EVENT_SERIAL_DATA_ALIAS: &str = "serial_data";
pub const EVENT_SELECT_PORT: &str = "select_port";

/// A single named message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl Frame {
    /// Create a frame with a payload
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    /// Create a frame without a payload
    pub fn bare(event: impl Into<String>) -> Self {
        Self::new(event, Value::Null)
    }

    /// Outbound port selection request
    pub fn select_port(name: &str) -> Self {
        Self::new(EVENT_SELECT_PORT, serde_json::json!({ "name": name }))
    }
}

/// Bidirectional real-time channel as seen from the UI
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Take the next pending inbound frame without blocking
    fn poll(&mut self) -> Option<Frame>;

    /// Whether the remote side is currently reachable
    fn is_connected(&self) -> bool;

    /// Send a frame to the remote side
    fn emit(&self, frame: Frame) -> Result<()>;
}
