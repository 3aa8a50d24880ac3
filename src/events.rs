//! Event channel adapter.
//!
//! Routes inbound frames to handlers by event name. The default table is
//! bound once; binding again is a no-op.
//!
//! | Event | Handler |
//! |---|---|
//! | `connect` | [`on_connect`] |
//! | `disconnect` | [`on_disconnect`] |
//! | `new_port` | [`on_new_port_list`] |
//! | `update_serial_data`, `serial_data` | [`on_sensor_update`] |
//!
//! Handlers return `Err` only for malformed payloads; the router logs those
//! and drops the frame without touching state.

use crate::context::AppContext;
use crate::error::Result;
use crate::notify::ToastKind;
use crate::transport::{
    Frame, Transport, EVENT_CONNECT, EVENT_DISCONNECT, EVENT_NEW_PORT, EVENT_SERIAL_DATA,
    EVENT_SERIAL_DATA_ALIAS,
};
use crate::types::{decode_port_list, ConnectionStatus, SensorReading};
use rust_i18n::t;
use std::collections::HashMap;

/// Frame handler
pub type Handler = fn(&mut AppContext, &Frame) -> Result<()>;

/// What happened to a dispatched frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    /// No handler is bound for the event name
    Ignored,
    /// The handler rejected the payload
    Rejected,
}

/// Name → handler table
#[derive(Default)]
pub struct EventRouter {
    handlers: HashMap<&'static str, Handler>,
    bound: bool,
}

impl EventRouter {
    /// Create an empty router
    pub fn new() -> Self {
        Self::default()
    }

    /// Router with the default handlers bound
    pub fn with_default_handlers() -> Self {
        let mut router = Self::new();
        router.bind_default_handlers();
        router
    }

    /// Bind the default handler table.
    ///
    /// Returns `false` if it was already bound.
    pub fn bind_default_handlers(&mut self) -> bool {
        if self.bound {
            return false;
        }
        self.on(EVENT_CONNECT, on_connect);
        self.on(EVENT_DISCONNECT, on_disconnect);
        self.on(EVENT_NEW_PORT, on_new_port_list);
        self.on(EVENT_SERIAL_DATA, on_sensor_update);
        self.on(EVENT_SERIAL_DATA_ALIAS, on_sensor_update);
        self.bound = true;
        tracing::debug!("Bound {} event handlers", self.handlers.len());
        true
    }

    /// Register or replace the handler for `event`
    pub fn on(&mut self, event: &'static str, handler: Handler) {
        self.handlers.insert(event, handler);
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn handles(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    /// Run the handler for one frame to completion
    pub fn dispatch(&self, ctx: &mut AppContext, frame: &Frame) -> Dispatch {
        let Some(handler) = self.handlers.get(frame.event.as_str()) else {
            tracing::trace!("No handler for event '{}'", frame.event);
            return Dispatch::Ignored;
        };

        match handler(ctx, frame) {
            Ok(()) => Dispatch::Handled,
            Err(e) => {
                tracing::warn!("Dropping frame: {}", e);
                Dispatch::Rejected
            }
        }
    }

    /// Dispatch every frame currently queued on `transport`.
    ///
    /// Returns the number of frames taken.
    pub fn pump(&self, ctx: &mut AppContext, transport: &mut dyn Transport) -> usize {
        let mut count = 0;
        while let Some(frame) = transport.poll() {
            self.dispatch(ctx, &frame);
            count += 1;
        }
        count
    }
}

/// Server became reachable
pub fn on_connect(ctx: &mut AppContext, _frame: &Frame) -> Result<()> {
    tracing::info!("Server reachable");
    ctx.connection = ConnectionStatus::Connected;
    ctx.notifications
        .push(ToastKind::Success, t!("toast.server_reachable"));
    Ok(())
}

/// Server connection lost
pub fn on_disconnect(ctx: &mut AppContext, _frame: &Frame) -> Result<()> {
    tracing::info!("Connection lost");
    ctx.connection = ConnectionStatus::Disconnected;
    ctx.notifications
        .push(ToastKind::Error, t!("toast.connection_lost"));
    Ok(())
}

/// New list of available ports; an empty list changes nothing
pub fn on_new_port_list(ctx: &mut AppContext, frame: &Frame) -> Result<()> {
    let ports = decode_port_list(&frame.event, &frame.data)?;
    if ports.is_empty() {
        tracing::debug!("Empty port list, keeping previous selector state");
        return Ok(());
    }

    tracing::info!("Received {} ports", ports.len());
    ctx.selector.refresh(&ports);
    ctx.ports = ports;
    Ok(())
}

/// Sensor data for the chart
pub fn on_sensor_update(ctx: &mut AppContext, frame: &Frame) -> Result<()> {
    let reading = SensorReading::decode(&frame.event, &frame.data)?;
    if reading.device_state.is_some() {
        ctx.device_state = reading.device_state;
    }
    ctx.chart.append_sample(&reading);
    ctx.updates_received += 1;
    Ok(())
}
