//! Core data types for Storm Monitor
//!
//! This module defines the data carried by inbound frames:
//!
//! - [`Port`] - A selectable serial port announced by the device side
//! - [`SensorKind`] - The four recognized sensor channels
//! - [`SensorReading`] - One decoded `update_serial_data` payload
//! - [`ConnectionStatus`] - Transport connection state shown in the UI
//!
//! Payload decoding lives next to the types so the wire key mapping is
//! defined in exactly one place.

use crate::error::{Result, StormError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A selectable communication endpoint exposed by the device layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port {
    /// Index used to select the port on the remote side
    pub index: u32,
    /// Display name (e.g. `COM3`, `/dev/ttyACM0`)
    pub name: String,
}

impl Port {
    /// Create a new port entry
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Wire shapes accepted for a single `new_port` entry
#[derive(Deserialize)]
#[serde(untagged)]
enum PortEntry {
    Indexed { index: u32, value: String },
    Name(String),
}

/// Decode a `new_port` payload.
///
/// Accepts either `[{"index": 0, "value": "COM1"}, ...]` or the simpler
/// `["COM1", ...]`. Plain names get a 1-based index from their position,
/// which is the option value the device side expects.
pub fn decode_port_list(event: &str, data: &Value) -> Result<Vec<Port>> {
    let entries: Vec<PortEntry> = serde_json::from_value(data.clone())
        .map_err(|e| StormError::malformed(event, e.to_string()))?;

    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(pos, entry)| match entry {
            PortEntry::Indexed { index, value } => Port::new(index, value),
            PortEntry::Name(name) => Port::new(pos as u32 + 1, name),
        })
        .collect())
}

/// Recognized sensor channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SensorKind {
    Voltage,
    Current,
    Weight,
    /// Throttle command, sent as `pwm`
    Pwm,
}

impl SensorKind {
    /// All kinds in chart order
    pub const ALL: [SensorKind; 4] = [
        SensorKind::Voltage,
        SensorKind::Current,
        SensorKind::Weight,
        SensorKind::Pwm,
    ];

    /// Key used in the `update_serial_data` payload
    pub fn key(&self) -> &'static str {
        match self {
            SensorKind::Voltage => "voltage",
            SensorKind::Current => "current",
            SensorKind::Weight => "weight",
            SensorKind::Pwm => "pwm",
        }
    }

    /// Parse a payload key
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "voltage" => Some(SensorKind::Voltage),
            "current" => Some(SensorKind::Current),
            "weight" => Some(SensorKind::Weight),
            "pwm" => Some(SensorKind::Pwm),
            _ => None,
        }
    }

    /// Position in per-kind arrays
    pub fn index(&self) -> usize {
        match self {
            SensorKind::Voltage => 0,
            SensorKind::Current => 1,
            SensorKind::Weight => 2,
            SensorKind::Pwm => 3,
        }
    }

    /// Translation key for the series legend
    pub fn label_key(&self) -> &'static str {
        match self {
            SensorKind::Voltage => "series.voltage",
            SensorKind::Current => "series.current",
            SensorKind::Weight => "series.weight",
            SensorKind::Pwm => "series.pwm",
        }
    }

    /// Default line color (RGBA)
    pub fn color(&self) -> [u8; 4] {
        match self {
            SensorKind::Voltage => [255, 99, 132, 255],
            SensorKind::Current => [54, 162, 235, 255],
            SensorKind::Weight => [75, 192, 192, 255],
            SensorKind::Pwm => [255, 159, 64, 255],
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One decoded sensor update.
///
/// Each recognized channel is optional; absent channels were not part of
/// the payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorReading {
    values: [Option<f64>; 4],
    /// Device state code reported alongside the measurements
    pub device_state: Option<i64>,
}

impl SensorReading {
    /// Create an empty reading
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, kind: SensorKind, value: f64) -> Self {
        self.set(kind, value);
        self
    }

    /// Set a channel value
    pub fn set(&mut self, kind: SensorKind, value: f64) {
        self.values[kind.index()] = Some(value);
    }

    /// Get a channel value if present
    pub fn get(&self, kind: SensorKind) -> Option<f64> {
        self.values[kind.index()]
    }

    /// Iterate over the channels present in this reading
    pub fn present(&self) -> impl Iterator<Item = (SensorKind, f64)> + '_ {
        SensorKind::ALL
            .iter()
            .filter_map(|&kind| self.get(kind).map(|v| (kind, v)))
    }

    /// True if no recognized channel is present
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Decode an `update_serial_data` payload.
    ///
    /// Values may be JSON numbers or numeric strings (the serial parser on
    /// the device side forwards the raw text fields). Unknown keys are
    /// ignored; a recognized key with a non-numeric value rejects the whole
    /// payload.
    pub fn decode(event: &str, data: &Value) -> Result<Self> {
        let map = data
            .as_object()
            .ok_or_else(|| StormError::malformed(event, "expected an object"))?;

        let mut reading = SensorReading::new();
        for (key, value) in map {
            if let Some(kind) = SensorKind::from_key(key) {
                let v = number_from_value(value).ok_or_else(|| {
                    StormError::malformed(event, format!("'{}' is not numeric: {}", key, value))
                })?;
                reading.set(kind, v);
            } else if key == "state" {
                reading.device_state = number_from_value(value)
                    .filter(|v| v.fract() == 0.0)
                    .map(|v| v as i64);
            } else {
                tracing::trace!("Ignoring unknown sensor key '{}'", key);
            }
        }
        Ok(reading)
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Transport connection status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No server reachable
    #[default]
    Disconnected,
    /// Server reachable
    Connected,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Disconnected => write!(f, "Disconnected"),
            ConnectionStatus::Connected => write!(f, "Connected"),
        }
    }
}
