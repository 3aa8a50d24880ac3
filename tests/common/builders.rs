//! Test data builders for frames sent by the device side

use serde_json::{json, Map, Value};
use storm_monitor::transport::{EVENT_NEW_PORT, EVENT_SERIAL_DATA};
use storm_monitor::{Frame, SensorKind};

/// Builder for `update_serial_data` frames
#[derive(Default)]
pub struct SensorFrameBuilder {
    fields: Map<String, Value>,
}

impl SensorFrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric value
    pub fn value(mut self, kind: SensorKind, value: f64) -> Self {
        self.fields.insert(kind.key().to_string(), json!(value));
        self
    }

    /// Value as the text the serial parser forwards
    pub fn text(mut self, kind: SensorKind, value: &str) -> Self {
        self.fields.insert(kind.key().to_string(), json!(value));
        self
    }

    pub fn state(mut self, state: i64) -> Self {
        self.fields.insert("state".to_string(), json!(state.to_string()));
        self
    }

    pub fn raw(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Frame {
        Frame::new(EVENT_SERIAL_DATA, Value::Object(self.fields))
    }
}

/// `new_port` frame in the indexed form
pub fn port_list(names: &[&str]) -> Frame {
    let entries: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(index, name)| json!({ "index": index, "value": name }))
        .collect();
    Frame::new(EVENT_NEW_PORT, Value::Array(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_frame_builder() {
        let frame = SensorFrameBuilder::new()
            .value(SensorKind::Voltage, 12.5)
            .state(1)
            .build();
        assert_eq!(frame.event, EVENT_SERIAL_DATA);
        assert_eq!(frame.data["voltage"], json!(12.5));
        assert_eq!(frame.data["state"], json!("1"));
    }
}
