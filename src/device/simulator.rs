//! Simulated test stand.
//!
//! Runs on its own thread and behaves like the serial bridge:
//!
//! 1. announces itself with `connect` and a `new_port` list
//! 2. streams `update_serial_data` frames for the active port at the
//!    configured rate, with values encoded as numeric strings the way the
//!    serial line parser forwards them
//! 3. switches port on `select_port`
//! 4. sends `disconnect` when stopped
//!
//! The first configured port is active from the start. With no ports
//! configured the device announces an empty list and stays silent.

use crate::config::DeviceConfig;
use crate::error::Result;
use crate::transport::{
    DeviceLink, Frame, EVENT_CONNECT, EVENT_DISCONNECT, EVENT_NEW_PORT, EVENT_SELECT_PORT,
    EVENT_SERIAL_DATA,
};
use crate::types::SensorKind;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

/// Triangle sweep of the throttle between `min` and `max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrottleSweep {
    pub period: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ThrottleSweep {
    fn default() -> Self {
        Self {
            period: 20.0,
            min: 0.0,
            max: 100.0,
        }
    }
}

impl ThrottleSweep {
    /// Throttle at `elapsed_secs`
    pub fn value_at(&self, elapsed_secs: f64) -> f64 {
        let t = elapsed_secs.rem_euclid(self.period);
        let half = self.period / 2.0;
        let frac = if t < half { t / half } else { 2.0 - t / half };
        self.min + (self.max - self.min) * frac
    }
}

/// Simple xorshift generator for measurement noise
#[derive(Debug, Clone)]
struct Noise(u64);

impl Noise {
    fn next(&mut self) -> f64 {
        let mut s = self.0;
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        self.0 = s;
        (s as f64) / (u64::MAX as f64)
    }

    /// Uniform in `[-amplitude, amplitude]`
    fn jitter(&mut self, amplitude: f64) -> f64 {
        (self.next() - 0.5) * 2.0 * amplitude
    }
}

/// A throttle sweep driving a motor on a thrust stand
pub struct SimulatedDevice {
    link: DeviceLink,
    config: DeviceConfig,
    running: Arc<AtomicBool>,
    active_port: Option<String>,
    throttle: ThrottleSweep,
    port_started: Instant,
    noise: Noise,
    /// Sensor frames dropped because the UI queue was full
    dropped: Arc<AtomicU64>,
}

impl SimulatedDevice {
    pub fn new(link: DeviceLink, config: DeviceConfig, running: Arc<AtomicBool>) -> Self {
        let active_port = config.ports.first().cloned();
        Self {
            link,
            config,
            running,
            active_port,
            throttle: ThrottleSweep::default(),
            port_started: Instant::now(),
            noise: Noise(0x2545_F491_4F6C_DD1D),
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Shared counter of dropped sensor frames
    pub fn dropped_counter(&self) -> Arc<AtomicU64> {
        self.dropped.clone()
    }

    pub fn active_port(&self) -> Option<&str> {
        self.active_port.as_deref()
    }

    /// Main loop. Returns when stopped or when the UI side goes away.
    pub fn run(mut self) {
        tracing::info!("Simulated device started");

        if let Err(e) = self.announce() {
            tracing::warn!("Simulated device could not announce itself: {}", e);
            return;
        }

        let interval = self.config.sample_interval();
        while self.running.load(Ordering::SeqCst) {
            let tick = Instant::now();

            if let Err(e) = self.process_commands().and_then(|_| self.emit_reading()) {
                tracing::info!("Simulated device stopping: {}", e);
                break;
            }

            if let Some(rest) = interval.checked_sub(tick.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        let _ = self.link.send(Frame::bare(EVENT_DISCONNECT));
        tracing::info!("Simulated device stopped");
    }

    /// Send `connect` and the port list
    pub fn announce(&self) -> Result<()> {
        self.link.send(Frame::bare(EVENT_CONNECT))?;
        let ports: Vec<Value> = self
            .config
            .ports
            .iter()
            .enumerate()
            .map(|(index, name)| json!({ "index": index, "value": name }))
            .collect();
        self.link.send(Frame::new(EVENT_NEW_PORT, Value::Array(ports)))
    }

    /// Handle every pending command
    pub fn process_commands(&mut self) -> Result<()> {
        while let Some(frame) = self.link.try_command()? {
            self.handle_command(&frame);
        }
        Ok(())
    }

    fn handle_command(&mut self, frame: &Frame) {
        match frame.event.as_str() {
            EVENT_SELECT_PORT => {
                let Some(name) = frame.data.get("name").and_then(Value::as_str) else {
                    tracing::warn!("select_port without a name: {}", frame.data);
                    return;
                };
                if self.config.ports.iter().any(|p| p == name) {
                    tracing::info!("Switching to port {}", name);
                    self.active_port = Some(name.to_string());
                    self.port_started = Instant::now();
                } else {
                    tracing::warn!("Unknown port requested: {}", name);
                }
            }
            other => tracing::debug!("Ignoring command '{}'", other),
        }
    }

    fn emit_reading(&mut self) -> Result<()> {
        if self.active_port.is_none() {
            return Ok(());
        }
        let elapsed = self.port_started.elapsed().as_secs_f64();
        let payload = self.reading_at(elapsed);
        if !self.link.try_stream(Frame::new(EVENT_SERIAL_DATA, payload))? {
            let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            if dropped == 1 || dropped % 1000 == 0 {
                tracing::warn!("UI not keeping up, {} sensor frames dropped", dropped);
            }
        }
        Ok(())
    }

    /// Build one sensor payload for `elapsed_secs` after the port opened
    pub fn reading_at(&mut self, elapsed_secs: f64) -> Value {
        let throttle = self.throttle.value_at(elapsed_secs).clamp(0.0, 100.0);
        let load = throttle / 100.0;
        let current = (30.0 * load.powf(1.5) + self.noise.jitter(0.05)).max(0.0);
        let voltage = 16.8 - 0.04 * current + self.noise.jitter(0.02);
        let weight = (1200.0 * load * load + self.noise.jitter(2.0)).max(0.0);
        let state = if throttle > 0.5 { 1 } else { 0 };

        let mut map = serde_json::Map::new();
        map.insert("state".to_string(), json!(state.to_string()));
        for (kind, value) in [
            (SensorKind::Weight, weight),
            (SensorKind::Current, current),
            (SensorKind::Voltage, voltage),
            (SensorKind::Pwm, throttle),
        ] {
            map.insert(kind.key().to_string(), json!(format!("{:.2}", value)));
        }
        Value::Object(map)
    }
}

/// Handle to a running simulator thread
pub struct SimulatorHandle {
    running: Arc<AtomicBool>,
    dropped: Arc<AtomicU64>,
    thread: Option<JoinHandle<()>>,
}

impl SimulatorHandle {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Sensor frames dropped so far because the UI queue was full
    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Stop the simulator and wait for its thread
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("Simulator thread panicked");
            }
        }
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn a simulator on its own thread
pub fn spawn_simulator(link: DeviceLink, config: DeviceConfig) -> std::io::Result<SimulatorHandle> {
    let running = Arc::new(AtomicBool::new(true));
    let device = SimulatedDevice::new(link, config, running.clone());
    let dropped = device.dropped_counter();
    let thread = std::thread::Builder::new()
        .name("simulated_device".to_string())
        .spawn(move || device.run())?;
    Ok(SimulatorHandle {
        running,
        dropped,
        thread: Some(thread),
    })
}
