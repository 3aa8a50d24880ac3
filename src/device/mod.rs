//! Device side of the transport.
//!
//! The dashboard talks to whatever sits on the other end of a
//! [`DeviceLink`](crate::transport::DeviceLink). This module provides a
//! simulated test stand that speaks the same frames as the serial bridge,
//! for running the UI without hardware.

pub mod simulator;

pub use simulator::{spawn_simulator, SimulatedDevice, SimulatorHandle, ThrottleSweep};
