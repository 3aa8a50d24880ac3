//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use std::time::{Duration, Instant};
use storm_monitor::{AppContext, EventRouter, Transport};

/// Create a test timeout duration
pub fn test_timeout() -> Duration {
    Duration::from_millis(500)
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Pump `transport` into `ctx` until `done` holds or the timeout passes.
///
/// Returns whether the condition was met.
pub fn pump_until(
    router: &EventRouter,
    ctx: &mut AppContext,
    transport: &mut dyn Transport,
    mut done: impl FnMut(&AppContext) -> bool,
) -> bool {
    let deadline = Instant::now() + test_timeout();
    loop {
        router.pump(ctx, transport);
        if done(ctx) {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}
