//! Application module
//!
//! Re-exports the main application type from the frontend module.

pub use crate::frontend::StormApp;
