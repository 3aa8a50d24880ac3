//! Error handling for Storm Monitor
//!
//! This module defines the crate error type and a Result alias used
//! throughout the application.

use thiserror::Error;

/// Main error type for Storm Monitor operations
#[derive(Error, Debug)]
pub enum StormError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// An inbound frame whose payload does not have the expected shape
    #[error("Malformed '{event}' payload: {reason}")]
    MalformedPayload { event: String, reason: String },

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<StormError>,
    },
}

impl StormError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        StormError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for a malformed payload error
    pub fn malformed(event: impl Into<String>, reason: impl Into<String>) -> Self {
        StormError::MalformedPayload {
            event: event.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for Storm Monitor operations
pub type Result<T> = std::result::Result<T, StormError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StormError::Channel("receiver dropped".to_string());
        assert_eq!(err.to_string(), "Channel error: receiver dropped");
    }

    #[test]
    fn test_error_with_context() {
        let err = StormError::Config("bad toml".to_string());
        let with_ctx = err.with_context("Failed to load config");
        assert!(with_ctx.to_string().contains("Failed to load config"));
        assert!(with_ctx.to_string().contains("bad toml"));
    }

    #[test]
    fn test_malformed_payload_error() {
        let err = StormError::malformed("new_port", "expected an array");
        assert_eq!(
            err.to_string(),
            "Malformed 'new_port' payload: expected an array"
        );
    }

    #[test]
    fn test_result_ext_context() {
        let res: Result<()> = Err(StormError::Channel("closed".into()));
        let err = res.context("emit select_port").unwrap_err();
        assert!(matches!(err, StormError::WithContext { .. }));
    }
}
