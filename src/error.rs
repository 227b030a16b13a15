//! Error types shared across the watchdog.
//!
//! None of these escape the event dispatcher: every failure ends the single
//! event it occurred in. They surface only from startup paths, the toggle
//! command, and the delivery worker's logs.

use thiserror::Error;

// ============================================================================
// Toggle persistence
// ============================================================================

/// Failure reading or writing the opt-in record.
#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("toggle store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("toggle store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToggleError {
    /// Get a static error code string for logs and metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Json(_) => "json",
        }
    }
}

// ============================================================================
// Webhook delivery
// ============================================================================

/// Failure posting a notification. Logged by the delivery worker, then dropped.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook responded with status {0}")]
    Status(u16),

    #[error("webhook request timed out")]
    Timeout,
}

impl DeliveryError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Status(_) => "status",
            Self::Timeout => "timeout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let io = ToggleError::Io(std::io::Error::other("disk full"));
        assert_eq!(io.error_code(), "io");
        assert_eq!(DeliveryError::Status(404).error_code(), "status");
        assert_eq!(DeliveryError::Timeout.error_code(), "timeout");
        assert_eq!(
            DeliveryError::Status(500).to_string(),
            "webhook responded with status 500"
        );
    }
}
