//! Error types for the waitlist engine
//!
//! The estimator, matcher and analyzer are infallible by construction. These
//! errors cover the host-side plumbing around them: configuration, snapshot
//! loading and metrics registration.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific host-side failures
#[derive(Debug, thiserror::Error)]
pub enum WaitlistError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Failed to load snapshot from {path}: {reason}")]
    SnapshotLoadFailed { path: String, reason: String },

    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    #[error("Metrics error: {message}")]
    MetricsError { message: String },

    #[error("Internal engine error: {message}")]
    InternalError { message: String },
}
