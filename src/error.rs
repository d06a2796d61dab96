//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Every variant is raised before any entity is written.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid time limit: {time_limit_seconds}s (must be positive and finite)")]
    InvalidTimeLimit { time_limit_seconds: f64 },

    #[error("Invalid response time: {response_time_seconds}s (must be non-negative and finite)")]
    InvalidResponseTime { response_time_seconds: f64 },

    #[error("Invalid uncertainty: {uncertainty} (must lie in [0, 1])")]
    InvalidUncertainty { uncertainty: f64 },

    #[error("Invalid inactivity: {days} days (must be non-negative)")]
    InvalidInactivity { days: f64 },

    #[error("Entity not found: {key}")]
    EntityNotFound { key: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}
