//! Error types for Briefly

use thiserror::Error;

/// Main error type for Briefly operations
#[derive(Error, Debug)]
pub enum BrieflyError {
    /// Configuration errors (bad file, bad env override, bad URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for Briefly operations
pub type Result<T> = std::result::Result<T, BrieflyError>;
