//! Error types for sidebar-ui
//!
//! Sidebar operations themselves never fail. Errors only come from the
//! edges: configuration, the browser host and page binding.

use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum UiError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Host environment unavailable: {0}")]
    HostUnavailable(String),

    #[error("A sidebar controller is already bound to this page")]
    AlreadyBound,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for sidebar-ui operations
pub type UiResult<T> = Result<T, UiError>;
