//! Error types for tickler.

/// Top-level error type for task occurrence, storage and reminder dispatch.
#[derive(Debug, thiserror::Error)]
pub enum TicklerError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Task store error (state persistence, lookup).
    #[error("store error: {0}")]
    Store(String),

    /// A task or reminder failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reminder dispatcher error (channel closed, bad tick interval).
    #[error("dispatch error: {0}")]
    Dispatch(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, TicklerError>;
