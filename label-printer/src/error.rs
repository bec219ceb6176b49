//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Connection refused or host unreachable
    #[error("Connection failed: {0}")]
    Connection(String),

    /// IO error while writing to the printer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout waiting for the printer to accept the connection
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl PrintError {
    /// Whether the failure happened before any byte reached the printer
    pub fn is_connection_error(&self) -> bool {
        matches!(self, PrintError::Connection(_) | PrintError::Timeout(_))
    }
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
