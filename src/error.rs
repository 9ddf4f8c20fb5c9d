//! Error types for meteowire
//!
//! Provides a unified error type for client, server and codec operations.

use thiserror::Error;

/// Result type alias using MeteoError
pub type Result<T> = std::result::Result<T, MeteoError>;

/// Unified error type for meteowire operations
#[derive(Debug, Error)]
pub enum MeteoError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Setup Errors (bind / listen / connect / accept)
    // -------------------------------------------------------------------------
    #[error("{context} failed: {source}")]
    Setup {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection closed after {transferred} of {expected} bytes")]
    ShortTransfer { transferred: usize, expected: usize },

    #[error("Connection error: {0}")]
    Connection(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Usage / Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MeteoError {
    /// Wrap an I/O error raised while setting up a socket
    pub fn setup(context: &'static str, source: std::io::Error) -> Self {
        MeteoError::Setup { context, source }
    }

    /// True for failures that abort a single exchange but not the server
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            MeteoError::Io(_)
                | MeteoError::ShortTransfer { .. }
                | MeteoError::Connection(_)
                | MeteoError::Protocol(_)
        )
    }

    /// Process exit code for the command-line binaries
    ///
    /// Usage mistakes exit with 1, everything touching the network with -1.
    pub fn exit_code(&self) -> i32 {
        match self {
            MeteoError::Usage(_) | MeteoError::Config(_) => 1,
            _ => -1,
        }
    }
}
