//! Error types for the Minecraft Pi API client

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, McpiError>;

/// Minecraft Pi API client error types
#[derive(Debug, Error)]
pub enum McpiError {
    /// TCP connect or socket I/O failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// No connection established or the stream was lost
    #[error("Not connected to Minecraft")]
    NotConnected,

    /// The server replied with something the protocol does not allow
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The server rejected the command with a "Fail" reply
    #[error("Command rejected by server: {0}")]
    CommandFailed(String),
}
