//! Error types for the broker
//!
//! All errors here belong to the transport boundary. The core membership
//! engine is fail-silent: invalid-state events are dropped and duplicate
//! transitions absorbed as no-ops, so it never returns an error.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Transport-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// WebSocket protocol error (fatal for the connection)
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (fatal for the connection)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel send error (broker actor no longer running)
    #[error("Channel send error")]
    ChannelSend,
}

/// Message send errors
///
/// Occurs when attempting to deliver an event through a closed channel.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,
}
