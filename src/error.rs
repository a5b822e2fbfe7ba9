//! Error types for datawire.

use thiserror::Error;

use crate::transport::Address;

/// Main error type for all pipeline operations.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Send was attempted before a transport was registered.
    #[error("no transport registered")]
    TransportMissing,

    /// Send was attempted before a codec was registered.
    #[error("no codec registered")]
    CodecMissing,

    /// Encoding produced no usable wire value.
    #[error("encode failed: {0}")]
    Encode(String),

    /// Decoding produced no usable plain value.
    #[error("decode failed: {0}")]
    Decode(String),

    /// MsgPack serialization error.
    #[error("MsgPack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    /// MsgPack deserialization error.
    #[error("MsgPack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The addressed peer cannot be reached.
    #[error("peer {address} unreachable")]
    Unreachable {
        /// Address the delivery was attempted to.
        address: Address,
    },

    /// The transport's channel to the peer is closed.
    #[error("channel closed")]
    ChannelClosed,

    /// The transport's delivery queue is full.
    #[error("delivery queue full")]
    Backpressure,

    /// I/O error inside a transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using ExchangeError.
pub type Result<T> = std::result::Result<T, ExchangeError>;
