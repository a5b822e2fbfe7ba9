//! Codec module - conversion between plain values and their wire form.
//!
//! A [`Codec`] pairs the two directions of the conversion:
//!
//! - [`PassthroughCodec`] - identity over raw bytes (zero-copy)
//! - [`MsgPackCodec`] - MessagePack via `rmp-serde` (to_vec_named, struct-as-map)
//! - [`JsonCodec`] - JSON via `serde_json`
//!
//! # Design
//!
//! Codecs are trait objects rather than marker structs with static methods:
//! the pipeline stores exactly one codec per instantiation as
//! `Arc<dyn Codec>`, and encode/decode may run concurrently from the send
//! and receive threads, so implementations must not carry per-call state.
//!
//! # Example
//!
//! ```
//! use datawire::codec::{Codec, MsgPackCodec, PassthroughCodec};
//! use bytes::Bytes;
//!
//! // Serde codec for structured data
//! let codec = MsgPackCodec::<String>::new();
//! let wire = codec.encode(&"hello".to_string()).unwrap();
//! assert_eq!(codec.decode(&wire).unwrap(), "hello");
//!
//! // Identity codec for raw bytes
//! let raw = PassthroughCodec;
//! let wire = raw.encode(&Bytes::from_static(b"hello")).unwrap();
//! assert_eq!(&wire[..], b"hello");
//! ```

mod json;
mod msgpack;
mod passthrough;

pub use json::JsonCodec;
pub use msgpack::MsgPackCodec;
pub use passthrough::PassthroughCodec;

use crate::error::Result;

/// Bidirectional converter between a plain application value and its wire
/// representation.
///
/// `Err` means no usable result was produced; the pipeline then skips the
/// downstream stage entirely (no partial send, no partial delivery).
/// Implementations must be referentially transparent with respect to their
/// inputs - the pipeline may invoke [`encode`](Codec::encode) and
/// [`decode`](Codec::decode) concurrently from different threads.
pub trait Codec: Send + Sync {
    /// The application-level value type.
    type Plain;
    /// The serialized representation exchanged with the transport.
    type Wire;

    /// Encode a plain value into its wire form.
    fn encode(&self, plain: &Self::Plain) -> Result<Self::Wire>;

    /// Decode a wire value back into its plain form.
    fn decode(&self, wire: &Self::Wire) -> Result<Self::Plain>;
}
