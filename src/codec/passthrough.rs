//! Passthrough codec - identity over raw bytes.
//!
//! Used when the payload is already serialized or is raw bytes. `Bytes`
//! clones are reference-counted, so both directions are zero-copy.
//!
//! # Example
//!
//! ```
//! use datawire::codec::{Codec, PassthroughCodec};
//! use bytes::Bytes;
//!
//! let codec = PassthroughCodec;
//! let wire = codec.encode(&Bytes::from_static(b"payload")).unwrap();
//! assert_eq!(codec.decode(&wire).unwrap(), &b"payload"[..]);
//!
//! // An empty payload is reported as a failure, not an empty wire value.
//! assert!(codec.encode(&Bytes::new()).is_err());
//! ```

use bytes::Bytes;

use crate::codec::Codec;
use crate::error::{ExchangeError, Result};

/// Identity codec passing bytes through without transformation.
///
/// Treats an empty payload as a failure in both directions. That means a
/// legitimate empty payload is indistinguishable from an encoding error
/// under this codec; callers that need empty payloads should use a codec
/// whose success is independent of the payload length, such as
/// [`MsgPackCodec`](crate::codec::MsgPackCodec).
pub struct PassthroughCodec;

impl Codec for PassthroughCodec {
    type Plain = Bytes;
    type Wire = Bytes;

    #[inline]
    fn encode(&self, plain: &Bytes) -> Result<Bytes> {
        if plain.is_empty() {
            return Err(ExchangeError::Encode("empty payload".into()));
        }
        Ok(plain.clone())
    }

    #[inline]
    fn decode(&self, wire: &Bytes) -> Result<Bytes> {
        if wire.is_empty() {
            return Err(ExchangeError::Decode("empty payload".into()));
        }
        Ok(wire.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let codec = PassthroughCodec;
        let original = Bytes::from_static(b"hello world");

        let wire = codec.encode(&original).unwrap();
        let plain = codec.decode(&wire).unwrap();

        assert_eq!(plain, original);
    }

    #[test]
    fn test_encode_zero_copy() {
        let codec = PassthroughCodec;
        let original = Bytes::from_static(b"static data");

        let wire = codec.encode(&original).unwrap();

        // Same underlying memory, only the refcount moved
        assert_eq!(wire.as_ptr(), original.as_ptr());
    }

    #[test]
    fn test_empty_is_encode_failure() {
        let codec = PassthroughCodec;
        let result = codec.encode(&Bytes::new());
        assert!(matches!(result, Err(ExchangeError::Encode(_))));
    }

    #[test]
    fn test_empty_is_decode_failure() {
        let codec = PassthroughCodec;
        let result = codec.decode(&Bytes::new());
        assert!(matches!(result, Err(ExchangeError::Decode(_))));
    }

    #[test]
    fn test_binary_data_preserved() {
        let codec = PassthroughCodec;
        let all_bytes: Vec<u8> = (1..=255).collect();
        let original = Bytes::from(all_bytes.clone());

        let wire = codec.encode(&original).unwrap();
        assert_eq!(&wire[..], &all_bytes[..]);
    }

    #[test]
    fn test_large_buffer() {
        let codec = PassthroughCodec;
        let large = Bytes::from(vec![0xAB; 1024 * 1024]);

        let wire = codec.encode(&large).unwrap();
        assert_eq!(wire.len(), 1024 * 1024);
        assert_eq!(codec.decode(&wire).unwrap(), large);
    }
}
