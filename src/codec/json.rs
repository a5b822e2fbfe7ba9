//! JSON codec using `serde_json`.
//!
//! Larger on the wire than MsgPack, but human-readable in transport logs
//! and interoperable with anything that speaks JSON.

use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::Codec;
use crate::error::Result;

/// JSON codec for structured data.
pub struct JsonCodec<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> JsonCodec<T> {
    /// Create a codec for the given plain type.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Codec for JsonCodec<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    type Plain = T;
    type Wire = Bytes;

    #[inline]
    fn encode(&self, plain: &T) -> Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(plain)?))
    }

    #[inline]
    fn decode(&self, wire: &Bytes) -> Result<T> {
        Ok(serde_json::from_slice(wire)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExchangeError;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Event {
        seq: u64,
        kind: String,
    }

    #[test]
    fn test_encode_decode_struct() {
        let codec = JsonCodec::<Event>::new();
        let original = Event {
            seq: 7,
            kind: "spawn".to_string(),
        };

        let wire = codec.encode(&original).unwrap();
        assert_eq!(codec.decode(&wire).unwrap(), original);
    }

    #[test]
    fn test_wire_is_readable_json() {
        let codec = JsonCodec::<Event>::new();
        let wire = codec
            .encode(&Event {
                seq: 1,
                kind: "tick".to_string(),
            })
            .unwrap();

        assert_eq!(&wire[..], br#"{"seq":1,"kind":"tick"}"#);
    }

    #[test]
    fn test_decode_error_on_invalid_data() {
        let codec = JsonCodec::<Event>::new();
        let result = codec.decode(&Bytes::from_static(b"{truncated"));
        assert!(matches!(result, Err(ExchangeError::Json(_))));
    }
}
