//! MsgPack codec using `rmp-serde`.
//!
//! Uses `to_vec_named` so structs serialize as maps (with field names)
//! rather than positional arrays. Map format is what non-Rust peers
//! (e.g. `@msgpack/msgpack` in Node.js) expect, and it keeps the wire
//! format stable across field reordering.
//!
//! # Example
//!
//! ```
//! use datawire::codec::{Codec, MsgPackCodec};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Message {
//!     id: u32,
//!     content: String,
//! }
//!
//! let codec = MsgPackCodec::<Message>::new();
//! let msg = Message { id: 42, content: "hello".to_string() };
//! let wire = codec.encode(&msg).unwrap();
//! assert_eq!(codec.decode(&wire).unwrap(), msg);
//! ```

use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::Codec;
use crate::error::Result;

/// MessagePack codec for structured data.
///
/// Serializes with `rmp_serde::to_vec_named` (struct-as-map format).
/// Success is independent of payload length: a value that serializes to
/// zero bytes is still a success, unlike
/// [`PassthroughCodec`](crate::codec::PassthroughCodec).
pub struct MsgPackCodec<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> MsgPackCodec<T> {
    /// Create a codec for the given plain type.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for MsgPackCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Codec for MsgPackCodec<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    type Plain = T;
    type Wire = Bytes;

    #[inline]
    fn encode(&self, plain: &T) -> Result<Bytes> {
        // to_vec_named, not to_vec: struct-as-map on the wire
        Ok(Bytes::from(rmp_serde::to_vec_named(plain)?))
    }

    #[inline]
    fn decode(&self, wire: &Bytes) -> Result<T> {
        Ok(rmp_serde::from_slice(wire)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExchangeError;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct TestStruct {
        id: u32,
        name: String,
        active: bool,
    }

    #[test]
    fn test_encode_decode_struct() {
        let codec = MsgPackCodec::<TestStruct>::new();
        let original = TestStruct {
            id: 42,
            name: "test".to_string(),
            active: true,
        };

        let wire = codec.encode(&original).unwrap();
        let decoded = codec.decode(&wire).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_struct_serializes_as_map() {
        let codec = MsgPackCodec::<TestStruct>::new();
        let wire = codec
            .encode(&TestStruct {
                id: 1,
                name: "x".to_string(),
                active: false,
            })
            .unwrap();

        // fixmap with 3 elements is 0x83; fixarray would be 0x93
        assert_eq!(
            wire[0] & 0xF0,
            0x80,
            "Expected map format (0x8X), got {:02X}",
            wire[0]
        );
    }

    #[test]
    fn test_decode_error_on_invalid_data() {
        let codec = MsgPackCodec::<TestStruct>::new();
        let result = codec.decode(&Bytes::from_static(b"not valid msgpack"));
        assert!(matches!(result, Err(ExchangeError::MsgPackDecode(_))));
    }

    #[test]
    fn test_encode_decode_collections() {
        let codec = MsgPackCodec::<Vec<i32>>::new();
        let vec = vec![1, 2, 3, 4, 5];

        let wire = codec.encode(&vec).unwrap();
        assert_eq!(codec.decode(&wire).unwrap(), vec);
    }

    #[test]
    fn test_encode_decode_option() {
        let codec = MsgPackCodec::<Option<i32>>::new();

        let wire = codec.encode(&Some(42)).unwrap();
        assert_eq!(codec.decode(&wire).unwrap(), Some(42));

        let wire = codec.encode(&None).unwrap();
        assert_eq!(wire, Bytes::from_static(&[0xc0]), "None is msgpack nil");
        assert_eq!(codec.decode(&wire).unwrap(), None);
    }
}
