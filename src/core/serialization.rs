//! # Payload Serialization
//!
//! Tag-keyed abstraction over the two payload codecs the frame layer
//! carries: a binary-schema codec (bincode) behind [`Tag::Binary`] and a
//! generic structured codec (JSON) behind [`Tag::Structured`].
//!
//! The frame codec never looks inside a payload; it treats both codecs
//! purely as byte producers/consumers keyed by tag. Handlers use this
//! module to cross the bytes/value boundary.
//!
//! ## Usage
//! ```
//! use lvwire::core::frame::Tag;
//! use lvwire::core::serialization::TagCodec;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Sum { a: u32, b: u32 }
//!
//! let req = Sum { a: 1, b: 2 };
//! let bytes = req.encode_payload(Tag::Binary).unwrap();
//! let back = Sum::decode_payload(&bytes, Tag::Binary).unwrap();
//! assert_eq!(req, back);
//! ```

use serde::{de::DeserializeOwned, Serialize};

use crate::core::frame::Tag;
use crate::error::{Result, WireError};

/// Types that can cross the wire as either payload kind.
///
/// Blanket-implemented for everything serde can handle; the tag picks the
/// concrete codec.
pub trait TagCodec: Serialize + DeserializeOwned + Sized {
    /// Serialize to payload bytes for the given tag.
    fn encode_payload(&self, tag: Tag) -> Result<Vec<u8>> {
        match tag {
            Tag::Binary => {
                bincode::serialize(self).map_err(|e| WireError::SerializeError(e.to_string()))
            }
            Tag::Structured => {
                serde_json::to_vec(self).map_err(|e| WireError::SerializeError(e.to_string()))
            }
        }
    }

    /// Deserialize from payload bytes for the given tag.
    fn decode_payload(data: &[u8], tag: Tag) -> Result<Self> {
        match tag {
            Tag::Binary => {
                bincode::deserialize(data).map_err(|e| WireError::DeserializeError(e.to_string()))
            }
            Tag::Structured => {
                serde_json::from_slice(data).map_err(|e| WireError::DeserializeError(e.to_string()))
            }
        }
    }
}

impl<T: Serialize + DeserializeOwned> TagCodec for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct AddRequest {
        a: i64,
        b: i64,
    }

    #[test]
    fn test_binary_roundtrip() {
        let req = AddRequest { a: 1, b: 2 };
        let bytes = req.encode_payload(Tag::Binary).unwrap();
        let back = AddRequest::decode_payload(&bytes, Tag::Binary).unwrap();
        assert_eq!(req, back);
    }

    #[test]
    fn test_structured_roundtrip_is_json() {
        let req = AddRequest { a: 3, b: 4 };
        let bytes = req.encode_payload(Tag::Structured).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["a"], 3);
        assert_eq!(value["b"], 4);

        let back = AddRequest::decode_payload(&bytes, Tag::Structured).unwrap();
        assert_eq!(req, back);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = AddRequest::decode_payload(b"not json", Tag::Structured).unwrap_err();
        assert!(matches!(err, WireError::DeserializeError(_)));
    }

    #[test]
    fn test_codecs_are_not_interchangeable() {
        let req = AddRequest { a: 9, b: 9 };
        let bin = req.encode_payload(Tag::Binary).unwrap();
        assert!(AddRequest::decode_payload(&bin, Tag::Structured).is_err());
    }
}
