//! Opaque aggregate-root payload codecs.
//!
//! The adapter never inspects aggregate state; it hands the payload to a
//! [`SnapshotCodec`] and stores whatever bytes come back. Two codecs ship
//! with the crate: protobuf via prost and JSON via serde_json. Callers with
//! other wire formats implement the trait themselves.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors produced while encoding or decoding a snapshot payload.
///
/// Kept separate from transport errors so a corrupted blob stays
/// distinguishable from a failed query.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("protobuf decode error: {0}")]
    ProtobufDecode(#[from] prost::DecodeError),

    #[error("protobuf encode error: {0}")]
    ProtobufEncode(#[from] prost::EncodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Binary codec for aggregate-root payloads.
pub trait SnapshotCodec: Send + Sync {
    /// The aggregate-root type this codec reconstructs.
    type Root: Send + Sync;

    /// Encode the aggregate root to the stored blob.
    fn encode(&self, root: &Self::Root) -> Result<Vec<u8>, CodecError>;

    /// Decode a stored blob back into the aggregate root.
    ///
    /// The buffer is always fully in memory; a failure here means the stored
    /// payload is corrupt or written by an incompatible codec.
    fn decode(&self, buf: &[u8]) -> Result<Self::Root, CodecError>;
}

/// Protobuf codec for aggregate roots that are prost messages.
pub struct ProstCodec<M> {
    _marker: PhantomData<fn() -> M>,
}

impl<M> Default for ProstCodec<M> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<M> SnapshotCodec for ProstCodec<M>
where
    M: prost::Message + Default + Send + Sync,
{
    type Root = M;

    fn encode(&self, root: &M) -> Result<Vec<u8>, CodecError> {
        Ok(root.encode_to_vec())
    }

    fn decode(&self, buf: &[u8]) -> Result<M, CodecError> {
        Ok(M::decode(buf)?)
    }
}

/// JSON codec for serde-serializable aggregate roots.
pub struct JsonCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> SnapshotCodec for JsonCodec<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    type Root = T;

    fn encode(&self, root: &T) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(root)?)
    }

    fn decode(&self, buf: &[u8]) -> Result<T, CodecError> {
        Ok(serde_json::from_slice(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Order {
        id: String,
        total: i64,
        lines: Vec<Line>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        sku: String,
        quantity: u32,
    }

    #[test]
    fn json_round_trips_nested_state() {
        let codec = JsonCodec::<Order>::default();
        let order = Order {
            id: "ord-7".to_string(),
            total: 1250,
            lines: vec![
                Line {
                    sku: "A-1".to_string(),
                    quantity: 2,
                },
                Line {
                    sku: "B-9".to_string(),
                    quantity: 1,
                },
            ],
        };

        let buf = codec.encode(&order).unwrap();
        let decoded = codec.decode(&buf).unwrap();

        assert_eq!(decoded, order);
    }

    #[test]
    fn json_rejects_corrupt_payload() {
        let codec = JsonCodec::<Order>::default();

        let err = codec.decode(b"\xff\xfenot json").unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn prost_round_trips_any() {
        let codec = ProstCodec::<prost_types::Any>::default();
        let any = prost_types::Any {
            type_url: "type.example/Order".to_string(),
            value: vec![1, 2, 3, 200, 255],
        };

        let buf = codec.encode(&any).unwrap();
        let decoded = codec.decode(&buf).unwrap();

        assert_eq!(decoded, any);
    }

    #[test]
    fn prost_rejects_corrupt_payload() {
        let codec = ProstCodec::<prost_types::Any>::default();

        // 0xFF is not a valid field tag.
        let err = codec.decode(&[0xFF, 0xFF, 0xFF]).unwrap_err();
        assert!(matches!(err, CodecError::ProtobufDecode(_)));
    }
}
