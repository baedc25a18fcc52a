//! Vectors of 256-bit hashes
//!
//! A VL-prefixed concatenation of 32-byte hashes; JSON is an array of hex
//! strings.

use serde_json::Value as Json;

use crate::definitions::FieldDefinition;
use crate::error::{CodecError, CodecResult};
use crate::serializer::BytesList;
use crate::types::hash::Hash256;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vector256(pub Vec<Hash256>);

impl Vector256 {
    /// Build from the payload of a VL field; must be a whole number of
    /// 32-byte hashes.
    pub fn from_slice(field: &FieldDefinition, bytes: &[u8]) -> CodecResult<Self> {
        if bytes.len() % Hash256::WIDTH != 0 {
            return Err(CodecError::TypeMismatch {
                field: field.name.clone(),
                expected: "a multiple of 32 bytes",
            });
        }
        let hashes = bytes
            .chunks_exact(Hash256::WIDTH)
            .map(|chunk| Hash256(chunk.try_into().expect("exact chunk")))
            .collect();
        Ok(Self(hashes))
    }

    pub fn from_json(field: &FieldDefinition, json: &Json) -> CodecResult<Self> {
        let entries = json.as_array().ok_or_else(|| CodecError::TypeMismatch {
            field: field.name.clone(),
            expected: "array of 32-byte hex strings",
        })?;
        let hashes = entries
            .iter()
            .map(|entry| Hash256::from_json(field, entry))
            .collect::<CodecResult<Vec<_>>>()?;
        Ok(Self(hashes))
    }

    pub fn to_bytes(&self, sink: &mut BytesList) {
        for hash in &self.0 {
            hash.to_bytes(sink);
        }
    }

    pub fn to_json(&self) -> Json {
        Json::Array(self.0.iter().map(Hash256::to_json).collect())
    }
}
