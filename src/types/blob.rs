//! Arbitrary byte strings
//!
//! Blobs are VL-prefixed on the wire (the prefix is owned by the object
//! layer); JSON form is hex.

use serde_json::Value as Json;

use crate::definitions::FieldDefinition;
use crate::error::{CodecError, CodecResult};
use crate::serializer::BytesList;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob(pub Vec<u8>);

impl Blob {
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn from_json(field: &FieldDefinition, json: &Json) -> CodecResult<Self> {
        let text = json.as_str().ok_or_else(|| CodecError::TypeMismatch {
            field: field.name.clone(),
            expected: "hex string",
        })?;
        Ok(Self(hex::decode(text)?))
    }

    pub fn to_bytes(&self, sink: &mut BytesList) {
        sink.put_slice(&self.0);
    }

    pub fn to_json(&self) -> Json {
        Json::String(hex::encode_upper(&self.0))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::definitions;

    #[test]
    fn empty_blob_is_legal() {
        let field = definitions().field_by_name("SigningPubKey").unwrap();
        let blob = Blob::from_json(field, &Json::String(String::new())).unwrap();
        assert!(blob.is_empty());
        assert_eq!(blob.to_json(), Json::String(String::new()));
    }

    #[test]
    fn hex_casing_is_normalized() {
        let field = definitions().field_by_name("MemoData").unwrap();
        let blob = Blob::from_json(field, &Json::String("deadBEEF".into())).unwrap();
        assert_eq!(blob.to_json(), Json::String("DEADBEEF".into()));
    }
}
