//! Structured objects
//!
//! The composite that drives the codec. An `StObject` holds
//! (field definition, value) pairs in canonical order — ascending
//! (type code, field code) — which is the only ordering rule on the encode
//! side. JSON key order never matters.
//!
//! Wire protocol per field: header, then either the VL-prefixed value bytes
//! or the raw value bytes. A nested object is closed by the object end
//! marker; the top-level object is closed by the end of the buffer.

use std::sync::Arc;

use serde_json::Value as Json;

use crate::definitions::{definitions, FieldDefinition};
use crate::error::{CodecError, CodecResult};
use crate::field_header::encode_header;
use crate::parser::BinaryParser;
use crate::serializer::BytesList;
use crate::types::SerializedValue;

/// Field acceptance predicate used when serializing.
pub type FieldFilter<'a> = &'a dyn Fn(&FieldDefinition) -> bool;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StObject {
    fields: Vec<(Arc<FieldDefinition>, SerializedValue)>,
}

fn object_end_marker() -> &'static Arc<FieldDefinition> {
    definitions()
        .field_by_name("ObjectEndMarker")
        .expect("registry defines the object end marker")
}

impl StObject {
    pub fn fields(&self) -> &[(Arc<FieldDefinition>, SerializedValue)] {
        &self.fields
    }

    /// Build from a JSON object. Unknown keys are rejected; known fields the
    /// registry marks non-serialized are dropped, since they can never reach
    /// the wire. Fields are stored canonically sorted regardless of input
    /// order.
    pub fn from_json(field_name: &str, json: &Json) -> CodecResult<Self> {
        let map = json.as_object().ok_or_else(|| CodecError::TypeMismatch {
            field: field_name.to_string(),
            expected: "object",
        })?;
        let defs = definitions();
        let mut fields = Vec::with_capacity(map.len());
        for (key, value) in map {
            let field = defs.field_by_name(key)?;
            if !field.is_serialized {
                continue;
            }
            fields.push((Arc::clone(field), SerializedValue::from_json(field, value)?));
        }
        fields.sort_by_key(|(field, _)| field.ordinal());
        Ok(Self { fields })
    }

    /// Decode a top-level object: fields until the buffer ends. An object
    /// end marker at this level means the stream continues past the logical
    /// object and is rejected.
    pub fn from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        Self::decode(parser, false)
    }

    /// Decode a nested object: fields until the object end marker.
    pub(crate) fn from_parser_nested(parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        Self::decode(parser, true)
    }

    fn decode(parser: &mut BinaryParser<'_>, nested: bool) -> CodecResult<Self> {
        let defs = definitions();
        let end_marker = object_end_marker().ordinal();
        let mut fields = Vec::new();
        loop {
            if !nested && parser.end() {
                break;
            }
            let header_offset = parser.offset();
            let (type_code, field_code) = parser.read_field_header()?;
            if (type_code, field_code) == end_marker {
                if nested {
                    break;
                }
                return Err(CodecError::UnexpectedTrailingBytes {
                    offset: header_offset,
                });
            }
            let field = defs
                .field_by_header(type_code, field_code)
                .ok_or(CodecError::UnknownFieldHeader {
                    type_code,
                    field_code,
                    offset: header_offset,
                })?;
            let value = SerializedValue::from_parser(field, parser)?;
            fields.push((Arc::clone(field), value));
        }
        Ok(Self { fields })
    }

    /// Serialize every serialized field in canonical order.
    pub fn to_bytes(&self, sink: &mut BytesList) -> CodecResult<()> {
        self.to_bytes_filtered(sink, &|_| true)
    }

    /// Serialize with an extra acceptance predicate composed over the
    /// always-on `is_serialized` filter. The predicate applies to this
    /// object's own fields; nested composites always serialize in full.
    pub fn to_bytes_filtered(&self, sink: &mut BytesList, accept: FieldFilter<'_>) -> CodecResult<()> {
        for (field, value) in &self.fields {
            if !field.is_serialized || !accept(field) {
                continue;
            }
            sink.put_slice(&encode_header(field.type_code, field.field_code)?);
            if field.is_vl_encoded {
                let mut payload = BytesList::new();
                value.to_bytes(&mut payload)?;
                sink.put_vl(payload.as_slice())?;
            } else {
                value.to_bytes(sink)?;
                if matches!(value, SerializedValue::Object(_)) {
                    let marker = object_end_marker();
                    sink.put_slice(&encode_header(marker.type_code, marker.field_code)?);
                }
            }
        }
        Ok(())
    }

    /// Render as JSON, fields in stored (wire) order.
    pub fn to_json(&self) -> Json {
        let mut map = serde_json::Map::new();
        for (field, value) in &self.fields {
            map.insert(field.name.clone(), value.to_json(field));
        }
        Json::Object(map)
    }
}
