//! Structured arrays
//!
//! An array is an ordered list of single-field wrapper objects, e.g.
//! `[{"Memo": {...}}, {"Memo": {...}}]`. Element order is preserved as
//! given — arrays are never sorted. On the wire each element is its member
//! field header, the inner object's fields, and the object end marker; the
//! array end marker closes the list.

use std::sync::Arc;

use serde_json::Value as Json;

use crate::definitions::{definitions, FieldDefinition};
use crate::error::{CodecError, CodecResult};
use crate::field_header::encode_header;
use crate::parser::BinaryParser;
use crate::serializer::BytesList;
use crate::types::stobject::StObject;

fn array_end_marker() -> &'static Arc<FieldDefinition> {
    definitions()
        .field_by_name("ArrayEndMarker")
        .expect("registry defines the array end marker")
}

fn object_end_marker() -> &'static Arc<FieldDefinition> {
    definitions()
        .field_by_name("ObjectEndMarker")
        .expect("registry defines the object end marker")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StArray {
    elements: Vec<(Arc<FieldDefinition>, StObject)>,
}

impl StArray {
    pub fn elements(&self) -> &[(Arc<FieldDefinition>, StObject)] {
        &self.elements
    }

    pub fn from_json(field: &FieldDefinition, json: &Json) -> CodecResult<Self> {
        let entries = json.as_array().ok_or_else(|| CodecError::TypeMismatch {
            field: field.name.clone(),
            expected: "array of single-field objects",
        })?;
        let defs = definitions();
        let mut elements = Vec::with_capacity(entries.len());
        for entry in entries {
            let wrapper = entry.as_object().ok_or_else(|| CodecError::TypeMismatch {
                field: field.name.clone(),
                expected: "array of single-field objects",
            })?;
            if wrapper.len() != 1 {
                return Err(CodecError::TypeMismatch {
                    field: field.name.clone(),
                    expected: "exactly one member field per element",
                });
            }
            let (name, inner) = wrapper.iter().next().expect("one entry");
            let member = defs.field_by_name(name)?;
            if member.type_name != "STObject" {
                return Err(CodecError::TypeMismatch {
                    field: member.name.clone(),
                    expected: "an object-typed array member",
                });
            }
            elements.push((Arc::clone(member), StObject::from_json(name, inner)?));
        }
        Ok(Self { elements })
    }

    pub fn from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        let defs = definitions();
        let end_marker = array_end_marker().ordinal();
        let mut elements = Vec::new();
        loop {
            let header_offset = parser.offset();
            let (type_code, field_code) = parser.read_field_header()?;
            if (type_code, field_code) == end_marker {
                return Ok(Self { elements });
            }
            let member = defs
                .field_by_header(type_code, field_code)
                .ok_or(CodecError::UnknownFieldHeader {
                    type_code,
                    field_code,
                    offset: header_offset,
                })?;
            if member.type_name != "STObject" {
                return Err(CodecError::UnknownFieldHeader {
                    type_code,
                    field_code,
                    offset: header_offset,
                });
            }
            let inner = StObject::from_parser_nested(parser)?;
            elements.push((Arc::clone(member), inner));
        }
    }

    pub fn to_bytes(&self, sink: &mut BytesList) -> CodecResult<()> {
        let object_end = object_end_marker();
        for (member, inner) in &self.elements {
            sink.put_slice(&encode_header(member.type_code, member.field_code)?);
            inner.to_bytes(sink)?;
            sink.put_slice(&encode_header(object_end.type_code, object_end.field_code)?);
        }
        let array_end = array_end_marker();
        sink.put_slice(&encode_header(array_end.type_code, array_end.field_code)?);
        Ok(())
    }

    pub fn to_json(&self) -> Json {
        Json::Array(
            self.elements
                .iter()
                .map(|(member, inner)| {
                    let mut wrapper = serde_json::Map::new();
                    wrapper.insert(member.name.clone(), inner.to_json());
                    Json::Object(wrapper)
                })
                .collect(),
        )
    }
}
