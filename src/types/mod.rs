//! Typed value codecs
//!
//! One module per value kind, plus the `SerializedValue` tagged union that
//! the object layer dispatches through. The union is closed over the type
//! names the registry can declare; adding a ledger field is a data change,
//! adding a value kind is a new variant here.

pub mod account;
pub mod amount;
pub mod blob;
pub mod currency;
pub mod hash;
pub mod issue;
pub mod path_set;
pub mod starray;
pub mod stobject;
pub mod uint;
pub mod vector256;
pub mod xchain_bridge;

pub use account::AccountId;
pub use amount::{Amount, IssuedAmount};
pub use blob::Blob;
pub use currency::Currency;
pub use hash::{Hash128, Hash160, Hash256};
pub use issue::{Issue, IssuedCurrency};
pub use path_set::{Path, PathSet, PathStep};
pub use starray::StArray;
pub use stobject::StObject;
pub use vector256::Vector256;
pub use xchain_bridge::XChainBridge;

use serde_json::Value as Json;

use crate::definitions::FieldDefinition;
use crate::error::{CodecError, CodecResult};
use crate::parser::BinaryParser;
use crate::serializer::BytesList;

/// A decoded or to-be-encoded value, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializedValue {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Hash128(Hash128),
    Hash160(Hash160),
    Hash256(Hash256),
    AccountId(AccountId),
    Currency(Currency),
    Amount(Amount),
    Blob(Blob),
    Issue(Issue),
    IssuedCurrency(IssuedCurrency),
    Vector256(Vector256),
    PathSet(PathSet),
    XChainBridge(XChainBridge),
    Object(StObject),
    Array(StArray),
}

impl SerializedValue {
    /// Convert a JSON value into the field's declared type.
    pub fn from_json(field: &FieldDefinition, json: &Json) -> CodecResult<Self> {
        let value = match field.type_name.as_str() {
            "UInt8" => Self::UInt8(uint::uint8_from_json(field, json)?),
            "UInt16" => Self::UInt16(uint::uint16_from_json(field, json)?),
            "UInt32" => Self::UInt32(uint::uint32_from_json(field, json)?),
            "UInt64" => Self::UInt64(uint::uint64_from_json(field, json)?),
            "Hash128" => Self::Hash128(Hash128::from_json(field, json)?),
            "Hash160" => Self::Hash160(Hash160::from_json(field, json)?),
            "Hash256" => Self::Hash256(Hash256::from_json(field, json)?),
            "AccountID" => Self::AccountId(AccountId::from_json(json)?),
            "Currency" => Self::Currency(Currency::from_json(field, json)?),
            "Amount" => Self::Amount(Amount::from_json(field, json)?),
            "Blob" => Self::Blob(Blob::from_json(field, json)?),
            "Issue" => Self::Issue(Issue::from_json(field, json)?),
            "IssuedCurrency" => Self::IssuedCurrency(IssuedCurrency::from_json(field, json)?),
            "Vector256" => Self::Vector256(Vector256::from_json(field, json)?),
            "PathSet" => Self::PathSet(PathSet::from_json(field, json)?),
            "XChainBridge" => Self::XChainBridge(XChainBridge::from_json(field, json)?),
            "STObject" => Self::Object(StObject::from_json(&field.name, json)?),
            "STArray" => Self::Array(StArray::from_json(field, json)?),
            _ => {
                return Err(CodecError::TypeMismatch {
                    field: field.name.clone(),
                    expected: "a serializable field type",
                })
            }
        };
        Ok(value)
    }

    /// Parse the field's value at the parser cursor. VL-encoded fields carry
    /// their length prefix here; everything else is fixed-width or
    /// self-framing.
    pub fn from_parser(field: &FieldDefinition, parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        if field.is_vl_encoded {
            let bytes = parser.read_vl_bytes()?;
            return Self::from_vl_slice(field, bytes);
        }
        let value = match field.type_name.as_str() {
            "UInt8" => Self::UInt8(uint::uint8_from_parser(parser)?),
            "UInt16" => Self::UInt16(uint::uint16_from_parser(parser)?),
            "UInt32" => Self::UInt32(uint::uint32_from_parser(parser)?),
            "UInt64" => Self::UInt64(uint::uint64_from_parser(parser)?),
            "Hash128" => Self::Hash128(Hash128::from_parser(parser)?),
            "Hash160" => Self::Hash160(Hash160::from_parser(parser)?),
            "Hash256" => Self::Hash256(Hash256::from_parser(parser)?),
            "AccountID" => Self::AccountId(AccountId::from_parser(parser)?),
            "Currency" => Self::Currency(Currency::from_parser(parser)?),
            "Amount" => Self::Amount(Amount::from_parser(parser)?),
            "Issue" => Self::Issue(Issue::from_parser(parser)?),
            "IssuedCurrency" => Self::IssuedCurrency(IssuedCurrency::from_parser(parser)?),
            "PathSet" => Self::PathSet(PathSet::from_parser(parser)?),
            "XChainBridge" => Self::XChainBridge(XChainBridge::from_parser(field, parser)?),
            "STObject" => Self::Object(StObject::from_parser_nested(parser)?),
            "STArray" => Self::Array(StArray::from_parser(parser)?),
            _ => {
                return Err(CodecError::TypeMismatch {
                    field: field.name.clone(),
                    expected: "a wire-decodable field type",
                })
            }
        };
        Ok(value)
    }

    /// Interpret the payload of a VL-encoded field.
    fn from_vl_slice(field: &FieldDefinition, bytes: &[u8]) -> CodecResult<Self> {
        match field.type_name.as_str() {
            "Blob" => Ok(Self::Blob(Blob::from_slice(bytes))),
            "AccountID" => AccountId::from_slice(bytes).map(Self::AccountId).ok_or_else(|| {
                CodecError::TypeMismatch {
                    field: field.name.clone(),
                    expected: "20-byte account payload",
                }
            }),
            "Vector256" => Ok(Self::Vector256(Vector256::from_slice(field, bytes)?)),
            _ => Err(CodecError::TypeMismatch {
                field: field.name.clone(),
                expected: "a VL-encodable field type",
            }),
        }
    }

    /// Append the canonical value bytes, without header or length prefix.
    pub fn to_bytes(&self, sink: &mut BytesList) -> CodecResult<()> {
        match self {
            Self::UInt8(v) => uint::put_uint8(sink, *v),
            Self::UInt16(v) => uint::put_uint16(sink, *v),
            Self::UInt32(v) => uint::put_uint32(sink, *v),
            Self::UInt64(v) => uint::put_uint64(sink, *v),
            Self::Hash128(v) => v.to_bytes(sink),
            Self::Hash160(v) => v.to_bytes(sink),
            Self::Hash256(v) => v.to_bytes(sink),
            Self::AccountId(v) => v.to_bytes(sink),
            Self::Currency(v) => v.to_bytes(sink),
            Self::Amount(v) => v.to_bytes(sink),
            Self::Blob(v) => v.to_bytes(sink),
            Self::Issue(v) => v.to_bytes(sink),
            Self::IssuedCurrency(v) => v.to_bytes(sink),
            Self::Vector256(v) => v.to_bytes(sink),
            Self::PathSet(v) => v.to_bytes(sink),
            Self::XChainBridge(v) => v.to_bytes(sink)?,
            Self::Object(v) => v.to_bytes(sink)?,
            Self::Array(v) => v.to_bytes(sink)?,
        }
        Ok(())
    }

    /// Render the JSON form. The field gives enum-named integers their name
    /// tables.
    pub fn to_json(&self, field: &FieldDefinition) -> Json {
        match self {
            Self::UInt8(v) => uint::uint8_to_json(field, *v),
            Self::UInt16(v) => uint::uint16_to_json(field, *v),
            Self::UInt32(v) => uint::uint32_to_json(*v),
            Self::UInt64(v) => uint::uint64_to_json(*v),
            Self::Hash128(v) => v.to_json(),
            Self::Hash160(v) => v.to_json(),
            Self::Hash256(v) => v.to_json(),
            Self::AccountId(v) => v.to_json(),
            Self::Currency(v) => v.to_json(),
            Self::Amount(v) => v.to_json(),
            Self::Blob(v) => v.to_json(),
            Self::Issue(v) => v.to_json(),
            Self::IssuedCurrency(v) => v.to_json(),
            Self::Vector256(v) => v.to_json(),
            Self::PathSet(v) => v.to_json(),
            Self::XChainBridge(v) => v.to_json(),
            Self::Object(v) => v.to_json(),
            Self::Array(v) => v.to_json(),
        }
    }
}
