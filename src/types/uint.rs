//! Fixed-width unsigned integers
//!
//! UInt8/16/32 travel as JSON numbers; UInt64 travels as a 16-char uppercase
//! hex string (decimal strings are accepted on input). Three fields carry
//! registry enum names instead of raw numbers: `TransactionType`,
//! `LedgerEntryType` and `TransactionResult` accept their name tables on
//! input and render names on output.

use serde_json::Value as Json;

use crate::definitions::{definitions, FieldDefinition};
use crate::error::{CodecError, CodecResult};
use crate::parser::BinaryParser;
use crate::serializer::BytesList;

fn mismatch(field: &FieldDefinition, expected: &'static str) -> CodecError {
    CodecError::TypeMismatch {
        field: field.name.clone(),
        expected,
    }
}

/// Resolve a name-carrying enum field (by field name) to its numeric code.
fn enum_code(field: &FieldDefinition, name: &str) -> Option<i32> {
    let defs = definitions();
    match field.name.as_str() {
        "TransactionType" => defs.transaction_type_code(name),
        "LedgerEntryType" => defs.ledger_entry_type_code(name),
        "TransactionResult" => defs.transaction_result_code(name),
        _ => None,
    }
}

/// Inverse of `enum_code`; `None` for ordinary numeric fields or unmapped
/// codes.
fn enum_name(field: &FieldDefinition, code: i32) -> Option<&'static str> {
    let defs = definitions();
    match field.name.as_str() {
        "TransactionType" => defs.transaction_type_name(code),
        "LedgerEntryType" => defs.ledger_entry_type_name(code),
        "TransactionResult" => defs.transaction_result_name(code),
        _ => None,
    }
}

fn narrow<T: TryFrom<u64>>(field: &FieldDefinition, value: u64, expected: &'static str) -> CodecResult<T> {
    T::try_from(value).map_err(|_| mismatch(field, expected))
}

fn json_uint(field: &FieldDefinition, json: &Json, expected: &'static str) -> CodecResult<u64> {
    match json {
        Json::Number(n) => n.as_u64().ok_or_else(|| mismatch(field, expected)),
        Json::String(s) => {
            if let Some(code) = enum_code(field, s) {
                u64::try_from(code).map_err(|_| mismatch(field, expected))
            } else {
                Err(mismatch(field, expected))
            }
        }
        _ => Err(mismatch(field, expected)),
    }
}

pub fn uint8_from_json(field: &FieldDefinition, json: &Json) -> CodecResult<u8> {
    let value = json_uint(field, json, "unsigned 8-bit integer")?;
    narrow(field, value, "unsigned 8-bit integer")
}

pub fn uint16_from_json(field: &FieldDefinition, json: &Json) -> CodecResult<u16> {
    let value = json_uint(field, json, "unsigned 16-bit integer")?;
    narrow(field, value, "unsigned 16-bit integer")
}

pub fn uint32_from_json(field: &FieldDefinition, json: &Json) -> CodecResult<u32> {
    let value = json_uint(field, json, "unsigned 32-bit integer")?;
    narrow(field, value, "unsigned 32-bit integer")
}

/// UInt64 accepts a JSON number, a decimal digit string, or a hex string.
/// A 16-char string is always read as hex (the canonical output form);
/// shorter all-digit strings are read as decimal.
pub fn uint64_from_json(field: &FieldDefinition, json: &Json) -> CodecResult<u64> {
    const EXPECTED: &str = "unsigned 64-bit integer (decimal or hex string)";
    match json {
        Json::Number(n) => n.as_u64().ok_or_else(|| mismatch(field, EXPECTED)),
        Json::String(s) => {
            if s.is_empty() || s.len() > 16 {
                return Err(mismatch(field, EXPECTED));
            }
            let hex_form = s.len() == 16 || s.bytes().any(|b| !b.is_ascii_digit());
            if hex_form {
                if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(mismatch(field, EXPECTED));
                }
                u64::from_str_radix(s, 16).map_err(|_| mismatch(field, EXPECTED))
            } else {
                s.parse::<u64>().map_err(|_| mismatch(field, EXPECTED))
            }
        }
        _ => Err(mismatch(field, EXPECTED)),
    }
}

pub fn uint8_to_json(field: &FieldDefinition, value: u8) -> Json {
    enum_name(field, i32::from(value))
        .map(|name| Json::String(name.to_string()))
        .unwrap_or_else(|| Json::Number(value.into()))
}

pub fn uint16_to_json(field: &FieldDefinition, value: u16) -> Json {
    enum_name(field, i32::from(value))
        .map(|name| Json::String(name.to_string()))
        .unwrap_or_else(|| Json::Number(value.into()))
}

pub fn uint32_to_json(value: u32) -> Json {
    Json::Number(value.into())
}

pub fn uint64_to_json(value: u64) -> Json {
    Json::String(format!("{value:016X}"))
}

pub fn uint8_from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<u8> {
    parser.read_u8()
}

pub fn uint16_from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<u16> {
    parser.read_u16()
}

pub fn uint32_from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<u32> {
    parser.read_u32()
}

pub fn uint64_from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<u64> {
    parser.read_u64()
}

pub fn put_uint8(sink: &mut BytesList, value: u8) {
    sink.put_u8(value);
}

pub fn put_uint16(sink: &mut BytesList, value: u16) {
    sink.put_u16(value);
}

pub fn put_uint32(sink: &mut BytesList, value: u32) {
    sink.put_u32(value);
}

pub fn put_uint64(sink: &mut BytesList, value: u64) {
    sink.put_u64(value);
}
