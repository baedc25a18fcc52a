//! Codec error types
//!
//! One error enum for both directions of the codec. Decode-side variants
//! carry the byte offset where the failure occurred; encode-side variants
//! carry the field name. Errors abort the call, partial output is dropped.

use thiserror::Error;

/// Errors produced while encoding to or decoding from the canonical binary
/// form.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    /// Field name not present in the definitions registry (encode side).
    #[error("unknown field: {name}")]
    UnknownField { name: String },

    /// Decoded wire header does not map to any serialized field.
    #[error("unknown field header (type {type_code}, field {field_code}) at offset {offset}")]
    UnknownFieldHeader {
        type_code: i32,
        field_code: i32,
        offset: usize,
    },

    /// JSON value incompatible with the field's declared type.
    #[error("field {field}: expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    /// Input hex has odd length or non-hex characters.
    #[error("malformed hex input: {0}")]
    MalformedHex(#[from] hex::FromHexError),

    /// Field header bytes violate the compact header scheme.
    #[error("malformed field header at offset {offset}")]
    MalformedHeader { offset: usize },

    /// A read advanced past the end of the buffer.
    #[error("unexpected end of input at offset {offset}: need {need} bytes, {remaining} remain")]
    UnexpectedEnd {
        offset: usize,
        need: usize,
        remaining: usize,
    },

    /// Issued amount mantissa cannot be brought into the canonical range.
    #[error("issued amount mantissa overflows the canonical range")]
    OverflowAmount,

    /// Issued amount exponent left the representable range after
    /// normalization.
    #[error("issued amount exponent {exponent} outside the representable range")]
    UnderflowAmount { exponent: i32 },

    /// Native amount negative, fractional, or above the drops ceiling.
    #[error("invalid native amount: {value}")]
    InvalidNativeAmount { value: String },

    /// Currency bytes match no canonical shape where a strict JSON form was
    /// requested.
    #[error("currency bytes do not match any canonical shape")]
    InvalidCurrencyCode,

    /// Path step with no content flags, or separator/terminator
    /// mis-sequencing.
    #[error("invalid path set: {reason}")]
    InvalidPathSet { reason: &'static str },

    /// A complete top-level object was decoded but bytes remain.
    #[error("trailing bytes after top-level object at offset {offset}")]
    UnexpectedTrailingBytes { offset: usize },

    /// Base58 account address failed to decode or carries a bad checksum.
    #[error("invalid account address: {address}")]
    InvalidAddress { address: String },

    /// A variable-length prefix opens with a reserved byte.
    #[error("invalid length prefix at offset {offset}")]
    InvalidLengthPrefix { offset: usize },

    /// A payload exceeds the encodable variable-length maximum.
    #[error("variable-length value of {length} bytes exceeds the encodable maximum")]
    LengthOutOfRange { length: usize },
}

/// Result alias used throughout the codec.
pub type CodecResult<T> = std::result::Result<T, CodecError>;
