//! Currency codes
//!
//! 160-bit currency values with three canonical shapes:
//!
//! - the native currency: 20 zero bytes, JSON `"XRP"`
//! - a standard 3-char code: 12 zero bytes, 3 ASCII chars, 5 zero bytes
//! - anything else: raw 20 bytes, JSON as 40-char hex
//!
//! Classification is done from the bytes alone; there is no side table.

use serde_json::Value as Json;

use crate::definitions::FieldDefinition;
use crate::error::{CodecError, CodecResult};
use crate::parser::BinaryParser;
use crate::serializer::BytesList;

/// Offset of the 3-char code within the standard layout.
const ISO_OFFSET: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency(pub [u8; 20]);

fn is_iso_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"?!@#$%^&*<>(){}[]|".contains(&b)
}

impl Currency {
    pub const WIDTH: usize = 20;

    /// The native currency: all-zero bytes.
    pub const XRP: Currency = Currency([0u8; 20]);

    pub fn from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        Ok(Self(parser.read_array()?))
    }

    pub fn is_xrp(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// The 3-char code, when the bytes match the standard layout exactly
    /// (zero padding intact, all three chars allowed).
    pub fn iso(&self) -> Option<String> {
        if self.is_xrp() {
            return None;
        }
        let (head, rest) = self.0.split_at(ISO_OFFSET);
        let (code, tail) = rest.split_at(3);
        if head.iter().any(|&b| b != 0) || tail.iter().any(|&b| b != 0) {
            return None;
        }
        if !code.iter().copied().all(is_iso_char) {
            return None;
        }
        // "XRP" is reserved for the all-zero form; spelled out it is not a
        // standard code.
        if code == b"XRP" {
            return None;
        }
        Some(String::from_utf8(code.to_vec()).expect("ISO chars are ASCII"))
    }

    pub fn from_json(field: &FieldDefinition, json: &Json) -> CodecResult<Self> {
        let text = json.as_str().ok_or_else(|| CodecError::TypeMismatch {
            field: field.name.clone(),
            expected: "currency code string",
        })?;
        Self::from_code(text)
    }

    pub fn from_code(text: &str) -> CodecResult<Self> {
        if text == "XRP" {
            return Ok(Self::XRP);
        }
        if text.len() == 3 {
            let code = text.as_bytes();
            if !code.iter().copied().all(is_iso_char) {
                return Err(CodecError::InvalidCurrencyCode);
            }
            let mut bytes = [0u8; 20];
            bytes[ISO_OFFSET..ISO_OFFSET + 3].copy_from_slice(code);
            return Ok(Self(bytes));
        }
        if text.len() == 40 {
            let bytes = hex::decode(text)?;
            return Ok(Self(bytes.try_into().expect("40 hex chars is 20 bytes")));
        }
        Err(CodecError::InvalidCurrencyCode)
    }

    pub fn to_bytes(&self, sink: &mut BytesList) {
        sink.put_slice(&self.0);
    }

    pub fn to_json(&self) -> Json {
        if self.is_xrp() {
            return Json::String("XRP".into());
        }
        match self.iso() {
            Some(code) => Json::String(code),
            None => Json::String(hex::encode_upper(self.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_code_layout() {
        let usd = Currency::from_code("USD").unwrap();
        let mut expected = [0u8; 20];
        expected[12..15].copy_from_slice(b"USD");
        assert_eq!(usd.0, expected);
        assert_eq!(usd.to_json(), Json::String("USD".into()));
    }

    #[test]
    fn xrp_is_all_zero() {
        let xrp = Currency::from_code("XRP").unwrap();
        assert_eq!(xrp.0, [0u8; 20]);
        assert!(xrp.is_xrp());
        assert_eq!(xrp.to_json(), Json::String("XRP".into()));
    }

    #[test]
    fn nonstandard_bytes_render_as_hex() {
        let raw = "0158415500000000C1F76FF6ECB0BAC600000000";
        let currency = Currency::from_code(raw).unwrap();
        assert!(currency.iso().is_none());
        assert_eq!(currency.to_json(), Json::String(raw.into()));
    }

    #[test]
    fn dirty_padding_disqualifies_iso_form() {
        let mut bytes = [0u8; 20];
        bytes[12..15].copy_from_slice(b"USD");
        bytes[19] = 1;
        assert!(Currency(bytes).iso().is_none());
        assert!(matches!(Currency(bytes).to_json(), Json::String(s) if s.len() == 40));
    }

    #[test]
    fn spelled_out_xrp_layout_is_not_iso() {
        let mut bytes = [0u8; 20];
        bytes[12..15].copy_from_slice(b"XRP");
        assert!(Currency(bytes).iso().is_none());
        assert!(matches!(Currency(bytes).to_json(), Json::String(s) if s.len() == 40));
    }

    #[test]
    fn invalid_code_strings_rejected() {
        assert!(matches!(
            Currency::from_code("US~").unwrap_err(),
            CodecError::InvalidCurrencyCode
        ));
        assert!(matches!(
            Currency::from_code("USDX").unwrap_err(),
            CodecError::InvalidCurrencyCode
        ));
    }
}
