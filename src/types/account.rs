//! Account identifiers
//!
//! A 20-byte account id. The JSON form is the base58-check address with the
//! ledger alphabet and a zero version byte; a 40-char hex string is accepted
//! on input. Inside objects the wire form is VL-prefixed (always length 20).

use bs58::Alphabet;
use serde_json::Value as Json;

use crate::error::{CodecError, CodecResult};
use crate::parser::BinaryParser;
use crate::serializer::BytesList;

/// Version byte prefixed to account ids before base58-check encoding.
const ACCOUNT_ID_VERSION: u8 = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    pub const WIDTH: usize = 20;

    pub fn from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        Ok(Self(parser.read_array()?))
    }

    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(Self)
    }

    /// Parse the JSON address form: base58-check, or raw 40-char hex.
    pub fn from_json(json: &Json) -> CodecResult<Self> {
        let text = json.as_str().ok_or_else(|| CodecError::InvalidAddress {
            address: json.to_string(),
        })?;
        Self::from_address(text)
    }

    pub fn from_address(text: &str) -> CodecResult<Self> {
        if text.len() == 40 && text.bytes().all(|b| b.is_ascii_hexdigit()) {
            let bytes = hex::decode(text)?;
            return Ok(Self(bytes.try_into().expect("40 hex chars is 20 bytes")));
        }
        let decoded = bs58::decode(text)
            .with_alphabet(Alphabet::RIPPLE)
            .with_check(None)
            .into_vec()
            .map_err(|_| CodecError::InvalidAddress {
                address: text.to_string(),
            })?;
        // Checksum is already stripped; what remains is version byte + id.
        if decoded.len() != 21 || decoded[0] != ACCOUNT_ID_VERSION {
            return Err(CodecError::InvalidAddress {
                address: text.to_string(),
            });
        }
        Self::from_slice(&decoded[1..]).ok_or_else(|| CodecError::InvalidAddress {
            address: text.to_string(),
        })
    }

    /// Render the base58-check address form.
    pub fn to_address(&self) -> String {
        let mut payload = [0u8; 21];
        payload[0] = ACCOUNT_ID_VERSION;
        payload[1..].copy_from_slice(&self.0);
        bs58::encode(&payload[..])
            .with_alphabet(Alphabet::RIPPLE)
            .with_check()
            .into_string()
    }

    pub fn to_bytes(&self, sink: &mut BytesList) {
        sink.put_slice(&self.0);
    }

    pub fn to_json(&self) -> Json {
        Json::String(self.to_address())
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}
