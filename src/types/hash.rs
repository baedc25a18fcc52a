//! Fixed-width hash values
//!
//! Hash128 / Hash160 / Hash256 are exact-width byte strings. JSON form is
//! hex, case-insensitive in, uppercase out.

use serde_json::Value as Json;

use crate::definitions::FieldDefinition;
use crate::error::{CodecError, CodecResult};
use crate::parser::BinaryParser;
use crate::serializer::BytesList;

macro_rules! fixed_hash {
    ($(#[$doc:meta])* $name:ident, $width:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub [u8; $width]);

        impl $name {
            pub const WIDTH: usize = $width;

            pub fn from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
                Ok(Self(parser.read_array()?))
            }

            pub fn from_json(field: &FieldDefinition, json: &Json) -> CodecResult<Self> {
                let text = json.as_str().ok_or_else(|| CodecError::TypeMismatch {
                    field: field.name.clone(),
                    expected: "hex string",
                })?;
                let bytes = hex::decode(text)?;
                let bytes: [u8; $width] =
                    bytes.try_into().map_err(|_| CodecError::TypeMismatch {
                        field: field.name.clone(),
                        expected: concat!(stringify!($width), "-byte hex string"),
                    })?;
                Ok(Self(bytes))
            }

            pub fn to_bytes(&self, sink: &mut BytesList) {
                sink.put_slice(&self.0);
            }

            pub fn to_json(&self) -> Json {
                Json::String(hex::encode_upper(self.0))
            }

            pub fn as_bytes(&self) -> &[u8; $width] {
                &self.0
            }
        }
    };
}

fixed_hash!(
    /// 128-bit hash (e.g. `EmailHash`).
    Hash128,
    16
);
fixed_hash!(
    /// 160-bit hash (currency and issuer projections in order books).
    Hash160,
    20
);
fixed_hash!(
    /// 256-bit hash (ledger object keys, transaction ids, channels).
    Hash256,
    32
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::definitions;

    #[test]
    fn hash256_roundtrip() {
        let field = definitions().field_by_name("PreviousTxnID").unwrap();
        let hex_in = "e3fe6ea3d48f0c2b639448020ea4f03d4f4f8ffdb243a852a0f59177921b4879";
        let value = Hash256::from_json(field, &Json::String(hex_in.into())).unwrap();
        assert_eq!(value.to_json(), Json::String(hex_in.to_uppercase()));

        let mut sink = BytesList::new();
        value.to_bytes(&mut sink);
        let bytes = sink.into_bytes();
        assert_eq!(bytes.len(), 32);
        let mut parser = BinaryParser::new(&bytes);
        assert_eq!(Hash256::from_parser(&mut parser).unwrap(), value);
    }

    #[test]
    fn wrong_width_rejected() {
        let field = definitions().field_by_name("EmailHash").unwrap();
        let err = Hash128::from_json(field, &Json::String("AB".repeat(20))).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn odd_hex_is_malformed() {
        let field = definitions().field_by_name("Channel").unwrap();
        let err = Hash256::from_json(field, &Json::String("ABC".into())).unwrap_err();
        assert!(matches!(err, CodecError::MalformedHex(_)));
    }
}
