//! Issue and issued-currency tuples
//!
//! An `Issue` names an asset: the native currency alone (20 bytes), or a
//! currency plus its issuing account (40 bytes). `IssuedCurrency` is the
//! always-40-byte variant used where the native currency is not a legal
//! value.

use serde_json::Value as Json;

use crate::definitions::FieldDefinition;
use crate::error::{CodecError, CodecResult};
use crate::parser::BinaryParser;
use crate::serializer::BytesList;
use crate::types::account::AccountId;
use crate::types::currency::Currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Issue {
    pub currency: Currency,
    /// Absent exactly when the currency is the native one.
    pub issuer: Option<AccountId>,
}

impl Issue {
    pub fn from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        let currency = Currency::from_parser(parser)?;
        let issuer = if currency.is_xrp() {
            None
        } else {
            Some(AccountId::from_parser(parser)?)
        };
        Ok(Self { currency, issuer })
    }

    pub fn from_json(field: &FieldDefinition, json: &Json) -> CodecResult<Self> {
        match json {
            Json::String(s) if s == "XRP" => Ok(Self {
                currency: Currency::XRP,
                issuer: None,
            }),
            Json::Object(map) => {
                let currency = map
                    .get("currency")
                    .ok_or_else(|| CodecError::TypeMismatch {
                        field: field.name.clone(),
                        expected: "issue object with currency",
                    })
                    .and_then(|c| Currency::from_json(field, c))?;
                if currency.is_xrp() {
                    if map.contains_key("issuer") {
                        return Err(CodecError::TypeMismatch {
                            field: field.name.clone(),
                            expected: "no issuer for the native currency",
                        });
                    }
                    return Ok(Self {
                        currency,
                        issuer: None,
                    });
                }
                let issuer = map
                    .get("issuer")
                    .ok_or_else(|| CodecError::TypeMismatch {
                        field: field.name.clone(),
                        expected: "issue object with issuer",
                    })
                    .and_then(AccountId::from_json)?;
                Ok(Self {
                    currency,
                    issuer: Some(issuer),
                })
            }
            _ => Err(CodecError::TypeMismatch {
                field: field.name.clone(),
                expected: "\"XRP\" or an issue object",
            }),
        }
    }

    pub fn to_bytes(&self, sink: &mut BytesList) {
        self.currency.to_bytes(sink);
        if let Some(issuer) = &self.issuer {
            issuer.to_bytes(sink);
        }
    }

    pub fn to_json(&self) -> Json {
        match &self.issuer {
            None => Json::String("XRP".into()),
            Some(issuer) => {
                let mut map = serde_json::Map::new();
                map.insert("currency".into(), self.currency.to_json());
                map.insert("issuer".into(), issuer.to_json());
                Json::Object(map)
            }
        }
    }
}

/// Currency plus issuer, always 40 bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuedCurrency {
    pub currency: Currency,
    pub issuer: AccountId,
}

impl IssuedCurrency {
    pub fn from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        Ok(Self {
            currency: Currency::from_parser(parser)?,
            issuer: AccountId::from_parser(parser)?,
        })
    }

    pub fn from_json(field: &FieldDefinition, json: &Json) -> CodecResult<Self> {
        let map = json.as_object().ok_or_else(|| CodecError::TypeMismatch {
            field: field.name.clone(),
            expected: "object with currency and issuer",
        })?;
        let missing = || CodecError::TypeMismatch {
            field: field.name.clone(),
            expected: "object with currency and issuer",
        };
        Ok(Self {
            currency: Currency::from_json(field, map.get("currency").ok_or_else(missing)?)?,
            issuer: AccountId::from_json(map.get("issuer").ok_or_else(missing)?)?,
        })
    }

    pub fn to_bytes(&self, sink: &mut BytesList) {
        self.currency.to_bytes(sink);
        self.issuer.to_bytes(sink);
    }

    pub fn to_json(&self) -> Json {
        let mut map = serde_json::Map::new();
        map.insert("currency".into(), self.currency.to_json());
        map.insert("issuer".into(), self.issuer.to_json());
        Json::Object(map)
    }
}
