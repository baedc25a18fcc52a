//! Payment path sets
//!
//! A path set is a sequence of paths; a path is a sequence of steps. Each
//! step opens with a flag byte naming which parts are present, and the parts
//! always follow in account, currency, issuer order. `0xFF` separates paths,
//! `0x00` ends the set.

use serde_json::Value as Json;

use crate::definitions::FieldDefinition;
use crate::error::{CodecError, CodecResult};
use crate::parser::BinaryParser;
use crate::serializer::BytesList;
use crate::types::account::AccountId;
use crate::types::currency::Currency;

const STEP_ACCOUNT: u8 = 0x01;
const STEP_CURRENCY: u8 = 0x10;
const STEP_ISSUER: u8 = 0x20;

const PATH_SEPARATOR: u8 = 0xFF;
const PATH_SET_END: u8 = 0x00;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathStep {
    pub account: Option<AccountId>,
    pub currency: Option<Currency>,
    pub issuer: Option<AccountId>,
}

impl PathStep {
    fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.account.is_some() {
            flags |= STEP_ACCOUNT;
        }
        if self.currency.is_some() {
            flags |= STEP_CURRENCY;
        }
        if self.issuer.is_some() {
            flags |= STEP_ISSUER;
        }
        flags
    }

    fn from_parser(parser: &mut BinaryParser<'_>, flags: u8) -> CodecResult<Self> {
        if flags & !(STEP_ACCOUNT | STEP_CURRENCY | STEP_ISSUER) != 0 {
            return Err(CodecError::InvalidPathSet {
                reason: "unknown step flag",
            });
        }
        let mut step = Self::default();
        if flags & STEP_ACCOUNT != 0 {
            step.account = Some(AccountId::from_parser(parser)?);
        }
        if flags & STEP_CURRENCY != 0 {
            step.currency = Some(Currency::from_parser(parser)?);
        }
        if flags & STEP_ISSUER != 0 {
            step.issuer = Some(AccountId::from_parser(parser)?);
        }
        Ok(step)
    }

    fn from_json(field: &FieldDefinition, json: &Json) -> CodecResult<Self> {
        let map = json.as_object().ok_or_else(|| CodecError::TypeMismatch {
            field: field.name.clone(),
            expected: "path step object",
        })?;
        let step = Self {
            account: map.get("account").map(AccountId::from_json).transpose()?,
            currency: map
                .get("currency")
                .map(|c| Currency::from_json(field, c))
                .transpose()?,
            issuer: map.get("issuer").map(AccountId::from_json).transpose()?,
        };
        if step.flags() == 0 {
            return Err(CodecError::InvalidPathSet {
                reason: "step carries no account, currency or issuer",
            });
        }
        Ok(step)
    }

    fn to_bytes(&self, sink: &mut BytesList) {
        sink.put_u8(self.flags());
        if let Some(account) = &self.account {
            account.to_bytes(sink);
        }
        if let Some(currency) = &self.currency {
            currency.to_bytes(sink);
        }
        if let Some(issuer) = &self.issuer {
            issuer.to_bytes(sink);
        }
    }

    fn to_json(&self) -> Json {
        let mut map = serde_json::Map::new();
        if let Some(account) = &self.account {
            map.insert("account".into(), account.to_json());
        }
        if let Some(currency) = &self.currency {
            map.insert("currency".into(), currency.to_json());
        }
        if let Some(issuer) = &self.issuer {
            map.insert("issuer".into(), issuer.to_json());
        }
        Json::Object(map)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(pub Vec<PathStep>);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet(pub Vec<Path>);

impl PathSet {
    pub fn from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        let mut paths = Vec::new();
        let mut current = Path::default();
        loop {
            let marker = parser.read_u8()?;
            match marker {
                PATH_SET_END => {
                    if current.0.is_empty() {
                        return Err(CodecError::InvalidPathSet {
                            reason: "empty path before terminator",
                        });
                    }
                    paths.push(current);
                    return Ok(Self(paths));
                }
                PATH_SEPARATOR => {
                    if current.0.is_empty() {
                        return Err(CodecError::InvalidPathSet {
                            reason: "empty path before separator",
                        });
                    }
                    paths.push(std::mem::take(&mut current));
                }
                flags => current.0.push(PathStep::from_parser(parser, flags)?),
            }
        }
    }

    pub fn from_json(field: &FieldDefinition, json: &Json) -> CodecResult<Self> {
        let entries = json.as_array().ok_or_else(|| CodecError::TypeMismatch {
            field: field.name.clone(),
            expected: "array of paths",
        })?;
        if entries.is_empty() {
            return Err(CodecError::InvalidPathSet {
                reason: "path set has no paths",
            });
        }
        let mut paths = Vec::with_capacity(entries.len());
        for entry in entries {
            let steps = entry.as_array().ok_or_else(|| CodecError::TypeMismatch {
                field: field.name.clone(),
                expected: "array of path steps",
            })?;
            if steps.is_empty() {
                return Err(CodecError::InvalidPathSet {
                    reason: "path has no steps",
                });
            }
            let steps = steps
                .iter()
                .map(|step| PathStep::from_json(field, step))
                .collect::<CodecResult<Vec<_>>>()?;
            paths.push(Path(steps));
        }
        Ok(Self(paths))
    }

    pub fn to_bytes(&self, sink: &mut BytesList) {
        for (index, path) in self.0.iter().enumerate() {
            if index > 0 {
                sink.put_u8(PATH_SEPARATOR);
            }
            for step in &path.0 {
                step.to_bytes(sink);
            }
        }
        sink.put_u8(PATH_SET_END);
    }

    pub fn to_json(&self) -> Json {
        Json::Array(
            self.0
                .iter()
                .map(|path| Json::Array(path.0.iter().map(PathStep::to_json).collect()))
                .collect(),
        )
    }
}
