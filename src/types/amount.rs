//! Ledger amounts
//!
//! An amount is either a native quantity of drops (a 63-bit integer) or an
//! issued-currency value carried as a signed decimal mantissa/exponent pair
//! plus currency and issuer. The wire form is one big-endian 64-bit word
//! (native) or that word followed by currency and issuer (issued):
//!
//! ```text
//! bit 63  issued flag (1 = issued, 0 = native)
//! bit 62  sign (set means positive)
//! issued: bits 54-61 exponent + 97, bits 0-53 mantissa
//! native: bits 0-61 drops magnitude
//! ```
//!
//! Issued values are parsed from decimal strings exactly — never through
//! floating point — and normalized so the mantissa lies in
//! [10^15, 10^16) with the matching exponent. Zero is the bare issued flag.

use serde_json::Value as Json;

use crate::definitions::FieldDefinition;
use crate::error::{CodecError, CodecResult};
use crate::parser::BinaryParser;
use crate::serializer::BytesList;
use crate::types::account::AccountId;
use crate::types::currency::Currency;

/// Drops ceiling: 10^17.
pub const MAX_DROPS: u64 = 100_000_000_000_000_000;

const MIN_MANTISSA: u64 = 1_000_000_000_000_000;
const MAX_MANTISSA: u64 = 9_999_999_999_999_999;
const MIN_EXPONENT: i32 = -96;
const MAX_EXPONENT: i32 = 80;
/// Stored exponent bias.
const EXPONENT_BIAS: i32 = 97;

const ISSUED_BIT: u64 = 0x8000_0000_0000_0000;
const POSITIVE_BIT: u64 = 0x4000_0000_0000_0000;
const MANTISSA_MASK: u64 = (1 << 54) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    Drops(u64),
    Issued(IssuedAmount),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuedAmount {
    /// 0, or in [10^15, 10^16).
    pub mantissa: u64,
    pub exponent: i32,
    pub negative: bool,
    pub currency: Currency,
    pub issuer: AccountId,
}

impl IssuedAmount {
    /// Normalize raw parts into the canonical mantissa range.
    ///
    /// The mantissa is only ever scaled up; parts already above the range are
    /// rejected rather than rounded, since rounding would silently change the
    /// signed value.
    pub fn from_parts(
        negative: bool,
        mut mantissa: u64,
        mut exponent: i32,
        currency: Currency,
        issuer: AccountId,
    ) -> CodecResult<Self> {
        if currency.is_xrp() {
            return Err(CodecError::InvalidCurrencyCode);
        }
        if mantissa == 0 {
            return Ok(Self {
                mantissa: 0,
                exponent: 0,
                negative: false,
                currency,
                issuer,
            });
        }
        while mantissa < MIN_MANTISSA {
            mantissa *= 10;
            exponent -= 1;
        }
        if mantissa > MAX_MANTISSA {
            return Err(CodecError::OverflowAmount);
        }
        if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
            return Err(CodecError::UnderflowAmount { exponent });
        }
        Ok(Self {
            mantissa,
            exponent,
            negative,
            currency,
            issuer,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    fn value_word(&self) -> u64 {
        if self.is_zero() {
            return ISSUED_BIT;
        }
        let mut word = ISSUED_BIT | self.mantissa;
        if !self.negative {
            word |= POSITIVE_BIT;
        }
        word |= ((self.exponent + EXPONENT_BIAS) as u64) << 54;
        word
    }

    /// Render the exact decimal value, shortest form, no exponent notation.
    pub fn value_string(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut mantissa = self.mantissa;
        let mut exponent = self.exponent;
        while mantissa % 10 == 0 {
            mantissa /= 10;
            exponent += 1;
        }
        let digits = mantissa.to_string();
        let sign = if self.negative { "-" } else { "" };
        if exponent >= 0 {
            return format!("{sign}{digits}{}", "0".repeat(exponent as usize));
        }
        // Decimal point sits `point` digits in from the left.
        let point = digits.len() as i32 + exponent;
        if point <= 0 {
            format!("{sign}0.{}{digits}", "0".repeat(-point as usize))
        } else {
            let (int_part, frac_part) = digits.split_at(point as usize);
            format!("{sign}{int_part}.{frac_part}")
        }
    }
}

impl Amount {
    pub fn from_json(field: &FieldDefinition, json: &Json) -> CodecResult<Self> {
        match json {
            Json::String(text) => Ok(Self::Drops(parse_drops(text)?)),
            Json::Object(map) => {
                let get = |key: &str| {
                    map.get(key).ok_or_else(|| CodecError::TypeMismatch {
                        field: field.name.clone(),
                        expected: "amount object with value, currency and issuer",
                    })
                };
                let currency = Currency::from_json(field, get("currency")?)?;
                let issuer = AccountId::from_json(get("issuer")?)?;
                let value = get("value")?.as_str().ok_or_else(|| CodecError::TypeMismatch {
                    field: field.name.clone(),
                    expected: "decimal string amount value",
                })?;
                let (negative, mantissa, exponent) = parse_decimal(field, value)?;
                Ok(Self::Issued(IssuedAmount::from_parts(
                    negative, mantissa, exponent, currency, issuer,
                )?))
            }
            _ => Err(CodecError::TypeMismatch {
                field: field.name.clone(),
                expected: "drops string or issued amount object",
            }),
        }
    }

    pub fn from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        let word = parser.read_u64()?;
        if word & ISSUED_BIT == 0 {
            // Native: only positive magnitudes are canonical.
            if word & POSITIVE_BIT == 0 {
                return Err(CodecError::InvalidNativeAmount {
                    value: format!("{:#018X}", word),
                });
            }
            let drops = word & !(ISSUED_BIT | POSITIVE_BIT);
            if drops > MAX_DROPS {
                return Err(CodecError::InvalidNativeAmount {
                    value: drops.to_string(),
                });
            }
            return Ok(Self::Drops(drops));
        }

        let mantissa = word & MANTISSA_MASK;
        let negative = word & POSITIVE_BIT == 0;
        let exponent = ((word >> 54) & 0xFF) as i32 - EXPONENT_BIAS;
        let currency = Currency::from_parser(parser)?;
        let issuer = AccountId::from_parser(parser)?;
        if currency.is_xrp() {
            return Err(CodecError::InvalidCurrencyCode);
        }
        if mantissa == 0 {
            // Canonical zero carries no exponent or sign bits.
            return Ok(Self::Issued(IssuedAmount {
                mantissa: 0,
                exponent: 0,
                negative: false,
                currency,
                issuer,
            }));
        }
        if !(MIN_MANTISSA..=MAX_MANTISSA).contains(&mantissa) {
            return Err(CodecError::OverflowAmount);
        }
        if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
            return Err(CodecError::UnderflowAmount { exponent });
        }
        Ok(Self::Issued(IssuedAmount {
            mantissa,
            exponent,
            negative,
            currency,
            issuer,
        }))
    }

    pub fn to_bytes(&self, sink: &mut BytesList) {
        match self {
            Self::Drops(drops) => sink.put_u64(POSITIVE_BIT | drops),
            Self::Issued(issued) => {
                sink.put_u64(issued.value_word());
                issued.currency.to_bytes(sink);
                issued.issuer.to_bytes(sink);
            }
        }
    }

    pub fn to_json(&self) -> Json {
        match self {
            Self::Drops(drops) => Json::String(drops.to_string()),
            Self::Issued(issued) => {
                let mut map = serde_json::Map::new();
                map.insert("value".into(), Json::String(issued.value_string()));
                map.insert("currency".into(), issued.currency.to_json());
                map.insert("issuer".into(), issued.issuer.to_json());
                Json::Object(map)
            }
        }
    }
}

fn parse_drops(text: &str) -> CodecResult<u64> {
    let invalid = || CodecError::InvalidNativeAmount {
        value: text.to_string(),
    };
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let drops = text.parse::<u64>().map_err(|_| invalid())?;
    if drops > MAX_DROPS {
        return Err(invalid());
    }
    Ok(drops)
}

/// Parse a decimal string exactly into (negative, mantissa digits, exponent).
///
/// Accepts an optional sign, a fractional part and `e`-notation. More than 16
/// significant digits cannot be represented and overflow; trailing zeros are
/// not significant.
fn parse_decimal(field: &FieldDefinition, text: &str) -> CodecResult<(bool, u64, i32)> {
    let mismatch = || CodecError::TypeMismatch {
        field: field.name.clone(),
        expected: "decimal string amount value",
    };

    let mut rest = text;
    let negative = match rest.as_bytes().first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let (body, exp_part) = match rest.find(['e', 'E']) {
        Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
        None => (rest, None),
    };
    let mut exponent: i32 = match exp_part {
        Some(e) => e.parse().map_err(|_| mismatch())?,
        None => 0,
    };

    let (int_part, frac_part) = match body.find('.') {
        Some(idx) => (&body[..idx], &body[idx + 1..]),
        None => (body, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(mismatch());
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(mismatch());
    }
    exponent -= frac_part.len() as i32;

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .skip_while(|b| *b == b'0')
        .collect();
    while digits.last() == Some(&b'0') {
        digits.pop();
        exponent += 1;
    }
    if digits.is_empty() {
        return Ok((false, 0, 0));
    }
    if digits.len() > 16 {
        return Err(CodecError::OverflowAmount);
    }

    let mut mantissa: u64 = 0;
    for b in digits {
        mantissa = mantissa * 10 + u64::from(b - b'0');
    }
    Ok((negative, mantissa, exponent))
}
