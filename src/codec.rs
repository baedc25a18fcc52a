//! Codec facade
//!
//! The public operations: whole-object encode/decode plus the three signing
//! payload builders, which prepend their domain prefixes and filter down to
//! signing fields. Every call is stateless; the output buffer belongs to the
//! caller.

use serde_json::Value as Json;
use tracing::debug;

use crate::definitions::{definitions, FieldDefinition};
use crate::error::{CodecError, CodecResult};
use crate::parser::BinaryParser;
use crate::serializer::BytesList;
use crate::types::{AccountId, Amount, Hash256, StObject};
use crate::{MULTISIGNING_PREFIX, SIGNING_CLAIM_PREFIX, SIGNING_PREFIX};

/// Accepts signing fields; composed over the always-on serialized filter.
fn signing_fields(field: &FieldDefinition) -> bool {
    field.is_signing_field
}

/// Serialize a JSON object to its canonical bytes.
pub fn encode(json: &Json) -> CodecResult<Vec<u8>> {
    let object = StObject::from_json("transaction", json)?;
    let mut sink = BytesList::new();
    object.to_bytes(&mut sink)?;
    debug!(bytes = sink.len(), "encoded object");
    Ok(sink.into_bytes())
}

/// `encode`, rendered as uppercase hex.
pub fn encode_hex(json: &Json) -> CodecResult<String> {
    Ok(hex::encode_upper(encode(json)?))
}

/// Serialize the signing payload: the transaction-signing prefix followed by
/// the signing fields only.
pub fn encode_for_signing(json: &Json) -> CodecResult<Vec<u8>> {
    let object = StObject::from_json("transaction", json)?;
    let mut sink = BytesList::new();
    sink.put_u32(SIGNING_PREFIX);
    object.to_bytes_filtered(&mut sink, &signing_fields)?;
    Ok(sink.into_bytes())
}

/// Serialize the multisigning payload for one signer: the multisigning
/// prefix, the signing fields, then the signer's bare 20-byte account id.
pub fn encode_for_multisigning(json: &Json, signing_account: &str) -> CodecResult<Vec<u8>> {
    let signer = AccountId::from_address(signing_account)?;
    let object = StObject::from_json("transaction", json)?;
    let mut sink = BytesList::new();
    sink.put_u32(MULTISIGNING_PREFIX);
    object.to_bytes_filtered(&mut sink, &signing_fields)?;
    sink.put_slice(signer.as_bytes());
    Ok(sink.into_bytes())
}

/// Serialize a payment channel claim authorization: the claim prefix, the
/// 32-byte channel id, then the amount — drops as a bare 64-bit integer,
/// an issued amount in its 48-byte form.
pub fn encode_for_signing_claim(json: &Json) -> CodecResult<Vec<u8>> {
    let map = json.as_object().ok_or_else(|| CodecError::TypeMismatch {
        field: "claim".to_string(),
        expected: "object with channel and amount",
    })?;
    let missing = || CodecError::TypeMismatch {
        field: "claim".to_string(),
        expected: "object with channel and amount",
    };

    let defs = definitions();
    let channel_field = defs.field_by_name("Channel")?;
    let channel = Hash256::from_json(channel_field, map.get("channel").ok_or_else(missing)?)?;
    let amount_field = defs.field_by_name("Amount")?;
    let amount = Amount::from_json(amount_field, map.get("amount").ok_or_else(missing)?)?;

    let mut sink = BytesList::new();
    sink.put_u32(SIGNING_CLAIM_PREFIX);
    channel.to_bytes(&mut sink);
    match amount {
        Amount::Drops(drops) => sink.put_u64(drops),
        issued => issued.to_bytes(&mut sink),
    }
    Ok(sink.into_bytes())
}

/// Decode canonical hex into JSON. The buffer must hold exactly one
/// top-level object.
pub fn decode(hex_input: &str) -> CodecResult<Json> {
    let bytes = hex::decode(hex_input)?;
    let mut parser = BinaryParser::new(&bytes);
    let object = StObject::from_parser(&mut parser)?;
    debug!(bytes = bytes.len(), fields = object.fields().len(), "decoded object");
    Ok(object.to_json())
}
