//! Field and enum-code registry
//!
//! Single source of truth for the wire protocol: every field name is bound to
//! its (type code, field code) position and flags here, and the transaction
//! type / ledger entry type / transaction result name tables live here too.
//! Nothing else in the crate hardcodes a wire code.
//!
//! The table is loaded once per process from an embedded JSON asset and shared
//! behind a `OnceLock`; all lookups are reads on immutable maps.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use serde::Deserialize;
use tracing::debug;

use crate::error::{CodecError, CodecResult};

static DEFINITIONS_ASSET: &str = include_str!("definitions.json");
static DEFINITIONS: OnceLock<Definitions> = OnceLock::new();

/// Wire metadata for a single named field.
///
/// Immutable after registry load; shared as `Arc` between the registry and
/// decoded objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    /// Name of the value type, e.g. `"UInt32"` or `"STObject"`.
    pub type_name: String,
    /// Numeric type code; negative codes are reserved sentinels.
    pub type_code: i32,
    /// Field code (`nth`) within the type. Pseudo-fields that never appear on
    /// the wire may carry codes outside the 1..=255 header range.
    pub field_code: i32,
    pub is_vl_encoded: bool,
    pub is_serialized: bool,
    pub is_signing_field: bool,
}

impl FieldDefinition {
    /// Canonical sort key: ascending (type code, field code).
    pub fn ordinal(&self) -> (i32, i32) {
        (self.type_code, self.field_code)
    }
}

#[derive(Deserialize)]
struct RawDefinitions {
    #[serde(rename = "TYPES")]
    types: HashMap<String, i32>,
    #[serde(rename = "LEDGER_ENTRY_TYPES")]
    ledger_entry_types: HashMap<String, i32>,
    #[serde(rename = "FIELDS")]
    fields: Vec<(String, RawField)>,
    #[serde(rename = "TRANSACTION_RESULTS")]
    transaction_results: HashMap<String, i32>,
    #[serde(rename = "TRANSACTION_TYPES")]
    transaction_types: HashMap<String, i32>,
}

#[derive(Deserialize)]
struct RawField {
    nth: i32,
    #[serde(rename = "isVLEncoded")]
    is_vl_encoded: bool,
    #[serde(rename = "isSerialized")]
    is_serialized: bool,
    #[serde(rename = "isSigningField")]
    is_signing_field: bool,
    #[serde(rename = "type")]
    type_name: String,
}

/// Bidirectional name/code table for one enum section of the asset.
#[derive(Debug, Default)]
struct EnumTable {
    by_name: HashMap<String, i32>,
    by_code: HashMap<i32, String>,
}

impl EnumTable {
    fn new(map: HashMap<String, i32>) -> Self {
        let by_code = map.iter().map(|(n, c)| (*c, n.clone())).collect();
        Self { by_name: map, by_code }
    }

    fn code(&self, name: &str) -> Option<i32> {
        self.by_name.get(name).copied()
    }

    fn name(&self, code: i32) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }
}

/// The loaded registry.
pub struct Definitions {
    fields_by_name: HashMap<String, Arc<FieldDefinition>>,
    /// Keyed by (type code, field code); only serialized fields are indexed,
    /// so bytes carrying a non-wire field fail the header lookup.
    fields_by_header: HashMap<(i32, i32), Arc<FieldDefinition>>,
    types: HashMap<String, i32>,
    transaction_types: EnumTable,
    transaction_results: EnumTable,
    ledger_entry_types: EnumTable,
}

impl Definitions {
    fn from_asset(asset: &str) -> Self {
        let raw: RawDefinitions =
            serde_json::from_str(asset).expect("embedded definitions asset is valid JSON");

        let mut fields_by_name = HashMap::with_capacity(raw.fields.len());
        let mut fields_by_header = HashMap::with_capacity(raw.fields.len());
        for (name, f) in raw.fields {
            let type_code = *raw
                .types
                .get(&f.type_name)
                .expect("field type is present in the TYPES table");
            let def = Arc::new(FieldDefinition {
                name: name.clone(),
                type_name: f.type_name,
                type_code,
                field_code: f.nth,
                is_vl_encoded: f.is_vl_encoded,
                is_serialized: f.is_serialized,
                is_signing_field: f.is_signing_field,
            });
            if def.is_serialized {
                fields_by_header.insert((type_code, f.nth), Arc::clone(&def));
            }
            fields_by_name.insert(name, def);
        }

        Self {
            fields_by_name,
            fields_by_header,
            types: raw.types,
            transaction_types: EnumTable::new(raw.transaction_types),
            transaction_results: EnumTable::new(raw.transaction_results),
            ledger_entry_types: EnumTable::new(raw.ledger_entry_types),
        }
    }

    /// Look up a field by its JSON name.
    pub fn field_by_name(&self, name: &str) -> CodecResult<&Arc<FieldDefinition>> {
        self.fields_by_name
            .get(name)
            .ok_or_else(|| CodecError::UnknownField {
                name: name.to_string(),
            })
    }

    /// Look up a field by its decoded wire header. Non-serialized fields are
    /// deliberately absent: bytes claiming such a field are rejected upstream.
    pub fn field_by_header(&self, type_code: i32, field_code: i32) -> Option<&Arc<FieldDefinition>> {
        self.fields_by_header.get(&(type_code, field_code))
    }

    /// Numeric code for a type name.
    pub fn type_code(&self, type_name: &str) -> Option<i32> {
        self.types.get(type_name).copied()
    }

    pub fn transaction_type_code(&self, name: &str) -> Option<i32> {
        self.transaction_types.code(name)
    }

    pub fn transaction_type_name(&self, code: i32) -> Option<&str> {
        self.transaction_types.name(code)
    }

    pub fn transaction_result_code(&self, name: &str) -> Option<i32> {
        self.transaction_results.code(name)
    }

    pub fn transaction_result_name(&self, code: i32) -> Option<&str> {
        self.transaction_results.name(code)
    }

    pub fn ledger_entry_type_code(&self, name: &str) -> Option<i32> {
        self.ledger_entry_types.code(name)
    }

    pub fn ledger_entry_type_name(&self, code: i32) -> Option<&str> {
        self.ledger_entry_types.name(code)
    }
}

/// Process-wide registry, loaded on first access.
pub fn definitions() -> &'static Definitions {
    DEFINITIONS.get_or_init(|| {
        let defs = Definitions::from_asset(DEFINITIONS_ASSET);
        debug!(
            fields = defs.fields_by_name.len(),
            types = defs.types.len(),
            "loaded definitions registry"
        );
        defs
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_lookup_by_name() {
        let defs = definitions();
        let f = defs.field_by_name("TransactionType").unwrap();
        assert_eq!(f.type_name, "UInt16");
        assert_eq!(f.field_code, 2);
        assert!(f.is_serialized);
        assert!(f.is_signing_field);
        assert!(!f.is_vl_encoded);
    }

    #[test]
    fn unknown_field_name_is_rejected() {
        let err = definitions().field_by_name("NotARealField").unwrap_err();
        assert!(matches!(err, CodecError::UnknownField { .. }));
    }

    #[test]
    fn header_lookup_matches_name_lookup() {
        let defs = definitions();
        let by_name = defs.field_by_name("Account").unwrap();
        let by_header = defs
            .field_by_header(by_name.type_code, by_name.field_code)
            .unwrap();
        assert_eq!(by_name, by_header);
    }

    #[test]
    fn non_serialized_fields_are_not_wire_addressable() {
        let defs = definitions();
        let hash = defs.field_by_name("hash").unwrap();
        assert!(!hash.is_serialized);
        assert!(defs
            .field_by_header(hash.type_code, hash.field_code)
            .is_none());
    }

    #[test]
    fn signature_fields_are_excluded_from_signing() {
        let defs = definitions();
        assert!(!defs.field_by_name("TxnSignature").unwrap().is_signing_field);
        assert!(!defs.field_by_name("Signers").unwrap().is_signing_field);
        assert!(defs.field_by_name("SigningPubKey").unwrap().is_signing_field);
    }

    #[test]
    fn enum_tables_invert() {
        let defs = definitions();
        assert_eq!(defs.transaction_type_code("Payment"), Some(0));
        assert_eq!(defs.transaction_type_name(0), Some("Payment"));
        assert_eq!(defs.transaction_result_code("tesSUCCESS"), Some(0));
        assert_eq!(defs.transaction_result_name(-399), Some("telLOCAL_ERROR"));
        assert_eq!(defs.ledger_entry_type_code("AccountRoot"), Some(97));
        assert_eq!(defs.ledger_entry_type_name(97), Some("AccountRoot"));
    }

    #[test]
    fn structural_type_codes() {
        let defs = definitions();
        assert_eq!(defs.type_code("STObject"), Some(14));
        assert_eq!(defs.type_code("STArray"), Some(15));
        assert_eq!(defs.type_code("Done"), Some(-1));
        assert_eq!(defs.type_code("Unknown"), Some(-2));
        assert_eq!(defs.type_code("NotPresent"), Some(0));
    }
}
