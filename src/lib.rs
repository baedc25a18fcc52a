//! Canonical binary codec for XRP Ledger-style transactions and ledger
//! objects.
//!
//! The codec translates between the JSON form of ledger objects and the
//! strict byte layout used for hashing, signing and wire transport. The
//! byte form is canonical: one logical value has exactly one encoding, so
//! independent implementations agree on signatures and transaction ids.
//!
//! The crate is organized the way the wire format is layered:
//!
//! - [`definitions`] — the data-driven registry binding field names to
//!   (type code, field code) positions and flags; the single source of
//!   truth for both directions.
//! - [`field_header`] — the compact header written before every field.
//! - [`parser`] / [`serializer`] — the byte cursor and the append-only
//!   sink, including the 1/2/3-byte variable-length scheme.
//! - [`types`] — one codec per value kind, from fixed-width integers to
//!   path sets and cross-chain bridges, with the `StObject` / `StArray`
//!   composites on top.
//! - [`codec`] — the public operations: `encode`, `decode` and the
//!   domain-prefixed signing payload builders.
//! - [`hashing`] — SHA-512-half and transaction ids.
//!
//! Everything is stateless per call; the registry is an immutable
//! process-wide table, so any number of threads may encode and decode
//! concurrently without synchronization.

pub mod codec;
pub mod definitions;
pub mod error;
pub mod field_header;
pub mod hashing;
pub mod parser;
pub mod serializer;
pub mod types;

pub use codec::{
    decode, encode, encode_for_multisigning, encode_for_signing, encode_for_signing_claim,
    encode_hex,
};
pub use error::{CodecError, CodecResult};
pub use hashing::{sha512, sha512_half, transaction_id};
pub use types::{SerializedValue, StArray, StObject};

/// Domain prefix for single-signature signing payloads (`STX\0`).
pub const SIGNING_PREFIX: u32 = 0x5354_5800;

/// Domain prefix for multisigning payloads (`SMT\0`).
pub const MULTISIGNING_PREFIX: u32 = 0x534D_5400;

/// Domain prefix for payment channel claim authorizations (`CLM\0`).
pub const SIGNING_CLAIM_PREFIX: u32 = 0x434C_4D00;

/// Domain prefix under which transaction ids are hashed (`TXN\0`).
pub const TRANSACTION_ID_PREFIX: u32 = 0x5458_4E00;
