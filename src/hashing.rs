//! Hashing helpers
//!
//! The ledger identifies binary payloads by the first half of a SHA-512
//! digest, with a four-byte domain prefix keeping transaction ids, signing
//! payloads and inner nodes in separate hash domains.

use sha2::{Digest, Sha512};

use crate::TRANSACTION_ID_PREFIX;

/// Full SHA-512 digest.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&Sha512::digest(data));
    out
}

/// First 32 bytes of the SHA-512 digest.
pub fn sha512_half(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha512::digest(data)[..32]);
    out
}

/// Transaction id of a fully-signed serialized transaction.
pub fn transaction_id(blob: &[u8]) -> [u8; 32] {
    let mut hasher = Sha512::new();
    hasher.update(TRANSACTION_ID_PREFIX.to_be_bytes());
    hasher.update(blob);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize()[..32]);
    out
}
