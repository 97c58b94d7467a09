// crates/interview-orchestrator-core/src/core/hashing.rs
// ============================================================================
// Module: Contract Digests
// Description: RFC 8785 canonical JSON digests for contract envelopes.
// Purpose: Let two services agree on an engine response byte-for-byte.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Envelopes are canonicalized with JCS (RFC 8785) before hashing so that key
//! order and number formatting never change the digest. Only SHA-256 is
//! offered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Digest
// ============================================================================

/// Canonical content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDigest {
    /// Algorithm label (always `sha256`).
    pub algorithm: String,
    /// Lowercase hex digest.
    pub value: String,
}

/// Errors raised while canonicalizing a value.
#[derive(Debug, Error)]
pub enum DigestError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns RFC 8785 canonical JSON bytes for a value.
///
/// # Errors
///
/// Returns [`DigestError::Canonicalization`] when serialization fails (for
/// example on non-finite floats).
pub fn canonical_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, DigestError> {
    serde_jcs::to_vec(value).map_err(|err| DigestError::Canonicalization(err.to_string()))
}

/// Returns the SHA-256 digest of a value's canonical JSON.
///
/// # Errors
///
/// Returns [`DigestError::Canonicalization`] when serialization fails.
pub fn canonical_digest<T: Serialize + ?Sized>(value: &T) -> Result<ContentDigest, DigestError> {
    let bytes = canonical_json_bytes(value)?;
    let digest = Sha256::digest(&bytes);
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    Ok(ContentDigest {
        algorithm: "sha256".to_string(),
        value: hex,
    })
}
