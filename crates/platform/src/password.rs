//! Password Digest Computation and Verification
//!
//! Two digest schemes coexist behind one stored format:
//! - `LegacySha256`: unsalted SHA-256 hex, byte-compatible with rows written
//!   by the historical store. Deterministic by construction. Known security
//!   weakness (no salt, no work factor); kept only so existing rows keep
//!   verifying. See [`PasswordDigest::needs_rehash`].
//! - `Argon2id`: salted, memory-hard hashing in PHC string format with an
//!   optional pepper. The target scheme for migrated rows.
//!
//! The stored string is self-describing (PHC strings start with `$`), so
//! verification never needs to know which scheme wrote the row.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Digest computation errors
#[derive(Debug, Error)]
pub enum DigestError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization.
///
/// Strength rules live with the account domain's validator; this type only
/// guarantees the plaintext is erased from memory when dropped and never
/// printed. Does not implement `Clone`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Digest Schemes
// ============================================================================

/// Scheme used when writing a new digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestScheme {
    /// Unsalted SHA-256 hex. Store-compatible and deterministic; weak.
    #[default]
    LegacySha256,
    /// Salted Argon2id in PHC string format.
    Argon2id,
}

// ============================================================================
// Password Digest (stored form)
// ============================================================================

/// One-way credential digest as stored in the database.
///
/// Safe to store and log; never reversible to the plaintext.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Compute a digest for storage under the given scheme.
    ///
    /// The legacy scheme hashes the raw plaintext bytes and ignores the
    /// pepper so its output stays identical to historical rows. Argon2id
    /// mixes the pepper in as the hashing secret when one is supplied.
    pub fn compute(
        plaintext: &ClearTextPassword,
        scheme: DigestScheme,
        pepper: Option<&[u8]>,
    ) -> Result<Self, DigestError> {
        match scheme {
            DigestScheme::LegacySha256 => Ok(Self(legacy_sha256_hex(plaintext.as_str()))),
            DigestScheme::Argon2id => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = argon2_instance(pepper)?
                    .hash_password(plaintext.as_str().as_bytes(), &salt)
                    .map_err(|e| DigestError::HashingFailed(e.to_string()))?;
                Ok(Self(hash.to_string()))
            }
        }
    }

    /// Wrap a digest read back from the store.
    pub fn from_stored(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// The stored string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Scheme this digest was written under, detected from its format.
    pub fn scheme(&self) -> DigestScheme {
        if self.0.starts_with('$') {
            DigestScheme::Argon2id
        } else {
            DigestScheme::LegacySha256
        }
    }

    /// Verify a plaintext against this digest.
    ///
    /// Legacy digests are recomputed and compared; Argon2id digests go
    /// through the PHC verifier. The pepper must match the one used at
    /// compute time for Argon2id digests.
    pub fn verify(&self, plaintext: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        match self.scheme() {
            DigestScheme::LegacySha256 => self.0 == legacy_sha256_hex(plaintext.as_str()),
            DigestScheme::Argon2id => {
                let Ok(hash) = PasswordHash::new(&self.0) else {
                    return false;
                };
                let Ok(argon2) = argon2_instance(pepper) else {
                    return false;
                };
                argon2
                    .verify_password(plaintext.as_str().as_bytes(), &hash)
                    .is_ok()
            }
        }
    }

    /// Whether this digest was written under a scheme other than `active`
    /// and should be recomputed on the next successful verification.
    pub fn needs_rehash(&self, active: DigestScheme) -> bool {
        self.scheme() != active
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("digest", &"[HASH]")
            .finish()
    }
}

fn legacy_sha256_hex(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}

fn argon2_instance(pepper: Option<&[u8]>) -> Result<Argon2<'_>, DigestError> {
    match pepper {
        None => Ok(Argon2::default()),
        Some(secret) => Argon2::new_with_secret(
            secret,
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| DigestError::HashingFailed(e.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
