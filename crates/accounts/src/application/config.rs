//! Directory Configuration

use platform::password::DigestScheme;

/// Account directory configuration
#[derive(Debug, Clone, Default)]
pub struct DirectoryConfig {
    /// Scheme used when writing new password digests.
    ///
    /// Defaults to the legacy deterministic scheme so digests stay
    /// byte-compatible with rows the historical store wrote.
    pub digest_scheme: DigestScheme,
    /// Optional application-wide secret mixed into Argon2id digests
    pub password_pepper: Option<Vec<u8>>,
}

impl DirectoryConfig {
    /// Config writing salted Argon2id digests
    pub fn adaptive() -> Self {
        Self {
            digest_scheme: DigestScheme::Argon2id,
            password_pepper: None,
        }
    }

    /// Get the password pepper as a slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
