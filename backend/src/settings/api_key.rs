//! Shared-secret API key and its log-safe fingerprint.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// The API key expected in the `X-API-Key` header.
///
/// The secret is wiped from memory on drop and never printed; `Debug`
/// shows the fingerprint only.
#[derive(Clone)]
pub struct ApiKey {
    secret: Zeroizing<String>,
}

impl ApiKey {
    /// Wrap a secret value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
        }
    }

    /// Whether `candidate` equals the configured key.
    ///
    /// Both sides are hashed before comparison so the running time does not
    /// depend on the length of the matching prefix.
    pub fn matches(&self, candidate: &str) -> bool {
        Sha256::digest(candidate.as_bytes()) == Sha256::digest(self.secret.as_bytes())
    }

    /// Truncated SHA-256 fingerprint for logs.
    pub fn fingerprint(&self) -> String {
        key_fingerprint(&self.secret)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// Generate a truncated SHA-256 fingerprint of a secret.
///
/// Returns the first 8 bytes of the hash as a 16-character hex string.
///
/// # Examples
///
/// ```rust
/// use carlot::settings::key_fingerprint;
///
/// let fp = key_fingerprint("s3cret");
///
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
