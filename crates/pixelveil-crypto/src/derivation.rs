//! Password key derivation with PBKDF2-HMAC-SHA-256.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;

/// Derived key size in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// PBKDF2 iteration count.
///
/// Fixed for interoperability; changing it breaks decoding of existing
/// carriers.
pub const PBKDF2_ITERATIONS: u32 = 600_000;

/// A derived envelope key.
///
/// Used for a single seal or open operation and discarded. The key bytes
/// are zeroized on drop.
#[derive(Clone)]
pub struct EnvelopeKey {
    key: [u8; KEY_SIZE],
}

impl EnvelopeKey {
    /// The 32-byte symmetric key for AES-256-GCM.
    pub(crate) fn key(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl Drop for EnvelopeKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Derive an envelope key from a password and per-message salt.
///
/// An empty password derives from the empty byte string; the caller's
/// signature field records that no password is expected, but the envelope
/// is authenticated either way.
#[must_use]
pub fn derive_key(password: &str, salt: &[u8]) -> EnvelopeKey {
    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    EnvelopeKey { key }
}
