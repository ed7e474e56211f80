//! Payload seal and open with AES-256-GCM.

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit},
};

use crate::{derivation::EnvelopeKey, error::EnvelopeError};

/// Salt field size in bytes (128 bits).
pub const SALT_SIZE: usize = 16;

/// Nonce size in bytes (96 bits, the GCM standard length).
pub const NONCE_SIZE: usize = 12;

/// GCM tag size in bytes (128 bits). Appended to every ciphertext.
pub const TAG_SIZE: usize = 16;

/// Encrypt a payload under the derived key and per-message nonce.
///
/// Returns `ciphertext ‖ tag`; the tag accounts for [`TAG_SIZE`] of the
/// output and is carried inside the declared payload length, never framed
/// separately.
#[must_use]
pub fn seal(key: &EnvelopeKey, nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> Vec<u8> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.key()));
    let Ok(ciphertext) = cipher.encrypt(Nonce::from_slice(nonce), plaintext) else {
        unreachable!("AES-256-GCM encryption cannot fail with valid inputs");
    };
    ciphertext
}

/// Decrypt and authenticate a payload.
///
/// # Errors
///
/// - `EnvelopeError::Authentication` if the tag does not verify (wrong
///   key or tampered ciphertext); no partial plaintext is returned
pub fn open(
    key: &EnvelopeKey,
    nonce: &[u8; NONCE_SIZE],
    ciphertext: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.key()));
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| EnvelopeError::Authentication)
}
