//! Error type for the envelope.

use thiserror::Error;

/// Errors raised by the cryptographic envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The authentication tag did not verify.
    ///
    /// Deliberately does not distinguish a wrong password from a tampered
    /// ciphertext; no plaintext and no partial output escape this failure.
    #[error("wrong password or tampered ciphertext")]
    Authentication,
}
