//! Unified error type for codec operations.

use pixelveil_codec::CodecError;
use pixelveil_crypto::EnvelopeError;
use thiserror::Error;

/// Errors surfaced by [`scan`](crate::scan), [`encode`](crate::encode),
/// and [`decode`](crate::decode).
///
/// Every variant is terminal for the current operation; the core never
/// retries. The first five are expected operational failures a driver
/// presents to the user; the last two indicate an implementation bug and
/// should be surfaced with their diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// The plaintext (or its sealed ciphertext) does not fit the carrier.
    #[error("payload exceeds carrier capacity of {max_bytes} bytes")]
    CapacityExceeded {
        /// Largest plaintext this carrier can hold, in bytes.
        max_bytes: usize,
    },

    /// Decode found no recognized 16-bit signature.
    #[error("image carries no hidden payload")]
    NoSignature,

    /// The header parsed but declared an impossible payload.
    #[error("carrier damaged: {reason}")]
    CorruptHeader {
        /// Which header invariant was violated.
        reason: String,
    },

    /// Authentication failed; wrong password and tampering are
    /// indistinguishable by design.
    #[error("wrong password or tampered carrier")]
    WrongPasswordOrTampered,

    /// The envelope opened but the plaintext is not valid UTF-8.
    #[error("decrypted payload is not valid UTF-8")]
    CorruptPlaintext,

    /// The scatter walk exhausted its step budget.
    #[error("scatter walk diverged after {steps} steps (limit {limit})")]
    ScatterDivergence {
        /// Steps taken when the guard tripped.
        steps: u64,
        /// The configured step budget.
        limit: u64,
    },

    /// An internal bounds check failed.
    #[error("bounds check failed: index {index}, capacity {capacity}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The capacity it was checked against.
        capacity: usize,
    },
}

impl From<CodecError> for StegoError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::OutOfRange { index, capacity } => Self::OutOfRange { index, capacity },
            CodecError::NoSignature => Self::NoSignature,
            CodecError::CorruptHeader { reason } => Self::CorruptHeader { reason },
            CodecError::ScatterDivergence { steps, limit } => {
                Self::ScatterDivergence { steps, limit }
            },
        }
    }
}

impl From<EnvelopeError> for StegoError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Authentication => Self::WrongPasswordOrTampered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_errors_map_to_their_kinds() {
        assert_eq!(
            StegoError::from(CodecError::NoSignature),
            StegoError::NoSignature
        );
        assert_eq!(
            StegoError::from(CodecError::OutOfRange { index: 7, capacity: 3 }),
            StegoError::OutOfRange { index: 7, capacity: 3 }
        );
    }

    #[test]
    fn authentication_maps_to_wrong_password() {
        assert_eq!(
            StegoError::from(EnvelopeError::Authentication),
            StegoError::WrongPasswordOrTampered
        );
    }
}
