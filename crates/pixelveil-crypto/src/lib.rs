//! Pixelveil cryptographic envelope
//!
//! Key derivation and authenticated encryption for the payload carried in
//! a Pixelveil image. Pure functions with deterministic outputs; callers
//! provide the salt and nonce, which keeps every operation reproducible
//! under test.
//!
//! # Envelope
//!
//! ```text
//! Password + Salt
//!        │
//!        ▼
//! PBKDF2-HMAC-SHA-256 (600,000 iterations) → 256-bit key
//!        │
//!        ▼
//! AES-256-GCM (96-bit nonce, no AAD) → ciphertext ‖ 128-bit tag
//! ```
//!
//! An empty password still derives a key from the empty byte string and
//! the ciphertext is still authenticated: an unsecured message keeps its
//! integrity even though anyone who knows the open-signature convention
//! can read it.
//!
//! # Security
//!
//! - Tampering with any ciphertext bit fails tag verification
//! - Wrong-password and tampered-ciphertext failures are indistinguishable
//! - Derived keys are zeroized on drop; they never outlive one operation

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod derivation;
mod envelope;
mod error;

pub use derivation::{EnvelopeKey, KEY_SIZE, PBKDF2_ITERATIONS, derive_key};
pub use envelope::{NONCE_SIZE, SALT_SIZE, TAG_SIZE, open, seal};
pub use error::EnvelopeError;
