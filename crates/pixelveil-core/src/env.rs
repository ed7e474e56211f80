//! Environment abstraction for deterministic testing.
//!
//! Decouples the orchestrator from the system entropy source. Production
//! callers use [`SystemEnv`]; tests supply deterministic environments so
//! that salts and nonces, and therefore whole carriers, are reproducible.

/// Abstract source of per-message randomness.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// - `random_bytes()` uses cryptographically secure entropy in production
/// - Deterministic implementations are confined to tests
pub trait Environment: Send + Sync {
    /// Fill the buffer with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]);
}

/// Production environment backed by the operating system's entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        let Ok(()) = getrandom::fill(buffer) else {
            unreachable!("OS entropy source unavailable");
        };
    }
}
