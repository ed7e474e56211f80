//! Error type for the carrier format layer.

use thiserror::Error;

/// Errors raised by the bit-plane, header, and scatter primitives.
///
/// All variants are terminal for the operation that raised them; nothing in
/// this crate retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A logical channel index fell outside the buffer's channel capacity.
    #[error("channel index {index} out of range (capacity {capacity})")]
    OutOfRange {
        /// The offending logical channel index.
        index: usize,
        /// Total logical channels the buffer holds.
        capacity: usize,
    },

    /// The first 16 header bits matched neither carrier signature.
    #[error("no carrier signature found")]
    NoSignature,

    /// The header parsed but declared an impossible payload.
    #[error("corrupt header: {reason}")]
    CorruptHeader {
        /// Which header invariant was violated.
        reason: String,
    },

    /// The scatter walk exceeded its step budget without finishing.
    ///
    /// Unreachable with Hull-Dobell parameters; tripping it indicates an
    /// implementation bug, not bad input.
    #[error("scatter walk diverged after {steps} steps (limit {limit})")]
    ScatterDivergence {
        /// Steps taken when the guard tripped.
        steps: u64,
        /// The configured step budget.
        limit: u64,
    },
}
