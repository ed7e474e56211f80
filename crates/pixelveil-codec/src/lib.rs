//! Pixelveil carrier format primitives
//!
//! The low-level layers of the codec: addressing the LSB plane of an RGBA
//! buffer, the 272-bit header frame, and the deterministic scatter
//! permutation that disperses payload bits across the carrier body.
//!
//! # Layout
//!
//! A carrier is a row-major RGBA buffer. Only the R/G/B channels are
//! addressable; alpha bytes are invisible to every primitive in this crate
//! and are preserved bit for bit. Channels are numbered by *logical index*,
//! which skips alpha:
//!
//! ```text
//! byte:    R  G  B  A  R  G  B  A  R  ...
//! logical: 0  1  2  -  3  4  5  -  6  ...
//! ```
//!
//! The first 272 logical channels hold the header frame sequentially so a
//! reader can recover the scatter seed without already having it. The
//! remaining channels form the body, visited in the order produced by
//! [`ScatterSequence`].
//!
//! # Determinism
//!
//! Everything here is a pure function of its inputs. Two implementations
//! seeded with the same salt must touch the same channel sequence; the
//! recorded vectors in the test suites pin the exact Mulberry32 and LCG
//! outputs.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bits;
pub mod channels;
mod error;
pub mod header;
pub mod scatter;

pub use channels::{channel_capacity, max_payload_bytes};
pub use error::CodecError;
pub use header::{CarrierHeader, Detection, Signature};
pub use scatter::{Mulberry32, ScatterSequence};
