//! Pixelveil codec orchestrator
//!
//! Composes the carrier format layer and the cryptographic envelope into
//! the three operations a driver dispatches: [`scan`], [`encode`], and
//! [`decode`]. The orchestrator owns the passed-in RGBA buffer for the
//! duration of one operation, reports its phase and percentage through a
//! [`ProgressSink`], and surfaces every failure as a typed [`StegoError`].
//!
//! # Operation lifecycle
//!
//! ```text
//! idle → analyzing → processing → rendering → idle
//! ```
//!
//! `analyzing` covers validation and envelope construction, `processing`
//! the bit embedding or extraction (the progress-emitting phase), and
//! `rendering` the handoff of results back to the driver. Any error
//! returns the orchestrator to `idle` from whichever phase raised it.
//!
//! This crate never logs; observability belongs to the driver side of the
//! worker boundary.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod env;
mod error;
mod progress;

pub use codec::{decode, encode, scan};
pub use env::{Environment, SystemEnv};
pub use error::StegoError;
pub use pixelveil_codec::{Detection, max_payload_bytes};
pub use progress::{NullSink, Phase, ProgressSink};
