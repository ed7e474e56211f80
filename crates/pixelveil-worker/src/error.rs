//! Error type for the worker boundary.

use thiserror::Error;

/// Errors raised on the driver side of the worker boundary.
///
/// Codec failures are not errors at this layer; they travel inside
/// [`Body::Failed`](crate::Body::Failed) responses.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The worker thread is gone; its request channel is closed.
    #[error("worker terminated")]
    WorkerGone,

    /// CBOR serialization of a message failed.
    #[error("message encode failed: {0}")]
    Encode(String),

    /// CBOR deserialization of a message failed.
    #[error("message decode failed: {0}")]
    Decode(String),
}
