//! Pixelveil worker protocol
//!
//! The driver-facing boundary of the codec. A [`Worker`] runs codec
//! operations on one background thread, one at a time; drivers talk to it
//! in correlated request/response messages and observe progress without
//! blocking on the CPU-bound work.
//!
//! # Protocol
//!
//! Every request carries a unique correlation id. A single request
//! produces zero or more progress responses followed by exactly one
//! terminal response, and progress for an operation always precedes its
//! terminal message. Pixel buffers move through the messages by value, so
//! ownership transfers to the worker for the duration of an operation and
//! back to the driver with the result.
//!
//! In-process drivers hand the structs straight to [`Worker`] channels or
//! go through the [`Dispatcher`], which keeps the request table and
//! routes the shared response stream per request. Drivers on the far side
//! of a process or WASM seam use the CBOR encoding on [`Request`] and
//! [`Response`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod dispatcher;
mod error;
mod message;
mod worker;

pub use dispatcher::{Dispatcher, RequestHandle};
pub use error::WorkerError;
pub use message::{Body, ErrorCode, Op, Request, RequestId, Response};
pub use worker::Worker;
