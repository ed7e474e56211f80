//! CBOR-encoded worker messages.
//!
//! The schema crosses the driver boundary, so it is serialization-first:
//! every message derives `Serialize`/`Deserialize` and round-trips through
//! CBOR unchanged. In-process drivers skip the encoding entirely and move
//! the structs over channels.

use pixelveil_codec::Detection;
use pixelveil_core::StegoError;
use serde::{Deserialize, Serialize};

use crate::error::WorkerError;

/// Correlation id tying responses to the request that caused them.
pub type RequestId = u64;

/// A driver request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Correlation id; unique per in-flight request.
    pub id: RequestId,
    /// The operation to run.
    pub op: Op,
}

/// The codec operation carried by a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Check whether a buffer is a carrier. Touches no cryptography.
    Scan {
        /// Raw RGBA bytes (`4·width·height`).
        pixels: Vec<u8>,
        /// Carrier width in pixels.
        width: u32,
        /// Carrier height in pixels.
        height: u32,
    },
    /// Hide a message in the buffer.
    Encode {
        /// Raw RGBA bytes; ownership transfers to the worker.
        pixels: Vec<u8>,
        /// Carrier width in pixels.
        width: u32,
        /// Carrier height in pixels.
        height: u32,
        /// The message to hide.
        plaintext: String,
        /// Password; empty for an open carrier.
        password: String,
    },
    /// Recover the message hidden in the buffer.
    Decode {
        /// Raw RGBA bytes.
        pixels: Vec<u8>,
        /// Carrier width in pixels.
        width: u32,
        /// Carrier height in pixels.
        height: u32,
        /// Password; empty for an open carrier.
        password: String,
    },
}

/// A worker response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Correlation id of the request this answers.
    pub id: RequestId,
    /// Progress or terminal payload.
    pub body: Body,
}

/// Response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    /// Embedding/extraction progress. Zero or more per request, monotone
    /// non-decreasing, always before the terminal response.
    Progress {
        /// Percent complete, `0..=100`.
        percent: u8,
    },
    /// Terminal: scan verdict.
    ScanDone {
        /// The detected signature, if any.
        signature: Detection,
    },
    /// Terminal: the finished carrier, ownership transferred back.
    EncodeDone {
        /// Raw RGBA bytes holding the embedded payload.
        pixels: Vec<u8>,
    },
    /// Terminal: the recovered message.
    DecodeDone {
        /// The hidden plaintext.
        text: String,
    },
    /// Terminal: the operation failed.
    Failed {
        /// Machine-readable failure kind.
        kind: ErrorCode,
        /// Human-readable description.
        message: String,
    },
}

impl Body {
    /// Whether this payload ends its request.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }
}

/// Machine-readable failure kinds, mirroring [`StegoError`] for drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Payload does not fit the carrier.
    CapacityExceeded,
    /// Buffer is not a carrier.
    NoSignature,
    /// Header declares an impossible payload.
    CorruptHeader,
    /// Authentication failed.
    WrongPasswordOrTampered,
    /// Payload is not valid UTF-8.
    CorruptPlaintext,
    /// Scatter walk guard tripped; implementation bug.
    ScatterDivergence,
    /// Internal bounds check failed; implementation bug.
    OutOfRange,
}

impl From<&StegoError> for ErrorCode {
    fn from(err: &StegoError) -> Self {
        match err {
            StegoError::CapacityExceeded { .. } => Self::CapacityExceeded,
            StegoError::NoSignature => Self::NoSignature,
            StegoError::CorruptHeader { .. } => Self::CorruptHeader,
            StegoError::WrongPasswordOrTampered => Self::WrongPasswordOrTampered,
            StegoError::CorruptPlaintext => Self::CorruptPlaintext,
            StegoError::ScatterDivergence { .. } => Self::ScatterDivergence,
            StegoError::OutOfRange { .. } => Self::OutOfRange,
        }
    }
}

impl Request {
    /// Encode to CBOR for a driver across a process boundary.
    pub fn encode(&self, dst: &mut Vec<u8>) -> Result<(), WorkerError> {
        ciborium::ser::into_writer(self, dst).map_err(|e| WorkerError::Encode(e.to_string()))
    }

    /// Decode from CBOR.
    pub fn decode(bytes: &[u8]) -> Result<Self, WorkerError> {
        ciborium::de::from_reader(bytes).map_err(|e| WorkerError::Decode(e.to_string()))
    }
}

impl Response {
    /// Encode to CBOR for a driver across a process boundary.
    pub fn encode(&self, dst: &mut Vec<u8>) -> Result<(), WorkerError> {
        ciborium::ser::into_writer(self, dst).map_err(|e| WorkerError::Encode(e.to_string()))
    }

    /// Decode from CBOR.
    pub fn decode(bytes: &[u8]) -> Result<Self, WorkerError> {
        ciborium::de::from_reader(bytes).map_err(|e| WorkerError::Decode(e.to_string()))
    }
}
