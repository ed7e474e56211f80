//! The background codec worker.

use pixelveil_core::{Phase, ProgressSink, SystemEnv};
use tokio::sync::mpsc;

use crate::message::{Body, ErrorCode, Op, Request, RequestId, Response};

/// Handle to a background worker thread.
///
/// The worker drains requests from its channel and runs them one at a
/// time; one worker is one orchestrator instance, so it never multiplexes
/// operations. Dropping the handle closes the request channel and the
/// thread exits after the operation in flight, discarding its responses.
#[derive(Debug)]
pub struct Worker {
    requests: mpsc::UnboundedSender<Request>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl Worker {
    /// Start a worker thread.
    ///
    /// Returns the handle and the response stream shared by every request
    /// sent through it.
    #[must_use]
    pub fn spawn() -> (Self, mpsc::UnboundedReceiver<Response>) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (response_tx, response_rx) = mpsc::unbounded_channel();

        let thread = std::thread::spawn(move || run(request_rx, &response_tx));

        (Self { requests: request_tx, thread: Some(thread) }, response_rx)
    }

    /// Queue a request for the worker.
    ///
    /// # Errors
    ///
    /// - `WorkerError::WorkerGone` if the worker thread has terminated
    pub fn submit(&self, request: Request) -> Result<(), crate::WorkerError> {
        self.requests.send(request).map_err(|_| crate::WorkerError::WorkerGone)
    }

    /// Stop accepting requests and wait for the thread to finish.
    pub fn shutdown(mut self) {
        drop(self.requests);
        if let Some(thread) = self.thread.take() {
            thread.join().ok();
        }
    }
}

/// Worker thread main loop: one request at a time, in arrival order.
fn run(mut requests: mpsc::UnboundedReceiver<Request>, responses: &mpsc::UnboundedSender<Response>) {
    while let Some(request) = requests.blocking_recv() {
        let id = request.id;
        tracing::debug!(id, "request accepted");

        let body = execute(request, responses);

        if responses.send(Response { id, body }).is_err() {
            tracing::warn!(id, "driver dropped the response stream; worker stopping");
            return;
        }
        tracing::debug!(id, "request finished");
    }
}

/// Run one operation to its terminal body, streaming progress.
fn execute(request: Request, responses: &mpsc::UnboundedSender<Response>) -> Body {
    let id = request.id;
    match request.op {
        Op::Scan { pixels, width, height } => {
            tracing::debug!(id, width, height, "scan");
            Body::ScanDone { signature: pixelveil_core::scan(&pixels) }
        },
        Op::Encode { mut pixels, width, height, plaintext, password } => {
            tracing::debug!(id, width, height, "encode");
            let mut sink = ChannelSink::new(id, responses);
            match pixelveil_core::encode(
                &mut pixels,
                width,
                height,
                &plaintext,
                &password,
                &SystemEnv,
                &mut sink,
            ) {
                Ok(()) => Body::EncodeDone { pixels },
                Err(err) => failed(&err),
            }
        },
        Op::Decode { pixels, width, height, password } => {
            tracing::debug!(id, width, height, "decode");
            let mut sink = ChannelSink::new(id, responses);
            match pixelveil_core::decode(&pixels, width, height, &password, &mut sink) {
                Ok(text) => Body::DecodeDone { text },
                Err(err) => failed(&err),
            }
        },
    }
}

fn failed(err: &pixelveil_core::StegoError) -> Body {
    tracing::debug!(%err, "operation failed");
    Body::Failed { kind: ErrorCode::from(err), message: err.to_string() }
}

/// Progress sink that forwards percentages as protocol responses.
///
/// Enforces the protocol's ordering guarantee locally: percentages never
/// regress, and duplicates are dropped rather than resent. Send failures
/// are ignored; a driver that dropped the stream gets no more progress
/// and the terminal send will stop the worker.
struct ChannelSink<'a> {
    id: RequestId,
    responses: &'a mpsc::UnboundedSender<Response>,
    last: u8,
}

impl<'a> ChannelSink<'a> {
    fn new(id: RequestId, responses: &'a mpsc::UnboundedSender<Response>) -> Self {
        Self { id, responses, last: 0 }
    }
}

impl ProgressSink for ChannelSink<'_> {
    fn phase(&mut self, phase: Phase) {
        tracing::debug!(id = self.id, ?phase, "phase change");
    }

    fn percent(&mut self, percent: u8) {
        let percent = percent.min(100);
        if percent <= self.last {
            return;
        }
        self.last = percent;
        self.responses
            .send(Response { id: self.id, body: Body::Progress { percent } })
            .ok();
    }
}
