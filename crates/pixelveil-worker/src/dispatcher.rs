//! Driver-side request table and response routing.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::sync::mpsc;

use crate::{
    error::WorkerError,
    message::{Op, Request, RequestId, Response},
    worker::Worker,
};

type PendingMap = HashMap<RequestId, mpsc::UnboundedSender<Response>>;
type PendingTable = Mutex<PendingMap>;

/// Correlates worker responses back to the request that caused them.
///
/// The dispatcher owns the worker and its shared response stream. Each
/// [`submit`](Self::submit) allocates a fresh correlation id, parks a
/// per-request channel in the request table, and a pump task routes every
/// incoming response to its request. The table entry is removed when the
/// terminal response passes through, so the table only ever holds
/// in-flight requests.
///
/// Requires a running tokio runtime for the pump task; the codec work
/// itself stays on the worker's dedicated thread.
#[derive(Debug)]
pub struct Dispatcher {
    worker: Worker,
    pending: Arc<PendingTable>,
    next_id: AtomicU64,
}

impl Dispatcher {
    /// Start a worker and the response pump.
    #[must_use]
    pub fn spawn() -> Self {
        let (worker, mut responses) = Worker::spawn();
        let pending: Arc<PendingTable> = Arc::new(Mutex::new(HashMap::new()));

        let table = Arc::clone(&pending);
        tokio::spawn(async move {
            while let Some(response) = responses.recv().await {
                route(&table, response);
            }
            tracing::debug!("response stream closed; pump exiting");
        });

        Self { worker, pending, next_id: AtomicU64::new(1) }
    }

    /// Dispatch an operation and receive its responses.
    ///
    /// # Errors
    ///
    /// - `WorkerError::WorkerGone` if the worker thread has terminated
    pub fn submit(&self, op: Op) -> Result<RequestHandle, WorkerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (response_tx, response_rx) = mpsc::unbounded_channel();

        lock_table(&self.pending).insert(id, response_tx);

        if let Err(err) = self.worker.submit(Request { id, op }) {
            lock_table(&self.pending).remove(&id);
            return Err(err);
        }

        tracing::debug!(id, "request dispatched");
        Ok(RequestHandle { id, responses: response_rx })
    }

    /// Stop the worker and wait for it to finish.
    pub fn shutdown(self) {
        self.worker.shutdown();
    }
}

/// The driver's view of one in-flight request.
#[derive(Debug)]
pub struct RequestHandle {
    id: RequestId,
    responses: mpsc::UnboundedReceiver<Response>,
}

impl RequestHandle {
    /// Correlation id of this request.
    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Receive the next response for this request.
    ///
    /// Yields progress responses in order, then the terminal response,
    /// then `None`.
    pub async fn recv(&mut self) -> Option<Response> {
        self.responses.recv().await
    }
}

/// Deliver a response to its request; drop the table entry on terminal.
fn route(pending: &PendingTable, response: Response) {
    let mut table = lock_table(pending);
    let id = response.id;
    let Some(sender) = table.get(&id) else {
        tracing::warn!(id, "response for unknown request dropped");
        return;
    };

    let terminal = response.body.is_terminal();
    sender.send(response).ok();
    if terminal {
        table.remove(&id);
    }
}

/// Lock the request table, recovering from a poisoned mutex.
///
/// The table holds only channel senders, which cannot be left in a
/// half-updated state, so the poison flag carries no information here.
fn lock_table(pending: &PendingTable) -> MutexGuard<'_, PendingMap> {
    match pending.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
