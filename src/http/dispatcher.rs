use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{
    args::PositiveUsize,
    error::HttpError,
    metrics::{SampleRecorder, SampleSet},
};

use super::request::RequestDescriptor;
use super::transport::Transport;

type ShutdownSender = broadcast::Sender<()>;
type ShutdownReceiver = broadcast::Receiver<()>;

/// Runs a fixed batch of requests through at most `concurrency` workers.
///
/// Each worker pulls the next descriptor from a shared queue, times the
/// transport call and appends the latency to the dispatcher's
/// [`SampleRecorder`]. The first failing request, or a panicking worker,
/// trips a shutdown broadcast; the remaining workers drop their in-flight
/// call and stop pulling work. [`Dispatcher::dispatch`] only returns after
/// every worker has been joined.
pub struct Dispatcher<T> {
    transport: Arc<T>,
    concurrency: PositiveUsize,
    expected_status: Option<u16>,
}

impl<T> Dispatcher<T>
where
    T: Transport + 'static,
{
    #[must_use]
    pub fn new(transport: Arc<T>, concurrency: PositiveUsize) -> Self {
        Self {
            transport,
            concurrency,
            expected_status: None,
        }
    }

    /// Treats any response whose status differs from `status` as fatal.
    #[must_use]
    pub const fn with_expected_status(mut self, status: Option<u16>) -> Self {
        self.expected_status = status;
        self
    }

    /// Sends every descriptor once and returns one latency per request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::RequestFailed`] carrying the iteration index of
    /// the first request that failed; no samples are returned in that case.
    /// Also fails when a worker task panics or the sample lock is poisoned.
    pub async fn dispatch(self, requests: Vec<RequestDescriptor>) -> Result<SampleSet, HttpError> {
        let total = requests.len();
        let worker_count = self.concurrency.get().min(total);
        debug!(
            "Dispatching {} requests across {} workers",
            total, worker_count
        );

        let queue = Arc::new(RequestQueue::new(requests));
        let recorder = Arc::new(SampleRecorder::with_capacity(total));
        let failure = Arc::new(FailureSlot::default());
        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let worker = Worker {
                id: worker_id,
                transport: Arc::clone(&self.transport),
                queue: Arc::clone(&queue),
                recorder: Arc::clone(&recorder),
                failure: Arc::clone(&failure),
                shutdown_tx: shutdown_tx.clone(),
                expected_status: self.expected_status,
            };
            let shutdown_rx = shutdown_tx.subscribe();
            handles.push(tokio::spawn(worker.run(shutdown_rx)));
        }

        let mut join_error = None;
        for handle in handles {
            if let Err(err) = handle.await {
                drop(shutdown_tx.send(()));
                if join_error.is_none() {
                    join_error = Some(err);
                }
            }
        }

        if let Some(err) = join_error {
            return Err(HttpError::WorkerJoin { source: err });
        }
        if let Some(err) = failure.take() {
            return Err(err);
        }

        let samples = recorder
            .finish()
            .map_err(|err| HttpError::RecordSample { source: err })?;
        if samples.len() != total {
            return Err(HttpError::DispatchIncomplete {
                expected: total,
                actual: samples.len(),
            });
        }
        Ok(samples)
    }
}

struct Worker<T> {
    id: usize,
    transport: Arc<T>,
    queue: Arc<RequestQueue>,
    recorder: Arc<SampleRecorder>,
    failure: Arc<FailureSlot>,
    shutdown_tx: ShutdownSender,
    expected_status: Option<u16>,
}

impl<T> Worker<T>
where
    T: Transport,
{
    async fn run(self, mut shutdown_rx: ShutdownReceiver) {
        let mut panic_guard = PanicGuard {
            worker: self.id,
            failure: Arc::clone(&self.failure),
            shutdown_tx: self.shutdown_tx.clone(),
            armed: true,
        };
        let mut completed: usize = 0;
        loop {
            if self.failure.is_tripped() {
                break;
            }
            let request = match self.queue.pop() {
                Ok(Some(request)) => request,
                Ok(None) => break,
                Err(err) => {
                    self.fail(err);
                    break;
                }
            };
            let index = request.index();

            let start = Instant::now();
            let outcome = tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                result = self.transport.send(request) => result,
            };
            let elapsed = start.elapsed();

            let checked = outcome.and_then(|status| check_status(status, self.expected_status));
            if let Err(err) = checked {
                self.fail(HttpError::for_request(index, err));
                break;
            }
            if let Err(err) = self.recorder.record(elapsed) {
                self.fail(HttpError::RecordSample { source: err });
                break;
            }
            completed = completed.saturating_add(1);
        }
        debug!("Worker {} finished after {} requests", self.id, completed);
        panic_guard.armed = false;
    }

    fn fail(&self, error: HttpError) {
        if self.failure.record(error) {
            drop(self.shutdown_tx.send(()));
        }
    }
}

/// Trips fail-fast when a worker is torn down before finishing its loop.
struct PanicGuard {
    worker: usize,
    failure: Arc<FailureSlot>,
    shutdown_tx: ShutdownSender,
    armed: bool,
}

impl Drop for PanicGuard {
    fn drop(&mut self) {
        if self.armed
            && self.failure.record(HttpError::WorkerPanicked {
                worker: self.worker,
            })
        {
            drop(self.shutdown_tx.send(()));
        }
    }
}

const fn check_status(status: u16, expected: Option<u16>) -> Result<u16, HttpError> {
    match expected {
        Some(expected) if expected != status => {
            Err(HttpError::UnexpectedStatus { status, expected })
        }
        Some(_) | None => Ok(status),
    }
}

/// FIFO of pending descriptors; the lock is held only for the pop.
struct RequestQueue {
    pending: Mutex<VecDeque<RequestDescriptor>>,
}

impl RequestQueue {
    fn new(requests: Vec<RequestDescriptor>) -> Self {
        Self {
            pending: Mutex::new(VecDeque::from(requests)),
        }
    }

    fn pop(&self) -> Result<Option<RequestDescriptor>, HttpError> {
        self.pending
            .lock()
            .map(|mut pending| pending.pop_front())
            .map_err(|_poisoned| HttpError::QueuePoisoned)
    }
}

/// Keeps the first fatal error; later ones are logged and dropped.
#[derive(Default)]
struct FailureSlot {
    tripped: AtomicBool,
    first: Mutex<Option<HttpError>>,
}

impl FailureSlot {
    fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    /// Returns `true` when `error` is the first one recorded.
    fn record(&self, error: HttpError) -> bool {
        if self.tripped.swap(true, Ordering::AcqRel) {
            debug!("Suppressed follow-up failure: {}", error);
            return false;
        }
        match self.first.lock() {
            Ok(mut slot) => *slot = Some(error),
            Err(poisoned) => {
                warn!("Failure slot lock was poisoned; keeping error anyway.");
                *poisoned.into_inner() = Some(error);
            }
        }
        true
    }

    fn take(&self) -> Option<HttpError> {
        match self.first.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}
