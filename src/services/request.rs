//! Background API calls whose results are polled from the UI loop.
//!
//! Requests run as tasks on the app's tokio runtime and report back through a
//! oneshot channel. A [`LatestRequest`] only ever delivers the result of the
//! most recently started request: starting a new one aborts the previous task
//! and drops its receiver, so a slow response for an old date or provider can
//! never overwrite newer data.

use std::future::Future;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

struct Pending<T> {
    generation: u64,
    receiver: oneshot::Receiver<T>,
    task: JoinHandle<()>,
}

/// Tracks the in-flight request of one kind for a screen.
pub struct LatestRequest<T> {
    label: &'static str,
    generation: u64,
    pending: Option<Pending<T>>,
}

impl<T> std::fmt::Debug for LatestRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatestRequest")
            .field("label", &self.label)
            .field("generation", &self.generation)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

impl<T: Send + 'static> LatestRequest<T> {
    /// Create an idle tracker. `label` is only used in log lines.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            generation: 0,
            pending: None,
        }
    }

    /// Spawn `future` on `runtime`, superseding any request still in flight.
    ///
    /// Returns the generation number of the new request.
    pub fn start<F>(&mut self, runtime: &Handle, future: F) -> u64
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        debug!("Starting {} request #{}", self.label, generation);

        let (sender, receiver) = oneshot::channel();
        let task = runtime.spawn(async move {
            // Receiver is gone when the request was superseded
            let _ = sender.send(future.await);
        });

        self.pending = Some(Pending {
            generation,
            receiver,
            task,
        });
        generation
    }

    /// Abort the request in flight, if any. Its result will never be delivered.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!("Cancelling {} request #{}", self.label, pending.generation);
            pending.task.abort();
        }
    }

    /// Take the result of the latest request without blocking.
    pub fn poll(&mut self) -> Option<T> {
        let pending = self.pending.as_mut()?;
        match pending.receiver.try_recv() {
            Ok(result) => {
                debug!("{} request #{} finished", self.label, pending.generation);
                self.pending = None;
                Some(result)
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                warn!(
                    "{} request #{} ended without a result",
                    self.label, pending.generation
                );
                self.pending = None;
                None
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of requests started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<T> Drop for LatestRequest<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
    }
}
