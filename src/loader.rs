//! Cancellable "last request wins" loading
//!
//! A [`LatestLoader`] owns one asynchronous resource slot (the current session
//! record, the current track graphic). Every request gets a new generation
//! number and its own cancellation token. Starting a new request cancels the
//! previous token, which drops the in-flight future, and a completion is only
//! published while its generation is still the current one.
//!
//! ```text
//! request(A) ──► gen 1, Loading ──► spawn(A)
//! request(B) ──► cancel gen 1 ──► gen 2, Loading ──► spawn(B)
//!                                  A completes late ──► generation 1 != 2, dropped
//!                                  B completes ──► Ready(B)
//! ```

use futures::Stream;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::{PaddockError, Result};

/// State of a loaded resource.
#[derive(Debug)]
pub enum LoadState<T> {
    /// Nothing requested
    Idle,
    /// A request is in flight; nothing is displayed meanwhile
    Loading,
    Ready(Arc<T>),
    /// The load failed; the original error is kept for diagnostics
    Failed(Arc<PaddockError>),
}

impl<T> Clone for LoadState<T> {
    fn clone(&self) -> Self {
        match self {
            LoadState::Idle => LoadState::Idle,
            LoadState::Loading => LoadState::Loading,
            LoadState::Ready(value) => LoadState::Ready(Arc::clone(value)),
            LoadState::Failed(error) => LoadState::Failed(Arc::clone(error)),
        }
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&Arc<T>> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&PaddockError> {
        match self {
            LoadState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// A load state tagged with the request generation that produced it.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub generation: u64,
    pub state: LoadState<T>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self { generation: self.generation, state: self.state.clone() }
    }
}

/// Generation-counted loader where only the latest request is applied.
///
/// Requests spawn onto the current tokio runtime.
pub struct LatestLoader<T> {
    /// Resource name for log context
    name: &'static str,
    /// Last generation handed out; only grows
    generation: u64,
    /// Token of the in-flight request, if any
    cancel: Option<CancellationToken>,
    state: Arc<watch::Sender<Snapshot<T>>>,
}

impl<T> LatestLoader<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(Snapshot { generation: 0, state: LoadState::Idle });
        Self { name, generation: 0, cancel: None, state: Arc::new(state) }
    }

    /// Start loading with `load`, superseding any in-flight request.
    ///
    /// Returns the generation assigned to this request.
    pub fn request<F>(&mut self, load: F) -> u64
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let generation = self.begin(LoadState::Loading);
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        let state = Arc::clone(&self.state);
        let name = self.name;

        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    debug!(resource = name, generation, "Load abandoned");
                    return;
                }
                outcome = load => outcome,
            };

            let next = match outcome {
                Ok(value) => LoadState::Ready(Arc::new(value)),
                Err(error) => {
                    warn!(resource = name, generation, error = %error.detailed_message(), "Load failed");
                    LoadState::Failed(Arc::new(error))
                }
            };

            let applied = state.send_if_modified(|snapshot| {
                if snapshot.generation != generation || token.is_cancelled() {
                    return false;
                }
                snapshot.state = next;
                true
            });

            if applied {
                trace!(resource = name, generation, "Load applied");
            } else {
                debug!(resource = name, generation, "Dropped stale load result");
            }
        });

        generation
    }

    /// Publish a failure without loading anything.
    pub fn fail(&mut self, error: PaddockError) -> u64 {
        warn!(resource = self.name, error = %error.detailed_message(), "Load rejected");
        self.begin(LoadState::Failed(Arc::new(error)))
    }

    /// Cancel any in-flight request and return to [`LoadState::Idle`].
    pub fn clear(&mut self) -> u64 {
        self.begin(LoadState::Idle)
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current snapshot.
    pub fn current(&self) -> Snapshot<T> {
        self.state.borrow().clone()
    }

    /// Current load state.
    pub fn state(&self) -> LoadState<T> {
        self.state.borrow().state.clone()
    }

    /// Receiver notified on every published change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.state.subscribe()
    }

    /// Stream of snapshots, starting with the current one.
    pub fn updates(&self) -> impl Stream<Item = Snapshot<T>> + 'static {
        WatchStream::new(self.state.subscribe())
    }

    /// Wait until the current generation has finished loading.
    pub async fn settled(&self) -> LoadState<T> {
        let mut receiver = self.state.subscribe();
        loop {
            {
                let snapshot = receiver.borrow_and_update();
                if !snapshot.state.is_loading() {
                    return snapshot.state.clone();
                }
            }
            if receiver.changed().await.is_err() {
                return self.state();
            }
        }
    }

    fn begin(&mut self, initial: LoadState<T>) -> u64 {
        if let Some(previous) = self.cancel.take() {
            previous.cancel();
        }
        self.generation += 1;
        let generation = self.generation;
        self.state.send_modify(|snapshot| {
            snapshot.generation = generation;
            snapshot.state = initial;
        });
        trace!(resource = self.name, generation, "Generation started");
        generation
    }
}

impl<T> Drop for LatestLoader<T> {
    fn drop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}
