//! Cancellable asynchronous read with newest-result-wins ordering.
//!
//! Each fetch attempt gets its own [`FetchContext`]. Issuing a new attempt
//! (parameter change or reload) cancels the previous context first, and a
//! generation counter guarantees that only the most recently issued,
//! non-cancelled attempt can write into the published [`FetchState`]. A
//! superseded attempt that ignores its cancellation and resolves late is
//! discarded.

use crate::{FetchContext, LatestHandler};
use futures::future::BoxFuture;
use mainstay_types::{RemoteError, RemoteResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Future returned by a fetch function.
pub type FetchFuture<T> = BoxFuture<'static, RemoteResult<T>>;

/// The remote read: parameters plus the attempt's cancellation context.
pub type FetchFn<P, T> = Arc<dyn Fn(P, FetchContext) -> FetchFuture<T> + Send + Sync>;

/// What a consuming view renders.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub data: Option<T>,
    /// Last failure. Cancellation never lands here.
    pub error: Option<RemoteError>,
    pub is_loading: bool,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
        }
    }
}

struct Attempt<P> {
    params: P,
    generation: u64,
    context: Option<FetchContext>,
    torn_down: bool,
}

struct Shared<P, T> {
    fetch_fn: FetchFn<P, T>,
    state: watch::Sender<FetchState<T>>,
    attempt: Mutex<Attempt<P>>,
}

impl<P, T> Shared<P, T>
where
    P: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn lock(&self) -> MutexGuard<'_, Attempt<P>> {
        self.attempt.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancels any in-flight attempt and starts a new one.
    fn issue(self: &Arc<Self>, params: Option<P>) {
        let (params, context, generation) = {
            let mut attempt = self.lock();
            if attempt.torn_down {
                return;
            }
            if let Some(previous) = attempt.context.take() {
                previous.cancel();
            }
            if let Some(params) = params {
                attempt.params = params;
            }
            attempt.generation += 1;
            let context = FetchContext::new();
            attempt.context = Some(context.clone());
            self.state.send_modify(|s| s.is_loading = true);
            (attempt.params.clone(), context, attempt.generation)
        };

        debug!("Issuing fetch generation {}", generation);
        let fut = (self.fetch_fn)(params, context.clone());
        let shared = Arc::clone(self);
        tokio::spawn(async move {
            let result = fut.await;
            shared.complete(generation, &context, result);
        });
    }

    fn complete(&self, generation: u64, context: &FetchContext, result: RemoteResult<T>) {
        let mut attempt = self.lock();
        if context.is_cancelled() || attempt.generation != generation {
            debug!("Discarding result of superseded fetch generation {}", generation);
            return;
        }
        attempt.context = None;

        match result {
            Ok(data) => self.state.send_modify(|s| {
                s.data = Some(data);
                s.error = None;
                s.is_loading = false;
            }),
            Err(RemoteError::Cancelled) => {
                debug!("Fetch generation {} cancelled by callee", generation);
                self.state.send_modify(|s| s.is_loading = false);
            }
            Err(e) => {
                warn!("Fetch generation {} failed: {}", generation, e);
                self.state.send_modify(|s| {
                    s.error = Some(e);
                    s.is_loading = false;
                });
            }
        }
    }

    fn teardown(&self) {
        let mut attempt = self.lock();
        if attempt.torn_down {
            return;
        }
        attempt.torn_down = true;
        if let Some(context) = attempt.context.take() {
            context.cancel();
        }
        self.state.send_modify(|s| s.is_loading = false);
        debug!("Fetcher torn down at generation {}", attempt.generation);
    }
}

/// Manual refetch trigger that always runs the latest reload.
#[derive(Debug, Clone)]
pub struct ReloadHandle {
    slot: LatestHandler<()>,
}

impl ReloadHandle {
    /// Refetches. Returns `false` once the fetcher is gone.
    pub fn reload(&self) -> bool {
        self.slot.invoke(())
    }
}

/// Fetches `T` for parameters `P` and publishes the outcome.
///
/// Must be created inside a Tokio runtime. Dropping the fetcher tears it
/// down: the in-flight attempt is cancelled and its result discarded.
pub struct Fetcher<P, T>
where
    P: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    shared: Arc<Shared<P, T>>,
    reload: LatestHandler<()>,
}

impl<P, T> Fetcher<P, T>
where
    P: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates the fetcher and issues the first fetch.
    pub fn new<F>(fetch_fn: F, params: P) -> Self
    where
        F: Fn(P, FetchContext) -> FetchFuture<T> + Send + Sync + 'static,
    {
        let (state, _) = watch::channel(FetchState::default());
        let shared = Arc::new(Shared {
            fetch_fn: Arc::new(fetch_fn),
            state,
            attempt: Mutex::new(Attempt {
                params,
                generation: 0,
                context: None,
                torn_down: false,
            }),
        });

        // Reads the current parameters when invoked.
        let reload = LatestHandler::new();
        let weak: Weak<Shared<P, T>> = Arc::downgrade(&shared);
        reload.register(move |()| {
            if let Some(shared) = weak.upgrade() {
                shared.issue(None);
            }
        });

        shared.issue(None);
        Self { shared, reload }
    }

    /// Changes the parameters. Refetches only when they differ from the
    /// current ones; returns whether a fetch was issued.
    pub fn set_params(&self, params: P) -> bool {
        {
            let attempt = self.shared.lock();
            if attempt.torn_down || attempt.params == params {
                return false;
            }
        }
        self.shared.issue(Some(params));
        true
    }

    /// Refetches with the current parameters.
    pub fn reload(&self) {
        self.shared.issue(None);
    }

    /// Handle for triggering a refetch from unrelated code.
    pub fn reload_handle(&self) -> ReloadHandle {
        ReloadHandle {
            slot: self.reload.clone(),
        }
    }

    /// Current parameters.
    pub fn params(&self) -> P {
        self.shared.lock().params.clone()
    }

    pub fn snapshot(&self) -> FetchState<T> {
        self.shared.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.shared.state.subscribe()
    }

    /// Cancels the in-flight fetch and stops accepting new ones.
    /// Idempotent.
    pub fn teardown(&self) {
        self.reload.clear();
        self.shared.teardown();
    }
}

impl<P, T> Drop for Fetcher<P, T>
where
    P: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
