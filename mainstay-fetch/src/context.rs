//! Cancellation context handed to every fetch call.
//!
//! Cancellation is cooperative: the fetch implementation must poll
//! [`FetchContext::is_cancelled`], await [`FetchContext::cancelled`], or wrap
//! its I/O in [`FetchContext::run`]. Nothing is interrupted pre-emptively.

use mainstay_types::{RemoteError, RemoteResult};
use std::future::Future;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct FetchContext {
    token: CancellationToken,
}

impl FetchContext {
    /// A fresh, uncancelled context.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the context is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// Returns [`RemoteError::Cancelled`] if the context was cancelled.
    pub fn check(&self) -> RemoteResult<()> {
        if self.is_cancelled() {
            Err(RemoteError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Drives `fut` until it completes or the context is cancelled,
    /// whichever comes first.
    pub async fn run<T, F>(&self, fut: F) -> RemoteResult<T>
    where
        F: Future<Output = RemoteResult<T>>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(RemoteError::Cancelled),
            result = fut => result,
        }
    }

    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }
}
