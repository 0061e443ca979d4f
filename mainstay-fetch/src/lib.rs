//! Cancellable data fetching for Mainstay views.
//!
//! - [`Fetcher`] performs a remote read for a parameter set and publishes
//!   `{data, error, is_loading}` as a [`FetchState`]
//! - [`FetchContext`] is the per-attempt cancellation context passed to the
//!   fetch function
//! - [`LatestHandler`] is a single-slot "always current" callback cell;
//!   [`ReloadHandle`] uses it so manual refetches never run a stale reload
//!
//! # Example
//!
//! ```no_run
//! use futures::FutureExt;
//! use mainstay_fetch::{FetchContext, Fetcher};
//!
//! # async fn demo() {
//! let fetcher = Fetcher::new(
//!     |equipment_id: u32, ctx: FetchContext| {
//!         async move { ctx.check().map(|()| vec![format!("entry of {equipment_id}")]) }
//!             .boxed()
//!     },
//!     1,
//! );
//!
//! let mut updates = fetcher.subscribe();
//! updates.wait_for(|s| !s.is_loading).await.ok();
//! fetcher.set_params(2);
//! # }
//! ```

mod context;
mod fetcher;
mod latest;

pub use context::FetchContext;
pub use fetcher::{FetchFn, FetchFuture, FetchState, Fetcher, ReloadHandle};
pub use latest::LatestHandler;
