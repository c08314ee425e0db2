// src/interactor/mod.rs

//! Interactors: reusable units of business logic.
//!
//! This module ties together:
//! - the [`Work`] extension point implementors provide
//! - the in-flight counters ([`loaders`]) and the debounced busy signal
//!   derived from them ([`busy`])
//! - the invocation path ([`runner`]): count, run under a deadline inside
//!   the result boundary, uncount
//! - [`subject`]: the observable counterpart, for work that produces a
//!   stream instead of a single value

use futures::future::BoxFuture;

pub mod busy;
pub mod loaders;
pub mod options;
pub mod runner;
pub mod subject;

pub use busy::BusySignal;
pub use loaders::{InFlightState, LoaderGuard, Loaders};
pub use options::InvokeOptions;
pub use runner::Interactor;
pub use subject::{Observe, SubjectInteractor};

/// A unit of business logic run by an [`Interactor`].
///
/// Return `Err` with a [`DomainError`](crate::result::DomainError) for
/// expected failures, [`Cancelled`](crate::result::Cancelled) to unwind the
/// caller, or any other error to have it wrapped.
pub trait Work: Send + Sync {
    type Params: Send;
    type Output: Send;

    fn do_work(&self, params: Self::Params) -> BoxFuture<'_, anyhow::Result<Self::Output>>;

    /// Whether an invocation with these params counts as user-initiated
    /// when the caller does not say. Defaults to `true` so UI-relevant work
    /// is never hidden behind the ambient debounce; params implementing
    /// [`UserInitiated`] can be forwarded here.
    fn is_user_initiated(&self, _params: &Self::Params) -> bool {
        true
    }

    /// Name used in log events.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Marker for params that know whether they come from a user action.
pub trait UserInitiated {
    fn is_user_initiated(&self) -> bool;
}
