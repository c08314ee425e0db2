// src/result/boundary.rs

//! The result boundary: run work, capture its outcome.
//!
//! Classification of a raised failure, in order:
//! 1. [`Cancelled`] is never captured; it comes back as `Err(Cancelled)`.
//! 2. [`DomainError`] becomes `Failure(ExecutionError::Domain)` unchanged.
//! 3. An [`ExecutionError`] raised by a nested boundary is passed through
//!    without another wrapping layer.
//! 4. Anything else, panics included, becomes
//!    `Failure(ExecutionError::Execution { source })`.

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;
use tracing::debug;

use super::error::{Cancelled, DomainError, ExecutionError, Panicked};
use super::ExecutionResult;

/// Await `work` and convert its outcome into an [`ExecutionResult`].
///
/// Returns `Err(Cancelled)` only when the work itself raised the
/// cancellation signal; every other failure is converted.
pub async fn run_catching<T, F>(work: F) -> Result<ExecutionResult<T>, Cancelled>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match AssertUnwindSafe(work).catch_unwind().await {
        Ok(Ok(value)) => Ok(ExecutionResult::Success(value)),
        Ok(Err(err)) => classify(err),
        Err(payload) => Ok(ExecutionResult::Failure(from_panic(payload))),
    }
}

/// Synchronous form of [`run_catching`] for work that does not suspend.
pub fn run_catching_sync<T, F>(work: F) -> Result<ExecutionResult<T>, Cancelled>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(work)) {
        Ok(Ok(value)) => Ok(ExecutionResult::Success(value)),
        Ok(Err(err)) => classify(err),
        Err(payload) => Ok(ExecutionResult::Failure(from_panic(payload))),
    }
}

fn classify<T>(err: anyhow::Error) -> Result<ExecutionResult<T>, Cancelled> {
    if err.is::<Cancelled>() {
        debug!("cancellation signal passed through result boundary");
        return Err(Cancelled);
    }

    let err = match err.downcast::<DomainError>() {
        Ok(domain) => {
            debug!(error = %domain, "captured domain error");
            return Ok(ExecutionResult::Failure(ExecutionError::Domain(domain)));
        }
        Err(other) => other,
    };

    let err = match err.downcast::<ExecutionError>() {
        Ok(nested) => {
            debug!(error = %nested, "passing through nested execution error");
            return Ok(ExecutionResult::Failure(nested));
        }
        Err(other) => other,
    };

    debug!(error = %err, "wrapping failure as execution error");
    Ok(ExecutionResult::Failure(ExecutionError::wrap(err)))
}

fn from_panic(payload: Box<dyn Any + Send>) -> ExecutionError {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    };

    debug!(%message, "captured panic from work");
    ExecutionError::wrap(Panicked { message })
}
