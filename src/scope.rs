// src/scope.rs

//! Cancellable execution scope.
//!
//! A [`Scope`] is the "caller's execution context" in interactor terms: work
//! can be launched into it, invocations can be bound to it, and cancelling
//! it tears all of that down. Child scopes are cancelled with their parent.

use std::future::Future;

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Returned by [`Scope::launch_or_throw`] when the scope is already gone.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot launch into a cancelled scope")]
pub struct ScopeCancelled;

#[derive(Debug, Clone, Default)]
pub struct Scope {
    token: CancellationToken,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope that is cancelled when `self` is, but can also be cancelled
    /// on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        debug!("cancelling scope");
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the scope is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Spawn `fut` on the current runtime, tied to this scope.
    ///
    /// Fails instead of silently doing nothing when the scope is already
    /// cancelled. If the scope is cancelled while `fut` runs, `fut` is
    /// dropped and the handle resolves to `None`.
    pub fn launch_or_throw<F>(&self, fut: F) -> Result<JoinHandle<Option<F::Output>>, ScopeCancelled>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        if self.is_cancelled() {
            return Err(ScopeCancelled);
        }

        let token = self.token.clone();
        Ok(tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("launched task dropped by scope cancellation");
                    None
                }
                out = fut => Some(out),
            }
        }))
    }
}
