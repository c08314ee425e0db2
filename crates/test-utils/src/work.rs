//! Work units for driving interactors in tests.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use inflight::Work;
use tokio::sync::Semaphore;

/// Work backed by a closure.
pub struct FnWork<F, P, R> {
    f: F,
    user_initiated: bool,
    _types: PhantomData<fn(P) -> R>,
}

impl<F, P, R> FnWork<F, P, R> {
    pub fn new<Fut>(f: F) -> Self
    where
        F: Fn(P) -> Fut,
        Fut: Future<Output = anyhow::Result<R>>,
    {
        Self {
            f,
            user_initiated: true,
            _types: PhantomData,
        }
    }

    /// Treat invocations as ambient unless the caller says otherwise.
    pub fn ambient(mut self) -> Self {
        self.user_initiated = false;
        self
    }
}

impl<P, R, F, Fut> Work for FnWork<F, P, R>
where
    P: Send + 'static,
    R: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
{
    type Params = P;
    type Output = R;

    fn do_work(&self, params: P) -> BoxFuture<'_, anyhow::Result<R>> {
        Box::pin((self.f)(params))
    }

    fn is_user_initiated(&self, _params: &P) -> bool {
        self.user_initiated
    }

    fn name(&self) -> &str {
        "fn-work"
    }
}

/// Sleeps for the given duration, then returns `params`.
#[derive(Debug, Default)]
pub struct SleepWork;

impl Work for SleepWork {
    type Params = (Duration, u64);
    type Output = u64;

    fn do_work(&self, (delay, value): (Duration, u64)) -> BoxFuture<'_, anyhow::Result<u64>> {
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(value)
        })
    }

    fn name(&self) -> &str {
        "sleep-work"
    }
}

/// Work that blocks until the test releases it.
///
/// Every invocation bumps `started`, then waits for one permit from the gate.
#[derive(Clone, Debug)]
pub struct GatedWork {
    gate: Arc<Semaphore>,
    started: Arc<AtomicUsize>,
}

impl Default for GatedWork {
    fn default() -> Self {
        Self::new()
    }
}

impl GatedWork {
    pub fn new() -> Self {
        Self {
            gate: Arc::new(Semaphore::new(0)),
            started: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Let `n` waiting (or future) invocations finish.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

impl Work for GatedWork {
    type Params = bool;
    type Output = ();

    fn do_work(&self, _user_initiated: bool) -> BoxFuture<'_, anyhow::Result<()>> {
        Box::pin(async move {
            self.started.fetch_add(1, Ordering::SeqCst);
            let permit = self.gate.acquire().await?;
            permit.forget();
            Ok(())
        })
    }

    fn is_user_initiated(&self, user_initiated: &bool) -> bool {
        *user_initiated
    }

    fn name(&self) -> &str {
        "gated-work"
    }
}
