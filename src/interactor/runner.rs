// src/interactor/runner.rs

use std::fmt;
use std::time::Duration;

use tokio::time;
use tracing::{debug, warn};

use crate::config::InteractorConfig;
use crate::result::{run_catching, Cancelled, ExecutionResult, TimedOut};
use crate::types::Origin;

use super::busy::BusySignal;
use super::loaders::{InFlightState, Loaders};
use super::options::InvokeOptions;
use super::Work;

/// Runs a [`Work`] implementation with loading-state tracking, a deadline,
/// and result conversion.
///
/// One `Interactor` can be invoked any number of times concurrently; all
/// invocations share the same in-flight counters.
pub struct Interactor<W: Work> {
    work: W,
    loaders: Loaders,
    config: InteractorConfig,
}

impl<W: Work> fmt::Debug for Interactor<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interactor")
            .field("work", &self.work.name())
            .field("loaders", &self.loaders.state())
            .field("config", &self.config)
            .finish()
    }
}

impl<W: Work> Interactor<W> {
    pub fn new(work: W) -> Self {
        Self::with_config(work, InteractorConfig::default())
    }

    pub fn with_config(work: W, config: InteractorConfig) -> Self {
        Self {
            work,
            loaders: Loaders::new(),
            config,
        }
    }

    pub fn work(&self) -> &W {
        &self.work
    }

    pub fn config(&self) -> &InteractorConfig {
        &self.config
    }

    /// Current counters (for tests and diagnostics).
    pub fn in_flight(&self) -> InFlightState {
        self.loaders.state()
    }

    /// Subscribe to the debounced busy signal.
    pub fn in_progress(&self) -> BusySignal {
        BusySignal::new(self.loaders.subscribe(), self.config.ambient_debounce)
    }

    /// Invoke with the default timeout and the params' own user-initiated
    /// stance.
    pub async fn invoke(&self, params: W::Params) -> Result<ExecutionResult<W::Output>, Cancelled> {
        self.invoke_with(params, InvokeOptions::default()).await
    }

    /// Invoke with per-call overrides.
    ///
    /// - `Ok(Success)`: the work returned a value within the deadline.
    /// - `Ok(Failure)`: the work failed, panicked, or ran out of time.
    /// - `Err(Cancelled)`: the bound scope was cancelled, or the work raised
    ///   the cancellation signal itself.
    ///
    /// The in-flight counter is held for exactly the lifetime of this
    /// future, including when it is dropped before completion.
    pub async fn invoke_with(
        &self,
        params: W::Params,
        options: InvokeOptions,
    ) -> Result<ExecutionResult<W::Output>, Cancelled> {
        let timeout = options.timeout.unwrap_or(self.config.default_timeout);
        let user_initiated = options
            .user_initiated
            .unwrap_or_else(|| self.work.is_user_initiated(&params));
        let name = self.work.name();

        let _loader = self.loaders.acquire(Origin::from_user_initiated(user_initiated));
        debug!(
            interactor = name,
            user_initiated,
            timeout_ms = timeout.as_millis() as u64,
            "invocation started"
        );

        let guarded = run_catching(self.deadline(params, timeout));

        let outcome = match options.scope {
            Some(scope) => {
                // Scope first: a cancelled scope wins over an expired deadline.
                tokio::select! {
                    biased;
                    _ = scope.cancelled() => Err(Cancelled),
                    outcome = guarded => outcome,
                }
            }
            None => guarded.await,
        };

        match &outcome {
            Ok(result) => debug!(interactor = name, success = result.is_success(), "invocation finished"),
            Err(_) => debug!(interactor = name, "invocation cancelled"),
        }

        outcome
    }

    async fn deadline(&self, params: W::Params, timeout: Duration) -> anyhow::Result<W::Output> {
        match time::timeout(timeout, self.work.do_work(params)).await {
            Ok(outcome) => outcome,
            Err(_elapsed) => {
                warn!(
                    interactor = self.work.name(),
                    timeout_ms = timeout.as_millis() as u64,
                    "invocation timed out"
                );
                Err(TimedOut { timeout }.into())
            }
        }
    }
}

impl<W: Work<Params = ()>> Interactor<W> {
    /// Parameterless form of [`invoke`](Self::invoke).
    pub async fn run(&self) -> Result<ExecutionResult<W::Output>, Cancelled> {
        self.invoke(()).await
    }

    /// Parameterless form of [`invoke_with`](Self::invoke_with).
    pub async fn run_with(&self, options: InvokeOptions) -> Result<ExecutionResult<W::Output>, Cancelled> {
        self.invoke_with((), options).await
    }
}
