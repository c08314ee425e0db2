// src/interactor/options.rs

use std::time::Duration;

use crate::scope::Scope;

/// Per-call overrides for [`Interactor::invoke_with`](super::Interactor::invoke_with).
///
/// Anything left unset falls back to the interactor's config (timeout) or
/// to [`Work::is_user_initiated`](super::Work::is_user_initiated).
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    pub timeout: Option<Duration>,
    pub user_initiated: Option<bool>,
    pub scope: Option<Scope>,
}

impl InvokeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_initiated(mut self, user_initiated: bool) -> Self {
        self.user_initiated = Some(user_initiated);
        self
    }

    /// Shorthand for `user_initiated(false)`.
    pub fn ambient(self) -> Self {
        self.user_initiated(false)
    }

    /// Bind the invocation to `scope`: cancelling the scope cancels the
    /// invocation with the cancellation signal rather than a failure.
    pub fn within(mut self, scope: &Scope) -> Self {
        self.scope = Some(scope.clone());
        self
    }
}
