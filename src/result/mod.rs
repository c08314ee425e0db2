// src/result/mod.rs

//! Typed outcome of running a unit of work.
//!
//! - [`ExecutionResult`] is the success/failure value handed to callers.
//! - [`error`] holds the failure taxonomy and the cancellation signal.
//! - [`boundary`] is the single place where raised failures (errors and
//!   panics) are converted into an `ExecutionResult`.

pub mod boundary;
pub mod error;

pub use boundary::{run_catching, run_catching_sync};
pub use error::{Cancelled, DomainError, ExecutionError, Panicked, TimedOut};

/// Outcome of one invocation: either the produced value or a captured
/// [`ExecutionError`]. Cancellation never shows up here.
#[derive(Debug)]
#[must_use]
pub enum ExecutionResult<T> {
    Success(T),
    Failure(ExecutionError),
}

impl<T> ExecutionResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Run `action` on the value if this is a success. Returns `self`
    /// unchanged so handlers can be chained.
    pub fn on_success(self, action: impl FnOnce(&T)) -> Self {
        if let ExecutionResult::Success(ref value) = self {
            action(value);
        }
        self
    }

    /// Run `action` on the error if this is a failure. Returns `self`
    /// unchanged so handlers can be chained.
    pub fn on_failure(self, action: impl FnOnce(&ExecutionError)) -> Self {
        if let ExecutionResult::Failure(ref err) = self {
            action(err);
        }
        self
    }

    /// The value, or `None` on failure.
    pub fn ok(self) -> Option<T> {
        match self {
            ExecutionResult::Success(value) => Some(value),
            ExecutionResult::Failure(_) => None,
        }
    }

    pub fn err(self) -> Option<ExecutionError> {
        match self {
            ExecutionResult::Success(_) => None,
            ExecutionResult::Failure(err) => Some(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExecutionResult<U> {
        match self {
            ExecutionResult::Success(value) => ExecutionResult::Success(f(value)),
            ExecutionResult::Failure(err) => ExecutionResult::Failure(err),
        }
    }

    pub fn into_result(self) -> Result<T, ExecutionError> {
        self.into()
    }
}

impl<T> From<ExecutionResult<T>> for Result<T, ExecutionError> {
    fn from(result: ExecutionResult<T>) -> Self {
        match result {
            ExecutionResult::Success(value) => Ok(value),
            ExecutionResult::Failure(err) => Err(err),
        }
    }
}
