// src/result/error.rs

//! Failure taxonomy carried by [`ExecutionResult::Failure`].
//!
//! [`ExecutionResult::Failure`]: crate::result::ExecutionResult::Failure

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Error captured by the result boundary.
///
/// - `Domain`: raised on purpose by business logic; passed through as-is.
/// - `Execution`: anything else (including timeouts and panics), with the
///   underlying cause kept as `source`.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("execution failed: {source}")]
    Execution {
        #[source]
        source: anyhow::Error,
    },
}

impl ExecutionError {
    /// Wrap an arbitrary failure in the generic execution kind.
    pub fn wrap(source: impl Into<anyhow::Error>) -> Self {
        ExecutionError::Execution {
            source: source.into(),
        }
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, ExecutionError::Domain(_))
    }

    /// The domain error, if this failure was raised deliberately.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            ExecutionError::Domain(err) => Some(err),
            ExecutionError::Execution { .. } => None,
        }
    }

    /// The wrapped cause for `Execution` failures.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        match self {
            ExecutionError::Domain(_) => None,
            ExecutionError::Execution { source } => Some(source),
        }
    }

    /// True when the failure came from an invocation deadline.
    pub fn is_timeout(&self) -> bool {
        self.cause().is_some_and(|c| c.is::<TimedOut>())
    }

    /// True when the failure came from a panic inside the work.
    pub fn is_panic(&self) -> bool {
        self.cause().is_some_and(|c| c.is::<Panicked>())
    }
}

/// An error that business logic raises deliberately.
///
/// Work units return it through `anyhow` (`Err(DomainError::new(..).into())`
/// or `bail!`-style), and the boundary hands it back unchanged inside
/// [`ExecutionError::Domain`].
pub struct DomainError {
    inner: Box<dyn StdError + Send + Sync + 'static>,
}

impl DomainError {
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            inner: Box::new(err),
        }
    }

    /// Build a domain error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self {
            inner: message.into(),
        }
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    pub fn is<E: StdError + 'static>(&self) -> bool {
        self.inner.is::<E>()
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.inner
    }
}

impl fmt::Debug for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DomainError").field(&self.inner).finish()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl StdError for DomainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

/// The reserved cancellation signal.
///
/// Never stored in an [`ExecutionResult`](crate::result::ExecutionResult);
/// the boundary returns it as `Err(Cancelled)` so `?` unwinds the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Cause recorded when an invocation outlives its deadline.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("timed out after {timeout:?}")]
pub struct TimedOut {
    pub timeout: Duration,
}

/// Cause recorded when the work panicked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("work panicked: {message}")]
pub struct Panicked {
    pub message: String,
}
