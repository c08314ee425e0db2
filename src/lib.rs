// src/lib.rs

//! Interactor execution framework.
//!
//! An [`Interactor`] wraps one unit of asynchronous business logic and adds:
//! - in-flight tracking split into user-initiated and ambient invocations
//! - a debounced busy signal for loading indicators
//! - a per-invocation deadline
//! - a result boundary turning every failure into an [`ExecutionResult`],
//!   while letting the [`Cancelled`] signal through untouched
//!
//! ```no_run
//! use futures::future::BoxFuture;
//! use inflight::{Interactor, Work};
//!
//! struct Double;
//!
//! impl Work for Double {
//!     type Params = u32;
//!     type Output = u32;
//!
//!     fn do_work(&self, params: u32) -> BoxFuture<'_, anyhow::Result<u32>> {
//!         Box::pin(async move { Ok(params * 2) })
//!     }
//! }
//!
//! # async fn demo() -> Result<(), inflight::Cancelled> {
//! let double = Interactor::new(Double);
//! let value = double.invoke(21).await?.ok();
//! assert_eq!(value, Some(42));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod interactor;
pub mod logging;
pub mod result;
pub mod scope;
pub mod types;

pub use config::InteractorConfig;
pub use interactor::{
    BusySignal, InFlightState, Interactor, InvokeOptions, Observe, SubjectInteractor,
    UserInitiated, Work,
};
pub use result::{
    run_catching, run_catching_sync, Cancelled, DomainError, ExecutionError, ExecutionResult,
};
pub use scope::{Scope, ScopeCancelled};
pub use types::Origin;
