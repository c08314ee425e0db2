// src/interactor/loaders.rs

//! In-flight counters shared by all invocations of one interactor.

use tokio::sync::watch;
use tracing::trace;

use crate::types::Origin;

/// Number of invocations currently running, split by origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InFlightState {
    pub user: usize,
    pub ambient: usize,
}

impl InFlightState {
    pub fn total(&self) -> usize {
        self.user + self.ambient
    }

    pub fn is_busy(&self) -> bool {
        self.total() > 0
    }

    fn count_mut(&mut self, origin: Origin) -> &mut usize {
        match origin {
            Origin::User => &mut self.user,
            Origin::Ambient => &mut self.ambient,
        }
    }
}

/// Owner of the [`InFlightState`].
///
/// Every update goes through `send_modify`, which applies the
/// read-modify-write under the channel's lock, so concurrent invocations
/// never lose an increment or decrement. Subscribers receive each new state.
#[derive(Debug)]
pub struct Loaders {
    tx: watch::Sender<InFlightState>,
}

impl Default for Loaders {
    fn default() -> Self {
        Self::new()
    }
}

impl Loaders {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(InFlightState::default());
        Self { tx }
    }

    /// Snapshot of the counters.
    pub fn state(&self) -> InFlightState {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<InFlightState> {
        self.tx.subscribe()
    }

    /// Count one invocation of the given origin until the guard is dropped.
    pub fn acquire(&self, origin: Origin) -> LoaderGuard<'_> {
        self.tx.send_modify(|state| {
            *state.count_mut(origin) += 1;
            trace!(?origin, user = state.user, ambient = state.ambient, "loader added");
        });
        LoaderGuard {
            loaders: self,
            origin,
        }
    }

    fn release(&self, origin: Origin) {
        self.tx.send_modify(|state| {
            let count = state.count_mut(origin);
            debug_assert!(*count > 0, "loader released more often than acquired");
            *count = count.saturating_sub(1);
            trace!(?origin, user = state.user, ambient = state.ambient, "loader removed");
        });
    }
}

/// Holds one slot in the in-flight counters.
///
/// The decrement runs in `Drop`, so it happens exactly once on every exit
/// path: normal return, error, timeout, or the owning future being dropped.
#[derive(Debug)]
#[must_use = "the loader is released as soon as the guard is dropped"]
pub struct LoaderGuard<'a> {
    loaders: &'a Loaders,
    origin: Origin,
}

impl LoaderGuard<'_> {
    pub fn origin(&self) -> Origin {
        self.origin
    }
}

impl Drop for LoaderGuard<'_> {
    fn drop(&mut self) {
        self.loaders.release(self.origin);
    }
}
