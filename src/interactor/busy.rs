// src/interactor/busy.rs

//! Debounced busy signal derived from [`InFlightState`].
//!
//! Each raw state pushed by the counters goes through three steps:
//! - debounce: a state with ambient work in flight is held for the
//!   quiescence window and replaced if a newer state arrives first; a state
//!   without ambient work is taken immediately;
//! - map: `user + ambient > 0`;
//! - de-duplicate: only changes of the boolean are yielded.

use std::time::Duration;

use futures::Stream;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

use super::loaders::InFlightState;

/// One subscription to an interactor's busy state.
///
/// The first value is the current state (subject to the same debounce),
/// then every change. Yields `None` once the interactor has been dropped
/// and any held state has been flushed.
#[derive(Debug)]
pub struct BusySignal {
    rx: watch::Receiver<InFlightState>,
    window: Duration,
    pending: Option<Pending>,
    last: Option<bool>,
    primed: bool,
    closed: bool,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    state: InFlightState,
    due: Instant,
}

impl BusySignal {
    pub(crate) fn new(rx: watch::Receiver<InFlightState>, window: Duration) -> Self {
        Self {
            rx,
            window,
            pending: None,
            last: None,
            primed: false,
            closed: false,
        }
    }

    /// Wait for the next busy value.
    pub async fn next(&mut self) -> Option<bool> {
        if !self.primed {
            self.primed = true;
            let state = *self.rx.borrow_and_update();
            if let Some(busy) = self.offer(state) {
                return Some(busy);
            }
        }

        loop {
            if self.closed {
                // Upstream finished: a held state is published right away.
                return self.pending.take().and_then(|p| self.emit(p.state));
            }

            let due = self.pending.map(|p| p.due);

            tokio::select! {
                changed = self.rx.changed() => match changed {
                    Ok(()) => {
                        let state = *self.rx.borrow_and_update();
                        if let Some(busy) = self.offer(state) {
                            return Some(busy);
                        }
                    }
                    Err(_) => self.closed = true,
                },
                _ = sleep_until(due.unwrap_or_else(Instant::now)), if due.is_some() => {
                    if let Some(pending) = self.pending.take() {
                        if let Some(busy) = self.emit(pending.state) {
                            return Some(busy);
                        }
                    }
                }
            }
        }
    }

    /// Last value yielded by this subscription, if any.
    pub fn last(&self) -> Option<bool> {
        self.last
    }

    /// Adapt the subscription into a `futures::Stream`.
    pub fn into_stream(self) -> impl Stream<Item = bool> + Send + 'static {
        futures::stream::unfold(self, |mut signal| async move {
            signal.next().await.map(|busy| (busy, signal))
        })
    }

    fn offer(&mut self, state: InFlightState) -> Option<bool> {
        if state.ambient > 0 && !self.window.is_zero() {
            trace!(user = state.user, ambient = state.ambient, "holding ambient busy state");
            self.pending = Some(Pending {
                state,
                due: Instant::now() + self.window,
            });
            None
        } else {
            self.pending = None;
            self.emit(state)
        }
    }

    fn emit(&mut self, state: InFlightState) -> Option<bool> {
        let busy = state.is_busy();
        if self.last == Some(busy) {
            return None;
        }
        self.last = Some(busy);
        Some(busy)
    }
}
