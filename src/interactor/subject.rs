// src/interactor/subject.rs

//! Observable interactors.
//!
//! Where [`Work`](super::Work) produces one value per call, an [`Observe`]
//! implementation maps params to a stream. [`SubjectInteractor`] keeps the
//! latest params and every subscriber follows the stream built for them,
//! switching over whenever new params are triggered.

use std::sync::Arc;

use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tracing::debug;

pub trait Observe: Send + Sync + 'static {
    type Params: Clone + Send + Sync + 'static;
    type Item: Send + 'static;

    fn create_observable(&self, params: Self::Params) -> BoxStream<'static, Self::Item>;
}

pub struct SubjectInteractor<O: Observe> {
    observe: Arc<O>,
    params: watch::Sender<Option<O::Params>>,
}

impl<O: Observe> SubjectInteractor<O> {
    pub fn new(observe: O) -> Self {
        let (params, _rx) = watch::channel(None);
        Self {
            observe: Arc::new(observe),
            params,
        }
    }

    /// Publish new params. Subscribers drop the stream they were following
    /// and switch to the one built for `params`, even if equal to the last.
    pub fn trigger(&self, params: O::Params) {
        self.params.send_replace(Some(params));
        debug!("subject interactor triggered");
    }

    /// Items from the observable of the most recent params.
    ///
    /// Nothing is yielded until the first [`trigger`](Self::trigger). The
    /// stream ends once the interactor is dropped and the current
    /// observable is exhausted.
    pub fn stream(&self) -> impl Stream<Item = O::Item> + Send + 'static {
        let switch = Switch {
            observe: Arc::clone(&self.observe),
            rx: self.params.subscribe(),
            inner: None,
            primed: false,
            params_closed: false,
        };

        futures::stream::unfold(switch, |mut switch| async move {
            switch.next_item().await.map(|item| (item, switch))
        })
    }
}

/// Per-subscriber "switch to latest" state.
struct Switch<O: Observe> {
    observe: Arc<O>,
    rx: watch::Receiver<Option<O::Params>>,
    inner: Option<BoxStream<'static, O::Item>>,
    primed: bool,
    params_closed: bool,
}

impl<O: Observe> Switch<O> {
    async fn next_item(&mut self) -> Option<O::Item> {
        if !self.primed {
            self.primed = true;
            let current = self.rx.borrow_and_update().clone();
            self.inner = current.map(|p| self.observe.create_observable(p));
        }

        loop {
            if self.params_closed && self.inner.is_none() {
                return None;
            }

            let Self {
                observe,
                rx,
                inner,
                params_closed,
                ..
            } = self;

            // New params take priority over items still buffered upstream.
            tokio::select! {
                biased;
                changed = rx.changed(), if !*params_closed => match changed {
                    Ok(()) => {
                        let params = rx.borrow_and_update().clone();
                        *inner = params.map(|p| observe.create_observable(p));
                    }
                    Err(_) => *params_closed = true,
                },
                item = next_from(inner) => match item {
                    Some(item) => return Some(item),
                    None => *inner = None,
                },
            }
        }
    }
}

async fn next_from<S: Stream + Unpin>(inner: &mut Option<S>) -> Option<S::Item> {
    match inner {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}
