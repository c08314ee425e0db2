use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, BoxStream};
use futures::StreamExt;

use inflight::{Observe, SubjectInteractor};
use inflight_test_utils::init_tracing;

/// Emits `base * 10 + i` for i in 0..3; stays open when `keep_open`.
struct Counter {
    keep_open: bool,
    created: Arc<AtomicUsize>,
}

impl Observe for Counter {
    type Params = u32;
    type Item = u32;

    fn create_observable(&self, base: u32) -> BoxStream<'static, u32> {
        self.created.fetch_add(1, Ordering::SeqCst);
        let items = stream::iter((0..3).map(move |i| base * 10 + i));
        if self.keep_open {
            items.chain(stream::pending()).boxed()
        } else {
            items.boxed()
        }
    }
}

fn counter(keep_open: bool) -> (SubjectInteractor<Counter>, Arc<AtomicUsize>) {
    let created = Arc::new(AtomicUsize::new(0));
    let subject = SubjectInteractor::new(Counter {
        keep_open,
        created: Arc::clone(&created),
    });
    (subject, created)
}

#[tokio::test(start_paused = true)]
async fn nothing_is_emitted_before_first_trigger() {
    init_tracing();

    let (subject, created) = counter(true);
    let mut items = Box::pin(subject.stream());

    let waited = tokio::time::timeout(Duration::from_secs(1), items.next()).await;
    assert!(waited.is_err());
    assert_eq!(created.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn follows_the_latest_params() {
    init_tracing();

    let (subject, created) = counter(true);
    let mut items = Box::pin(subject.stream());

    subject.trigger(1);
    assert_eq!(items.next().await, Some(10));
    assert_eq!(items.next().await, Some(11));
    assert_eq!(items.next().await, Some(12));

    subject.trigger(2);
    assert_eq!(items.next().await, Some(20));
    assert_eq!(items.next().await, Some(21));
    assert_eq!(created.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn late_subscriber_starts_from_current_params() {
    init_tracing();

    let (subject, _created) = counter(true);
    subject.trigger(4);

    let mut items = Box::pin(subject.stream());
    assert_eq!(items.next().await, Some(40));
}

#[tokio::test(start_paused = true)]
async fn retrigger_with_same_params_restarts_observable() {
    init_tracing();

    let (subject, created) = counter(true);
    let mut items = Box::pin(subject.stream());

    subject.trigger(3);
    assert_eq!(items.next().await, Some(30));

    subject.trigger(3);
    assert_eq!(items.next().await, Some(30));
    assert_eq!(created.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn stream_ends_after_interactor_is_dropped_and_observable_drains() {
    init_tracing();

    let (subject, _created) = counter(false);
    let items = subject.stream();
    subject.trigger(5);
    drop(subject);

    let collected: Vec<u32> = items.collect().await;
    assert_eq!(collected, vec![50, 51, 52]);
}
