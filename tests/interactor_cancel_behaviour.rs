use std::sync::Arc;
use std::time::Duration;

use inflight::{Cancelled, InFlightState, Interactor, InvokeOptions, Scope};
use inflight_test_utils::work::{GatedWork, SleepWork};
use inflight_test_utils::{init_tracing, settle, with_timeout};

#[tokio::test]
async fn scope_cancellation_propagates_and_releases_counter() {
    init_tracing();

    let gate = GatedWork::new();
    let interactor = Arc::new(Interactor::new(gate.clone()));
    let scope = Scope::new();

    let handle = {
        let it = Arc::clone(&interactor);
        let scope = scope.clone();
        tokio::spawn(async move { it.invoke_with(true, InvokeOptions::new().within(&scope)).await })
    };

    settle().await;
    assert_eq!(gate.started(), 1);
    assert_eq!(interactor.in_flight().user, 1);

    scope.cancel();
    let outcome = with_timeout(handle).await.expect("join");

    assert!(matches!(outcome, Err(Cancelled)));
    assert_eq!(interactor.in_flight(), InFlightState::default());
}

#[tokio::test]
async fn child_scope_is_cancelled_by_parent() {
    init_tracing();

    let gate = GatedWork::new();
    let interactor = Arc::new(Interactor::new(gate.clone()));
    let parent = Scope::new();
    let child = parent.child();

    let handle = {
        let it = Arc::clone(&interactor);
        tokio::spawn(async move { it.invoke_with(false, InvokeOptions::new().within(&child)).await })
    };

    settle().await;
    assert_eq!(interactor.in_flight().ambient, 1);

    parent.cancel();
    let outcome = with_timeout(handle).await.expect("join");
    assert!(matches!(outcome, Err(Cancelled)));
    assert_eq!(interactor.in_flight(), InFlightState::default());
}

#[tokio::test]
async fn dropping_the_invocation_releases_counter() {
    init_tracing();

    let gate = GatedWork::new();
    let interactor = Arc::new(Interactor::new(gate.clone()));

    let handle = {
        let it = Arc::clone(&interactor);
        tokio::spawn(async move { it.invoke(false).await })
    };

    settle().await;
    assert_eq!(interactor.in_flight().ambient, 1);

    handle.abort();
    let joined = with_timeout(handle).await;
    assert!(joined.is_err_and(|e| e.is_cancelled()));
    assert_eq!(interactor.in_flight(), InFlightState::default());
}

#[tokio::test(start_paused = true)]
async fn timeout_inside_live_scope_is_a_failure() {
    init_tracing();

    let slow = Interactor::new(SleepWork);
    let scope = Scope::new();

    let outcome = slow
        .invoke_with(
            (Duration::from_secs(10), 7),
            InvokeOptions::new()
                .timeout(Duration::from_secs(1))
                .within(&scope),
        )
        .await
        .expect("scope is alive, so the timeout is a failure");

    assert!(outcome.err().is_some_and(|e| e.is_timeout()));
    assert_eq!(slow.in_flight(), InFlightState::default());
}

// Timeouts and failures share one channel. When the scope is torn down at the
// same moment the deadline expires, the caller sees cancellation, not a
// timeout failure.
#[tokio::test(start_paused = true)]
async fn cancelled_scope_wins_over_expired_deadline() {
    init_tracing();

    let slow = Interactor::new(SleepWork);
    let scope = Scope::new();
    scope.cancel();

    let outcome = slow
        .invoke_with(
            (Duration::from_secs(1), 7),
            InvokeOptions::new()
                .timeout(Duration::ZERO)
                .within(&scope),
        )
        .await;

    assert!(matches!(outcome, Err(Cancelled)));
    assert_eq!(slow.in_flight(), InFlightState::default());
}

#[tokio::test(start_paused = true)]
async fn scope_cancelled_during_sleep_is_not_reported_as_timeout() {
    init_tracing();

    let slow = Arc::new(Interactor::new(SleepWork));
    let scope = Scope::new();

    let handle = {
        let it = Arc::clone(&slow);
        let scope = scope.clone();
        tokio::spawn(async move {
            it.invoke_with(
                (Duration::from_secs(10), 7),
                InvokeOptions::new()
                    .timeout(Duration::from_secs(5))
                    .within(&scope),
            )
            .await
        })
    };

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(slow.in_flight().user, 1);
    scope.cancel();

    let outcome = handle.await.expect("join");
    assert!(matches!(outcome, Err(Cancelled)));
    assert_eq!(slow.in_flight(), InFlightState::default());
}

#[tokio::test]
async fn many_concurrent_invocations_are_all_counted() {
    init_tracing();

    let gate = GatedWork::new();
    let interactor = Arc::new(Interactor::new(gate.clone()));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let it = Arc::clone(&interactor);
            tokio::spawn(async move { it.invoke(i % 4 == 0).await })
        })
        .collect();

    settle().await;
    assert_eq!(gate.started(), 20);
    assert_eq!(
        interactor.in_flight(),
        InFlightState {
            user: 5,
            ambient: 15
        }
    );

    gate.release(20);
    for handle in handles {
        let outcome = with_timeout(handle).await.expect("join");
        assert!(outcome.expect("not cancelled").is_success());
    }
    assert_eq!(interactor.in_flight(), InFlightState::default());
}
