use std::fmt;

use inflight::result::{
    run_catching, run_catching_sync, Cancelled, DomainError, ExecutionError, ExecutionResult,
    Panicked,
};
use inflight_test_utils::init_tracing;

#[derive(Debug, Clone, PartialEq, Eq)]
struct OutOfStock {
    sku: u32,
}

impl fmt::Display for OutOfStock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sku {} is out of stock", self.sku)
    }
}

impl std::error::Error for OutOfStock {}

async fn explode() -> anyhow::Result<u32> {
    panic!("boom")
}

#[tokio::test]
async fn success_is_captured() {
    init_tracing();

    let outcome = run_catching(async { Ok::<_, anyhow::Error>(7) }).await;
    assert!(matches!(outcome, Ok(ExecutionResult::Success(7))));
}

#[tokio::test]
async fn domain_error_passes_through_without_extra_layer() {
    init_tracing();

    let outcome = run_catching(async {
        Err::<u32, _>(anyhow::Error::from(DomainError::new(OutOfStock { sku: 3 })))
    })
    .await
    .expect("domain errors are not cancellation");

    match outcome {
        ExecutionResult::Failure(ExecutionError::Domain(err)) => {
            assert_eq!(err.downcast_ref::<OutOfStock>(), Some(&OutOfStock { sku: 3 }));
            assert_eq!(err.to_string(), "sku 3 is out of stock");
        }
        other => panic!("expected domain failure, got {other:?}"),
    }
}

#[tokio::test]
async fn plain_error_is_wrapped_with_cause() {
    init_tracing();

    let outcome = run_catching(async { Err::<u32, _>(anyhow::anyhow!("disk full")) })
        .await
        .expect("plain errors are not cancellation");

    let err = outcome.err().expect("failure");
    assert!(!err.is_domain());
    assert_eq!(err.cause().map(|c| c.to_string()), Some("disk full".to_string()));
    assert_eq!(err.to_string(), "execution failed: disk full");
}

#[tokio::test]
async fn cancellation_is_never_a_failure() {
    init_tracing();

    let outcome = run_catching(async { Err::<u32, _>(anyhow::Error::from(Cancelled)) }).await;
    assert!(matches!(outcome, Err(Cancelled)));
}

#[tokio::test]
async fn cancellation_with_context_is_still_cancellation() {
    init_tracing();

    let outcome = run_catching(async {
        Err::<u32, _>(anyhow::Error::from(Cancelled).context("while loading profile"))
    })
    .await;
    assert!(matches!(outcome, Err(Cancelled)));
}

#[tokio::test]
async fn nested_execution_error_is_not_wrapped_twice() {
    init_tracing();

    let outcome = run_catching(async {
        Err::<u32, _>(anyhow::Error::from(ExecutionError::wrap(anyhow::anyhow!("inner"))))
    })
    .await
    .expect("not cancellation");

    let err = outcome.err().expect("failure");
    assert_eq!(err.cause().map(|c| c.to_string()), Some("inner".to_string()));
}

#[tokio::test]
async fn panic_in_async_work_becomes_failure() {
    init_tracing();

    let outcome = run_catching(explode()).await.expect("panics are not cancellation");

    let err = outcome.err().expect("failure");
    assert!(err.is_panic());
    let panicked = err
        .cause()
        .and_then(|c| c.downcast_ref::<Panicked>())
        .expect("panic cause");
    assert_eq!(panicked.message, "boom");
}

#[test]
fn divide_by_zero_is_wrapped_execution_failure() {
    init_tracing();

    let divisor = std::hint::black_box(0u32);
    let outcome = run_catching_sync(|| Ok(10 / divisor)).expect("not cancellation");

    match outcome {
        ExecutionResult::Failure(err @ ExecutionError::Execution { .. }) => {
            assert!(err.is_panic());
            assert!(err.to_string().contains("divide by zero"));
        }
        other => panic!("expected wrapped failure, got {other:?}"),
    }
}

#[test]
fn sync_boundary_follows_the_same_rules() {
    init_tracing();

    let ok = run_catching_sync(|| Ok(5)).expect("not cancellation");
    assert_eq!(ok.ok(), Some(5));

    let cancelled = run_catching_sync(|| Err::<u32, _>(anyhow::Error::from(Cancelled)));
    assert!(matches!(cancelled, Err(Cancelled)));

    let domain = run_catching_sync(|| Err::<u32, _>(anyhow::Error::from(DomainError::msg("not allowed"))))
        .expect("not cancellation");
    let err = domain.err().expect("failure");
    assert_eq!(
        err.as_domain().map(|d| d.to_string()),
        Some("not allowed".to_string())
    );
}

#[test]
fn result_handlers_chain_and_extract() {
    let mut seen = Vec::new();

    let success: ExecutionResult<u32> = ExecutionResult::Success(2);
    let success = success
        .on_success(|v| seen.push(format!("ok {v}")))
        .on_failure(|e| seen.push(format!("err {e}")));
    assert!(success.is_success());
    assert_eq!(success.map(|v| v * 10).into_result().ok(), Some(20));

    let failure: ExecutionResult<u32> =
        ExecutionResult::Failure(ExecutionError::wrap(anyhow::anyhow!("nope")));
    let failure = failure
        .on_success(|v| seen.push(format!("ok {v}")))
        .on_failure(|e| seen.push(format!("err {e}")));
    assert!(failure.is_failure());
    assert_eq!(failure.ok(), None);

    assert_eq!(
        seen,
        vec!["ok 2".to_string(), "err execution failed: nope".to_string()]
    );
}
