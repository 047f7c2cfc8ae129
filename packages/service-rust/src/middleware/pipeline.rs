//! Pipeline composition: wraps the router in the middleware layers.

use std::sync::Arc;

use numcalc_core::OperationRegistry;
use tower::ServiceBuilder;

use super::metrics::{MetricsLayer, MetricsService};
use super::timeout::{TimeoutLayer, TimeoutService};
use crate::config::ServiceConfig;
use crate::router::OperationRouter;

/// The fully layered operation service. Cheap to clone; clones share the
/// registry and the router's computation slots.
pub type OperationPipeline = MetricsService<TimeoutService<OperationRouter>>;

/// Build the operation pipeline over `registry`.
///
/// Layer order (outermost to innermost):
/// 1. `MetricsLayer` -- records every ending, including timeouts and sheds
/// 2. `TimeoutLayer` -- enforce per-operation deadlines
/// 3. `OperationRouter` -- take a computation slot and run on the blocking pool
#[must_use]
pub fn build_operation_pipeline(
    registry: Arc<OperationRegistry>,
    config: &ServiceConfig,
) -> OperationPipeline {
    ServiceBuilder::new()
        .layer(MetricsLayer)
        .layer(TimeoutLayer)
        .service(OperationRouter::new(
            registry,
            config.max_concurrent_operations,
        ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use numcalc_core::{MathOperation, OperationKind, Outcome};
    use tower::ServiceExt;

    use super::*;
    use crate::operation::{Operation, OperationContext, OperationError};

    fn make_op(kind: OperationKind, number: i64, timeout_ms: u64) -> Operation {
        Operation {
            ctx: OperationContext::new(42, timeout_ms),
            kind,
            number,
        }
    }

    fn pipeline(registry: OperationRegistry, config: &ServiceConfig) -> OperationPipeline {
        build_operation_pipeline(Arc::new(registry), config)
    }

    struct SlowFibonacci;

    impl MathOperation for SlowFibonacci {
        fn kind(&self) -> OperationKind {
            OperationKind::Fibonacci
        }

        fn compute(&self, number: i64) -> Outcome {
            std::thread::sleep(Duration::from_millis(400));
            numcalc_core::ops::FibonacciOperation.compute(number)
        }
    }

    #[tokio::test]
    async fn pipeline_routes_through_all_layers() {
        let svc = pipeline(OperationRegistry::new(), &ServiceConfig::default());
        let resp = svc
            .oneshot(make_op(OperationKind::Fibonacci, 5, 5000))
            .await
            .unwrap();
        assert_eq!(resp.call_id, 42);
        assert_eq!(
            resp.outcome.to_string(),
            "Fibonacci series with 5 terms: [0, 1, 1, 2, 3]"
        );
    }

    #[tokio::test]
    async fn zero_capacity_sheds_everything() {
        let config = ServiceConfig {
            max_concurrent_operations: 0,
            ..ServiceConfig::default()
        };
        let err = pipeline(OperationRegistry::new(), &config)
            .oneshot(make_op(OperationKind::Prime, 7, 5000))
            .await
            .unwrap_err();
        assert!(matches!(err, OperationError::Overloaded));
    }

    #[tokio::test]
    async fn timed_out_work_counts_against_capacity() {
        let config = ServiceConfig {
            max_concurrent_operations: 1,
            ..ServiceConfig::default()
        };
        let svc = pipeline(
            OperationRegistry::new().with_operation(Box::new(SlowFibonacci)),
            &config,
        );

        let first = svc
            .clone()
            .oneshot(make_op(OperationKind::Fibonacci, 10, 1))
            .await
            .unwrap_err();
        assert!(matches!(first, OperationError::Timeout { timeout_ms: 1 }));

        let second = svc
            .clone()
            .oneshot(make_op(OperationKind::Prime, 7, 1000))
            .await
            .unwrap_err();
        assert!(matches!(second, OperationError::Overloaded));
    }
}
