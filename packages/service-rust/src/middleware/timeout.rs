//! Per-operation deadline.
//!
//! Computations run on the blocking pool and cannot be cancelled, so a
//! deadline only stops the caller from waiting. The abandoned computation
//! runs to completion, keeps its computation slot in the router until then,
//! and its result is dropped.

use std::task::{Context, Poll};
use std::time::Duration;

use tower::{Layer, Service};
use tracing::debug;

use crate::operation::{BoxedFuture, Operation, OperationError, OperationResponse};

/// Applies each operation's `ctx.call_timeout_ms` as its deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutLayer;

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimeoutService { inner }
    }
}

/// See [`TimeoutLayer`].
#[derive(Debug, Clone)]
pub struct TimeoutService<S> {
    inner: S,
}

impl<S> Service<Operation> for TimeoutService<S>
where
    S: Service<Operation, Response = OperationResponse, Error = OperationError> + Send,
    S::Future: Send + 'static,
{
    type Response = OperationResponse;
    type Error = OperationError;
    type Future = BoxedFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let timeout_ms = op.ctx.call_timeout_ms;
        let operation = op.kind.as_str();
        let call_id = op.ctx.call_id;
        let computation = self.inner.call(op);

        Box::pin(async move {
            let deadline = Duration::from_millis(timeout_ms);
            if let Ok(result) = tokio::time::timeout(deadline, computation).await {
                return result;
            }
            // Dropping `computation` here does not stop the blocking task.
            debug!(
                operation,
                call_id,
                timeout_ms,
                "deadline passed, computation left to finish on the blocking pool"
            );
            Err(OperationError::Timeout { timeout_ms })
        })
    }
}
