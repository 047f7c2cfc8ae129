//! Operation telemetry on `tracing` spans.
//!
//! Each operation gets an `operation` span carrying its identifier, call id
//! and input. On completion the span records `duration_ms`, `success` and an
//! `outcome` label: the verdict for checks (`prime`, `composite`,
//! `not_palindrome`, ...), `computed` or `undefined` for value operations,
//! and the error class (`timeout`, `overloaded`, ...) for failures.

use std::task::{Context, Poll};
use std::time::Instant;

use numcalc_core::{Outcome, PalindromeVerdict, PrimeVerdict};
use tower::{Layer, Service};
use tracing::{field, info, info_span, Instrument, Span};

use crate::operation::{BoxedFuture, Operation, OperationError, OperationResponse};

/// Short label describing how an operation ended.
#[must_use]
pub fn outcome_label(result: &Result<OperationResponse, OperationError>) -> &'static str {
    match result {
        Ok(resp) => match &resp.outcome {
            Outcome::Factorial { .. } | Outcome::Fibonacci { .. } | Outcome::CubeRoot { .. } => {
                "computed"
            }
            Outcome::Undefined { .. } => "undefined",
            Outcome::Prime { verdict, .. } => match verdict {
                PrimeVerdict::Prime => "prime",
                PrimeVerdict::Composite => "composite",
                PrimeVerdict::BelowTwo => "below_two",
            },
            Outcome::Palindrome { verdict, .. } => match verdict {
                PalindromeVerdict::Palindrome => "palindrome",
                PalindromeVerdict::NotPalindrome => "not_palindrome",
                PalindromeVerdict::Negative => "negative",
            },
        },
        Err(OperationError::Unsupported(_)) => "unsupported",
        Err(OperationError::Timeout { .. }) => "timeout",
        Err(OperationError::Overloaded) => "overloaded",
        Err(OperationError::Internal(_)) => "internal",
    }
}

/// Wraps services with [`MetricsService`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService { inner }
    }
}

/// Records duration, success and outcome label for every operation.
#[derive(Debug, Clone)]
pub struct MetricsService<S> {
    inner: S,
}

impl<S> Service<Operation> for MetricsService<S>
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
        let span = info_span!(
            "operation",
            operation = op.kind.as_str(),
            call_id = op.ctx.call_id,
            number = op.number,
            duration_ms = field::Empty,
            success = field::Empty,
            outcome = field::Empty,
        );
        let started = Instant::now();
        let fut = self.inner.call(op);

        Box::pin(
            async move {
                let result = fut.await;

                let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                let success = result.is_ok();
                let outcome = outcome_label(&result);

                let span = Span::current();
                span.record("duration_ms", duration_ms);
                span.record("success", success);
                span.record("outcome", outcome);
                info!(duration_ms, success, outcome, "operation finished");

                result
            }
            .instrument(span),
        )
    }
}
