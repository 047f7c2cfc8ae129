//! Operation routing: dispatches `Operation` to the registry by `kind`.

use std::sync::Arc;
use std::task::{Context, Poll};

use numcalc_core::OperationRegistry;
use tokio::sync::Semaphore;
use tower::Service;

use super::operation::{BoxedFuture, Operation, OperationError, OperationResponse};

// ---------------------------------------------------------------------------
// OperationRouter
// ---------------------------------------------------------------------------

/// Innermost service of the pipeline: runs the computation for an `Operation`.
///
/// Computations are CPU-bound, so each one runs on Tokio's blocking pool and
/// must first take one of `max_concurrent` computation slots. The slot moves
/// into the blocking task and is released only when the computation returns,
/// so work abandoned by the timeout layer keeps counting against the limit
/// until it has actually stopped. When no slot is free the operation is shed
/// with `OperationError::Overloaded`.
///
/// A panic inside a computation becomes `OperationError::Internal` for that
/// operation only. Clones share the registry and the slots.
#[derive(Debug, Clone)]
pub struct OperationRouter {
    registry: Arc<OperationRegistry>,
    slots: Arc<Semaphore>,
}

impl OperationRouter {
    /// Create a router over a shared registry allowing `max_concurrent`
    /// computations at once.
    #[must_use]
    pub fn new(registry: Arc<OperationRegistry>, max_concurrent: u32) -> Self {
        Self {
            registry,
            slots: Arc::new(Semaphore::new(max_concurrent as usize)),
        }
    }

    /// Returns the shared registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<OperationRegistry> {
        &self.registry
    }

    /// Number of computation slots currently free.
    #[must_use]
    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }
}

impl Service<Operation> for OperationRouter {
    type Response = OperationResponse;
    type Error = OperationError;
    type Future = BoxedFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let Ok(slot) = Arc::clone(&self.slots).try_acquire_owned() else {
            tracing::warn!(
                operation = op.kind.as_str(),
                call_id = op.ctx.call_id,
                "no free computation slot, shedding operation"
            );
            return Box::pin(async { Err(OperationError::Overloaded) });
        };

        let registry = Arc::clone(&self.registry);
        let call_id = op.ctx.call_id;
        Box::pin(async move {
            let computation = tokio::task::spawn_blocking(move || {
                let _slot = slot;
                registry.get(op.kind).compute(op.number)
            });
            match computation.await {
                Ok(outcome) => Ok(OperationResponse { call_id, outcome }),
                Err(e) => Err(OperationError::Internal(anyhow::anyhow!(
                    "computation failed: {e}"
                ))),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
