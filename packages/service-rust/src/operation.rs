//! Operation types carried through the pipeline.

use std::future::Future;
use std::pin::Pin;

use numcalc_core::{OperationKind, Outcome, UnsupportedOperation};

/// Boxed future returned by every service in the pipeline.
pub type BoxedFuture =
    Pin<Box<dyn Future<Output = Result<OperationResponse, OperationError>> + Send>>;

/// Context carried with every operation through the pipeline.
#[derive(Debug, Clone)]
pub struct OperationContext {
    /// Unique per process; correlates log lines for one operation.
    pub call_id: u64,
    pub call_timeout_ms: u64,
}

impl OperationContext {
    #[must_use]
    pub fn new(call_id: u64, call_timeout_ms: u64) -> Self {
        Self {
            call_id,
            call_timeout_ms,
        }
    }
}

/// One classified computation request: a known operation and its input.
#[derive(Debug, Clone)]
pub struct Operation {
    pub ctx: OperationContext,
    pub kind: OperationKind,
    pub number: i64,
}

impl Operation {
    #[must_use]
    pub fn ctx(&self) -> &OperationContext {
        &self.ctx
    }
}

/// Successful response from the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResponse {
    pub call_id: u64,
    pub outcome: Outcome,
}

/// Per-operation failures. None of these abort sibling operations.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedOperation),
    #[error("operation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("calculator overloaded, try again later")]
    Overloaded,
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
