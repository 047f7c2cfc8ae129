//! Identifier classification: converts a raw identifier into a typed `Operation`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use numcalc_core::OperationKind;

use super::config::ServiceConfig;
use super::operation::{Operation, OperationContext, OperationError};

// ---------------------------------------------------------------------------
// OperationService
// ---------------------------------------------------------------------------

/// Classifies requested identifiers into typed `Operation` values.
///
/// Each call gets a unique call ID and the configured timeout. This is the
/// last point where identifiers exist as free-form strings.
pub struct OperationService {
    config: Arc<ServiceConfig>,
    call_id_counter: AtomicU64,
}

impl OperationService {
    /// Create a new `OperationService`.
    #[must_use]
    pub fn new(config: Arc<ServiceConfig>) -> Self {
        Self {
            config,
            call_id_counter: AtomicU64::new(1),
        }
    }

    /// Generate a unique call ID for each operation.
    fn next_call_id(&self) -> u64 {
        self.call_id_counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Classify `identifier` applied to `number`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Unsupported` naming the identifier when it is
    /// not one of the known operations. No call ID is consumed in that case.
    pub fn classify(&self, number: i64, identifier: &str) -> Result<Operation, OperationError> {
        let kind = identifier.parse::<OperationKind>()?;
        let ctx = OperationContext::new(
            self.next_call_id(),
            self.config.default_operation_timeout_ms,
        );
        Ok(Operation { ctx, kind, number })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> OperationService {
        OperationService::new(Arc::new(ServiceConfig {
            default_operation_timeout_ms: 1234,
            ..ServiceConfig::default()
        }))
    }

    #[test]
    fn classifies_every_known_identifier() {
        let svc = service();
        for kind in OperationKind::ALL {
            let op = svc.classify(9, kind.as_str()).unwrap();
            assert_eq!(op.kind, kind);
            assert_eq!(op.number, 9);
        }
    }

    #[test]
    fn applies_configured_timeout() {
        let op = service().classify(3, "prime").unwrap();
        assert_eq!(op.ctx.call_timeout_ms, 1234);
    }

    #[test]
    fn call_ids_are_unique_and_increasing() {
        let svc = service();
        let a = svc.classify(1, "prime").unwrap().ctx.call_id;
        let b = svc.classify(1, "factorial").unwrap().ctx.call_id;
        assert!(b > a);
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let err = service().classify(1, "bogus").unwrap_err();
        assert!(matches!(
            err,
            OperationError::Unsupported(ref e) if e.name == "bogus"
        ));
    }
}
