use std::collections::BTreeSet;

use tracing::debug;

use crate::operation::{MathOperation, OperationKind, UnsupportedOperation};
use crate::ops::{
    CubeRootOperation, FactorialOperation, FibonacciOperation, PalindromeOperation,
    PrimeOperation,
};
use crate::outcome::OperationResult;

// ---------------------------------------------------------------------------
// OperationRegistry
// ---------------------------------------------------------------------------

/// Read-only table of every supported operation.
///
/// Built once by [`OperationRegistry::new`] and never mutated afterwards, so a
/// single instance can be shared across threads (typically behind an `Arc`)
/// without locking.
///
/// Provides two lookup mechanisms:
/// - **By kind** (`get`): infallible, one slot per `OperationKind`
/// - **By identifier** (`lookup`): parses external input, unknown names fail
///   with [`UnsupportedOperation`]
pub struct OperationRegistry {
    /// Slot `i` holds the implementation for `OperationKind::ALL[i]`.
    slots: [Box<dyn MathOperation>; 5],
}

impl OperationRegistry {
    /// Creates the registry with all five operations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [
                Box::new(FactorialOperation),
                Box::new(PalindromeOperation),
                Box::new(FibonacciOperation),
                Box::new(PrimeOperation),
                Box::new(CubeRootOperation),
            ],
        }
    }

    /// Replaces the implementation registered for `operation.kind()`.
    ///
    /// Intended for hosts that wrap or instrument a built-in computation.
    #[must_use]
    pub fn with_operation(mut self, operation: Box<dyn MathOperation>) -> Self {
        let slot = operation.kind().index();
        self.slots[slot] = operation;
        self
    }

    /// Returns the implementation for `kind`.
    #[must_use]
    pub fn get(&self, kind: OperationKind) -> &dyn MathOperation {
        self.slots[kind.index()].as_ref()
    }

    /// Resolves an external identifier to its implementation.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedOperation`] naming `identifier` when it is not one
    /// of the known identifiers.
    pub fn lookup(&self, identifier: &str) -> Result<&dyn MathOperation, UnsupportedOperation> {
        let kind = identifier.parse::<OperationKind>()?;
        Ok(self.get(kind))
    }

    /// Returns the set of known identifiers.
    #[must_use]
    pub fn known_operation_ids(&self) -> BTreeSet<&'static str> {
        self.slots.iter().map(|op| op.kind().as_str()).collect()
    }

    /// Runs the operation named `identifier` on `number`.
    ///
    /// Unknown identifiers produce an error-flagged result rather than an
    /// `Err`, so one bad identifier in a batch never affects its siblings.
    #[must_use]
    pub fn run(&self, number: i64, identifier: &str) -> OperationResult {
        match self.lookup(identifier) {
            Ok(op) => OperationResult::success(op.compute(number)),
            Err(err) => {
                debug!(identifier, "rejected unsupported operation");
                OperationResult::failure(identifier, err)
            }
        }
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("operations", &self.known_operation_ids())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
