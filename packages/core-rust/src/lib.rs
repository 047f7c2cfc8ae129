//! `numcalc` Core — the five numeric operations, the operation registry, and
//! request validation.
//!
//! Everything here is synchronous and pure. Hosts validate raw input with
//! [`validate`] (or a configured [`Validator`]) and then run each requested
//! identifier through a shared [`OperationRegistry`].

pub mod operation;
pub mod ops;
pub mod outcome;
pub mod registry;
pub mod validation;

pub use operation::{MathOperation, OperationKind, UnsupportedOperation};
pub use outcome::{OperationResult, Outcome, PalindromeVerdict, PrimeVerdict};
pub use registry::OperationRegistry;
pub use validation::{
    validate, ValidationError, ValidationOutcome, Validator, DEFAULT_MAX_NUMBER,
};
