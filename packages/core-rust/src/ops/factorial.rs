//! Exact factorial over arbitrary-precision integers.

use num_bigint::BigUint;

use crate::operation::{MathOperation, OperationKind};
use crate::outcome::Outcome;

/// Computes `n!` exactly. Returns `None` for negative `n`.
///
/// # Examples
///
/// ```
/// use numcalc_core::ops::factorial;
///
/// assert_eq!(factorial(5).unwrap().to_string(), "120");
/// assert!(factorial(-1).is_none());
/// ```
#[must_use]
pub fn factorial(n: i64) -> Option<BigUint> {
    let n = u64::try_from(n).ok()?;
    let mut acc = BigUint::from(1u32);
    for i in 2..=n {
        acc *= i;
    }
    Some(acc)
}

/// `factorial` operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactorialOperation;

impl MathOperation for FactorialOperation {
    fn kind(&self) -> OperationKind {
        OperationKind::Factorial
    }

    fn compute(&self, number: i64) -> Outcome {
        match factorial(number) {
            Some(value) => Outcome::Factorial {
                input: number,
                value,
            },
            None => Outcome::Undefined {
                operation: OperationKind::Factorial,
                input: number,
            },
        }
    }
}
