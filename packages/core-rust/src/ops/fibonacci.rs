//! Fibonacci series generation.
//!
//! Terms are arbitrary-precision so long series never wrap around. The term
//! count is bounded by the validator's `max_number`.

use num_bigint::BigUint;

use crate::operation::{MathOperation, OperationKind};
use crate::outcome::Outcome;

/// Returns the first `n` terms of F(0)=0, F(1)=1, F(k)=F(k-1)+F(k-2).
///
/// Returns `None` for negative `n` and an empty series for `n == 0`.
#[must_use]
pub fn fibonacci_series(n: i64) -> Option<Vec<BigUint>> {
    let n = usize::try_from(n).ok()?;
    let mut terms: Vec<BigUint> = Vec::with_capacity(n);
    let mut current = BigUint::from(0u32);
    let mut next = BigUint::from(1u32);
    for _ in 0..n {
        let following = &current + &next;
        let term = std::mem::replace(&mut current, next);
        next = following;
        terms.push(term);
    }
    Some(terms)
}

/// `fibonacci` operation: the input is the number of terms requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct FibonacciOperation;

impl MathOperation for FibonacciOperation {
    fn kind(&self) -> OperationKind {
        OperationKind::Fibonacci
    }

    fn compute(&self, number: i64) -> Outcome {
        match fibonacci_series(number) {
            Some(terms) => Outcome::Fibonacci { terms },
            None => Outcome::Undefined {
                operation: OperationKind::Fibonacci,
                input: number,
            },
        }
    }
}
