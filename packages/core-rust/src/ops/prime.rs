//! Deterministic trial-division primality check.

use crate::operation::{MathOperation, OperationKind};
use crate::outcome::{Outcome, PrimeVerdict};

/// Returns `true` if `n` is prime.
///
/// Multiples of 2 and 3 are eliminated directly; the remaining candidates
/// `6k - 1` and `6k + 1` are tested up to `floor(sqrt(n))` inclusive.
/// The loop bound is written as `i <= n / i` so it cannot overflow.
#[must_use]
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i: i64 = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// `prime` operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimeOperation;

impl MathOperation for PrimeOperation {
    fn kind(&self) -> OperationKind {
        OperationKind::Prime
    }

    fn compute(&self, number: i64) -> Outcome {
        let verdict = if number < 2 {
            PrimeVerdict::BelowTwo
        } else if is_prime(number) {
            PrimeVerdict::Prime
        } else {
            PrimeVerdict::Composite
        };
        Outcome::Prime {
            input: number,
            verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn naive_is_prime(n: i64) -> bool {
        n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
    }

    #[test]
    fn small_primes() {
        let primes: Vec<i64> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
    }

    #[test]
    fn squares_of_primes_are_composite() {
        // The inclusive sqrt bound catches p * p.
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(121));
        assert!(!is_prime(169));
    }

    #[test]
    fn large_values() {
        assert!(is_prime(2_147_483_647));
        assert!(!is_prime(2_147_483_649));
        assert!(is_prime(1_000_000_007));
        assert!(is_prime(1_000_000_000_039));
        assert!(!is_prime(i64::MAX));
    }

    #[test]
    fn below_two_is_distinct_verdict() {
        for n in [-7, 0, 1] {
            let outcome = PrimeOperation.compute(n);
            assert!(matches!(
                outcome,
                Outcome::Prime {
                    verdict: PrimeVerdict::BelowTwo,
                    ..
                }
            ));
            assert!(outcome.to_string().contains("not prime"));
        }
    }

    #[test]
    fn operation_renders_sentence() {
        assert_eq!(
            PrimeOperation.compute(17).to_string(),
            "The number 17 is a prime number."
        );
        assert_eq!(
            PrimeOperation.compute(15).to_string(),
            "The number 15 is not a prime number."
        );
    }

    proptest! {
        #[test]
        fn agrees_with_naive_division(n in -10i64..200_000) {
            prop_assert_eq!(is_prime(n), naive_is_prime(n));
        }
    }
}
