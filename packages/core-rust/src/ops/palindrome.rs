//! Decimal palindrome check.

use crate::operation::{MathOperation, OperationKind};
use crate::outcome::{Outcome, PalindromeVerdict};

/// Returns `true` if the decimal digits of `n` read the same in both directions.
///
/// Scans the digit string with two pointers moving inward. Negative numbers
/// return `false`; [`PalindromeOperation`] reports them separately.
#[must_use]
pub fn is_palindrome(n: i64) -> bool {
    if n < 0 {
        return false;
    }
    let digits = n.to_string();
    let digits = digits.as_bytes();
    let (mut left, mut right) = (0, digits.len() - 1);
    while left < right {
        if digits[left] != digits[right] {
            return false;
        }
        left += 1;
        right -= 1;
    }
    true
}

/// `palindrome` operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PalindromeOperation;

impl MathOperation for PalindromeOperation {
    fn kind(&self) -> OperationKind {
        OperationKind::Palindrome
    }

    fn compute(&self, number: i64) -> Outcome {
        let verdict = if number < 0 {
            PalindromeVerdict::Negative
        } else if is_palindrome(number) {
            PalindromeVerdict::Palindrome
        } else {
            PalindromeVerdict::NotPalindrome
        };
        Outcome::Palindrome {
            input: number,
            verdict,
        }
    }
}
