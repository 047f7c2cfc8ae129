//! Structured results of running an operation.
//!
//! [`Outcome`] is the typed payload of a computation; its `Display` impl
//! renders the sentence shown to end users. [`OperationResult`] wraps an
//! outcome (or a failure) together with the identifier that was requested.

use std::fmt;

use num_bigint::BigUint;
use serde::Serialize;

use crate::operation::OperationKind;

/// Verdict of the primality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimeVerdict {
    Prime,
    Composite,
    /// Inputs below 2 are outside the domain of primes.
    BelowTwo,
}

/// Verdict of the palindrome check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PalindromeVerdict {
    Palindrome,
    NotPalindrome,
    /// Negative numbers are never classified.
    Negative,
}

/// Typed payload produced by a successful computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Outcome {
    Factorial {
        input: i64,
        #[serde(serialize_with = "decimal::serialize")]
        value: BigUint,
    },
    Fibonacci {
        #[serde(serialize_with = "decimal::serialize_seq")]
        terms: Vec<BigUint>,
    },
    Prime {
        input: i64,
        verdict: PrimeVerdict,
    },
    Palindrome {
        input: i64,
        verdict: PalindromeVerdict,
    },
    CubeRoot {
        input: i64,
        root: f64,
    },
    /// The operation has no value for this input (negative factorial or
    /// negative term count).
    Undefined {
        operation: OperationKind,
        input: i64,
    },
}

impl Outcome {
    /// Returns the operation that produced this outcome.
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Factorial { .. } => OperationKind::Factorial,
            Self::Fibonacci { .. } => OperationKind::Fibonacci,
            Self::Prime { .. } => OperationKind::Prime,
            Self::Palindrome { .. } => OperationKind::Palindrome,
            Self::CubeRoot { .. } => OperationKind::CubeRoot,
            Self::Undefined { operation, .. } => *operation,
        }
    }

    /// Returns the series for Fibonacci outcomes.
    #[must_use]
    pub fn terms(&self) -> Option<&[BigUint]> {
        match self {
            Self::Fibonacci { terms } => Some(terms),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factorial { input, value } => write!(f, "Factorial of {input} = {value}"),
            Self::Fibonacci { terms } => {
                let noun = if terms.len() == 1 { "term" } else { "terms" };
                write!(f, "Fibonacci series with {} {noun}: [", terms.len())?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{term}")?;
                }
                f.write_str("]")
            }
            Self::Prime { input, verdict } => match verdict {
                PrimeVerdict::Prime => write!(f, "The number {input} is a prime number."),
                PrimeVerdict::Composite => write!(f, "The number {input} is not a prime number."),
                PrimeVerdict::BelowTwo => write!(
                    f,
                    "The number {input} is not prime (prime numbers start from 2)."
                ),
            },
            Self::Palindrome { input, verdict } => match verdict {
                PalindromeVerdict::Palindrome => write!(f, "The number {input} is a palindrome."),
                PalindromeVerdict::NotPalindrome => {
                    write!(f, "The number {input} is not a palindrome.")
                }
                PalindromeVerdict::Negative => {
                    f.write_str("Negative numbers are not considered palindromes.")
                }
            },
            Self::CubeRoot { input, root } => write!(f, "Cube root of {input} = {root:.6}"),
            Self::Undefined { operation, .. } => match operation {
                OperationKind::Fibonacci => {
                    f.write_str("Fibonacci series is not defined for negative numbers.")
                }
                other => write!(f, "{} is not defined for negative numbers.", other.display_name()),
            },
        }
    }
}

/// Result of running one requested operation identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationResult {
    /// The identifier as requested (may be unknown).
    pub operation: String,
    /// Human-readable label; the identifier itself when it is unknown.
    pub label: String,
    pub success: bool,
    /// Sentence for display: the rendered outcome, or `Error: <cause>`.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl OperationResult {
    /// Builds a successful result from a computed outcome.
    #[must_use]
    pub fn success(outcome: Outcome) -> Self {
        let kind = outcome.kind();
        Self {
            operation: kind.as_str().to_string(),
            label: kind.display_name().to_string(),
            success: true,
            message: outcome.to_string(),
            outcome: Some(outcome),
        }
    }

    /// Builds an error-flagged result for `operation`.
    pub fn failure(operation: impl Into<String>, cause: impl fmt::Display) -> Self {
        let operation = operation.into();
        let label = operation
            .parse::<OperationKind>()
            .map_or_else(|_| operation.clone(), |kind| kind.display_name().to_string());
        Self {
            operation,
            label,
            success: false,
            message: format!("Error: {cause}"),
            outcome: None,
        }
    }

    /// Returns the series when this is a successful Fibonacci result.
    #[must_use]
    pub fn terms(&self) -> Option<&[BigUint]> {
        self.outcome.as_ref().and_then(Outcome::terms)
    }
}

/// Serializes big integers as decimal strings so JSON consumers never lose digits.
mod decimal {
    use num_bigint::BigUint;
    use serde::ser::SerializeSeq;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn serialize_seq<S: Serializer>(
        values: &[BigUint],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&value.to_string())?;
        }
        seq.end()
    }
}
