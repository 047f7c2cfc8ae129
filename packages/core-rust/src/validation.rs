//! Request parameter validation.
//!
//! Runs before any computation. A request is either accepted whole, as a
//! positive number plus a deduplicated set of identifiers, or rejected with a
//! single reason. Identifiers are not checked against the registry here;
//! an unknown identifier is a per-operation error, not a validation failure.

use std::collections::BTreeSet;

use tracing::debug;

/// Default upper bound on the accepted number.
///
/// Factorial digit count and Fibonacci term count both grow with the input,
/// so the validator caps it rather than accepting any `i64`.
pub const DEFAULT_MAX_NUMBER: i64 = 5_000;

/// Reason a request was rejected. `Display` yields the user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Number is required")]
    NumberRequired,
    #[error("Invalid number format")]
    InvalidNumberFormat,
    #[error("Number must be positive")]
    NotPositive,
    #[error("Number must not exceed {max}")]
    TooLarge { max: i64 },
    #[error("At least one operation must be selected")]
    NoOperations,
}

/// Result of validating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The request is well-formed.
    Valid {
        /// Strictly positive and at most the configured maximum.
        number: i64,
        /// Non-empty, deduplicated identifiers.
        operations: BTreeSet<String>,
    },
    /// The request was rejected; nothing should be computed.
    Invalid { reason: ValidationError },
}

impl ValidationOutcome {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Converts into a `Result` for `?`-style handling.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason for `Invalid` outcomes.
    pub fn into_result(self) -> Result<(i64, BTreeSet<String>), ValidationError> {
        match self {
            Self::Valid { number, operations } => Ok((number, operations)),
            Self::Invalid { reason } => Err(reason),
        }
    }
}

/// Validates raw request parameters against a configured upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    max_number: i64,
}

impl Validator {
    /// Creates a validator accepting numbers in `1..=max_number`.
    #[must_use]
    pub fn new(max_number: i64) -> Self {
        Self { max_number }
    }

    #[must_use]
    pub fn max_number(&self) -> i64 {
        self.max_number
    }

    /// Validates the raw number text and the requested identifiers.
    ///
    /// `number_text` is `None` when the parameter was absent. Rules are
    /// checked in order and the first failure wins:
    /// 1. absent or blank number
    /// 2. number not an integer (surrounding whitespace is ignored)
    /// 3. number not positive
    /// 4. no identifiers
    /// 5. number above `max_number`
    pub fn validate<S: AsRef<str>>(
        &self,
        number_text: Option<&str>,
        operation_ids: &[S],
    ) -> ValidationOutcome {
        match self.check(number_text, operation_ids) {
            Ok(number) => ValidationOutcome::Valid {
                number,
                operations: operation_ids
                    .iter()
                    .map(|id| id.as_ref().to_string())
                    .collect(),
            },
            Err(reason) => {
                debug!(%reason, "request rejected");
                ValidationOutcome::Invalid { reason }
            }
        }
    }

    fn check<S: AsRef<str>>(
        &self,
        number_text: Option<&str>,
        operation_ids: &[S],
    ) -> Result<i64, ValidationError> {
        let text = number_text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ValidationError::NumberRequired)?;
        let number: i64 = text
            .parse()
            .map_err(|_| ValidationError::InvalidNumberFormat)?;
        if number <= 0 {
            return Err(ValidationError::NotPositive);
        }
        if operation_ids.is_empty() {
            return Err(ValidationError::NoOperations);
        }
        if number > self.max_number {
            return Err(ValidationError::TooLarge {
                max: self.max_number,
            });
        }
        Ok(number)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NUMBER)
    }
}

/// Validates with the default upper bound. See [`Validator::validate`].
pub fn validate<S: AsRef<str>>(
    number_text: Option<&str>,
    operation_ids: &[S],
) -> ValidationOutcome {
    Validator::default().validate(number_text, operation_ids)
}
