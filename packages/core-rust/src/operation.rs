//! Operation identity and the computation contract shared by all operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::outcome::Outcome;

/// Closed set of supported operations.
///
/// The string form (`as_str`) is the identifier accepted from external input.
/// Parsing any other string fails with [`UnsupportedOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationKind {
    #[serde(rename = "factorial")]
    Factorial,
    #[serde(rename = "palindrome")]
    Palindrome,
    #[serde(rename = "fibonacci")]
    Fibonacci,
    #[serde(rename = "prime")]
    Prime,
    #[serde(rename = "cubeRoot")]
    CubeRoot,
}

impl OperationKind {
    /// All operations, in registration order.
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Factorial,
        OperationKind::Palindrome,
        OperationKind::Fibonacci,
        OperationKind::Prime,
        OperationKind::CubeRoot,
    ];

    /// Returns the external identifier (e.g. `"cubeRoot"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Factorial => "factorial",
            Self::Palindrome => "palindrome",
            Self::Fibonacci => "fibonacci",
            Self::Prime => "prime",
            Self::CubeRoot => "cubeRoot",
        }
    }

    /// Position of this kind in [`OperationKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Factorial => 0,
            Self::Palindrome => 1,
            Self::Fibonacci => 2,
            Self::Prime => 3,
            Self::CubeRoot => 4,
        }
    }

    /// Returns the human-readable label shown next to a result.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Factorial => "Factorial",
            Self::Palindrome => "Palindrome Check",
            Self::Fibonacci => "Fibonacci Series",
            Self::Prime => "Prime Number Check",
            Self::CubeRoot => "Cube Root",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = UnsupportedOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnsupportedOperation {
                name: s.to_string(),
            })
    }
}

/// An identifier that does not name any registered operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported operation: {name}")]
pub struct UnsupportedOperation {
    /// The identifier exactly as it was requested.
    pub name: String,
}

/// A pure computation over a single integer input.
///
/// Implementations hold no state; `compute` must be deterministic and should
/// not panic for any `i64` input.
pub trait MathOperation: Send + Sync {
    /// Which operation this is.
    fn kind(&self) -> OperationKind;

    /// Human-readable label. Defaults to the kind's label.
    fn display_name(&self) -> &'static str {
        self.kind().display_name()
    }

    /// Runs the computation.
    fn compute(&self, number: i64) -> Outcome;
}
