//! The five operation implementations.
//!
//! Each submodule exposes a unit struct implementing [`MathOperation`] plus
//! the underlying pure function, so callers that only need the number can
//! skip the `Outcome` wrapper.
//!
//! [`MathOperation`]: crate::operation::MathOperation

pub mod cube_root;
pub mod factorial;
pub mod fibonacci;
pub mod palindrome;
pub mod prime;

pub use cube_root::{cube_root, CubeRootOperation};
pub use factorial::{factorial, FactorialOperation};
pub use fibonacci::{fibonacci_series, FibonacciOperation};
pub use palindrome::{is_palindrome, PalindromeOperation};
pub use prime::{is_prime, PrimeOperation};
