//! Real cube root via Newton's method.

use crate::operation::{MathOperation, OperationKind};
use crate::outcome::Outcome;

/// Iteration stops once successive estimates differ by less than this.
const TOLERANCE: f64 = 1e-10;

/// Upper bound on Newton iterations.
const MAX_ITERATIONS: u32 = 100;

/// Newton's method on `f(x) = x^3 - a` for `a > 0`, starting from `x = a`.
fn newton_cube_root(a: f64) -> f64 {
    let mut x = a;
    for _ in 0..MAX_ITERATIONS {
        let prev = x;
        x = (2.0 * x + a / (x * x)) / 3.0;
        if (x - prev).abs() < TOLERANCE {
            break;
        }
    }
    x
}

/// Returns the real cube root of `n`.
///
/// The root of `|n|` is computed and negated for negative inputs. Zero
/// short-circuits to `0.0`, since the update step divides by `x^2`.
#[must_use]
pub fn cube_root(n: i64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let magnitude = newton_cube_root(n.unsigned_abs() as f64);
    if n < 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// `cubeRoot` operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeRootOperation;

impl MathOperation for CubeRootOperation {
    fn kind(&self) -> OperationKind {
        OperationKind::CubeRoot
    }

    fn compute(&self, number: i64) -> Outcome {
        Outcome::CubeRoot {
            input: number,
            root: cube_root(number),
        }
    }
}
