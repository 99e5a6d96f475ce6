//! Residual checks for level-3 operations.
//!
//! Each check multiplies the operation's output and its algebraically
//! predicted value by a random probe vector, using only level-2 reference
//! routines, and reports the norm of the difference. That costs two
//! matrix-vector products instead of an independent O(n^3) recomputation.
//!
//! - `random`: random operands, `mksymm` / `mktrim`
//! - `syrk`: `C := beta * C + alpha * A * A^T`
//! - `trsm`: `B := alpha * inv(op(A)) * B`

pub mod random;
pub mod syrk;
pub mod trsm;

use std::fmt;

use crate::object::Matrix;
use crate::types::{Datatype, NUM_FP_TYPES, Scalar};

pub use random::{mksymm, mktrim, randm, rands, randv};
pub use syrk::{syrk_check, syrk_experiment};
pub use trsm::{trsm_check, trsm_experiment};

/// True when every stored element of `a` is finite.
pub(crate) fn stored_finite<T: Scalar>(a: &Matrix<'_, T>) -> bool {
    (0..a.cols()).all(|j| (0..a.rows()).all(|i| !a.is_stored(i, j) || a.get(i, j).all_finite()))
}

/// Outcome of comparing a residual against a pair of thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Pass => "PASS",
            Verdict::Warn => "WARN",
            Verdict::Fail => "FAIL",
        })
    }
}

/// Residual bounds for one datatype. `pass` is the tight bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub warn: f64,
    pub pass: f64,
}

impl Thresholds {
    /// A NaN residual fails.
    pub fn classify(&self, resid: f64) -> Verdict {
        if resid.is_nan() || resid > self.warn {
            Verdict::Fail
        } else if resid > self.pass {
            Verdict::Warn
        } else {
            Verdict::Pass
        }
    }
}

/// Indexed by datatype ordinal (s, c, d, z).
pub const SYRK_THRESHOLDS: [Thresholds; NUM_FP_TYPES] = [
    Thresholds { warn: 1e-4, pass: 1e-5 },
    Thresholds { warn: 1e-4, pass: 1e-5 },
    Thresholds { warn: 1e-13, pass: 1e-14 },
    Thresholds { warn: 1e-13, pass: 1e-14 },
];

pub const TRSM_THRESHOLDS: [Thresholds; NUM_FP_TYPES] = [
    Thresholds { warn: 1e-4, pass: 1e-5 },
    Thresholds { warn: 1e-4, pass: 1e-5 },
    Thresholds { warn: 1e-13, pass: 1e-14 },
    Thresholds { warn: 1e-13, pass: 1e-14 },
];

pub fn syrk_thresholds(dt: Datatype) -> Thresholds {
    SYRK_THRESHOLDS[dt.ordinal()]
}

pub fn trsm_thresholds(dt: Datatype) -> Thresholds {
    TRSM_THRESHOLDS[dt.ordinal()]
}
