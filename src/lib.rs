//! A small dense linear-algebra core in Rust, built from scratch.
//!
//! I wanted to see how a BLIS-style library holds together below the level
//! of gemm: how one generic kernel becomes a family of mixed-type routines
//! picked at runtime, how a triangular solve is split into packed
//! micro-kernels, and how you convince yourself the result is right without
//! an O(n^3) recomputation. This crate has all three.
//!
//! ## Usage
//!
//! Solve an upper-triangular system with the blocked driver:
//!
//! ```
//! use microblas::{Matrix, MatrixMut, Struc, trsm_blocked};
//!
//! // [[2, 1], [0, 4]], column-major
//! let a_data = [2.0f64, 0.0, 1.0, 4.0];
//! let a = Matrix::col_major(&a_data, 2, 2).unwrap().with_struc(Struc::Triangular);
//!
//! let mut b_data = [5.0f64, 8.0];
//! let mut b = MatrixMut::col_major(&mut b_data, 2, 1).unwrap();
//! trsm_blocked(1.0, &a, &mut b);
//!
//! assert_eq!(b_data, [1.5, 2.0]);
//! ```
//!
//! Fill a strided vector through the dispatch table, with a scalar of a
//! different datatype:
//!
//! ```
//! use microblas::{ScalarArg, VectorMut, setv};
//!
//! let mut buf = [9.0f64; 6];
//! let mut x = VectorMut::new(&mut buf, 3, 2).unwrap();
//! setv(&ScalarArg::from(0.5f32), &mut x);
//!
//! assert_eq!(buf, [0.5, 9.0, 0.5, 9.0, 0.5, 9.0]);
//! ```
//!
//! ## What's inside
//!
//! - Datatype-indexed dispatch tables for `setv` and `dotaxpyv`, with
//!   mixed-domain / mixed-precision coverage chosen by cargo features
//! - Upper and lower trsm micro-kernels on packed panels with a reciprocal
//!   diagonal, plus fixed-shape f64 variants
//! - A blocked left-side trsm driver for all four datatypes
//! - Residual checks for syrk and trsm with PASS/WARN/FAIL thresholds

pub mod blocked;
pub mod check;
pub mod dispatch;
pub mod error;
pub mod kernels;
pub mod level1;
pub mod matrix;
pub mod object;
pub mod types;

pub use blocked::{trsm_blocked, trsm_blocked_with};
pub use dispatch::{Coverage, DispatchConfig};
pub use error::{Error, Result};
pub use kernels::{BlockSizes, NativeKernels, trsm_block};
pub use level1::{dotaxpyv, dotaxpyv_typed, setv, setv_typed};
pub use object::{Constant, Matrix, MatrixMut, ScalarArg, TypedScalar, Vector, VectorMut};
pub use types::{Conj, Datatype, Diag, Scalar, Struc, Trans, Uplo};
