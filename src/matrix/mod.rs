//! Unblocked reference routines.
//!
//! These provide correctness baselines for the blocked solve and the
//! building blocks the residual checks are computed from. None of them
//! shares a code path with the packed micro-kernels.

pub mod gemv;
pub mod naive_ikj;
pub mod symv;
pub mod syrk;
pub mod trsv;

pub use gemv::gemv;
pub use naive_ikj::gemm_naive;
pub use symv::symv;
pub use syrk::syrk;
pub use trsv::trsv;
