//! Level-1 vector kernels.
//!
//! - `setv`: fill a vector with a scalar (2-way dispatch)
//! - `dotaxpyv`: fused dot + axpy (3-way dispatch)
//! - `ops`: contiguous helpers (`scalv`, `subv`, `copyv`, `fnormv`)

pub mod dotaxpyv;
pub mod ops;
pub mod setv;

pub use dotaxpyv::{dotaxpyv, dotaxpyv_typed};
pub use ops::{copyv, fnormv, scalv, subv};
pub use setv::{setv, setv_typed};
