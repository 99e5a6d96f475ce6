//! Operand descriptors.
//!
//! Descriptors never own their buffers; they borrow them for as long as the
//! descriptor lives and record datatype, dimensions, strides and the
//! structural tags that operations consult before dispatch.

pub mod matrix;
pub mod scalar;
pub mod vector;

pub use matrix::{Matrix, MatrixMut};
pub use scalar::{Constant, ScalarArg, TypedScalar};
pub use vector::{Vector, VectorMut};
