//! Error types for descriptor construction and the residual checks.
//!
//! Operations themselves do not return errors: misuse of an operation is a
//! caller defect and panics, and numerical trouble (a zero pivot, NaN input)
//! flows through as ordinary floating-point values.

use crate::types::Datatype;

/// Errors raised while building operand descriptors or checking results.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dims/strides address an element past the end of the buffer.
    #[error("buffer too short: need {required} elements, have {len}")]
    OutOfBounds { required: usize, len: usize },

    /// A dimension with more than one element was given a zero stride.
    #[error("zero stride along a dimension of length {n}")]
    ZeroStride { n: usize },

    /// Rows and columns of a mutable matrix would share elements.
    #[error("strides rs={rs}, cs={cs} overlap for a {rows}x{cols} matrix")]
    OverlappingStrides {
        rows: usize,
        cols: usize,
        rs: usize,
        cs: usize,
    },

    /// A square matrix was required.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NonSquare { rows: usize, cols: usize },

    /// Operands whose dimensions must agree do not.
    #[error("{what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A descriptor was reinterpreted as the wrong element type.
    #[error("datatype mismatch: expected {expected:?}, found {found:?}")]
    DatatypeMismatch { expected: Datatype, found: Datatype },

    /// Integer overflow while computing the extent of an operand.
    #[error("offset overflow while computing operand extent")]
    OffsetOverflow,
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
