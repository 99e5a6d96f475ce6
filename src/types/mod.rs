//! Datatype tags and structural parameters shared by every operation.
//!
//! The closed set of floating-point datatypes is ordered s, c, d, z so the
//! ordinal of a [`Datatype`] can index the dispatch tables directly.

pub mod scalar;

pub use scalar::{Mixes, Promote, Scalar};

/// Number of floating-point datatypes the dispatch tables are sized for.
pub const NUM_FP_TYPES: usize = 4;

/// Element type of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Datatype {
    /// `f32`
    Float = 0,
    /// `Complex32`
    SComplex = 1,
    /// `f64`
    Double = 2,
    /// `Complex64`
    DComplex = 3,
}

/// Single or double precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Single,
    Double,
}

/// Real or complex domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Real,
    Complex,
}

impl Datatype {
    /// All datatypes in ordinal order.
    pub const ALL: [Datatype; NUM_FP_TYPES] = [
        Datatype::Float,
        Datatype::SComplex,
        Datatype::Double,
        Datatype::DComplex,
    ];

    #[inline(always)]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    pub fn from_parts(domain: Domain, precision: Precision) -> Self {
        match (domain, precision) {
            (Domain::Real, Precision::Single) => Datatype::Float,
            (Domain::Complex, Precision::Single) => Datatype::SComplex,
            (Domain::Real, Precision::Double) => Datatype::Double,
            (Domain::Complex, Precision::Double) => Datatype::DComplex,
        }
    }

    pub fn domain(self) -> Domain {
        match self {
            Datatype::Float | Datatype::Double => Domain::Real,
            Datatype::SComplex | Datatype::DComplex => Domain::Complex,
        }
    }

    pub fn precision(self) -> Precision {
        match self {
            Datatype::Float | Datatype::SComplex => Precision::Single,
            Datatype::Double | Datatype::DComplex => Precision::Double,
        }
    }

    pub fn is_complex(self) -> bool {
        self.domain() == Domain::Complex
    }

    pub fn is_double(self) -> bool {
        self.precision() == Precision::Double
    }

    /// The real datatype of the same precision (`c` -> `s`, `z` -> `d`).
    pub fn real_projection(self) -> Self {
        Self::from_parts(Domain::Real, self.precision())
    }

    /// The datatype two operands combine into: complex if either is complex,
    /// double if either is double.
    pub fn union(self, other: Self) -> Self {
        let domain = if self.is_complex() || other.is_complex() {
            Domain::Complex
        } else {
            Domain::Real
        };
        let precision = if self.is_double() || other.is_double() {
            Precision::Double
        } else {
            Precision::Single
        };
        Self::from_parts(domain, precision)
    }

    /// BLAS-style type character.
    pub fn as_char(self) -> char {
        match self {
            Datatype::Float => 's',
            Datatype::SComplex => 'c',
            Datatype::Double => 'd',
            Datatype::DComplex => 'z',
        }
    }
}

/// Whether an operand is conjugated on access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Conj {
    #[default]
    NoConj,
    Conj,
}

impl Conj {
    pub fn toggled(self) -> Self {
        match self {
            Conj::NoConj => Conj::Conj,
            Conj::Conj => Conj::NoConj,
        }
    }

    /// Combine two conjugation requests (conj of conj is no conj).
    pub fn apply(self, other: Conj) -> Self {
        if self == other { Conj::NoConj } else { Conj::Conj }
    }
}

/// Transposition/conjugation applied to a matrix operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Trans {
    #[default]
    NoTranspose,
    Transpose,
    ConjNoTranspose,
    ConjTranspose,
}

impl Trans {
    pub fn is_transposed(self) -> bool {
        matches!(self, Trans::Transpose | Trans::ConjTranspose)
    }

    pub fn conj(self) -> Conj {
        match self {
            Trans::ConjNoTranspose | Trans::ConjTranspose => Conj::Conj,
            Trans::NoTranspose | Trans::Transpose => Conj::NoConj,
        }
    }
}

/// Which triangle of a symmetric/triangular matrix is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Uplo {
    #[default]
    Upper,
    Lower,
}

impl Uplo {
    pub fn flipped(self) -> Self {
        match self {
            Uplo::Upper => Uplo::Lower,
            Uplo::Lower => Uplo::Upper,
        }
    }
}

/// Whether a triangular matrix has an implicit unit diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Diag {
    #[default]
    NonUnit,
    Unit,
}

/// Structure of a matrix operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Struc {
    #[default]
    General,
    Symmetric,
    Triangular,
}
