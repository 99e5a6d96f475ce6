//! Scalar operands: typed values and generic constants.

use num_complex::{Complex32, Complex64};

use crate::types::{Datatype, Scalar};

/// A scalar value carrying its own datatype tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedScalar {
    Float(f32),
    SComplex(Complex32),
    Double(f64),
    DComplex(Complex64),
}

impl TypedScalar {
    pub fn new<T: Scalar>(value: T) -> Self {
        let (re, im) = value.parts();
        Self::from_parts(T::DATATYPE, re, im)
    }

    /// The additive identity of `dt`.
    pub fn zero(dt: Datatype) -> Self {
        Self::from_parts(dt, 0.0, 0.0)
    }

    pub fn from_parts(dt: Datatype, re: f64, im: f64) -> Self {
        match dt {
            Datatype::Float => TypedScalar::Float(f32::from_parts(re, im)),
            Datatype::SComplex => TypedScalar::SComplex(Complex32::from_parts(re, im)),
            Datatype::Double => TypedScalar::Double(f64::from_parts(re, im)),
            Datatype::DComplex => TypedScalar::DComplex(Complex64::from_parts(re, im)),
        }
    }

    pub fn datatype(&self) -> Datatype {
        match self {
            TypedScalar::Float(_) => Datatype::Float,
            TypedScalar::SComplex(_) => Datatype::SComplex,
            TypedScalar::Double(_) => Datatype::Double,
            TypedScalar::DComplex(_) => Datatype::DComplex,
        }
    }

    pub fn parts(&self) -> (f64, f64) {
        match *self {
            TypedScalar::Float(v) => v.parts(),
            TypedScalar::SComplex(v) => v.parts(),
            TypedScalar::Double(v) => v.parts(),
            TypedScalar::DComplex(v) => v.parts(),
        }
    }

    /// The value as `T`, if `T` is the stored datatype.
    pub fn get<T: Scalar>(&self) -> Option<T> {
        if self.datatype() != T::DATATYPE {
            return None;
        }
        let (re, im) = self.parts();
        Some(T::from_parts(re, im))
    }

    /// Convert to another datatype with [`Scalar::cast`] semantics.
    pub fn cast_to(&self, dt: Datatype) -> Self {
        let (re, im) = self.parts();
        Self::from_parts(dt, re, im)
    }

    pub(crate) fn as_ptr(&self) -> *const u8 {
        match self {
            TypedScalar::Float(v) => v as *const f32 as *const u8,
            TypedScalar::SComplex(v) => v as *const Complex32 as *const u8,
            TypedScalar::Double(v) => v as *const f64 as *const u8,
            TypedScalar::DComplex(v) => v as *const Complex64 as *const u8,
        }
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut u8 {
        match self {
            TypedScalar::Float(v) => v as *mut f32 as *mut u8,
            TypedScalar::SComplex(v) => v as *mut Complex32 as *mut u8,
            TypedScalar::Double(v) => v as *mut f64 as *mut u8,
            TypedScalar::DComplex(v) => v as *mut Complex64 as *mut u8,
        }
    }
}

macro_rules! typed_scalar_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for TypedScalar {
                fn from(value: $t) -> Self {
                    TypedScalar::new(value)
                }
            }
        )*
    };
}

typed_scalar_from!(f32, f64, Complex32, Complex64);

/// A datatype-agnostic constant. It takes on the datatype of whichever
/// operand it is combined with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    re: f64,
    im: f64,
}

impl Constant {
    pub const ZERO: Constant = Constant::new(0.0, 0.0);
    pub const ONE: Constant = Constant::new(1.0, 0.0);
    pub const MINUS_ONE: Constant = Constant::new(-1.0, 0.0);
    pub const TWO: Constant = Constant::new(2.0, 0.0);

    pub const fn new(re: f64, im: f64) -> Self {
        Constant { re, im }
    }

    pub fn value(&self, dt: Datatype) -> TypedScalar {
        TypedScalar::from_parts(dt, self.re, self.im)
    }
}

/// A scalar operand as passed to an object-level operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarArg {
    Constant(Constant),
    Typed(TypedScalar),
}

impl ScalarArg {
    /// The value and datatype this scalar contributes to a dispatch key.
    ///
    /// A typed scalar keeps its own datatype; a constant is coerced to the
    /// datatype of the primary operand.
    pub fn resolve(&self, primary: Datatype) -> TypedScalar {
        match self {
            ScalarArg::Constant(c) => c.value(primary),
            ScalarArg::Typed(t) => *t,
        }
    }
}

impl From<Constant> for ScalarArg {
    fn from(c: Constant) -> Self {
        ScalarArg::Constant(c)
    }
}

impl From<TypedScalar> for ScalarArg {
    fn from(t: TypedScalar) -> Self {
        ScalarArg::Typed(t)
    }
}

macro_rules! scalar_arg_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ScalarArg {
                fn from(value: $t) -> Self {
                    ScalarArg::Typed(TypedScalar::new(value))
                }
            }
        )*
    };
}

scalar_arg_from!(f32, f64, Complex32, Complex64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_coerces_to_primary_datatype() {
        let one = ScalarArg::from(Constant::ONE);
        for dt in Datatype::ALL {
            let v = one.resolve(dt);
            assert_eq!(v.datatype(), dt);
            assert_eq!(v.parts(), (1.0, 0.0));
        }
    }

    #[test]
    fn typed_scalar_keeps_its_datatype() {
        let beta = ScalarArg::from(Complex32::new(1.0, 2.0));
        let v = beta.resolve(Datatype::Double);
        assert_eq!(v.datatype(), Datatype::SComplex);
        assert_eq!(v.get::<Complex32>(), Some(Complex32::new(1.0, 2.0)));
        assert_eq!(v.get::<f64>(), None);
    }

    #[test]
    fn cast_drops_imaginary_part_for_real_targets() {
        let z = TypedScalar::from(Complex64::new(-0.5, 7.0));
        assert_eq!(z.cast_to(Datatype::Float), TypedScalar::Float(-0.5));
    }
}
