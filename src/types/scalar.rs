//! Element types and the type-level rules for combining them.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::{Complex32, Complex64};
use num_traits::{Float, One, Zero};

use super::{Conj, Datatype};

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for num_complex::Complex32 {}
    impl Sealed for num_complex::Complex64 {}
}

/// One of the four floating-point element types: `f32`, `Complex32`, `f64`,
/// `Complex64`.
///
/// Cross-type conversion goes through [`Scalar::cast`]: a complex value cast to
/// a real type keeps its real part, a real value cast to a complex type gets a
/// zero imaginary part, and precision changes round like `as`.
pub trait Scalar:
    Copy
    + Send
    + Sync
    + PartialEq
    + Debug
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Zero
    + One
    + private::Sealed
{
    /// Real type of the same precision.
    type Real: Scalar<Real = Self::Real> + Float;

    /// Tag stored in descriptors holding this type.
    const DATATYPE: Datatype;

    fn conj(self) -> Self;
    fn real(self) -> Self::Real;
    fn imag(self) -> Self::Real;

    /// Widen to a `(re, im)` pair of doubles. Exact for every type.
    fn parts(self) -> (f64, f64);

    /// Narrow from a `(re, im)` pair; the imaginary part is dropped for real
    /// types.
    fn from_parts(re: f64, im: f64) -> Self;

    /// `|x|^2`
    fn abs_sq(self) -> Self::Real;

    /// True when every component is finite.
    fn all_finite(self) -> bool;

    #[inline(always)]
    fn cast<T: Scalar>(self) -> T {
        let (re, im) = self.parts();
        T::from_parts(re, im)
    }

    #[inline(always)]
    fn conj_if(self, conj: Conj) -> Self {
        match conj {
            Conj::NoConj => self,
            Conj::Conj => self.conj(),
        }
    }
}

macro_rules! impl_real_scalar {
    ($t:ty, $dt:expr) => {
        impl Scalar for $t {
            type Real = $t;
            const DATATYPE: Datatype = $dt;

            #[inline(always)]
            fn conj(self) -> Self {
                self
            }
            #[inline(always)]
            fn real(self) -> Self::Real {
                self
            }
            #[inline(always)]
            fn imag(self) -> Self::Real {
                0.0
            }
            #[inline(always)]
            fn parts(self) -> (f64, f64) {
                (self as f64, 0.0)
            }
            #[inline(always)]
            fn from_parts(re: f64, _im: f64) -> Self {
                re as $t
            }
            #[inline(always)]
            fn abs_sq(self) -> Self::Real {
                self * self
            }
            #[inline(always)]
            fn all_finite(self) -> bool {
                self.is_finite()
            }
        }
    };
}

macro_rules! impl_complex_scalar {
    ($t:ty, $r:ty, $dt:expr) => {
        impl Scalar for $t {
            type Real = $r;
            const DATATYPE: Datatype = $dt;

            #[inline(always)]
            fn conj(self) -> Self {
                <$t>::new(self.re, -self.im)
            }
            #[inline(always)]
            fn real(self) -> Self::Real {
                self.re
            }
            #[inline(always)]
            fn imag(self) -> Self::Real {
                self.im
            }
            #[inline(always)]
            fn parts(self) -> (f64, f64) {
                (self.re as f64, self.im as f64)
            }
            #[inline(always)]
            fn from_parts(re: f64, im: f64) -> Self {
                <$t>::new(re as $r, im as $r)
            }
            #[inline(always)]
            fn abs_sq(self) -> Self::Real {
                self.re * self.re + self.im * self.im
            }
            #[inline(always)]
            fn all_finite(self) -> bool {
                self.re.is_finite() && self.im.is_finite()
            }
        }
    };
}

impl_real_scalar!(f32, Datatype::Float);
impl_real_scalar!(f64, Datatype::Double);
impl_complex_scalar!(Complex32, f32, Datatype::SComplex);
impl_complex_scalar!(Complex64, f64, Datatype::DComplex);

/// The combined type of two operands, used for mixed-type accumulation:
/// complex if either side is complex, double if either side is double.
pub trait Promote<Y: Scalar>: Scalar {
    type Output: Scalar;
}

macro_rules! impl_promote {
    ($($x:ty, $y:ty => $out:ty;)*) => {
        $(
            impl Promote<$y> for $x {
                type Output = $out;
            }
        )*
    };
}

impl_promote! {
    f32, f32 => f32;
    f32, Complex32 => Complex32;
    f32, f64 => f64;
    f32, Complex64 => Complex64;
    Complex32, f32 => Complex32;
    Complex32, Complex32 => Complex32;
    Complex32, f64 => Complex64;
    Complex32, Complex64 => Complex64;
    f64, f32 => f64;
    f64, Complex32 => Complex64;
    f64, f64 => f64;
    f64, Complex64 => Complex64;
    Complex64, f32 => Complex64;
    Complex64, Complex32 => Complex64;
    Complex64, f64 => Complex64;
    Complex64, Complex64 => Complex64;
}

/// Marker for type pairs this build compiled typed kernels for.
///
/// Homogeneous pairs are always available. Same-precision real/complex pairs
/// need the `mixed-domain` feature and every other pair needs
/// `mixed-precision`, so calling a typed entry point for a disabled
/// combination fails to compile.
pub trait Mixes<X: Scalar>: Scalar {}

macro_rules! impl_mixes {
    ($($a:ty, $b:ty;)*) => {
        $( impl Mixes<$b> for $a {} )*
    };
}

impl_mixes! {
    f32, f32;
    Complex32, Complex32;
    f64, f64;
    Complex64, Complex64;
}

#[cfg(feature = "mixed-domain")]
impl_mixes! {
    f32, Complex32;
    Complex32, f32;
    f64, Complex64;
    Complex64, f64;
}

#[cfg(feature = "mixed-precision")]
impl_mixes! {
    f32, f64;
    f64, f32;
    Complex32, Complex64;
    Complex64, Complex32;
    f32, Complex64;
    Complex64, f32;
    f64, Complex32;
    Complex32, f64;
}
