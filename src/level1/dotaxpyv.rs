//! Fused dot product and axpy sharing one pass over `x`:
//!
//! ```text
//! rho := conjxt(x)^T * conjy(y)
//! z   := z + alpha * conjx(x)
//! ```
//!
//! `x`, `y` and `z` may each have their own datatype. `alpha` has the datatype
//! of `x`, and `rho` accumulates in the combined type of `x` and `y`
//! ([`Promote`]). For `m == 0` neither `rho` nor `z` is written.

use std::sync::OnceLock;

use crate::dispatch::{DispatchConfig, Table3, for_each_type_triple};
use crate::object::vector::check_vector_extent;
use crate::object::{ScalarArg, TypedScalar, Vector, VectorMut};
use crate::types::{Conj, Mixes, Promote, Scalar};

/// Type-erased dotaxpyv kernel:
/// `(conjxt, conjx, conjy, m, alpha, x, incx, y, incy, rho, z, incz)`.
pub type DotaxpyvFn = unsafe fn(
    Conj,
    Conj,
    Conj,
    usize,
    *const u8,
    *const u8,
    usize,
    *const u8,
    usize,
    *mut u8,
    *mut u8,
    usize,
);

/// Unblocked dotaxpyv kernel.
///
/// # Safety
///
/// For every `i` in `0..m`: `x.add(i * incx)` and `y.add(i * incy)` must be
/// valid for reads and `z.add(i * incz)` valid for reads and writes. `z` must
/// not overlap `x` or `y`.
#[allow(clippy::too_many_arguments)]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn dotaxpyv_unb_var1<X, Y, Z>(
    conjxt: Conj,
    conjx: Conj,
    conjy: Conj,
    m: usize,
    alpha: &X,
    x: *const X,
    incx: usize,
    y: *const Y,
    incy: usize,
    rho: &mut <X as Promote<Y>>::Output,
    z: *mut Z,
    incz: usize,
) where
    X: Promote<Y>,
    Y: Scalar,
    Z: Scalar,
{
    if m == 0 {
        return;
    }

    let mut dot = <<X as Promote<Y>>::Output as num_traits::Zero>::zero();
    for i in 0..m {
        let chi1 = *x.add(i * incx);
        let psi1 = *y.add(i * incy);

        // rho += conjxt(chi1) * conjy(psi1)
        let chi1_xy: <X as Promote<Y>>::Output = chi1.conj_if(conjxt).cast();
        let psi1_xy: <X as Promote<Y>>::Output = psi1.conj_if(conjy).cast();
        dot = dot + chi1_xy * psi1_xy;

        // zeta1 += alpha * conjx(chi1)
        let zeta1 = z.add(i * incz);
        let alpha_chi1 = *alpha * chi1.conj_if(conjx);
        *zeta1 = *zeta1 + alpha_chi1.cast::<Z>();
    }
    *rho = dot;
}

#[allow(clippy::too_many_arguments)]
#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn dotaxpyv_erased<X: Promote<Y>, Y: Scalar, Z: Scalar>(
    conjxt: Conj,
    conjx: Conj,
    conjy: Conj,
    m: usize,
    alpha: *const u8,
    x: *const u8,
    incx: usize,
    y: *const u8,
    incy: usize,
    rho: *mut u8,
    z: *mut u8,
    incz: usize,
) {
    dotaxpyv_unb_var1::<X, Y, Z>(
        conjxt,
        conjx,
        conjy,
        m,
        &*(alpha as *const X),
        x as *const X,
        incx,
        y as *const Y,
        incy,
        &mut *(rho as *mut <X as Promote<Y>>::Output),
        z as *mut Z,
        incz,
    );
}

/// Build a dotaxpyv table keyed by `(x, y, z)` datatypes.
pub fn build_table(config: DispatchConfig) -> Table3<DotaxpyvFn> {
    let mut table = Table3::empty("dotaxpyv");

    macro_rules! register {
        ($x:ty, $y:ty, $z:ty) => {
            let key = [
                <$x as Scalar>::DATATYPE,
                <$y as Scalar>::DATATYPE,
                <$z as Scalar>::DATATYPE,
            ];
            if config.covers(&key) {
                table.register(key[0], key[1], key[2], dotaxpyv_erased::<$x, $y, $z> as DotaxpyvFn);
            }
        };
    }
    for_each_type_triple!(register);

    log::debug!("dotaxpyv table: tier={:?}, {} entries", config.tier(), table.len());
    table
}

/// Process-wide dotaxpyv table built from the compiled features.
pub fn table() -> &'static Table3<DotaxpyvFn> {
    static TABLE: OnceLock<Table3<DotaxpyvFn>> = OnceLock::new();
    TABLE.get_or_init(|| build_table(DispatchConfig::from_features()))
}

/// Object-level dotaxpyv through the process-wide table.
///
/// `xt` and `x` describe the same vector; their conjugation tags supply
/// `conjxt` and `conjx`, and `y`'s tag supplies `conjy`. The result is stored
/// into `rho` converted to `rho`'s own datatype.
///
/// # Panics
///
/// Panics if `xt` and `x` are different vectors, if the lengths of `x`, `y`
/// and `z` differ, or if the `(x, y, z)` datatypes are not registered.
pub fn dotaxpyv(
    alpha: &ScalarArg,
    xt: &Vector<'_>,
    x: &Vector<'_>,
    y: &Vector<'_>,
    rho: &mut TypedScalar,
    z: &mut VectorMut<'_>,
) {
    dotaxpyv_with(table(), alpha, xt, x, y, rho, z);
}

/// Object-level dotaxpyv through an explicit table.
///
/// # Panics
///
/// See [`dotaxpyv`].
pub fn dotaxpyv_with(
    table: &Table3<DotaxpyvFn>,
    alpha: &ScalarArg,
    xt: &Vector<'_>,
    x: &Vector<'_>,
    y: &Vector<'_>,
    rho: &mut TypedScalar,
    z: &mut VectorMut<'_>,
) {
    assert!(xt.aliases(x), "dotaxpyv: xt and x must describe the same vector");
    assert_eq!(x.len(), y.len(), "dotaxpyv: x has {} elements, y has {}", x.len(), y.len());
    assert_eq!(x.len(), z.len(), "dotaxpyv: x has {} elements, z has {}", x.len(), z.len());

    let (dt_x, dt_y, dt_z) = (x.datatype(), y.datatype(), z.datatype());
    let f = table.resolve(dt_x, dt_y, dt_z);

    let m = x.len();
    if m == 0 {
        return;
    }

    let alpha = alpha.resolve(dt_x).cast_to(dt_x);
    let mut rho_xy = TypedScalar::zero(dt_x.union(dt_y));

    // SAFETY: every descriptor was validated against its buffer, `f` matches
    // the (x, y, z) datatypes and `rho_xy` has the combined xy datatype.
    unsafe {
        f(
            xt.conj(),
            x.conj(),
            y.conj(),
            m,
            alpha.as_ptr(),
            x.as_ptr(),
            x.inc(),
            y.as_ptr(),
            y.inc(),
            rho_xy.as_mut_ptr(),
            z.as_mut_ptr(),
            z.inc(),
        );
    }

    *rho = rho_xy.cast_to(rho.datatype());
}

/// Typed dotaxpyv over `m` elements.
///
/// # Panics
///
/// Panics if any slice is too short for `m` elements at its stride.
#[allow(clippy::too_many_arguments)]
pub fn dotaxpyv_typed<X, Y, Z>(
    conjxt: Conj,
    conjx: Conj,
    conjy: Conj,
    m: usize,
    alpha: X,
    x: &[X],
    incx: usize,
    y: &[Y],
    incy: usize,
    rho: &mut <X as Promote<Y>>::Output,
    z: &mut [Z],
    incz: usize,
) where
    X: Promote<Y> + Mixes<Y> + Mixes<Z>,
    Y: Mixes<Z>,
    Z: Scalar,
{
    for (name, len, inc) in [("x", x.len(), incx), ("y", y.len(), incy), ("z", z.len(), incz)] {
        if let Err(e) = check_vector_extent(len, m, inc) {
            panic!("dotaxpyv: {name}: {e}");
        }
    }
    // SAFETY: extents checked above; `z` is a unique borrow so it cannot
    // overlap `x` or `y`.
    unsafe {
        dotaxpyv_unb_var1(
            conjxt,
            conjx,
            conjy,
            m,
            &alpha,
            x.as_ptr(),
            incx,
            y.as_ptr(),
            incy,
            rho,
            z.as_mut_ptr(),
            incz,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Constant;
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    #[test]
    fn real_dot_and_update() {
        let x = [1.0f64, 2.0, 3.0];
        let y = [4.0f64, 5.0, 6.0];
        let mut z = [1.0f64; 3];
        let mut rho = 0.0f64;

        dotaxpyv_typed(
            Conj::NoConj,
            Conj::NoConj,
            Conj::NoConj,
            3,
            2.0,
            &x,
            1,
            &y,
            1,
            &mut rho,
            &mut z,
            1,
        );

        assert_eq!(rho, 32.0);
        assert_eq!(z, [3.0, 5.0, 7.0]);
    }

    #[test]
    fn conjugation_flags_are_independent() {
        let xbuf = [Complex64::new(1.0, 2.0)];
        let ybuf = [Complex64::new(3.0, -1.0)];
        let mut zbuf = [Complex64::new(0.0, 0.0)];
        let mut rho = TypedScalar::zero(crate::types::Datatype::DComplex);

        let x = Vector::contiguous(&xbuf);
        let xt = x.conjugated();
        let y = Vector::contiguous(&ybuf);
        let mut z = VectorMut::contiguous(&mut zbuf);
        dotaxpyv(&ScalarArg::from(Constant::ONE), &xt, &x, &y, &mut rho, &mut z);

        // conj(1+2i) * (3-i) = (1-2i)(3-i) = 1 - 7i
        assert_eq!(rho.get::<Complex64>(), Some(Complex64::new(1.0, -7.0)));
        // z += 1 * x, not conjugated
        assert_eq!(zbuf[0], Complex64::new(1.0, 2.0));
    }

    #[test]
    fn strided_operands() {
        let x = [1.0f32, -9.0, 2.0, -9.0];
        let y = [3.0f32, 4.0];
        let mut z = [0.0f32, 5.0, 0.0, 5.0];
        let mut rho = 0.0f32;

        dotaxpyv_typed(
            Conj::NoConj,
            Conj::NoConj,
            Conj::NoConj,
            2,
            -1.0,
            &x,
            2,
            &y,
            1,
            &mut rho,
            &mut z,
            2,
        );

        assert_eq!(rho, 11.0);
        assert_eq!(z, [-1.0, 5.0, -2.0, 5.0]);
    }

    #[test]
    fn empty_problem_writes_nothing() {
        let mut rho = TypedScalar::from(42.0f64);
        let mut zbuf = [7.0f64; 2];
        let x = Vector::new(&[0.0f64; 1], 0, 1).unwrap();
        let y = Vector::new(&[0.0f64; 1], 0, 1).unwrap();
        let mut z = VectorMut::new(&mut zbuf, 0, 1).unwrap();
        dotaxpyv(&ScalarArg::from(Constant::ONE), &x, &x, &y, &mut rho, &mut z);
        assert_eq!(rho, TypedScalar::from(42.0f64));
        assert_eq!(zbuf, [7.0, 7.0]);
    }

    #[cfg(feature = "mixed-precision")]
    #[test]
    fn mixed_operands_accumulate_in_the_combined_type() {
        let x = [0.1f32, 0.2];
        let y = [Complex64::new(1.0, 1.0), Complex64::new(2.0, -1.0)];
        let mut z = [0.0f64; 2];
        let mut rho = Complex64::new(0.0, 0.0);

        dotaxpyv_typed(
            Conj::NoConj,
            Conj::NoConj,
            Conj::NoConj,
            2,
            1.0f32,
            &x,
            1,
            &y,
            1,
            &mut rho,
            &mut z,
            1,
        );

        let (x0, x1) = (0.1f32 as f64, 0.2f32 as f64);
        assert_relative_eq!(rho.re, x0 + 2.0 * x1, epsilon = 1e-15);
        assert_relative_eq!(rho.im, x0 - x1, epsilon = 1e-15);
        assert_eq!(z, [x0, x1]);
    }

    #[test]
    #[should_panic(expected = "same vector")]
    fn xt_must_alias_x() {
        let a = [1.0f64; 2];
        let b = [1.0f64; 2];
        let mut zbuf = [0.0f64; 2];
        let mut rho = TypedScalar::zero(crate::types::Datatype::Double);
        let mut z = VectorMut::contiguous(&mut zbuf);
        dotaxpyv(
            &ScalarArg::from(Constant::ONE),
            &Vector::contiguous(&a),
            &Vector::contiguous(&b),
            &Vector::contiguous(&b),
            &mut rho,
            &mut z,
        );
    }
}
