//! Residual check for the symmetric rank-k update.
//!
//! With `a` random and `c_orig` random and symmetric, the update
//!
//! ```text
//! C := beta * C_orig + alpha * A * A^T
//! ```
//!
//! is taken as correct when `fnorm(v - z)` is negligible, where
//!
//! ```text
//! v = C * t
//! z = beta * C_orig * t + alpha * A * (A^T * t)
//! ```
//!
//! for a random probe `t` scaled by `1 / m`. Both `C` and `C_orig` are read
//! through `symv`, so only their stored triangles count.

use rand::Rng;

use crate::error::{Error, Result};
use crate::level1::{copyv, fnormv, scalv, subv};
use crate::matrix::{gemv, symv};
use crate::object::{Matrix, MatrixMut};
use crate::types::{Scalar, Struc, Trans, Uplo};

use super::random::{mksymm, mktrim, randm, randv};
use super::stored_finite;

/// Residual of a syrk result `c` against its pre-image `c_orig`.
///
/// Returns 0 for an empty `c`.
///
/// # Errors
///
/// [`Error::NonSquare`] if `c` or `c_orig` is not square, and
/// [`Error::DimensionMismatch`] if the operands don't conform.
pub fn syrk_check<T: Scalar, R: Rng + ?Sized>(
    alpha: T,
    a: &Matrix<'_, T>,
    beta: T,
    c: &Matrix<'_, T>,
    c_orig: &Matrix<'_, T>,
    rng: &mut R,
) -> Result<f64> {
    c.ensure_square()?;
    c_orig.ensure_square()?;
    let m = c.rows();
    if c_orig.rows() != m {
        return Err(Error::DimensionMismatch {
            what: "syrk check: C_orig order",
            expected: m,
            found: c_orig.rows(),
        });
    }
    if a.rows() != m {
        return Err(Error::DimensionMismatch {
            what: "syrk check: rows of A",
            expected: m,
            found: a.rows(),
        });
    }
    if m == 0 {
        return Ok(0.0);
    }
    let k = a.cols();

    let mut t: Vec<T> = randv(m, rng);
    scalv(T::from_parts(1.0 / m as f64, 0.0), &mut t);

    let mut v = vec![T::zero(); m];
    symv(T::one(), c, &t, T::zero(), &mut v);

    let mut w = vec![T::zero(); k];
    gemv(T::one(), &a.transposed(), &t, T::zero(), &mut w);
    let mut z = vec![T::zero(); m];
    gemv(alpha, a, &w, T::zero(), &mut z);
    symv(beta, c_orig, &t, T::one(), &mut z);

    subv(&z, &mut v);
    let (resid, _) = fnormv(&v).parts();
    Ok(resid)
}

/// Run one randomized syrk experiment and return its residual.
///
/// Builds `A` (`m x k` after applying `trans`, normalized by `1 / k`) and a
/// symmetric `C` whose unstored triangle is zeroed, hands them to `op`, and
/// checks the result. `alpha` and `beta` carry nonzero imaginary parts in
/// the complex case.
pub fn syrk_experiment<T, R, F>(
    m: usize,
    k: usize,
    uplo: Uplo,
    trans: Trans,
    rng: &mut R,
    op: F,
) -> Result<f64>
where
    T: Scalar,
    R: Rng + ?Sized,
    F: FnOnce(T, &Matrix<'_, T>, T, &mut MatrixMut<'_, T>),
{
    let alpha = T::from_parts(1.2, 0.5);
    let beta = T::from_parts(-1.0, 0.5);

    let (a_rows, a_cols) = if trans.is_transposed() { (k, m) } else { (m, k) };
    let mut a_data: Vec<T> = randm(a_rows, a_cols, rng);
    if k > 0 {
        scalv(T::from_parts(1.0 / k as f64, 0.0), &mut a_data);
    }
    let a = Matrix::col_major(&a_data, a_rows, a_cols)?.with_trans(trans);

    let mut c_data: Vec<T> = randm(m, m, rng);
    {
        let mut c = MatrixMut::col_major(&mut c_data, m, m)?
            .with_struc(Struc::Symmetric)
            .with_uplo(uplo);
        mksymm(&mut c);
        mktrim(&mut c);
    }
    let mut c_orig_data = vec![T::zero(); c_data.len()];
    copyv(&c_data, &mut c_orig_data);

    let mut c = MatrixMut::col_major(&mut c_data, m, m)?
        .with_struc(Struc::Symmetric)
        .with_uplo(uplo);
    op(alpha, &a, beta, &mut c);
    if !stored_finite(&c.as_matrix()) {
        log::warn!("syrk check: m={m} k={k} result holds non-finite entries");
    }

    let c_orig = Matrix::col_major(&c_orig_data, m, m)?
        .with_struc(Struc::Symmetric)
        .with_uplo(uplo);
    let resid = syrk_check(alpha, &a, beta, &c.as_matrix(), &c_orig, rng)?;
    log::debug!("syrk check: m={m} k={k} uplo={uplo:?} trans={trans:?} resid={resid:e}");
    Ok(resid)
}
