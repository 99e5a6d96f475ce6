//! Residual check for the left-side triangular solve.
//!
//! `B := alpha * inv(op(A)) * B_orig` is taken as correct when
//! `fnorm(v - z)` is negligible, where `v = B * t` and
//! `z = alpha * inv(op(A)) * (B_orig * t)`, the inverse applied with the
//! division-based `trsv`.

use rand::Rng;

use crate::error::{Error, Result};
use crate::level1::{copyv, fnormv, scalv, subv};
use crate::matrix::{gemv, trsv};
use crate::object::{Matrix, MatrixMut};
use crate::types::{Diag, Scalar, Struc, Trans, Uplo};

use super::random::{mktrim, randm, randv};
use super::stored_finite;

/// Residual of a trsm result `b` against its pre-image `b_orig`.
///
/// `a` is the triangular operand exactly as the solve saw it, tags included.
/// Returns 0 for an empty `b`.
///
/// # Errors
///
/// [`Error::NonSquare`] if `a` is not square, and
/// [`Error::DimensionMismatch`] if the operands don't conform.
pub fn trsm_check<T: Scalar, R: Rng + ?Sized>(
    alpha: T,
    a: &Matrix<'_, T>,
    b: &Matrix<'_, T>,
    b_orig: &Matrix<'_, T>,
    rng: &mut R,
) -> Result<f64> {
    a.ensure_square()?;
    let (m, n) = (b.rows(), b.cols());
    if a.rows() != m {
        return Err(Error::DimensionMismatch {
            what: "trsm check: order of A",
            expected: m,
            found: a.rows(),
        });
    }
    if b_orig.rows() != m || b_orig.cols() != n {
        return Err(Error::DimensionMismatch {
            what: "trsm check: elements of B_orig",
            expected: m * n,
            found: b_orig.rows() * b_orig.cols(),
        });
    }
    if m == 0 || n == 0 {
        return Ok(0.0);
    }

    let mut t: Vec<T> = randv(n, rng);
    scalv(T::from_parts(1.0 / n as f64, 0.0), &mut t);

    let mut v = vec![T::zero(); m];
    gemv(T::one(), b, &t, T::zero(), &mut v);

    let mut z = vec![T::zero(); m];
    gemv(alpha, b_orig, &t, T::zero(), &mut z);
    trsv(a, &mut z);

    subv(&z, &mut v);
    let (resid, _) = fnormv(&v).parts();
    Ok(resid)
}

/// Run one randomized trsm experiment and return its residual.
///
/// `A` is `m x m` random, scaled by `1 / m`, trimmed to `uplo`, and its
/// diagonal shifted by 2 so the solve is well conditioned; `B` is `m x n`
/// random; `alpha` is 2.
pub fn trsm_experiment<T, R, F>(
    m: usize,
    n: usize,
    uplo: Uplo,
    trans: Trans,
    diag: Diag,
    rng: &mut R,
    op: F,
) -> Result<f64>
where
    T: Scalar,
    R: Rng + ?Sized,
    F: FnOnce(T, &Matrix<'_, T>, &mut MatrixMut<'_, T>),
{
    let alpha = T::from_parts(2.0, 0.0);

    let mut a_data: Vec<T> = randm(m, m, rng);
    if m > 0 {
        scalv(T::from_parts(1.0 / m as f64, 0.0), &mut a_data);
    }
    {
        let mut a = MatrixMut::col_major(&mut a_data, m, m)?.with_uplo(uplo);
        mktrim(&mut a);
        let two = T::from_parts(2.0, 0.0);
        for i in 0..m {
            a.set(i, i, a.get(i, i) + two);
        }
    }
    // The tags describe the stored matrix; `trans` is applied on top.
    let a = Matrix::col_major(&a_data, m, m)?
        .with_struc(Struc::Triangular)
        .with_uplo(uplo)
        .with_diag(diag)
        .with_trans(trans);

    let mut b_data: Vec<T> = randm(m, n, rng);
    let mut b_orig_data = vec![T::zero(); b_data.len()];
    copyv(&b_data, &mut b_orig_data);
    let mut b = MatrixMut::col_major(&mut b_data, m, n)?;
    op(alpha, &a, &mut b);
    if !stored_finite(&b.as_matrix()) {
        log::warn!("trsm check: m={m} n={n} result holds non-finite entries");
    }

    let b_orig = Matrix::col_major(&b_orig_data, m, n)?;
    let resid = trsm_check(alpha, &a, &b.as_matrix(), &b_orig, rng)?;
    log::debug!(
        "trsm check: m={m} n={n} uplo={uplo:?} trans={trans:?} diag={diag:?} resid={resid:e}"
    );
    Ok(resid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocked::trsm_blocked;
    use crate::check::{Verdict, trsm_thresholds};
    use num_complex::Complex32;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn blocked_solve_passes() {
        let mut rng = StdRng::seed_from_u64(11);
        for (m, n) in [(1, 1), (4, 4), (9, 5), (23, 17)] {
            for uplo in [Uplo::Upper, Uplo::Lower] {
                for trans in [Trans::NoTranspose, Trans::Transpose] {
                    for diag in [Diag::NonUnit, Diag::Unit] {
                        let resid =
                            trsm_experiment::<f64, _, _>(m, n, uplo, trans, diag, &mut rng, trsm_blocked).unwrap();
                        assert_eq!(
                            trsm_thresholds(f64::DATATYPE).classify(resid),
                            Verdict::Pass,
                            "m={m} n={n} {uplo:?} {trans:?} {diag:?} resid={resid:e}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn single_complex_conjugated_passes() {
        let mut rng = StdRng::seed_from_u64(12);
        let resid = trsm_experiment::<Complex32, _, _>(
            13,
            6,
            Uplo::Lower,
            Trans::ConjTranspose,
            Diag::NonUnit,
            &mut rng,
            trsm_blocked,
        )
        .unwrap();
        assert_eq!(trsm_thresholds(Complex32::DATATYPE).classify(resid), Verdict::Pass, "resid={resid:e}");
    }

    #[test]
    fn doing_nothing_fails() {
        let mut rng = StdRng::seed_from_u64(13);
        let resid = trsm_experiment::<f64, _, _>(8, 3, Uplo::Upper, Trans::NoTranspose, Diag::NonUnit, &mut rng, |_, _, _| {})
            .unwrap();
        assert_eq!(trsm_thresholds(f64::DATATYPE).classify(resid), Verdict::Fail);
    }

    #[test]
    fn empty_problem_reports_zero() {
        let mut rng = StdRng::seed_from_u64(14);
        let resid = trsm_experiment::<f64, _, _>(6, 0, Uplo::Lower, Trans::NoTranspose, Diag::NonUnit, &mut rng, trsm_blocked)
            .unwrap();
        assert_eq!(resid, 0.0);
    }
}
