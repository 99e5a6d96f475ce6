//! Lower-triangular trsm micro-kernels: `C11 := inv(A11) * B11`.

use crate::types::{Diag, Scalar};

/// Multiply `chi` by the packed diagonal entry at `alpha11`, which holds a
/// reciprocal. A unit diagonal leaves `chi` alone and never reads `alpha11`.
#[inline(always)]
#[allow(unsafe_op_in_unsafe_fn)]
pub(super) unsafe fn scale_by_diag<T: Scalar>(chi: T, diag: Diag, alpha11: *const T) -> T {
    match diag {
        Diag::NonUnit => *alpha11 * chi,
        Diag::Unit => chi,
    }
}

/// Reference lower trsm micro-kernel, any datatype and any `m x n` tile.
///
/// Forward substitution from the first row to the last; row `i` subtracts
/// the `i` rows already solved above it.
///
/// # Safety
///
/// Caller must ensure:
/// - `a` holds the lower triangle of an `m x m` block stored by columns:
///   element `(i, l)` for `l <= i < m` is readable at `a.add(i + l * cs_a)`.
///   The diagonal holds reciprocals unless `diag` is [`Diag::Unit`]. The
///   strictly upper triangle is never read.
/// - `b` holds an `m x n` block stored by rows: `(i, j)` at
///   `b.add(i * rs_b + j)`, readable and writable.
/// - `c.offset(i * rs_c + j * cs_c)` is writable for every `(i, j)` in the
///   tile and does not overlap `a` or `b`.
#[allow(clippy::too_many_arguments)]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn trsm_l_ref<T: Scalar>(
    m: usize,
    n: usize,
    diag: Diag,
    a: *const T,
    cs_a: usize,
    b: *mut T,
    rs_b: usize,
    c: *mut T,
    rs_c: isize,
    cs_c: isize,
) {
    for i in 0..m {
        let n_behind = i;

        for j in 0..n {
            // chi11 = chi11 - a10t * x01
            let mut rho11 = T::zero();
            for l in 0..n_behind {
                let alpha10 = *a.add(i + l * cs_a);
                let chi01 = *b.add(l * rs_b + j);
                rho11 = rho11 + alpha10 * chi01;
            }

            let chi11 = b.add(i * rs_b + j);
            *chi11 = scale_by_diag(*chi11 - rho11, diag, a.add(i + i * cs_a));

            *c.offset(i as isize * rs_c + j as isize * cs_c) = *chi11;
        }
    }
}

/// Double-precision lower kernel for full `MR x NR` tiles, bit-identical to
/// [`trsm_l_ref`]. Edge tiles go to the reference kernel.
///
/// # Safety
///
/// Same contract as [`trsm_l_ref`].
#[allow(clippy::too_many_arguments)]
#[allow(clippy::needless_range_loop)]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn dtrsm_l_opt<const MR: usize, const NR: usize>(
    m: usize,
    n: usize,
    diag: Diag,
    a: *const f64,
    cs_a: usize,
    b: *mut f64,
    rs_b: usize,
    c: *mut f64,
    rs_c: isize,
    cs_c: isize,
) {
    if m != MR || n != NR {
        trsm_l_ref::<f64>(m, n, diag, a, cs_a, b, rs_b, c, rs_c, cs_c);
        return;
    }

    for i in 0..MR {
        let mut rho = [0.0f64; NR];
        for l in 0..i {
            let alpha10 = *a.add(i + l * cs_a);
            let x01 = b.add(l * rs_b);
            for j in 0..NR {
                rho[j] += alpha10 * *x01.add(j);
            }
        }

        let x1 = b.add(i * rs_b);
        for j in 0..NR {
            let chi11 = scale_by_diag(*x1.add(j) - rho[j], diag, a.add(i + i * cs_a));
            *x1.add(j) = chi11;
            *c.offset(i as isize * rs_c + j as isize * cs_c) = chi11;
        }
    }
}
