//! Upper-triangular trsm micro-kernels: `C11 := inv(A11) * B11`.

use crate::types::{Diag, Scalar};

use super::trsm_l::scale_by_diag;

/// Reference upper trsm micro-kernel, any datatype and any `m x n` tile.
///
/// Back-substitution from the last row to the first. Row `i` subtracts the
/// contribution of the `m - 1 - i` rows already solved below it, multiplies
/// by the stored reciprocal of `A11[i, i]`, and writes the result to both
/// the packed `B11` (so later rows read it as a solved value) and `C11`.
///
/// # Safety
///
/// Caller must ensure:
/// - `a` holds the upper triangle of an `m x m` block stored by columns:
///   element `(i, l)` for `i <= l < m` is readable at `a.add(i + l * cs_a)`.
///   The diagonal holds reciprocals unless `diag` is [`Diag::Unit`], in which
///   case it is never read. The strictly lower triangle is never read.
/// - `b` holds an `m x n` block stored by rows: `(i, j)` at
///   `b.add(i * rs_b + j)`, readable and writable.
/// - `c.offset(i * rs_c + j * cs_c)` is writable for every `(i, j)` in the
///   tile and does not overlap `a` or `b`.
#[allow(clippy::too_many_arguments)]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn trsm_u_ref<T: Scalar>(
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
    for iter in 0..m {
        let i = m - iter - 1;
        let n_behind = iter;

        for j in 0..n {
            // chi11 = chi11 - a12t * x21
            let mut rho11 = T::zero();
            for l in 0..n_behind {
                let alpha12 = *a.add(i + (i + 1 + l) * cs_a);
                let chi21 = *b.add((i + 1 + l) * rs_b + j);
                rho11 = rho11 + alpha12 * chi21;
            }

            let chi11 = b.add(i * rs_b + j);
            *chi11 = scale_by_diag(*chi11 - rho11, diag, a.add(i + i * cs_a));

            *c.offset(i as isize * rs_c + j as isize * cs_c) = *chi11;
        }
    }
}

/// Double-precision upper kernel for full `MR x NR` tiles.
///
/// Keeps the partial sums of one output row in a local array while sweeping
/// the solved rows, so each solved row of `B11` is streamed once per output
/// row instead of once per element. The accumulation order matches
/// [`trsm_u_ref`], so results are bit-identical. Edge tiles go to the
/// reference kernel.
///
/// # Safety
///
/// Same contract as [`trsm_u_ref`].
#[allow(clippy::too_many_arguments)]
#[allow(clippy::needless_range_loop)]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn dtrsm_u_opt<const MR: usize, const NR: usize>(
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
        trsm_u_ref::<f64>(m, n, diag, a, cs_a, b, rs_b, c, rs_c, cs_c);
        return;
    }

    for iter in 0..MR {
        let i = MR - iter - 1;

        let mut rho = [0.0f64; NR];
        for l in (i + 1)..MR {
            let alpha12 = *a.add(i + l * cs_a);
            let x21 = b.add(l * rs_b);
            for j in 0..NR {
                rho[j] += alpha12 * *x21.add(j);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tiles_write_nothing() {
        let a = [0.5f64; 16];
        for (m, n) in [(3, 0), (0, 3), (4, 0), (0, 4)] {
            let mut b = [-7.0f64; 16];
            let mut c = [-7.0f64; 16];
            unsafe {
                trsm_u_ref(m, n, Diag::NonUnit, a.as_ptr(), 4, b.as_mut_ptr(), 4, c.as_mut_ptr(), 1, 4);
                dtrsm_u_opt::<4, 4>(m, n, Diag::NonUnit, a.as_ptr(), 4, b.as_mut_ptr(), 4, c.as_mut_ptr(), 1, 4);
            }
            assert!(b.iter().chain(&c).all(|&v| v == -7.0), "m={m} n={n}");
        }
    }

    #[test]
    fn single_element() {
        // A = [[2.0]] packed as its reciprocal
        let a = [0.5f64];
        let mut b = [4.0f64];
        let mut c = [0.0f64];
        unsafe { trsm_u_ref(1, 1, Diag::NonUnit, a.as_ptr(), 1, b.as_mut_ptr(), 1, c.as_mut_ptr(), 1, 1) };
        assert_eq!(c, [2.0]);
        assert_eq!(b, [2.0]);
    }

    #[test]
    fn two_by_two_back_substitution() {
        // A = [[2, 1], [0, 4]], column-stored, reciprocal diagonal,
        // NaN in the unstored lower triangle.
        let a = [0.5f64, f64::NAN, 1.0, 0.25];
        // B = [[5], [8]]  ->  x1 = 2, x0 = (5 - 2) / 2 = 1.5
        let mut b = [5.0f64, 8.0];
        let mut c = [0.0f64; 2];
        unsafe { trsm_u_ref(2, 1, Diag::NonUnit, a.as_ptr(), 2, b.as_mut_ptr(), 1, c.as_mut_ptr(), 1, 1) };
        assert_eq!(c, [1.5, 2.0]);
        assert_eq!(b, c);
    }

    #[test]
    fn unit_diagonal_is_never_read() {
        let a = [f64::NAN, f64::NAN, 3.0, f64::NAN];
        let mut b = [7.0f64, 2.0];
        let mut c = [0.0f64; 2];
        unsafe { trsm_u_ref(2, 1, Diag::Unit, a.as_ptr(), 2, b.as_mut_ptr(), 1, c.as_mut_ptr(), 1, 1) };
        assert_eq!(c, [1.0, 2.0]);
    }

    #[test]
    fn opt_matches_ref_bitwise() {
        const MR: usize = 4;
        const NR: usize = 4;
        let mut a = [0.0f64; MR * MR];
        for l in 0..MR {
            for i in 0..=l {
                a[i + l * MR] = if i == l {
                    1.0 / (2.0 + i as f64)
                } else {
                    0.1 * (i + 3 * l) as f64 - 0.7
                };
            }
        }
        let b0: Vec<f64> = (0..MR * NR).map(|v| (v as f64).sin()).collect();

        let mut b_ref = b0.clone();
        let mut c_ref = vec![0.0f64; MR * NR];
        let mut b_opt = b0.clone();
        let mut c_opt = vec![0.0f64; MR * NR];
        unsafe {
            trsm_u_ref(MR, NR, Diag::NonUnit, a.as_ptr(), MR, b_ref.as_mut_ptr(), NR, c_ref.as_mut_ptr(), 1, MR as isize);
            dtrsm_u_opt::<MR, NR>(MR, NR, Diag::NonUnit, a.as_ptr(), MR, b_opt.as_mut_ptr(), NR, c_opt.as_mut_ptr(), 1, MR as isize);
        }
        for (r, o) in c_ref.iter().zip(&c_opt) {
            assert_eq!(r.to_bits(), o.to_bits());
        }
        assert_eq!(b_ref, b_opt);
    }
}
