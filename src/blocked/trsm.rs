//! Blocked left-side triangular solve: `B := alpha * inv(op(A)) * B`.

use std::ops::Range;

use crate::kernels::{BlockSizes, NativeKernels};
use crate::object::{Matrix, MatrixMut};
use crate::types::{Struc, Uplo};

use super::pack::{PackedTriangle, pack_panel, pack_rect, pack_triangle};

/// One `mr`-row block of `A`, packed once and reused for every column panel.
struct RowBlock<T> {
    i0: usize,
    mb: usize,
    tri: PackedTriangle<T>,
    // Rows of the solution this block depends on.
    solved: Range<usize>,
    rect: Vec<T>,
}

/// Solve `op(A) * X = alpha * B` in place, with native block sizes.
///
/// `a` is any view of a square triangular matrix; transposition and
/// conjugation are taken from its tags (see [`Matrix::with_trans`]).
///
/// # Panics
///
/// Panics if `a` is not square, not tagged triangular, or its order does
/// not match the rows of `b`.
pub fn trsm_blocked<T: NativeKernels>(alpha: T, a: &Matrix<'_, T>, b: &mut MatrixMut<'_, T>) {
    trsm_blocked_with(BlockSizes::native::<T>(), alpha, a, b);
}

/// [`trsm_blocked`] with an explicit micro-tile shape.
///
/// # Panics
///
/// Also panics if either block size is zero.
pub fn trsm_blocked_with<T: NativeKernels>(
    sizes: BlockSizes,
    alpha: T,
    a: &Matrix<'_, T>,
    b: &mut MatrixMut<'_, T>,
) {
    if let Err(e) = a.ensure_square() {
        panic!("trsm: {e}");
    }
    assert_eq!(
        a.struc(),
        Struc::Triangular,
        "trsm: A must be tagged triangular"
    );
    assert_eq!(
        a.rows(),
        b.rows(),
        "trsm: A is {}x{} but B has {} rows",
        a.rows(),
        a.cols(),
        b.rows()
    );
    assert!(sizes.mr > 0 && sizes.nr > 0, "trsm: zero block size");

    let (m, n) = (b.rows(), b.cols());
    if m == 0 || n == 0 {
        return;
    }

    let BlockSizes { mr, nr } = sizes;
    let uplo = a.uplo();
    log::debug!(
        "trsm: {m}x{n}, uplo={uplo:?}, diag={:?}, conj={:?}, tiles {mr}x{nr}",
        a.diag(),
        a.conj()
    );

    // Upper solves from the bottom block up, lower from the top down.
    let mut starts: Vec<usize> = (0..m).step_by(mr).collect();
    if uplo == Uplo::Upper {
        starts.reverse();
    }

    let blocks: Vec<RowBlock<T>> = starts
        .into_iter()
        .map(|i0| {
            let mb = mr.min(m - i0);
            let solved = match uplo {
                Uplo::Upper => i0 + mb..m,
                Uplo::Lower => 0..i0,
            };
            RowBlock {
                i0,
                mb,
                tri: pack_triangle(a, i0, mb, mr, true),
                rect: pack_rect(a, i0, mb, solved.start, solved.len(), mr),
                solved,
            }
        })
        .collect();

    let trsm_ukr = match uplo {
        Uplo::Upper => T::trsm_u_ukr(),
        Uplo::Lower => T::trsm_l_ukr(),
    };
    let gemm_ukr = T::gemm_ukr();
    let minus_one = -T::one();
    let (rs_c, cs_c) = (b.row_stride() as isize, b.col_stride() as isize);

    for j0 in (0..n).step_by(nr) {
        let nb = nr.min(n - j0);
        let mut panel = pack_panel(&b.as_matrix(), j0, nb, nr, alpha);
        let bp = panel.as_mut_ptr();

        for blk in &blocks {
            let diag = blk.tri.solve_diag();
            // SAFETY: the panel holds m rows at leading dimension nr; the
            // gemm reads only the solved rows and writes only rows
            // i0..i0 + mb, which are disjoint. Packed A blocks were sized
            // with leading dimension mr, and (i0, j0) starts an mb x nb
            // tile inside b.
            unsafe {
                if !blk.solved.is_empty() {
                    gemm_ukr(
                        blk.mb,
                        nb,
                        blk.solved.len(),
                        minus_one,
                        blk.rect.as_ptr(),
                        mr,
                        bp.add(blk.solved.start * nr) as *const T,
                        nr,
                        T::one(),
                        bp.add(blk.i0 * nr),
                        nr as isize,
                        1,
                    );
                }
                trsm_ukr(
                    blk.mb,
                    nb,
                    diag,
                    blk.tri.as_ptr(),
                    mr,
                    bp.add(blk.i0 * nr),
                    nr,
                    b.ptr_at(blk.i0, j0),
                    rs_c,
                    cs_c,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Diag, Trans};
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    fn upper_3x3() -> Vec<f64> {
        // col-major [[2, 1, -1], [0, 4, 2], [0, 0, 8]]
        vec![2.0, 0.0, 0.0, 1.0, 4.0, 0.0, -1.0, 2.0, 8.0]
    }

    #[test]
    fn upper_solve_matches_hand_computation() {
        let a_data = upper_3x3();
        let a = Matrix::col_major(&a_data, 3, 3)
            .unwrap()
            .with_struc(Struc::Triangular);
        // X = [1, 1, 1]^T -> B = A * X = [2, 6, 8]
        let mut b_data = vec![2.0f64, 6.0, 8.0];
        let mut b = MatrixMut::col_major(&mut b_data, 3, 1).unwrap();
        trsm_blocked_with(BlockSizes { mr: 2, nr: 1 }, 1.0, &a, &mut b);
        for v in b_data {
            assert_relative_eq!(v, 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn alpha_scales_right_hand_side() {
        let a_data = upper_3x3();
        let a = Matrix::col_major(&a_data, 3, 3)
            .unwrap()
            .with_struc(Struc::Triangular);
        let mut b_data = vec![2.0f64, 6.0, 8.0];
        let mut b = MatrixMut::col_major(&mut b_data, 3, 1).unwrap();
        trsm_blocked(3.0, &a, &mut b);
        for v in b_data {
            assert_relative_eq!(v, 3.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn transposed_upper_solves_as_lower() {
        let a_data = upper_3x3();
        let a = Matrix::col_major(&a_data, 3, 3)
            .unwrap()
            .with_struc(Struc::Triangular)
            .with_trans(Trans::Transpose);
        // A^T * [1, 1, 1] = [2, 5, 9]
        let mut b_data = vec![2.0f64, 5.0, 9.0];
        let mut b = MatrixMut::col_major(&mut b_data, 3, 1).unwrap();
        trsm_blocked_with(BlockSizes { mr: 1, nr: 1 }, 1.0, &a, &mut b);
        for v in b_data {
            assert_relative_eq!(v, 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn unit_diagonal_ignores_stored_diagonal() {
        let a_data = vec![f64::NAN, 3.0, 0.0, f64::NAN];
        let a = Matrix::col_major(&a_data, 2, 2)
            .unwrap()
            .with_struc(Struc::Triangular)
            .with_uplo(Uplo::Lower)
            .with_diag(Diag::Unit);
        // [[1, 0], [3, 1]] * [1, 2] = [1, 5]
        let mut b_data = vec![1.0f64, 5.0];
        let mut b = MatrixMut::col_major(&mut b_data, 2, 1).unwrap();
        trsm_blocked(1.0, &a, &mut b);
        assert_eq!(b_data, vec![1.0, 2.0]);
    }

    #[test]
    fn conjugated_complex_solve() {
        let i = Complex64::new(0.0, 1.0);
        let a_data = [i, Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0), 2.0 * i];
        let a = Matrix::col_major(&a_data, 2, 2)
            .unwrap()
            .with_struc(Struc::Triangular)
            .with_trans(Trans::ConjNoTranspose);
        // conj(A) = [[-i, 1], [0, -2i]]; X = [1, 1] -> B = [1 - i, -2i]
        let mut b_data = [Complex64::new(1.0, -1.0), Complex64::new(0.0, -2.0)];
        let mut b = MatrixMut::col_major(&mut b_data, 2, 1).unwrap();
        trsm_blocked(Complex64::new(1.0, 0.0), &a, &mut b);
        for v in b_data {
            assert_relative_eq!(v.re, 1.0, epsilon = 1e-14);
            assert_relative_eq!(v.im, 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn empty_b_is_untouched() {
        let a_data = upper_3x3();
        let a = Matrix::col_major(&a_data, 3, 3)
            .unwrap()
            .with_struc(Struc::Triangular);
        let mut b_data = vec![-7.0f64; 9];
        trsm_blocked(1.0, &a, &mut MatrixMut::new(&mut b_data, 0, 3, 0, 1, 3).unwrap());
        assert!(b_data.iter().all(|&v| v == -7.0));

        let no_rows = Matrix::new(&a_data, 0, 0, 0, 1, 3)
            .unwrap()
            .with_struc(Struc::Triangular);
        trsm_blocked(1.0, &no_rows, &mut MatrixMut::new(&mut b_data, 0, 0, 3, 1, 3).unwrap());
        assert!(b_data.iter().all(|&v| v == -7.0));
    }

    #[test]
    #[should_panic(expected = "tagged triangular")]
    fn rejects_general_a() {
        let a_data = upper_3x3();
        let a = Matrix::col_major(&a_data, 3, 3).unwrap();
        let mut b_data = vec![0.0f64; 3];
        let mut b = MatrixMut::col_major(&mut b_data, 3, 1).unwrap();
        trsm_blocked(1.0, &a, &mut b);
    }
}
