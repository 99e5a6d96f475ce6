use crate::object::{Matrix, MatrixMut};
use crate::types::Scalar;

/// Reference matrix multiply `C := beta * C + alpha * A * B` using i-k-j
/// loop order.
///
/// The innermost loop walks a row of B and a row of C together. Operands may
/// have any strides and carry transpose/conjugate tags; `A` and `B` are read
/// through [`Matrix::get`]. When `beta` is zero, `C` is overwritten without
/// being read.
///
/// This is the baseline the blocked routines are checked against.
///
/// # Panics
///
/// Panics if the dimensions don't conform.
pub fn gemm_naive<T: Scalar>(
    alpha: T,
    a: &Matrix<'_, T>,
    b: &Matrix<'_, T>,
    beta: T,
    c: &mut MatrixMut<'_, T>,
) {
    let (m, n, k) = (c.rows(), c.cols(), a.cols());
    assert_eq!(a.rows(), m, "gemm: A has {} rows, C has {m}", a.rows());
    assert_eq!(b.rows(), k, "gemm: B has {} rows, A has {k} cols", b.rows());
    assert_eq!(b.cols(), n, "gemm: B has {} cols, C has {n}", b.cols());

    for i in 0..m {
        for j in 0..n {
            let gamma = if beta.is_zero() {
                T::zero()
            } else {
                beta * c.get(i, j)
            };
            c.set(i, j, gamma);
        }
        for p in 0..k {
            let alpha_aip = alpha * a.get(i, p);
            for j in 0..n {
                c.set(i, j, c.get(i, j) + alpha_aip * b.get(p, j));
            }
        }
    }
}
