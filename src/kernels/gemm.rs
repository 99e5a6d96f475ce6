//! Reference gemm micro-kernel used for the rank-k update between trsm
//! micro-kernel calls.

use crate::types::Scalar;

/// Computes `C := beta * C + alpha * A * B` on an `m x n` tile.
///
/// `A` is an `m x k` panel stored by columns (leading dimension `cs_a`),
/// `B` is a `k x n` panel stored by rows (leading dimension `rs_b`), the
/// same layouts the packing routines produce. When `beta` is zero, `C` is
/// overwritten without being read.
///
/// # Safety
///
/// Caller must ensure:
/// - `a.add(i + p * cs_a)` is readable for `i < m`, `p < k`
/// - `b.add(p * rs_b + j)` is readable for `p < k`, `j < n`
/// - `c.offset(i * rs_c + j * cs_c)` is readable and writable for `i < m`,
///   `j < n`, and may overlap `b` only in rows `b` does not read
#[allow(clippy::too_many_arguments)]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn gemm_ref<T: Scalar>(
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: *const T,
    cs_a: usize,
    b: *const T,
    rs_b: usize,
    beta: T,
    c: *mut T,
    rs_c: isize,
    cs_c: isize,
) {
    for i in 0..m {
        for j in 0..n {
            let mut ab = T::zero();
            for p in 0..k {
                ab = ab + *a.add(i + p * cs_a) * *b.add(p * rs_b + j);
            }

            let gamma = c.offset(i as isize * rs_c + j as isize * cs_c);
            *gamma = if beta.is_zero() {
                alpha * ab
            } else {
                beta * *gamma + alpha * ab
            };
        }
    }
}
