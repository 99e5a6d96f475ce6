use crate::object::Matrix;
use crate::types::{Diag, Scalar, Uplo};

/// `x := inv(A) * x` for triangular `A`, by plain substitution.
///
/// Divides by each diagonal element instead of multiplying by a packed
/// reciprocal, so it shares no code path with the trsm micro-kernels and
/// serves as their independent reference. Reads only the triangle named by
/// `A`'s uplo tag, and never the diagonal when `A` is unit-diagonal.
///
/// # Panics
///
/// Panics if `A` is not square or `x` doesn't match its order.
pub fn trsv<T: Scalar>(a: &Matrix<'_, T>, x: &mut [T]) {
    if let Err(e) = a.ensure_square() {
        panic!("trsv: {e}");
    }
    let m = a.rows();
    assert_eq!(x.len(), m, "trsv: x has {} elements, A is {m}x{m}", x.len());

    let solve_row = |i: usize, x: &mut [T], solved: std::ops::Range<usize>| {
        let mut rho = T::zero();
        for l in solved {
            rho = rho + a.get(i, l) * x[l];
        }
        let chi = x[i] - rho;
        x[i] = match a.diag() {
            Diag::NonUnit => chi / a.get(i, i),
            Diag::Unit => chi,
        };
    };

    match a.uplo() {
        Uplo::Upper => {
            for i in (0..m).rev() {
                solve_row(i, x, i + 1..m);
            }
        }
        Uplo::Lower => {
            for i in 0..m {
                solve_row(i, x, 0..i);
            }
        }
    }
}
