use crate::object::{Matrix, MatrixMut};
use crate::types::{Scalar, Uplo};

/// Symmetric rank-k update `C := beta * C + alpha * A * A^T`.
///
/// `A` is `m x k` and is read through its tags, so passing a transposed
/// view computes `A^T * A`. No conjugation is applied to the second factor:
/// `C` is symmetric, not Hermitian, in the complex case too. Only the
/// triangle named by `C`'s uplo tag is read or written.
///
/// # Panics
///
/// Panics if `C` is not square or its order differs from the rows of `A`.
pub fn syrk<T: Scalar>(alpha: T, a: &Matrix<'_, T>, beta: T, c: &mut MatrixMut<'_, T>) {
    let m = c.rows();
    assert_eq!(c.cols(), m, "syrk: C is {}x{}, not square", m, c.cols());
    assert_eq!(a.rows(), m, "syrk: A has {} rows, C is {m}x{m}", a.rows());
    let k = a.cols();

    for j in 0..m {
        let rows = match c.uplo() {
            Uplo::Upper => 0..j + 1,
            Uplo::Lower => j..m,
        };
        for i in rows {
            let mut rho = T::zero();
            for p in 0..k {
                rho = rho + a.get(i, p) * a.get(j, p);
            }
            let gamma = if beta.is_zero() {
                alpha * rho
            } else {
                beta * c.get(i, j) + alpha * rho
            };
            c.set(i, j, gamma);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_lower_triangle_only() {
        // A = [[1, 2], [3, 4]] row-major; A A^T = [[5, 11], [11, 25]]
        let a = [1.0, 2.0, 3.0, 4.0];
        let a = Matrix::row_major(&a, 2, 2).unwrap();
        let mut c = [1.0f64, 1.0, -7.0, 1.0];
        let mut cm = MatrixMut::col_major(&mut c, 2, 2).unwrap().with_uplo(Uplo::Lower);
        syrk(1.0, &a, 2.0, &mut cm);
        assert_eq!(c, [7.0, 13.0, -7.0, 27.0]);
    }
}
