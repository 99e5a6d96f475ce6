use crate::object::Matrix;
use crate::types::Scalar;

/// `y := beta * y + alpha * A * x`, with `A` read through its tags.
///
/// When `beta` is zero, `y` is overwritten without being read.
///
/// # Panics
///
/// Panics if `x` or `y` don't match the dimensions of `A`.
pub fn gemv<T: Scalar>(alpha: T, a: &Matrix<'_, T>, x: &[T], beta: T, y: &mut [T]) {
    assert_eq!(x.len(), a.cols(), "gemv: x has {} elements, A has {} cols", x.len(), a.cols());
    assert_eq!(y.len(), a.rows(), "gemv: y has {} elements, A has {} rows", y.len(), a.rows());

    for (i, psi) in y.iter_mut().enumerate() {
        let mut rho = T::zero();
        for (p, &chi) in x.iter().enumerate() {
            rho = rho + a.get(i, p) * chi;
        }
        *psi = if beta.is_zero() {
            alpha * rho
        } else {
            beta * *psi + alpha * rho
        };
    }
}
