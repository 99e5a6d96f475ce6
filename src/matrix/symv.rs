use crate::object::Matrix;
use crate::types::{Scalar, Struc};

/// `y := beta * y + alpha * A * x` for symmetric `A`.
///
/// Only the triangle named by `A`'s uplo tag is read; the other half is
/// taken as its mirror image, whatever the buffer holds there.
///
/// # Panics
///
/// Panics if `A` is not square or the vector lengths don't match.
pub fn symv<T: Scalar>(alpha: T, a: &Matrix<'_, T>, x: &[T], beta: T, y: &mut [T]) {
    if let Err(e) = a.ensure_square() {
        panic!("symv: {e}");
    }
    let m = a.rows();
    assert_eq!(x.len(), m, "symv: x has {} elements, A is {m}x{m}", x.len());
    assert_eq!(y.len(), m, "symv: y has {} elements, A is {m}x{m}", y.len());

    let stored = a.with_struc(Struc::Symmetric);
    for (i, psi) in y.iter_mut().enumerate() {
        let mut rho = T::zero();
        for (p, &chi) in x.iter().enumerate() {
            let alpha_ip = if stored.is_stored(i, p) {
                a.get(i, p)
            } else {
                a.get(p, i)
            };
            rho = rho + alpha_ip * chi;
        }
        *psi = if beta.is_zero() {
            alpha * rho
        } else {
            beta * *psi + alpha * rho
        };
    }
}
