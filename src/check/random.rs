//! Random operand generation and structure shaping for the checks.

use rand::Rng;

use crate::object::MatrixMut;
use crate::types::{Scalar, Uplo};

/// One element uniform in `[-1, 1]`, per real component.
pub fn rands<T: Scalar, R: Rng + ?Sized>(rng: &mut R) -> T {
    let re = rng.gen_range(-1.0..=1.0);
    let im = if T::DATATYPE.is_complex() {
        rng.gen_range(-1.0..=1.0)
    } else {
        0.0
    };
    T::from_parts(re, im)
}

/// Length-`n` random vector.
pub fn randv<T: Scalar, R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<T> {
    (0..n).map(|_| rands(rng)).collect()
}

/// Random `m x n` matrix buffer, column-major.
pub fn randm<T: Scalar, R: Rng + ?Sized>(m: usize, n: usize, rng: &mut R) -> Vec<T> {
    randv(m * n, rng)
}

/// Mirror the triangle named by `a`'s uplo tag into the other half, making
/// `a` densely symmetric.
///
/// # Panics
///
/// Panics if `a` is not square.
pub fn mksymm<T: Scalar>(a: &mut MatrixMut<'_, T>) {
    let m = a.rows();
    assert_eq!(a.cols(), m, "mksymm: {}x{} is not square", m, a.cols());
    let uplo = a.uplo();
    for j in 0..m {
        for i in j + 1..m {
            // (i, j) is strictly below the diagonal
            match uplo {
                Uplo::Upper => a.set(i, j, a.get(j, i)),
                Uplo::Lower => a.set(j, i, a.get(i, j)),
            }
        }
    }
}

/// Zero the strictly opposite triangle of the one named by `a`'s uplo tag.
///
/// # Panics
///
/// Panics if `a` is not square.
pub fn mktrim<T: Scalar>(a: &mut MatrixMut<'_, T>) {
    let m = a.rows();
    assert_eq!(a.cols(), m, "mktrim: {}x{} is not square", m, a.cols());
    let uplo = a.uplo();
    for j in 0..m {
        for i in j + 1..m {
            match uplo {
                Uplo::Upper => a.set(i, j, T::zero()),
                Uplo::Lower => a.set(j, i, T::zero()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex32;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let v: Vec<Complex32> = randv(256, &mut rng);
        assert!(v.iter().all(|z| z.re.abs() <= 1.0 && z.im.abs() <= 1.0));
        assert!(v.iter().any(|z| z.im != 0.0));

        let r: Vec<f64> = randm(4, 5, &mut rng);
        assert_eq!(r.len(), 20);
    }

    #[test]
    fn symmetrize_then_trim() {
        let mut data = vec![1.0f64, 2.0, 3.0, 4.0];
        let mut a = MatrixMut::col_major(&mut data, 2, 2).unwrap().with_uplo(Uplo::Lower);
        mksymm(&mut a);
        assert_eq!(a.get(0, 1), 2.0);
        mktrim(&mut a);
        assert_eq!(data, vec![1.0, 2.0, 0.0, 4.0]);
    }
}
