//! Contiguous typed vector helpers used by the residual checks.

use num_traits::{Float, One, Zero};

use crate::types::Scalar;

/// `x := alpha * x`
pub fn scalv<T: Scalar>(alpha: T, x: &mut [T]) {
    for chi in x.iter_mut() {
        *chi = alpha * *chi;
    }
}

/// `y := y - x`
///
/// # Panics
///
/// Panics if the lengths differ.
pub fn subv<T: Scalar>(x: &[T], y: &mut [T]) {
    assert_eq!(x.len(), y.len(), "subv: length mismatch");
    for (psi, &chi) in y.iter_mut().zip(x) {
        *psi = *psi - chi;
    }
}

/// `y := x`
///
/// # Panics
///
/// Panics if the lengths differ.
pub fn copyv<T: Scalar>(x: &[T], y: &mut [T]) {
    assert_eq!(x.len(), y.len(), "copyv: length mismatch");
    y.copy_from_slice(x);
}

/// Euclidean norm, accumulated with a running scale so large or small
/// elements neither overflow nor underflow. NaN input yields NaN.
pub fn fnormv<T: Scalar>(x: &[T]) -> T::Real {
    let zero = <T::Real as Zero>::zero();
    let one = <T::Real as One>::one();
    let mut scale = zero;
    let mut sumsq = one;

    for &chi in x {
        for component in [chi.real(), chi.imag()] {
            if component == zero {
                continue;
            }
            let abs = Float::abs(component);
            if scale < abs {
                let ratio = scale / abs;
                sumsq = one + sumsq * ratio * ratio;
                scale = abs;
            } else {
                let ratio = abs / scale;
                sumsq = sumsq + ratio * ratio;
            }
        }
    }

    scale * Float::sqrt(sumsq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex32;

    #[test]
    fn norm_of_simple_vectors() {
        assert_eq!(fnormv::<f64>(&[]), 0.0);
        assert_relative_eq!(fnormv(&[3.0f64, 4.0]), 5.0, epsilon = 1e-15);
        assert_relative_eq!(fnormv(&[Complex32::new(3.0, 4.0)]), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn norm_does_not_overflow() {
        let big = 1e300f64;
        assert_relative_eq!(fnormv(&[big, big]), big * 2f64.sqrt(), max_relative = 1e-14);
    }

    #[test]
    fn norm_propagates_nan() {
        assert!(fnormv(&[1.0f64, f64::NAN]).is_nan());
    }

    #[test]
    fn sub_and_scale() {
        let mut y = [5.0f64, 6.0];
        subv(&[1.0, 2.0], &mut y);
        scalv(0.5, &mut y);
        assert_eq!(y, [2.0, 2.0]);

        let mut z = [0.0f64; 2];
        copyv(&y, &mut z);
        assert_eq!(z, y);
    }
}
