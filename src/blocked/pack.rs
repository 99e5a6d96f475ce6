//! Packing routines for the blocked triangular solve.
//!
//! Packed `A` blocks are stored by columns with leading dimension `packmr`
//! so the micro-kernel walks down a column with stride 1. Packed `B` panels
//! are stored by rows with leading dimension `packnr` so one row of a tile
//! is contiguous. Padding is zero.

use crate::object::Matrix;
use crate::types::{Diag, Scalar, Uplo};

/// What the diagonal of a packed triangle holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagStorage {
    /// The matrix's own diagonal entries.
    Original,
    /// `1 / a_ii`, ready for the trsm micro-kernels.
    Reciprocal,
    /// Ones; the source diagonal was never read.
    Unit,
}

/// A diagonal block of a triangular matrix, packed for a trsm micro-kernel.
#[derive(Debug, Clone)]
pub struct PackedTriangle<T> {
    data: Vec<T>,
    dim: usize,
    packmr: usize,
    uplo: Uplo,
    diag: DiagStorage,
}

impl<T: Scalar> PackedTriangle<T> {
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn packmr(&self) -> usize {
        self.packmr
    }

    pub fn uplo(&self) -> Uplo {
        self.uplo
    }

    pub fn diag_storage(&self) -> DiagStorage {
        self.diag
    }

    /// Diagonal mode to hand to a trsm micro-kernel.
    ///
    /// # Panics
    ///
    /// Panics if the block was packed with its original diagonal.
    pub fn solve_diag(&self) -> Diag {
        match self.diag {
            DiagStorage::Reciprocal => Diag::NonUnit,
            DiagStorage::Unit => Diag::Unit,
            DiagStorage::Original => {
                panic!("trsm: triangle was packed with its original diagonal, not reciprocals")
            }
        }
    }

    /// Packed element `(i, l)`. Zero outside the stored triangle.
    pub fn get(&self, i: usize, l: usize) -> T {
        assert!(i < self.dim && l < self.dim);
        self.data[i + l * self.packmr]
    }

    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }
}

/// A row-stored panel of `B` columns, packed for a trsm micro-kernel.
#[derive(Debug, Clone)]
pub struct PackedPanel<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
    packnr: usize,
}

impl<T: Scalar> PackedPanel<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn packnr(&self) -> usize {
        self.packnr
    }

    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(i < self.rows && j < self.cols);
        self.data[i * self.packnr + j]
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }
}

/// Pack the `mb x mb` diagonal block of `a` starting at `(off, off)`.
///
/// Only the stored triangle (per `a`'s uplo tag) is read; the opposite
/// triangle is packed as zero. A unit-diagonal `a` packs ones without
/// reading its diagonal. Otherwise the diagonal is inverted when
/// `invert_diag` is set, and copied as-is when it is not.
///
/// # Panics
///
/// Panics if `mb > packmr` or the block does not fit in `a`.
pub fn pack_triangle<T: Scalar>(
    a: &Matrix<'_, T>,
    off: usize,
    mb: usize,
    packmr: usize,
    invert_diag: bool,
) -> PackedTriangle<T> {
    assert!(mb <= packmr, "pack_triangle: block {mb} exceeds packmr {packmr}");
    assert!(
        off + mb <= a.rows() && off + mb <= a.cols(),
        "pack_triangle: block {off}..{} outside {}x{}",
        off + mb,
        a.rows(),
        a.cols()
    );

    let uplo = a.uplo();
    let diag = match (a.diag(), invert_diag) {
        (Diag::Unit, _) => DiagStorage::Unit,
        (Diag::NonUnit, true) => DiagStorage::Reciprocal,
        (Diag::NonUnit, false) => DiagStorage::Original,
    };

    let mut data = vec![T::zero(); packmr * mb];
    for l in 0..mb {
        for i in 0..mb {
            let in_triangle = match uplo {
                Uplo::Upper => i < l,
                Uplo::Lower => i > l,
            };
            let value = if i == l {
                match diag {
                    DiagStorage::Unit => T::one(),
                    DiagStorage::Reciprocal => T::one() / a.get(off + i, off + l),
                    DiagStorage::Original => a.get(off + i, off + l),
                }
            } else if in_triangle {
                a.get(off + i, off + l)
            } else {
                continue;
            };
            data[i + l * packmr] = value;
        }
    }

    PackedTriangle {
        data,
        dim: mb,
        packmr,
        uplo,
        diag,
    }
}

/// Pack the `mb x kb` block of `a` at `(i0, l0)` by columns with leading
/// dimension `packmr`.
///
/// # Panics
///
/// Panics if `mb > packmr` or the block does not fit in `a`.
pub fn pack_rect<T: Scalar>(
    a: &Matrix<'_, T>,
    i0: usize,
    mb: usize,
    l0: usize,
    kb: usize,
    packmr: usize,
) -> Vec<T> {
    assert!(mb <= packmr, "pack_rect: block {mb} exceeds packmr {packmr}");
    assert!(i0 + mb <= a.rows() && l0 + kb <= a.cols());

    let mut data = vec![T::zero(); packmr * kb];
    for l in 0..kb {
        for i in 0..mb {
            data[i + l * packmr] = a.get(i0 + i, l0 + l);
        }
    }
    data
}

/// Pack columns `j0..j0 + nb` of `b`, scaled by `alpha`, by rows with
/// leading dimension `packnr`. Columns `nb..packnr` are zero.
///
/// # Panics
///
/// Panics if `nb > packnr` or the columns do not fit in `b`.
pub fn pack_panel<T: Scalar>(
    b: &Matrix<'_, T>,
    j0: usize,
    nb: usize,
    packnr: usize,
    alpha: T,
) -> PackedPanel<T> {
    assert!(nb <= packnr, "pack_panel: width {nb} exceeds packnr {packnr}");
    assert!(j0 + nb <= b.cols());

    let rows = b.rows();
    let mut data = vec![T::zero(); rows * packnr];
    for i in 0..rows {
        for j in 0..nb {
            data[i * packnr + j] = alpha * b.get(i, j0 + j);
        }
    }

    PackedPanel {
        data,
        rows,
        cols: nb,
        packnr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Struc;
    use num_complex::Complex64;

    #[test]
    fn triangle_packs_reciprocal_and_zeros_the_other_side() {
        let nan = f64::NAN;
        // 2x2 lower, NaN above the diagonal
        let data = [2.0, 3.0, nan, 4.0];
        let a = Matrix::col_major(&data, 2, 2)
            .unwrap()
            .with_struc(Struc::Triangular)
            .with_uplo(Uplo::Lower);
        let tri = pack_triangle(&a, 0, 2, 4, true);
        assert_eq!(tri.diag_storage(), DiagStorage::Reciprocal);
        assert_eq!(tri.get(0, 0), 0.5);
        assert_eq!(tri.get(1, 0), 3.0);
        assert_eq!(tri.get(0, 1), 0.0);
        assert_eq!(tri.get(1, 1), 0.25);
    }

    #[test]
    fn unit_diagonal_packs_ones() {
        let data = [f64::NAN, 0.0, 5.0, f64::NAN];
        let a = Matrix::col_major(&data, 2, 2)
            .unwrap()
            .with_struc(Struc::Triangular)
            .with_diag(Diag::Unit);
        let tri = pack_triangle(&a, 0, 2, 2, true);
        assert_eq!(tri.diag_storage(), DiagStorage::Unit);
        assert_eq!((tri.get(0, 0), tri.get(0, 1), tri.get(1, 1)), (1.0, 5.0, 1.0));
    }

    #[test]
    fn original_diagonal_is_kept_when_not_inverting() {
        let data = [Complex64::new(0.0, 2.0)];
        let a = Matrix::col_major(&data, 1, 1).unwrap();
        let tri = pack_triangle(&a, 0, 1, 2, false);
        assert_eq!(tri.diag_storage(), DiagStorage::Original);
        assert_eq!(tri.get(0, 0), Complex64::new(0.0, 2.0));
    }

    #[test]
    fn transposed_view_packs_logical_triangle() {
        // Stored upper [[1, 2], [., 4]]; transposed it is lower [[1, .], [2, 4]]
        let data = [1.0f64, f64::NAN, 2.0, 4.0];
        let a = Matrix::col_major(&data, 2, 2)
            .unwrap()
            .with_struc(Struc::Triangular)
            .with_uplo(Uplo::Upper)
            .transposed();
        let tri = pack_triangle(&a, 0, 2, 2, true);
        assert_eq!(tri.uplo(), Uplo::Lower);
        assert_eq!(tri.get(1, 0), 2.0);
    }

    #[test]
    fn panel_is_scaled_and_padded() {
        let data = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = Matrix::col_major(&data, 2, 3).unwrap();
        let p = pack_panel(&b, 1, 2, 4, 2.0);
        assert_eq!((p.rows(), p.cols(), p.packnr()), (2, 2, 4));
        assert_eq!(p.get(0, 0), 6.0);
        assert_eq!(p.get(1, 1), 12.0);
        assert_eq!(p.data[2], 0.0);
        assert_eq!(p.data[3], 0.0);
    }

    #[test]
    fn rect_is_column_stored() {
        let data: Vec<f64> = (0..9).map(|v| v as f64).collect();
        let a = Matrix::row_major(&data, 3, 3).unwrap();
        let r = pack_rect(&a, 0, 2, 1, 2, 4);
        assert_eq!(r.len(), 8);
        assert_eq!(&r[..2], &[1.0, 4.0]);
        assert_eq!(&r[4..6], &[2.0, 5.0]);
    }
}
