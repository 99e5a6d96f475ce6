//! Micro-kernels for the inner loop of the blocked triangular solve.
//!
//! The trsm kernels solve one `MR x NR` tile against a packed triangular
//! block whose diagonal already holds reciprocals, and write every solved
//! element twice: into the packed `B` panel (read by later gemm updates) and
//! into the caller's `C` tile.
//!
//! Available kernels:
//! - `trsm_u_ref` / `trsm_l_ref`: any datatype, any tile size
//! - `dtrsm_u_opt` / `dtrsm_l_opt`: f64, full tiles of a fixed shape
//! - `gemm_ref`: `C := beta * C + alpha * A * B` on packed panels

pub mod gemm;
pub mod trsm_l;
pub mod trsm_u;

use num_complex::{Complex32, Complex64};

use crate::blocked::pack::{PackedPanel, PackedTriangle};
use crate::object::MatrixMut;
use crate::types::{Diag, Scalar, Uplo};

pub use gemm::gemm_ref;
pub use trsm_l::{dtrsm_l_opt, trsm_l_ref};
pub use trsm_u::{dtrsm_u_opt, trsm_u_ref};

/// `(m, n, diag, a, cs_a, b, rs_b, c, rs_c, cs_c)`
pub type TrsmUkr<T> =
    unsafe fn(usize, usize, Diag, *const T, usize, *mut T, usize, *mut T, isize, isize);

/// `(m, n, k, alpha, a, cs_a, b, rs_b, beta, c, rs_c, cs_c)`
pub type GemmUkr<T> =
    unsafe fn(usize, usize, usize, T, *const T, usize, *const T, usize, T, *mut T, isize, isize);

/// Register blocking and micro-kernel selection per datatype.
pub trait NativeKernels: Scalar {
    /// Rows per micro-tile; also the leading dimension of packed `A`.
    const MR: usize;
    /// Columns per micro-tile; also the leading dimension of packed `B`.
    const NR: usize;

    fn trsm_u_ukr() -> TrsmUkr<Self> {
        trsm_u_ref::<Self>
    }

    fn trsm_l_ukr() -> TrsmUkr<Self> {
        trsm_l_ref::<Self>
    }

    fn gemm_ukr() -> GemmUkr<Self> {
        gemm_ref::<Self>
    }
}

impl NativeKernels for f32 {
    const MR: usize = 8;
    const NR: usize = 4;
}

impl NativeKernels for f64 {
    const MR: usize = 4;
    const NR: usize = 4;

    fn trsm_u_ukr() -> TrsmUkr<Self> {
        dtrsm_u_opt::<4, 4>
    }

    fn trsm_l_ukr() -> TrsmUkr<Self> {
        dtrsm_l_opt::<4, 4>
    }
}

impl NativeKernels for Complex32 {
    const MR: usize = 4;
    const NR: usize = 4;
}

impl NativeKernels for Complex64 {
    const MR: usize = 4;
    const NR: usize = 2;
}

/// Micro-tile shape used by the blocked driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSizes {
    pub mr: usize,
    pub nr: usize,
}

impl BlockSizes {
    pub fn native<T: NativeKernels>() -> Self {
        BlockSizes {
            mr: T::MR,
            nr: T::NR,
        }
    }
}

/// Solve one packed tile: `C := inv(A) * B`, also overwriting `B` with the
/// solution.
///
/// `a` must have been packed with its diagonal inverted (or marked unit);
/// the micro-kernels multiply by the stored diagonal, so a triangle packed
/// with its original diagonal is rejected.
///
/// # Panics
///
/// Panics if the shapes disagree or `a` still stores its original diagonal.
pub fn trsm_block<T: NativeKernels>(
    a: &PackedTriangle<T>,
    b: &mut PackedPanel<T>,
    c: &mut MatrixMut<'_, T>,
) {
    let m = a.dim();
    let n = c.cols();
    assert_eq!(b.rows(), m, "trsm_block: B has {} rows, A is {m}x{m}", b.rows());
    assert_eq!(c.rows(), m, "trsm_block: C has {} rows, A is {m}x{m}", c.rows());
    assert_eq!(b.cols(), n, "trsm_block: B has {} cols, C has {n}", b.cols());
    let diag = a.solve_diag();

    if m == 0 || n == 0 {
        return;
    }

    let ukr = match a.uplo() {
        Uplo::Upper => T::trsm_u_ukr(),
        Uplo::Lower => T::trsm_l_ukr(),
    };
    let (rs_c, cs_c) = (c.row_stride() as isize, c.col_stride() as isize);

    // SAFETY: the packed triangle holds `dim` columns at leading dimension
    // `packmr`, the panel holds `rows` rows at leading dimension `packnr`,
    // and `c` was validated to address an m x n tile from (0, 0).
    unsafe {
        ukr(
            m,
            n,
            diag,
            a.as_ptr(),
            a.packmr(),
            b.as_mut_ptr(),
            b.packnr(),
            c.ptr_at(0, 0),
            rs_c,
            cs_c,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocked::pack::{DiagStorage, pack_panel, pack_triangle};
    use crate::object::Matrix;
    use crate::types::Struc;

    #[test]
    fn one_by_one_solve() {
        let a_data = [2.0f64];
        let a = Matrix::col_major(&a_data, 1, 1).unwrap().with_struc(Struc::Triangular);
        let tri = pack_triangle(&a, 0, 1, 4, true);
        assert_eq!(tri.diag_storage(), DiagStorage::Reciprocal);
        assert_eq!(tri.get(0, 0), 0.5);

        let b_data = [4.0f64];
        let mut panel = pack_panel(&Matrix::col_major(&b_data, 1, 1).unwrap(), 0, 1, 4, 1.0);

        let mut c_data = [0.0f64];
        let mut c = MatrixMut::col_major(&mut c_data, 1, 1).unwrap();
        trsm_block(&tri, &mut panel, &mut c);
        assert_eq!(c_data, [2.0]);
        assert_eq!(panel.get(0, 0), 2.0);
    }

    #[test]
    fn unstored_triangle_is_never_read() {
        // 3x3 upper with NaN below the diagonal
        let nan = f64::NAN;
        #[rustfmt::skip]
        let a_data = [
            2.0, nan, nan,
            1.0, 4.0, nan,
            -1.0, 2.0, 8.0,
        ];
        let a = Matrix::col_major(&a_data, 3, 3)
            .unwrap()
            .with_struc(Struc::Triangular)
            .with_uplo(Uplo::Upper);
        let tri = pack_triangle(&a, 0, 3, 4, true);

        let b_data = [1.0f64, 2.0, 8.0, 3.0, 0.0, 16.0];
        let b = Matrix::col_major(&b_data, 3, 2).unwrap();
        let mut panel = pack_panel(&b, 0, 2, 4, 1.0);

        let mut c_data = [0.0f64; 6];
        let mut c = MatrixMut::col_major(&mut c_data, 3, 2).unwrap();
        trsm_block(&tri, &mut panel, &mut c);

        assert!(c_data.iter().all(|v| v.is_finite()));
        // A * X reproduces B
        for j in 0..2 {
            for i in 0..3 {
                let mut acc = 0.0;
                for l in i..3 {
                    acc += a_data[i + l * 3] * c_data[l + j * 3];
                }
                assert!((acc - b_data[i + j * 3]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn packed_panel_and_c_agree() {
        let a_data = [4.0f32, 1.0, 0.0, 2.0];
        let a = Matrix::col_major(&a_data, 2, 2)
            .unwrap()
            .with_struc(Struc::Triangular)
            .with_uplo(Uplo::Lower);
        let tri = pack_triangle(&a, 0, 2, 8, true);
        let b_data = [8.0f32, 6.0, 4.0, 3.0];
        let mut panel = pack_panel(&Matrix::col_major(&b_data, 2, 2).unwrap(), 0, 2, 4, 1.0);

        let mut c_data = [0.0f32; 4];
        let mut c = MatrixMut::col_major(&mut c_data, 2, 2).unwrap();
        trsm_block(&tri, &mut panel, &mut c);
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(panel.get(i, j), c_data[i + 2 * j]);
            }
        }
    }

    #[test]
    fn empty_tile_leaves_c_alone() {
        let a_data = [2.0f64, 0.0, 1.0, 4.0];
        let a = Matrix::col_major(&a_data, 2, 2).unwrap().with_struc(Struc::Triangular);
        let b_data = [5.0f64; 6];
        let mut c_data = [-7.0f64; 6];

        // 2 x 0
        let tri = pack_triangle(&a, 0, 2, 4, true);
        let mut panel = pack_panel(&Matrix::col_major(&b_data, 2, 3).unwrap(), 0, 0, 4, 1.0);
        trsm_block(&tri, &mut panel, &mut MatrixMut::new(&mut c_data, 0, 2, 0, 1, 2).unwrap());
        assert_eq!(c_data, [-7.0; 6]);

        // 0 x 3
        let tri = pack_triangle(&a, 0, 0, 4, true);
        let mut panel = pack_panel(&Matrix::new(&b_data, 0, 0, 3, 1, 2).unwrap(), 0, 3, 4, 1.0);
        trsm_block(&tri, &mut panel, &mut MatrixMut::new(&mut c_data, 0, 0, 3, 1, 2).unwrap());
        assert_eq!(c_data, [-7.0; 6]);
    }

    #[test]
    #[should_panic(expected = "original diagonal")]
    fn rejects_uninverted_diagonal() {
        let a_data = [2.0f64];
        let a = Matrix::col_major(&a_data, 1, 1).unwrap().with_struc(Struc::Triangular);
        let tri = pack_triangle(&a, 0, 1, 4, false);
        let b_data = [4.0f64];
        let mut panel = pack_panel(&Matrix::col_major(&b_data, 1, 1).unwrap(), 0, 1, 4, 1.0);
        let mut c_data = [0.0f64];
        let mut c = MatrixMut::col_major(&mut c_data, 1, 1).unwrap();
        trsm_block(&tri, &mut panel, &mut c);
    }

    #[test]
    fn native_block_sizes() {
        assert_eq!(BlockSizes::native::<f64>(), BlockSizes { mr: 4, nr: 4 });
        assert_eq!(BlockSizes::native::<f32>().mr, 8);
    }
}
