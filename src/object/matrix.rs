//! Strided matrix descriptors.
//!
//! Transposition is applied on the descriptor itself: [`Matrix::transposed`]
//! swaps the dimensions and strides and flips the stored triangle, so every
//! consumer sees the logical operand through [`Matrix::get`].

use crate::error::{Error, Result};
use crate::types::{Conj, Datatype, Diag, Scalar, Struc, Trans, Uplo};

fn check_matrix_extent(
    len: usize,
    offset: usize,
    m: usize,
    n: usize,
    rs: usize,
    cs: usize,
) -> Result<()> {
    if m == 0 || n == 0 {
        return Ok(());
    }
    if m > 1 && rs == 0 {
        return Err(Error::ZeroStride { n: m });
    }
    if n > 1 && cs == 0 {
        return Err(Error::ZeroStride { n });
    }
    let last_row = (m - 1).checked_mul(rs).ok_or(Error::OffsetOverflow)?;
    let last_col = (n - 1).checked_mul(cs).ok_or(Error::OffsetOverflow)?;
    let required = offset
        .checked_add(last_row)
        .and_then(|v| v.checked_add(last_col))
        .and_then(|v| v.checked_add(1))
        .ok_or(Error::OffsetOverflow)?;
    if required > len {
        return Err(Error::OutOfBounds { required, len });
    }
    Ok(())
}

/// A writable matrix must address each element at most once: the larger
/// stride has to step over a whole run of the smaller one.
fn check_no_overlap(m: usize, n: usize, rs: usize, cs: usize) -> Result<()> {
    if m <= 1 || n <= 1 {
        return Ok(());
    }
    let (inner, inner_len, outer) = if rs <= cs { (rs, m, cs) } else { (cs, n, rs) };
    match inner.checked_mul(inner_len) {
        Some(span) if outer >= span => Ok(()),
        _ => Err(Error::OverlappingStrides { rows: m, cols: n, rs, cs }),
    }
}

/// Structural tags shared by both descriptor flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Tags {
    struc: Struc,
    uplo: Uplo,
    diag: Diag,
    conj: Conj,
}

impl Tags {
    fn is_stored(&self, i: usize, j: usize) -> bool {
        match self.struc {
            Struc::General => true,
            Struc::Symmetric | Struc::Triangular => match self.uplo {
                Uplo::Upper => i <= j,
                Uplo::Lower => i >= j,
            },
        }
    }
}

/// Read-only strided matrix.
#[derive(Debug, Clone, Copy)]
pub struct Matrix<'a, T> {
    data: &'a [T],
    offset: usize,
    m: usize,
    n: usize,
    rs: usize,
    cs: usize,
    tags: Tags,
}

impl<'a, T: Scalar> Matrix<'a, T> {
    /// Describe an `m x n` matrix whose `(i, j)` element lives at
    /// `data[offset + i * rs + j * cs]`.
    pub fn new(
        data: &'a [T],
        offset: usize,
        m: usize,
        n: usize,
        rs: usize,
        cs: usize,
    ) -> Result<Self> {
        check_matrix_extent(data.len(), offset, m, n, rs, cs)?;
        Ok(Matrix {
            data,
            offset,
            m,
            n,
            rs,
            cs,
            tags: Tags::default(),
        })
    }

    /// Column-major `m x n` matrix with leading dimension `m`.
    pub fn col_major(data: &'a [T], m: usize, n: usize) -> Result<Self> {
        Self::new(data, 0, m, n, 1, m.max(1))
    }

    /// Row-major `m x n` matrix with leading dimension `n`.
    pub fn row_major(data: &'a [T], m: usize, n: usize) -> Result<Self> {
        Self::new(data, 0, m, n, n.max(1), 1)
    }

    pub fn with_struc(mut self, struc: Struc) -> Self {
        self.tags.struc = struc;
        self
    }

    pub fn with_uplo(mut self, uplo: Uplo) -> Self {
        self.tags.uplo = uplo;
        self
    }

    pub fn with_diag(mut self, diag: Diag) -> Self {
        self.tags.diag = diag;
        self
    }

    /// The logical transpose; the stored triangle flips with it.
    pub fn transposed(mut self) -> Self {
        std::mem::swap(&mut self.m, &mut self.n);
        std::mem::swap(&mut self.rs, &mut self.cs);
        self.tags.uplo = self.tags.uplo.flipped();
        self
    }

    pub fn conjugated(mut self) -> Self {
        self.tags.conj = self.tags.conj.toggled();
        self
    }

    /// Apply a transpose/conjugate parameter.
    pub fn with_trans(self, trans: Trans) -> Self {
        let mut m = if trans.is_transposed() { self.transposed() } else { self };
        m.tags.conj = m.tags.conj.apply(trans.conj());
        m
    }

    pub fn datatype(&self) -> Datatype {
        T::DATATYPE
    }

    pub fn rows(&self) -> usize {
        self.m
    }

    pub fn cols(&self) -> usize {
        self.n
    }

    pub fn row_stride(&self) -> usize {
        self.rs
    }

    pub fn col_stride(&self) -> usize {
        self.cs
    }

    pub fn struc(&self) -> Struc {
        self.tags.struc
    }

    pub fn uplo(&self) -> Uplo {
        self.tags.uplo
    }

    pub fn diag(&self) -> Diag {
        self.tags.diag
    }

    pub fn conj(&self) -> Conj {
        self.tags.conj
    }

    pub fn is_empty(&self) -> bool {
        self.m == 0 || self.n == 0
    }

    pub fn ensure_square(&self) -> Result<()> {
        if self.m != self.n {
            return Err(Error::NonSquare {
                rows: self.m,
                cols: self.n,
            });
        }
        Ok(())
    }

    /// Whether `(i, j)` lies in the stored region given the structure and
    /// uplo tags. General matrices store everything.
    pub fn is_stored(&self, i: usize, j: usize) -> bool {
        self.tags.is_stored(i, j)
    }

    /// Logical element `(i, j)` with the conjugation tag applied.
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.m && j < self.n);
        self.data[self.offset + i * self.rs + j * self.cs].conj_if(self.tags.conj)
    }
}

/// Mutable strided matrix.
#[derive(Debug)]
pub struct MatrixMut<'a, T> {
    data: &'a mut [T],
    offset: usize,
    m: usize,
    n: usize,
    rs: usize,
    cs: usize,
    tags: Tags,
}

impl<'a, T: Scalar> MatrixMut<'a, T> {
    pub fn new(
        data: &'a mut [T],
        offset: usize,
        m: usize,
        n: usize,
        rs: usize,
        cs: usize,
    ) -> Result<Self> {
        check_matrix_extent(data.len(), offset, m, n, rs, cs)?;
        check_no_overlap(m, n, rs, cs)?;
        Ok(MatrixMut {
            data,
            offset,
            m,
            n,
            rs,
            cs,
            tags: Tags::default(),
        })
    }

    pub fn col_major(data: &'a mut [T], m: usize, n: usize) -> Result<Self> {
        Self::new(data, 0, m, n, 1, m.max(1))
    }

    pub fn row_major(data: &'a mut [T], m: usize, n: usize) -> Result<Self> {
        Self::new(data, 0, m, n, n.max(1), 1)
    }

    pub fn with_struc(mut self, struc: Struc) -> Self {
        self.tags.struc = struc;
        self
    }

    pub fn with_uplo(mut self, uplo: Uplo) -> Self {
        self.tags.uplo = uplo;
        self
    }

    pub fn transposed(mut self) -> Self {
        std::mem::swap(&mut self.m, &mut self.n);
        std::mem::swap(&mut self.rs, &mut self.cs);
        self.tags.uplo = self.tags.uplo.flipped();
        self
    }

    pub fn rows(&self) -> usize {
        self.m
    }

    pub fn cols(&self) -> usize {
        self.n
    }

    pub fn row_stride(&self) -> usize {
        self.rs
    }

    pub fn col_stride(&self) -> usize {
        self.cs
    }

    pub fn struc(&self) -> Struc {
        self.tags.struc
    }

    pub fn uplo(&self) -> Uplo {
        self.tags.uplo
    }

    pub fn is_empty(&self) -> bool {
        self.m == 0 || self.n == 0
    }

    pub fn is_stored(&self, i: usize, j: usize) -> bool {
        self.tags.is_stored(i, j)
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.m && j < self.n);
        self.data[self.offset + i * self.rs + j * self.cs]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        debug_assert!(i < self.m && j < self.n);
        self.data[self.offset + i * self.rs + j * self.cs] = value;
    }

    /// Reborrow as a read-only descriptor with the same tags.
    pub fn as_matrix(&self) -> Matrix<'_, T> {
        Matrix {
            data: &*self.data,
            offset: self.offset,
            m: self.m,
            n: self.n,
            rs: self.rs,
            cs: self.cs,
            tags: self.tags,
        }
    }

    /// Pointer to element `(i, j)` for handing to a micro-kernel.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is outside the matrix.
    pub(crate) fn ptr_at(&mut self, i: usize, j: usize) -> *mut T {
        assert!(i < self.m && j < self.n, "({i}, {j}) outside {}x{}", self.m, self.n);
        let idx = self.offset + i * self.rs + j * self.cs;
        self.data[idx..].as_mut_ptr()
    }
}
