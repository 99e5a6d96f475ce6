//! Datatype-tagged vector descriptors.
//!
//! A descriptor aliases a caller-owned buffer for its lifetime `'a` and
//! remembers only its element type as a [`Datatype`] tag; the typed pointer is
//! recovered by whichever kernel the dispatch table selects for that tag.

use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{Error, Result};
use crate::types::{Conj, Datatype, Scalar};

/// Check that `n` elements at stride `inc` fit in a buffer of `len` elements.
pub(crate) fn check_vector_extent(len: usize, n: usize, inc: usize) -> Result<()> {
    if n == 0 {
        return Ok(());
    }
    if n > 1 && inc == 0 {
        return Err(Error::ZeroStride { n });
    }
    let required = (n - 1)
        .checked_mul(inc)
        .and_then(|last| last.checked_add(1))
        .ok_or(Error::OffsetOverflow)?;
    if required > len {
        return Err(Error::OutOfBounds { required, len });
    }
    Ok(())
}

/// Number of buffer elements from the first addressed element through the last.
fn span(n: usize, inc: usize) -> usize {
    if n == 0 { 0 } else { (n - 1) * inc + 1 }
}

fn ensure_datatype<T: Scalar>(found: Datatype) -> Result<()> {
    if T::DATATYPE != found {
        return Err(Error::DatatypeMismatch {
            expected: T::DATATYPE,
            found,
        });
    }
    Ok(())
}

/// Read-only vector descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Vector<'a> {
    dt: Datatype,
    n: usize,
    inc: usize,
    conj: Conj,
    ptr: NonNull<u8>,
    _marker: PhantomData<&'a [u8]>,
}

impl<'a> Vector<'a> {
    /// Describe `n` elements of `buf` spaced `inc` apart.
    pub fn new<T: Scalar>(buf: &'a [T], n: usize, inc: usize) -> Result<Self> {
        check_vector_extent(buf.len(), n, inc)?;
        Ok(Vector {
            dt: T::DATATYPE,
            n,
            inc,
            conj: Conj::NoConj,
            ptr: NonNull::from(buf).cast(),
            _marker: PhantomData,
        })
    }

    /// Describe the whole slice with unit stride.
    pub fn contiguous<T: Scalar>(buf: &'a [T]) -> Self {
        Vector {
            dt: T::DATATYPE,
            n: buf.len(),
            inc: 1,
            conj: Conj::NoConj,
            ptr: NonNull::from(buf).cast(),
            _marker: PhantomData,
        }
    }

    /// The same vector with its conjugation tag toggled.
    pub fn conjugated(mut self) -> Self {
        self.conj = self.conj.toggled();
        self
    }

    pub fn datatype(&self) -> Datatype {
        self.dt
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn inc(&self) -> usize {
        self.inc
    }

    pub fn conj(&self) -> Conj {
        self.conj
    }

    /// True when both descriptors address the same elements.
    pub fn aliases(&self, other: &Vector<'_>) -> bool {
        self.dt == other.dt && self.n == other.n && self.inc == other.inc && self.ptr == other.ptr
    }

    /// The addressed span of the buffer, seen as `T` again. Element `i` is at
    /// index `i * inc`.
    ///
    /// # Errors
    ///
    /// [`Error::DatatypeMismatch`] if `T` is not the descriptor's element type.
    pub fn as_typed<T: Scalar>(&self) -> Result<&'a [T]> {
        ensure_datatype::<T>(self.dt)?;
        // SAFETY: the descriptor was built from a `&'a [T]` (each datatype tag
        // belongs to exactly one Scalar type) whose length covers the span.
        Ok(unsafe { std::slice::from_raw_parts(self.ptr.as_ptr() as *const T, span(self.n, self.inc)) })
    }

    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }
}

/// Mutable vector descriptor.
#[derive(Debug)]
pub struct VectorMut<'a> {
    dt: Datatype,
    n: usize,
    inc: usize,
    ptr: NonNull<u8>,
    _marker: PhantomData<&'a mut [u8]>,
}

impl<'a> VectorMut<'a> {
    /// Describe `n` elements of `buf` spaced `inc` apart.
    pub fn new<T: Scalar>(buf: &'a mut [T], n: usize, inc: usize) -> Result<Self> {
        check_vector_extent(buf.len(), n, inc)?;
        Ok(VectorMut {
            dt: T::DATATYPE,
            n,
            inc,
            ptr: NonNull::from(buf).cast(),
            _marker: PhantomData,
        })
    }

    /// Describe the whole slice with unit stride.
    pub fn contiguous<T: Scalar>(buf: &'a mut [T]) -> Self {
        let n = buf.len();
        VectorMut {
            dt: T::DATATYPE,
            n,
            inc: 1,
            ptr: NonNull::from(buf).cast(),
            _marker: PhantomData,
        }
    }

    pub fn datatype(&self) -> Datatype {
        self.dt
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn inc(&self) -> usize {
        self.inc
    }

    /// Reborrow as a read-only descriptor.
    pub fn as_vector(&self) -> Vector<'_> {
        Vector {
            dt: self.dt,
            n: self.n,
            inc: self.inc,
            conj: Conj::NoConj,
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    /// Mutable counterpart of [`Vector::as_typed`].
    ///
    /// # Errors
    ///
    /// [`Error::DatatypeMismatch`] if `T` is not the descriptor's element type.
    pub fn as_typed_mut<T: Scalar>(&mut self) -> Result<&mut [T]> {
        ensure_datatype::<T>(self.dt)?;
        // SAFETY: as in `Vector::as_typed`; the exclusive borrow of `self`
        // stands in for the `&'a mut [T]` the descriptor was built from.
        Ok(unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr() as *mut T, span(self.n, self.inc)) })
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn extent_validation() {
        let buf = [0.0f64; 7];
        assert!(Vector::new(&buf, 4, 2).is_ok());
        assert!(matches!(
            Vector::new(&buf, 5, 2),
            Err(Error::OutOfBounds { required: 9, len: 7 })
        ));
        assert!(matches!(Vector::new(&buf, 3, 0), Err(Error::ZeroStride { n: 3 })));
        assert!(Vector::new(&buf, 1, 0).is_ok());
        assert!(Vector::new(&buf[..0], 0, 5).is_ok());
        assert!(matches!(
            Vector::new(&buf, 3, usize::MAX),
            Err(Error::OffsetOverflow)
        ));
    }

    #[test]
    fn typed_view_checks_the_datatype() {
        let mut buf = [1.0f32, 2.0, 3.0, 4.0, 5.0];
        let mut x = VectorMut::new(&mut buf, 3, 2).unwrap();
        assert!(matches!(
            x.as_typed_mut::<f64>(),
            Err(Error::DatatypeMismatch { expected: Datatype::Double, found: Datatype::Float })
        ));
        x.as_typed_mut::<f32>().unwrap()[4] = 9.0;
        let v = x.as_vector();
        assert_eq!(v.as_typed::<f32>().unwrap(), &[1.0, 2.0, 3.0, 4.0, 9.0]);
        assert!(v.as_typed::<num_complex::Complex32>().is_err());
        assert!(Vector::new(&buf[..0], 0, 3).unwrap().as_typed::<f32>().unwrap().is_empty());
    }

    #[test]
    fn descriptors_carry_datatype_and_conj() {
        let mut buf = [Complex64::new(1.0, 1.0); 3];
        let x = VectorMut::contiguous(&mut buf);
        assert_eq!(x.datatype(), Datatype::DComplex);
        assert_eq!(x.len(), 3);

        let v = x.as_vector().conjugated();
        assert_eq!(v.conj(), Conj::Conj);
        assert!(v.aliases(&x.as_vector()));
    }
}
