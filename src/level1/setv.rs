//! Fill a strided vector with a scalar: `x := beta`.
//!
//! The scalar and the vector may have independent datatypes. A `beta` that
//! compares equal to zero (including `-0.0`) takes the zero-fill path, which
//! stores the canonical `+0` of the vector's type instead of copying `beta`.

use std::sync::OnceLock;

use crate::dispatch::{DispatchConfig, Table2, for_each_type_pair};
use crate::object::vector::check_vector_extent;
use crate::object::{ScalarArg, VectorMut};
use crate::types::{Mixes, Scalar};

/// Type-erased setv kernel: `(n, beta, x, incx)`.
pub type SetvFn = unsafe fn(usize, *const u8, *mut u8, usize);

/// Unblocked setv kernel.
///
/// # Safety
///
/// `x.add(i * incx)` must be valid for writes for every `i` in `0..n`.
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn setv_unb_var1<B: Scalar, X: Scalar>(n: usize, beta: &B, x: *mut X, incx: usize) {
    if n == 0 {
        return;
    }

    if beta.is_zero() {
        for i in 0..n {
            *x.add(i * incx) = X::zero();
        }
    } else {
        let beta_cast: X = beta.cast();
        for i in 0..n {
            *x.add(i * incx) = beta_cast;
        }
    }
}

#[allow(unsafe_op_in_unsafe_fn)]
unsafe fn setv_erased<B: Scalar, X: Scalar>(n: usize, beta: *const u8, x: *mut u8, incx: usize) {
    setv_unb_var1::<B, X>(n, &*(beta as *const B), x as *mut X, incx);
}

/// Build a setv table registering every combination `config` covers.
pub fn build_table(config: DispatchConfig) -> Table2<SetvFn> {
    let mut table = Table2::empty("setv");

    macro_rules! register {
        ($b:ty, $x:ty) => {
            let key = [<$b as Scalar>::DATATYPE, <$x as Scalar>::DATATYPE];
            if config.covers(&key) {
                table.register(key[0], key[1], setv_erased::<$b, $x> as SetvFn);
            }
        };
    }
    for_each_type_pair!(register);

    log::debug!("setv table: tier={:?}, {} entries", config.tier(), table.len());
    table
}

/// Process-wide setv table built from the compiled features.
pub fn table() -> &'static Table2<SetvFn> {
    static TABLE: OnceLock<Table2<SetvFn>> = OnceLock::new();
    TABLE.get_or_init(|| build_table(DispatchConfig::from_features()))
}

/// `x := beta` through the process-wide table.
///
/// # Panics
///
/// Panics if the (beta, x) datatype combination is not registered.
pub fn setv(beta: &ScalarArg, x: &mut VectorMut<'_>) {
    setv_with(table(), beta, x);
}

/// `x := beta` through an explicit table.
///
/// # Panics
///
/// Panics if the (beta, x) datatype combination is not registered in `table`.
pub fn setv_with(table: &Table2<SetvFn>, beta: &ScalarArg, x: &mut VectorMut<'_>) {
    let dt_x = x.datatype();
    let beta = beta.resolve(dt_x);
    let f = table.resolve(beta.datatype(), dt_x);

    // SAFETY: the descriptor was validated to address n elements at stride inc,
    // and `f` was registered for exactly these two datatypes.
    unsafe { f(x.len(), beta.as_ptr(), x.as_mut_ptr(), x.inc()) }
}

/// Typed `x := beta` over `n` elements of `x` spaced `incx` apart.
///
/// # Panics
///
/// Panics if `x` is too short for `n` elements at stride `incx`.
pub fn setv_typed<B: Mixes<X>, X: Scalar>(n: usize, beta: B, x: &mut [X], incx: usize) {
    if let Err(e) = check_vector_extent(x.len(), n, incx) {
        panic!("setv: {e}");
    }
    // SAFETY: extent checked above.
    unsafe { setv_unb_var1(n, &beta, x.as_mut_ptr(), incx) }
}
