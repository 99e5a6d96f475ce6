//! Datatype-indexed function tables.
//!
//! Each operation instantiates its generic kernel once per datatype
//! combination and registers the instantiations in a fixed-size table indexed
//! by [`Datatype::ordinal`]. Tables are filled once when constructed and are
//! read-only afterwards, so a process-wide table can sit behind a `OnceLock`
//! and be shared by every thread.
//!
//! Combinations the [`DispatchConfig`] leaves out stay `None`. Looking one up
//! through [`Table2::resolve`] or [`Table3::resolve`] panics: invoking a
//! disabled combination is a caller defect.

pub mod config;

pub use config::{Coverage, DispatchConfig};

use crate::types::{Datatype, NUM_FP_TYPES};

/// Function table keyed by two datatypes.
#[derive(Debug, Clone)]
pub struct Table2<F> {
    name: &'static str,
    entries: [[Option<F>; NUM_FP_TYPES]; NUM_FP_TYPES],
}

impl<F: Copy> Table2<F> {
    pub fn empty(name: &'static str) -> Self {
        Table2 {
            name,
            entries: [[None; NUM_FP_TYPES]; NUM_FP_TYPES],
        }
    }

    pub fn register(&mut self, a: Datatype, b: Datatype, f: F) {
        self.entries[a.ordinal()][b.ordinal()] = Some(f);
    }

    pub fn get(&self, a: Datatype, b: Datatype) -> Option<F> {
        self.entries[a.ordinal()][b.ordinal()]
    }

    /// # Panics
    ///
    /// Panics if no routine is registered for `(a, b)`.
    pub fn resolve(&self, a: Datatype, b: Datatype) -> F {
        self.get(a, b).unwrap_or_else(|| {
            panic!(
                "{}: no kernel registered for datatypes ({:?}, {:?})",
                self.name, a, b
            )
        })
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Function table keyed by three datatypes.
#[derive(Debug, Clone)]
pub struct Table3<F> {
    name: &'static str,
    entries: [[[Option<F>; NUM_FP_TYPES]; NUM_FP_TYPES]; NUM_FP_TYPES],
}

impl<F: Copy> Table3<F> {
    pub fn empty(name: &'static str) -> Self {
        Table3 {
            name,
            entries: [[[None; NUM_FP_TYPES]; NUM_FP_TYPES]; NUM_FP_TYPES],
        }
    }

    pub fn register(&mut self, a: Datatype, b: Datatype, c: Datatype, f: F) {
        self.entries[a.ordinal()][b.ordinal()][c.ordinal()] = Some(f);
    }

    pub fn get(&self, a: Datatype, b: Datatype, c: Datatype) -> Option<F> {
        self.entries[a.ordinal()][b.ordinal()][c.ordinal()]
    }

    /// # Panics
    ///
    /// Panics if no routine is registered for `(a, b, c)`.
    pub fn resolve(&self, a: Datatype, b: Datatype, c: Datatype) -> F {
        self.get(a, b, c).unwrap_or_else(|| {
            panic!(
                "{}: no kernel registered for datatypes ({:?}, {:?}, {:?})",
                self.name, a, b, c
            )
        })
    }

    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .flatten()
            .flatten()
            .filter(|e| e.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Invoke `$m!(A, B)` for every ordered pair of the four element types.
macro_rules! for_each_type_pair {
    ($m:ident) => {
        $crate::dispatch::for_each_type_pair!(@a $m; [f32, num_complex::Complex32, f64, num_complex::Complex64]);
    };
    (@a $m:ident; [$($a:ty),*]) => {
        $( $crate::dispatch::for_each_type_pair!(@b $m; $a; [f32, num_complex::Complex32, f64, num_complex::Complex64]); )*
    };
    (@b $m:ident; $a:ty; [$($b:ty),*]) => {
        $( $m!($a, $b); )*
    };
}

/// Invoke `$m!(A, B, C)` for every ordered triple of the four element types.
macro_rules! for_each_type_triple {
    ($m:ident) => {
        $crate::dispatch::for_each_type_triple!(@a $m; [f32, num_complex::Complex32, f64, num_complex::Complex64]);
    };
    (@a $m:ident; [$($a:ty),*]) => {
        $( $crate::dispatch::for_each_type_triple!(@b $m; $a; [f32, num_complex::Complex32, f64, num_complex::Complex64]); )*
    };
    (@b $m:ident; $a:ty; [$($b:ty),*]) => {
        $( $crate::dispatch::for_each_type_triple!(@c $m; $a; $b; [f32, num_complex::Complex32, f64, num_complex::Complex64]); )*
    };
    (@c $m:ident; $a:ty; $b:ty; [$($c:ty),*]) => {
        $( $m!($a, $b, $c); )*
    };
}

pub(crate) use for_each_type_pair;
pub(crate) use for_each_type_triple;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_resolve() {
        let mut table: Table2<fn() -> u32> = Table2::empty("scratch");
        assert!(table.is_empty());
        table.register(Datatype::Double, Datatype::Float, || 7);
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve(Datatype::Double, Datatype::Float)(), 7);
        assert!(table.get(Datatype::Float, Datatype::Double).is_none());
    }

    #[test]
    #[should_panic(expected = "no kernel registered")]
    fn resolving_a_null_entry_panics() {
        let table: Table3<fn()> = Table3::empty("scratch");
        table.resolve(Datatype::Float, Datatype::Float, Datatype::DComplex);
    }

    #[test]
    fn pair_and_triple_enumeration() {
        let mut pairs = 0;
        let mut triples = 0;
        macro_rules! count_pair {
            ($a:ty, $b:ty) => {
                pairs += 1;
            };
        }
        macro_rules! count_triple {
            ($a:ty, $b:ty, $c:ty) => {
                triples += 1;
            };
        }
        for_each_type_pair!(count_pair);
        for_each_type_triple!(count_triple);
        assert_eq!(pairs, NUM_FP_TYPES * NUM_FP_TYPES);
        assert_eq!(triples, NUM_FP_TYPES * NUM_FP_TYPES * NUM_FP_TYPES);
    }
}
