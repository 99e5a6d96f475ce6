//! Cache-blocked triangular solve.
//!
//! The driver packs each `MR`-row diagonal block of `A` (reciprocal
//! diagonal) and the off-diagonal strip it depends on once, then sweeps `B`
//! in `NR`-column panels: pack the panel scaled by alpha, and for each row
//! block run a gemm update against the rows already solved followed by the
//! trsm micro-kernel.
//!
//! - `pack`: packed triangle / rectangle / panel layouts
//! - `trsm`: the blocked left-side driver

pub mod pack;
pub mod trsm;

pub use pack::{DiagStorage, PackedPanel, PackedTriangle, pack_panel, pack_rect, pack_triangle};
pub use trsm::{trsm_blocked, trsm_blocked_with};
