//! Combined pseudo-random number generators whose sequences can be entered
//! at any offset: every generator supports forward and backward jumps of
//! arbitrary distance in O(log n), plus an exact full-cycle jump.
//!
//! The KISS family (kiss, jkiss, jlkiss, jlkiss64) sums congruential,
//! shift-register and multiply-with-carry sub-streams; the LFSR family
//! (lfsr88, lfsr113, lfsr258) XOR-combines maximal-length Tausworthe
//! components. All of them implement [`JumpRng`] and `rand_core::RngCore`.

pub mod arith;
pub mod bitmatrix;
pub mod gen;
pub mod jkiss;
pub mod jlkiss;
pub mod jlkiss64;
pub mod kiss;
pub mod lcg;
pub mod lfsr113;
pub mod lfsr258;
pub mod lfsr88;
pub mod uniform;

pub use gen::{JumpRng, SeedError};
pub use jkiss::Jkiss;
pub use jlkiss::Jlkiss;
pub use jlkiss64::Jlkiss64;
pub use kiss::Kiss;
pub use lfsr113::Lfsr113;
pub use lfsr258::Lfsr258;
pub use lfsr88::Lfsr88;
pub use uniform::Uniform;

pub use rand_core::*;
