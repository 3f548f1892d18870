use thiserror::Error;

use crate::arith::{TWO32_INV, TWO53_INV};

/// Seed vector rejected by [`JumpRng::set_state`]. The generator state is
/// left untouched when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeedError {
    /// The seed vector has fewer words than the generator's state.
    #[error("seed vector has {got} words, {need} required")]
    TooShort { need: usize, got: usize },
    /// A shift-register word is zero and the sub-stream would never leave it.
    #[error("seed word {index} must be nonzero")]
    Zero { index: usize },
}

/// A generator whose sequence can be entered at any offset: forward and
/// backward jumps of arbitrary distance run in O(log n), and a full-cycle
/// jump lands exactly where it started.
///
/// `Word` is the seed word width (u32 or u64); it also decides which of
/// `next32`/`next64` one jump step corresponds to. Jumping by n and then
/// drawing is bit-identical to drawing n extra times, and
/// `jump_ahead(n)` followed by `jump_back(n)` restores the state.
///
/// Distances past `u64::MAX` are expressed as n = 2^e + c via the `_far`
/// variants.
pub trait JumpRng {
    type Word: Copy;

    /// Number of seed words carried by [`JumpRng::state`]/[`JumpRng::set_state`].
    fn seed_len(&self) -> usize;

    /// Install a state snapshot. Seeds that would degenerate a tausworthe
    /// component are lifted to the nearest valid value; see each generator.
    fn set_state(&mut self, seed: &[Self::Word]) -> Result<(), SeedError>;

    /// Snapshot of the state; feeding it back through
    /// [`JumpRng::set_state`] recreates the generator exactly.
    fn state(&self) -> Vec<Self::Word>;

    fn next32(&mut self) -> u32;

    fn next64(&mut self) -> u64;

    /// Uniform f64 in [0, 1) with 32 significant bits: `next32() * 2^-32`.
    fn u01_32(&mut self) -> f64 {
        self.next32() as f64 * TWO32_INV
    }

    /// Uniform f64 in [0, 1) from the top 53 bits of `next64`. The low 11
    /// bits are dropped so the scaled value can never round up to 1.0.
    fn u01_64(&mut self) -> f64 {
        (self.next64() >> 11) as f64 * TWO53_INV
    }

    /// Advance by n steps in O(log n).
    fn jump_ahead(&mut self, n: u64);

    /// Advance by 2^e + c steps. For e = 0 the matrix sub-streams advance by
    /// c and the scalar sub-streams by 1 + c; pass plain `jump_ahead(n)` for
    /// distances that fit in a u64.
    fn jump_ahead_far(&mut self, e: u32, c: u64);

    /// Step back by n in O(log n).
    fn jump_back(&mut self, n: u64);

    /// Step back by 2^e + c.
    fn jump_back_far(&mut self, e: u32, c: u64);

    /// Advance by the full period. The observable sequence is unchanged;
    /// this exists to exercise the jump algebra end to end.
    fn jump_cycle(&mut self);
}
