use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::gen::{JumpRng, SeedError};
use crate::jlkiss::{MATRIX, MATRIX_INV};
use crate::lcg;

// JLKISS64 carries the JLKISS streams plus a second multiply-with-carry
// pair whose low word fills the upper half of the 64-bit output, so a full
// 64-bit draw needs no second pass over the state. Period is
// 2^64 * (2^64 - 1) * (4294584393 * 2^31 - 1) * (698769069 * 2^31 - 1),
// around 2^251.

const LC_MULT: u64 = 1490024343005336237;
const LC_CONST: u64 = 123456789;
const LC_MULT_INV: u64 = 14241175500494512421;
const MWC1_MULT: u64 = 4294584393;
const MWC1_MOD: u64 = (MWC1_MULT << 32) - 1;
const MWC1_MULT_INV: u64 = 1 << 32;
const MWC2_MULT: u64 = 698769069;
const MWC2_MOD: u64 = (MWC2_MULT << 32) - 1;
const MWC2_MULT_INV: u64 = 1 << 32;
const N_SEEDS: usize = 4;

// The full period decomposes into a plain sum of powers of two.
const CYCLE_AHEAD: [u32; 107] = [
    251, 249, 246, 245, 243, 240, 238, 236, 235, 233, 231, 230, 228, 226, 224, 221, 219, 216, 215,
    214, 211, 209, 208, 207, 200, 199, 198, 196, 194, 191, 189, 183, 182, 178, 177, 174, 173, 168,
    167, 165, 163, 162, 161, 160, 159, 158, 156, 154, 153, 149, 148, 146, 142, 141, 140, 139, 138,
    137, 133, 131, 130, 126, 124, 122, 119, 118, 116, 110, 105, 104, 102, 101, 100, 99, 97, 95,
    94, 93, 92, 91, 90, 89, 88, 87, 86, 85, 84, 83, 82, 81, 80, 79, 78, 77, 76, 75, 74, 73, 72,
    71, 70, 69, 68, 67, 66, 65, 64,
];

/// JLKISS64 generator. 64-bit output, 320-bit state.
///
/// Seed words three and four pack the two multiply-with-carry pairs as
/// `x << 32 | carry`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Eq, PartialEq)]
pub struct Jlkiss64 {
    s1: u64,
    s2: u64,
    s3: u32,
    s4: u32,
    s5: u32,
    s6: u32,
}

impl core::fmt::Debug for Jlkiss64 {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Jlkiss64 {{}}")
    }
}

impl Jlkiss64 {
    /// Creates a JLKISS64 generator from the reference seeds.
    pub fn new() -> Self {
        Jlkiss64 {
            s1: 123456789123,
            s2: 987654321987,
            s3: 43219876,
            s4: 6543217,
            s5: 21987643,
            s6: 1732654,
        }
    }

    /// Creates a JLKISS64 generator from a seed vector; see [`JumpRng::set_state`].
    pub fn from_state(seed: &[u64]) -> Result<Self, SeedError> {
        let mut g = Self::new();
        g.set_state(seed)?;
        Ok(g)
    }

    #[wrappit]
    #[inline]
    fn step_front(&mut self) {
        self.s1 = LC_MULT * self.s1 + LC_CONST;

        self.s2 ^= self.s2 << 21;
        self.s2 ^= self.s2 >> 17;
        self.s2 ^= self.s2 << 30;

        let a = MWC1_MULT * self.s3 as u64 + self.s4 as u64;
        self.s4 = (a >> 32) as u32;
        self.s3 = a as u32;
    }

    #[inline]
    fn mwc1(&self) -> u64 {
        self.s3 as u64 | (self.s4 as u64) << 32
    }

    #[inline]
    fn mwc2(&self) -> u64 {
        self.s5 as u64 | (self.s6 as u64) << 32
    }
}

impl Default for Jlkiss64 {
    fn default() -> Self {
        Self::new()
    }
}

impl JumpRng for Jlkiss64 {
    type Word = u64;

    fn seed_len(&self) -> usize {
        N_SEEDS
    }

    fn set_state(&mut self, seed: &[u64]) -> Result<(), SeedError> {
        if seed.len() < N_SEEDS {
            return Err(SeedError::TooShort { need: N_SEEDS, got: seed.len() });
        }
        if seed[1] == 0 {
            return Err(SeedError::Zero { index: 1 });
        }
        self.s1 = seed[0];
        self.s2 = seed[1];
        self.s3 = (seed[2] >> 32) as u32;
        self.s4 = seed[2] as u32;
        self.s5 = (seed[3] >> 32) as u32;
        self.s6 = seed[3] as u32;
        Ok(())
    }

    fn state(&self) -> Vec<u64> {
        vec![
            self.s1,
            self.s2,
            (self.s3 as u64) << 32 | self.s4 as u64,
            (self.s5 as u64) << 32 | self.s6 as u64,
        ]
    }

    /// A 32-bit draw advances the congruential, shift-register and first
    /// multiply-with-carry streams only; jumps move all four, so jumps
    /// correspond to [`JumpRng::next64`] steps.
    fn next32(&mut self) -> u32 {
        self.step_front();
        self.s1.wrapping_add(self.s2).wrapping_add(self.s3 as u64) as u32
    }

    fn next64(&mut self) -> u64 {
        self.step_front();

        // multiplier and operands are below 2^32, the product cannot overflow
        let a = MWC2_MULT * self.s5 as u64 + self.s6 as u64;
        self.s6 = (a >> 32) as u32;
        self.s5 = a as u32;

        self.s1
            .wrapping_add(self.s2)
            .wrapping_add(self.s3 as u64)
            .wrapping_add((self.s5 as u64) << 32)
    }

    fn jump_ahead(&mut self, n: u64) {
        self.s1 = lcg::jump64(self.s1, LC_MULT, LC_CONST, n);
        self.s2 = MATRIX.pow(n).apply(self.s2);
        let a = lcg::mwc_jump(self.mwc1(), MWC1_MULT, MWC1_MOD, n);
        self.s4 = (a >> 32) as u32;
        self.s3 = a as u32;
        let a = lcg::mwc_jump(self.mwc2(), MWC2_MULT, MWC2_MOD, n);
        self.s6 = (a >> 32) as u32;
        self.s5 = a as u32;
    }

    fn jump_ahead_far(&mut self, e: u32, c: u64) {
        self.s1 = lcg::jump64_far(self.s1, LC_MULT, LC_CONST, e, c);
        self.s2 = MATRIX.pow_far(e, c).apply(self.s2);
        let a = lcg::mwc_jump_far(self.mwc1(), MWC1_MULT, MWC1_MOD, e, c);
        self.s4 = (a >> 32) as u32;
        self.s3 = a as u32;
        let a = lcg::mwc_jump_far(self.mwc2(), MWC2_MULT, MWC2_MOD, e, c);
        self.s6 = (a >> 32) as u32;
        self.s5 = a as u32;
    }

    fn jump_back(&mut self, n: u64) {
        self.s1 = lcg::jump64_back(self.s1, LC_MULT_INV, LC_CONST, n);
        self.s2 = MATRIX_INV.pow(n).apply(self.s2);
        let a = lcg::mwc_jump(self.mwc1(), MWC1_MULT_INV, MWC1_MOD, n);
        self.s4 = (a >> 32) as u32;
        self.s3 = a as u32;
        let a = lcg::mwc_jump(self.mwc2(), MWC2_MULT_INV, MWC2_MOD, n);
        self.s6 = (a >> 32) as u32;
        self.s5 = a as u32;
    }

    fn jump_back_far(&mut self, e: u32, c: u64) {
        self.s1 = lcg::jump64_back_far(self.s1, LC_MULT_INV, LC_CONST, e, c);
        self.s2 = MATRIX_INV.pow_far(e, c).apply(self.s2);
        let a = lcg::mwc_jump_far(self.mwc1(), MWC1_MULT_INV, MWC1_MOD, e, c);
        self.s4 = (a >> 32) as u32;
        self.s3 = a as u32;
        let a = lcg::mwc_jump_far(self.mwc2(), MWC2_MULT_INV, MWC2_MOD, e, c);
        self.s6 = (a >> 32) as u32;
        self.s5 = a as u32;
    }

    fn jump_cycle(&mut self) {
        for &e in CYCLE_AHEAD.iter() {
            self.jump_ahead_far(e, 0);
        }
    }
}

use rand_core::{Error, RngCore, SeedableRng};

impl RngCore for Jlkiss64 {
    fn next_u32(&mut self) -> u32 {
        self.next32()
    }

    fn next_u64(&mut self) -> u64 {
        self.next64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = dest.len();
        let mut i = 0;
        while i < bytes {
            let x = self.next64();
            let j = bytes.min(i + 8);
            // Always use Little-Endian.
            dest[i..j].copy_from_slice(&x.to_le_bytes()[0..(j - i)]);
            i = j;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        Ok(self.fill_bytes(dest))
    }
}

impl SeedableRng for Jlkiss64 {
    type Seed = [u8; 32];

    fn from_seed(seed: Self::Seed) -> Self {
        let word = |i: usize| {
            let mut b = [0u8; 8];
            b.copy_from_slice(&seed[i..i + 8]);
            u64::from_le_bytes(b)
        };
        let mut g = Self::new();
        g.s1 = word(0);
        if word(8) != 0 {
            g.s2 = word(8);
        }
        g.s3 = (word(16) >> 32) as u32;
        g.s4 = word(16) as u32;
        g.s5 = (word(24) >> 32) as u32;
        g.s6 = word(24) as u32;
        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_sequence() {
        let mut g = Jlkiss64::new();
        assert_eq!(g.next64(), 0x28735bff48be9fe8);
        assert_eq!(g.next64(), 0x5caf0a210aa17c81);
        assert_eq!(g.next64(), 0x9ecd728b7a2a0e9c);
    }

    #[test]
    fn jump_matches_stepping_64() {
        let mut stepped = Jlkiss64::new();
        let mut n: u64 = 0;
        for target in [0u64, 1, 2, 3, 5, 17, 64, 100, 1000, 4096, 65536] {
            while n < target {
                stepped.next64();
                n += 1;
            }
            let mut jumped = Jlkiss64::new();
            jumped.jump_ahead(target);
            assert!(jumped == stepped, "n = {}", target);
        }
    }

    #[test]
    fn jumps_round_trip() {
        let mut r: u64 = 9;
        let mut rnd = || -> u64 {
            r = r.wrapping_mul(6364136223846793005).wrapping_add(0xffff);
            r
        };
        for _ in 0..40 {
            let seed = [
                rnd(),
                rnd() | 1,
                (rnd() << 32) | rnd() % MWC1_MULT,
                (rnd() << 32) | rnd() % MWC2_MULT,
            ];
            let n = rnd() >> 20;
            let mut g = Jlkiss64::from_state(&seed).unwrap();
            let before = g.clone();
            g.jump_ahead(n);
            g.jump_back(n);
            assert!(g == before);

            let (e, c) = (1 + (rnd() % 60) as u32, rnd() % 100000);
            g.jump_ahead_far(e, c);
            g.jump_back_far(e, c);
            assert!(g == before);
        }
    }

    #[test]
    fn far_jumps_match_plain_jumps() {
        for (e, c) in [(1, 0u64), (13, 5), (33, 12345), (62, 999)] {
            let mut far = Jlkiss64::new();
            far.jump_ahead_far(e, c);
            let mut plain = Jlkiss64::new();
            plain.jump_ahead((1u64 << e) + c);
            assert!(far == plain, "e = {}, c = {}", e, c);
        }
    }

    #[test]
    fn full_cycle_preserves_the_sequence() {
        let mut reference = Jlkiss64::new();
        let mut cycled = reference.clone();
        cycled.jump_cycle();
        for _ in 0..1024 {
            assert_eq!(cycled.next64(), reference.next64());
        }
    }

    #[test]
    fn seed_round_trip() {
        let mut g = Jlkiss64::new();
        g.jump_ahead(12345);
        let snap = g.state();
        let h = Jlkiss64::from_state(&snap).unwrap();
        assert!(h == g);
    }
}
