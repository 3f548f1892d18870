use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bitmatrix::BitMatrix32;
use crate::gen::{JumpRng, SeedError};
use crate::lcg;

// David Jones' JKISS: the KISS layout with constants picked so the
// multiply-with-carry stream has a longer period. Combined period is
// 2^32 * (2^32 - 1) * (4294584393 * 2^31 - 1), just under 2^127.

const LC_MULT: u32 = 314527869;
const LC_CONST: u32 = 1234567;
const LC_MULT_INV: u32 = 1644210389;
const MWC_MULT: u64 = 4294584393;
const MWC_MOD: u64 = (MWC_MULT << 32) - 1;
const MWC_MULT_INV: u64 = 1 << 32;
const N_SEEDS: usize = 4;

const MATRIX: BitMatrix32 = BitMatrix32::new([
    0x08400021, 0x10800042, 0x21400085, 0x4280010a, 0x85000214, 0x0a000428, 0x14000850, 0x284010a1,
    0x50802142, 0xa1004284, 0x42008508, 0x84010a10, 0x08021420, 0x10042840, 0x20085080, 0x4010a100,
    0x80214200, 0x00428400, 0x00850800, 0x010a1000, 0x02142000, 0x04284000, 0x08508000, 0x10a10000,
    0x21420000, 0x42840000, 0x85080000, 0x08100000, 0x10200000, 0x20400000, 0x40800000, 0x81000000,
]);
const MATRIX_INV: BitMatrix32 = BitMatrix32::new([
    0x9ce52d63, 0x39ca5ac6, 0x7394b58c, 0xe7296b18, 0xce52d630, 0x9ca5ac60, 0x7b5bdce1, 0xb4a73de3,
    0x694e7bc6, 0xd29cf78c, 0x5294a508, 0xa5294a10, 0x4a529420, 0x94a52840, 0x6b5ad4a1, 0xd6b5a942,
    0xad6b5284, 0x5ad6a508, 0xb5ad4a10, 0x6b5a9420, 0xd6b52840, 0xef7ad4a1, 0xdef5a942, 0xbdeb5284,
    0x7bd6a508, 0xf7ad4a10, 0xef5a9420, 0xdeb52840, 0xff7ad4a1, 0xfef5a942, 0xfdeb5284, 0xfbd6a508,
]);

const CYCLE_AHEAD: [u32; 8] = [127, 112, 108, 106, 101, 98, 82, 32];
const CYCLE_BACK: [u32; 8] = [114, 80, 76, 74, 69, 66, 64, 63];

/// JKISS generator. 32-bit output, 128-bit state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Eq, PartialEq)]
pub struct Jkiss {
    s1: u32,
    s2: u32,
    s3: u32,
    s4: u32,
}

impl core::fmt::Debug for Jkiss {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Jkiss {{}}")
    }
}

impl Jkiss {
    /// Creates a JKISS generator from the reference seeds.
    pub fn new() -> Self {
        Jkiss { s1: 123456789, s2: 987654321, s3: 43219876, s4: 6543217 }
    }

    /// Creates a JKISS generator from a seed vector; see [`JumpRng::set_state`].
    pub fn from_state(seed: &[u32]) -> Result<Self, SeedError> {
        let mut g = Self::new();
        g.set_state(seed)?;
        Ok(g)
    }

    #[wrappit]
    #[inline]
    fn step(&mut self) -> u32 {
        self.s1 = LC_MULT * self.s1 + LC_CONST;

        self.s2 ^= self.s2 << 5;
        self.s2 ^= self.s2 >> 7;
        self.s2 ^= self.s2 << 22;

        let a = MWC_MULT * self.s3 as u64 + self.s4 as u64;
        self.s4 = (a >> 32) as u32;
        self.s3 = a as u32;

        self.s1 + self.s2 + self.s3
    }

    #[inline]
    fn mwc(&self) -> u64 {
        self.s3 as u64 | (self.s4 as u64) << 32
    }

    #[inline]
    fn set_mwc(&mut self, a: u64) {
        self.s4 = (a >> 32) as u32;
        self.s3 = a as u32;
    }
}

impl Default for Jkiss {
    fn default() -> Self {
        Self::new()
    }
}

impl JumpRng for Jkiss {
    type Word = u32;

    fn seed_len(&self) -> usize {
        N_SEEDS
    }

    fn set_state(&mut self, seed: &[u32]) -> Result<(), SeedError> {
        if seed.len() < N_SEEDS {
            return Err(SeedError::TooShort { need: N_SEEDS, got: seed.len() });
        }
        if seed[1] == 0 {
            return Err(SeedError::Zero { index: 1 });
        }
        self.s1 = seed[0];
        self.s2 = seed[1];
        self.s3 = seed[2];
        self.s4 = seed[3];
        Ok(())
    }

    fn state(&self) -> Vec<u32> {
        vec![self.s1, self.s2, self.s3, self.s4]
    }

    fn next32(&mut self) -> u32 {
        self.step()
    }

    fn next64(&mut self) -> u64 {
        let low = self.step() as u64;
        let high = self.step() as u64;
        low | high << 32
    }

    fn jump_ahead(&mut self, n: u64) {
        self.s1 = lcg::jump32(self.s1, LC_MULT, LC_CONST, n);
        self.s2 = MATRIX.pow(n).apply(self.s2);
        self.set_mwc(lcg::mwc_jump(self.mwc(), MWC_MULT, MWC_MOD, n));
    }

    fn jump_ahead_far(&mut self, e: u32, c: u64) {
        self.s1 = lcg::jump32_far(self.s1, LC_MULT, LC_CONST, e, c);
        self.s2 = MATRIX.pow_far(e, c).apply(self.s2);
        self.set_mwc(lcg::mwc_jump_far(self.mwc(), MWC_MULT, MWC_MOD, e, c));
    }

    fn jump_back(&mut self, n: u64) {
        self.s1 = lcg::jump32_back(self.s1, LC_MULT_INV, LC_CONST, n);
        self.s2 = MATRIX_INV.pow(n).apply(self.s2);
        self.set_mwc(lcg::mwc_jump(self.mwc(), MWC_MULT_INV, MWC_MOD, n));
    }

    fn jump_back_far(&mut self, e: u32, c: u64) {
        self.s1 = lcg::jump32_back_far(self.s1, LC_MULT_INV, LC_CONST, e, c);
        self.s2 = MATRIX_INV.pow_far(e, c).apply(self.s2);
        self.set_mwc(lcg::mwc_jump_far(self.mwc(), MWC_MULT_INV, MWC_MOD, e, c));
    }

    fn jump_cycle(&mut self) {
        for &e in CYCLE_AHEAD.iter() {
            self.jump_ahead_far(e, 0);
        }
        for &e in CYCLE_BACK.iter() {
            self.jump_back_far(e, 0);
        }
    }
}

use rand_core::{Error, RngCore, SeedableRng};

impl RngCore for Jkiss {
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
            let x = self.next32();
            let j = bytes.min(i + 4);
            // Always use Little-Endian.
            dest[i..j].copy_from_slice(&x.to_le_bytes()[0..(j - i)]);
            i = j;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        Ok(self.fill_bytes(dest))
    }
}

impl SeedableRng for Jkiss {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let word = |i: usize| u32::from_le_bytes([seed[i], seed[i + 1], seed[i + 2], seed[i + 3]]);
        let mut g = Self::new();
        g.s1 = word(0);
        if word(4) != 0 {
            g.s2 = word(4);
        }
        g.s3 = word(8);
        g.s4 = word(12);
        g
    }
}
