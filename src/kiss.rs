use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bitmatrix::BitMatrix32;
use crate::gen::{JumpRng, SeedError};
use crate::lcg;

// Marsaglia's KISS: a linear congruential stream, a 3-shift register and a
// multiply-with-carry stream, combined by addition mod 2^32. The period is
// 2^32 * (2^32 - 1) * (698769069 * 2^31 - 1), a little under 2^124.

const LC_MULT: u32 = 69069;
const LC_CONST: u32 = 12345;
const LC_MULT_INV: u32 = 2783094533;
const MWC_MULT: u64 = 698769069;
const MWC_MOD: u64 = (MWC_MULT << 32) - 1;
const MWC_MULT_INV: u64 = 1 << 32;
const N_SEEDS: usize = 4;

const MATRIX: BitMatrix32 = BitMatrix32::new([
    0x00042021, 0x00084042, 0x00108084, 0x00210108, 0x00420231, 0x00840462, 0x010808c4, 0x02101188,
    0x04202310, 0x08404620, 0x10808c40, 0x21011880, 0x42023100, 0x84046200, 0x0808c400, 0x10118800,
    0x20231000, 0x40462021, 0x808c4042, 0x01080084, 0x02100108, 0x04200210, 0x08400420, 0x10800840,
    0x21001080, 0x42002100, 0x84004200, 0x08008400, 0x10010800, 0x20021000, 0x40042000, 0x80084000,
]);
const MATRIX_INV: BitMatrix32 = BitMatrix32::new([
    0xf2b58529, 0xe56b0a52, 0xded6b4a5, 0xbdad694a, 0x7b5ad294, 0xf6b5a528, 0xed6b4a50, 0xced634a1,
    0x9dac6942, 0x3b58d284, 0x76b1a508, 0xed634a10, 0xcec63421, 0x9d8c6842, 0x3b18d084, 0x7631a108,
    0xec634210, 0xccc62421, 0x998c4842, 0x33189084, 0x66312108, 0xcc624210, 0x88c40420, 0x11880840,
    0x23101080, 0x46202100, 0x8c404200, 0x08800400, 0x11000800, 0x22001000, 0x44002000, 0x88004000,
]);

// The full period as a signed sum of powers of two, consumed by jump_cycle.
const CYCLE_AHEAD: [u32; 22] = [
    124, 122, 120, 116, 114, 110, 108, 102, 100, 99, 95, 91, 90, 85, 84, 80, 76, 71, 69, 67, 63,
    32,
];
const CYCLE_BACK: [u32; 9] = [118, 112, 109, 104, 97, 93, 88, 82, 78];

/// Marsaglia's KISS generator. 32-bit output, 128-bit state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Eq, PartialEq)]
pub struct Kiss {
    s1: u32,
    s2: u32,
    s3: u32,
    s4: u32,
}

// As recommended, this Debug implementation does not expose internal state.
impl core::fmt::Debug for Kiss {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Kiss {{}}")
    }
}

impl Kiss {
    /// Creates a KISS generator from Marsaglia's original seeds.
    pub fn new() -> Self {
        Kiss { s1: 123456789, s2: 362436000, s3: 521288629, s4: 7654321 }
    }

    /// Creates a KISS generator from a seed vector; see [`JumpRng::set_state`].
    pub fn from_state(seed: &[u32]) -> Result<Self, SeedError> {
        let mut g = Self::new();
        g.set_state(seed)?;
        Ok(g)
    }

    /// Advances every sub-stream one step and combines them.
    #[wrappit]
    #[inline]
    fn step(&mut self) -> u32 {
        self.s1 = LC_MULT * self.s1 + LC_CONST;

        self.s2 ^= self.s2 << 13;
        self.s2 ^= self.s2 >> 17;
        self.s2 ^= self.s2 << 5;

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

impl Default for Kiss {
    fn default() -> Self {
        Self::new()
    }
}

impl JumpRng for Kiss {
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

impl RngCore for Kiss {
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

impl SeedableRng for Kiss {
    type Seed = [u8; 16];

    /// Creates a KISS generator from 16 seed bytes (four Little-Endian
    /// words). A zero shift-register word is replaced with the default one.
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

#[cfg(test)]
mod tests {
    use super::*;

    const REF_SEED: [u32; 4] = [2247183700, 99545079, 3269400377, 3950144837];

    #[test]
    fn reference_sequence() {
        let mut g = Kiss::from_state(&REF_SEED).unwrap();
        assert_eq!(g.next32(), 0x614a8966);
        assert_eq!(g.next32(), 0xab17c817);
        assert_eq!(g.next32(), 0xaba02d34);

        let mut g = Kiss::new();
        assert_eq!(g.next32(), 0x7bf552e3);
        assert_eq!(g.next32(), 0xf97ab19f);
        assert_eq!(g.next32(), 0xa922e303);
    }

    #[test]
    fn jump_matches_a_million_steps() {
        let mut stepped = Kiss::from_state(&REF_SEED).unwrap();
        for _ in 0..1_000_000 {
            stepped.next32();
        }
        let mut jumped = Kiss::from_state(&REF_SEED).unwrap();
        jumped.jump_ahead(1_000_000);
        assert!(jumped == stepped);
        assert_eq!(jumped.next32(), 0x41d91f66);
    }

    #[test]
    fn jump_matches_stepping() {
        let mut stepped = Kiss::new();
        let mut n: u64 = 0;
        for target in [0u64, 1, 2, 3, 5, 17, 64, 100, 1000, 4096, 65536] {
            while n < target {
                stepped.next32();
                n += 1;
            }
            let mut jumped = Kiss::new();
            jumped.jump_ahead(target);
            assert!(jumped == stepped, "n = {}", target);
        }
    }

    #[test]
    fn jumps_round_trip() {
        let mut r: u64 = 3;
        let mut rnd = || -> u64 {
            r = r.wrapping_mul(6364136223846793005).wrapping_add(0xffff);
            r
        };
        for _ in 0..50 {
            let n = rnd() >> 24;
            let mut g = Kiss::from_state(&[
                rnd() as u32,
                rnd() as u32 | 1,
                rnd() as u32,
                (rnd() % MWC_MULT) as u32,
            ])
            .unwrap();
            let before = g.clone();
            g.jump_ahead(n);
            g.jump_back(n);
            assert!(g == before);
            g.jump_back(n);
            g.jump_ahead(n);
            assert!(g == before);
        }
    }

    #[test]
    fn far_jumps_match_plain_jumps() {
        for (e, c) in [(20, 0u64), (20, 12345), (40, 7), (1, 1)] {
            let mut a = Kiss::from_state(&REF_SEED).unwrap();
            let mut b = a.clone();
            a.jump_ahead_far(e, c);
            b.jump_ahead((1u64 << e) + c);
            assert!(a == b, "e = {}, c = {}", e, c);
            a.jump_back_far(e, c);
            b.jump_back((1u64 << e) + c);
            assert!(a == b);
        }
    }

    #[test]
    fn full_cycle_preserves_the_sequence() {
        let mut reference = Kiss::from_state(&REF_SEED).unwrap();
        let mut cycled = reference.clone();
        cycled.jump_cycle();
        for i in 0..1024 {
            assert_eq!(cycled.next32(), reference.next32(), "output {}", i);
        }
    }

    #[test]
    fn state_snapshot_round_trips() {
        let mut g = Kiss::from_state(&REF_SEED).unwrap();
        g.jump_ahead(999);
        let snap = g.state();
        let mut h = Kiss::new();
        h.set_state(&snap).unwrap();
        assert!(h == g);
        assert_eq!(h.next32(), g.next32());
    }

    #[test]
    fn bad_seeds_are_rejected_without_mutation() {
        let mut g = Kiss::new();
        let before = g.clone();
        assert_eq!(
            g.set_state(&[1, 2, 3]),
            Err(SeedError::TooShort { need: 4, got: 3 })
        );
        assert_eq!(g.set_state(&[1, 0, 3, 4]), Err(SeedError::Zero { index: 1 }));
        assert!(g == before);
    }

    #[test]
    fn transition_matrix_inverse_is_exact() {
        assert!(MATRIX.mul(&MATRIX_INV) == BitMatrix32::identity());
        assert!(MATRIX_INV.mul(&MATRIX) == BitMatrix32::identity());
    }

    #[test]
    fn u01_stays_in_the_unit_interval() {
        let mut g = Kiss::new();
        for _ in 0..1000 {
            let x = g.u01_32();
            assert!((0.0..1.0).contains(&x));
            let y = g.u01_64();
            assert!((0.0..1.0).contains(&y));
        }
    }
}
