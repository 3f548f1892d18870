use wrapping_arithmetic::wrappit;

// This module contains the closed-form jump helpers for the scalar
// sub-streams of the KISS family: linear congruential states over 2^32 and
// 2^64, and multiply-with-carry states packed into one 64-bit word.

use crate::arith::{
    add_mod64, gs64, gs64_far, gs_mod64, gs_mod64_far, mul_mod64, pow64, pow64_far, pow_mod64,
    pow_mod64_far, TWO32,
};

/// Advances a congruential state s <- mult * s + cnst (mod 2^32) by n steps:
/// s <- mult^n * s + cnst * (1 + mult + ... + mult^(n-1)).
pub fn jump32(s: u32, mult: u32, cnst: u32, n: u64) -> u32 {
    let p = mul_mod64(pow_mod64(mult as u64, n, TWO32), s as u64, TWO32);
    let q = mul_mod64(cnst as u64, gs_mod64(mult as u64, n, TWO32), TWO32);
    add_mod64(p, q, TWO32) as u32
}

/// [`jump32`] with the distance given as n = 2^e + c.
pub fn jump32_far(s: u32, mult: u32, cnst: u32, e: u32, c: u64) -> u32 {
    let p = mul_mod64(pow_mod64_far(mult as u64, e, c, TWO32), s as u64, TWO32);
    let q = mul_mod64(cnst as u64, gs_mod64_far(mult as u64, e, c, TWO32), TWO32);
    add_mod64(p, q, TWO32) as u32
}

/// Steps a congruential state back by n via the inverse multiplier, from
/// s_k-1 = mult_inv * (s_k - cnst):
/// s <- mult_inv^n * (s - cnst) + cnst - cnst * (1 + mult_inv + ... + mult_inv^(n-1)).
pub fn jump32_back(s: u32, mult_inv: u32, cnst: u32, n: u64) -> u32 {
    let neg = (cnst as u64).wrapping_neg();
    let p = mul_mod64(
        pow_mod64(mult_inv as u64, n, TWO32),
        add_mod64(s as u64, neg, TWO32),
        TWO32,
    );
    let q = mul_mod64(neg, gs_mod64(mult_inv as u64, n, TWO32), TWO32);
    add_mod64(cnst as u64, add_mod64(p, q, TWO32), TWO32) as u32
}

/// [`jump32_back`] with the distance given as n = 2^e + c.
pub fn jump32_back_far(s: u32, mult_inv: u32, cnst: u32, e: u32, c: u64) -> u32 {
    let neg = (cnst as u64).wrapping_neg();
    let p = mul_mod64(
        pow_mod64_far(mult_inv as u64, e, c, TWO32),
        add_mod64(s as u64, neg, TWO32),
        TWO32,
    );
    let q = mul_mod64(neg, gs_mod64_far(mult_inv as u64, e, c, TWO32), TWO32);
    add_mod64(cnst as u64, add_mod64(p, q, TWO32), TWO32) as u32
}

/// 64-bit congruential jump; the modulus 2^64 is the natural wrap.
#[wrappit]
pub fn jump64(s: u64, mult: u64, cnst: u64, n: u64) -> u64 {
    pow64(mult, n) * s + cnst * gs64(mult, n)
}

/// [`jump64`] with the distance given as n = 2^e + c.
#[wrappit]
pub fn jump64_far(s: u64, mult: u64, cnst: u64, e: u32, c: u64) -> u64 {
    pow64_far(mult, e, c) * s + cnst * gs64_far(mult, e, c)
}

/// 64-bit congruential back-jump via the inverse multiplier.
#[wrappit]
pub fn jump64_back(s: u64, mult_inv: u64, cnst: u64, n: u64) -> u64 {
    pow64(mult_inv, n) * (s - cnst) + cnst - cnst * gs64(mult_inv, n)
}

/// [`jump64_back`] with the distance given as n = 2^e + c.
#[wrappit]
pub fn jump64_back_far(s: u64, mult_inv: u64, cnst: u64, e: u32, c: u64) -> u64 {
    pow64_far(mult_inv, e, c) * (s - cnst) + cnst - cnst * gs64_far(mult_inv, e, c)
}

/// Jumps a multiply-with-carry state packed as a = x + carry * 2^32 by n
/// steps: a <- mult^n * a (mod mult * 2^32 - 1). Stepping backward is the
/// same call with the inverse multiplier 2^32, which inverts mult because
/// mult * 2^32 = 1 in this ring.
pub fn mwc_jump(a: u64, mult: u64, modulus: u64, n: u64) -> u64 {
    mul_mod64(pow_mod64(mult, n, modulus), a, modulus)
}

/// [`mwc_jump`] with the distance given as n = 2^e + c.
pub fn mwc_jump_far(a: u64, mult: u64, modulus: u64, e: u32, c: u64) -> u64 {
    mul_mod64(pow_mod64_far(mult, e, c, modulus), a, modulus)
}
