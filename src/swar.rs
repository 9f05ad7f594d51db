//! The polynomial hash computed SIMD-within-a-register.
//!
//! Eight bytes are read as one little-endian 64-bit word and reduced to their polynomial value in
//! two folding steps, each of which multiplies all packed lanes of the word at once:
//!
//! 1. Adjacent bytes are merged into four 16-bit lanes, `31 * b[2j] + b[2j + 1]`.
//! 2. Adjacent 16-bit lanes are merged into two 32-bit lanes, `31^2 * lo + hi`.
//!
//! The packed lanes only work for unsigned bytes, since a negative byte would borrow from its
//! neighbor. Hence every byte is XORed with `0x80` beforehand, mapping `[-128, 127]` onto
//! `[0, 255]`, and the accumulated `+128` bias is subtracted again through `U`.

use crate::consts::{P2, P4, P8, U};
use crate::helper;

/// Every byte's sign bit.
const SIGN_BITS: u64 = 0x8080808080808080;
/// The low byte of every 16-bit lane.
const LOW_BYTES: u64 = 0x00FF00FF00FF00FF;
/// The low half of every 32-bit lane.
const LOW_HALVES: u64 = 0x0000FFFF0000FFFF;

/// Reduce an 8-byte block to its two 32-bit partial sums.
///
/// The lower half of the result holds `Σ 31^(3 - j) * u[j]` of the first four (biased) bytes,
/// the upper half the same for the last four.
#[inline(always)]
fn fold(block: u64) -> u64 {
    let x = block ^ SIGN_BITS;
    // No lane can overflow: `31 * 255 + 255` fits 16 bits, `961 * 8160 + 8160` fits 32 bits.
    let x = (x & LOW_BYTES).wrapping_mul(31) + ((x >> 8) & LOW_BYTES);
    (x & LOW_HALVES).wrapping_mul(P2 as u64) + ((x >> 16) & LOW_HALVES)
}

/// Continue the polynomial from state `h` over some buffer.
pub fn update(mut h: i32, buf: &[u8]) -> i32 {
    let mut k = 0;

    while k + 8 <= buf.len() {
        let x = fold(helper::read_u64(&buf[k..]));

        h = P8
            .wrapping_mul(h)
            .wrapping_add(P4.wrapping_mul(x as i32))
            .wrapping_add((x >> 32) as i32)
            .wrapping_add(U);

        k += 8;
    }

    helper::finalize(h, buf, k)
}

/// Hash some buffer.
pub fn hash(buf: &[u8]) -> i32 {
    match buf.len() {
        0 => 1,
        1 => 31 + buf[0] as i8 as i32,
        _ => update(1, buf),
    }
}
