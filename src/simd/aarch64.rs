//! NEON backend (16 lanes).
//!
//! Only built for little-endian targets: the lane reinterpretations below rely on the first byte
//! of every pair landing in the low half of its 16-bit lane.

use core::arch::aarch64::{
    uint32x4_t, uint8x16_t, vaddq_u16, vaddq_u32, vaddvq_u32, vandq_u16, vandq_u32, vdupq_n_u16,
    vdupq_n_u32, vdupq_n_u8, veorq_u8, vld1q_u32, vld1q_u8, vmulq_u16, vmulq_u32,
    vreinterpretq_u16_u8, vreinterpretq_u32_u16, vshrq_n_u16, vshrq_n_u32,
};

use crate::consts::{Tables, P2, V};

/// Fold 16 bytes into four 32-bit lanes.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn fold(s: uint8x16_t) -> uint32x4_t {
    let s = vreinterpretq_u16_u8(veorq_u8(s, vdupq_n_u8(0x80)));
    let i = vaddq_u16(
        vmulq_u16(vandq_u16(s, vdupq_n_u16(0xFF)), vdupq_n_u16(31)),
        vshrq_n_u16::<8>(s),
    );
    let i = vreinterpretq_u32_u16(i);

    vaddq_u32(
        vmulq_u32(vandq_u32(i, vdupq_n_u32(0xFFFF)), vdupq_n_u32(P2 as u32)),
        vshrq_n_u32::<16>(i),
    )
}

/// Hash some buffer with 128-bit vectors.
///
/// # Safety
///
/// The CPU must support NEON, and `tables` must be those of 16 lanes.
#[target_feature(enable = "neon")]
pub unsafe fn hash_neon(tables: &Tables, buf: &[u8]) -> i32 {
    debug_assert_eq!(tables.lanes(), 16);

    let v = vdupq_n_u32(V as u32);
    let pl = vdupq_n_u32(tables.pl() as u32);
    let mut acc = vdupq_n_u32(0);

    let mut rest = buf;
    while rest.len() > 16 {
        acc = vaddq_u32(acc, fold(vld1q_u8(rest.as_ptr())));
        acc = vmulq_u32(vaddq_u32(acc, v), pl);

        rest = &rest[16..];
    }

    let mut last = [0u8; 16];
    last[..rest.len()].copy_from_slice(rest);
    acc = vaddq_u32(acc, fold(vld1q_u8(last.as_ptr())));
    acc = vaddq_u32(acc, v);

    let w = vld1q_u32(tables.weights().as_ptr() as *const u32);
    // The horizontal add wraps like every other lane operation.
    let r = vaddvq_u32(vmulq_u32(acc, w)) as i32;

    1i32.wrapping_add(r).wrapping_mul(tables.factor(rest.len()))
}
