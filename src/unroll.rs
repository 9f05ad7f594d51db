//! The polynomial hash with its loop unrolled eight times.
//!
//! Folding a block of eight bytes in a single expression replaces eight dependent
//! multiply-adds by independent ones, which the CPU can execute in parallel.

use core::num::Wrapping as W;

use crate::helper;

/// `31^0` through `31^8`.
const POW: [W<i32>; 9] = [
    W(1),
    W(31),
    W(31i32.wrapping_pow(2)),
    W(31i32.wrapping_pow(3)),
    W(31i32.wrapping_pow(4)),
    W(31i32.wrapping_pow(5)),
    W(31i32.wrapping_pow(6)),
    W(31i32.wrapping_pow(7)),
    W(31i32.wrapping_pow(8)),
];

/// Read a byte as a signed, wrapping integer.
#[inline(always)]
fn s(byte: u8) -> W<i32> {
    W(byte as i8 as i32)
}

/// Continue the polynomial from state `h` over some buffer.
pub fn update(h: i32, buf: &[u8]) -> i32 {
    let mut h = W(h);
    let mut k = 0;

    while k + 8 <= buf.len() {
        let b = &buf[k..k + 8];
        h = POW[8] * h
            + POW[7] * s(b[0])
            + POW[6] * s(b[1])
            + POW[5] * s(b[2])
            + POW[4] * s(b[3])
            + POW[3] * s(b[4])
            + POW[2] * s(b[5])
            + POW[1] * s(b[6])
            + s(b[7]);

        k += 8;
    }

    helper::finalize(h.0, buf, k)
}

/// Hash some buffer.
pub fn hash(buf: &[u8]) -> i32 {
    update(1, buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{consts, reference};

    #[test]
    fn powers() {
        assert_eq!(POW[2].0, consts::P2);
        assert_eq!(POW[4].0, consts::P4);
        assert_eq!(POW[8].0, consts::P8);
        for i in 1..9 {
            assert_eq!(POW[i], POW[i - 1] * W(31));
        }
    }

    #[test]
    fn zero() {
        let arr = [0; 256];
        for n in 0..256 {
            assert_eq!(hash(&arr[..n]), reference::hash(&arr[..n]));
        }
    }

    #[test]
    fn seq() {
        let mut buf = [0; 1024];
        for i in 0..1024 {
            buf[i] = (i * 7) as u8;
        }
        for n in 0..1024 {
            assert_eq!(hash(&buf[..n]), reference::hash(&buf[..n]));
        }
    }

    #[test]
    fn update_from_any_state() {
        let buf = b"to be or not to be, that is the question";
        for &h in &[0, 1, -1, 12345, i32::min_value()] {
            assert_eq!(update(h, buf), reference::update(h, buf));
        }
    }
}
