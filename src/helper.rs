//! Helper functions.

use core::slice;

use byteorder::{ByteOrder, LittleEndian};

/// Advance the polynomial by a single byte.
///
/// The byte is read as a two's complement signed value.
#[inline(always)]
pub fn step(h: i32, byte: u8) -> i32 {
    h.wrapping_mul(31).wrapping_add(byte as i8 as i32)
}

/// Fold the trailing bytes `buf[k..]` into `h`.
///
/// This assumes that `buf.len() - k < 8`. It is written as a cascade rather than a loop, so the
/// short tails of the block-based hashes are resolved without any loop overhead.
#[inline]
pub fn finalize(mut h: i32, buf: &[u8], mut k: usize) -> i32 {
    debug_assert!(buf.len() - k < 8, "The tail must be shorter than a block.");

    if k < buf.len() {
        h = step(h, buf[k]);
        k += 1;
        if k < buf.len() {
            h = step(h, buf[k]);
            k += 1;
            if k < buf.len() {
                h = step(h, buf[k]);
                k += 1;
                if k < buf.len() {
                    h = step(h, buf[k]);
                    k += 1;
                    if k < buf.len() {
                        h = step(h, buf[k]);
                        k += 1;
                        if k < buf.len() {
                            h = step(h, buf[k]);
                            k += 1;
                            if k < buf.len() {
                                h = step(h, buf[k]);
                            }
                        }
                    }
                }
            }
        }
    }

    h
}

/// Read 8 bytes as a little-endian 64-bit integer.
///
/// The lowest-addressed byte always ends up in the least significant position, whatever the
/// endianness of the host.
///
/// # Panics
///
/// This will panic if `buf` is shorter than 8 bytes.
#[inline(always)]
pub fn read_u64(buf: &[u8]) -> u64 {
    LittleEndian::read_u64(buf)
}

/// View a buffer of signed bytes as raw bytes.
///
/// All hash functions of this crate read their input as signed bytes, so this is the way to hash
/// `&[i8]` data without copying it.
#[inline]
pub fn as_unsigned(buf: &[i8]) -> &[u8] {
    // `i8` and `u8` have the same size and alignment, and every bit pattern is valid for both.
    unsafe { slice::from_raw_parts(buf.as_ptr() as *const u8, buf.len()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_sign_extends() {
        assert_eq!(step(1, 0), 31);
        assert_eq!(step(1, 1), 32);
        assert_eq!(step(1, 0xFF), 30);
        assert_eq!(step(1, 0x80), 31 - 128);
        assert_eq!(step(i32::max_value(), 0), i32::max_value().wrapping_mul(31));
    }

    #[test]
    fn finalize_every_tail() {
        let buf = [3, 0xFE, 7, 0x80, 0x7F, 1, 9, 42];
        for k in 1..=8 {
            let mut h = 5;
            for &b in &buf[k..] {
                h = step(h, b);
            }
            assert_eq!(finalize(5, &buf, k), h);
        }
    }

    #[test]
    fn finalize_empty_tail() {
        assert_eq!(finalize(1, &[], 0), 1);
        assert_eq!(finalize(-77, &[1, 2, 3], 3), -77);
    }

    #[test]
    fn read_u64_() {
        assert_eq!(read_u64(&[1, 0, 0, 0, 0, 0, 0, 0]), 1);
        assert_eq!(read_u64(&[2, 1, 0, 0, 0, 0, 0, 0]), 258);
        assert_eq!(read_u64(&[0, 0, 0, 0, 0, 0, 0, 0x80]), 1 << 63);
    }

    #[test]
    fn as_unsigned_() {
        assert_eq!(as_unsigned(&[0, 1, -1, -128, 127]), &[0, 1, 0xFF, 0x80, 0x7F]);
        assert!(as_unsigned(&[]).is_empty());
    }
}
