//! A slow, but clear reference implementation of the polynomial hash.

use core::num::Wrapping as W;

/// Continue the polynomial from state `h` over some buffer.
///
/// Every byte is read as a signed value and folded in as `h = 31 * h + byte`.
pub fn update(h: i32, buf: &[u8]) -> i32 {
    let mut h = W(h);
    for &byte in buf {
        // Both the multiplication and the addition wrap around.
        h = W(31) * h + W(byte as i8 as i32);
    }

    h.0
}

/// A reference implementation of the polynomial hash.
///
/// This is the normative definition of the hash; every other implementation in this crate must
/// agree with it bit for bit. It starts from `1` and processes one byte per step.
pub fn hash(buf: &[u8]) -> i32 {
    update(1, buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert_eq!(hash(&[]), 1);
    }

    #[test]
    fn seed() {
        assert_eq!(hash(&[0]), 31);
        assert_eq!(hash(&[0, 0]), 31 * 31);
        assert_eq!(hash(&[0, 0, 0]), 31 * 31 * 31);
    }

    #[test]
    fn signed_bytes() {
        assert_eq!(hash(&[1]), 32);
        assert_eq!(hash(&[0xFF]), 30);
        assert_eq!(hash(&[0x80]), 31 - 128);
    }

    #[test]
    fn test_vectors() {
        assert_eq!(hash(&[0; 9]), -196513505);
        assert_eq!(hash(&[1, 0, 0, 0, 0, 0, 0, 0]), -64644128);
        assert_eq!(hash(b"to be or not to be"), -2128476841);
        assert_eq!(hash(&[0x80; 16]), -1843831295);
    }

    #[test]
    fn update_concatenates() {
        let buf = b"love is a wonderful terrible thing";
        for mid in 0..buf.len() {
            assert_eq!(update(hash(&buf[..mid]), &buf[mid..]), hash(buf));
        }
    }
}
