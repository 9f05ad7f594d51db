//! Lane-parallel hashing emulated on arrays.
//!
//! This runs the exact lane arithmetic of the vector backends, 32-bit lane by 32-bit lane, and
//! thus works for any valid lane width. The hardware backends are checked against it.

use crate::consts::{Tables, MAX_LANES, P2, V};

/// Fold four consecutive bytes into one 32-bit lane.
///
/// The bytes are biased by XOR with `0x80`, merged pairwise into 16-bit lanes
/// (`31 * u[0] + u[1]`), and those merged into `31^2 * lo + hi`.
#[inline(always)]
fn fold(quad: &[u8]) -> i32 {
    let lo = 31 * (quad[0] ^ 0x80) as u32 + (quad[1] ^ 0x80) as u32;
    let hi = 31 * (quad[2] ^ 0x80) as u32 + (quad[3] ^ 0x80) as u32;

    (P2 as u32 * lo + hi) as i32
}

/// Add a block of `4 * acc.len()` bytes into the accumulator lanes.
#[inline(always)]
fn absorb(acc: &mut [i32], block: &[u8]) {
    for (a, quad) in acc.iter_mut().zip(block.chunks_exact(4)) {
        *a = a.wrapping_add(fold(quad));
    }
}

/// Hash some buffer with the lane width of `tables`.
pub fn hash(tables: &Tables, buf: &[u8]) -> i32 {
    let lanes = tables.lanes();
    let pl = tables.pl();

    let mut acc = [0i32; MAX_LANES / 4];
    let acc = &mut acc[..tables.groups()];

    // Strictly greater: the final block, full or not, goes through the masked path below.
    let mut rest = buf;
    while rest.len() > lanes {
        let (block, tail) = rest.split_at(lanes);
        absorb(acc, block);
        for a in acc.iter_mut() {
            *a = a.wrapping_add(V).wrapping_mul(pl);
        }

        rest = tail;
    }

    // Pad the final block with zeros, as a masked load would.
    let remaining = rest.len();
    let mut last = [0; MAX_LANES];
    last[..remaining].copy_from_slice(rest);
    absorb(acc, &last[..lanes]);

    let r = acc
        .iter()
        .zip(tables.weights())
        .fold(0i32, |r, (&a, &w)| r.wrapping_add(a.wrapping_add(V).wrapping_mul(w)));

    1i32.wrapping_add(r).wrapping_mul(tables.factor(remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MIN_LANES;
    use crate::reference;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn fold_() {
        // Zeros are 128 after biasing.
        assert_eq!(fold(&[0, 0, 0, 0]), 128 * (29791 + 961 + 31 + 1));
        assert_eq!(fold(&[0x80, 0x80, 0x80, 0x81]), 1);
        assert_eq!(fold(&[0x81, 0x80, 0x80, 0x80]), 29791);
        assert_eq!(fold(&[0x7F, 0x7F, 0x7F, 0x7F]), 255 * (29791 + 961 + 31 + 1));
    }

    #[test]
    fn every_lane_width() {
        let mut rng = StdRng::seed_from_u64(0x1b873593);

        for lanes in (MIN_LANES..=MAX_LANES).step_by(4) {
            let tables = Tables::new(lanes);
            let mut buf = vec![0; 3 * lanes + 3];

            for n in 0..buf.len() {
                for _ in 0..8 {
                    rng.fill(&mut buf[..n]);
                    assert_eq!(
                        hash(&tables, &buf[..n]),
                        reference::hash(&buf[..n]),
                        "lanes = {}, len = {}",
                        lanes,
                        n,
                    );
                }
            }
        }
    }

    #[test]
    fn block_boundaries() {
        let tables = Tables::new(16);
        let buf = [0xFF; 64];
        for &n in &[15, 16, 17, 31, 32, 33, 51] {
            assert_eq!(hash(&tables, &buf[..n]), reference::hash(&buf[..n]));
        }
    }
}
