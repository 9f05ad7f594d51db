//! Precomputed constants of the polynomial hash.
//!
//! Every value here is derived in wrapping 32-bit arithmetic from the base 31 and, for the
//! lane-parallel path, from the lane width `L`. Nothing is tuned per platform.

/// `31^2`
pub const P2: i32 = 31 * 31;
/// `31^4`
pub const P4: i32 = P2 * P2;
/// `31^8`
pub const P8: i32 = P4.wrapping_mul(P4);

/// `-128 * (31^7 + 31^6 + ... + 31 + 1)`.
///
/// Removes the `+128` bias of eight bytes XORed with `0x80`.
pub const U: i32 = (-128 * (1 + 31) * (1 + P2)).wrapping_mul(1 + P4);

/// `-98 * (31^3 + 31^2 + 31 + 1)`.
///
/// Removes the bias of a four byte group, except for a residue of `30` per byte. Summed over a
/// whole (padded) input of `N` bytes, that residue is `31^N - 1`, which together with the final
/// `+ 1` reconstitutes the seed.
pub const V: i32 = -98 * (1 + 31) * (1 + P2);

/// The multiplicative inverse of 31 modulo `2^32`.
pub const I: i32 = 0xBDEF_7BDF_u32 as i32;

/// The smallest supported lane width in bytes.
pub const MIN_LANES: usize = 8;
/// The largest supported lane width in bytes.
pub const MAX_LANES: usize = 64;

/// Check if `lanes` is a usable lane width: a multiple of 4 within `[MIN_LANES, MAX_LANES]`.
pub const fn is_valid_lane_width(lanes: usize) -> bool {
    lanes % 4 == 0 && lanes >= MIN_LANES && lanes <= MAX_LANES
}

/// The tables of the lane-parallel hash for some lane width `L`.
///
/// Only the first `L + 1` entries of `powers` and `factors` and the first `L / 4` entries of
/// `weights` are meaningful; the rest are zero.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tables {
    /// `L`, in bytes.
    lanes: usize,
    /// `P[i] = 31^i`.
    powers: [i32; MAX_LANES + 1],
    /// `F[i] = I^(L - i)`.
    factors: [i32; MAX_LANES + 1],
    /// `W = {31^(L - 4), 31^(L - 8), ..., 31^4, 31^0}`.
    weights: [i32; MAX_LANES / 4],
}

impl Tables {
    /// Derive the tables for a lane width.
    ///
    /// # Panics
    ///
    /// Panics if `lanes` is not a valid lane width (see `is_valid_lane_width`).
    pub const fn new(lanes: usize) -> Tables {
        assert!(is_valid_lane_width(lanes), "lane width must be a multiple of 4 in [8, 64]");

        let mut powers = [0i32; MAX_LANES + 1];
        powers[0] = 1;
        let mut i = 1;
        while i <= lanes {
            powers[i] = powers[i - 1].wrapping_mul(31);
            i += 1;
        }

        // Walk down from `F[L] = 1`, multiplying by the inverse each step.
        let mut factors = [0i32; MAX_LANES + 1];
        factors[lanes] = 1;
        let mut i = lanes;
        while i > 0 {
            factors[i - 1] = factors[i].wrapping_mul(I);
            i -= 1;
        }

        // Lane 0 carries the first four bytes of a block, hence the highest power.
        let mut weights = [0i32; MAX_LANES / 4];
        let mut j = 0;
        while j < lanes / 4 {
            weights[j] = powers[lanes - 4 * (j + 1)];
            j += 1;
        }

        Tables {
            lanes: lanes,
            powers: powers,
            factors: factors,
            weights: weights,
        }
    }

    /// The lane width `L` in bytes.
    #[inline]
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// The number of 32-bit lanes, `L / 4`.
    #[inline]
    pub fn groups(&self) -> usize {
        self.lanes / 4
    }

    /// `P[0..=L]`.
    pub fn powers(&self) -> &[i32] {
        &self.powers[..=self.lanes]
    }

    /// `F[0..=L]`.
    pub fn factors(&self) -> &[i32] {
        &self.factors[..=self.lanes]
    }

    /// `W[0..L/4]`.
    #[inline]
    pub fn weights(&self) -> &[i32] {
        &self.weights[..self.lanes / 4]
    }

    /// `PL = 31^L`.
    #[inline]
    pub fn pl(&self) -> i32 {
        self.powers[self.lanes]
    }

    /// `F[remaining]`, the correction for a final block holding `remaining` bytes.
    #[inline]
    pub fn factor(&self, remaining: usize) -> i32 {
        self.factors[remaining]
    }
}

/// The tables of 16-byte (128-bit) vectors.
pub static TABLES_16: Tables = Tables::new(16);
/// The tables of 32-byte (256-bit) vectors.
pub static TABLES_32: Tables = Tables::new(32);

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn scalar_constants() {
        assert_eq!(P2, 961);
        assert_eq!(P4, 923521);
        assert_eq!(P8, -1807454463);
        assert_eq!(U, -1164460032);
        assert_eq!(V, -3016832);
    }

    #[test]
    fn inverse() {
        assert_eq!(I.wrapping_mul(31), 1);
        assert_eq!(I.wrapping_mul(I).wrapping_mul(31 * 31), 1);

        let mut rng = StdRng::seed_from_u64(0xf5d3bf1edd131774);
        for _ in 0..10000 {
            let i: i32 = rng.gen();
            assert_eq!(i.wrapping_mul(31).wrapping_mul(I), i);
        }
    }

    #[test]
    fn lane_widths() {
        assert!(is_valid_lane_width(8));
        assert!(is_valid_lane_width(12));
        assert!(is_valid_lane_width(64));
        assert!(!is_valid_lane_width(0));
        assert!(!is_valid_lane_width(4));
        assert!(!is_valid_lane_width(10));
        assert!(!is_valid_lane_width(68));
    }

    #[test]
    fn tables() {
        for lanes in (MIN_LANES..=MAX_LANES).step_by(4) {
            let t = Tables::new(lanes);
            assert_eq!(t.lanes(), lanes);
            assert_eq!(t.powers().len(), lanes + 1);
            assert_eq!(t.weights().len(), lanes / 4);
            assert_eq!(t.factor(lanes), 1);
            assert_eq!(t.pl(), t.powers()[lanes]);
            assert_eq!(t.weights()[lanes / 4 - 1], 1);
            assert_eq!(t.weights()[0], t.powers()[lanes - 4]);

            for i in 0..=lanes {
                // `F[i]` undoes `31^(L - i)`.
                assert_eq!(t.factor(i).wrapping_mul(t.powers()[lanes - i]), 1);
            }
        }
    }

    #[test]
    fn statics() {
        assert_eq!(TABLES_16, Tables::new(16));
        assert_eq!(TABLES_16.weights(), &[-293403007, P8, P4, 1]);
        assert_eq!(TABLES_16.pl(), 1353309697);
        assert_eq!(TABLES_32.pl(), 2111290369);
    }

    #[test]
    fn narrowest_tables() {
        let lanes = MIN_LANES;
        let t = Tables::new(lanes);
        assert_eq!(
            t.powers(),
            &[1, 31, 961, 29791, 923521, 28629151, 887503681, 1742810335, -1807454463]
        );
        assert_eq!(
            t.factors(),
            &[
                1155305729, 1454739231, 2147243201, 2140029791, 1916414081, -720705633, -867038143,
                -1108378657, 1,
            ]
        );
        assert_eq!(t.weights(), &[P4, 1]);
    }
}
