//! Polyhash: bit-exact, vectorized implementations of the 31-polynomial byte array hash.
//!
//! The hash of a byte sequence `b` is the polynomial
//!
//! ```text
//! h_0 = 1
//! h_{i+1} = 31 * h_i + b_i
//! ```
//!
//! evaluated in wrapping 32-bit arithmetic, with every byte read as a two's complement signed
//! value. An absent sequence hashes to `0`. This is the well-known array hash code of the JVM, and
//! its only weakness is speed: evaluated as written, every step waits for the previous one.
//!
//! This crate computes the same value four ways:
//!
//! - `reference`: the recurrence as written. This is the definition.
//! - `unroll`: eight steps folded into one expression, breaking the dependency chain.
//! - `swar`: eight bytes read as a 64-bit word and folded with packed 16-bit and 32-bit lanes.
//! - `simd`: blocks of a full vector register folded lane by lane, with SSE4.1, AVX2, and NEON
//!   backends selected at run time.
//!
//! # Why the vectorized forms are exact
//!
//! Two tricks make the packed arithmetic work. First, the bytes are XORed with `0x80`, turning
//! the signed range `[-128, 127]` into `[0, 255]` so packed lanes never borrow from one another;
//! the accumulated bias is a constant and is subtracted again (`consts::U`, `consts::V`). Second,
//! since 31 is odd, it has a multiplicative inverse modulo `2^32` (`consts::I`). The vector path
//! treats its last block as if it were full, which multiplies the hash by a surplus power of 31;
//! multiplying by the same power of the inverse takes it back.
//!
//! # Example
//!
//! ```
//! let buf = b"to be or not to be";
//!
//! assert_eq!(polyhash::hash_reference(Some(buf)), -2128476841);
//! assert_eq!(polyhash::hash_simd(Some(buf)), -2128476841);
//! assert_eq!(polyhash::hash_swar(None), 0);
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate slog;

extern crate byteorder;

#[cfg(test)]
extern crate rand;

use std::fmt;
use std::str::FromStr;

pub mod config;
pub mod consts;
pub mod error;
pub mod helper;
pub mod reference;
pub mod simd;
pub mod swar;
pub mod unroll;
mod stream;

pub use config::Config;
pub use error::Error;
pub use helper::as_unsigned;
pub use simd::{Backend, Simd};
pub use stream::{BuildPolyHasher, PolyHasher};

/// Hash some buffer with the reference implementation.
///
/// `None` hashes to `0`, the empty buffer to `1`.
pub fn hash_reference(buf: Option<&[u8]>) -> i32 {
    buf.map_or(0, reference::hash)
}

/// Hash some buffer with the 8-way unrolled implementation.
///
/// `None` hashes to `0`, the empty buffer to `1`.
pub fn hash_unroll8(buf: Option<&[u8]>) -> i32 {
    buf.map_or(0, unroll::hash)
}

/// Hash some buffer with the SWAR implementation.
///
/// `None` hashes to `0`, the empty buffer to `1`.
pub fn hash_swar(buf: Option<&[u8]>) -> i32 {
    buf.map_or(0, swar::hash)
}

/// Hash some buffer with the default SIMD backend of the running CPU.
///
/// `None` hashes to `0`, the empty buffer to `1`.
pub fn hash_simd(buf: Option<&[u8]>) -> i32 {
    buf.map_or(0, simd::hash)
}

/// An implementation of the hash.
///
/// All variants compute the same value; they differ only in speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// See `hash_reference`.
    Reference,
    /// See `hash_unroll8`.
    Unroll8,
    /// See `hash_swar`.
    Swar,
    /// See `hash_simd`.
    Simd,
}

impl Variant {
    /// Every variant.
    pub const ALL: [Variant; 4] = [Variant::Reference, Variant::Unroll8, Variant::Swar, Variant::Simd];

    /// The canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Variant::Reference => "reference",
            Variant::Unroll8 => "unroll8",
            Variant::Swar => "swar",
            Variant::Simd => "simd",
        }
    }

    /// Hash some buffer with this variant.
    pub fn hash(self, buf: Option<&[u8]>) -> i32 {
        match self {
            Variant::Reference => hash_reference(buf),
            Variant::Unroll8 => hash_unroll8(buf),
            Variant::Swar => hash_swar(buf),
            Variant::Simd => hash_simd(buf),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Variant, Error> {
        Variant::ALL
            .iter()
            .cloned()
            .find(|variant| variant.name() == s)
            .ok_or_else(|| Error::UnknownVariant(s.to_owned()))
    }
}
