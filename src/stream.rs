use core::hash::{BuildHasher, Hasher};

use crate::{helper, swar};

/// The streaming version of the algorithm.
///
/// The polynomial is continued across writes, so the state after writing some buffers equals the
/// hash of their concatenation, however they are split up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolyHasher {
    /// The state of the hasher.
    state: i32,
}

impl Default for PolyHasher {
    fn default() -> PolyHasher {
        PolyHasher {
            state: 1,
        }
    }
}

impl PolyHasher {
    /// Create a new `PolyHasher` with default state.
    pub fn new() -> PolyHasher {
        PolyHasher::default()
    }

    /// The hash of everything written so far.
    pub fn hash_code(&self) -> i32 {
        self.state
    }
}

impl Hasher for PolyHasher {
    /// The hash, zero-extended.
    fn finish(&self) -> u64 {
        self.state as u32 as u64
    }

    fn write(&mut self, bytes: &[u8]) {
        self.state = swar::update(self.state, bytes);
    }

    fn write_u8(&mut self, n: u8) {
        self.state = helper::step(self.state, n);
    }
}

/// A `BuildHasher` of `PolyHasher`s.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildPolyHasher;

impl BuildHasher for BuildPolyHasher {
    type Hasher = PolyHasher;

    fn build_hasher(&self) -> PolyHasher {
        PolyHasher::new()
    }
}
