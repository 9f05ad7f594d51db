//! Configuration of the lane-parallel hasher.

use crate::simd::Backend;

/// Requested settings of a `Simd` hasher.
///
/// Every field left `None` is detected from the running CPU when the hasher is built (see
/// `Simd::with_config`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// The backend.
    pub backend: Option<Backend>,
    /// The lane width in bytes.
    ///
    /// This must be a multiple of 4 between 8 and 64. Hardware backends only accept their own
    /// vector width.
    pub lanes: Option<usize>,
}

impl Config {
    /// A configuration detecting everything.
    pub fn new() -> Config {
        Config::default()
    }

    /// Request a backend.
    pub fn backend(mut self, backend: Backend) -> Config {
        self.backend = Some(backend);
        self
    }

    /// Request a lane width.
    pub fn lanes(mut self, lanes: usize) -> Config {
        self.lanes = Some(lanes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        assert_eq!(Config::new(), Config { backend: None, lanes: None });
        assert_eq!(
            Config::new().backend(Backend::Avx2).lanes(32),
            Config { backend: Some(Backend::Avx2), lanes: Some(32) },
        );
    }
}
