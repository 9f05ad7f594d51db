//! Configuration errors.
//!
//! Hashing itself cannot fail. Only selecting a SIMD backend, a lane width, or parsing a name
//! can.

use crate::consts::{MAX_LANES, MIN_LANES};
use crate::simd::Backend;

quick_error! {
    /// A configuration error.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        /// The lane width is not a multiple of 4 within the supported range.
        InvalidLaneWidth(lanes: usize) {
            display(
                "invalid lane width {} (expected a multiple of 4 in [{}, {}])",
                lanes, MIN_LANES, MAX_LANES
            )
        }
        /// The backend only runs at a different lane width.
        LaneWidthMismatch(backend: Backend, lanes: usize) {
            display(
                "the {} backend cannot run with {} lanes (it requires {})",
                backend, lanes, backend.native_lanes().unwrap_or(0)
            )
        }
        /// The running CPU lacks the backend's instruction set.
        Unavailable(backend: Backend) {
            display("the {} backend is not available on this CPU", backend)
        }
        /// No backend goes by this name.
        UnknownBackend(name: String) {
            display("unknown SIMD backend `{}`", name)
        }
        /// No hash variant goes by this name.
        UnknownVariant(name: String) {
            display("unknown hash variant `{}`", name)
        }
    }
}
