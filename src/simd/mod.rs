//! The polynomial hash computed with wide vectors.
//!
//! The input is cut into blocks of `L` bytes, `L` being the vector width of the backend. Every
//! 32-bit lane of the accumulator collects one 4-byte group of each block:
//!
//! 1. The block is biased (XOR `0x80`) and folded, first pairwise into 16-bit lanes and then into
//!    32-bit lanes, exactly as the SWAR variant does within a register.
//! 2. The folded lanes and the bias correction `V` are added to the accumulator, which is then
//!    multiplied by `31^L`, moving all earlier blocks up by one block's worth of powers.
//!
//! The final `1..=L` bytes are zero-padded to a full block and the lanes are reduced with the
//! weights `W`, as if the input had been padded to a multiple of `L`. Multiplying by
//! `F[remaining] = 31^-(L - remaining)` takes back the padding.

use std::fmt;
use std::str::FromStr;

use slog::Logger;

use crate::config::Config;
use crate::consts::{self, Tables};
use crate::error::Error;

mod portable;
#[cfg(target_arch = "x86_64")]
mod x86_64;
#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
mod aarch64;

/// The lane width used when neither the backend nor the configuration determines one.
pub const DEFAULT_LANES: usize = 16;

/// Hardware backends, widest first.
const PREFERENCE: [Backend; 3] = [Backend::Avx2, Backend::Sse41, Backend::Neon];

/// An implementation of the lane-parallel hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Plain arrays standing in for vectors. Runs everywhere, with any lane width.
    Portable,
    /// 128-bit SSE4.1 vectors (x86_64).
    Sse41,
    /// 256-bit AVX2 vectors (x86_64).
    Avx2,
    /// 128-bit NEON vectors (little-endian aarch64).
    Neon,
}

impl Backend {
    /// Every backend.
    pub const ALL: [Backend; 4] = [Backend::Portable, Backend::Sse41, Backend::Avx2, Backend::Neon];

    /// Pick the widest backend the running CPU supports.
    pub fn detect() -> Backend {
        PREFERENCE
            .iter()
            .cloned()
            .find(|backend| backend.is_available())
            .unwrap_or(Backend::Portable)
    }

    /// Pick the widest supported backend running with exactly `lanes` lanes.
    ///
    /// Falls back to the portable backend, which runs with any width.
    pub fn detect_for(lanes: usize) -> Backend {
        PREFERENCE
            .iter()
            .cloned()
            .find(|backend| backend.native_lanes() == Some(lanes) && backend.is_available())
            .unwrap_or(Backend::Portable)
    }

    /// The canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Portable => "portable",
            Backend::Sse41 => "sse4.1",
            Backend::Avx2 => "avx2",
            Backend::Neon => "neon",
        }
    }

    /// The one lane width the backend runs with, or `None` if it runs with any.
    pub fn native_lanes(self) -> Option<usize> {
        match self {
            Backend::Portable => None,
            Backend::Sse41 | Backend::Neon => Some(16),
            Backend::Avx2 => Some(32),
        }
    }

    /// The lane width chosen when none is requested.
    pub fn preferred_lanes(self) -> usize {
        self.native_lanes().unwrap_or(DEFAULT_LANES)
    }

    /// Check if the running CPU supports this backend.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Portable => true,
            #[cfg(target_arch = "x86_64")]
            Backend::Sse41 => is_x86_feature_detected!("sse4.1"),
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
            Backend::Neon => std::arch::is_aarch64_feature_detected!("neon"),
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Backend, Error> {
        match s {
            "portable" => Ok(Backend::Portable),
            "sse4.1" | "sse41" => Ok(Backend::Sse41),
            "avx2" => Ok(Backend::Avx2),
            "neon" => Ok(Backend::Neon),
            _ => Err(Error::UnknownBackend(s.to_owned())),
        }
    }
}

/// A lane-parallel hasher: a backend and the tables of its lane width.
///
/// A `Simd` can only be constructed for a backend the CPU supports, which is what makes the
/// dispatch in `hash` sound.
#[derive(Clone, Debug)]
pub struct Simd {
    /// The backend.
    backend: Backend,
    /// The tables of the lane width.
    tables: Tables,
}

impl Simd {
    /// Create a hasher running `backend` with `lanes` lanes.
    pub fn new(backend: Backend, lanes: usize) -> Result<Simd, Error> {
        if !consts::is_valid_lane_width(lanes) {
            return Err(Error::InvalidLaneWidth(lanes));
        }
        if backend.native_lanes().map_or(false, |native| native != lanes) {
            return Err(Error::LaneWidthMismatch(backend, lanes));
        }
        if !backend.is_available() {
            return Err(Error::Unavailable(backend));
        }

        Ok(Simd {
            backend: backend,
            tables: Tables::new(lanes),
        })
    }

    /// Create a hasher with the widest backend of the running CPU.
    pub fn detect() -> Simd {
        let backend = Backend::detect();

        Simd {
            backend: backend,
            tables: Tables::new(backend.preferred_lanes()),
        }
    }

    /// Create a hasher from some configuration.
    ///
    /// Settings left open are detected: with neither given, this is `Simd::detect()`; with only
    /// a lane width given, the widest backend running that width is used.
    pub fn with_config(config: &Config, log: &Logger) -> Result<Simd, Error> {
        let backend = match (config.backend, config.lanes) {
            (Some(backend), _) => backend,
            (None, Some(lanes)) => {
                trace!(log, "detecting SIMD backend"; "lanes" => lanes);
                Backend::detect_for(lanes)
            },
            (None, None) => {
                trace!(log, "detecting SIMD backend");
                Backend::detect()
            },
        };
        let lanes = config.lanes.unwrap_or_else(|| backend.preferred_lanes());

        match Simd::new(backend, lanes) {
            Ok(simd) => {
                debug!(log, "selected SIMD backend"; "backend" => backend.name(), "lanes" => lanes);
                Ok(simd)
            },
            Err(err) => {
                warn!(
                    log, "rejected SIMD configuration";
                    "backend" => backend.name(), "lanes" => lanes, "error" => %err
                );
                Err(err)
            },
        }
    }

    /// The backend in use.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// The lane width `L` in bytes.
    pub fn lanes(&self) -> usize {
        self.tables.lanes()
    }

    /// The tables of the lane width.
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Hash some buffer.
    pub fn hash(&self, buf: &[u8]) -> i32 {
        match buf.len() {
            0 => return 1,
            1 => return 31 + buf[0] as i8 as i32,
            _ => (),
        }

        match self.backend {
            // The constructors only admit backends the CPU supports.
            #[cfg(target_arch = "x86_64")]
            Backend::Sse41 => unsafe { x86_64::hash_sse41(&self.tables, buf) },
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => unsafe { x86_64::hash_avx2(&self.tables, buf) },
            #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
            Backend::Neon => unsafe { aarch64::hash_neon(&self.tables, buf) },
            _ => portable::hash(&self.tables, buf),
        }
    }
}

lazy_static! {
    /// The hasher behind `hash`, set up on first use.
    static ref DEFAULT: Simd = Simd::detect();
}

/// The process-wide default hasher.
pub fn default_simd() -> &'static Simd {
    &DEFAULT
}

/// Hash some buffer with the default hasher.
pub fn hash(buf: &[u8]) -> i32 {
    DEFAULT.hash(buf)
}
