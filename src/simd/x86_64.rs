//! SSE4.1 (16 lanes) and AVX2 (32 lanes) backends.
//!
//! x86 is little-endian, so reinterpreting a byte vector as 16-bit lanes puts the first byte of
//! every pair into the low half, as the pairwise fold requires.

use core::arch::x86_64::{
    __m128i, __m256i, _mm256_add_epi16, _mm256_add_epi32, _mm256_and_si256, _mm256_loadu_si256,
    _mm256_mullo_epi16, _mm256_mullo_epi32, _mm256_set1_epi16, _mm256_set1_epi32,
    _mm256_set1_epi8, _mm256_setzero_si256, _mm256_srli_epi16, _mm256_srli_epi32,
    _mm256_storeu_si256, _mm256_xor_si256, _mm_add_epi16, _mm_add_epi32, _mm_and_si128,
    _mm_loadu_si128, _mm_mullo_epi16, _mm_mullo_epi32, _mm_set1_epi16, _mm_set1_epi32,
    _mm_set1_epi8, _mm_setzero_si128, _mm_srli_epi16, _mm_srli_epi32, _mm_storeu_si128,
    _mm_xor_si128,
};

use crate::consts::{Tables, P2, V};

/// Sum the lanes of a reduced vector.
#[inline(always)]
fn sum(lanes: &[i32]) -> i32 {
    lanes.iter().fold(0i32, |r, &x| r.wrapping_add(x))
}

/// Fold 16 bytes into four 32-bit lanes.
#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn fold_sse41(s: __m128i) -> __m128i {
    let s = _mm_xor_si128(s, _mm_set1_epi8(0x80u8 as i8));
    let i = _mm_add_epi16(
        _mm_mullo_epi16(_mm_and_si128(s, _mm_set1_epi16(0xFF)), _mm_set1_epi16(31)),
        _mm_srli_epi16::<8>(s),
    );

    _mm_add_epi32(
        _mm_mullo_epi32(_mm_and_si128(i, _mm_set1_epi32(0xFFFF)), _mm_set1_epi32(P2)),
        _mm_srli_epi32::<16>(i),
    )
}

/// Hash some buffer with 128-bit vectors.
///
/// # Safety
///
/// The CPU must support SSE4.1, and `tables` must be those of 16 lanes.
#[target_feature(enable = "sse4.1")]
pub unsafe fn hash_sse41(tables: &Tables, buf: &[u8]) -> i32 {
    debug_assert_eq!(tables.lanes(), 16);

    let v = _mm_set1_epi32(V);
    let pl = _mm_set1_epi32(tables.pl());
    let mut acc = _mm_setzero_si128();

    let mut rest = buf;
    while rest.len() > 16 {
        let s = _mm_loadu_si128(rest.as_ptr() as *const __m128i);
        acc = _mm_add_epi32(acc, fold_sse41(s));
        acc = _mm_mullo_epi32(_mm_add_epi32(acc, v), pl);

        rest = &rest[16..];
    }

    let mut last = [0u8; 16];
    last[..rest.len()].copy_from_slice(rest);
    acc = _mm_add_epi32(acc, fold_sse41(_mm_loadu_si128(last.as_ptr() as *const __m128i)));
    acc = _mm_add_epi32(acc, v);

    let w = _mm_loadu_si128(tables.weights().as_ptr() as *const __m128i);
    let mut lanes = [0i32; 4];
    _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, _mm_mullo_epi32(acc, w));

    1i32.wrapping_add(sum(&lanes)).wrapping_mul(tables.factor(rest.len()))
}

/// Fold 32 bytes into eight 32-bit lanes.
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn fold_avx2(s: __m256i) -> __m256i {
    let s = _mm256_xor_si256(s, _mm256_set1_epi8(0x80u8 as i8));
    let i = _mm256_add_epi16(
        _mm256_mullo_epi16(_mm256_and_si256(s, _mm256_set1_epi16(0xFF)), _mm256_set1_epi16(31)),
        _mm256_srli_epi16::<8>(s),
    );

    _mm256_add_epi32(
        _mm256_mullo_epi32(_mm256_and_si256(i, _mm256_set1_epi32(0xFFFF)), _mm256_set1_epi32(P2)),
        _mm256_srli_epi32::<16>(i),
    )
}

/// Hash some buffer with 256-bit vectors.
///
/// # Safety
///
/// The CPU must support AVX2, and `tables` must be those of 32 lanes.
#[target_feature(enable = "avx2")]
pub unsafe fn hash_avx2(tables: &Tables, buf: &[u8]) -> i32 {
    debug_assert_eq!(tables.lanes(), 32);

    let v = _mm256_set1_epi32(V);
    let pl = _mm256_set1_epi32(tables.pl());
    let mut acc = _mm256_setzero_si256();

    let mut rest = buf;
    while rest.len() > 32 {
        let s = _mm256_loadu_si256(rest.as_ptr() as *const __m256i);
        acc = _mm256_add_epi32(acc, fold_avx2(s));
        acc = _mm256_mullo_epi32(_mm256_add_epi32(acc, v), pl);

        rest = &rest[32..];
    }

    let mut last = [0u8; 32];
    last[..rest.len()].copy_from_slice(rest);
    acc = _mm256_add_epi32(acc, fold_avx2(_mm256_loadu_si256(last.as_ptr() as *const __m256i)));
    acc = _mm256_add_epi32(acc, v);

    let w = _mm256_loadu_si256(tables.weights().as_ptr() as *const __m256i);
    let mut lanes = [0i32; 8];
    _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, _mm256_mullo_epi32(acc, w));

    1i32.wrapping_add(sum(&lanes)).wrapping_mul(tables.factor(rest.len()))
}
