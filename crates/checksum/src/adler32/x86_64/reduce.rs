//! Horizontal reductions from lane accumulators to scalar sums.
//!
//! Every fold halves the vector width and adds the halves. The final
//! 128-bit step uses `pshufd` shuffle-and-add: `0x31` brings lanes 1 and 3
//! down onto lanes 0 and 2, then `0x02` brings lane 2 onto lane 0. All lane
//! arithmetic wraps modulo 2^32.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::*;

/// Sum all four 32-bit lanes.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn hsum_128(v: __m128i) -> u32 {
  let v = _mm_add_epi32(v, _mm_shuffle_epi32::<0x31>(v));
  let v = _mm_add_epi32(v, _mm_shuffle_epi32::<0x02>(v));
  _mm_cvtsi128_si32(v) as u32
}

/// Sum lanes 0 and 2 of a `psadbw` accumulator.
///
/// `psadbw` writes 16-bit sums into the low half of each 64-bit lane, so 32-bit
/// lanes 1 and 3 stay zero and one shuffle-add is enough.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn hsum_128_sad(v: __m128i) -> u32 {
  let v = _mm_add_epi32(v, _mm_shuffle_epi32::<0x02>(v));
  _mm_cvtsi128_si32(v) as u32
}

/// Reduce the SSE2 accumulators and add them onto `s1` / `s2`.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn finish_128_sad(v_s1: __m128i, v_s2: __m128i, s1: &mut u32, s2: &mut u32) {
  *s1 = s1.wrapping_add(hsum_128_sad(v_s1));
  *s2 = s2.wrapping_add(hsum_128(v_s2));
}

/// Reduce two fully populated 128-bit accumulators and add them onto `s1` / `s2`.
#[inline]
#[target_feature(enable = "sse2")]
pub unsafe fn finish_128(v_s1: __m128i, v_s2: __m128i, s1: &mut u32, s2: &mut u32) {
  *s1 = s1.wrapping_add(hsum_128(v_s1));
  *s2 = s2.wrapping_add(hsum_128(v_s2));
}

/// Reduce 8-lane accumulators and add them onto `s1` / `s2`.
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn finish_256(v_s1: __m256i, v_s2: __m256i, s1: &mut u32, s2: &mut u32) {
  let s1_128 = _mm_add_epi32(_mm256_castsi256_si128(v_s1), _mm256_extracti128_si256::<1>(v_s1));
  let s2_128 = _mm_add_epi32(_mm256_castsi256_si128(v_s2), _mm256_extracti128_si256::<1>(v_s2));
  finish_128(s1_128, s2_128, s1, s2);
}

/// Reduce 16-lane accumulators and add them onto `s1` / `s2`.
#[inline]
#[target_feature(enable = "avx512f,avx2")]
pub unsafe fn finish_512(v_s1: __m512i, v_s2: __m512i, s1: &mut u32, s2: &mut u32) {
  let s1_256 = _mm256_add_epi32(_mm512_castsi512_si256(v_s1), _mm512_extracti64x4_epi64::<1>(v_s1));
  let s2_256 = _mm256_add_epi32(_mm512_castsi512_si256(v_s2), _mm512_extracti64x4_epi64::<1>(v_s2));
  finish_256(s1_256, s2_256, s1, s2);
}
