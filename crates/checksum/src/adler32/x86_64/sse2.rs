//! SSE2 Adler-32 kernel (128-bit lanes, 32-byte segments).
//!
//! `s1` lanes come from `psadbw` against zero. The weighted part keeps 32
//! separate 16-bit byte counters and is weighted once per chunk with
//! `pmaddwd` against 32..1.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::*;

use platform::{Caps, caps::x86};

use super::reduce::finish_128_sad;
use crate::adler32::driver::{self, ChunkKernel};

const SEGMENT: usize = 32;

/// `pmaddwd` reads the byte counters as `i16`, so no counter may pass 0x7FFF.
const MAX_SEGMENTS: usize = 0x7FFF / 0xFF;

const MAX_CHUNK: usize = SEGMENT * MAX_SEGMENTS;

const _: () = assert!(MAX_CHUNK == 4096);
const _: () = assert!(MAX_SEGMENTS * 0xFF <= i16::MAX as usize);
const _: () = assert!((MAX_SEGMENTS + 1) * 0xFF > i16::MAX as usize);
// One `pmaddwd` lane adds two products of weight ≤ 32.
const _: () = assert!(2 * 32 * MAX_SEGMENTS * 0xFF <= i32::MAX as usize);

/// SSE2 kernel marker.
pub struct Sse2;

impl ChunkKernel for Sse2 {
  const NAME: &'static str = crate::adler32::kernels::SSE2;
  const REQUIRES: Caps = x86::SSE2;
  const ALIGNMENT: usize = 16;
  const SEGMENT_SIZE: usize = SEGMENT;
  const MAX_CHUNK_SIZE: usize = MAX_CHUNK;

  #[inline(always)]
  unsafe fn accumulate(chunk: &[u8], s1: &mut u32, s2: &mut u32) {
    accumulate_sse2(chunk, s1, s2);
  }
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn accumulate_sse2(chunk: &[u8], s1: &mut u32, s2: &mut u32) {
  debug_assert!(chunk.len().is_multiple_of(SEGMENT));
  debug_assert!(chunk.len() <= MAX_CHUNK);

  let zero = _mm_setzero_si128();
  let mut v_s1 = zero;
  let mut v_s2 = zero;
  let mut v_b0 = zero;
  let mut v_b1 = zero;
  let mut v_b2 = zero;
  let mut v_b3 = zero;

  let (segments, _) = chunk.as_chunks::<SEGMENT>();
  for seg in segments {
    let lo = _mm_loadu_si128(seg.as_ptr().cast());
    let hi = _mm_loadu_si128(seg.as_ptr().add(16).cast());

    v_s2 = _mm_add_epi32(v_s2, v_s1);
    v_s1 = _mm_add_epi32(v_s1, _mm_sad_epu8(lo, zero));
    v_s1 = _mm_add_epi32(v_s1, _mm_sad_epu8(hi, zero));

    v_b0 = _mm_add_epi16(v_b0, _mm_unpacklo_epi8(lo, zero));
    v_b1 = _mm_add_epi16(v_b1, _mm_unpackhi_epi8(lo, zero));
    v_b2 = _mm_add_epi16(v_b2, _mm_unpacklo_epi8(hi, zero));
    v_b3 = _mm_add_epi16(v_b3, _mm_unpackhi_epi8(hi, zero));
  }

  v_s2 = _mm_slli_epi32::<5>(v_s2);
  v_s2 = _mm_add_epi32(v_s2, _mm_madd_epi16(v_b0, _mm_setr_epi16(32, 31, 30, 29, 28, 27, 26, 25)));
  v_s2 = _mm_add_epi32(v_s2, _mm_madd_epi16(v_b1, _mm_setr_epi16(24, 23, 22, 21, 20, 19, 18, 17)));
  v_s2 = _mm_add_epi32(v_s2, _mm_madd_epi16(v_b2, _mm_setr_epi16(16, 15, 14, 13, 12, 11, 10, 9)));
  v_s2 = _mm_add_epi32(v_s2, _mm_madd_epi16(v_b3, _mm_setr_epi16(8, 7, 6, 5, 4, 3, 2, 1)));

  finish_128_sad(v_s1, v_s2, s1, s2);
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn adler32_sse2(adler: u32, data: &[u8]) -> u32 {
  driver::update::<Sse2>(adler, data)
}

/// Safe wrapper for the SSE2 kernel.
#[inline]
pub fn adler32_sse2_safe(adler: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies SSE2 before selecting this kernel.
  unsafe { adler32_sse2(adler, data) }
}

/// Run one chunk through the SSE2 accumulator.
///
/// Used by the kernel tests and the fuzz harness to exercise a single
/// `accumulate` call outside the driver's schedule.
#[cfg(any(test, feature = "alloc"))]
pub(crate) fn accumulate_chunk_safe(chunk: &[u8], s1: &mut u32, s2: &mut u32) {
  assert!(!chunk.is_empty() && chunk.len().is_multiple_of(SEGMENT) && chunk.len() <= MAX_CHUNK);
  // SAFETY: SSE2 is baseline on x86_64; the length contract is asserted above.
  unsafe { accumulate_sse2(chunk, s1, s2) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    adler32::reference::adler32_bytewise,
    params::{DIVISOR, join},
  };

  #[test]
  fn known_vectors() {
    assert_eq!(adler32_sse2_safe(1, b"Wikipedia"), 0x11E6_0398);
    assert_eq!(adler32_sse2_safe(1, &[0xFFu8; 1024]), 0x79A6_FC2E);
  }

  #[test]
  fn single_max_chunk_of_ff_from_worst_state() {
    let chunk = [0xFFu8; MAX_CHUNK];
    let (mut s1, mut s2) = (DIVISOR - 1, DIVISOR - 1);
    s2 = s2.wrapping_add(s1.wrapping_mul(MAX_CHUNK as u32));
    accumulate_chunk_safe(&chunk, &mut s1, &mut s2);
    let got = join(s1 % DIVISOR, s2 % DIVISOR);
    let start = join(DIVISOR - 1, DIVISOR - 1);
    assert_eq!(got, adler32_bytewise(start, &chunk));
  }

  #[test]
  fn max_chunk_plus_one_segment() {
    let data = [0xFFu8; MAX_CHUNK + SEGMENT];
    let start = join(DIVISOR - 1, DIVISOR - 1);
    assert_eq!(adler32_sse2_safe(start, &data), adler32_bytewise(start, &data));
  }
}
