//! AVX2 Adler-32 kernel (256-bit lanes, 32-byte segments).
//!
//! Each segment is widened as four 8-byte loads (`vpmovzxbd`) at offsets
//! 0/8/16/24, each feeding its own pair of 8×u32 accumulators. Weights 32..1
//! are applied once per chunk with `vpmulld`.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::*;

use platform::{Caps, caps::x86};

use super::reduce::finish_256;
use crate::{
  adler32::driver::{self, ChunkKernel},
  params::NMAX,
};

const SEGMENT: usize = 32;
const MAX_CHUNK: usize = NMAX / SEGMENT * SEGMENT;

const _: () = assert!(MAX_CHUNK == 5536);
// A byte-sum lane sees one byte per segment and is weighted by at most 32.
const _: () = assert!((MAX_CHUNK / SEGMENT) * 0xFF * SEGMENT <= i32::MAX as usize);

/// AVX2 kernel marker.
pub struct Avx2;

impl ChunkKernel for Avx2 {
  const NAME: &'static str = crate::adler32::kernels::AVX2;
  const REQUIRES: Caps = x86::AVX2_READY;
  const ALIGNMENT: usize = 32;
  const SEGMENT_SIZE: usize = SEGMENT;
  const MAX_CHUNK_SIZE: usize = MAX_CHUNK;

  #[inline(always)]
  unsafe fn accumulate(chunk: &[u8], s1: &mut u32, s2: &mut u32) {
    accumulate_avx2(chunk, s1, s2);
  }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn widen8(p: *const u8) -> __m256i {
  _mm256_cvtepu8_epi32(_mm_loadl_epi64(p.cast()))
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn accumulate_avx2(chunk: &[u8], s1: &mut u32, s2: &mut u32) {
  debug_assert!(chunk.len().is_multiple_of(SEGMENT));
  debug_assert!(chunk.len() <= MAX_CHUNK);

  let zero = _mm256_setzero_si256();
  let (mut v_s1_0, mut v_s1_1, mut v_s1_2, mut v_s1_3) = (zero, zero, zero, zero);
  let (mut v_s2_0, mut v_s2_1, mut v_s2_2, mut v_s2_3) = (zero, zero, zero, zero);

  let (segments, _) = chunk.as_chunks::<SEGMENT>();
  for seg in segments {
    let p = seg.as_ptr();

    v_s2_0 = _mm256_add_epi32(v_s2_0, v_s1_0);
    v_s2_1 = _mm256_add_epi32(v_s2_1, v_s1_1);
    v_s2_2 = _mm256_add_epi32(v_s2_2, v_s1_2);
    v_s2_3 = _mm256_add_epi32(v_s2_3, v_s1_3);

    v_s1_0 = _mm256_add_epi32(v_s1_0, widen8(p));
    v_s1_1 = _mm256_add_epi32(v_s1_1, widen8(p.add(8)));
    v_s1_2 = _mm256_add_epi32(v_s1_2, widen8(p.add(16)));
    v_s1_3 = _mm256_add_epi32(v_s1_3, widen8(p.add(24)));
  }

  let v_s2 = _mm256_add_epi32(_mm256_add_epi32(v_s2_0, v_s2_1), _mm256_add_epi32(v_s2_2, v_s2_3));
  let mut v_s2 = _mm256_slli_epi32::<5>(v_s2);

  let w0 = _mm256_setr_epi32(32, 31, 30, 29, 28, 27, 26, 25);
  let w1 = _mm256_setr_epi32(24, 23, 22, 21, 20, 19, 18, 17);
  let w2 = _mm256_setr_epi32(16, 15, 14, 13, 12, 11, 10, 9);
  let w3 = _mm256_setr_epi32(8, 7, 6, 5, 4, 3, 2, 1);
  v_s2 = _mm256_add_epi32(v_s2, _mm256_mullo_epi32(v_s1_0, w0));
  v_s2 = _mm256_add_epi32(v_s2, _mm256_mullo_epi32(v_s1_1, w1));
  v_s2 = _mm256_add_epi32(v_s2, _mm256_mullo_epi32(v_s1_2, w2));
  v_s2 = _mm256_add_epi32(v_s2, _mm256_mullo_epi32(v_s1_3, w3));

  let v_s1 = _mm256_add_epi32(_mm256_add_epi32(v_s1_0, v_s1_1), _mm256_add_epi32(v_s1_2, v_s1_3));

  finish_256(v_s1, v_s2, s1, s2);
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn adler32_avx2(adler: u32, data: &[u8]) -> u32 {
  driver::update::<Avx2>(adler, data)
}

/// Safe wrapper for the AVX2 kernel.
#[inline]
pub fn adler32_avx2_safe(adler: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies AVX2 before selecting this kernel.
  unsafe { adler32_avx2(adler, data) }
}

/// Run one chunk through the AVX2 accumulator.
///
/// # Panics
///
/// If AVX2 is not available or the chunk violates the length contract.
#[cfg(any(test, feature = "alloc"))]
pub(crate) fn accumulate_chunk_safe(chunk: &[u8], s1: &mut u32, s2: &mut u32) {
  assert!(crate::adler32::effective_caps().has(x86::AVX2_READY));
  assert!(!chunk.is_empty() && chunk.len().is_multiple_of(SEGMENT) && chunk.len() <= MAX_CHUNK);
  // SAFETY: AVX2 and the length contract are asserted above.
  unsafe { accumulate_avx2(chunk, s1, s2) }
}
