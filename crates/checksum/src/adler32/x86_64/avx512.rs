//! AVX-512BW Adler-32 kernel (512-bit lanes, 64-byte segments).
//!
//! Each segment is widened as four 16-byte loads (`vpmovzxbd`) at offsets
//! 0/16/32/48 into 16×u32 accumulators. Weights 64..1 are applied once per
//! chunk with `vpmulld`, after the segment sums are scaled by 64.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::*;

use platform::{Caps, caps::x86};

use super::reduce::finish_512;
use crate::{
  adler32::driver::{self, ChunkKernel},
  params::NMAX,
};

const SEGMENT: usize = 64;
const MAX_CHUNK: usize = NMAX / SEGMENT * SEGMENT;

const _: () = assert!(MAX_CHUNK == 5504);
const _: () = assert!(SEGMENT == 1 << 6);
// A byte-sum lane sees one byte per segment and is weighted by at most 64.
const _: () = assert!((MAX_CHUNK / SEGMENT) * 0xFF * SEGMENT <= i32::MAX as usize);

/// AVX-512BW kernel marker.
pub struct Avx512Bw;

impl ChunkKernel for Avx512Bw {
  const NAME: &'static str = crate::adler32::kernels::AVX512BW;
  const REQUIRES: Caps = x86::AVX512BW_READY;
  const ALIGNMENT: usize = 64;
  const SEGMENT_SIZE: usize = SEGMENT;
  const MAX_CHUNK_SIZE: usize = MAX_CHUNK;

  #[inline(always)]
  unsafe fn accumulate(chunk: &[u8], s1: &mut u32, s2: &mut u32) {
    accumulate_avx512(chunk, s1, s2);
  }
}

#[inline]
#[target_feature(enable = "avx512f,avx512bw")]
unsafe fn widen16(p: *const u8) -> __m512i {
  _mm512_cvtepu8_epi32(_mm_loadu_si128(p.cast()))
}

#[inline]
#[target_feature(enable = "avx512f,avx512bw")]
unsafe fn accumulate_avx512(chunk: &[u8], s1: &mut u32, s2: &mut u32) {
  debug_assert!(chunk.len().is_multiple_of(SEGMENT));
  debug_assert!(chunk.len() <= MAX_CHUNK);

  let zero = _mm512_setzero_si512();
  let (mut v_s1_0, mut v_s1_1, mut v_s1_2, mut v_s1_3) = (zero, zero, zero, zero);
  let (mut v_s2_0, mut v_s2_1, mut v_s2_2, mut v_s2_3) = (zero, zero, zero, zero);

  let (segments, _) = chunk.as_chunks::<SEGMENT>();
  for seg in segments {
    let p = seg.as_ptr();

    v_s2_0 = _mm512_add_epi32(v_s2_0, v_s1_0);
    v_s2_1 = _mm512_add_epi32(v_s2_1, v_s1_1);
    v_s2_2 = _mm512_add_epi32(v_s2_2, v_s1_2);
    v_s2_3 = _mm512_add_epi32(v_s2_3, v_s1_3);

    v_s1_0 = _mm512_add_epi32(v_s1_0, widen16(p));
    v_s1_1 = _mm512_add_epi32(v_s1_1, widen16(p.add(16)));
    v_s1_2 = _mm512_add_epi32(v_s1_2, widen16(p.add(32)));
    v_s1_3 = _mm512_add_epi32(v_s1_3, widen16(p.add(48)));
  }

  let v_s2 = _mm512_add_epi32(_mm512_add_epi32(v_s2_0, v_s2_1), _mm512_add_epi32(v_s2_2, v_s2_3));
  let mut v_s2 = _mm512_slli_epi32::<6>(v_s2);

  let w0 = _mm512_setr_epi32(64, 63, 62, 61, 60, 59, 58, 57, 56, 55, 54, 53, 52, 51, 50, 49);
  let w1 = _mm512_setr_epi32(48, 47, 46, 45, 44, 43, 42, 41, 40, 39, 38, 37, 36, 35, 34, 33);
  let w2 = _mm512_setr_epi32(32, 31, 30, 29, 28, 27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17);
  let w3 = _mm512_setr_epi32(16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1);
  v_s2 = _mm512_add_epi32(v_s2, _mm512_mullo_epi32(v_s1_0, w0));
  v_s2 = _mm512_add_epi32(v_s2, _mm512_mullo_epi32(v_s1_1, w1));
  v_s2 = _mm512_add_epi32(v_s2, _mm512_mullo_epi32(v_s1_2, w2));
  v_s2 = _mm512_add_epi32(v_s2, _mm512_mullo_epi32(v_s1_3, w3));

  let v_s1 = _mm512_add_epi32(_mm512_add_epi32(v_s1_0, v_s1_1), _mm512_add_epi32(v_s1_2, v_s1_3));

  finish_512(v_s1, v_s2, s1, s2);
}

#[inline]
#[target_feature(enable = "avx512f,avx512bw")]
unsafe fn adler32_avx512(adler: u32, data: &[u8]) -> u32 {
  driver::update::<Avx512Bw>(adler, data)
}

/// Safe wrapper for the AVX-512BW kernel.
#[inline]
pub fn adler32_avx512_safe(adler: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies AVX-512F + AVX-512BW before selecting this kernel.
  unsafe { adler32_avx512(adler, data) }
}

/// Run one chunk through the AVX-512BW accumulator.
///
/// # Panics
///
/// If AVX-512BW is not available or the chunk violates the length contract.
#[cfg(any(test, feature = "alloc"))]
pub(crate) fn accumulate_chunk_safe(chunk: &[u8], s1: &mut u32, s2: &mut u32) {
  assert!(crate::adler32::effective_caps().has(x86::AVX512BW_READY));
  assert!(!chunk.is_empty() && chunk.len().is_multiple_of(SEGMENT) && chunk.len() <= MAX_CHUNK);
  // SAFETY: AVX-512BW and the length contract are asserted above.
  unsafe { accumulate_avx512(chunk, s1, s2) }
}
