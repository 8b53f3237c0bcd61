//! Chunked driver shared by every SIMD kernel.
//!
//! A kernel only knows how to fold one chunk into `(s1, s2)` without
//! reduction. The driver owns everything else: the scalar prologue up to the
//! kernel's alignment, the chunk schedule, the `n · s1` term, the modular
//! reduction between chunks and the scalar tail.
#![allow(unsafe_code)]

use platform::Caps;

use super::portable::accumulate_bytes;
use crate::params::{DIVISOR, NMAX, join, split};

/// A fixed-width weighted-sum kernel.
///
/// Implementors are zero-sized markers; the driver is monomorphized once per
/// kernel.
pub trait ChunkKernel {
  /// Kernel name reported by introspection.
  const NAME: &'static str;
  /// Capabilities that must be present before [`Self::accumulate`] may run.
  const REQUIRES: Caps;
  /// Alignment the driver establishes before the first chunk.
  const ALIGNMENT: usize;
  /// Bytes consumed per inner-loop iteration.
  const SEGMENT_SIZE: usize;
  /// Largest chunk whose lane accumulators cannot overflow.
  const MAX_CHUNK_SIZE: usize;

  /// Chunk length actually used by the driver: `min(NMAX, MAX_CHUNK_SIZE)`
  /// rounded down to whole segments.
  const CHUNK_SIZE: usize = {
    let max = if NMAX < Self::MAX_CHUNK_SIZE {
      NMAX
    } else {
      Self::MAX_CHUNK_SIZE
    };
    max / Self::SEGMENT_SIZE * Self::SEGMENT_SIZE
  };

  /// Add the contribution of `chunk` onto `s1` and `s2`.
  ///
  /// `s2` must already hold `s1 · chunk.len()`. Nothing is reduced.
  ///
  /// # Safety
  ///
  /// - The CPU must support every capability in [`Self::REQUIRES`].
  /// - `chunk.len()` is a positive multiple of [`Self::SEGMENT_SIZE`] and at most
  ///   [`Self::MAX_CHUNK_SIZE`].
  unsafe fn accumulate(chunk: &[u8], s1: &mut u32, s2: &mut u32);
}

/// Adler-32 update driven by kernel `K`.
///
/// Returns `adler` unchanged for empty input.
///
/// # Safety
///
/// The CPU must support every capability in `K::REQUIRES`.
#[inline(always)]
pub unsafe fn update<K: ChunkKernel>(adler: u32, data: &[u8]) -> u32 {
  let (mut s1, mut s2) = split(adler);
  if data.is_empty() {
    return adler;
  }

  let lead = data.as_ptr().align_offset(K::ALIGNMENT).min(data.len());
  let (head, rest) = data.split_at(lead);
  accumulate_bytes(head, &mut s1, &mut s2);
  s1 %= DIVISOR;
  s2 %= DIVISOR;

  let body_len = rest.len() / K::SEGMENT_SIZE * K::SEGMENT_SIZE;
  let (body, tail) = rest.split_at(body_len);

  for chunk in body.chunks(K::CHUNK_SIZE) {
    debug_assert!(chunk.len().is_multiple_of(K::SEGMENT_SIZE));
    debug_assert!(chunk.len() <= K::MAX_CHUNK_SIZE);

    s2 = s2.wrapping_add(s1.wrapping_mul(chunk.len() as u32));
    // SAFETY: caller guarantees `K::REQUIRES`; `body` is a whole number of
    // segments and `CHUNK_SIZE` is a segment multiple no larger than
    // `MAX_CHUNK_SIZE`, so every chunk meets the length contract.
    unsafe { K::accumulate(chunk, &mut s1, &mut s2) };
    s1 %= DIVISOR;
    s2 %= DIVISOR;
  }

  accumulate_bytes(tail, &mut s1, &mut s2);
  s1 %= DIVISOR;
  s2 %= DIVISOR;

  join(s1, s2)
}
