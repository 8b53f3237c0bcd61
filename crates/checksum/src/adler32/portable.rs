//! Portable Adler-32.
//!
//! Processes the input in blocks of at most [`NMAX`] bytes, summing without
//! reduction inside a block and reducing both sums once per block. The inner
//! loop is unrolled 16 bytes at a time.
//!
//! This is the fallback for every target without an accelerated kernel, for
//! inputs below the SIMD threshold, and for forced `portable` mode.

// SAFETY: All indexing uses `as_chunks::<16>()`, whose chunks are exactly 16 bytes.
#![allow(clippy::indexing_slicing)]

use crate::params::{DIVISOR, NMAX, join, split};

/// Unroll width of the inner loop.
const UNROLL: usize = 16;

// NMAX must not split a 16-byte group so that full blocks stay unrolled.
const _: () = assert!(NMAX.is_multiple_of(UNROLL));

/// Adler-32 update using the portable block algorithm.
#[inline]
#[must_use]
pub fn adler32(adler: u32, data: &[u8]) -> u32 {
  let (mut s1, mut s2) = split(adler);

  for block in data.chunks(NMAX) {
    let (groups, tail) = block.as_chunks::<UNROLL>();

    for g in groups {
      s1 = s1.wrapping_add(u32::from(g[0]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[1]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[2]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[3]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[4]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[5]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[6]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[7]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[8]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[9]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[10]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[11]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[12]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[13]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[14]));
      s2 = s2.wrapping_add(s1);
      s1 = s1.wrapping_add(u32::from(g[15]));
      s2 = s2.wrapping_add(s1);
    }

    for &byte in tail {
      s1 = s1.wrapping_add(u32::from(byte));
      s2 = s2.wrapping_add(s1);
    }

    s1 %= DIVISOR;
    s2 %= DIVISOR;
  }

  join(s1, s2)
}

/// Scalar byte loop without reduction, shared with the SIMD driver's
/// prologue and tail. The caller bounds `data.len()` so the sums cannot wrap.
#[inline(always)]
pub(crate) fn accumulate_bytes(data: &[u8], s1: &mut u32, s2: &mut u32) {
  for &byte in data {
    *s1 = s1.wrapping_add(u32::from(byte));
    *s2 = s2.wrapping_add(*s1);
  }
}
