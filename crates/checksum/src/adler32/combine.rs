//! Adler-32 combine.
//!
//! Given `adler(A)`, `adler(B)` and `len(B)`, computes `adler(A ‖ B)` in O(1):
//!
//! - `s1 = s1(A) + s1(B) - 1`
//! - `s2 = s2(A) + s2(B) + len(B) · s1(A) - len(B)`
//!
//! all modulo 65521. `len(B)` only matters modulo 65521.

use crate::params::{DIVISOR, join, split};

/// Combine two Adler-32 checksums.
#[inline]
#[must_use]
pub const fn combine_adler32(adler_a: u32, adler_b: u32, len_b: usize) -> u32 {
  const BASE: u64 = DIVISOR as u64;

  let rem = (len_b as u64) % BASE;
  let (a1, b1) = split(adler_a);
  let (a2, b2) = split(adler_b);
  let (a1, b1, a2, b2) = (a1 as u64 % BASE, b1 as u64 % BASE, a2 as u64 % BASE, b2 as u64 % BASE);

  // `+ BASE` keeps the subtraction of the second message's leading 1 non-negative.
  let s1 = (a1 + a2 + BASE - 1) % BASE;
  let s2 = (b1 + b2 + rem * a1 + BASE - rem) % BASE;

  join(s1 as u32, s2 as u32)
}
