//! Bytewise reference implementation of Adler-32.
//!
//! This is the canonical "source of truth": one byte at a time, reduced
//! modulo 65521 after every addition. It mirrors the RFC 1950 definition
//! directly and is const-evaluable, so check values can be asserted at
//! compile time.
//!
//! It is intentionally slow. Use it for:
//! - Test oracles
//! - Generating expected values
//! - Auditing the deferred-reduction kernels

// SAFETY: All indexing uses the bounded loop index `i < data.len()`.
#![allow(clippy::indexing_slicing)]

use crate::params::{DIVISOR, join, split};

/// Bytewise Adler-32 update.
///
/// `adler` is the packed running checksum (`1` for a fresh message).
#[must_use]
pub const fn adler32_bytewise(adler: u32, data: &[u8]) -> u32 {
  let (mut s1, mut s2) = split(adler);
  let mut i: usize = 0;
  while i < data.len() {
    s1 = (s1.strict_add(data[i] as u32)).strict_rem(DIVISOR);
    s2 = (s2.strict_add(s1)).strict_rem(DIVISOR);
    i = i.strict_add(1);
  }
  join(s1, s2)
}

const _: () = assert!(adler32_bytewise(1, b"") == 0x0000_0001);
const _: () = assert!(adler32_bytewise(1, b"Wikipedia") == 0x11E6_0398);
const _: () = assert!(adler32_bytewise(1, b"123456789") == 0x091E_01DE);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_byte_is_one_plus_value_in_both_halves() {
    for v in [0u8, 1, 0x7F, 0xFF] {
      let one_plus = 1 + u32::from(v);
      assert_eq!(adler32_bytewise(1, &[v]), (one_plus << 16) | one_plus);
    }
  }

  #[test]
  fn resume_equals_concatenation() {
    let data = b"The quick brown fox jumps over the lazy dog";
    let (a, b) = data.split_at(17);
    assert_eq!(adler32_bytewise(adler32_bytewise(1, a), b), adler32_bytewise(1, data));
  }

  #[test]
  fn quick_brown_fox() {
    assert_eq!(
      adler32_bytewise(1, b"The quick brown fox jumps over the lazy dog"),
      0x5BDC_0FDA
    );
  }
}
