//! Adler-32 parameters.
//!
//! Adler-32 (RFC 1950) keeps two 16-bit sums modulo the largest prime below
//! 2^16:
//!
//! - `s1 = 1 + Σ bytes`
//! - `s2 = Σ s1` after every byte
//!
//! and packs them as `(s2 << 16) | s1`.

/// Modulus for both sums: the largest prime below 2^16.
pub const DIVISOR: u32 = 65521;

/// Largest `n` such that `n` bytes can be summed into `u32` accumulators
/// without a modular reduction.
///
/// Worst case: every byte is 0xFF and both sums start at `DIVISOR - 1`.
/// Then `s2` grows by `255·n·(n+1)/2 + (n+1)·(DIVISOR-1)`.
pub const NMAX: usize = 5552;

/// Checksum of the empty message (`s1 = 1`, `s2 = 0`).
pub const INITIAL: u32 = 1;

/// Worst-case `s2` after `n` bytes, widened so the bound itself cannot overflow.
const fn worst_case_s2(n: u64) -> u64 {
  255 * n * (n + 1) / 2 + (n + 1) * (DIVISOR as u64 - 1)
}

const _: () = assert!(worst_case_s2(NMAX as u64) <= u32::MAX as u64);
const _: () = assert!(worst_case_s2(NMAX as u64 + 1) > u32::MAX as u64);

/// Split a packed checksum into `(s1, s2)`.
#[inline(always)]
#[must_use]
pub const fn split(adler: u32) -> (u32, u32) {
  (adler & 0xFFFF, adler >> 16)
}

/// Pack reduced sums back into a checksum.
#[inline(always)]
#[must_use]
pub const fn join(s1: u32, s2: u32) -> u32 {
  (s2 << 16) | s1
}
