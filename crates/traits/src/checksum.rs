//! Non-cryptographic checksum traits.
//!
//! - **Performance**: inline-friendly, no allocation
//! - **Streaming**: incremental updates for data that arrives in pieces
//! - **Parallelism**: combine partial results computed independently

use core::fmt::Debug;

/// Non-cryptographic checksum algorithm.
///
/// # Usage
///
/// ```rust,ignore
/// use checksum::{Adler32, Checksum};
///
/// // One-shot
/// let sum = Adler32::checksum(b"Wikipedia");
/// assert_eq!(sum, 0x11E6_0398);
///
/// // Incremental
/// let mut h = Adler32::new();
/// h.update(b"Wiki");
/// h.update(b"pedia");
/// assert_eq!(h.finalize(), sum);
/// ```
///
/// # Implementor Requirements
///
/// - `new()` must return the same state as `Default::default()`
/// - `finalize()` must be idempotent
/// - `reset()` must restore the initial state
pub trait Checksum: Clone + Default {
  /// Size of the checksum output in bytes.
  const OUTPUT_SIZE: usize;

  /// Checksum value type.
  type Output: Copy + Eq + Debug + Default;

  /// Create a new checksum state with the algorithm's initial value.
  #[must_use]
  fn new() -> Self;

  /// Create a checksum state that continues from a previously finalized value.
  #[must_use]
  fn with_initial(initial: Self::Output) -> Self;

  /// Feed more bytes into the state.
  fn update(&mut self, data: &[u8]);

  /// Feed several buffers in order, as if they were concatenated.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Feed `std::io::IoSlice`s in order.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Return the checksum of everything fed so far.
  ///
  /// Non-consuming: more data may be fed afterwards.
  #[must_use]
  fn finalize(&self) -> Self::Output;

  /// Restore the initial state.
  fn reset(&mut self);

  /// One-shot checksum of `data`.
  #[inline]
  #[must_use]
  fn checksum(data: &[u8]) -> Self::Output {
    let mut h = Self::new();
    h.update(data);
    h.finalize()
  }

  /// One-shot checksum over several buffers.
  #[inline]
  #[must_use]
  fn checksum_vectored(bufs: &[&[u8]]) -> Self::Output {
    let mut h = Self::new();
    h.update_vectored(bufs);
    h.finalize()
  }
}

/// Checksums whose partial results can be merged.
///
/// Given `sum_a = f(A)` and `sum_b = f(B)`, `combine` computes `f(A || B)`
/// without touching the data again. This lets independent workers checksum
/// disjoint pieces of a buffer and merge the results afterwards.
///
/// For Adler-32 the merge is closed-form:
///
/// ```text
/// s1(A || B) = s1(A) + s1(B) - 1                       (mod 65521)
/// s2(A || B) = s2(A) + s2(B) + len(B) * (s1(A) - 1)    (mod 65521)
/// ```
pub trait ChecksumCombine: Checksum {
  /// Combine two checksums.
  ///
  /// * `sum_a` - checksum of the first part (A)
  /// * `sum_b` - checksum of the second part (B)
  /// * `len_b` - length of B in bytes
  #[must_use]
  fn combine(sum_a: Self::Output, sum_b: Self::Output, len_b: usize) -> Self::Output;
}
