//! Which Adler-32 kernel runs here, and why.
//!
//! Nothing in this module is on the hot path. Every query reads state the
//! dispatcher has already cached.
//!
//! ```
//! use checksum::{Adler32, DispatchInfo, kernel_for};
//!
//! println!("{}", DispatchInfo::current());
//! println!("4 KiB buffers use {}", kernel_for::<Adler32>(4096));
//! ```

use core::fmt;

use crate::Adler32;

/// Detected platform plus the kernel the dispatcher bound.
///
/// `Display` prints both on one line, e.g.
/// `Caps(x86_64, [sse2, ..., avx2]) adler32=x86_64/avx2`.
#[derive(Clone, Copy)]
pub struct DispatchInfo {
  platform: platform::Description,
  adler32: &'static str,
}

impl DispatchInfo {
  /// Snapshot for this process. Triggers detection if nothing has yet.
  #[must_use]
  pub fn current() -> Self {
    Self {
      platform: platform::describe(),
      adler32: Adler32::backend_name(),
    }
  }

  #[inline]
  #[must_use]
  pub fn platform(&self) -> platform::Description {
    self.platform
  }

  /// Kernel used for inputs at or above the portable threshold.
  #[inline]
  #[must_use]
  pub fn adler32_backend(&self) -> &'static str {
    self.adler32
  }

  /// Kernel used for a buffer of `len` bytes.
  #[inline]
  #[must_use]
  pub fn adler32_for_len(&self, len: usize) -> &'static str {
    Adler32::kernel_name_for_len(len)
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} adler32={}", self.platform, self.adler32)
  }
}

impl fmt::Debug for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchInfo")
      .field("platform", &self.platform)
      .field("adler32", &self.adler32)
      .finish()
  }
}

/// Checksum types that can report their kernel choice.
pub trait KernelIntrospect {
  /// Kernel for a `len`-byte buffer, e.g. `"portable/unroll16"` below the
  /// SIMD threshold and `"x86_64/avx2"` above it.
  fn kernel_name_for_len(len: usize) -> &'static str;

  /// Kernel the dispatcher bound for this process.
  fn backend_name() -> &'static str;
}

impl KernelIntrospect for Adler32 {
  #[inline]
  fn kernel_name_for_len(len: usize) -> &'static str {
    Adler32::kernel_name_for_len(len)
  }

  #[inline]
  fn backend_name() -> &'static str {
    Adler32::backend_name()
  }
}

/// `T::kernel_name_for_len(len)`, usable without naming the trait.
///
/// ```
/// use checksum::{Adler32, kernel_for};
///
/// let small = kernel_for::<Adler32>(8);
/// let large = kernel_for::<Adler32>(1 << 16);
/// assert!(checksum::adler32::kernels::ALL.contains(&small));
/// assert!(checksum::adler32::kernels::ALL.contains(&large));
/// ```
#[inline]
#[must_use]
pub fn kernel_for<T: KernelIntrospect>(len: usize) -> &'static str {
  T::kernel_name_for_len(len)
}
