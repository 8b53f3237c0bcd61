//! Dispatcher types for checksum kernels.
//!
//! Each dispatcher caches kernel selection for efficient repeated calls.
//!
//! # Usage
//!
//! ```
//! use backend::dispatch::Selected;
//! use checksum::dispatchers::{Adler32Dispatcher, Adler32Fn};
//!
//! fn scalar(adler: u32, data: &[u8]) -> u32 {
//!   let (mut a, mut b) = (adler & 0xFFFF, adler >> 16);
//!   for &byte in data {
//!     a = (a + u32::from(byte)) % 65521;
//!     b = (b + a) % 65521;
//!   }
//!   (b << 16) | a
//! }
//!
//! fn choose() -> Selected<Adler32Fn> {
//!   Selected::new("scalar", scalar)
//! }
//!
//! static DISPATCHER: Adler32Dispatcher = Adler32Dispatcher::new(choose);
//! assert_eq!(DISPATCHER.call(1, b"Wikipedia"), 0x11E6_0398);
//! ```

use backend::dispatch::{Dispatcher, Selected};

/// Function signature for Adler-32 kernels.
///
/// # Arguments
///
/// * `adler` - Current packed checksum (`1` for a fresh message)
/// * `data` - Input data to process
///
/// # Returns
///
/// Updated packed checksum with both sums reduced modulo 65521.
pub type Adler32Fn = fn(u32, &[u8]) -> u32;

/// Dispatcher for Adler-32 kernels.
///
/// Caches the selected kernel on first access. Thread-safe.
pub struct Adler32Dispatcher {
  inner: Dispatcher<Adler32Fn>,
}

impl Adler32Dispatcher {
  /// Create a new dispatcher with the given selector function.
  #[must_use]
  pub const fn new(selector: fn() -> Selected<Adler32Fn>) -> Self {
    Self {
      inner: Dispatcher::new(selector),
    }
  }

  /// Get the selected kernel, initializing on first call.
  #[inline]
  #[must_use]
  pub fn get(&self) -> Selected<Adler32Fn> {
    self.inner.get()
  }

  /// Get the selected kernel function.
  #[inline]
  #[must_use]
  pub fn kernel(&self) -> Adler32Fn {
    self.get().func
  }

  /// Get the name of the selected backend.
  #[inline]
  #[must_use]
  pub fn backend_name(&self) -> &'static str {
    self.inner.backend_name()
  }

  /// Call the selected kernel.
  #[inline]
  #[must_use]
  pub fn call(&self, adler: u32, data: &[u8]) -> u32 {
    (self.kernel())(adler, data)
  }
}
