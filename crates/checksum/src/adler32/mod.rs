//! Adler-32 (RFC 1950) with CPU-adaptive SIMD kernels.
//!
//! This module provides:
//! - [`Adler32`] - streaming/one-shot Adler-32 with O(1) combine
//!
//! # Kernel Selection
//!
//! | Kernel | Requires | Segment | Max chunk |
//! |--------|----------|---------|-----------|
//! | `x86_64/avx512bw` | AVX-512F + AVX-512BW | 64 | 5504 |
//! | `x86_64/avx2` | AVX2 | 32 | 5536 |
//! | `x86_64/sse2` | SSE2 | 32 | 4096 |
//! | `portable/unroll16` | - | - | 5552 |
//!
//! The widest kernel the CPU supports is bound on first use. Inputs shorter
//! than [`Adler32Tunables::portable_to_simd`] always take the portable path.
//! Builds with `target_feature = "avx512bw"` call the AVX-512BW kernel
//! directly, without detection or configuration.
//!
//! # Quick Start
//!
//! ```rust
//! use checksum::{Adler32, Checksum, ChecksumCombine};
//!
//! let data = b"Wikipedia";
//! assert_eq!(Adler32::checksum(data), 0x11E6_0398);
//!
//! let (a, b) = data.split_at(4);
//! let combined = Adler32::combine(Adler32::checksum(a), Adler32::checksum(b), b.len());
//! assert_eq!(combined, Adler32::checksum(data));
//! ```

pub(crate) mod combine;
pub mod config;
pub(crate) mod driver;
pub mod kernels;
pub(crate) mod portable;
pub(crate) mod reference;
#[cfg(target_arch = "x86_64")]
pub(crate) mod x86_64;

#[cfg(feature = "alloc")]
#[doc(hidden)]
pub mod kernel_test;

use backend::{OnceCache, dispatch::Selected};
#[allow(unused_imports)]
pub use config::{Adler32Config, Adler32Force, Adler32Tunables};
use platform::Caps;
// Also reaches test modules through `use super::*`.
pub(super) use traits::{Checksum, ChecksumCombine};

use crate::{
  dispatchers::{Adler32Dispatcher, Adler32Fn},
  params::INITIAL,
};

// ─────────────────────────────────────────────────────────────────────────────
// Capability Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Runtime capabilities plus everything the build already guarantees.
#[inline]
#[must_use]
pub(crate) fn effective_caps() -> Caps {
  platform::caps().union(platform::detect::caps_static())
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher Selection
// ─────────────────────────────────────────────────────────────────────────────

/// Pick the widest accelerated kernel `caps` allows.
///
/// Pure function of `caps`. Returns `None` when no accelerated kernel
/// qualifies, including on every non-x86_64 target.
///
/// ```rust
/// use checksum::adler32::select_kernel;
/// use platform::Caps;
///
/// assert!(select_kernel(Caps::NONE).is_none());
/// ```
#[must_use]
#[allow(unused_variables)] // `caps` only used on x86_64
pub fn select_kernel(caps: Caps) -> Option<Selected<Adler32Fn>> {
  #[cfg(target_arch = "x86_64")]
  {
    use platform::caps::x86;

    let list: &[backend::Candidate<Adler32Fn>] = backend::candidates![
      kernels::AVX512BW => x86::AVX512BW_READY => x86_64::adler32_avx512_safe,
      kernels::AVX2 => x86::AVX2_READY => x86_64::adler32_avx2_safe,
      kernels::SSE2 => x86::SSE2 => x86_64::adler32_sse2_safe,
    ];
    backend::select(caps, list)
  }

  #[cfg(not(target_arch = "x86_64"))]
  {
    None
  }
}

/// The portable kernel as a [`Selected`].
#[inline]
#[must_use]
fn portable_selected() -> Selected<Adler32Fn> {
  Selected::new(kernels::PORTABLE, portable::adler32)
}

/// Map a (clamped) force mode to the kernel it names.
fn forced_kernel(force: Adler32Force) -> Option<Selected<Adler32Fn>> {
  match force {
    Adler32Force::Auto => None,
    Adler32Force::Portable => Some(portable_selected()),
    #[cfg(target_arch = "x86_64")]
    Adler32Force::Sse2 => Some(Selected::new(kernels::SSE2, x86_64::adler32_sse2_safe)),
    #[cfg(target_arch = "x86_64")]
    Adler32Force::Avx2 => Some(Selected::new(kernels::AVX2, x86_64::adler32_avx2_safe)),
    #[cfg(target_arch = "x86_64")]
    Adler32Force::Avx512 => Some(Selected::new(kernels::AVX512BW, x86_64::adler32_avx512_safe)),
    #[cfg(not(target_arch = "x86_64"))]
    _ => None,
  }
}

/// Resolve the kernel for `caps` under `cfg`.
fn select_with(caps: Caps, cfg: Adler32Config) -> Selected<Adler32Fn> {
  forced_kernel(cfg.effective_force)
    .or_else(|| select_kernel(caps))
    .unwrap_or_else(portable_selected)
}

/// The kernel the runtime dispatcher binds for this process.
///
/// Honors `RSADLER_ADLER32_FORCE` (clamped to the detected capabilities)
/// and falls back to the portable kernel when nothing accelerated qualifies.
#[must_use]
pub fn selected_backend() -> Selected<Adler32Fn> {
  let caps = effective_caps();
  select_with(caps, config::config(caps))
}

static ADLER32_DISPATCHER: Adler32Dispatcher = Adler32Dispatcher::new(selected_backend);

static PORTABLE_TO_SIMD: OnceCache<usize> = OnceCache::new();

#[inline]
#[must_use]
fn portable_to_simd() -> usize {
  PORTABLE_TO_SIMD.get_or_init(|| config::get().tunables.portable_to_simd)
}

// ─────────────────────────────────────────────────────────────────────────────
// Update Entry Point
// ─────────────────────────────────────────────────────────────────────────────

/// Adler-32 update through the selected kernel.
#[cfg(all(target_arch = "x86_64", target_feature = "avx512bw"))]
#[inline]
fn adler32_update(adler: u32, data: &[u8]) -> u32 {
  x86_64::adler32_avx512_safe(adler, data)
}

/// Adler-32 update through the selected kernel.
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx512bw")))]
#[inline]
fn adler32_update(adler: u32, data: &[u8]) -> u32 {
  if data.len() < portable_to_simd() {
    return portable::adler32(adler, data);
  }
  ADLER32_DISPATCHER.call(adler, data)
}

// ─────────────────────────────────────────────────────────────────────────────
// Introspection
// ─────────────────────────────────────────────────────────────────────────────

/// Kernel name the selector would use for an input of `len` bytes.
#[must_use]
pub fn kernel_name_for_len(len: usize) -> &'static str {
  if cfg!(all(target_arch = "x86_64", target_feature = "avx512bw")) {
    return kernels::AVX512BW;
  }
  kernels::name_for_len(len, portable_to_simd(), ADLER32_DISPATCHER.backend_name())
}

// ─────────────────────────────────────────────────────────────────────────────
// Adler-32 Type
// ─────────────────────────────────────────────────────────────────────────────

/// Adler-32 checksum.
///
/// Used by zlib (RFC 1950) as the trailer of every deflate stream.
///
/// # Properties
///
/// - **Modulus**: 65521
/// - **Initial value**: 0x0000_0001
/// - **Output**: `(s2 << 16) | s1`
///
/// # Examples
///
/// ```rust
/// use checksum::{Adler32, Checksum};
///
/// let mut hasher = Adler32::new();
/// hasher.update(b"Wiki");
/// hasher.update(b"pedia");
/// assert_eq!(hasher.finalize(), 0x11E6_0398);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Adler32 {
  state: u32,
}

impl Adler32 {
  /// Create a hasher to resume from a previous checksum.
  #[inline]
  #[must_use]
  pub const fn resume(adler: u32) -> Self {
    Self { state: adler }
  }

  /// Get the name of the currently selected backend.
  #[must_use]
  pub fn backend_name() -> &'static str {
    if cfg!(all(target_arch = "x86_64", target_feature = "avx512bw")) {
      return kernels::AVX512BW;
    }
    ADLER32_DISPATCHER.backend_name()
  }

  /// Get the effective Adler-32 configuration.
  #[must_use]
  pub fn config() -> Adler32Config {
    config::get()
  }

  /// Convenience accessor for the active Adler-32 tunables.
  #[must_use]
  pub fn tunables() -> Adler32Tunables {
    Self::config().tunables
  }

  /// Returns the kernel name that the selector would choose for `len`.
  #[must_use]
  pub fn kernel_name_for_len(len: usize) -> &'static str {
    kernel_name_for_len(len)
  }
}

impl Checksum for Adler32 {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Self { state: INITIAL }
  }

  #[inline]
  fn with_initial(initial: u32) -> Self {
    Self { state: initial }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.state = adler32_update(self.state, data);
  }

  #[inline]
  fn finalize(&self) -> u32 {
    self.state
  }

  #[inline]
  fn reset(&mut self) {
    self.state = INITIAL;
  }
}

impl Default for Adler32 {
  fn default() -> Self {
    <Self as Checksum>::new()
  }
}

impl ChecksumCombine for Adler32 {
  fn combine(adler_a: u32, adler_b: u32, len_b: usize) -> u32 {
    combine::combine_adler32(adler_a, adler_b, len_b)
  }
}

// Proptest uses file I/O for failure persistence that Miri cannot interpret.
#[cfg(all(test, feature = "alloc", not(miri)))]
mod proptests;
