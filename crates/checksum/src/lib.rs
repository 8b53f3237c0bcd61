//! CPU-adaptive Adler-32 checksums.
//!
//! This crate implements Adler-32 (RFC 1950, the zlib checksum) with SIMD
//! kernels selected at runtime for the widest vector unit the CPU offers.
//!
//! # Hardware Acceleration
//!
//! ## x86_64
//!
//! | Feature | Kernel | Segment |
//! |---------|--------|---------|
//! | AVX-512F + AVX-512BW | `x86_64/avx512bw` | 64 bytes |
//! | AVX2 | `x86_64/avx2` | 32 bytes |
//! | SSE2 (baseline) | `x86_64/sse2` | 32 bytes |
//!
//! Every other target uses the portable 16-way unrolled kernel. Inputs below
//! a small threshold (64 bytes by default) always take the portable path.
//!
//! # Example
//!
//! ```rust
//! use checksum::{Adler32, Checksum, ChecksumCombine};
//!
//! // One-shot computation (fastest for complete data)
//! let data = b"Wikipedia";
//! let adler = Adler32::checksum(data);
//! assert_eq!(adler, 0x11E6_0398);
//!
//! // Streaming computation
//! let mut hasher = Adler32::new();
//! hasher.update(b"Wiki");
//! hasher.update(b"pedia");
//! assert_eq!(hasher.finalize(), adler);
//!
//! // Parallel combine (useful for multi-threaded processing)
//! let (a, b) = data.split_at(4);
//! let combined = Adler32::combine(Adler32::checksum(a), Adler32::checksum(b), b.len());
//! assert_eq!(combined, adler);
//! ```
//!
//! # Configuration
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `RSADLER_ADLER32_FORCE` | `auto`, `portable`, `sse2`, `avx2` or `avx512` (clamped to the CPU) |
//! | `RSADLER_ADLER32_THRESHOLD_PORTABLE_TO_SIMD` | Bytes below which the portable kernel is used |
//! | `RSADLER_FORCE_AVX512` | Trust AVX-512 on Intel hybrid parts |
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the `std` feature for embedded use:
//!
//! ```toml
//! [dependencies]
//! checksum = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod adler32;
pub mod dispatchers;
mod introspect;
pub mod params;

#[cfg(feature = "alloc")]
pub mod bench;

#[cfg(feature = "diag")]
pub mod diag;

#[doc(hidden)]
pub mod __internal {
  #[cfg(feature = "alloc")]
  pub use crate::adler32::kernel_test;
  pub use crate::adler32::{driver::ChunkKernel, reference::adler32_bytewise};
}

// Re-export public types
pub use adler32::{Adler32, Adler32Config, Adler32Force, Adler32Tunables};
pub use introspect::{DispatchInfo, KernelIntrospect, kernel_for};
// Re-export traits for convenience
pub use traits::{Checksum, ChecksumCombine};
