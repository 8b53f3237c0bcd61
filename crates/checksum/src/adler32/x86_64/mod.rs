//! x86_64 Adler-32 kernels.
//!
//! # Safety
//!
//! Uses `unsafe` for x86 SIMD intrinsics. Callers must ensure the required
//! CPU features are available before executing an accelerated path (the
//! dispatcher does this).

mod avx2;
mod avx512;
mod reduce;
mod sse2;

pub use avx2::adler32_avx2_safe;
pub use avx512::adler32_avx512_safe;
pub use sse2::adler32_sse2_safe;
#[cfg(any(test, feature = "alloc"))]
pub use {avx2::Avx2, avx512::Avx512Bw, sse2::Sse2};

/// Single-chunk entry points for the kernel harness.
#[cfg(any(test, feature = "alloc"))]
pub(crate) mod chunk {
  pub(crate) use super::{
    avx2::accumulate_chunk_safe as avx2, avx512::accumulate_chunk_safe as avx512,
    sse2::accumulate_chunk_safe as sse2,
  };
}
