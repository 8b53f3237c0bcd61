//! Kernel names for Adler-32.
//!
//! Introspection, dispatch and the bench lookup all share these identifiers.

/// Portable 16-way unrolled kernel.
pub const PORTABLE: &str = "portable/unroll16";
/// Bytewise reference kernel. Never dispatched; test and bench only.
pub const REFERENCE: &str = "reference";
/// SSE2 kernel.
pub const SSE2: &str = "x86_64/sse2";
/// AVX2 kernel.
pub const AVX2: &str = "x86_64/avx2";
/// AVX-512BW kernel.
pub const AVX512BW: &str = "x86_64/avx512bw";

/// Every kernel name this build can report, reference first.
pub const ALL: &[&str] = &[REFERENCE, PORTABLE, SSE2, AVX2, AVX512BW];

/// Pick between the portable kernel and `simd` by input length.
#[inline]
#[must_use]
pub const fn name_for_len(len: usize, portable_to_simd: usize, simd: &'static str) -> &'static str {
  if len < portable_to_simd { PORTABLE } else { simd }
}
