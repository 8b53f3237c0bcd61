//! Kernel testing utilities for Adler-32.
//!
//! This module provides functions to run ALL available Adler-32 kernels on
//! the current platform and return their results. Used by fuzz targets and
//! tests to verify cross-kernel equivalence.
//!
//! # Design
//!
//! The oracle is the bytewise reference implementation, which reduces after
//! every byte and is correct by inspection. Every production kernel must
//! produce identical results to the reference for any input and any starting
//! state.

use alloc::{format, string::String, vec::Vec};

use backend::dispatch::Selected;

use super::{kernels, portable, reference::adler32_bytewise};
use crate::{
  dispatchers::Adler32Fn,
  params::{DIVISOR, join, split},
};

/// Result from running a kernel.
#[derive(Debug, Clone, Copy)]
pub struct KernelResult {
  /// Kernel name (e.g., "reference", "portable/unroll16", "x86_64/avx2")
  pub name: &'static str,
  /// Finalized checksum value
  pub checksum: u32,
}

/// Every production kernel this CPU can run, best first, portable last.
///
/// Each entry can be called directly, which forces that kernel regardless of
/// the dispatcher's choice or the portable threshold.
#[must_use]
pub fn forced_kernels() -> Vec<Selected<Adler32Fn>> {
  let mut out = Vec::new();

  #[cfg(target_arch = "x86_64")]
  {
    use platform::caps::x86;

    use super::x86_64::*;

    let caps = super::effective_caps();
    if caps.has(x86::AVX512BW_READY) {
      out.push(Selected::new(kernels::AVX512BW, adler32_avx512_safe as Adler32Fn));
    }
    if caps.has(x86::AVX2_READY) {
      out.push(Selected::new(kernels::AVX2, adler32_avx2_safe as Adler32Fn));
    }
    if caps.has(x86::SSE2) {
      out.push(Selected::new(kernels::SSE2, adler32_sse2_safe as Adler32Fn));
    }
  }

  out.push(Selected::new(kernels::PORTABLE, portable::adler32 as Adler32Fn));
  out
}

/// Run all available Adler-32 kernels from a fresh state.
///
/// The first entry is always the bytewise reference.
#[must_use]
pub fn run_all_adler32_kernels(data: &[u8]) -> Vec<KernelResult> {
  run_all_adler32_kernels_from(crate::params::INITIAL, data)
}

/// Run all available Adler-32 kernels starting from `adler`.
#[must_use]
pub fn run_all_adler32_kernels_from(adler: u32, data: &[u8]) -> Vec<KernelResult> {
  let mut results = Vec::new();

  // Oracle: bytewise reference
  results.push(KernelResult {
    name: kernels::REFERENCE,
    checksum: adler32_bytewise(adler, data),
  });

  for kernel in forced_kernels() {
    results.push(KernelResult {
      name: kernel.name,
      checksum: (kernel.func)(adler, data),
    });
  }

  results
}

/// Verify all Adler-32 kernels produce the same result.
///
/// Returns `Ok(checksum)` if all agree, or `Err` with details of the first
/// mismatch.
pub fn verify_adler32_kernels(data: &[u8]) -> Result<u32, String> {
  verify_kernel_agreement(&run_all_adler32_kernels(data))
}

/// Verify all Adler-32 kernels agree when resuming from `adler`.
///
/// `adler` is reduced into a valid state first, so arbitrary fuzz input is
/// accepted.
pub fn verify_adler32_kernels_from(adler: u32, data: &[u8]) -> Result<u32, String> {
  let (s1, s2) = split(adler);
  let adler = join(s1 % DIVISOR, s2 % DIVISOR);
  verify_kernel_agreement(&run_all_adler32_kernels_from(adler, data))
}

fn verify_kernel_agreement(results: &[KernelResult]) -> Result<u32, String> {
  let first = results.first().ok_or_else(|| String::from("no kernels available"))?;
  let expected = first.checksum;

  for result in results.iter().skip(1) {
    if result.checksum != expected {
      return Err(format!(
        "kernel mismatch: {} produced 0x{:08X}, but {} produced 0x{:08X}",
        first.name, expected, result.name, result.checksum
      ));
    }
  }

  Ok(expected)
}

// ─────────────────────────────────────────────────────────────────────────────
// Single-chunk harness
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of one raw `accumulate` call.
#[derive(Debug, Clone, Copy)]
pub struct ChunkResult {
  /// Kernel name.
  pub name: &'static str,
  /// Chunk length handed to the kernel.
  pub len: usize,
  /// Checksum after `accumulate` plus the driver's reduction.
  pub checksum: u32,
  /// Bytewise reference over the same chunk from the same state.
  pub expected: u32,
}

/// Run one legal chunk through every accelerated kernel's `accumulate`.
///
/// Each kernel gets the longest prefix of `data` that satisfies its length
/// contract; kernels for which that prefix is empty are skipped. `adler` is
/// reduced into a valid state first.
#[must_use]
#[allow(unused_variables)] // only x86_64 has accelerated kernels
pub fn run_chunk_kernels(adler: u32, data: &[u8]) -> Vec<ChunkResult> {
  #[allow(unused_mut)]
  let mut out = Vec::new();

  #[cfg(target_arch = "x86_64")]
  {
    use platform::caps::x86;

    use super::{
      driver::ChunkKernel,
      x86_64::{Avx2, Avx512Bw, Sse2, chunk},
    };

    let caps = super::effective_caps();
    let (s1, s2) = split(adler);
    let (s1, s2) = (s1 % DIVISOR, s2 % DIVISOR);

    let mut run = |name: &'static str, segment: usize, max: usize, f: fn(&[u8], &mut u32, &mut u32)| {
      let len = data.len().min(max) / segment * segment;
      let Some(chunk) = data.get(..len).filter(|c| !c.is_empty()) else {
        return;
      };
      let (mut a, mut b) = (s1, s2.wrapping_add(s1.wrapping_mul(len as u32)));
      f(chunk, &mut a, &mut b);
      out.push(ChunkResult {
        name,
        len,
        checksum: join(a % DIVISOR, b % DIVISOR),
        expected: adler32_bytewise(join(s1, s2), chunk),
      });
    };

    if caps.has(Sse2::REQUIRES) {
      run(Sse2::NAME, Sse2::SEGMENT_SIZE, Sse2::MAX_CHUNK_SIZE, chunk::sse2);
    }
    if caps.has(x86::AVX2_READY) {
      run(Avx2::NAME, Avx2::SEGMENT_SIZE, Avx2::MAX_CHUNK_SIZE, chunk::avx2);
    }
    if caps.has(x86::AVX512BW_READY) {
      run(Avx512Bw::NAME, Avx512Bw::SEGMENT_SIZE, Avx512Bw::MAX_CHUNK_SIZE, chunk::avx512);
    }
  }

  out
}

/// Verify every raw chunk result against the reference.
pub fn verify_chunk_kernels(adler: u32, data: &[u8]) -> Result<(), String> {
  for r in run_chunk_kernels(adler, data) {
    if r.checksum != r.expected {
      return Err(format!(
        "chunk mismatch: {} over {} bytes produced 0x{:08X}, reference 0x{:08X}",
        r.name, r.len, r.checksum, r.expected
      ));
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_all_kernels_agree_empty() {
    assert_eq!(verify_adler32_kernels(&[]), Ok(1));
  }

  #[test]
  fn test_all_kernels_agree_small() {
    assert_eq!(verify_adler32_kernels(b"Wikipedia"), Ok(0x11E6_0398));
  }

  #[test]
  fn test_all_kernels_agree_medium() {
    let data: Vec<u8> = (0..1024).map(|i| (i as u8).wrapping_mul(17)).collect();
    verify_adler32_kernels(&data).expect("kernels should agree on medium input");
  }

  #[test]
  fn test_all_kernels_agree_large() {
    let data: Vec<u8> = (0..65536).map(|i| (i as u8).wrapping_mul(31)).collect();
    verify_adler32_kernels(&data).expect("kernels should agree on large input");
  }

  #[test]
  fn test_all_kernels_agree_from_worst_state() {
    let data = alloc::vec![0xFFu8; 3 * crate::params::NMAX + 17];
    verify_adler32_kernels_from(join(DIVISOR - 1, DIVISOR - 1), &data)
      .expect("kernels should agree from the worst-case state");
  }

  #[test]
  fn test_reference_is_first() {
    let results = run_all_adler32_kernels(b"abc");
    assert_eq!(results[0].name, kernels::REFERENCE);
    assert!(results.iter().any(|r| r.name == kernels::PORTABLE));
  }

  #[test]
  fn test_forced_kernels_end_with_portable() {
    let list = forced_kernels();
    assert_eq!(list.last().map(|s| s.name), Some(kernels::PORTABLE));
  }

  #[test]
  fn test_chunk_kernels_at_max_size() {
    let data = alloc::vec![0xFFu8; 8192];
    verify_chunk_kernels(join(DIVISOR - 1, DIVISOR - 1), &data).expect("raw chunks should match reference");
    for r in run_chunk_kernels(1, &data) {
      assert!(r.len <= crate::params::NMAX, "{}", r.name);
    }
  }

  #[test]
  fn test_chunk_kernels_skip_short_input() {
    assert!(run_chunk_kernels(1, &[0u8; 31]).is_empty());
  }

  #[test]
  fn test_mismatch_message() {
    let results = [
      KernelResult {
        name: "reference",
        checksum: 1,
      },
      KernelResult {
        name: "broken",
        checksum: 2,
      },
    ];
    let err = verify_kernel_agreement(&results).unwrap_err();
    assert!(err.contains("broken"));
    assert!(err.contains("0x00000002"));
  }
}
