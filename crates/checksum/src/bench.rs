//! Kernel lookup by name for benchmarks.
//!
//! This module exposes kernel function pointers by name, allowing benches to
//! measure a specific kernel without going through the cached dispatcher or
//! the portable threshold.

use alloc::vec::Vec;

use crate::{adler32::kernels, dispatchers::Adler32Fn};

/// Adler-32 kernel lookup result.
#[derive(Clone, Copy)]
pub struct Adler32Kernel {
  /// Kernel name.
  pub name: &'static str,
  /// Kernel function pointer.
  pub func: Adler32Fn,
}

/// Get all Adler-32 kernel names runnable on the current platform.
///
/// `"reference"` comes first, then portable, then accelerated kernels from
/// narrowest to widest.
#[must_use]
pub fn available_adler32_kernels() -> Vec<&'static str> {
  let mut names = Vec::new();

  // Always available
  names.push(kernels::REFERENCE);
  names.push(kernels::PORTABLE);

  #[cfg(target_arch = "x86_64")]
  {
    use platform::caps::x86;
    let caps = crate::adler32::effective_caps();

    if caps.has(x86::SSE2) {
      names.push(kernels::SSE2);
    }
    if caps.has(x86::AVX2_READY) {
      names.push(kernels::AVX2);
    }
    if caps.has(x86::AVX512BW_READY) {
      names.push(kernels::AVX512BW);
    }
  }

  names
}

/// Get an Adler-32 kernel function by name.
///
/// Returns `None` for unknown names and for kernels this CPU cannot run.
#[must_use]
pub fn get_adler32_kernel(name: &str) -> Option<Adler32Kernel> {
  // Reference kernel
  if name == kernels::REFERENCE || name == "reference/bytewise" {
    fn reference(adler: u32, data: &[u8]) -> u32 {
      crate::adler32::reference::adler32_bytewise(adler, data)
    }
    return Some(Adler32Kernel {
      name: kernels::REFERENCE,
      func: reference,
    });
  }

  // Portable kernel
  if name == "portable" || name == kernels::PORTABLE {
    return Some(Adler32Kernel {
      name: kernels::PORTABLE,
      func: crate::adler32::portable::adler32,
    });
  }

  // Architecture-specific kernels
  #[cfg(target_arch = "x86_64")]
  {
    if let Some(k) = get_x86_64_adler32_kernel(name) {
      return Some(k);
    }
  }

  None
}

#[cfg(target_arch = "x86_64")]
fn get_x86_64_adler32_kernel(name: &str) -> Option<Adler32Kernel> {
  use platform::caps::x86;

  use crate::adler32::x86_64::*;

  let caps = crate::adler32::effective_caps();
  let (name, requires, func): (&'static str, _, Adler32Fn) = match name {
    "sse2" | kernels::SSE2 => (kernels::SSE2, x86::SSE2, adler32_sse2_safe),
    "avx2" | kernels::AVX2 => (kernels::AVX2, x86::AVX2_READY, adler32_avx2_safe),
    "avx512" | "avx512bw" | kernels::AVX512BW => (kernels::AVX512BW, x86::AVX512BW_READY, adler32_avx512_safe),
    _ => return None,
  };

  caps.has(requires).then_some(Adler32Kernel { name, func })
}
