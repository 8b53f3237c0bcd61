//! Optional diagnostics for kernel selection.
//!
//! This module is behind `cfg(feature = "diag")` and is intended for
//! explainable/debuggable kernel selection without affecting normal builds.

use crate::adler32::{self, Adler32Config, Adler32Force};

/// High-level reason for a selection outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionReason {
  /// The build enables AVX-512BW; the wide kernel is called unconditionally.
  CompileTime,
  /// A forced mode was active (kernel selection bypassed normal thresholds).
  Forced,
  /// Below the portable→SIMD transition threshold.
  BelowSimdThreshold,
  /// Normal auto selection.
  Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adler32SelectionDiag {
  pub len: usize,
  pub reason: SelectionReason,
  pub requested_force: Adler32Force,
  pub effective_force: Adler32Force,
  pub selected_kernel: &'static str,
  pub portable_to_simd: usize,
  pub has_sse2: bool,
  pub has_avx2: bool,
  pub has_avx512bw: bool,
}

/// Diagnose Adler-32 selection for `len`.
#[must_use]
pub fn adler32(len: usize) -> Adler32SelectionDiag {
  let caps = adler32::effective_caps();
  let cfg = adler32::config::config(caps);

  #[cfg(target_arch = "x86_64")]
  let (has_sse2, has_avx2, has_avx512bw) = {
    use platform::caps::x86;
    (
      caps.has(x86::SSE2),
      caps.has(x86::AVX2_READY),
      caps.has(x86::AVX512BW_READY),
    )
  };
  #[cfg(not(target_arch = "x86_64"))]
  let (has_sse2, has_avx2, has_avx512bw) = (false, false, false);

  Adler32SelectionDiag {
    len,
    reason: reason_for(len, &cfg),
    requested_force: cfg.requested_force,
    effective_force: cfg.effective_force,
    selected_kernel: adler32::kernel_name_for_len(len),
    portable_to_simd: cfg.tunables.portable_to_simd,
    has_sse2,
    has_avx2,
    has_avx512bw,
  }
}

fn reason_for(len: usize, cfg: &Adler32Config) -> SelectionReason {
  if cfg!(all(target_arch = "x86_64", target_feature = "avx512bw")) {
    SelectionReason::CompileTime
  } else if cfg.effective_force != Adler32Force::Auto {
    SelectionReason::Forced
  } else if len < cfg.tunables.portable_to_simd {
    SelectionReason::BelowSimdThreshold
  } else {
    SelectionReason::Auto
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn diag_matches_introspection() {
    for len in [0usize, 1, 63, 64, 65, 4096] {
      let d = adler32(len);
      assert_eq!(d.len, len);
      assert_eq!(d.selected_kernel, crate::Adler32::kernel_name_for_len(len));
    }
  }

  #[cfg(target_arch = "x86_64")]
  #[test]
  fn sse2_is_baseline() {
    assert!(adler32(1024).has_sse2);
  }

  #[test]
  fn flags_follow_effective_caps() {
    let d = adler32(1024);
    let caps = adler32::effective_caps();
    #[cfg(target_arch = "x86_64")]
    {
      use platform::caps::x86;
      assert_eq!(d.has_avx2, caps.has(x86::AVX2_READY));
      assert_eq!(d.has_avx512bw, caps.has(x86::AVX512BW_READY));
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
      let _ = caps;
      assert!(!d.has_sse2 && !d.has_avx2 && !d.has_avx512bw);
    }
  }

  #[cfg(not(all(target_arch = "x86_64", target_feature = "avx512bw")))]
  mod reasons {
    use platform::Caps;

    use super::*;
    use crate::adler32::config::{Overrides, resolve};

    fn reason(len: usize, force: Adler32Force, portable_to_simd: Option<usize>) -> SelectionReason {
      let cfg = resolve(Caps::NONE, Overrides { force, portable_to_simd });
      reason_for(len, &cfg)
    }

    #[test]
    fn portable_force_is_forced_at_every_length() {
      for len in [0usize, 1, 63, 1 << 20] {
        assert_eq!(reason(len, Adler32Force::Portable, Some(4096)), SelectionReason::Forced);
      }
    }

    #[test]
    fn threshold_splits_auto_selection() {
      assert_eq!(reason(0, Adler32Force::Auto, Some(64)), SelectionReason::BelowSimdThreshold);
      assert_eq!(reason(63, Adler32Force::Auto, Some(64)), SelectionReason::BelowSimdThreshold);
      assert_eq!(reason(64, Adler32Force::Auto, Some(64)), SelectionReason::Auto);
      assert_eq!(reason(0, Adler32Force::Auto, Some(0)), SelectionReason::Auto);
    }

    #[test]
    fn unsupported_force_falls_back_to_auto() {
      // Without caps an AVX-512 request clamps to auto, which keeps the threshold.
      assert_eq!(reason(8, Adler32Force::Avx512, Some(64)), SelectionReason::BelowSimdThreshold);
      assert_eq!(reason(128, Adler32Force::Avx512, Some(64)), SelectionReason::Auto);
    }
  }

  #[cfg(all(target_arch = "x86_64", target_feature = "avx512bw"))]
  #[test]
  fn compile_time_build_ignores_overrides() {
    use platform::Caps;

    use crate::adler32::config::{Overrides, resolve};

    for force in [Adler32Force::Auto, Adler32Force::Portable] {
      let cfg = resolve(Caps::NONE, Overrides { force, portable_to_simd: Some(64) });
      assert_eq!(reason_for(0, &cfg), SelectionReason::CompileTime);
    }
  }
}
