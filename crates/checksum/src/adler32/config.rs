//! Adler-32 runtime configuration (overrides + thresholds).
//!
//! This module centralizes the selection knobs for Adler-32:
//! - the length below which the portable kernel beats SIMD setup cost
//! - optional forced kernel selection
//!
//! Safety note: forced modes are always clamped to detected CPU capabilities.
//! A forced kernel the CPU cannot run falls back to `Auto`.

use platform::Caps;

/// Default crossover from the portable kernel to SIMD, in bytes.
pub const DEFAULT_PORTABLE_TO_SIMD: usize = 64;

/// Forced kernel selection for Adler-32.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Adler32Force {
  /// Use the default auto selector.
  #[default]
  Auto,
  /// Force the portable unrolled implementation.
  Portable,
  /// Force the SSE2 kernel (x86_64).
  Sse2,
  /// Force the AVX2 kernel (x86_64, if available).
  Avx2,
  /// Force the AVX-512BW kernel (x86_64, if available).
  Avx512,
}

impl Adler32Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Sse2 => "sse2",
      Self::Avx2 => "avx2",
      Self::Avx512 => "avx512",
    }
  }

  /// Parse a force mode name. Case-insensitive, surrounding whitespace ignored.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable") || value.eq_ignore_ascii_case("scalar") {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("sse2") {
      return Some(Self::Sse2);
    }
    if value.eq_ignore_ascii_case("avx2") {
      return Some(Self::Avx2);
    }
    if value.eq_ignore_ascii_case("avx512")
      || value.eq_ignore_ascii_case("avx512bw")
      || value.eq_ignore_ascii_case("avx-512")
    {
      return Some(Self::Avx512);
    }
    None
  }
}

/// Adler-32 selection tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adler32Tunables {
  /// Inputs shorter than this many bytes use the portable kernel.
  pub portable_to_simd: usize,
}

impl Default for Adler32Tunables {
  fn default() -> Self {
    Self {
      portable_to_simd: DEFAULT_PORTABLE_TO_SIMD,
    }
  }
}

/// Full Adler-32 runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adler32Config {
  /// Requested force mode (env/programmatic).
  pub requested_force: Adler32Force,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: Adler32Force,
  /// Thresholds used by the selector.
  pub tunables: Adler32Tunables,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
  pub(crate) force: Adler32Force,
  pub(crate) portable_to_simd: Option<usize>,
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn var(name: &str) -> Option<std::string::String> {
    let value = std::env::var(name).ok()?;
    if value.trim().is_empty() { None } else { Some(value) }
  }

  Overrides {
    force: var("RSADLER_ADLER32_FORCE")
      .and_then(|v| Adler32Force::parse(&v))
      .unwrap_or(Adler32Force::Auto),
    portable_to_simd: var("RSADLER_ADLER32_THRESHOLD_PORTABLE_TO_SIMD").and_then(|v| v.trim().parse::<usize>().ok()),
  }
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

#[inline]
#[must_use]
#[allow(unused_variables)] // `caps` only used on x86_64
fn clamp_force_to_caps(requested: Adler32Force, caps: Caps) -> Adler32Force {
  match requested {
    Adler32Force::Auto | Adler32Force::Portable => requested,
    Adler32Force::Sse2 | Adler32Force::Avx2 | Adler32Force::Avx512 => {
      #[cfg(target_arch = "x86_64")]
      {
        use platform::caps::x86;
        let required = match requested {
          Adler32Force::Avx512 => x86::AVX512BW_READY,
          Adler32Force::Avx2 => x86::AVX2_READY,
          _ => x86::SSE2,
        };
        if caps.has(required) {
          return requested;
        }
      }
      Adler32Force::Auto
    }
  }
}

/// Resolve a configuration from capabilities and overrides.
#[must_use]
pub(crate) fn resolve(caps: Caps, ov: Overrides) -> Adler32Config {
  let requested_force = ov.force;
  let effective_force = clamp_force_to_caps(requested_force, caps);

  let portable_to_simd = match effective_force {
    Adler32Force::Auto => ov.portable_to_simd.unwrap_or(DEFAULT_PORTABLE_TO_SIMD),
    // A forced kernel handles every length.
    _ => 0,
  };

  Adler32Config {
    requested_force,
    effective_force,
    tunables: Adler32Tunables { portable_to_simd },
  }
}

/// Compute the Adler-32 configuration for `caps` with the process overrides.
#[inline]
#[must_use]
pub fn config(caps: Caps) -> Adler32Config {
  resolve(caps, overrides())
}

/// Get the effective Adler-32 configuration for the current platform.
#[inline]
#[must_use]
pub fn get() -> Adler32Config {
  config(super::effective_caps())
}
