//! Capability detection for the running process.
//!
//! [`get()`] combines three sources, in priority order:
//!
//! 1. An override installed with [`set_override`] before first use (std only).
//! 2. Runtime CPUID probing with OS register-state checks (std, x86_64).
//! 3. Features the binary was compiled for ([`caps_static`]), always included.
//!
//! With `std` the answer is computed once and cached in a `OnceLock`.
//! Without `std` there is no runtime probing, so `get()` is the compile-time
//! answer and costs nothing. Under Miri every query reports no features.
//!
//! ```
//! use platform::{Detected, caps::x86};
//!
//! // Only honoured before the first `get()`.
//! let _ = platform::try_set_override(Some(Detected::with_caps(x86::SSE2)));
//! ```

#![allow(unsafe_code)]

use core::fmt;

use crate::caps::{Arch, Caps};

mod compile_time;
#[cfg(target_arch = "x86_64")]
mod x86_64;

pub use compile_time::caps_static;

/// Capabilities together with the architecture they describe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detected {
  pub caps: Caps,
  pub arch: Arch,
}

impl Detected {
  /// No SIMD features: every kernel choice falls through to portable.
  #[inline]
  #[must_use]
  pub const fn portable() -> Self {
    Self::with_caps(Caps::NONE)
  }

  #[inline]
  #[must_use]
  pub const fn with_caps(caps: Caps) -> Self {
    Self {
      caps,
      arch: Arch::current(),
    }
  }
}

/// Why an override was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum OverrideError {
  /// Detection has already been cached.
  AlreadyInitialized,
  /// This build has no override slot (no `std`).
  Unsupported,
}

impl fmt::Display for OverrideError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::AlreadyInitialized => "detection already initialized",
      Self::Unsupported => "overrides require the `std` feature",
    })
  }
}

#[cfg(feature = "std")]
impl std::error::Error for OverrideError {}

#[cfg(feature = "std")]
mod state {
  use std::sync::{OnceLock, RwLock};

  use super::Detected;

  pub(super) static CACHE: OnceLock<Detected> = OnceLock::new();
  pub(super) static OVERRIDE: RwLock<Option<Detected>> = RwLock::new(None);

  pub(super) fn current_override() -> Option<Detected> {
    OVERRIDE.read().ok().and_then(|guard| *guard)
  }
}

/// Detected state for this process.
#[inline]
#[must_use]
pub fn get() -> Detected {
  if cfg!(miri) {
    return Detected::portable();
  }

  #[cfg(feature = "std")]
  {
    *state::CACHE.get_or_init(|| state::current_override().unwrap_or_else(detect_uncached))
  }

  #[cfg(not(feature = "std"))]
  {
    detect_uncached()
  }
}

/// Capabilities of this process. Shorthand for `get().caps`.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  get().caps
}

#[inline]
#[must_use]
pub fn arch() -> Arch {
  get().arch
}

/// Probe the CPU without consulting the cache or any override.
#[must_use]
pub fn detect_uncached() -> Detected {
  #[cfg(target_arch = "x86_64")]
  {
    x86_64::detect()
  }

  #[cfg(not(target_arch = "x86_64"))]
  {
    Detected::with_caps(caps_static())
  }
}

/// Install (or clear, with `None`) an override for the first [`get()`].
#[cold]
pub fn try_set_override(value: Option<Detected>) -> Result<(), OverrideError> {
  #[cfg(feature = "std")]
  {
    if state::CACHE.get().is_some() {
      return Err(OverrideError::AlreadyInitialized);
    }
    match state::OVERRIDE.write() {
      Ok(mut guard) => {
        *guard = value;
        Ok(())
      }
      // A writer panicked; the slot is unusable.
      Err(_) => Err(OverrideError::Unsupported),
    }
  }

  #[cfg(not(feature = "std"))]
  {
    let _ = value;
    Err(OverrideError::Unsupported)
  }
}

/// Like [`try_set_override`], but panics on failure.
///
/// # Panics
///
/// Panics if detection has already been cached or overrides are unsupported.
#[cold]
pub fn set_override(value: Option<Detected>) {
  if let Err(err) = try_set_override(value) {
    panic!("platform::set_override failed: {err}");
  }
}

/// Capabilities-only override for the current architecture.
///
/// # Panics
///
/// See [`set_override`].
#[cold]
pub fn set_caps_override(caps: Option<Caps>) {
  set_override(caps.map(Detected::with_caps));
}

/// Skip runtime detection and use `caps`. Bare-metal entry point.
///
/// # Panics
///
/// See [`set_override`].
#[cold]
pub fn init_with_caps(caps: Caps) {
  set_caps_override(Some(caps));
}

/// # Panics
///
/// See [`set_override`].
#[cold]
pub fn clear_override() {
  set_override(None);
}

#[inline]
#[must_use]
pub fn has_override() -> bool {
  #[cfg(feature = "std")]
  {
    state::current_override().is_some()
  }

  #[cfg(not(feature = "std"))]
  {
    false
  }
}

/// Snapshot of [`get()`] for display.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Description {
  detected: Detected,
  overridden: bool,
}

impl Description {
  #[inline]
  #[must_use]
  pub const fn caps(&self) -> Caps {
    self.detected.caps
  }

  #[inline]
  #[must_use]
  pub const fn arch(&self) -> Arch {
    self.detected.arch
  }

  /// True when the caps came from an override rather than detection.
  #[inline]
  #[must_use]
  pub const fn is_overridden(&self) -> bool {
    self.overridden
  }
}

impl fmt::Display for Description {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.detected.caps, f)?;
    if self.overridden {
      f.write_str(" (override)")?;
    }
    Ok(())
  }
}

impl fmt::Debug for Description {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Description")
      .field("arch", &self.detected.arch)
      .field("caps", &self.detected.caps)
      .field("overridden", &self.overridden)
      .finish()
  }
}

/// Describe the detected platform.
#[inline]
#[must_use]
pub fn describe() -> Description {
  Description {
    detected: get(),
    overridden: has_override(),
  }
}
