//! CPU capability bitset.
//!
//! A [`Caps`] value answers one question for the dispatcher: may a kernel that
//! requires feature set `R` run here? That is `caps.has(R)`.
//!
//! Only x86 features are tracked. Every other target has `Caps::NONE` and
//! runs the portable kernel.
//!
//! ```
//! use platform::caps::{Caps, x86};
//!
//! let c = x86::SSE2 | x86::AVX | x86::AVX2;
//! assert!(c.has(x86::AVX2_READY));
//! assert!(!c.has(x86::AVX512BW_READY));
//! assert_eq!(Caps::NONE.count(), 0);
//! ```

use core::{fmt, ops};

/// Set of ISA extensions, one bit per feature.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(u64);

impl Caps {
  /// No features.
  pub const NONE: Self = Self(0);

  /// Build a set from its raw bits.
  ///
  /// Only available with the `testing` feature or in test builds.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_bits(bits: u64) -> Self {
    Self(bits)
  }

  /// Raw bits of the set.
  #[inline]
  #[must_use]
  pub const fn bits(self) -> u64 {
    self.0
  }

  /// Single-feature set for bit `index`.
  #[inline]
  #[must_use]
  pub const fn bit(index: u8) -> Self {
    Self(1u64 << (index % 64))
  }

  /// True if every feature in `required` is present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    self.0 & required.0 == required.0
  }

  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self(self.0 & other.0)
  }

  /// Features in `self` but not in `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }

  /// Names of the present features, in bit order, using `target_feature` spelling.
  pub fn feature_names(self) -> impl Iterator<Item = &'static str> {
    x86::NAMED
      .iter()
      .filter(move |(cap, _)| self.has(*cap))
      .map(|&(_, name)| name)
  }
}

impl ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self {
    self.union(rhs)
  }
}

impl ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    self.0 |= rhs.0;
  }
}

impl ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self {
    self.intersection(rhs)
  }
}

impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Caps({}, ", Arch::current())?;
    if self.is_empty() {
      return f.write_str("none)");
    }
    f.write_str("[")?;
    for (i, name) in self.feature_names().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      f.write_str(name)?;
    }
    f.write_str("])")
  }
}

impl fmt::Display for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

/// Architecture a [`Caps`] value was detected on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  X86,
  Aarch64,
  Other,
}

impl Arch {
  /// Architecture of the compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "x86") {
      Self::X86
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else {
      Self::Other
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Declares the x86 feature bits once: the public constants, the name table
/// used by `Debug`, and the `cfg!(target_feature)` fold used by `caps_static`.
macro_rules! x86_features {
  ($($(#[$meta:meta])* $name:ident = $bit:literal, $feature:literal;)+) => {
    /// x86/x86_64 features tracked for kernel selection.
    ///
    /// Bit positions are stable.
    pub mod x86 {
      use super::Caps;

      $($(#[$meta])* pub const $name: Caps = Caps::bit($bit);)+

      /// AVX2-ready: 256-bit integer SIMD on a CPU that also reports AVX.
      pub const AVX2_READY: Caps = AVX.union(AVX2);

      /// AVX-512BW-ready: 512-bit registers plus byte/word integer ops.
      pub const AVX512BW_READY: Caps = AVX512F.union(AVX512BW);

      /// Every AVX-512 bit. Cleared together on hybrid parts.
      pub const AVX512_ALL: Caps = AVX512F.union(AVX512BW);

      pub(crate) const NAMED: &[(Caps, &str)] = &[$(($name, $feature)),+];
    }

    /// Union of the x86 features enabled for this compilation.
    #[inline(always)]
    pub(crate) const fn x86_target_features() -> Caps {
      let mut caps = Caps::NONE;
      $(if cfg!(target_feature = $feature) {
        caps = caps.union(x86::$name);
      })+
      caps
    }
  };
}

x86_features! {
  /// Baseline on x86_64.
  SSE2 = 0, "sse2";
  AVX = 6, "avx";
  AVX2 = 7, "avx2";
  AVX512F = 14, "avx512f";
  AVX512BW = 16, "avx512bw";
}
