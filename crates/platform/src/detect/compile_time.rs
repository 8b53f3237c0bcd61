use crate::caps::Caps;

/// Capabilities guaranteed by the compilation target.
///
/// Folds in every feature enabled through `-C target-feature` or
/// `-C target-cpu`. The result is a constant, so `caps_static().has(..)`
/// checks compile away.
///
/// ```
/// const CAPS: platform::Caps = platform::detect::caps_static();
///
/// #[cfg(target_arch = "x86_64")]
/// assert!(CAPS.has(platform::caps::x86::SSE2));
/// ```
#[inline(always)]
#[must_use]
pub const fn caps_static() -> Caps {
  if cfg!(target_arch = "x86_64") {
    // SSE2 is part of the x86_64 baseline even if nobody spells it out.
    crate::caps::x86::SSE2.union(crate::caps::x86_target_features())
  } else if cfg!(target_arch = "x86") {
    crate::caps::x86_target_features()
  } else {
    Caps::NONE
  }
}
