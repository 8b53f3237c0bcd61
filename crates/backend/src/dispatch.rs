//! Capability-ordered kernel selection.
//!
//! An algorithm lists its kernels best-first as [`Candidate`]s, each tagged
//! with the [`Caps`] it needs. [`select`] walks the list and returns the first
//! one the machine can run. A [`Dispatcher`] runs a selector once per process
//! and hands out the cached [`Selected`] afterwards.
//!
//! ```
//! use backend::{candidates, dispatch::{Candidate, Selected, select}};
//! use platform::caps::{Caps, x86};
//!
//! type KernelFn = fn(u32, &[u8]) -> u32;
//!
//! fn wide(a: u32, _: &[u8]) -> u32 { a }
//! fn narrow(a: u32, _: &[u8]) -> u32 { a }
//!
//! fn pick(caps: Caps) -> Option<Selected<KernelFn>> {
//!   let list: &[Candidate<KernelFn>] = candidates![
//!     "x86_64/avx2" => x86::AVX2_READY => wide,
//!     "x86_64/sse2" => x86::SSE2 => narrow,
//!   ];
//!   select(caps, list)
//! }
//!
//! assert_eq!(pick(x86::SSE2 | x86::AVX2_READY).map(|s| s.name), Some("x86_64/avx2"));
//! assert_eq!(pick(x86::SSE2).map(|s| s.name), Some("x86_64/sse2"));
//! assert!(pick(Caps::NONE).is_none());
//! ```

use platform::Caps;

use crate::cache::OnceCache;

/// A kernel and the capabilities it requires.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Stable name, e.g. `"x86_64/avx2"`.
  pub name: &'static str,
  pub requires: Caps,
  pub func: F,
}

impl<F> Candidate<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, func: F) -> Self {
    Self { name, requires, func }
  }
}

/// A chosen kernel: its name and function.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  pub name: &'static str,
  pub func: F,
}

impl<F> Selected<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

impl<F: Copy> From<&Candidate<F>> for Selected<F> {
  #[inline]
  fn from(candidate: &Candidate<F>) -> Self {
    Self::new(candidate.name, candidate.func)
  }
}

/// First candidate whose requirements `caps` satisfies.
///
/// `None` means no accelerated kernel applies; the caller picks its fallback.
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Option<Selected<F>> {
  candidates.iter().find(|c| caps.has(c.requires)).map(Selected::from)
}

/// `&[Candidate<_>]` literal from `name => requires => func` rows, best-first.
#[macro_export]
macro_rules! candidates {
  ($($name:expr => $requires:expr => $func:expr),+ $(,)?) => {
    &[$($crate::dispatch::Candidate::new($name, $requires, $func)),+]
  };
}

/// Runs `selector` on first use and caches its answer.
///
/// ```
/// use backend::dispatch::{Dispatcher, Selected};
///
/// type SumFn = fn(u32, &[u8]) -> u32;
///
/// fn sum(acc: u32, data: &[u8]) -> u32 {
///   data.iter().fold(acc, |a, &b| a.wrapping_add(u32::from(b)))
/// }
///
/// fn choose() -> Selected<SumFn> {
///   Selected::new("portable", sum)
/// }
///
/// static DISPATCH: Dispatcher<SumFn> = Dispatcher::new(choose);
/// assert_eq!(DISPATCH.backend_name(), "portable");
/// assert_eq!((DISPATCH.get().func)(0, &[1, 2, 3]), 6);
/// ```
pub struct Dispatcher<F: Copy + 'static> {
  cache: OnceCache<Selected<F>>,
  selector: fn() -> Selected<F>,
}

impl<F: Copy + 'static> Dispatcher<F> {
  #[must_use]
  pub const fn new(selector: fn() -> Selected<F>) -> Self {
    Self {
      cache: OnceCache::new(),
      selector,
    }
  }

  #[inline]
  #[must_use]
  pub fn get(&self) -> Selected<F> {
    self.cache.get_or_init(self.selector)
  }

  #[inline]
  #[must_use]
  pub fn backend_name(&self) -> &'static str {
    self.get().name
  }
}

#[cfg(test)]
mod tests {
  use platform::caps::x86;

  use super::*;

  type TestFn = fn(u32, &[u8]) -> u32;

  fn zero(_: u32, _: &[u8]) -> u32 {
    0
  }

  fn one(_: u32, _: &[u8]) -> u32 {
    1
  }

  const LADDER: &[Candidate<TestFn>] = candidates![
    "wide" => x86::AVX512BW_READY => one as TestFn,
    "mid" => x86::AVX2_READY => one,
    "narrow" => x86::SSE2 => zero,
  ];

  fn name(caps: Caps) -> Option<&'static str> {
    select(caps, LADDER).map(|s| s.name)
  }

  #[test]
  fn first_satisfied_candidate_wins() {
    assert_eq!(name(x86::SSE2), Some("narrow"));
    assert_eq!(name(x86::SSE2 | x86::AVX2_READY), Some("mid"));
    assert_eq!(name(x86::SSE2 | x86::AVX2_READY | x86::AVX512BW_READY), Some("wide"));
  }

  #[test]
  fn partial_requirement_is_skipped() {
    // AVX-512F without BW is not enough for the wide rung.
    assert_eq!(name(x86::SSE2 | x86::AVX2_READY | x86::AVX512F), Some("mid"));
  }

  #[test]
  fn nothing_matches() {
    assert_eq!(name(Caps::NONE), None);
    assert!(select::<TestFn>(x86::SSE2, &[]).is_none());
  }

  #[test]
  fn empty_requirement_always_matches() {
    let list: &[Candidate<TestFn>] = candidates!["any" => Caps::NONE => zero as TestFn];
    assert_eq!(select(Caps::NONE, list).map(|s| s.name), Some("any"));
  }

  fn choose_narrow() -> Selected<TestFn> {
    Selected::new("narrow", zero)
  }

  #[test]
  fn dispatcher_caches_selection() {
    static DISPATCH: Dispatcher<TestFn> = Dispatcher::new(choose_narrow);

    assert_eq!(DISPATCH.backend_name(), "narrow");
    assert_eq!((DISPATCH.get().func)(7, &[]), 0);
    assert_eq!(DISPATCH.get().name, DISPATCH.backend_name());
  }
}
