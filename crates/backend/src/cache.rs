//! Write-once cells for dispatch results.
//!
//! With `std` this is a `OnceLock`. Without it, targets with byte atomics use
//! a three-state spin cell, and targets without atomics recompute every call.

/// A write-once cache for a small `Copy` value.
pub struct OnceCache<T: Copy> {
  cell: imp::Cell<T>,
}

impl<T: Copy> OnceCache<T> {
  #[must_use]
  pub const fn new() -> Self {
    Self { cell: imp::Cell::new() }
  }

  /// Cached value, computing it with `f` on first use.
  ///
  /// `f` runs at most once per cache except on targets without atomics.
  #[inline]
  pub fn get_or_init(&self, f: impl FnOnce() -> T) -> T {
    self.cell.get_or_init(f)
  }

  /// Cached value, if any caller has initialized it.
  #[inline]
  #[must_use]
  pub fn get(&self) -> Option<T> {
    self.cell.get()
  }
}

impl<T: Copy> Default for OnceCache<T> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(feature = "std")]
mod imp {
  use std::sync::OnceLock;

  pub(super) struct Cell<T>(OnceLock<T>);

  impl<T: Copy> Cell<T> {
    pub(super) const fn new() -> Self {
      Self(OnceLock::new())
    }

    #[inline]
    pub(super) fn get_or_init(&self, f: impl FnOnce() -> T) -> T {
      *self.0.get_or_init(f)
    }

    #[inline]
    pub(super) fn get(&self) -> Option<T> {
      self.0.get().copied()
    }
  }
}

#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
#[allow(unsafe_code)]
mod imp {
  use core::{
    cell::UnsafeCell,
    hint,
    mem::MaybeUninit,
    sync::atomic::{AtomicU8, Ordering},
  };

  const EMPTY: u8 = 0;
  const WRITING: u8 = 1;
  const FULL: u8 = 2;

  pub(super) struct Cell<T> {
    state: AtomicU8,
    slot: UnsafeCell<MaybeUninit<T>>,
  }

  // SAFETY: `slot` is written by exactly one thread (the one that moved the
  // state EMPTY -> WRITING) and read only after FULL is observed with Acquire.
  unsafe impl<T: Copy + Send + Sync> Sync for Cell<T> {}

  impl<T: Copy> Cell<T> {
    pub(super) const fn new() -> Self {
      Self {
        state: AtomicU8::new(EMPTY),
        slot: UnsafeCell::new(MaybeUninit::uninit()),
      }
    }

    #[inline]
    pub(super) fn get_or_init(&self, f: impl FnOnce() -> T) -> T {
      if let Some(value) = self.get() {
        return value;
      }

      if self
        .state
        .compare_exchange(EMPTY, WRITING, Ordering::Acquire, Ordering::Acquire)
        .is_ok()
      {
        let value = f();
        // SAFETY: the successful EMPTY -> WRITING exchange grants exclusive access.
        unsafe { (*self.slot.get()).write(value) };
        self.state.store(FULL, Ordering::Release);
        return value;
      }

      loop {
        if let Some(value) = self.get() {
          return value;
        }
        hint::spin_loop();
      }
    }

    #[inline]
    pub(super) fn get(&self) -> Option<T> {
      if self.state.load(Ordering::Acquire) != FULL {
        return None;
      }
      // SAFETY: FULL is stored with Release only after the slot is written.
      Some(unsafe { (*self.slot.get()).assume_init() })
    }
  }
}

#[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
mod imp {
  use core::marker::PhantomData;

  pub(super) struct Cell<T>(PhantomData<T>);

  impl<T: Copy> Cell<T> {
    pub(super) const fn new() -> Self {
      Self(PhantomData)
    }

    #[inline]
    pub(super) fn get_or_init(&self, f: impl FnOnce() -> T) -> T {
      f()
    }

    #[inline]
    pub(super) fn get(&self) -> Option<T> {
      None
    }
  }
}
