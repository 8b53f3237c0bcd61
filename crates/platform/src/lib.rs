//! CPU capability detection for rsadler.
//!
//! Kernels never probe the CPU themselves. They declare the [`Caps`] they
//! need and the dispatcher compares that against [`caps()`]:
//!
//! ```
//! use platform::caps::x86;
//!
//! if platform::caps().has(x86::AVX2_READY) {
//!   // 256-bit kernels are legal here
//! }
//! ```
//!
//! Features enabled at compile time are always reported, see
//! [`detect::caps_static`]. Runtime probing needs the `std` feature.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
pub mod detect;

pub use caps::{Arch, Caps};
pub use detect::{
  Description, Detected, OverrideError, arch, caps, clear_override, describe, get, has_override, init_with_caps,
  set_caps_override, set_override, try_set_override,
};
