//! Kernel selection and dispatch caching for rsadler.
//!
//! - [`select`] picks the first [`Candidate`] the CPU can run.
//! - [`Dispatcher`] runs a selector once and caches the [`Selected`] kernel.
//! - [`OnceCache`] is the write-once cell both are built on. It works on `no_std`.
//!
//! Builds whose target features already guarantee the best kernel skip all of
//! this and call the kernel directly behind a `cfg!` guard.
//!
//! ```
//! use backend::{Candidate, Dispatcher, Selected, candidates, select};
//! use platform::caps::x86;
//!
//! type KernelFn = fn(u32, &[u8]) -> u32;
//!
//! fn simd(a: u32, _: &[u8]) -> u32 { a }
//! fn portable(a: u32, _: &[u8]) -> u32 { a }
//!
//! fn choose() -> Selected<KernelFn> {
//!   let list: &[Candidate<KernelFn>] = candidates![
//!     "x86_64/avx2" => x86::AVX2_READY => simd,
//!   ];
//!   select(platform::caps(), list).unwrap_or(Selected::new("portable", portable))
//! }
//!
//! static DISPATCH: Dispatcher<KernelFn> = Dispatcher::new(choose);
//! assert!(!DISPATCH.backend_name().is_empty());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod cache;
pub mod dispatch;

pub use cache::OnceCache;
pub use dispatch::{Candidate, Dispatcher, Selected, select};
pub use platform;
