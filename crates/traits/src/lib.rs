//! Core checksum traits for rsadler.
//!
//! This crate provides the traits that every checksum type in the workspace
//! conforms to. It is `no_std` compatible and has zero dependencies.
//!
//! | Trait | Purpose | Implementors |
//! |-------|---------|--------------|
//! | [`Checksum`] | One-shot and incremental computation | `Adler32` |
//! | [`ChecksumCombine`] | `f(A || B)` from `f(A)`, `f(B)` and `len(B)` | `Adler32` |
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;

pub use checksum::{Checksum, ChecksumCombine};
