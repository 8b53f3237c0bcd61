//! Kernel introspection: verify which optimizations are active.
//!
//! This example shows how to inspect which Adler-32 kernel is selected for
//! your platform, useful for verifying hardware acceleration is enabled.
//!
//! Run with: `cargo run --example introspect -p checksum`
//!
//! Try `RSADLER_ADLER32_FORCE=sse2` or
//! `RSADLER_ADLER32_THRESHOLD_PORTABLE_TO_SIMD=0` to see selection change.

use checksum::{Adler32, DispatchInfo, KernelIntrospect, kernel_for};

fn main() {
  println!("=== Adler-32 Kernel Introspection ===\n");

  platform_info();
  configuration();
  size_based_dispatch();
  generic_introspection();
}

/// Display detected platform capabilities.
fn platform_info() {
  println!("--- Platform Detection ---\n");

  let info = DispatchInfo::current();

  // Full platform description with CPU features
  println!("Platform: {info}");
  println!();

  // The platform field provides the raw Description
  let platform = info.platform();
  println!("Platform Debug: {platform:?}");
  println!("Bound kernel:   {}", info.adler32_backend());
  println!();
}

/// Show the resolved configuration after environment overrides.
fn configuration() {
  println!("--- Configuration ---\n");

  let cfg = Adler32::config();
  println!("Requested force:  {}", cfg.requested_force.as_str());
  println!("Effective force:  {}", cfg.effective_force.as_str());
  println!("Portable->SIMD:   {} bytes", cfg.tunables.portable_to_simd);
  println!("Backend:          {}", Adler32::backend_name());
  println!();
}

/// Kernels vary with buffer size around the portable threshold.
fn size_based_dispatch() {
  println!("--- Size-Based Kernel Selection ---\n");

  let sizes = [0, 16, 63, 64, 256, 4096, 65536, 1_048_576];

  for size in sizes {
    let kernel = Adler32::kernel_name_for_len(size);
    println!("  {:>10} bytes: {kernel}", size);
  }
  println!();
}

/// Generic introspection using the kernel_for function.
fn generic_introspection() {
  println!("--- Generic Introspection ---\n");

  fn report<T: KernelIntrospect>(name: &str, sizes: &[usize]) {
    println!("{name} (backend {}):", T::backend_name());
    for &size in sizes {
      println!("  {:>8} B: {}", size, kernel_for::<T>(size));
    }
    println!();
  }

  report::<Adler32>("Adler-32", &[8, 128, 4096, 1_000_000]);
}
