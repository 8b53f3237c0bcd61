//! Cross-kernel equivalence fuzzing.
//!
//! Runs every Adler-32 kernel available on this CPU, both through the full
//! driver and as raw single-chunk accumulators, and checks them against the
//! bytewise reference.

#![no_main]

use checksum::__internal::kernel_test::{run_all_adler32_kernels, verify_adler32_kernels, verify_chunk_kernels};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  let results = run_all_adler32_kernels(data);

  if results.len() >= 2 {
    let expected = results[0].checksum;
    for result in &results[1..] {
      assert_eq!(
        result.checksum, expected,
        "Adler-32 kernel mismatch: {} produced 0x{:08X}, but {} produced 0x{:08X}, len={}",
        result.name, result.checksum, results[0].name, expected, data.len()
      );
    }
  }

  verify_adler32_kernels(data).expect("Adler-32 kernel verification failed");

  // Chunk kernels take at most one chunk; longer inputs are clipped by the harness.
  verify_chunk_kernels(1, data).expect("Adler-32 chunk kernel verification failed");
});
