//! Fuzz target for Adler-32 one-shot and streaming agreement.
//!
//! Every forced kernel must match the bytewise reference, and feeding the
//! same bytes through `update` in arbitrary pieces must match one-shot.

#![no_main]

use arbitrary::Arbitrary;
use checksum::{Adler32, Checksum, __internal::kernel_test::verify_adler32_kernels_from};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  initial: u32,
  chunk: u16,
  data: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;

  verify_adler32_kernels_from(input.initial, data).expect("Adler-32 kernel verification failed");

  let oneshot = Adler32::checksum(data);
  let chunk = usize::from(input.chunk).max(1);
  let mut hasher = Adler32::new();
  for part in data.chunks(chunk) {
    hasher.update(part);
  }
  assert_eq!(hasher.finalize(), oneshot, "streaming mismatch, chunk={chunk}, len={}", data.len());
});
