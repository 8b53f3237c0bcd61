//! Fuzz target for Adler-32 combine.
//!
//! Tests combine chains over arbitrary split points.

#![no_main]

use arbitrary::Arbitrary;
use checksum::{Adler32, Checksum, ChecksumCombine};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  splits: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let expected = Adler32::checksum(data);

  // Normalize splits to valid range and sort
  let max_split = data.len().strict_add(1);
  let mut splits: Vec<usize> = input.splits.iter().map(|s| (*s).strict_rem(max_split)).collect();
  splits.sort_unstable();
  splits.dedup();

  let mut combined = Adler32::checksum(b"");
  let mut prev = 0;
  for split in splits.into_iter().chain(core::iter::once(data.len())) {
    let chunk = &data[prev..split];
    combined = Adler32::combine(combined, Adler32::checksum(chunk), chunk.len());
    prev = split;
  }

  assert_eq!(combined, expected, "adler32 combine chain mismatch, len={}", data.len());
});
