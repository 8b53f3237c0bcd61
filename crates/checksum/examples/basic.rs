//! Basic Adler-32 usage: one-shot, streaming, resume and combine.
//!
//! Run with: `cargo run --example basic -p checksum`

use checksum::{Adler32, Checksum, ChecksumCombine};

fn main() {
  println!("=== Adler-32 Basic Examples ===\n");

  one_shot_examples();
  streaming_examples();
  resume_example();
  combine_example();
}

/// One-shot computation: fastest when you have all data in memory.
fn one_shot_examples() {
  println!("--- One-Shot Computation ---\n");

  let wiki = Adler32::checksum(b"Wikipedia");
  println!("Adler-32(\"Wikipedia\"): 0x{wiki:08X}");
  assert_eq!(wiki, 0x11E6_0398);

  let check = Adler32::checksum(b"123456789");
  println!("Adler-32(\"123456789\"): 0x{check:08X}");
  assert_eq!(check, 0x091E_01DE);

  // Empty input leaves the initial state untouched
  assert_eq!(Adler32::checksum(b""), 1);

  // Large saturated input exercises the SIMD path and modular reduction
  let ones = vec![0xFFu8; 1 << 20];
  let big = Adler32::checksum(&ones);
  println!("Adler-32(1 MiB of 0xFF): 0x{big:08X}");
  assert_eq!(big, 0x8E88_EF11);

  println!();
}

/// Streaming computation: process data in chunks.
fn streaming_examples() {
  println!("--- Streaming Computation ---\n");

  let mut hasher = Adler32::new();
  hasher.update(b"Wiki");
  hasher.update(b"pedia");
  let sum = hasher.finalize();

  println!("Streaming Adler-32: 0x{sum:08X}");
  assert_eq!(sum, Adler32::checksum(b"Wikipedia"));

  // finalize() is non-consuming: can continue after
  hasher.update(b"...");
  println!("Extended Adler-32:  0x{:08X}", hasher.finalize());

  // reset() clears state for reuse
  hasher.reset();
  hasher.update(b"new data");
  println!("Reset Adler-32:     0x{:08X}", hasher.finalize());

  println!();
}

/// Resume computation from a saved checksum.
fn resume_example() {
  println!("--- Resume from Saved State ---\n");

  let part1 = b"first part of data";
  let part2 = b" and the second part";

  let saved = Adler32::checksum(part1);
  println!("Saved state after part1: 0x{saved:08X}");

  let mut resumed = Adler32::resume(saved);
  resumed.update(part2);
  let final_sum = resumed.finalize();
  println!("Final after resume:      0x{final_sum:08X}");

  let mut full = Adler32::new();
  full.update(part1);
  full.update(part2);
  assert_eq!(final_sum, full.finalize());
  println!("Verified: matches full computation");

  println!();
}

/// Combine checksums of independently processed pieces.
fn combine_example() {
  println!("--- Combine ---\n");

  let data = b"The quick brown fox jumps over the lazy dog";
  let (a, b) = data.split_at(16);

  let combined = Adler32::combine(Adler32::checksum(a), Adler32::checksum(b), b.len());
  println!("Combined: 0x{combined:08X}");
  assert_eq!(combined, 0x5BDC_0FDA);
  assert_eq!(combined, Adler32::checksum(data));

  println!();
}
