extern crate std;

use proptest::prelude::*;

use super::*;
use crate::params::{DIVISOR, join};

/// Any valid packed state (both sums already reduced).
fn valid_state() -> impl Strategy<Value = u32> {
  (0..DIVISOR, 0..DIVISOR).prop_map(|(s1, s2)| join(s1, s2))
}

proptest! {
  #[test]
  fn adler32_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..=12_000)) {
    prop_assert_eq!(Adler32::checksum(&data), reference::adler32_bytewise(1, &data));
  }

  #[test]
  fn portable_matches_reference(state in valid_state(), data in proptest::collection::vec(any::<u8>(), 0..=12_000)) {
    prop_assert_eq!(portable::adler32(state, &data), reference::adler32_bytewise(state, &data));
  }

  #[test]
  fn every_kernel_matches_reference_from_any_state(
    state in valid_state(),
    data in proptest::collection::vec(any::<u8>(), 0..=12_000),
    offset in 0usize..64,
  ) {
    let offset = offset.min(data.len());
    let data = &data[offset..];
    let expected = reference::adler32_bytewise(state, data);
    for kernel in kernel_test::forced_kernels() {
      prop_assert_eq!((kernel.func)(state, data), expected, "{}", kernel.name);
    }
  }

  #[test]
  fn adler32_streaming_and_combine(
    data in proptest::collection::vec(any::<u8>(), 0..=8192),
    split in any::<usize>(),
    chunk in 1usize..=6000
  ) {
    let split = split.strict_rem(data.len().strict_add(1));
    let (a, b) = data.split_at(split);

    let oneshot = Adler32::checksum(&data);

    let mut hasher = Adler32::new();
    for part in a.chunks(chunk) {
      hasher.update(part);
    }
    for part in b.chunks(chunk) {
      hasher.update(part);
    }
    prop_assert_eq!(hasher.finalize(), oneshot);

    let sum_a = Adler32::checksum(a);
    let sum_b = Adler32::checksum(b);
    prop_assert_eq!(Adler32::combine(sum_a, sum_b, b.len()), oneshot);

    let mut resumed = Adler32::resume(sum_a);
    resumed.update(b);
    prop_assert_eq!(resumed.finalize(), oneshot);
  }

  #[test]
  fn chunk_kernels_match_reference(
    state in valid_state(),
    data in proptest::collection::vec(any::<u8>(), 0..=6000)
  ) {
    let outcome = kernel_test::verify_chunk_kernels(state, &data);
    prop_assert!(outcome.is_ok(), "{:?}", outcome);
  }

  #[test]
  fn saturated_input_matches_reference(len in 0usize..=20_000, byte in 0xF0u8..=0xFF) {
    let data = alloc::vec![byte; len];
    let worst = join(DIVISOR - 1, DIVISOR - 1);
    let expected = reference::adler32_bytewise(worst, &data);
    for kernel in kernel_test::forced_kernels() {
      prop_assert_eq!((kernel.func)(worst, &data), expected, "{}", kernel.name);
    }
  }
}
