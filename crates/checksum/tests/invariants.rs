use checksum::{Adler32, Checksum, ChecksumCombine, __internal::adler32_bytewise};

fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut out = vec![0u8; len];
  let mut x = seed | 1;
  for b in &mut out {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = (x as u8).wrapping_add((x >> 8) as u8);
  }
  out
}

#[test]
fn adler32_invariants() {
  let lengths = [
    0usize, 1, 2, 15, 16, 31, 32, 33, 63, 64, 65, 127, 128, 255, 256, 1024, 4095, 4096, 4097, 5503, 5504, 5536,
    5551, 5552, 5553, 11_104, 65_536,
  ];
  let seeds = [0u64, 1, 0x0123_4567_89ab_cdef, 0xd1b5_4a32_d192_ed03];

  for &len in &lengths {
    for &seed in &seeds {
      let data = gen_bytes(len, seed ^ len as u64);

      let oneshot = Adler32::checksum(&data);
      let reference = adler32_bytewise(1, &data);
      assert_eq!(oneshot, reference, "adler32 reference mismatch at len={len}");

      let mut streamed = Adler32::new();
      for part in data.chunks(97) {
        streamed.update(part);
      }
      assert_eq!(streamed.finalize(), oneshot, "adler32 streaming mismatch at len={len}");

      let split = len / 3;
      let (a, b) = data.split_at(split);
      let combined = Adler32::combine(Adler32::checksum(a), Adler32::checksum(b), b.len());
      assert_eq!(combined, oneshot, "adler32 combine mismatch at len={len}");
    }
  }
}

#[test]
fn empty_input_is_one() {
  assert_eq!(Adler32::checksum(&[]), 0x0000_0001);
  assert_eq!(Adler32::checksum_vectored(&[]), 0x0000_0001);
}

#[test]
fn single_byte_formula() {
  for v in 0..=255u8 {
    let x = 1 + u32::from(v);
    assert_eq!(Adler32::checksum(&[v]), (x << 16) | x, "byte={v}");
  }
}

#[test]
fn misaligned_starts_match_aligned() {
  let buf = gen_bytes(16_384 + 64, 42);
  for offset in 0..64 {
    let data = &buf[offset..offset + 16_384];
    assert_eq!(Adler32::checksum(data), adler32_bytewise(1, data), "offset={offset}");
  }
}

#[test]
fn combine_is_associative() {
  let a = gen_bytes(1000, 1);
  let b = gen_bytes(70_000, 2);
  let c = gen_bytes(3, 3);
  let (sa, sb, sc) = (Adler32::checksum(&a), Adler32::checksum(&b), Adler32::checksum(&c));

  let left = Adler32::combine(Adler32::combine(sa, sb, b.len()), sc, c.len());
  let right = Adler32::combine(sa, Adler32::combine(sb, sc, c.len()), b.len() + c.len());
  assert_eq!(left, right);

  let whole: Vec<u8> = [a, b, c].concat();
  assert_eq!(left, Adler32::checksum(&whole));
}
