use std::sync::Once;

use checksum::Adler32;

#[allow(dead_code)] // Used by `benches/adler32.rs` (but not by `benches/kernels.rs`).
pub const STREAM_CHUNK_BYTES: usize = 31;

pub const CASES: &[(&str, usize)] = &[
  ("xxs", 16),
  ("xs", 64),
  ("s", 256),
  ("m", 4usize.strict_mul(1024)),
  ("l", 64usize.strict_mul(1024)),
  ("xl", 1024usize.strict_mul(1024)),
];

/// Byte distances from a 64-byte boundary that the kernel benches start at.
///
/// `0` hits no scalar prologue. The others force the driver to consume a few
/// bytes before the first vector load is aligned.
pub const START_OFFSETS: &[usize] = &[0, 1, 15, 33];

/// A copy of some input placed at a fixed distance past a 64-byte boundary.
pub struct Placed {
  offset: usize,
  backing: Vec<u8>,
  start: usize,
  len: usize,
}

impl Placed {
  #[must_use]
  pub fn new(src: &[u8], offset: usize) -> Self {
    let mut backing = vec![0u8; src.len().strict_add(64).strict_add(offset)];
    let to_boundary = backing.as_ptr().align_offset(64);
    let start = to_boundary.strict_add(offset);
    backing[start..start.strict_add(src.len())].copy_from_slice(src);
    Self {
      offset,
      backing,
      start,
      len: src.len(),
    }
  }

  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[u8] {
    &self.backing[self.start..self.start.strict_add(self.len)]
  }

  #[must_use]
  pub fn label(&self, size_label: &str) -> String {
    format!("{size_label}/+{}", self.offset)
  }
}

/// Deterministic, non-constant input so no kernel sees a degenerate pattern.
#[must_use]
pub fn make_data(len: usize) -> Vec<u8> {
  let mut x = 0x9E37_79B9u32;
  (0..len)
    .map(|_| {
      x ^= x << 13;
      x ^= x >> 17;
      x ^= x << 5;
      (x >> 24) as u8
    })
    .collect()
}

/// `src` copied once per entry of [`START_OFFSETS`].
#[must_use]
pub fn placements(src: &[u8]) -> Vec<Placed> {
  START_OFFSETS.iter().map(|&offset| Placed::new(src, offset)).collect()
}

/// Print platform detection info once at benchmark start.
pub fn print_platform_info() {
  static ONCE: Once = Once::new();
  ONCE.call_once(|| {
    let cfg = Adler32::config();
    eprintln!("== rsadler bench ==");
    eprintln!("platform:        {}", platform::describe());
    eprintln!("backend:         {}", Adler32::backend_name());
    eprintln!(
      "force:           requested={} effective={}",
      cfg.requested_force.as_str(),
      cfg.effective_force.as_str()
    );
    eprintln!("portable->simd:  {} bytes", cfg.tunables.portable_to_simd);
    for &(label, size) in CASES {
      eprintln!("  {label:>3} ({size:>7} B): {}", Adler32::kernel_name_for_len(size));
    }
  });
}
