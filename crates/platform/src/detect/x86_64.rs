use super::{Detected, caps_static};
#[cfg(feature = "std")]
use crate::caps::{Caps, x86};

pub(super) fn detect() -> Detected {
  #[allow(unused_mut)]
  let mut caps = caps_static();

  #[cfg(feature = "std")]
  {
    let cpu = Cpuid::read();
    caps |= cpu.caps();

    // Hybrid Intel parts expose AVX-512 on P-cores only. A thread migrated to
    // an E-core mid-kernel would fault, so AVX-512 stays off unless forced.
    if cpu.is_intel_hybrid() && !hybrid_avx512_override() {
      caps = caps.difference(x86::AVX512_ALL) | caps_static();
    }
  }

  Detected::with_caps(caps)
}

/// CPUID register a feature bit lives in.
#[cfg(feature = "std")]
#[derive(Clone, Copy)]
enum Reg {
  /// Leaf 1, ECX.
  L1Ecx,
  /// Leaf 7 subleaf 0, EBX.
  L7Ebx,
}

/// Register state the OS must save before a feature is usable.
#[cfg(feature = "std")]
#[derive(Clone, Copy, PartialEq, Eq)]
enum OsState {
  None,
  Ymm,
  Zmm,
}

#[cfg(feature = "std")]
const FEATURE_BITS: &[(Reg, u32, OsState, Caps)] = &[
  (Reg::L1Ecx, 28, OsState::Ymm, x86::AVX),
  (Reg::L7Ebx, 5, OsState::Ymm, x86::AVX2),
  (Reg::L7Ebx, 16, OsState::Zmm, x86::AVX512F),
  (Reg::L7Ebx, 30, OsState::Zmm, x86::AVX512BW),
];

/// The CPUID words feature detection needs.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Default)]
struct Cpuid {
  intel: bool,
  family: u32,
  model: u32,
  l1_ecx: u32,
  l7_ebx: u32,
  xcr0: u64,
}

#[cfg(feature = "std")]
impl Cpuid {
  /// XMM + YMM state.
  const XCR0_YMM: u64 = 0x6;
  /// Opmask + ZMM_Hi256 + Hi16_ZMM state.
  const XCR0_ZMM: u64 = 0xE0;

  fn read() -> Self {
    use core::arch::x86_64::{__cpuid, __cpuid_count, _xgetbv};

    #[allow(unused_unsafe)]
    // SAFETY: CPUID is available on every x86_64 CPU.
    let leaf0 = unsafe { __cpuid(0) };
    #[allow(unused_unsafe)]
    // SAFETY: CPUID is available on every x86_64 CPU.
    let leaf1 = unsafe { __cpuid(1) };

    let l7_ebx = if leaf0.eax >= 7 {
      #[allow(unused_unsafe)]
      // SAFETY: leaf 7 is within the maximum basic leaf reported by leaf 0.
      let leaf7 = unsafe { __cpuid_count(7, 0) };
      leaf7.ebx
    } else {
      0
    };

    let osxsave = leaf1.ecx & (1 << 27) != 0;
    let xcr0 = if osxsave {
      // SAFETY: XGETBV is valid once OSXSAVE is set.
      unsafe { _xgetbv(0) }
    } else {
      0
    };

    let (family, model) = family_model(leaf1.eax);
    Self {
      // "GenuineIntel": ebx = "Genu"
      intel: leaf0.ebx == 0x756E_6547,
      family,
      model,
      l1_ecx: leaf1.ecx,
      l7_ebx,
      xcr0,
    }
  }

  fn os_saves(&self, state: OsState) -> bool {
    let ymm = self.xcr0 & Self::XCR0_YMM == Self::XCR0_YMM;
    match state {
      OsState::None => true,
      OsState::Ymm => ymm,
      OsState::Zmm => ymm && self.xcr0 & Self::XCR0_ZMM == Self::XCR0_ZMM,
    }
  }

  fn caps(&self) -> Caps {
    FEATURE_BITS
      .iter()
      .filter(|&&(reg, bit, state, _)| {
        let word = match reg {
          Reg::L1Ecx => self.l1_ecx,
          Reg::L7Ebx => self.l7_ebx,
        };
        word & (1 << bit) != 0 && self.os_saves(state)
      })
      .fold(x86::SSE2, |caps, &(.., cap)| caps | cap)
  }

  /// Intel hybrid (P+E core) client parts where AVX-512 is unreliable.
  fn is_intel_hybrid(&self) -> bool {
    self.intel
      && self.family == 6
      && matches!(
        self.model,
        0x97 | 0x9A | 0x9C // Alder Lake
        | 0xB7 | 0xBA | 0xBF // Raptor Lake
        | 0xAA | 0xAC // Meteor Lake
        | 0xBD // Lunar Lake
        | 0xC5 | 0xC6 // Arrow Lake
      )
  }
}

/// Display family and model from leaf 1 EAX.
#[cfg(feature = "std")]
const fn family_model(eax: u32) -> (u32, u32) {
  let base_family = (eax >> 8) & 0xF;
  let family = if base_family == 0xF {
    base_family + ((eax >> 20) & 0xFF)
  } else {
    base_family
  };
  let mut model = (eax >> 4) & 0xF;
  if base_family == 0x6 || base_family == 0xF {
    model |= ((eax >> 16) & 0xF) << 4;
  }
  (family, model)
}

/// `RSADLER_FORCE_AVX512=1` keeps AVX-512 on hybrid Intel CPUs.
#[cfg(feature = "std")]
fn hybrid_avx512_override() -> bool {
  std::env::var("RSADLER_FORCE_AVX512").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}
