//! x86_64 probe: CPUID feature bits gated by XGETBV for AVX-class state.

// CPUID and XGETBV are intrinsics; each call site documents why it is sound.
#![allow(unsafe_code)]
#![allow(unused_unsafe)]

use core::arch::x86_64::{__cpuid, __cpuid_count, _xgetbv};

use crate::caps::Caps;

// CPUID.1:EDX
const EDX1_SSE2: u32 = 1 << 26;

// CPUID.1:ECX
const ECX1_PCLMULQDQ: u32 = 1 << 1;
const ECX1_SSSE3: u32 = 1 << 9;
const ECX1_SSE41: u32 = 1 << 19;
const ECX1_SSE42: u32 = 1 << 20;
const ECX1_XSAVE: u32 = 1 << 26;
const ECX1_OSXSAVE: u32 = 1 << 27;
const ECX1_AVX: u32 = 1 << 28;

// CPUID.(7,0):EBX
const EBX7_AVX2: u32 = 1 << 5;

/// XCR0 bits 1-2: the OS saves and restores XMM and YMM state.
const XCR0_AVX_MASK: u64 = 0x6;

/// Raw register words consumed by [`decode`].
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct CpuidWords {
  pub max_leaf: u32,
  pub ecx1: u32,
  pub edx1: u32,
  pub ebx7: u32,
  /// `None` when XGETBV must not be executed (OSXSAVE clear).
  pub xcr0: Option<u64>,
}

pub(super) fn detect() -> Caps {
  // SGX enclaves trap on CPUID.
  if cfg!(target_env = "sgx") {
    return Caps::NONE;
  }
  decode(read_words())
}

fn read_words() -> CpuidWords {
  // SAFETY: CPUID is available on every x86_64 CPU.
  let leaf0 = unsafe { __cpuid(0) };
  if leaf0.eax < 1 {
    return CpuidWords::default();
  }

  // SAFETY: leaf 1 is within the reported maximum.
  let leaf1 = unsafe { __cpuid(1) };

  let xsave_enabled = leaf1.ecx & (ECX1_XSAVE | ECX1_OSXSAVE) == (ECX1_XSAVE | ECX1_OSXSAVE);
  let xcr0 = if xsave_enabled {
    // SAFETY: OSXSAVE is set, so the OS has enabled XGETBV.
    Some(unsafe { _xgetbv(0) })
  } else {
    None
  };

  let ebx7 = if leaf0.eax >= 7 {
    // SAFETY: leaf 7 is within the reported maximum.
    unsafe { __cpuid_count(7, 0) }.ebx
  } else {
    0
  };

  CpuidWords { max_leaf: leaf0.eax, ecx1: leaf1.ecx, edx1: leaf1.edx, ebx7, xcr0 }
}

/// Translate raw CPUID/XCR0 words into capability flags.
///
/// Pure, so the gating rules can be tested with synthetic register values.
pub(super) fn decode(words: CpuidWords) -> Caps {
  let mut caps = Caps::NONE;
  if words.max_leaf < 1 {
    return caps;
  }

  if words.edx1 & EDX1_SSE2 != 0 {
    caps |= Caps::SSE2;
  }
  if words.ecx1 & ECX1_SSSE3 != 0 {
    caps |= Caps::SSSE3;
  }
  if words.ecx1 & ECX1_SSE41 != 0 {
    caps |= Caps::SSE41;
  }
  if words.ecx1 & ECX1_SSE42 != 0 {
    caps |= Caps::SSE42;
  }
  if words.ecx1 & ECX1_PCLMULQDQ != 0 {
    caps |= Caps::PCLMULQDQ;
  }

  // CPUID reports what the CPU implements, XCR0 what the OS will preserve.
  let os_avx = words.xcr0.is_some_and(|xcr0| xcr0 & XCR0_AVX_MASK == XCR0_AVX_MASK);
  if os_avx {
    if words.ecx1 & ECX1_AVX != 0 {
      caps |= Caps::AVX;
    }
    if words.max_leaf >= 7 && words.ebx7 & EBX7_AVX2 != 0 {
      caps |= Caps::AVX2;
    }
  }

  caps
}
