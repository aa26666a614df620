//! CPU capability flags.
//!
//! [`Caps`] answers one question: "which instruction-set extensions may the
//! checksum kernels execute on this machine?" Every flag is only ever set after
//! the probe has verified it, including OS enablement for extensions that need
//! extra register state.
//!
//! # Usage
//!
//! ```
//! use platform::Caps;
//!
//! let caps = platform::caps();
//! if caps.contains(Caps::PCLMUL_READY) {
//!   // carry-less multiply CRC folding is safe to run
//! }
//! ```

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

bitflags::bitflags! {
  /// Set of verified instruction-set extensions.
  ///
  /// Bits 0-15 hold x86_64 features, bits 16-30 hold aarch64 features. Bit 31
  /// is reserved for the detection cache's ready marker. An empty set means
  /// "no extensions": only portable kernels are eligible.
  ///
  /// `Caps` is `Copy` and can be shared freely across threads.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
  pub struct Caps: u32 {
    // x86_64
    /// SSE2 (128-bit integer SIMD).
    const SSE2 = 1 << 0;
    /// SSSE3 (`pmaddubsw`, `pshufb`).
    const SSSE3 = 1 << 1;
    /// SSE4.1.
    const SSE41 = 1 << 2;
    /// SSE4.2.
    const SSE42 = 1 << 3;
    /// PCLMULQDQ (64x64 carry-less multiply).
    const PCLMULQDQ = 1 << 4;
    /// AVX, only set when the OS saves YMM state.
    const AVX = 1 << 5;
    /// AVX2 (256-bit integer SIMD), only set when the OS saves YMM state.
    const AVX2 = 1 << 6;

    // aarch64
    /// Advanced SIMD.
    const NEON = 1 << 16;
    /// PMULL/PMULL2 (64x64 polynomial multiply).
    const PMULL = 1 << 17;
    /// ARMv8 CRC32 instructions.
    const CRC = 1 << 18;
  }
}

impl Caps {
  /// No extensions detected.
  pub const NONE: Self = Self::empty();

  /// Requirements of the PCLMULQDQ CRC-32 folding kernel.
  pub const PCLMUL_READY: Self = Self::PCLMULQDQ.union(Self::SSE2);

  /// Requirements of the SSSE3 Adler-32 kernel.
  pub const SSSE3_READY: Self = Self::SSSE3.union(Self::SSE2);

  /// Requirements of 256-bit integer kernels.
  pub const AVX2_READY: Self = Self::AVX2.union(Self::AVX).union(Self::SSE2);

  /// Requirements of the PMULL CRC-32 folding kernel.
  pub const PMULL_READY: Self = Self::PMULL.union(Self::NEON);

  /// Returns `true` if every feature in `required` is present.
  ///
  /// An empty requirement is always satisfied.
  #[inline]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    self.contains(required)
  }

  /// Returns `true` if no extensions are present.
  #[inline]
  #[must_use]
  pub const fn is_portable(self) -> bool {
    self.is_empty()
  }
}

impl fmt::Display for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_empty() {
      return f.write_str("none");
    }
    let mut first = true;
    for (name, _) in self.iter_names() {
      if !first {
        f.write_str("+")?;
      }
      f.write_str(name)?;
      first = false;
    }
    Ok(())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture family, as seen by kernel selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arch {
  X86_64,
  Aarch64,
  Other,
}

impl Arch {
  /// Architecture this crate was compiled for.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else {
      Self::Other
    }
  }

  /// Short architecture name.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::string::ToString;

  use super::*;

  #[test]
  fn empty_requirement_always_satisfied() {
    assert!(Caps::NONE.has(Caps::NONE));
    assert!(Caps::all().has(Caps::NONE));
  }

  #[test]
  fn ready_masks_require_their_base() {
    assert!(!Caps::PCLMULQDQ.has(Caps::PCLMUL_READY));
    assert!((Caps::PCLMULQDQ | Caps::SSE2).has(Caps::PCLMUL_READY));
    assert!(!(Caps::AVX2 | Caps::SSE2).has(Caps::AVX2_READY));
    assert!((Caps::AVX2 | Caps::AVX | Caps::SSE2).has(Caps::AVX2_READY));
    assert!(!Caps::PMULL.has(Caps::PMULL_READY));
  }

  #[test]
  fn display_lists_feature_names() {
    assert_eq!(Caps::NONE.to_string(), "none");
    assert_eq!((Caps::SSE2 | Caps::PCLMULQDQ).to_string(), "SSE2+PCLMULQDQ");
  }

  #[test]
  fn arch_matches_target() {
    #[cfg(target_arch = "x86_64")]
    assert_eq!(Arch::current(), Arch::X86_64);
    #[cfg(target_arch = "aarch64")]
    assert_eq!(Arch::current(), Arch::Aarch64);
  }
}
