//! Kernel acceleration tiers.
//!
//! Tiers classify backends for introspection and logging. Selection itself is
//! driven by candidate order, not by comparing tiers.
//!
//! # Tier Overview
//!
//! | Tier | Name | Description |
//! |------|------|-------------|
//! | 0 | Portable | Scalar/table code, always available |
//! | 1 | HwCrc | Dedicated CRC instructions (ARMv8 CRC32) |
//! | 2 | Simd128 | 128-bit integer SIMD (SSE2, SSSE3, NEON) |
//! | 3 | Simd256 | 256-bit integer SIMD (AVX2) |
//! | 4 | Folding | Carry-less multiply folding (PCLMULQDQ, PMULL) |

use core::fmt;

/// Kernel acceleration tier.
///
/// Tiers implement `Ord`; anything above [`KernelTier::Portable`] needs a
/// hardware capability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KernelTier {
  /// Scalar or table-driven code. Always available, always correct.
  #[default]
  Portable = 0,

  /// Dedicated CRC instructions.
  ///
  /// Available on aarch64 with the CRC extension. x86 SSE4.2 `crc32` computes
  /// CRC-32C only and does not qualify.
  HwCrc = 1,

  /// 128-bit integer SIMD.
  Simd128 = 2,

  /// 256-bit integer SIMD.
  Simd256 = 3,

  /// Carry-less multiply folding.
  Folding = 4,
}

impl KernelTier {
  /// Short lowercase name.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      Self::HwCrc => "hwcrc",
      Self::Simd128 => "simd128",
      Self::Simd256 => "simd256",
      Self::Folding => "folding",
    }
  }

  /// Whether this tier relies on an optional CPU extension.
  #[inline]
  #[must_use]
  pub const fn is_accelerated(self) -> bool {
    !matches!(self, Self::Portable)
  }
}

impl fmt::Display for KernelTier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
