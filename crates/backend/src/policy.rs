//! Backend force modes.
//!
//! A [`ForceMode`] pins a dispatch slot to one backend (usually from an
//! environment variable). Forcing never bypasses capability checks: a forced
//! backend the CPU cannot run falls back to automatic selection.

use core::{fmt, str::FromStr};

/// Requested backend for a dispatch slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ForceMode {
  /// Best eligible backend.
  #[default]
  Auto,
  /// Scalar/table backend.
  Portable,
  /// x86_64 SSE2.
  Sse2,
  /// x86_64 SSSE3.
  Ssse3,
  /// x86_64 AVX2.
  Avx2,
  /// aarch64 Advanced SIMD.
  Neon,
  /// x86_64 PCLMULQDQ folding.
  Pclmul,
  /// aarch64 PMULL folding.
  Pmull,
  /// aarch64 CRC32 instructions.
  HwCrc,
}

impl ForceMode {
  /// Every mode, in declaration order.
  pub const ALL: [Self; 9] =
    [Self::Auto, Self::Portable, Self::Sse2, Self::Ssse3, Self::Avx2, Self::Neon, Self::Pclmul, Self::Pmull, Self::HwCrc];

  /// Name as accepted by [`FromStr`] and used as the kernel id suffix in
  /// candidate names (`"x86_64/avx2"` has id `"avx2"`).
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Sse2 => "sse2",
      Self::Ssse3 => "ssse3",
      Self::Avx2 => "avx2",
      Self::Neon => "neon",
      Self::Pclmul => "pclmul",
      Self::Pmull => "pmull",
      Self::HwCrc => "crc",
    }
  }

  /// Whether `kernel_name` (e.g. `"aarch64/crc"`) is the backend this mode pins.
  #[must_use]
  pub fn matches(self, kernel_name: &str) -> bool {
    if self == Self::Auto {
      return false;
    }
    kernel_name.rsplit('/').next() == Some(self.name())
  }
}

impl fmt::Display for ForceMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Error returned when a force-mode string is not recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized backend name (expected one of: auto, portable, sse2, ssse3, avx2, neon, pclmul, pmull, crc)")]
pub struct ParseForceError;

impl FromStr for ForceMode {
  type Err = ParseForceError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if s.is_empty() {
      return Ok(Self::Auto);
    }
    Self::ALL
      .iter()
      .copied()
      .find(|mode| mode.name().eq_ignore_ascii_case(s))
      .or_else(|| s.eq_ignore_ascii_case("hwcrc").then_some(Self::HwCrc))
      .or_else(|| s.eq_ignore_ascii_case("scalar").then_some(Self::Portable))
      .ok_or(ParseForceError)
  }
}
