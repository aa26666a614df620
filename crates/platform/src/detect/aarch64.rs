//! aarch64 probe.
//!
//! Advanced SIMD is part of the AArch64 baseline. PMULL and the CRC32
//! instructions are optional and come from the OS (auxv/sysctl through
//! `is_aarch64_feature_detected!`) when `std` is available, otherwise only
//! from compile-time target features.

use crate::caps::Caps;

pub(super) fn detect() -> Caps {
  let mut caps = Caps::NEON;

  #[cfg(feature = "std")]
  {
    if std::arch::is_aarch64_feature_detected!("pmull") {
      caps |= Caps::PMULL;
    }
    if std::arch::is_aarch64_feature_detected!("crc") {
      caps |= Caps::CRC;
    }
  }

  #[cfg(not(feature = "std"))]
  {
    if cfg!(target_feature = "aes") {
      caps |= Caps::PMULL;
    }
    if cfg!(target_feature = "crc") {
      caps |= Caps::CRC;
    }
  }

  caps
}
