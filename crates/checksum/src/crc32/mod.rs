//! CRC-32 (ISO-HDLC: zlib, gzip, PNG, zip, Ethernet).
//!
//! This module provides:
//! - [`crc32`] / [`crc32_copy`] / [`crc32_combine`] - zlib-style free functions
//! - [`Crc32`] - streaming checksum implementing the `traits` hierarchy
//!
//! # Hardware Acceleration
//!
//! - x86_64: PCLMULQDQ folding
//! - aarch64: PMULL folding, CRC32 extension (`crc32x`, `crc32b`)
//!
//! Everything else uses slicing-by-8 tables generated at compile time.

mod portable;

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
mod driver;

#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(target_arch = "aarch64")]
mod aarch64;

use backend::{
  ForceMode, KernelTier, candidates,
  dispatch::{Candidate, Selected, select_forced},
};
use platform::Caps;
use traits::{Checksum, ChecksumCombine, ChecksumCopy};

use crate::{
  common::combine::combine_crc32,
  config,
  dispatchers::{Crc32CopyDispatcher, Crc32CopyFn, Crc32Dispatcher, Crc32Fn},
};

// ─────────────────────────────────────────────────────────────────────────────
// Kernel Lists
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
pub(crate) const CRC32_KERNELS: &[Candidate<Crc32Fn>] = candidates![
  "x86_64/pclmul" => Caps::PCLMUL_READY => KernelTier::Folding => x86_64::crc32_pclmul_safe,
  "portable" => Caps::NONE => KernelTier::Portable => portable::update,
];

#[cfg(target_arch = "x86_64")]
pub(crate) const CRC32_COPY_KERNELS: &[Candidate<Crc32CopyFn>] = candidates![
  "x86_64/pclmul" => Caps::PCLMUL_READY => KernelTier::Folding => x86_64::crc32_copy_pclmul_safe,
  "portable" => Caps::NONE => KernelTier::Portable => portable::update_copy,
];

#[cfg(target_arch = "aarch64")]
pub(crate) const CRC32_KERNELS: &[Candidate<Crc32Fn>] = candidates![
  "aarch64/pmull" => Caps::PMULL_READY => KernelTier::Folding => aarch64::crc32_pmull_safe,
  "aarch64/crc" => Caps::CRC => KernelTier::HwCrc => aarch64::crc32_crc_safe,
  "portable" => Caps::NONE => KernelTier::Portable => portable::update,
];

#[cfg(target_arch = "aarch64")]
pub(crate) const CRC32_COPY_KERNELS: &[Candidate<Crc32CopyFn>] = candidates![
  "aarch64/pmull" => Caps::PMULL_READY => KernelTier::Folding => aarch64::crc32_copy_pmull_safe,
  "aarch64/crc" => Caps::CRC => KernelTier::HwCrc => aarch64::crc32_copy_crc_safe,
  "portable" => Caps::NONE => KernelTier::Portable => portable::update_copy,
];

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) const CRC32_KERNELS: &[Candidate<Crc32Fn>] = candidates![
  "portable" => Caps::NONE => KernelTier::Portable => portable::update,
];

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) const CRC32_COPY_KERNELS: &[Candidate<Crc32CopyFn>] = candidates![
  "portable" => Caps::NONE => KernelTier::Portable => portable::update_copy,
];

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher Selection
// ─────────────────────────────────────────────────────────────────────────────

const PORTABLE: Selected<Crc32Fn> = Selected::new("portable", KernelTier::Portable, portable::update);
const PORTABLE_COPY: Selected<Crc32CopyFn> = Selected::new("portable", KernelTier::Portable, portable::update_copy);

/// Best CRC-32 kernel for `caps`, honoring `force` when eligible.
#[must_use]
pub fn select_crc32(caps: Caps, force: ForceMode) -> Selected<Crc32Fn> {
  select_forced(caps, CRC32_KERNELS, force).unwrap_or(PORTABLE)
}

/// Best fused copy-and-CRC-32 kernel for `caps`, honoring `force` when eligible.
#[must_use]
pub fn select_crc32_copy(caps: Caps, force: ForceMode) -> Selected<Crc32CopyFn> {
  select_forced(caps, CRC32_COPY_KERNELS, force).unwrap_or(PORTABLE_COPY)
}

fn resolve_crc32() -> Selected<Crc32Fn> {
  select_crc32(platform::caps(), config::get().crc32)
}

fn resolve_crc32_copy() -> Selected<Crc32CopyFn> {
  select_crc32_copy(platform::caps(), config::get().crc32)
}

pub(crate) static CRC32: Crc32Dispatcher = Crc32Dispatcher::new("crc32", resolve_crc32);
pub(crate) static CRC32_COPY: Crc32CopyDispatcher = Crc32CopyDispatcher::new("crc32_copy", resolve_crc32_copy);

// ─────────────────────────────────────────────────────────────────────────────
// Free Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Update a running CRC-32 with `data`.
///
/// `None` is the "no buffer" sentinel and returns `0` whatever `running` is;
/// an empty slice returns `running` unchanged.
///
/// ```
/// assert_eq!(checksum::crc32(0, Some(b"123456789")), 0xCBF4_3926);
/// assert_eq!(checksum::crc32(0xDEAD_BEEF, None), 0);
/// ```
#[inline]
#[must_use]
pub fn crc32(running: u32, data: Option<&[u8]>) -> u32 {
  match data {
    None => 0,
    Some(data) => (CRC32.get().func)(running, data),
  }
}

/// Copy `data` into `dst` and update a running CRC-32 in the same pass.
///
/// Returns exactly what [`crc32`] returns for the same arguments. `dst` must
/// be as long as `data`: debug builds assert it, release builds panic if `dst`
/// is shorter. With `None` nothing is copied and `0` is returned.
#[inline]
pub fn crc32_copy(running: u32, data: Option<&[u8]>, dst: &mut [u8]) -> u32 {
  match data {
    None => 0,
    Some(data) => (CRC32_COPY.get().func)(running, data, dst),
  }
}

/// CRC-32 of `A || B` from `crc32(A)`, `crc32(B)` and `len(B)`.
#[inline]
#[must_use]
pub const fn crc32_combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
  combine_crc32(crc_a, crc_b, len_b)
}

// ─────────────────────────────────────────────────────────────────────────────
// Streaming
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32 checksum (IEEE 802.3 / ISO-HDLC).
///
/// # Properties
///
/// - **Polynomial**: 0x04C11DB7 (normal), 0xEDB88320 (reflected)
/// - **Initial value**: 0xFFFFFFFF
/// - **Final XOR**: 0xFFFFFFFF
/// - **Reflect input/output**: Yes
///
/// # Example
///
/// ```
/// use checksum::{Checksum, Crc32};
///
/// assert_eq!(Crc32::checksum(b"123456789"), 0xCBF4_3926);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Crc32 {
  /// Finalized value so far (`0` for a fresh checksum).
  crc: u32,
}

impl Crc32 {
  /// Resume from a previously finalized value.
  #[inline]
  #[must_use]
  pub const fn resume(crc: u32) -> Self {
    Self { crc }
  }

  /// Name of the backend the `crc32` slot resolved to (e.g. `"x86_64/pclmul"`).
  #[must_use]
  pub fn backend_name() -> &'static str {
    CRC32.backend_name()
  }

  /// Tier of the backend the `crc32` slot resolved to.
  #[must_use]
  pub fn backend_tier() -> KernelTier {
    CRC32.tier()
  }
}

impl Checksum for Crc32 {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Self::default()
  }

  #[inline]
  fn with_initial(initial: u32) -> Self {
    Self::resume(initial)
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.crc = (CRC32.get().func)(self.crc, data);
  }

  #[inline]
  fn finalize(&self) -> u32 {
    self.crc
  }

  #[inline]
  fn reset(&mut self) {
    self.crc = 0;
  }
}

impl ChecksumCopy for Crc32 {
  #[inline]
  fn update_copy(&mut self, src: &[u8], dst: &mut [u8]) {
    self.crc = (CRC32_COPY.get().func)(self.crc, src, dst);
  }
}

impl ChecksumCombine for Crc32 {
  #[inline]
  fn combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
    combine_crc32(crc_a, crc_b, len_b)
  }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec::Vec;

  use super::*;
  use crate::{common::reference, constants::crc32::CHECK};

  const TEST_DATA: &[u8] = b"123456789";

  fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 131 + (i >> 9)) as u8).collect()
  }

  #[test]
  fn known_vectors() {
    assert_eq!(crc32(0, Some(TEST_DATA)), CHECK);
    assert_eq!(Crc32::checksum(b"The quick brown fox jumps over the lazy dog"), 0x414F_A339);
    assert_eq!(Crc32::checksum(b""), 0);
  }

  #[test]
  fn sentinel_restarts() {
    for running in [0, 1, 0xDEAD_BEEF, u32::MAX] {
      assert_eq!(crc32(running, None), 0);
      assert_eq!(crc32(running, Some(&[])), running);
      let mut dst = [0u8; 0];
      assert_eq!(crc32_copy(running, None, &mut dst), 0);
    }
  }

  #[test]
  fn dispatched_matches_reference() {
    let data = pattern(9000);
    for len in [0, 1, 2, 15, 16, 17, 63, 64, 65, 127, 128, 1000, 8192, 9000] {
      assert_eq!(crc32(0, Some(&data[..len])), reference::crc32(0, &data[..len]), "len {len}");
    }
  }

  #[test]
  fn streaming_equals_oneshot() {
    let data = pattern(5000);
    let mut h = Crc32::new();
    for chunk in data.chunks(333) {
      h.update(chunk);
    }
    assert_eq!(h.finalize(), Crc32::checksum(&data));
    h.reset();
    assert_eq!(h.finalize(), 0);
  }

  #[test]
  fn resume_continues() {
    let mut h = Crc32::new();
    h.update(&TEST_DATA[..5]);
    let mut resumed = Crc32::resume(h.finalize());
    resumed.update(&TEST_DATA[5..]);
    assert_eq!(resumed.finalize(), CHECK);
  }

  #[test]
  fn copy_streaming() {
    let data = pattern(3000);
    let mut dst = std::vec![0u8; data.len()];
    let mut h = Crc32::new();
    for (src, out) in data.chunks(1000).zip(dst.chunks_mut(1000)) {
      h.update_copy(src, out);
    }
    assert_eq!(h.finalize(), Crc32::checksum(&data));
    assert_eq!(dst, data);
  }

  #[test]
  fn combine_all_splits() {
    for split in 0..=TEST_DATA.len() {
      let (a, b) = TEST_DATA.split_at(split);
      assert_eq!(Crc32::combine(Crc32::checksum(a), Crc32::checksum(b), b.len()), CHECK, "split {split}");
    }
  }

  #[test]
  fn selection_is_pure() {
    assert_eq!(select_crc32(Caps::NONE, ForceMode::Auto).name, "portable");
    assert_eq!(select_crc32_copy(Caps::NONE, ForceMode::Pclmul).name, "portable");
    #[cfg(target_arch = "x86_64")]
    {
      assert_eq!(select_crc32(Caps::PCLMUL_READY, ForceMode::Auto).name, "x86_64/pclmul");
      assert_eq!(select_crc32(Caps::PCLMUL_READY, ForceMode::Portable).name, "portable");
      assert_eq!(select_crc32(Caps::PCLMULQDQ, ForceMode::Auto).name, "portable");
    }
    #[cfg(target_arch = "aarch64")]
    {
      let caps = Caps::PMULL_READY | Caps::CRC;
      assert_eq!(select_crc32(caps, ForceMode::Auto).name, "aarch64/pmull");
      assert_eq!(select_crc32(caps, ForceMode::HwCrc).name, "aarch64/crc");
      assert_eq!(select_crc32(Caps::NEON | Caps::CRC, ForceMode::Auto).name, "aarch64/crc");
    }
  }

  #[test]
  fn backend_is_listed() {
    let name = Crc32::backend_name();
    assert!(CRC32_KERNELS.iter().any(|c| c.name == name));
  }
}
