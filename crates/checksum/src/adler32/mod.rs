//! Adler-32 (RFC 1950, zlib).
//!
//! This module provides:
//! - [`adler32`] / [`adler32_copy`] / [`adler32_combine`] - zlib-style free functions
//! - [`Adler32`] - streaming checksum implementing the `traits` hierarchy
//!
//! # Hardware Acceleration
//!
//! - x86_64: AVX2 (32 bytes per step), SSSE3 (`pmaddubsw`), SSE2
//! - aarch64: Advanced SIMD
//!
//! Every backend returns the same value as the portable code for every input.

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
  common::combine::combine_adler32,
  config,
  constants::adler32::SEED,
  dispatchers::{Adler32CopyDispatcher, Adler32CopyFn, Adler32Dispatcher, Adler32Fn},
};

// ─────────────────────────────────────────────────────────────────────────────
// Kernel Lists
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
pub(crate) const ADLER32_KERNELS: &[Candidate<Adler32Fn>] = candidates![
  "x86_64/avx2" => Caps::AVX2_READY => KernelTier::Simd256 => x86_64::adler32_avx2_safe,
  "x86_64/ssse3" => Caps::SSSE3_READY => KernelTier::Simd128 => x86_64::adler32_ssse3_safe,
  "x86_64/sse2" => Caps::SSE2 => KernelTier::Simd128 => x86_64::adler32_sse2_safe,
  "portable" => Caps::NONE => KernelTier::Portable => portable::update,
];

#[cfg(target_arch = "x86_64")]
pub(crate) const ADLER32_COPY_KERNELS: &[Candidate<Adler32CopyFn>] = candidates![
  "x86_64/avx2" => Caps::AVX2_READY => KernelTier::Simd256 => x86_64::adler32_copy_avx2_safe,
  "x86_64/ssse3" => Caps::SSSE3_READY => KernelTier::Simd128 => x86_64::adler32_copy_ssse3_safe,
  "x86_64/sse2" => Caps::SSE2 => KernelTier::Simd128 => x86_64::adler32_copy_sse2_safe,
  "portable" => Caps::NONE => KernelTier::Portable => portable::update_copy,
];

#[cfg(target_arch = "aarch64")]
pub(crate) const ADLER32_KERNELS: &[Candidate<Adler32Fn>] = candidates![
  "aarch64/neon" => Caps::NEON => KernelTier::Simd128 => aarch64::adler32_neon_safe,
  "portable" => Caps::NONE => KernelTier::Portable => portable::update,
];

#[cfg(target_arch = "aarch64")]
pub(crate) const ADLER32_COPY_KERNELS: &[Candidate<Adler32CopyFn>] = candidates![
  "aarch64/neon" => Caps::NEON => KernelTier::Simd128 => aarch64::adler32_copy_neon_safe,
  "portable" => Caps::NONE => KernelTier::Portable => portable::update_copy,
];

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) const ADLER32_KERNELS: &[Candidate<Adler32Fn>] = candidates![
  "portable" => Caps::NONE => KernelTier::Portable => portable::update,
];

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) const ADLER32_COPY_KERNELS: &[Candidate<Adler32CopyFn>] = candidates![
  "portable" => Caps::NONE => KernelTier::Portable => portable::update_copy,
];

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher Selection
// ─────────────────────────────────────────────────────────────────────────────

const PORTABLE: Selected<Adler32Fn> = Selected::new("portable", KernelTier::Portable, portable::update);
const PORTABLE_COPY: Selected<Adler32CopyFn> = Selected::new("portable", KernelTier::Portable, portable::update_copy);

/// Best Adler-32 kernel for `caps`, honoring `force` when eligible.
#[must_use]
pub fn select_adler32(caps: Caps, force: ForceMode) -> Selected<Adler32Fn> {
  select_forced(caps, ADLER32_KERNELS, force).unwrap_or(PORTABLE)
}

/// Best fused copy-and-Adler-32 kernel for `caps`, honoring `force` when eligible.
#[must_use]
pub fn select_adler32_copy(caps: Caps, force: ForceMode) -> Selected<Adler32CopyFn> {
  select_forced(caps, ADLER32_COPY_KERNELS, force).unwrap_or(PORTABLE_COPY)
}

fn resolve_adler32() -> Selected<Adler32Fn> {
  select_adler32(platform::caps(), config::get().adler32)
}

fn resolve_adler32_copy() -> Selected<Adler32CopyFn> {
  select_adler32_copy(platform::caps(), config::get().adler32)
}

pub(crate) static ADLER32: Adler32Dispatcher = Adler32Dispatcher::new("adler32", resolve_adler32);
pub(crate) static ADLER32_COPY: Adler32CopyDispatcher = Adler32CopyDispatcher::new("adler32_copy", resolve_adler32_copy);

// ─────────────────────────────────────────────────────────────────────────────
// Free Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Update a running Adler-32 with `data`.
///
/// `None` is the "no buffer" sentinel and returns the seed `1` whatever
/// `running` is; an empty slice returns `running` unchanged.
///
/// ```
/// let a = checksum::adler32(checksum::adler32(0, None), Some(b"Wikipedia"));
/// assert_eq!(a, 0x11E6_0398);
/// ```
#[inline]
#[must_use]
pub fn adler32(running: u32, data: Option<&[u8]>) -> u32 {
  match data {
    None => SEED,
    Some(data) => (ADLER32.get().func)(running, data),
  }
}

/// Copy `data` into `dst` and update a running Adler-32 in the same pass.
///
/// Returns exactly what [`adler32`] returns for the same arguments. `dst`
/// must be as long as `data`: debug builds assert it, release builds panic if
/// `dst` is shorter and leave any excess untouched. With `None` nothing is
/// copied and the seed is returned.
#[inline]
pub fn adler32_copy(running: u32, data: Option<&[u8]>, dst: &mut [u8]) -> u32 {
  match data {
    None => SEED,
    Some(data) => (ADLER32_COPY.get().func)(running, data, dst),
  }
}

/// Adler-32 of `A || B` from `adler32(A)`, `adler32(B)` and `len(B)`.
#[inline]
#[must_use]
pub const fn adler32_combine(adler_a: u32, adler_b: u32, len_b: usize) -> u32 {
  combine_adler32(adler_a, adler_b, len_b)
}

// ─────────────────────────────────────────────────────────────────────────────
// Streaming
// ─────────────────────────────────────────────────────────────────────────────

/// Adler-32 checksum (RFC 1950).
///
/// # Properties
///
/// - **Modulus**: 65521
/// - **Initial value**: 1
/// - **Layout**: `(b << 16) | a`
///
/// # Example
///
/// ```
/// use checksum::{Adler32, Checksum};
///
/// assert_eq!(Adler32::checksum(b"Wikipedia"), 0x11E6_0398);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adler32 {
  state: u32,
}

impl Adler32 {
  /// Resume from a previously finalized value.
  #[inline]
  #[must_use]
  pub const fn resume(adler: u32) -> Self {
    Self { state: adler }
  }

  /// Name of the backend the `adler32` slot resolved to (e.g. `"x86_64/avx2"`).
  #[must_use]
  pub fn backend_name() -> &'static str {
    ADLER32.backend_name()
  }

  /// Tier of the backend the `adler32` slot resolved to.
  #[must_use]
  pub fn backend_tier() -> KernelTier {
    ADLER32.tier()
  }
}

impl Default for Adler32 {
  #[inline]
  fn default() -> Self {
    Self { state: SEED }
  }
}

impl Checksum for Adler32 {
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
    self.state = (ADLER32.get().func)(self.state, data);
  }

  #[inline]
  fn finalize(&self) -> u32 {
    self.state
  }

  #[inline]
  fn reset(&mut self) {
    self.state = SEED;
  }
}

impl ChecksumCopy for Adler32 {
  #[inline]
  fn update_copy(&mut self, src: &[u8], dst: &mut [u8]) {
    self.state = (ADLER32_COPY.get().func)(self.state, src, dst);
  }
}

impl ChecksumCombine for Adler32 {
  #[inline]
  fn combine(a: u32, b: u32, len_b: usize) -> u32 {
    combine_adler32(a, b, len_b)
  }
}
