//! Deflate window maintenance: the hash-chain slide.
//!
//! When a deflate compressor slides its window down by `wsize` bytes, every
//! position stored in its hash head and chain tables must move down by the
//! same amount, and positions that fall out of the window become `0`
//! ("no match"). That pass is a saturating subtract over two `u16` tables,
//! which is what the `slide_hash` dispatch slot vectorizes.
//!
//! The compressor itself is not part of this crate: it exposes its tables
//! through [`WindowState`] and calls [`fill_window`].

mod portable;

#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(target_arch = "aarch64")]
mod aarch64;

use backend::{
  ForceMode, KernelTier, candidates,
  dispatch::{Candidate, Selected, select_forced},
};
use platform::Caps;

use crate::{
  config,
  dispatchers::{SlideHashDispatcher, SlideHashFn},
};

// ─────────────────────────────────────────────────────────────────────────────
// Kernel Lists
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
pub(crate) const SLIDE_HASH_KERNELS: &[Candidate<SlideHashFn>] = candidates![
  "x86_64/avx2" => Caps::AVX2_READY => KernelTier::Simd256 => x86_64::slide_hash_avx2_safe,
  "x86_64/sse2" => Caps::SSE2 => KernelTier::Simd128 => x86_64::slide_hash_sse2_safe,
  "portable" => Caps::NONE => KernelTier::Portable => portable::slide_hash,
];

#[cfg(target_arch = "aarch64")]
pub(crate) const SLIDE_HASH_KERNELS: &[Candidate<SlideHashFn>] = candidates![
  "aarch64/neon" => Caps::NEON => KernelTier::Simd128 => aarch64::slide_hash_neon_safe,
  "portable" => Caps::NONE => KernelTier::Portable => portable::slide_hash,
];

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) const SLIDE_HASH_KERNELS: &[Candidate<SlideHashFn>] = candidates![
  "portable" => Caps::NONE => KernelTier::Portable => portable::slide_hash,
];

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher Selection
// ─────────────────────────────────────────────────────────────────────────────

const PORTABLE: Selected<SlideHashFn> = Selected::new("portable", KernelTier::Portable, portable::slide_hash);

/// Best slide kernel for `caps`, honoring `force` when eligible.
#[must_use]
pub fn select_slide_hash(caps: Caps, force: ForceMode) -> Selected<SlideHashFn> {
  select_forced(caps, SLIDE_HASH_KERNELS, force).unwrap_or(PORTABLE)
}

fn resolve_slide_hash() -> Selected<SlideHashFn> {
  select_slide_hash(platform::caps(), config::get().window)
}

pub(crate) static SLIDE_HASH: SlideHashDispatcher = SlideHashDispatcher::new("slide_hash", resolve_slide_hash);

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Move every position in `table` down by `wsize`; positions below `wsize`
/// become `0`.
///
/// ```
/// let mut head = [0u16, 100, 32768, 40000];
/// checksum::slide_hash(&mut head, 32768);
/// assert_eq!(head, [0, 0, 0, 7232]);
/// ```
#[inline]
pub fn slide_hash(table: &mut [u16], wsize: u16) {
  (SLIDE_HASH.get().func)(table, wsize);
}

/// The part of a deflate compressor's state the window slide touches.
pub trait WindowState {
  /// Window size in bytes (the distance the window slides by).
  fn window_size(&self) -> u16;

  /// The hash head table and the hash chain (`prev`) table.
  fn hash_tables(&mut self) -> (&mut [u16], &mut [u16]);
}

/// Slide both hash tables of `state` down by its window size.
///
/// The compressor calls this after moving the upper half of its window
/// buffer to the lower half and rebasing its own positions.
#[inline]
pub fn fill_window<S: WindowState + ?Sized>(state: &mut S) {
  let wsize = state.window_size();
  let slide = SLIDE_HASH.get().func;
  let (head, prev) = state.hash_tables();
  slide(head, wsize);
  slide(prev, wsize);
}
