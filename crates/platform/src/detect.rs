//! Runtime CPU capability probe.
//!
//! - [`detect`] queries the hardware directly (uncached).
//! - [`caps`] memoizes the probe once per process and applies the test override.
//!
//! # Caching
//!
//! With `std` the probe result lives in a `OnceLock`. Without `std` it is
//! published through a single `AtomicU32` (bit 31 marks "ready"), so a reader
//! that sees the ready bit also sees the complete flag set. Racing threads may
//! both run the probe; it is a pure function of the hardware, so they publish
//! the same value. Only 32-bit atomic loads and stores are needed, so the
//! cache builds on targets without 64-bit atomics.
//!
//! # Overrides
//!
//! [`set_caps_override`] narrows the reported set for testing. The override is
//! intersected with the hardware caps, so it can only ever remove features.
//!
//! # Miri
//!
//! Under Miri the probe reports no extensions.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::caps::Caps;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "x86_64")]
mod x86_64;

// ─────────────────────────────────────────────────────────────────────────────
// Probe
// ─────────────────────────────────────────────────────────────────────────────

/// Probe the executing CPU without consulting the cache.
///
/// Never fails: if the query mechanism is unavailable the result is
/// [`Caps::NONE`].
#[must_use]
pub fn detect() -> Caps {
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(all(not(miri), target_arch = "x86_64"))]
  {
    x86_64::detect()
  }

  #[cfg(all(not(miri), target_arch = "aarch64"))]
  {
    aarch64::detect()
  }

  #[cfg(all(not(miri), not(any(target_arch = "x86_64", target_arch = "aarch64"))))]
  {
    Caps::NONE
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cache
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "std")]
static CACHED: std::sync::OnceLock<Caps> = std::sync::OnceLock::new();

#[cfg(not(feature = "std"))]
static CACHED: AtomicU32 = AtomicU32::new(0);

/// Marks a published value in the packed atomics.
const READY: u32 = 1 << 31;

const _: () = assert!(Caps::all().bits() & READY == 0, "READY collides with a capability bit");

#[inline]
const fn pack(caps: Caps) -> u32 {
  READY | caps.bits()
}

#[inline]
fn unpack(packed: u32) -> Option<Caps> {
  (packed & READY != 0).then(|| Caps::from_bits_truncate(packed))
}

fn hardware() -> Caps {
  #[cfg(feature = "std")]
  {
    *CACHED.get_or_init(|| {
      let caps = detect();
      log::debug!("cpu capabilities detected: {caps} ({})", crate::Arch::current());
      caps
    })
  }

  #[cfg(not(feature = "std"))]
  {
    if let Some(caps) = unpack(CACHED.load(Ordering::Acquire)) {
      return caps;
    }
    let caps = detect();
    log::debug!("cpu capabilities detected: {caps} ({})", crate::Arch::current());
    CACHED.store(pack(caps), Ordering::Release);
    caps
  }
}

/// Capabilities usable by kernels, probed once per process.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  let hw = hardware();
  match override_value() {
    Some(mask) => hw & mask,
    None => hw,
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Override
// ─────────────────────────────────────────────────────────────────────────────

static OVERRIDE: AtomicU32 = AtomicU32::new(0);

/// Restrict (or stop restricting) the capabilities reported by [`caps`].
///
/// Dispatch slots that already resolved keep their backend; tests that need a
/// specific backend call the pure selection functions instead.
pub fn set_caps_override(value: Option<Caps>) {
  let packed = value.map_or(0, pack);
  OVERRIDE.store(packed, Ordering::Release);
}

/// Whether an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  OVERRIDE.load(Ordering::Acquire) & READY != 0
}

fn override_value() -> Option<Caps> {
  unpack(OVERRIDE.load(Ordering::Acquire))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn detect_is_deterministic() {
    assert_eq!(detect(), detect());
  }

  #[test]
  fn cached_matches_uncached() {
    assert_eq!(hardware(), detect());
  }

  #[test]
  fn detected_caps_belong_to_this_arch() {
    let caps = detect();
    #[cfg(target_arch = "x86_64")]
    assert!((caps & (Caps::NEON | Caps::PMULL | Caps::CRC)).is_empty());
    #[cfg(target_arch = "aarch64")]
    assert!((caps & (Caps::SSE2 | Caps::AVX2 | Caps::PCLMULQDQ)).is_empty());
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    assert!(caps.is_empty());
  }

  #[test]
  fn avx2_implies_os_enabled_avx() {
    let caps = detect();
    if caps.has(Caps::AVX2) {
      assert!(caps.has(Caps::AVX), "AVX2 reported without verified AVX state");
    }
  }

  #[test]
  fn packed_encoding_marks_ready() {
    assert_eq!(unpack(0), None);
    assert_eq!(unpack(pack(Caps::NONE)), Some(Caps::NONE));
    assert_eq!(unpack(pack(Caps::all())), Some(Caps::all()));
    assert_eq!(unpack(pack(Caps::AVX2_READY | Caps::CRC)), Some(Caps::AVX2_READY | Caps::CRC));
    assert_eq!(pack(Caps::NONE), READY);
    assert_eq!(pack(Caps::all()) & !READY, Caps::all().bits());
  }

  #[cfg(not(feature = "std"))]
  #[test]
  fn no_std_cache_publishes_ready_value() {
    let caps = hardware();
    assert_eq!(unpack(CACHED.load(Ordering::Acquire)), Some(caps));
  }

  #[test]
  fn override_only_removes_features() {
    let hw = hardware();
    set_caps_override(Some(Caps::all()));
    assert!(has_override());
    assert_eq!(caps(), hw);

    set_caps_override(Some(Caps::NONE));
    assert_eq!(caps(), Caps::NONE);

    set_caps_override(None);
    assert!(!has_override());
    assert_eq!(caps(), hw);
  }
}
