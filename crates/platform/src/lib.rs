//! CPU capability probe for zsum.
//!
//! This crate is the **single source of truth** for which instruction-set
//! extensions the checksum kernels may use.
//!
//! # Core Types
//!
//! - [`Caps`]: verified extensions on this machine
//! - [`Arch`]: architecture family the crate was compiled for
//!
//! # Main Entry Point
//!
//! ```
//! use platform::Caps;
//!
//! let caps = platform::caps();
//! if caps.has(Caps::AVX2_READY) {
//!   // 256-bit kernels are safe to run
//! }
//! ```
//!
//! # Design Philosophy
//!
//! 1. **One API**: kernel selection queries [`caps()`] instead of doing ad-hoc detection.
//! 2. **Verified, not inferred**: AVX-class flags require OS register-state support (XGETBV).
//! 3. **Cached**: the probe runs at most once per process (`OnceLock` with `std`, atomics without).
//! 4. **Never fails**: an unavailable query mechanism yields [`Caps::NONE`].
//! 5. **Miri-safe**: under Miri the probe always reports no extensions.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Modules
// ─────────────────────────────────────────────────────────────────────────────

pub mod caps;
mod detect;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

pub use caps::{Arch, Caps};

/// Capabilities usable by kernels on this machine.
///
/// The first call probes the CPU; later calls return the cached result
/// (narrowed by [`set_caps_override`] when one is set).
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::caps()
}

/// Probe the CPU directly, bypassing the cache and any override.
#[inline]
#[must_use]
pub fn detect() -> Caps {
  detect::detect()
}

/// Set or clear a capability override.
///
/// The override is intersected with the detected capabilities, so it can
/// force portable paths but can never enable an extension the CPU lacks.
///
/// # Example
///
/// ```
/// use platform::Caps;
///
/// platform::set_caps_override(Some(Caps::NONE));
/// assert!(platform::caps().is_portable());
/// platform::set_caps_override(None);
/// ```
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}
