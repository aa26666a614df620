//! Adler-32 and CRC-32 checksums with runtime CPU dispatch.
//!
//! `zsum` re-exports the public surface of the workspace: the zlib-style
//! checksum operations, their streaming types, the deflate hash-chain slide
//! and dispatch introspection. Each operation picks the fastest backend the
//! running CPU supports on first use and keeps it for the process lifetime.
//!
//! # Quick Start
//!
//! ```
//! use zsum::{Checksum, Crc32, adler32, crc32};
//!
//! let crc = crc32(crc32(0, None), Some(b"123456789"));
//! assert_eq!(crc, 0xCBF4_3926);
//! assert_eq!(adler32(adler32(0, None), Some(b"Wikipedia")), 0x11E6_0398);
//!
//! let mut hasher = Crc32::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), crc);
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Runtime CPU detection, environment overrides, `std::io` adapters, threads |
//!
//! ## `no_std` Usage
//!
//! ```toml
//! [dependencies]
//! zsum = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std`, x86_64 still detects extensions at runtime through CPUID. On
//! aarch64 only extensions enabled at compile time are used.
#![cfg_attr(not(feature = "std"), no_std)]

pub use checksum::{
  // Adler-32
  Adler32,
  // Traits
  Checksum,
  ChecksumCombine,
  ChecksumCopy,
  ChecksumMismatch,
  // CRC-32
  Crc32,
  // Introspection
  DispatchInfo,
  KernelIntrospect,
  SlotInfo,
  // Window
  WindowState,
  adler32,
  adler32_combine,
  adler32_copy,
  backend_for,
  config,
  crc32,
  crc32_combine,
  crc32_copy,
  fill_window,
  parallel,
  slide_hash,
};
#[cfg(feature = "std")]
pub use checksum::io;
pub use platform::{Arch, Caps};

/// Detected CPU capabilities, probed once per process.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  platform::caps()
}
