//! Kernel signatures and dispatch slot types for every dispatched operation.
//!
//! Each operation owns one process-wide slot (a [`Dispatcher`]) that resolves
//! to the best kernel on first use:
//!
//! | Slot | Kernel signature |
//! |------|------------------|
//! | `adler32` | [`Adler32Fn`] |
//! | `adler32_copy` | [`Adler32CopyFn`] |
//! | `crc32` | [`Crc32Fn`] |
//! | `crc32_copy` | [`Crc32CopyFn`] |
//! | `slide_hash` | [`SlideHashFn`] |
//!
//! # Usage
//!
//! ```ignore
//! use checksum::dispatchers::{Adler32Dispatcher, Adler32Fn};
//! use backend::dispatch::{Selected, select_forced};
//!
//! fn select_adler32() -> Selected<Adler32Fn> {
//!   select_forced(platform::caps(), ADLER32_KERNELS, config::get().adler32).unwrap_or(PORTABLE)
//! }
//!
//! static ADLER32: Adler32Dispatcher = Adler32Dispatcher::new("adler32", select_adler32);
//! ```

use backend::Dispatcher;

// ─────────────────────────────────────────────────────────────────────────────
// Adler-32
// ─────────────────────────────────────────────────────────────────────────────

/// Adler-32 kernel: `(running, data) -> running`.
///
/// `running` is a packed `(b << 16) | a` value; kernels accept halves that are
/// not yet reduced below the modulus and always return reduced halves.
pub type Adler32Fn = fn(u32, &[u8]) -> u32;

/// Fused copy and Adler-32 kernel: `(running, src, dst) -> running`.
///
/// Writes `src` to `dst[..src.len()]`; panics if `dst` is shorter.
pub type Adler32CopyFn = fn(u32, &[u8], &mut [u8]) -> u32;

/// Dispatch slot for [`Adler32Fn`].
pub type Adler32Dispatcher = Dispatcher<Adler32Fn>;

/// Dispatch slot for [`Adler32CopyFn`].
pub type Adler32CopyDispatcher = Dispatcher<Adler32CopyFn>;

// ─────────────────────────────────────────────────────────────────────────────
// CRC-32
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32 kernel over finalized values: `(crc, data) -> crc`, `0` to start.
pub type Crc32Fn = fn(u32, &[u8]) -> u32;

/// Fused copy and CRC-32 kernel.
pub type Crc32CopyFn = fn(u32, &[u8], &mut [u8]) -> u32;

/// Dispatch slot for [`Crc32Fn`].
pub type Crc32Dispatcher = Dispatcher<Crc32Fn>;

/// Dispatch slot for [`Crc32CopyFn`].
pub type Crc32CopyDispatcher = Dispatcher<Crc32CopyFn>;

// ─────────────────────────────────────────────────────────────────────────────
// Window
// ─────────────────────────────────────────────────────────────────────────────

/// Hash-chain slide: saturating subtract of the window size from every entry.
pub type SlideHashFn = fn(&mut [u16], u16);

/// Dispatch slot for [`SlideHashFn`].
pub type SlideHashDispatcher = Dispatcher<SlideHashFn>;
