//! Adler-32 and CRC-32 with runtime-dispatched SIMD backends.
//!
//! The checksums zlib needs, plus the hash-chain slide used by its
//! deflate window. Every operation resolves its backend once, on first
//! use, from the CPU capabilities detected at runtime.
//!
//! # Operations
//!
//! | Operation | Backends |
//! |-----------|----------|
//! | [`adler32`], [`adler32_copy`] | AVX2, SSSE3, SSE2, NEON, portable |
//! | [`crc32`], [`crc32_copy`] | PCLMULQDQ, PMULL, ARMv8 CRC, portable |
//! | [`slide_hash`] | AVX2, SSE2, NEON, portable |
//!
//! The `_copy` forms checksum while duplicating the input, so the source
//! is read once. [`adler32_combine`] and [`crc32_combine`] join results
//! computed over adjacent chunks.
//!
//! # Example
//!
//! ```rust
//! use checksum::{Adler32, Checksum, ChecksumCombine, Crc32, adler32, crc32};
//!
//! let data = b"123456789";
//! assert_eq!(crc32(0, Some(data)), 0xCBF4_3926);
//! assert_eq!(crc32(0, None), 0);
//! assert_eq!(adler32(adler32(0, None), Some(b"Wikipedia")), 0x11E6_0398);
//!
//! // Streaming
//! let mut hasher = Crc32::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), 0xCBF4_3926);
//!
//! // Combine
//! let (a, b) = data.split_at(4);
//! let joined = Adler32::combine(Adler32::checksum(a), Adler32::checksum(b), b.len());
//! assert_eq!(joined, Adler32::checksum(data));
//! ```
//!
//! # Backend Selection
//!
//! Selection can be pinned per family with `ZSUM_ADLER32_FORCE`,
//! `ZSUM_CRC32_FORCE` and `ZSUM_WINDOW_FORCE` (see [`config`]). A forced
//! backend the CPU cannot run is logged and ignored. [`DispatchInfo`]
//! reports what each slot resolved to.
//!
//! # no_std Support
//!
//! Disable the `std` feature for embedded use; the environment overrides are
//! then unavailable. x86_64 still probes CPUID/XGETBV at runtime. On aarch64
//! detection falls back to compile-time target features, since
//! `is_aarch64_feature_detected!` needs `std`.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod adler32;
mod crc32;
mod window;

pub mod common;
pub mod config;
pub mod constants;
pub mod dispatchers;
pub mod introspect;
pub mod parallel;


#[cfg(feature = "alloc")]
#[doc(hidden)]
pub mod bench;

pub use adler32::{Adler32, adler32, adler32_combine, adler32_copy, select_adler32, select_adler32_copy};
pub use crc32::{Crc32, crc32, crc32_combine, crc32_copy, select_crc32, select_crc32_copy};
pub use introspect::{DispatchInfo, KernelIntrospect, SlotInfo, backend_for};
#[cfg(feature = "std")]
pub use traits::io;
pub use traits::{Checksum, ChecksumCombine, ChecksumCopy, ChecksumMismatch};
pub use window::{WindowState, fill_window, select_slide_hash, slide_hash};
