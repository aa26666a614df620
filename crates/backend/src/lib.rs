//! Kernel selection and dispatch for zsum.
//!
//! Every accelerated operation (Adler-32, CRC-32, hash-table slide) owns one
//! [`Dispatcher`] slot. The slot resolves on first use to the best kernel the
//! CPU supports and stays fixed for the life of the process.
//!
//! - **Selection**: pure functions over [`platform::Caps`] ([`dispatch::select`])
//! - **Forcing**: [`ForceMode`] pins a slot to one backend, clamped to what the CPU supports
//! - **Caching**: [`OnceCache`] publishes the resolved kernel exactly once
//!
//! # Usage
//!
//! Checksum modules register kernels as an ordered list of `Candidate`s,
//! best first, ending with an always-eligible portable entry:
//!
//! ```ignore
//! use backend::{candidates, dispatch::{select, Selected}, KernelTier};
//! use platform::Caps;
//!
//! fn select_crc32() -> Selected<Crc32Fn> {
//!   select(platform::caps(), candidates![
//!     "x86_64/pclmul" => Caps::PCLMUL_READY => KernelTier::Folding  => crc32_pclmul,
//!     "portable"      => Caps::NONE         => KernelTier::Portable => crc32_portable,
//!   ])
//!   .unwrap_or(PORTABLE)
//! }
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod cache;
pub mod dispatch;
pub mod policy;
pub mod tier;

pub use cache::OnceCache;
pub use dispatch::{Candidate, Dispatcher, Selected, select, select_forced};
pub use platform;
pub use platform::{Arch, Caps};
pub use policy::{ForceMode, ParseForceError};
pub use tier::KernelTier;
