//! Checksum traits shared across the zsum workspace.
//!
//! `no_std` compatible; the `std` feature adds the [`io`] adapters.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Checksum`] | Streaming checksum with a seed, updates and verification |
//! | [`ChecksumCopy`] | Fused copy-and-checksum in one pass over the source |
//! | [`ChecksumCombine`] | Combine results computed over adjacent chunks |
//!
//! # Error Types
//!
//! - [`ChecksumMismatch`] - a computed checksum differed from the expected one
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;
pub mod error;
#[cfg(feature = "std")]
pub mod io;

pub use checksum::{Checksum, ChecksumCombine, ChecksumCopy};
pub use error::ChecksumMismatch;
