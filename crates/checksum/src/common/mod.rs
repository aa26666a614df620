//! Shared building blocks for the checksum backends.
//!
//! - [`edges`]: head/body/tail splitting used by every vector kernel
//! - [`tables`]: const-fn CRC-32 lookup tables
//! - [`combine`]: CRC-32 and Adler-32 combination
//! - [`reference`]: slow oracles for tests and kernel agreement checks

pub mod combine;
pub(crate) mod edges;
pub mod reference;
pub mod tables;
