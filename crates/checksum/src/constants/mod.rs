//! Precomputed constants for Adler-32 and CRC-32.
//!
//! Everything here is evaluated at compile time. Magic numbers appear only in
//! tests, where they pin the derived values to their published literals.

pub mod adler32;
pub mod crc32;
pub mod gf2;

/// Wrapper type forcing 64-byte (cache line) alignment on lookup tables.
#[repr(align(64))]
pub struct Aligned64<T>(pub T);
