//! CRC-32 (ISO-HDLC) constants.
//!
//! Polynomial: 0x04C11DB7 (reflected: 0xEDB88320)
//! Used by: zlib, gzip, PNG, zip, Ethernet

use super::gf2;

/// Generator polynomial in reflected (LSB-first) form.
pub const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Generator polynomial in normal form with the explicit x^32 term.
pub const POLY_FULL: u64 = 0x1_04C1_1DB7;

/// Initial register value and final XOR.
pub const XOROUT: u32 = 0xFFFF_FFFF;

/// `CRC-32("123456789")`.
pub const CHECK: u32 = 0xCBF4_3926;

/// Slicing-by-8 lookup tables, generated at compile time.
///
/// `TABLES.0[0]` is the classic byte-at-a-time table. 8 KiB, cache-line aligned.
pub static TABLES: super::Aligned64<[[u32; 256]; 8]> =
  super::Aligned64(crate::common::tables::generate_crc32_tables_8(POLYNOMIAL));

/// Carry-less multiply constants for the PCLMULQDQ/PMULL folding backends.
///
/// In reflected form a 64-bit lane holding `k` encodes the polynomial
/// `reflect32(k >> 1)`; a fold over `d` bits needs the pair
/// `(x^(d+32) mod P, x^(d-32) mod P)` (low lane multiplies the low half of the
/// accumulator, high lane the high half).
pub mod fold {
  use super::{POLY_FULL, gf2};

  /// Reflected `x^n mod P`, shifted left one bit into a 33-bit lane.
  #[must_use]
  pub const fn key(n: u32) -> u64 {
    gf2::reflect_bits_u64(gf2::xpow_mod_32(n, POLY_FULL), 32) << 1
  }

  /// `(lo, hi)` pair that folds an accumulator forward by `bits`.
  #[must_use]
  pub const fn pair(bits: u32) -> (u64, u64) {
    (key(bits + 32), key(bits - 32))
  }

  /// Fold four 128-bit lanes forward by one 64-byte block.
  pub const FOLD_64B: (u64, u64) = pair(512);

  /// Fold one 128-bit lane into the next (16 bytes).
  pub const FOLD_16B: (u64, u64) = pair(128);

  /// Reduce the 96-bit remainder to 64 bits.
  pub const FOLD_TO_64: u64 = key(64);

  /// Barrett pair `(P', mu)`: the reflected 33-bit polynomial and the
  /// reflected quotient `floor(x^64 / P)`.
  pub const BARRETT: (u64, u64) = (
    gf2::reflect_bits_u64(POLY_FULL, 33),
    gf2::reflect_bits_u64(gf2::gf2_div_128(1u128 << 64, POLY_FULL as u128) as u64, 33),
  );
}
