//! Bit-at-a-time and byte-at-a-time reference implementations.
//!
//! These are the oracles every backend is checked against. They mirror the
//! mathematical definitions directly and are intentionally slow:
//!
//! - [`crc32_bitwise`]: one polynomial step per input bit, no tables
//! - [`adler32_naive`]: one modular reduction per input byte
//!
//! Both are `const fn`, so check values can be asserted at compile time.

// SAFETY: All indexing uses `i < data.len()` loop bounds.
#![allow(clippy::indexing_slicing)]

/// Bitwise reflected CRC-32 over the raw register.
///
/// `init` is the register value (already inverted by the caller when
/// following the zlib convention); the return value is the raw register.
#[must_use]
pub const fn crc32_bitwise(poly: u32, init: u32, data: &[u8]) -> u32 {
  let mut crc = init;
  let mut i = 0;
  while i < data.len() {
    crc ^= data[i] as u32;
    let mut bit = 0;
    while bit < 8 {
      crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
      bit += 1;
    }
    i += 1;
  }
  crc
}

/// CRC-32 with the zlib convention: `running` is a finalized value, `0` for a
/// fresh checksum.
#[must_use]
pub const fn crc32(running: u32, data: &[u8]) -> u32 {
  use crate::constants::crc32::{POLYNOMIAL, XOROUT};
  crc32_bitwise(POLYNOMIAL, running ^ XOROUT, data) ^ XOROUT
}

/// Adler-32 reducing after every byte.
///
/// Accepts any 32-bit running value, including ones whose halves are not yet
/// reduced below the modulus.
#[must_use]
pub const fn adler32_naive(running: u32, data: &[u8]) -> u32 {
  use crate::constants::adler32::{BASE, join, split};

  let (a, b) = split(running);
  if data.is_empty() {
    return running;
  }
  let (mut a, mut b) = (a % BASE, b % BASE);
  let mut i = 0;
  while i < data.len() {
    a = (a + data[i] as u32) % BASE;
    b = (b + a) % BASE;
    i += 1;
  }
  join(a, b)
}
