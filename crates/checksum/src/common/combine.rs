//! GF(2) matrix operations for CRC-32 combination.
//!
//! Given `crc(A)`, `crc(B)` and `len(B)`, `crc(A || B)` is computed without
//! touching `A` again:
//!
//! ```text
//! crc(A || B) = crc(A) * x^(8*len(B)) mod G(x) XOR crc(B)
//! ```
//!
//! Multiplication by `x^(8*len(B))` is a 32x32 matrix over GF(2), raised to
//! the needed power by square-and-multiply in O(log len(B)).

// SAFETY: All indexing uses bounded loop indices (0..32).
#![allow(clippy::indexing_slicing)]

/// A 32x32 GF(2) matrix; column `i` is the image of bit `i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gf2Matrix32([u32; 32]);

impl Gf2Matrix32 {
  /// The identity matrix.
  #[must_use]
  pub const fn identity() -> Self {
    let mut m = [0u32; 32];
    let mut i = 0;
    while i < 32 {
      m[i] = 1 << i;
      i += 1;
    }
    Self(m)
  }

  /// The effect of feeding one zero bit to a reflected CRC register.
  #[must_use]
  pub const fn zero_bit(poly: u32) -> Self {
    let mut m = [0u32; 32];
    m[0] = poly;
    let mut j = 1;
    while j < 32 {
      m[j] = 1 << (j - 1);
      j += 1;
    }
    Self(m)
  }

  /// The effect of feeding one zero byte.
  #[must_use]
  pub const fn zero_byte(poly: u32) -> Self {
    Self::zero_bit(poly).square().square().square()
  }

  /// `self * v`.
  #[inline]
  #[must_use]
  pub const fn apply(self, v: u32) -> u32 {
    let mut out = 0u32;
    let mut i = 0;
    while i < 32 {
      if (v >> i) & 1 != 0 {
        out ^= self.0[i];
      }
      i += 1;
    }
    out
  }

  /// `self * other`.
  #[must_use]
  pub const fn mul(self, other: Self) -> Self {
    let mut out = [0u32; 32];
    let mut i = 0;
    while i < 32 {
      out[i] = self.apply(other.0[i]);
      i += 1;
    }
    Self(out)
  }

  /// `self * self`.
  #[inline]
  #[must_use]
  pub const fn square(self) -> Self {
    self.mul(self)
  }
}

/// One zero byte through the CRC-32 register.
pub const CRC32_ZERO_BYTE: Gf2Matrix32 = Gf2Matrix32::zero_byte(crate::constants::crc32::POLYNOMIAL);

/// Combine two finalized CRC-32 values of adjacent chunks.
///
/// The pre- and post-inversion of the zlib convention cancel: the `!0` seed
/// of `B` shifted through `len(B)` bytes is exactly what `crc(A)` contributes
/// in place of it.
#[must_use]
pub const fn combine_crc32(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
  if len_b == 0 {
    return crc_a;
  }

  let mut power = CRC32_ZERO_BYTE;
  let mut acc = Gf2Matrix32::identity();
  let mut n = len_b;
  while n > 0 {
    if n & 1 != 0 {
      acc = acc.mul(power);
    }
    power = power.square();
    n >>= 1;
  }

  acc.apply(crc_a) ^ crc_b
}

/// Combine two Adler-32 values of adjacent chunks.
///
/// With `A = (a1, b1)`, `B = (a2, b2)` and `n = len(B) mod BASE`:
///
/// ```text
/// a = a1 + a2 - 1
/// b = b1 + b2 + n * a1 - n
/// ```
///
/// all modulo `BASE`.
#[must_use]
pub const fn combine_adler32(adler_a: u32, adler_b: u32, len_b: usize) -> u32 {
  use crate::constants::adler32::{BASE, join, split};

  let base = BASE as u64;
  let n = (len_b as u64) % base;
  let (a1, b1) = split(adler_a);
  let (a2, b2) = split(adler_b);
  let (a1, b1, a2, b2) = (a1 as u64 % base, b1 as u64 % base, a2 as u64 % base, b2 as u64 % base);

  let a = (a1 + a2 + base - 1) % base;
  let b = (b1 + b2 + (n * a1) % base + base - n) % base;
  join(a as u32, b as u32)
}
