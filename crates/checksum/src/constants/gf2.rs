//! Const GF(2) polynomial arithmetic.
//!
//! Every folding and Barrett constant the carry-less multiply backends use is
//! derived here from the generator polynomial at compile time, so a new
//! instruction-set port reads the same numbers as the reference math.
//!
//! Polynomials are stored MSB-first ("normal" form): bit `i` is the
//! coefficient of `x^i`.

/// Reverse the lower `width` bits of `value`.
///
/// `reflect_bits_u64(0b0001, 4) == 0b1000`.
#[must_use]
pub const fn reflect_bits_u64(value: u64, width: u32) -> u64 {
  let mut out = 0u64;
  let mut i = 0;
  while i < width {
    out |= ((value >> i) & 1) << (width - 1 - i);
    i += 1;
  }
  out
}

/// Degree of a non-zero polynomial (index of its highest set bit).
#[must_use]
pub const fn degree(p: u128) -> u32 {
  127 - p.leading_zeros()
}

/// Quotient of `dividend / divisor` over GF(2).
#[must_use]
pub const fn gf2_div_128(dividend: u128, divisor: u128) -> u128 {
  let d = degree(divisor);
  let mut rem = dividend;
  let mut quot = 0u128;
  while rem != 0 && degree(rem) >= d {
    let shift = degree(rem) - d;
    quot |= 1 << shift;
    rem ^= divisor << shift;
  }
  quot
}

/// `a * b mod poly` where `poly` is a degree-32 polynomial with its x^32 term.
#[must_use]
pub const fn mul_mod_32(a: u64, b: u64, poly: u64) -> u64 {
  let mut product = 0u64;
  let mut i = 0;
  while i < 32 {
    if (b >> i) & 1 == 1 {
      product ^= a << i;
    }
    i += 1;
  }
  let mut bit = 63;
  while bit >= 32 {
    if (product >> bit) & 1 == 1 {
      product ^= poly << (bit - 32);
    }
    bit -= 1;
  }
  product
}

/// `x^n mod poly` by square-and-multiply.
#[must_use]
pub const fn xpow_mod_32(n: u32, poly: u64) -> u64 {
  let mut result = 1u64;
  let mut base = 2u64;
  let mut e = n;
  while e > 0 {
    if e & 1 == 1 {
      result = mul_mod_32(result, base, poly);
    }
    base = mul_mod_32(base, base, poly);
    e >>= 1;
  }
  result
}

#[cfg(test)]
mod tests {
  use super::*;

  const P: u64 = 0x1_04C1_1DB7;

  #[test]
  fn reflect_is_an_involution() {
    for v in [0u64, 1, 0xEDB8_8320, 0x04C1_1DB7, 0xFFFF_FFFF] {
      assert_eq!(reflect_bits_u64(reflect_bits_u64(v, 32), 32), v);
    }
    assert_eq!(reflect_bits_u64(0x04C1_1DB7, 32), 0xEDB8_8320);
  }

  #[test]
  fn small_powers_are_monomials() {
    assert_eq!(xpow_mod_32(0, P), 1);
    assert_eq!(xpow_mod_32(31, P), 1 << 31);
    // x^32 = P - x^32 over GF(2).
    assert_eq!(xpow_mod_32(32, P), 0x04C1_1DB7);
  }

  #[test]
  fn exponents_add() {
    let a = xpow_mod_32(100, P);
    let b = xpow_mod_32(77, P);
    assert_eq!(mul_mod_32(a, b, P), xpow_mod_32(177, P));
  }

  #[test]
  fn division_recovers_quotient() {
    let q = gf2_div_128(1u128 << 64, P as u128);
    assert_eq!(degree(q), 32);
    // (x^64 / P) * P differs from x^64 only below x^32.
    let mut product = 0u128;
    let mut i = 0;
    while i < 64 {
      if (q >> i) & 1 == 1 {
        product ^= (P as u128) << i;
      }
      i += 1;
    }
    assert!(((product ^ (1u128 << 64)) >> 32) == 0);
  }
}
