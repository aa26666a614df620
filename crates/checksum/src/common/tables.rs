//! Const-fn CRC-32 lookup table generation.
//!
//! Tables are computed at compile time and embedded in the binary, so there is
//! no first-use initialization for concurrent callers to race on.

// SAFETY: All indexing uses bounded loop indices (0..256, 0..8).
#![allow(clippy::indexing_slicing)]

/// One entry of the byte-at-a-time table for a reflected polynomial.
#[must_use]
pub const fn crc32_table_entry(poly: u32, index: u8) -> u32 {
  let mut crc = index as u32;
  let mut i = 0;
  while i < 8 {
    crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
    i += 1;
  }
  crc
}

/// Slicing-by-8 tables for a reflected polynomial.
///
/// `tables[k][b]` is the CRC register after feeding byte `b` followed by `k`
/// zero bytes, so eight table lookups advance the register by eight bytes.
#[must_use]
pub const fn generate_crc32_tables_8(poly: u32) -> [[u32; 256]; 8] {
  let mut tables = [[0u32; 256]; 8];

  let mut i = 0;
  while i < 256 {
    tables[0][i] = crc32_table_entry(poly, i as u8);
    i += 1;
  }

  let mut k = 1;
  while k < 8 {
    i = 0;
    while i < 256 {
      let prev = tables[k - 1][i];
      tables[k][i] = tables[0][(prev & 0xFF) as usize] ^ (prev >> 8);
      i += 1;
    }
    k += 1;
  }

  tables
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{common::reference::crc32_bitwise, constants::crc32::POLYNOMIAL};

  #[test]
  fn entries_match_bitwise_reference() {
    for b in 0..=255u8 {
      assert_eq!(crc32_table_entry(POLYNOMIAL, b), crc32_bitwise(POLYNOMIAL, 0, &[b]));
    }
  }

  #[test]
  fn higher_tables_append_zero_bytes() {
    let tables = generate_crc32_tables_8(POLYNOMIAL);
    for k in 1..8 {
      for b in [0u8, 1, 0x5A, 0xFF] {
        let mut input = [0u8; 8];
        input[0] = b;
        assert_eq!(tables[k][b as usize], crc32_bitwise(POLYNOMIAL, 0, &input[..=k]));
      }
    }
  }
}
