//! Portable CRC-32: byte-at-a-time table lookup and slicing-by-8.
//!
//! The `raw_*` functions work on the inverted register; [`update`] and
//! [`update_copy`] take and return finalized values like every other kernel.

use crate::{
  common::edges::copy_target,
  constants::crc32::{TABLES, XOROUT},
};

/// Below this length slicing-by-8 setup is not worth it.
const SLICE_MIN: usize = 16;

/// Update the raw register one byte at a time.
#[inline]
#[allow(clippy::indexing_slicing)] // index is 0..=255 by mask, table is [u32; 256]
pub(crate) fn raw_bytewise(mut crc: u32, data: &[u8]) -> u32 {
  let table = &TABLES.0[0];
  for &b in data {
    crc = table[((crc ^ u32::from(b)) & 0xFF) as usize] ^ (crc >> 8);
  }
  crc
}

/// Update the raw register eight bytes per step.
#[inline]
#[allow(clippy::indexing_slicing)] // every index is masked to 0..=255, tables are [[u32; 256]; 8]
pub(crate) fn raw_slice8(mut crc: u32, data: &[u8]) -> u32 {
  if data.len() < SLICE_MIN {
    return raw_bytewise(crc, data);
  }

  let t = &TABLES.0;
  let (words, rest) = data.as_chunks::<8>();
  for word in words {
    let [b0, b1, b2, b3, b4, b5, b6, b7] = *word;
    let lo = u32::from_le_bytes([b0, b1, b2, b3]) ^ crc;
    let hi = u32::from_le_bytes([b4, b5, b6, b7]);
    crc = t[7][(lo & 0xFF) as usize]
      ^ t[6][((lo >> 8) & 0xFF) as usize]
      ^ t[5][((lo >> 16) & 0xFF) as usize]
      ^ t[4][(lo >> 24) as usize]
      ^ t[3][(hi & 0xFF) as usize]
      ^ t[2][((hi >> 8) & 0xFF) as usize]
      ^ t[1][((hi >> 16) & 0xFF) as usize]
      ^ t[0][(hi >> 24) as usize];
  }
  raw_bytewise(crc, rest)
}

/// CRC-32 of `data` continuing from the finalized value `crc`.
#[inline]
#[must_use]
pub fn update(crc: u32, data: &[u8]) -> u32 {
  if data.is_empty() {
    return crc;
  }
  raw_slice8(crc ^ XOROUT, data) ^ XOROUT
}

/// Copy `data` into `dst` and fold it into `crc`.
///
/// # Panics
///
/// Panics if `dst` is shorter than `data`.
#[inline]
pub fn update_copy(crc: u32, data: &[u8], dst: &mut [u8]) -> u32 {
  let dst = copy_target(data, dst);
  dst.copy_from_slice(data);
  update(crc, data)
}
