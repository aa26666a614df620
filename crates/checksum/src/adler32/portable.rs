//! Portable Adler-32.
//!
//! Sums run unreduced for up to [`NMAX`] bytes, then both halves are reduced
//! once. The 16-byte inner block gives the compiler a fixed trip count to
//! unroll.

use crate::{
  common::edges::copy_target,
  constants::adler32::{BASE, NMAX, join, split},
};

/// Below this length the per-chunk bookkeeping costs more than it saves.
const SHORT: usize = 16;

/// Fold `data` into `adler`.
#[inline]
#[must_use]
pub fn update(adler: u32, data: &[u8]) -> u32 {
  let (mut a, mut b) = split(adler);

  if let [byte] = data {
    a = (a + u32::from(*byte)) % BASE;
    b = (b + a) % BASE;
    return join(a, b);
  }

  if data.is_empty() {
    return adler;
  }

  if data.len() < SHORT {
    for &byte in data {
      a += u32::from(byte);
      b += a;
    }
    return join(a % BASE, b % BASE);
  }

  for chunk in data.chunks(NMAX) {
    let (blocks, rest) = chunk.as_chunks::<16>();
    for block in blocks {
      for &byte in block {
        a += u32::from(byte);
        b += a;
      }
    }
    for &byte in rest {
      a += u32::from(byte);
      b += a;
    }
    a %= BASE;
    b %= BASE;
  }

  join(a, b)
}

/// Copy `data` into `dst` and fold it into `adler`, one `NMAX` chunk at a time
/// so each chunk is still in cache when it is summed.
///
/// # Panics
///
/// Panics if `dst` is shorter than `data`.
#[inline]
pub fn update_copy(adler: u32, data: &[u8], dst: &mut [u8]) -> u32 {
  let dst = copy_target(data, dst);
  let mut adler = adler;
  for (src, out) in data.chunks(NMAX).zip(dst.chunks_mut(NMAX)) {
    out.copy_from_slice(src);
    adler = update(adler, src);
  }
  adler
}
