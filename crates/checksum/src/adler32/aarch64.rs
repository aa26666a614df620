//! aarch64 Adler-32 kernel (Advanced SIMD).
//!
//! Same accumulator scheme as the x86_64 kernels: pairwise widening adds for
//! the byte sum, widening multiply-accumulate against weights 32..1 for the
//! weighted sum.
//!
//! # Safety
//!
//! Uses `unsafe` for NEON intrinsics. NEON is part of the AArch64 baseline;
//! the dispatcher still checks it before selecting this kernel.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::{arch::aarch64::*, ptr};

use super::driver::drive;
use crate::{common::edges::copy_target, constants::adler32::BLOCK};

/// Weight of each byte position in a 32-byte block.
static WEIGHTS: [u8; BLOCK] = [
  32, 31, 30, 29, 28, 27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1,
];

#[target_feature(enable = "neon")]
unsafe fn fold_neon<const COPY: bool>(a: u32, b: u32, run: &[u8], dst: *mut u8) -> (u32, u32) {
  let blocks = run.len() / BLOCK;
  let w0 = vld1q_u8(WEIGHTS.as_ptr());
  let w1 = vld1q_u8(WEIGHTS.as_ptr().add(16));

  let mut p_v = vsetq_lane_u32::<0>(a * blocks as u32, vdupq_n_u32(0));
  let mut a_v = vdupq_n_u32(0);
  let mut b_v = vsetq_lane_u32::<0>(b, vdupq_n_u32(0));

  let src = run.as_ptr();
  for i in 0..blocks {
    let off = i * BLOCK;
    let v0 = vld1q_u8(src.add(off));
    let v1 = vld1q_u8(src.add(off + 16));
    if COPY {
      vst1q_u8(dst.add(off), v0);
      vst1q_u8(dst.add(off + 16), v1);
    }

    p_v = vaddq_u32(p_v, a_v);
    a_v = vpadalq_u16(a_v, vaddq_u16(vpaddlq_u8(v0), vpaddlq_u8(v1)));

    // Four products per u16 lane: at most 255 * (32 + 24 + 16 + 8).
    let m = vmull_u8(vget_low_u8(v0), vget_low_u8(w0));
    let m = vmlal_high_u8(m, v0, w0);
    let m = vmlal_u8(m, vget_low_u8(v1), vget_low_u8(w1));
    let m = vmlal_high_u8(m, v1, w1);
    b_v = vpadalq_u16(b_v, m);
  }

  b_v = vaddq_u32(b_v, vshlq_n_u32::<5>(p_v));
  (a + vaddvq_u32(a_v), vaddvq_u32(b_v))
}

/// Adler-32 with NEON.
#[inline]
pub fn adler32_neon_safe(adler: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies NEON before selecting this kernel.
  unsafe { drive::<false>(adler, data, ptr::null_mut(), 16, fold_neon::<false>) }
}

/// Fused copy and Adler-32 with NEON.
#[inline]
pub fn adler32_copy_neon_safe(adler: u32, data: &[u8], dst: &mut [u8]) -> u32 {
  let dst = copy_target(data, dst);
  // SAFETY: Dispatcher verifies NEON; `dst` holds exactly `data.len()` bytes.
  unsafe { drive::<true>(adler, data, dst.as_mut_ptr(), 16, fold_neon::<true>) }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec::Vec;

  use super::*;
  use crate::{
    common::reference::adler32_naive,
    constants::adler32::{CHUNK, SEED},
  };

  fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u32).wrapping_mul(0x9E37_79B9).rotate_left(7) as u8).collect()
  }

  #[test]
  fn matches_reference_at_every_offset() {
    let data = pattern(2 * CHUNK + 300);
    for offset in 0..32 {
      for len in [0, 1, 63, 64, 65, 100, 1000, CHUNK, CHUNK + 1, 2 * CHUNK + 200] {
        let input = &data[offset..offset + len];
        assert_eq!(adler32_neon_safe(SEED, input), adler32_naive(SEED, input), "offset {offset} len {len}");
      }
    }
  }

  #[test]
  fn saturated_input_does_not_overflow() {
    let data = [0xFFu8; 3 * CHUNK + 77];
    assert_eq!(adler32_neon_safe(0xFFF0_FFF0, &data), adler32_naive(0xFFF0_FFF0, &data));
  }

  #[test]
  fn copy_matches_plain_and_copies() {
    let data = pattern(9000);
    let src = &data[5..];
    let mut dst = std::vec![0u8; src.len()];
    assert_eq!(adler32_copy_neon_safe(7, src, &mut dst), adler32_neon_safe(7, src));
    assert_eq!(dst, src);
  }
}
