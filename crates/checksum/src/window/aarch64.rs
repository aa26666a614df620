//! aarch64 hash-chain slide (`vqsubq_u16`).
//!
//! # Safety
//!
//! Uses `unsafe` for NEON intrinsics. NEON is part of the AArch64 baseline;
//! the dispatcher still checks it before selecting this kernel.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::aarch64::*;

use super::portable;
use crate::common::edges::Layout;

#[target_feature(enable = "neon")]
unsafe fn slide_neon(table: &mut [u16], wsize: u16) {
  let layout = Layout::of_slice(table, 16, 8);
  let (head, body, tail) = layout.split_mut(table);
  portable::slide_hash(head, wsize);

  let w = vdupq_n_u16(wsize);
  for lanes in body.as_chunks_mut::<8>().0 {
    let p = lanes.as_mut_ptr();
    vst1q_u16(p, vqsubq_u16(vld1q_u16(p), w));
  }

  portable::slide_hash(tail, wsize);
}

/// Hash-chain slide with NEON.
#[inline]
pub fn slide_hash_neon_safe(table: &mut [u16], wsize: u16) {
  // SAFETY: Dispatcher verifies NEON before selecting this kernel.
  unsafe { slide_neon(table, wsize) }
}
