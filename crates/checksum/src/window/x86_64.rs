//! x86_64 hash-chain slide (SSE2, AVX2 saturating subtract).
//!
//! # Safety
//!
//! Uses `unsafe` for x86 SIMD intrinsics. Callers must ensure the required
//! features are available (the dispatcher does this).
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::*;

use super::portable;
use crate::common::edges::Layout;

#[target_feature(enable = "sse2")]
unsafe fn slide_sse2(table: &mut [u16], wsize: u16) {
  let layout = Layout::of_slice(table, 16, 8);
  let (head, body, tail) = layout.split_mut(table);
  portable::slide_hash(head, wsize);

  let w = _mm_set1_epi16(wsize as i16);
  for lanes in body.as_chunks_mut::<8>().0 {
    let p = lanes.as_mut_ptr().cast::<__m128i>();
    _mm_store_si128(p, _mm_subs_epu16(_mm_load_si128(p), w));
  }

  portable::slide_hash(tail, wsize);
}

#[target_feature(enable = "avx2")]
unsafe fn slide_avx2(table: &mut [u16], wsize: u16) {
  let layout = Layout::of_slice(table, 32, 16);
  let (head, body, tail) = layout.split_mut(table);
  portable::slide_hash(head, wsize);

  let w = _mm256_set1_epi16(wsize as i16);
  for lanes in body.as_chunks_mut::<16>().0 {
    let p = lanes.as_mut_ptr().cast::<__m256i>();
    _mm256_store_si256(p, _mm256_subs_epu16(_mm256_load_si256(p), w));
  }

  portable::slide_hash(tail, wsize);
}

/// Hash-chain slide with SSE2.
#[inline]
pub fn slide_hash_sse2_safe(table: &mut [u16], wsize: u16) {
  // SAFETY: Dispatcher verifies SSE2 before selecting this kernel.
  unsafe { slide_sse2(table, wsize) }
}

/// Hash-chain slide with AVX2.
#[inline]
pub fn slide_hash_avx2_safe(table: &mut [u16], wsize: u16) {
  // SAFETY: Dispatcher verifies AVX2 (and OS YMM state) before selecting this kernel.
  unsafe { slide_avx2(table, wsize) }
}
