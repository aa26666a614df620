//! x86_64 CRC-32 kernel (PCLMULQDQ folding).
//!
//! Four 128-bit accumulators absorb 64 bytes per iteration; they are then
//! folded into one, single 16-byte blocks are absorbed, and the 128-bit
//! remainder is reduced to 64 bits and finally to 32 bits with a Barrett step.
//! Every constant comes from [`crate::constants::crc32::fold`].
//!
//! # Safety
//!
//! Uses `unsafe` for x86 SIMD intrinsics. Callers must ensure PCLMULQDQ and
//! SSE2 are available before executing the accelerated path (the dispatcher
//! does this).
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::{arch::x86_64::*, ptr};

use super::driver::drive;
use crate::{
  common::edges::copy_target,
  constants::crc32::fold::{BARRETT, FOLD_16B, FOLD_64B, FOLD_TO_64},
};

#[inline(always)]
unsafe fn keys(pair: (u64, u64)) -> __m128i {
  _mm_set_epi64x(pair.1 as i64, pair.0 as i64)
}

/// `x.lo * k.lo ^ x.hi * k.hi ^ next`.
#[inline]
#[target_feature(enable = "sse2,pclmulqdq")]
unsafe fn fold16(x: __m128i, k: __m128i, next: __m128i) -> __m128i {
  let lo = _mm_clmulepi64_si128::<0x00>(x, k);
  let hi = _mm_clmulepi64_si128::<0x11>(x, k);
  _mm_xor_si128(_mm_xor_si128(lo, hi), next)
}

#[inline(always)]
unsafe fn load<const COPY: bool>(src: *const u8, dst: *mut u8, off: usize) -> __m128i {
  let v = _mm_load_si128(src.add(off).cast());
  if COPY {
    _mm_storeu_si128(dst.add(off).cast(), v);
  }
  v
}

/// 128-bit remainder to the 32-bit raw register.
#[inline]
#[target_feature(enable = "sse2,pclmulqdq")]
unsafe fn reduce(x: __m128i) -> u32 {
  let k16 = keys(FOLD_16B);
  let mask = _mm_setr_epi32(-1, 0, -1, 0);

  // 128 -> 96 bits
  let t = _mm_clmulepi64_si128::<0x10>(x, k16);
  let x = _mm_xor_si128(_mm_srli_si128::<8>(x), t);

  // 96 -> 64 bits
  let t = _mm_srli_si128::<4>(x);
  let x = _mm_xor_si128(_mm_clmulepi64_si128::<0x00>(_mm_and_si128(x, mask), _mm_set_epi64x(0, FOLD_TO_64 as i64)), t);

  // Barrett
  let poly = keys(BARRETT);
  let t = _mm_clmulepi64_si128::<0x10>(_mm_and_si128(x, mask), poly);
  let t = _mm_clmulepi64_si128::<0x00>(_mm_and_si128(t, mask), poly);
  _mm_cvtsi128_si32(_mm_srli_si128::<4>(_mm_xor_si128(x, t))) as u32
}

#[target_feature(enable = "sse2,pclmulqdq")]
unsafe fn fold_pclmul<const COPY: bool>(crc: u32, body: &[u8], dst: *mut u8) -> u32 {
  let src = body.as_ptr();
  let blocks = body.len() / 16;

  let mut x0 = _mm_xor_si128(load::<COPY>(src, dst, 0), _mm_cvtsi32_si128(crc as i32));
  let mut x1 = load::<COPY>(src, dst, 16);
  let mut x2 = load::<COPY>(src, dst, 32);
  let mut x3 = load::<COPY>(src, dst, 48);

  let k64 = keys(FOLD_64B);
  let mut i = 4;
  while i + 4 <= blocks {
    let off = i * 16;
    x0 = fold16(x0, k64, load::<COPY>(src, dst, off));
    x1 = fold16(x1, k64, load::<COPY>(src, dst, off + 16));
    x2 = fold16(x2, k64, load::<COPY>(src, dst, off + 32));
    x3 = fold16(x3, k64, load::<COPY>(src, dst, off + 48));
    i += 4;
  }

  let k16 = keys(FOLD_16B);
  let mut x = fold16(fold16(fold16(x0, k16, x1), k16, x2), k16, x3);
  while i < blocks {
    x = fold16(x, k16, load::<COPY>(src, dst, i * 16));
    i += 1;
  }

  reduce(x)
}

/// CRC-32 with PCLMULQDQ folding.
#[inline]
pub fn crc32_pclmul_safe(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies PCLMULQDQ and SSE2 before selecting this kernel.
  unsafe { drive::<false>(crc, data, ptr::null_mut(), fold_pclmul::<false>) }
}

/// Fused copy and CRC-32 with PCLMULQDQ folding.
#[inline]
pub fn crc32_copy_pclmul_safe(crc: u32, data: &[u8], dst: &mut [u8]) -> u32 {
  let dst = copy_target(data, dst);
  // SAFETY: Dispatcher verifies PCLMULQDQ and SSE2; `dst` holds exactly
  // `data.len()` bytes.
  unsafe { drive::<true>(crc, data, dst.as_mut_ptr(), fold_pclmul::<true>) }
}
