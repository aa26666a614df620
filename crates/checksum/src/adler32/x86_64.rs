//! x86_64 Adler-32 kernels (SSE2, SSSE3, AVX2).
//!
//! All three plug a block fold into the shared driver, which handles the
//! unaligned edges and the modular reduction between runs.
//!
//! Per block the kernels keep three accumulators:
//!
//! - `a_v`: running byte sum (`psadbw` against zero)
//! - `b_v`: position-weighted byte sums (weights 32 down to 1)
//! - `p_v`: sum of every `a_v` seen at a block boundary, later scaled by 32
//!
//! # Safety
//!
//! Uses `unsafe` for x86 SIMD intrinsics. Callers must ensure the required
//! features are available before executing the accelerated path (the
//! dispatcher does this).
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::{arch::x86_64::*, ptr};

use super::driver::drive;
use crate::{common::edges::copy_target, constants::adler32::BLOCK};

#[inline(always)]
unsafe fn hsum_128(v: __m128i) -> u32 {
  let s = _mm_add_epi32(v, _mm_unpackhi_epi64(v, v));
  let s = _mm_add_epi32(s, _mm_shuffle_epi32::<0xB1>(s));
  _mm_cvtsi128_si32(s) as u32
}

// ─────────────────────────────────────────────────────────────────────────────
// SSE2
// ─────────────────────────────────────────────────────────────────────────────

#[target_feature(enable = "sse2")]
unsafe fn fold_sse2<const COPY: bool>(a: u32, b: u32, run: &[u8], dst: *mut u8) -> (u32, u32) {
  let blocks = run.len() / BLOCK;
  let zero = _mm_setzero_si128();
  let w0 = _mm_set_epi16(25, 26, 27, 28, 29, 30, 31, 32);
  let w1 = _mm_set_epi16(17, 18, 19, 20, 21, 22, 23, 24);
  let w2 = _mm_set_epi16(9, 10, 11, 12, 13, 14, 15, 16);
  let w3 = _mm_set_epi16(1, 2, 3, 4, 5, 6, 7, 8);

  let mut p_v = _mm_cvtsi32_si128((a * blocks as u32) as i32);
  let mut a_v = _mm_setzero_si128();
  let mut b_v = _mm_cvtsi32_si128(b as i32);

  let src = run.as_ptr();
  for i in 0..blocks {
    let off = i * BLOCK;
    let v0 = _mm_load_si128(src.add(off).cast());
    let v1 = _mm_load_si128(src.add(off + 16).cast());
    if COPY {
      _mm_storeu_si128(dst.add(off).cast(), v0);
      _mm_storeu_si128(dst.add(off + 16).cast(), v1);
    }

    p_v = _mm_add_epi32(p_v, a_v);
    a_v = _mm_add_epi32(a_v, _mm_add_epi32(_mm_sad_epu8(v0, zero), _mm_sad_epu8(v1, zero)));

    let m0 = _mm_madd_epi16(_mm_unpacklo_epi8(v0, zero), w0);
    let m1 = _mm_madd_epi16(_mm_unpackhi_epi8(v0, zero), w1);
    let m2 = _mm_madd_epi16(_mm_unpacklo_epi8(v1, zero), w2);
    let m3 = _mm_madd_epi16(_mm_unpackhi_epi8(v1, zero), w3);
    b_v = _mm_add_epi32(b_v, _mm_add_epi32(_mm_add_epi32(m0, m1), _mm_add_epi32(m2, m3)));
  }

  b_v = _mm_add_epi32(b_v, _mm_slli_epi32::<5>(p_v));
  (a + hsum_128(a_v), hsum_128(b_v))
}

/// Adler-32 with SSE2.
#[inline]
pub fn adler32_sse2_safe(adler: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies SSE2 before selecting this kernel.
  unsafe { drive::<false>(adler, data, ptr::null_mut(), 16, fold_sse2::<false>) }
}

/// Fused copy and Adler-32 with SSE2.
#[inline]
pub fn adler32_copy_sse2_safe(adler: u32, data: &[u8], dst: &mut [u8]) -> u32 {
  let dst = copy_target(data, dst);
  // SAFETY: Dispatcher verifies SSE2; `dst` holds exactly `data.len()` bytes
  // and is a distinct `&mut` borrow.
  unsafe { drive::<true>(adler, data, dst.as_mut_ptr(), 16, fold_sse2::<true>) }
}

// ─────────────────────────────────────────────────────────────────────────────
// SSSE3
// ─────────────────────────────────────────────────────────────────────────────

#[target_feature(enable = "sse2,ssse3")]
unsafe fn fold_ssse3<const COPY: bool>(a: u32, b: u32, run: &[u8], dst: *mut u8) -> (u32, u32) {
  let blocks = run.len() / BLOCK;
  let zero = _mm_setzero_si128();
  let ones = _mm_set1_epi16(1);
  let w0 = _mm_set_epi8(17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32);
  let w1 = _mm_set_epi8(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16);

  let mut p_v = _mm_cvtsi32_si128((a * blocks as u32) as i32);
  let mut a_v = _mm_setzero_si128();
  let mut b_v = _mm_cvtsi32_si128(b as i32);

  let src = run.as_ptr();
  for i in 0..blocks {
    let off = i * BLOCK;
    let v0 = _mm_load_si128(src.add(off).cast());
    let v1 = _mm_load_si128(src.add(off + 16).cast());
    if COPY {
      _mm_storeu_si128(dst.add(off).cast(), v0);
      _mm_storeu_si128(dst.add(off + 16).cast(), v1);
    }

    p_v = _mm_add_epi32(p_v, a_v);
    a_v = _mm_add_epi32(a_v, _mm_add_epi32(_mm_sad_epu8(v0, zero), _mm_sad_epu8(v1, zero)));

    // u8 x i8 pairs fit i16: 255 * 32 + 255 * 31 < 2^15.
    let m = _mm_add_epi16(_mm_maddubs_epi16(v0, w0), _mm_maddubs_epi16(v1, w1));
    b_v = _mm_add_epi32(b_v, _mm_madd_epi16(m, ones));
  }

  b_v = _mm_add_epi32(b_v, _mm_slli_epi32::<5>(p_v));
  (a + hsum_128(a_v), hsum_128(b_v))
}

/// Adler-32 with SSSE3.
#[inline]
pub fn adler32_ssse3_safe(adler: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies SSSE3 before selecting this kernel.
  unsafe { drive::<false>(adler, data, ptr::null_mut(), 16, fold_ssse3::<false>) }
}

/// Fused copy and Adler-32 with SSSE3.
#[inline]
pub fn adler32_copy_ssse3_safe(adler: u32, data: &[u8], dst: &mut [u8]) -> u32 {
  let dst = copy_target(data, dst);
  // SAFETY: Dispatcher verifies SSSE3; `dst` holds exactly `data.len()` bytes.
  unsafe { drive::<true>(adler, data, dst.as_mut_ptr(), 16, fold_ssse3::<true>) }
}

// ─────────────────────────────────────────────────────────────────────────────
// AVX2
// ─────────────────────────────────────────────────────────────────────────────

#[target_feature(enable = "avx2")]
unsafe fn fold_avx2<const COPY: bool>(a: u32, b: u32, run: &[u8], dst: *mut u8) -> (u32, u32) {
  let blocks = run.len() / BLOCK;
  let zero = _mm256_setzero_si256();
  let ones = _mm256_set1_epi16(1);
  #[rustfmt::skip]
  let weights = _mm256_set_epi8(
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16,
    17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32,
  );

  let mut p_v = _mm256_zextsi128_si256(_mm_cvtsi32_si128((a * blocks as u32) as i32));
  let mut a_v = _mm256_setzero_si256();
  let mut b_v = _mm256_zextsi128_si256(_mm_cvtsi32_si128(b as i32));

  let src = run.as_ptr();
  for i in 0..blocks {
    let off = i * BLOCK;
    let v = _mm256_load_si256(src.add(off).cast());
    if COPY {
      _mm256_storeu_si256(dst.add(off).cast(), v);
    }

    p_v = _mm256_add_epi32(p_v, a_v);
    a_v = _mm256_add_epi32(a_v, _mm256_sad_epu8(v, zero));
    b_v = _mm256_add_epi32(b_v, _mm256_madd_epi16(_mm256_maddubs_epi16(v, weights), ones));
  }

  b_v = _mm256_add_epi32(b_v, _mm256_slli_epi32::<5>(p_v));
  (a + hsum_256(a_v), hsum_256(b_v))
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn hsum_256(v: __m256i) -> u32 {
  hsum_128(_mm_add_epi32(_mm256_castsi256_si128(v), _mm256_extracti128_si256::<1>(v)))
}

/// Adler-32 with AVX2.
#[inline]
pub fn adler32_avx2_safe(adler: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies AVX2 (and OS YMM state) before selecting this kernel.
  unsafe { drive::<false>(adler, data, ptr::null_mut(), 32, fold_avx2::<false>) }
}

/// Fused copy and Adler-32 with AVX2.
#[inline]
pub fn adler32_copy_avx2_safe(adler: u32, data: &[u8], dst: &mut [u8]) -> u32 {
  let dst = copy_target(data, dst);
  // SAFETY: Dispatcher verifies AVX2; `dst` holds exactly `data.len()` bytes.
  unsafe { drive::<true>(adler, data, dst.as_mut_ptr(), 32, fold_avx2::<true>) }
}
