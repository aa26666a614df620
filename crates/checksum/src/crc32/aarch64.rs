//! aarch64 CRC-32 kernels.
//!
//! - PMULL folding: the same fold/reduce sequence as the x86_64 PCLMULQDQ
//!   kernel, expressed with `vmull_p64` on 64-bit lanes
//! - ARMv8 CRC32 instructions (`crc32x`/`crc32b`), eight bytes per step
//!
//! # Safety
//!
//! Uses `unsafe` for NEON/PMULL/CRC intrinsics. Callers must ensure the
//! required features are available (the dispatcher does this).
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::{arch::aarch64::*, ptr};

use super::driver::drive;
use crate::{
  common::edges::{Layout, copy_target},
  constants::crc32::{
    XOROUT,
    fold::{BARRETT, FOLD_16B, FOLD_64B, FOLD_TO_64},
  },
};

// ─────────────────────────────────────────────────────────────────────────────
// PMULL Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
unsafe fn keys(pair: (u64, u64)) -> uint64x2_t {
  vcombine_u64(vcreate_u64(pair.0), vcreate_u64(pair.1))
}

/// `a[A] * b[B]` as a 128-bit carry-less product.
#[inline]
#[target_feature(enable = "neon,aes")]
unsafe fn clmul<const A: i32, const B: i32>(a: uint64x2_t, b: uint64x2_t) -> uint64x2_t {
  vreinterpretq_u64_p128(vmull_p64(vgetq_lane_u64::<A>(a), vgetq_lane_u64::<B>(b)))
}

/// `x.lo * k.lo ^ x.hi * k.hi ^ next`.
#[inline]
#[target_feature(enable = "neon,aes")]
unsafe fn fold16(x: uint64x2_t, k: uint64x2_t, next: uint64x2_t) -> uint64x2_t {
  veorq_u64(veorq_u64(clmul::<0, 0>(x, k), clmul::<1, 1>(x, k)), next)
}

/// Shift the whole register right by `N` bytes, shifting in zeros.
#[inline]
#[target_feature(enable = "neon")]
unsafe fn shr_bytes<const N: i32>(x: uint64x2_t) -> uint64x2_t {
  vreinterpretq_u64_u8(vextq_u8::<N>(vreinterpretq_u8_u64(x), vdupq_n_u8(0)))
}

#[inline(always)]
unsafe fn load<const COPY: bool>(src: *const u8, dst: *mut u8, off: usize) -> uint64x2_t {
  let v = vld1q_u8(src.add(off));
  if COPY {
    vst1q_u8(dst.add(off), v);
  }
  vreinterpretq_u64_u8(v)
}

#[inline]
#[target_feature(enable = "neon,aes")]
unsafe fn reduce(x: uint64x2_t) -> u32 {
  let k16 = keys(FOLD_16B);
  let mask = vdupq_n_u64(0xFFFF_FFFF);

  // 128 -> 96 bits
  let t = clmul::<0, 1>(x, k16);
  let x = veorq_u64(shr_bytes::<8>(x), t);

  // 96 -> 64 bits
  let t = shr_bytes::<4>(x);
  let x = veorq_u64(clmul::<0, 0>(vandq_u64(x, mask), keys((FOLD_TO_64, 0))), t);

  // Barrett
  let poly = keys(BARRETT);
  let t = clmul::<0, 1>(vandq_u64(x, mask), poly);
  let t = clmul::<0, 0>(vandq_u64(t, mask), poly);
  vgetq_lane_u32::<1>(vreinterpretq_u32_u64(veorq_u64(x, t)))
}

#[target_feature(enable = "neon,aes")]
unsafe fn fold_pmull<const COPY: bool>(crc: u32, body: &[u8], dst: *mut u8) -> u32 {
  let src = body.as_ptr();
  let blocks = body.len() / 16;

  let seed = vsetq_lane_u64::<0>(u64::from(crc), vdupq_n_u64(0));
  let mut x0 = veorq_u64(load::<COPY>(src, dst, 0), seed);
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

/// CRC-32 with PMULL folding.
#[inline]
pub fn crc32_pmull_safe(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies PMULL (and NEON) before selecting this kernel.
  unsafe { drive::<false>(crc, data, ptr::null_mut(), fold_pmull::<false>) }
}

/// Fused copy and CRC-32 with PMULL folding.
#[inline]
pub fn crc32_copy_pmull_safe(crc: u32, data: &[u8], dst: &mut [u8]) -> u32 {
  let dst = copy_target(data, dst);
  // SAFETY: Dispatcher verifies PMULL; `dst` holds exactly `data.len()` bytes.
  unsafe { drive::<true>(crc, data, dst.as_mut_ptr(), fold_pmull::<true>) }
}

// ─────────────────────────────────────────────────────────────────────────────
// ARM CRC32 Extension
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32 over the raw register with the CRC32 instructions; 8-byte words
/// start on an 8-byte boundary.
///
/// # Safety
///
/// The CRC extension must be available. With `COPY`, `dst` must be valid for
/// `data.len()` writes and must not overlap `data`.
#[target_feature(enable = "crc")]
unsafe fn crc_hw<const COPY: bool>(crc: u32, data: &[u8], dst: *mut u8) -> u32 {
  let layout = Layout::of(data.as_ptr() as usize, data.len(), 8, 8);
  let (head, body, tail) = layout.split(data);
  let mut state = crc ^ XOROUT;

  for &b in head {
    state = __crc32b(state, b);
  }

  let (words, _) = body.as_chunks::<8>();
  for (i, word) in words.iter().enumerate() {
    if COPY {
      ptr::write_unaligned(dst.add(head.len() + i * 8).cast::<[u8; 8]>(), *word);
    }
    state = __crc32d(state, u64::from_le_bytes(*word));
  }

  for &b in tail {
    state = __crc32b(state, b);
  }

  if COPY {
    ptr::copy_nonoverlapping(head.as_ptr(), dst, head.len());
    ptr::copy_nonoverlapping(tail.as_ptr(), dst.add(head.len() + body.len()), tail.len());
  }

  state ^ XOROUT
}

/// CRC-32 with the ARMv8 CRC32 instructions.
#[inline]
pub fn crc32_crc_safe(crc: u32, data: &[u8]) -> u32 {
  // SAFETY: Dispatcher verifies the CRC extension before selecting this kernel.
  unsafe { crc_hw::<false>(crc, data, ptr::null_mut()) }
}

/// Fused copy and CRC-32 with the ARMv8 CRC32 instructions.
#[inline]
pub fn crc32_copy_crc_safe(crc: u32, data: &[u8], dst: &mut [u8]) -> u32 {
  let dst = copy_target(data, dst);
  // SAFETY: Dispatcher verifies the CRC extension; `dst` holds exactly
  // `data.len()` bytes.
  unsafe { crc_hw::<true>(crc, data, dst.as_mut_ptr()) }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec::Vec;

  use platform::Caps;

  use super::*;
  use crate::{common::reference, constants::crc32::CHECK};

  type Kernel = fn(u32, &[u8]) -> u32;
  type CopyKernel = fn(u32, &[u8], &mut [u8]) -> u32;

  fn kernels() -> Vec<(&'static str, Kernel, CopyKernel)> {
    let caps = platform::caps();
    let mut out = Vec::new();
    if caps.has(Caps::PMULL_READY) {
      out.push(("pmull", crc32_pmull_safe as Kernel, crc32_copy_pmull_safe as CopyKernel));
    }
    if caps.has(Caps::CRC) {
      out.push(("crc", crc32_crc_safe as Kernel, crc32_copy_crc_safe as CopyKernel));
    }
    out
  }

  fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u32).wrapping_mul(0x0100_0193).rotate_right(11) as u8).collect()
  }

  #[test]
  fn check_value() {
    for (name, kernel, _) in kernels() {
      assert_eq!(kernel(0, b"123456789"), CHECK, "{name}");
    }
  }

  #[test]
  fn matches_reference_at_every_offset() {
    let data = pattern(4096 + 64);
    for (name, kernel, _) in kernels() {
      for offset in 0..32 {
        for len in [0, 1, 7, 8, 15, 16, 63, 64, 79, 80, 127, 128, 129, 1000, 4096] {
          let input = &data[offset..offset + len];
          assert_eq!(kernel(0x5A5A_A5A5, input), reference::crc32(0x5A5A_A5A5, input), "{name} offset {offset} len {len}");
        }
      }
    }
  }

  #[test]
  fn copy_matches_plain_and_copies() {
    let data = pattern(5000);
    for (name, kernel, copy) in kernels() {
      for offset in [0, 1, 9] {
        let src = &data[offset..];
        let mut dst = std::vec![0u8; src.len()];
        assert_eq!(copy(0, src, &mut dst), kernel(0, src), "{name}");
        assert_eq!(dst, src, "{name}");
      }
    }
  }
}
