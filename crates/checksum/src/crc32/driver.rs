//! Edge handling shared by the carry-less multiply CRC-32 kernels.
//!
//! ```text
//! [ head: table ][ body: 16-byte blocks, folded 4-wide then 1-wide ][ tail: table ]
//! ```
//!
//! Bodies shorter than [`FOLD_MIN`] bytes are not worth the reduction
//! sequence and go through slicing-by-8 whole.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use super::portable;
use crate::{
  common::edges::{Layout, copy_if},
  constants::crc32::XOROUT,
};

/// Smallest aligned body the folding kernels accept: four 16-byte lanes.
pub(super) const FOLD_MIN: usize = 64;

/// Folds a 16-aligned body (a multiple of 16 bytes, at least [`FOLD_MIN`])
/// into a raw CRC register. With `COPY` the body is also stored to the
/// destination pointer.
pub(super) type Fold = unsafe fn(u32, &[u8], *mut u8) -> u32;

/// Run `fold` over the aligned middle of `data`; `crc` is a finalized value.
///
/// `dst` is only dereferenced when `COPY` is set and may be null otherwise.
///
/// # Safety
///
/// `fold` must be runnable on this CPU. With `COPY`, `dst` must be valid for
/// `data.len()` writes and must not overlap `data`.
#[inline(always)]
pub(super) unsafe fn drive<const COPY: bool>(crc: u32, data: &[u8], dst: *mut u8, fold: Fold) -> u32 {
  let layout = Layout::of(data.as_ptr() as usize, data.len(), 16, 16);
  if layout.body < FOLD_MIN {
    copy_if::<COPY>(data, dst);
    return portable::update(crc, data);
  }

  let (head, body, tail) = layout.split(data);
  copy_if::<COPY>(head, dst);
  let state = portable::raw_bytewise(crc ^ XOROUT, head);
  let state = fold(state, body, dst.wrapping_add(head.len()));
  copy_if::<COPY>(tail, dst.wrapping_add(head.len() + body.len()));
  portable::raw_bytewise(state, tail) ^ XOROUT
}
