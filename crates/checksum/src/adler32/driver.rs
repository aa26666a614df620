//! Edge handling shared by the vector Adler-32 kernels.
//!
//! ```text
//! [ head: portable ][ body: CHUNK runs of BLOCK-byte folds, reduced per run ][ tail: portable ]
//! ```
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use super::portable;
use crate::{
  common::edges::{Layout, copy_if},
  constants::adler32::{BASE, BLOCK, CHUNK, join, split},
};

/// Inputs shorter than this never reach the vector loop.
pub(super) const MIN_LEN: usize = 64;

/// Folds a run of at most `CHUNK` bytes (whole blocks, `align`-aligned) into
/// reduced `(a, b)` and returns the unreduced sums. With `COPY` the run is
/// also stored to the destination pointer.
pub(super) type Fold = unsafe fn(u32, u32, &[u8], *mut u8) -> (u32, u32);

/// Run `fold` over the aligned middle of `data`.
///
/// `dst` is only dereferenced when `COPY` is set and may be null otherwise.
///
/// # Safety
///
/// `fold` must be runnable on this CPU. With `COPY`, `dst` must be valid for
/// `data.len()` writes and must not overlap `data`.
#[inline(always)]
pub(super) unsafe fn drive<const COPY: bool>(adler: u32, data: &[u8], dst: *mut u8, align: usize, fold: Fold) -> u32 {
  if data.len() < MIN_LEN {
    copy_if::<COPY>(data, dst);
    return portable::update(adler, data);
  }

  let layout = Layout::of(data.as_ptr() as usize, data.len(), align, BLOCK);
  let (head, body, tail) = layout.split(data);

  copy_if::<COPY>(head, dst);
  let (a, b) = split(portable::update(adler, head));
  let (mut a, mut b) = (a % BASE, b % BASE);

  let mut off = head.len();
  for run in body.chunks(CHUNK) {
    let (na, nb) = fold(a, b, run, dst.wrapping_add(off));
    a = na % BASE;
    b = nb % BASE;
    off += run.len();
  }

  copy_if::<COPY>(tail, dst.wrapping_add(off));
  portable::update(join(a, b), tail)
}
