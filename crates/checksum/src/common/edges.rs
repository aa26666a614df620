//! Aligned-middle / scalar-edges splitting shared by every vector backend.
//!
//! A vector kernel sees its input as three parts:
//!
//! ```text
//! [ head: scalar until `align` ][ body: whole `block`s, aligned ][ tail: scalar remainder ]
//! ```
//!
//! The three lengths always sum to the input length, so no kernel ever loads
//! or stores outside the caller's buffer; an input too short to reach the next
//! alignment boundary is entirely head.

use core::mem::size_of;

/// Head / body / tail split of a buffer, in elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
  pub head: usize,
  pub body: usize,
  pub tail: usize,
}

impl Layout {
  /// Split `len` bytes starting at address `addr`.
  ///
  /// `align` must be a power of two; `block` must be non-zero.
  #[inline]
  #[must_use]
  pub const fn of(addr: usize, len: usize, align: usize, block: usize) -> Self {
    debug_assert!(align.is_power_of_two() && block > 0);
    let to_boundary = addr.wrapping_neg() & (align - 1);
    let head = if to_boundary < len { to_boundary } else { len };
    let rest = len - head;
    let body = rest - rest % block;
    Self { head, body, tail: rest - body }
  }

  /// Split a slice of `T`. `align` is in bytes, `block` in elements.
  ///
  /// If the slice can never reach `align` in whole elements it is all head.
  #[inline]
  #[must_use]
  pub fn of_slice<T>(data: &[T], align: usize, block: usize) -> Self {
    let size = size_of::<T>();
    let bytes = Self::of(data.as_ptr() as usize, data.len() * size, align, block * size);
    if bytes.head % size != 0 {
      return Self { head: data.len(), body: 0, tail: 0 };
    }
    Self { head: bytes.head / size, body: bytes.body / size, tail: bytes.tail / size }
  }

  /// Borrow the three parts of `data`.
  #[inline]
  #[must_use]
  pub fn split<'a, T>(&self, data: &'a [T]) -> (&'a [T], &'a [T], &'a [T]) {
    let (head, rest) = data.split_at(self.head);
    let (body, tail) = rest.split_at(self.body);
    (head, body, tail)
  }

  /// Mutably borrow the three parts of `data`.
  #[inline]
  #[must_use]
  pub fn split_mut<'a, T>(&self, data: &'a mut [T]) -> (&'a mut [T], &'a mut [T], &'a mut [T]) {
    let (head, rest) = data.split_at_mut(self.head);
    let (body, tail) = rest.split_at_mut(self.body);
    (head, body, tail)
  }
}

/// Slice `dst` to the length of `src` for a fused copy.
///
/// Debug builds assert equal lengths. Release builds panic only if `dst` is
/// too short, so a kernel never writes past the destination.
#[inline]
#[track_caller]
pub(crate) fn copy_target<'a>(src: &[u8], dst: &'a mut [u8]) -> &'a mut [u8] {
  debug_assert_eq!(src.len(), dst.len(), "copy destination length must equal source length");
  let have = dst.len();
  match dst.get_mut(..src.len()) {
    Some(dst) => dst,
    None => panic!("copy destination holds {have} bytes, source has {}", src.len()),
  }
}

/// Copy `src` to `dst` when `COPY` is set.
///
/// # Safety
///
/// With `COPY`, `dst` must be valid for `src.len()` writes and must not overlap `src`.
#[inline(always)]
pub(crate) unsafe fn copy_if<const COPY: bool>(src: &[u8], dst: *mut u8) {
  if COPY {
    // SAFETY: caller guarantees `dst` is valid for `src.len()` bytes and disjoint.
    unsafe { core::ptr::copy_nonoverlapping(src.as_ptr(), dst, src.len()) };
  }
}
