//! Streaming checksum traits.
//!
//! - **Streaming**: incremental updates thread an opaque running value between calls
//! - **Fused copy**: checksum while duplicating the input into a destination
//! - **Parallelism**: combine partial results computed over adjacent chunks

use core::fmt::{Debug, LowerHex};

use crate::ChecksumMismatch;

/// Non-cryptographic checksum algorithm.
///
/// # Usage
///
/// ```rust,ignore
/// use checksum::{Checksum, Crc32};
///
/// // One-shot
/// let crc = Crc32::checksum(b"123456789");
///
/// // Streaming
/// let mut hasher = Crc32::new();
/// hasher.update(b"12345");
/// hasher.update(b"6789");
/// assert_eq!(hasher.finalize(), crc);
/// ```
///
/// # Implementor Requirements
///
/// - `new()` must return the same state as `Default::default()`
/// - `finalize()` must be idempotent
/// - `reset()` must restore the initial state
/// - updating with `a` then `b` must equal updating once with `a || b`
pub trait Checksum: Clone + Default {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// The checksum output type.
  type Output: Copy + Eq + Debug + Default + LowerHex;

  /// Create a new hasher with the algorithm's seed value.
  #[must_use]
  fn new() -> Self;

  /// Create a hasher that resumes from a previously finalized value.
  #[must_use]
  fn with_initial(initial: Self::Output) -> Self;

  /// Update the hasher with additional data.
  fn update(&mut self, data: &[u8]);

  /// Update the hasher with multiple non-contiguous buffers, in order.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Current checksum value. Does not consume the hasher.
  #[must_use]
  fn finalize(&self) -> Self::Output;

  /// Reset the hasher to its initial state.
  fn reset(&mut self);

  /// Compute the checksum of data in one shot.
  #[inline]
  #[must_use]
  fn checksum(data: &[u8]) -> Self::Output {
    let mut h = Self::new();
    h.update(data);
    h.finalize()
  }

  /// Compute the checksum of multiple buffers in one shot.
  #[inline]
  #[must_use]
  fn checksum_vectored(bufs: &[&[u8]]) -> Self::Output {
    let mut h = Self::new();
    h.update_vectored(bufs);
    h.finalize()
  }

  /// Compare the current value against `expected`.
  ///
  /// # Errors
  ///
  /// Returns [`ChecksumMismatch`] carrying both values when they differ.
  #[inline]
  fn verify(&self, expected: Self::Output) -> Result<(), ChecksumMismatch<Self::Output>> {
    let computed = self.finalize();
    if computed == expected {
      Ok(())
    } else {
      Err(ChecksumMismatch::new(expected, computed))
    }
  }

  /// Wrap a reader to compute the checksum transparently during I/O.
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn reader<R>(inner: R) -> crate::io::ChecksumReader<R, Self>
  where
    Self: Sized,
  {
    crate::io::ChecksumReader::new(inner)
  }

  /// Wrap a writer to compute the checksum transparently during I/O.
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn writer<W>(inner: W) -> crate::io::ChecksumWriter<W, Self>
  where
    Self: Sized,
  {
    crate::io::ChecksumWriter::new(inner)
  }
}

/// Checksums that can checksum and copy in one pass.
///
/// Calling [`update_copy`](Self::update_copy) is observably identical to
/// `dst[..src.len()].copy_from_slice(src)` followed by `update(src)`, but the
/// source is read only once.
pub trait ChecksumCopy: Checksum {
  /// Fold `src` into the checksum while copying it into `dst`.
  ///
  /// # Panics
  ///
  /// Panics if `dst` is shorter than `src`. Debug builds also assert that the
  /// lengths are equal.
  fn update_copy(&mut self, src: &[u8], dst: &mut [u8]);

  /// One-shot fused copy and checksum.
  #[inline]
  #[must_use]
  fn checksum_copy(src: &[u8], dst: &mut [u8]) -> Self::Output {
    let mut h = Self::new();
    h.update_copy(src, dst);
    h.finalize()
  }
}

/// Checksums whose partial results over adjacent chunks can be combined.
///
/// Given `a = checksum(A)`, `b = checksum(B)` and `len(B)`, [`combine`](Self::combine)
/// returns `checksum(A || B)` without touching the data again. For CRC this is
///
/// ```text
/// crc(A || B) = crc(A) * x^(8*len(B)) mod G(x) XOR crc(B)
/// ```
///
/// and for Adler-32 it is modular arithmetic on the two sub-sums.
pub trait ChecksumCombine: Checksum {
  /// Combine two checksums of adjacent chunks.
  #[must_use]
  fn combine(a: Self::Output, b: Self::Output, len_b: usize) -> Self::Output;
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Sum of bytes, seeded at zero. Small enough to check by hand.
  #[derive(Clone, Default)]
  struct ByteSum(u32);

  impl Checksum for ByteSum {
    const OUTPUT_SIZE: usize = 4;
    type Output = u32;

    fn new() -> Self {
      Self(0)
    }
    fn with_initial(initial: u32) -> Self {
      Self(initial)
    }
    fn update(&mut self, data: &[u8]) {
      self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(u32::from(b)));
    }
    fn finalize(&self) -> u32 {
      self.0
    }
    fn reset(&mut self) {
      self.0 = 0;
    }
  }

  impl ChecksumCopy for ByteSum {
    fn update_copy(&mut self, src: &[u8], dst: &mut [u8]) {
      debug_assert_eq!(src.len(), dst.len());
      let dst = &mut dst[..src.len()];
      dst.copy_from_slice(src);
      self.update(src);
    }
  }

  impl ChecksumCombine for ByteSum {
    fn combine(a: u32, b: u32, _len_b: usize) -> u32 {
      a.wrapping_add(b)
    }
  }

  #[test]
  fn vectored_equals_contiguous() {
    assert_eq!(ByteSum::checksum_vectored(&[b"ab", b"", b"c"]), ByteSum::checksum(b"abc"));
  }

  #[test]
  fn verify_reports_both_values() {
    let mut h = ByteSum::new();
    h.update(b"\x01\x02");
    assert_eq!(h.verify(3), Ok(()));
    assert_eq!(h.verify(4), Err(ChecksumMismatch::new(4, 3)));
  }

  #[test]
  fn copy_matches_plain_update() {
    let src = [7u8, 8, 9];
    let mut dst = [0u8; 3];
    assert_eq!(ByteSum::checksum_copy(&src, &mut dst), ByteSum::checksum(&src));
    assert_eq!(dst, src);
  }

  #[test]
  fn resume_from_initial() {
    let mut h = ByteSum::with_initial(ByteSum::checksum(b"ab"));
    h.update(b"c");
    assert_eq!(h.finalize(), ByteSum::checksum(b"abc"));
    h.reset();
    assert_eq!(h.finalize(), 0);
  }

  #[test]
  fn combine_of_halves() {
    let (a, b) = (b"hello ".as_slice(), b"world".as_slice());
    assert_eq!(ByteSum::combine(ByteSum::checksum(a), ByteSum::checksum(b), b.len()), ByteSum::checksum(b"hello world"));
  }
}
