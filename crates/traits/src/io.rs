//! `std::io` adapters that checksum data as it streams through.
//!
//! # Example
//!
//! ```rust
//! # use traits::Checksum;
//! # use traits::io::ChecksumReader;
//! # #[derive(Clone, Default)]
//! # struct Sum(u32);
//! # impl Checksum for Sum {
//! #   const OUTPUT_SIZE: usize = 4;
//! #   type Output = u32;
//! #   fn new() -> Self { Self(0) }
//! #   fn with_initial(initial: Self::Output) -> Self { Self(initial) }
//! #   fn update(&mut self, data: &[u8]) {
//! #     self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(u32::from(b)));
//! #   }
//! #   fn finalize(&self) -> Self::Output { self.0 }
//! #   fn reset(&mut self) { self.0 = 0; }
//! # }
//! # use std::io::Cursor;
//! let mut reader = Sum::reader(Cursor::new(b"abc".to_vec()));
//! std::io::copy(&mut reader, &mut std::io::sink())?;
//! assert_eq!(reader.checksum(), 294);
//! assert_eq!(ChecksumReader::bytes(&reader), 3);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, IoSlice, IoSliceMut, Read, Write};

use crate::{Checksum, ChecksumMismatch};

/// Wraps a [`Read`] and folds every byte actually read into a checksum.
///
/// Short reads are handled: only the `n` bytes reported by the inner reader
/// are checksummed.
#[derive(Clone)]
pub struct ChecksumReader<R, C: Checksum> {
  inner: R,
  hasher: C,
  bytes: u64,
}

impl<R, C: Checksum> ChecksumReader<R, C> {
  /// Wrap `inner`, starting from the algorithm's seed.
  #[inline]
  #[must_use]
  pub fn new(inner: R) -> Self {
    Self { inner, hasher: C::new(), bytes: 0 }
  }

  /// Wrap `inner`, resuming from a previously finalized value.
  #[inline]
  #[must_use]
  pub fn with_initial(inner: R, initial: C::Output) -> Self {
    Self { inner, hasher: C::with_initial(initial), bytes: 0 }
  }

  /// Checksum of everything read so far.
  #[inline]
  #[must_use]
  pub fn checksum(&self) -> C::Output {
    self.hasher.finalize()
  }

  /// Number of bytes read so far.
  #[inline]
  #[must_use]
  pub fn bytes(&self) -> u64 {
    self.bytes
  }

  /// Compare the checksum of everything read so far against `expected`.
  ///
  /// # Errors
  ///
  /// Returns [`ChecksumMismatch`] when the values differ.
  #[inline]
  pub fn verify(&self, expected: C::Output) -> Result<(), ChecksumMismatch<C::Output>> {
    self.hasher.verify(expected)
  }

  /// Unwrap, returning the inner reader and the checksum.
  #[inline]
  pub fn into_parts(self) -> (R, C::Output) {
    (self.inner, self.hasher.finalize())
  }

  /// Unwrap, discarding the checksum.
  #[inline]
  pub fn into_inner(self) -> R {
    self.inner
  }

  /// Get a reference to the inner reader.
  #[inline]
  pub fn inner(&self) -> &R {
    &self.inner
  }

  /// Get a mutable reference to the inner reader.
  ///
  /// Reading through this reference bypasses the checksum.
  #[inline]
  pub fn inner_mut(&mut self) -> &mut R {
    &mut self.inner
  }

  #[inline]
  fn record(&mut self, data: &[u8]) {
    self.hasher.update(data);
    self.bytes = self.bytes.wrapping_add(data.len() as u64);
  }
}

impl<R: Read, C: Checksum> Read for ChecksumReader<R, C> {
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    let n = self.inner.read(buf)?;
    if let Some(data) = buf.get(..n) {
      self.record(data);
    }
    Ok(n)
  }

  fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
    let n = self.inner.read_vectored(bufs)?;
    let mut remaining = n;
    for buf in bufs.iter() {
      if remaining == 0 {
        break;
      }
      let take = remaining.min(buf.len());
      if let Some(data) = buf.get(..take) {
        self.record(data);
      }
      remaining -= take;
    }
    Ok(n)
  }
}

/// Wraps a [`Write`] and folds every byte accepted by the inner writer into a
/// checksum.
///
/// Only the prefix the inner writer reports as written is checksummed, so a
/// short write followed by a retry of the remainder never counts bytes twice.
#[derive(Clone)]
pub struct ChecksumWriter<W, C: Checksum> {
  inner: W,
  hasher: C,
  bytes: u64,
}

impl<W, C: Checksum> ChecksumWriter<W, C> {
  /// Wrap `inner`, starting from the algorithm's seed.
  #[inline]
  #[must_use]
  pub fn new(inner: W) -> Self {
    Self { inner, hasher: C::new(), bytes: 0 }
  }

  /// Wrap `inner`, resuming from a previously finalized value.
  #[inline]
  #[must_use]
  pub fn with_initial(inner: W, initial: C::Output) -> Self {
    Self { inner, hasher: C::with_initial(initial), bytes: 0 }
  }

  /// Checksum of everything written so far.
  #[inline]
  #[must_use]
  pub fn checksum(&self) -> C::Output {
    self.hasher.finalize()
  }

  /// Number of bytes written so far.
  #[inline]
  #[must_use]
  pub fn bytes(&self) -> u64 {
    self.bytes
  }

  /// Unwrap, returning the inner writer and the checksum.
  #[inline]
  pub fn into_parts(self) -> (W, C::Output) {
    (self.inner, self.hasher.finalize())
  }

  /// Unwrap, discarding the checksum.
  #[inline]
  pub fn into_inner(self) -> W {
    self.inner
  }

  /// Get a reference to the inner writer.
  #[inline]
  pub fn inner(&self) -> &W {
    &self.inner
  }

  #[inline]
  fn record(&mut self, data: &[u8]) {
    self.hasher.update(data);
    self.bytes = self.bytes.wrapping_add(data.len() as u64);
  }
}

impl<W: Write, C: Checksum> Write for ChecksumWriter<W, C> {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    let n = self.inner.write(buf)?;
    if let Some(data) = buf.get(..n) {
      self.record(data);
    }
    Ok(n)
  }

  fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
    let n = self.inner.write_vectored(bufs)?;
    let mut remaining = n;
    for buf in bufs {
      if remaining == 0 {
        break;
      }
      let take = remaining.min(buf.len());
      if let Some(data) = buf.get(..take) {
        self.record(data);
      }
      remaining -= take;
    }
    Ok(n)
  }

  #[inline]
  fn flush(&mut self) -> io::Result<()> {
    self.inner.flush()
  }
}
