//! Error types for checksum verification.
//!
//! Computing a checksum never fails. The only error in this crate is a
//! computed value disagreeing with an expected one.

use core::fmt;

/// A computed checksum did not match the expected value.
///
/// # Examples
///
/// ```
/// use traits::ChecksumMismatch;
///
/// let err = ChecksumMismatch::new(0xCBF4_3926u32, 0u32);
/// assert_eq!(err.to_string(), "checksum mismatch: expected 0xcbf43926, computed 0x00000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("checksum mismatch: expected {expected:#010x}, computed {computed:#010x}")]
pub struct ChecksumMismatch<T: fmt::LowerHex + fmt::Debug> {
  /// The value the caller expected.
  pub expected: T,
  /// The value computed over the data.
  pub computed: T,
}

impl<T: fmt::LowerHex + fmt::Debug> ChecksumMismatch<T> {
  /// Create a new mismatch error.
  #[inline]
  #[must_use]
  pub const fn new(expected: T, computed: T) -> Self {
    Self { expected, computed }
  }
}
