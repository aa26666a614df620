//! Portable hash-chain slide.

/// Subtract `wsize` from every entry, clamping at zero.
#[inline]
pub fn slide_hash(table: &mut [u16], wsize: u16) {
  for entry in table {
    *entry = entry.saturating_sub(wsize);
  }
}
