//! Checksums over independently computed chunks.
//!
//! Both checksums compose: `combine(f(A), f(B), len(B)) == f(A || B)`, in
//! `O(log len(B))` for CRC-32 and `O(1)` for Adler-32. That lets a caller
//! checksum pieces on separate threads (or as they arrive out of order) and
//! stitch the results together.
//!
//! # Example
//!
//! ```
//! use checksum::{Adler32, Checksum, parallel::checksum_chunks};
//!
//! let data = b"The quick brown fox jumps over the lazy dog";
//! let chunks: Vec<&[u8]> = data.chunks(16).collect();
//! assert_eq!(checksum_chunks::<Adler32>(&chunks), Adler32::checksum(data));
//! ```

use traits::ChecksumCombine;

/// Checksum of the concatenation of `chunks`, computed chunk by chunk.
///
/// An empty slice yields the checksum of empty input.
#[inline]
pub fn checksum_chunks<C: ChecksumCombine>(chunks: &[&[u8]]) -> C::Output {
  chunks.iter().fold(C::checksum(&[]), |acc, chunk| C::combine(acc, C::checksum(chunk), chunk.len()))
}

/// Combine `(checksum, length)` pairs, in order, into the checksum of the
/// concatenated data. `None` for an empty slice.
///
/// ```
/// use checksum::{Checksum, Crc32, parallel::combine_checksums};
///
/// let (a, b) = b"hello world".split_at(6);
/// let parts = [(Crc32::checksum(a), a.len()), (Crc32::checksum(b), b.len())];
/// assert_eq!(combine_checksums::<Crc32>(&parts), Some(Crc32::checksum(b"hello world")));
/// ```
#[inline]
pub fn combine_checksums<C: ChecksumCombine>(parts: &[(C::Output, usize)]) -> Option<C::Output> {
  let ((first, _), rest) = parts.split_first()?;
  Some(rest.iter().fold(*first, |acc, &(value, len)| C::combine(acc, value, len)))
}

/// Checksum `data` on up to `threads` scoped threads and combine the results.
///
/// Inputs shorter than `min_chunk` bytes per thread run on the calling thread.
///
/// ```
/// use checksum::{Checksum, Crc32, parallel::checksum_parallel};
///
/// let data = vec![7u8; 1 << 20];
/// assert_eq!(checksum_parallel::<Crc32>(&data, 4, 64 * 1024), Crc32::checksum(&data));
/// ```
#[cfg(feature = "std")]
pub fn checksum_parallel<C>(data: &[u8], threads: usize, min_chunk: usize) -> C::Output
where
  C: ChecksumCombine,
  C::Output: Send,
{
  let threads = threads.min(data.len() / min_chunk.max(1)).max(1);
  if threads == 1 {
    return C::checksum(data);
  }

  let chunk_len = data.len().div_ceil(threads);
  std::thread::scope(|scope| {
    let handles: std::vec::Vec<_> = data
      .chunks(chunk_len)
      .map(|chunk| (chunk.len(), scope.spawn(move || C::checksum(chunk))))
      .collect();
    handles.into_iter().fold(C::checksum(&[]), |acc, (len, handle)| {
      let part = match handle.join() {
        Ok(part) => part,
        Err(payload) => std::panic::resume_unwind(payload),
      };
      C::combine(acc, part, len)
    })
  })
}
