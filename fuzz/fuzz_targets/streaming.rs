//! Arbitrary sequences of update calls, plain and fused copy.

#![no_main]

use arbitrary::Arbitrary;
use checksum::{Adler32, Crc32};
use libfuzzer_sys::fuzz_target;
use traits::{Checksum, ChecksumCopy};

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  /// Chunk sizes for streaming updates, cycled.
  chunk_sizes: Vec<u16>,
}

fn chunks<'a>(data: &'a [u8], sizes: &'a [u16]) -> impl Iterator<Item = (usize, usize)> + 'a {
  let mut offset = 0;
  let mut idx = 0;
  core::iter::from_fn(move || {
    if offset >= data.len() {
      return None;
    }
    let size = sizes.get(idx % sizes.len().max(1)).map_or(1, |&s| usize::from(s).max(1));
    let end = (offset + size).min(data.len());
    let range = (offset, end);
    offset = end;
    idx += 1;
    Some(range)
  })
}

fn check<C: Checksum + ChecksumCopy>(data: &[u8], sizes: &[u16]) {
  let expected = C::checksum(data);

  let mut plain = C::new();
  let mut copy = C::new();
  let mut dst = vec![0u8; data.len()];
  for (start, end) in chunks(data, sizes) {
    plain.update(&data[start..end]);
    copy.update_copy(&data[start..end], &mut dst[start..end]);
  }
  assert_eq!(plain.finalize(), expected, "streaming mismatch");
  assert_eq!(copy.finalize(), expected, "streaming copy mismatch");
  assert_eq!(dst, data, "copy destination differs");
}

fuzz_target!(|input: Input| {
  check::<Adler32>(&input.data, &input.chunk_sizes);
  check::<Crc32>(&input.data, &input.chunk_sizes);
});
