//! Combining checksums of a split equals the checksum of the whole.

#![no_main]

use arbitrary::Arbitrary;
use checksum::{adler32, adler32_combine, crc32, crc32_combine};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  split: usize,
}

fuzz_target!(|input: Input| {
  let split = if input.data.is_empty() { 0 } else { input.split % (input.data.len() + 1) };
  let (a, b) = input.data.split_at(split);

  let whole = adler32(1, Some(&input.data));
  assert_eq!(adler32_combine(adler32(1, Some(a)), adler32(1, Some(b)), b.len()), whole, "adler32 split={split}");

  let whole = crc32(0, Some(&input.data));
  assert_eq!(crc32_combine(crc32(0, Some(a)), crc32(0, Some(b)), b.len()), whole, "crc32 split={split}");
});
