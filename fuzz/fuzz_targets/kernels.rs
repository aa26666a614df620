//! Every kernel eligible on this CPU, plain and copy, against the reference.

#![no_main]

use arbitrary::Arbitrary;
use checksum::kernel_test::{verify_adler32_agreement, verify_crc32_agreement, verify_slide_agreement};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  running: u32,
  /// Start offset into `data`, to vary alignment.
  skew: u8,
  data: Vec<u8>,
  table: Vec<u16>,
  wsize: u16,
}

fuzz_target!(|input: Input| {
  let skew = usize::from(input.skew % 32).min(input.data.len());
  let data = &input.data[skew..];
  if let Err(e) = verify_adler32_agreement(input.running, data) {
    panic!("{e}");
  }
  if let Err(e) = verify_crc32_agreement(input.running, data) {
    panic!("{e}");
  }
  if let Err(e) = verify_slide_agreement(&input.table, input.wsize) {
    panic!("{e}");
  }
});
