//! Differential fuzzing against independent implementations.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  let ours = checksum::adler32(1, Some(data));
  let mut reference = simd_adler32::Adler32::new();
  reference.write(data);
  assert_eq!(ours, reference.finish(), "adler32 mismatch, len={}", data.len());

  let ours = checksum::crc32(0, Some(data));
  let mut reference = flate2::Crc::new();
  reference.update(data);
  assert_eq!(ours, reference.sum(), "crc32 mismatch, len={}", data.len());
});
