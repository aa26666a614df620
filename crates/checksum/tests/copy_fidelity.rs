//! Fused copy kernels reproduce their input exactly, stay inside the
//! destination, and return the same value as the plain kernels.

use checksum::{
  adler32, adler32_copy, crc32, crc32_copy,
  kernel_test::{run_all_adler32_copy_kernels, run_all_crc32_copy_kernels},
};

fn noise(len: usize, seed: u32) -> Vec<u8> {
  let mut x = seed;
  (0..len)
    .map(|_| {
      x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
      (x >> 24) as u8
    })
    .collect()
}

#[test]
fn every_copy_kernel_copies_exactly() {
  let buf = noise(9000, 0x2712_1978);
  for len in (0..=300).chain([1023, 1024, 1025, 5552, 5553, 8191, 8192]) {
    for off in [0usize, 1, 3, 7, 15, 16, 31] {
      let data = &buf[off..off + len];
      for r in run_all_adler32_copy_kernels(1, data).iter().skip(1) {
        assert_eq!(r.copy_matches, Some(true), "adler32 {} len={len} off={off}", r.name);
      }
      for r in run_all_crc32_copy_kernels(0, data).iter().skip(1) {
        assert_eq!(r.copy_matches, Some(true), "crc32 {} len={len} off={off}", r.name);
      }
    }
  }
}

#[test]
fn misaligned_destination() {
  let data = noise(4096 + 64, 1);
  let mut dst = vec![0u8; 4096 + 64];
  for src_off in [0usize, 5, 16] {
    for dst_off in [0usize, 1, 9, 32] {
      let src = &data[src_off..src_off + 4096];
      let out = &mut dst[dst_off..dst_off + 4096];
      assert_eq!(adler32_copy(1, Some(src), out), adler32(1, Some(src)));
      assert_eq!(out, src);
      out.fill(0);
      assert_eq!(crc32_copy(0, Some(src), out), crc32(0, Some(src)));
      assert_eq!(out, src);
    }
  }
}

#[test]
fn streaming_copy_matches_one_shot() {
  let data = noise(10_000, 42);
  let mut dst = vec![0u8; data.len()];
  let mut adler = 1;
  let mut crc = 0;
  let mut pos = 0;
  for step in [1usize, 13, 64, 100, 4000, 5822] {
    let end = pos + step;
    adler = adler32_copy(adler, Some(&data[pos..end]), &mut dst[pos..end]);
    crc = crc32_copy(crc, Some(&data[pos..end]), &mut dst[pos..end]);
    pos = end;
  }
  assert_eq!(pos, data.len());
  assert_eq!(adler, adler32(1, Some(&data)));
  assert_eq!(crc, crc32(0, Some(&data)));
  assert_eq!(dst, data);
}

#[test]
#[should_panic]
fn short_destination_panics() {
  let mut dst = [0u8; 3];
  let _ = crc32_copy(0, Some(b"four"), &mut dst);
}
