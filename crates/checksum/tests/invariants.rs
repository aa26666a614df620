//! Public-surface invariants of the dispatched operations.

use checksum::{adler32, adler32_combine, adler32_copy, crc32, crc32_combine, crc32_copy};

fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut out = vec![0u8; len];
  let mut x = seed;
  for b in &mut out {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = (x as u8).wrapping_add((x >> 8) as u8);
  }
  out
}

fn simd_adler(running: u32, data: &[u8]) -> u32 {
  let mut h = simd_adler32::Adler32::from_checksum(running);
  h.write(data);
  h.finish()
}

fn flate2_crc(data: &[u8]) -> u32 {
  let mut h = flate2::Crc::new();
  h.update(data);
  h.sum()
}

const LENGTHS: &[usize] = &[0, 1, 2, 3, 15, 16, 17, 31, 32, 33, 63, 64, 65, 127, 128, 255, 1000, 5552, 5553, 8192, 65_537];

#[test]
fn seed_convention() {
  for x in [0u32, 1, 0xDEAD_BEEF, u32::MAX] {
    assert_eq!(adler32(x, None), 1, "adler32({x:#x}, None)");
    assert_eq!(crc32(x, None), 0, "crc32({x:#x}, None)");
    assert_eq!(adler32(x, Some(&[])), x, "adler32({x:#x}, empty)");
    assert_eq!(crc32(x, Some(&[])), x, "crc32({x:#x}, empty)");
    assert_eq!(adler32_copy(x, None, &mut []), 1);
    assert_eq!(crc32_copy(x, None, &mut []), 0);
  }
}

#[test]
fn known_vectors() {
  assert_eq!(crc32(0, Some(b"123456789")), 0xCBF4_3926);
  assert_eq!(adler32(1, Some(b"Wikipedia")), 0x11E6_0398);
  assert_eq!(crc32(0, Some(b"The quick brown fox jumps over the lazy dog")), 0x414F_A339);
  assert_eq!(adler32(1, Some(b"abc")), 0x024D_0127);
}

#[test]
fn matches_independent_implementations() {
  for (i, &len) in LENGTHS.iter().enumerate() {
    let data = gen_bytes(len, 0x9E37_79B9 ^ i as u64);
    assert_eq!(adler32(1, Some(&data)), simd_adler(1, &data), "adler32 len={len}");
    assert_eq!(crc32(0, Some(&data)), flate2_crc(&data), "crc32 len={len}");
  }
}

#[test]
fn all_ones_and_zeros() {
  for &len in LENGTHS {
    for fill in [0x00u8, 0xFF] {
      let data = vec![fill; len];
      assert_eq!(adler32(1, Some(&data)), simd_adler(1, &data), "adler32 fill={fill:#x} len={len}");
      assert_eq!(crc32(0, Some(&data)), flate2_crc(&data), "crc32 fill={fill:#x} len={len}");
    }
  }
}

#[test]
fn incremental_equals_bulk() {
  let data = gen_bytes(20_000, 7);
  let adler_all = adler32(1, Some(&data));
  let crc_all = crc32(0, Some(&data));
  for k in [0, 1, 15, 16, 64, 5551, 5552, 5553, 10_000, 19_999, 20_000] {
    let (a, b) = data.split_at(k);
    assert_eq!(adler32(adler32(1, Some(a)), Some(b)), adler_all, "adler32 split at {k}");
    assert_eq!(crc32(crc32(0, Some(a)), Some(b)), crc_all, "crc32 split at {k}");
  }
}

#[test]
fn copy_equals_plain() {
  for &len in LENGTHS {
    let data = gen_bytes(len, len as u64);
    let mut dst = vec![0u8; len];
    assert_eq!(adler32_copy(1, Some(&data), &mut dst), adler32(1, Some(&data)));
    assert_eq!(dst, data);
    dst.fill(0);
    assert_eq!(crc32_copy(0, Some(&data), &mut dst), crc32(0, Some(&data)));
    assert_eq!(dst, data);
  }
}

#[test]
fn combine_joins_adjacent_chunks() {
  let data = gen_bytes(4096, 3);
  for k in [0, 1, 100, 2048, 4095, 4096] {
    let (a, b) = data.split_at(k);
    assert_eq!(
      adler32_combine(adler32(1, Some(a)), adler32(1, Some(b)), b.len()),
      adler32(1, Some(&data)),
      "adler32 combine at {k}"
    );
    assert_eq!(
      crc32_combine(crc32(0, Some(a)), crc32(0, Some(b)), b.len()),
      crc32(0, Some(&data)),
      "crc32 combine at {k}"
    );
  }
}
