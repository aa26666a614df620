//! Every kernel eligible on this CPU agrees with the reference across a
//! length and alignment matrix.
//!
//! Kernels are called directly, so this covers backends the dispatcher
//! would never pick here (e.g. SSE2 on an AVX2 machine).

use checksum::kernel_test::{
  run_all_adler32_kernels, run_all_crc32_kernels, slide_hash_kernel_names, verify_adler32_agreement,
  verify_crc32_agreement, verify_slide_agreement,
};

const MAX_ALIGN: usize = 32;

fn lengths() -> Vec<usize> {
  let mut lens: Vec<usize> = (0..=130).collect();
  for base in [255usize, 256, 511, 512, 1024, 4096, 5552, 8192] {
    for k in [0usize, 1, 2, 15, 16, 17, 31, 32, 33] {
      lens.push(base + k);
      lens.push(base.saturating_sub(k));
    }
  }
  lens.sort_unstable();
  lens.dedup();
  lens
}

fn pattern(len: usize) -> Vec<u8> {
  (0..len).map(|i| (i.wrapping_mul(31) ^ (i >> 5)) as u8).collect()
}

#[test]
fn adler32_kernels_agree_over_matrix() {
  let lens = lengths();
  let max = *lens.last().unwrap_or(&0);
  let buf = pattern(max + MAX_ALIGN);
  for &len in &lens {
    for off in 0..MAX_ALIGN {
      let data = &buf[off..off + len];
      if let Err(e) = verify_adler32_agreement(1, data) {
        panic!("len={len} off={off}: {e}");
      }
    }
  }
}

#[test]
fn crc32_kernels_agree_over_matrix() {
  let lens = lengths();
  let max = *lens.last().unwrap_or(&0);
  let buf = pattern(max + MAX_ALIGN);
  for &len in &lens {
    for off in 0..MAX_ALIGN {
      let data = &buf[off..off + len];
      if let Err(e) = verify_crc32_agreement(0, data) {
        panic!("len={len} off={off}: {e}");
      }
    }
  }
}

#[test]
fn kernels_agree_with_nonseed_running_values() {
  let data = pattern(3000);
  for running in [0u32, 0x0001_0001, 0xFFF0_FFF0, 0xFFFF_FFFF, 0x1234_5678] {
    verify_adler32_agreement(running, &data).unwrap();
    verify_crc32_agreement(running, &data).unwrap();
  }
}

#[test]
fn saturated_input_agrees() {
  for len in [5552usize, 5553, 11_104, 70_000] {
    let data = vec![0xFFu8; len];
    verify_adler32_agreement(0xFFF0_FFF0, &data).unwrap();
    verify_crc32_agreement(u32::MAX, &data).unwrap();
  }
}

#[test]
fn reference_comes_first() {
  let results = run_all_adler32_kernels(1, b"Wikipedia");
  assert_eq!(results[0].name, "reference");
  assert!(results.iter().any(|r| r.name == "portable"));
  assert!(results.iter().all(|r| r.checksum == 0x11E6_0398));

  let results = run_all_crc32_kernels(0, b"123456789");
  assert!(results.iter().all(|r| r.checksum == 0xCBF4_3926), "{results:?}");
}

#[test]
fn slide_kernels_agree_over_matrix() {
  assert!(slide_hash_kernel_names().contains(&"portable"));
  let table: Vec<u16> = (0..(1u32 << 15) + MAX_ALIGN as u32)
    .map(|i| (i.wrapping_mul(40_503) >> 3) as u16)
    .collect();
  for wsize in [1u16, 256, 4096, 32_768, u16::MAX] {
    for off in 0..MAX_ALIGN {
      for len in [0usize, 1, 7, 8, 9, 15, 16, 17, 33, 100, 1 << 15] {
        verify_slide_agreement(&table[off..off + len], wsize)
          .unwrap_or_else(|e| panic!("wsize={wsize} off={off} len={len}: {e}"));
      }
    }
  }
}
