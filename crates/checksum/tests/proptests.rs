//! Property-based tests for the dispatched checksums and the slide.

use checksum::{
  Adler32, Crc32, adler32, adler32_combine, adler32_copy, crc32, crc32_combine, crc32_copy,
  kernel_test::{verify_adler32_agreement, verify_crc32_agreement, verify_slide_agreement},
  slide_hash,
};
use proptest::prelude::*;
use traits::{Checksum, ChecksumCopy};

/// Arbitrary byte vectors up to 8KB.
fn arb_data() -> impl Strategy<Value = Vec<u8>> {
  prop::collection::vec(any::<u8>(), 0..8192)
}

/// Sorted split points ending at `len`.
fn arb_splits(len: usize, count: usize) -> impl Strategy<Value = Vec<usize>> {
  prop::collection::vec(0..=len, count).prop_map(move |mut splits| {
    splits.sort_unstable();
    splits.push(len);
    splits.dedup();
    splits
  })
}

fn arb_data_with_splits() -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
  arb_data().prop_flat_map(|data| {
    let len = data.len();
    (Just(data), arb_splits(len, 6))
  })
}

fn stream<C: Checksum>(data: &[u8], splits: &[usize]) -> C::Output {
  let mut h = C::new();
  let mut prev = 0;
  for &split in splits {
    h.update(&data[prev..split]);
    prev = split;
  }
  h.finalize()
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(256))]

  #[test]
  fn all_kernels_agree(data in arb_data(), running in any::<u32>(), off in 0usize..32) {
    let off = off.min(data.len());
    let view = &data[off..];
    prop_assert!(verify_adler32_agreement(running, view).is_ok());
    prop_assert!(verify_crc32_agreement(running, view).is_ok());
  }

  #[test]
  fn matches_independent_implementations(data in arb_data()) {
    let mut a = simd_adler32::Adler32::new();
    a.write(&data);
    prop_assert_eq!(adler32(1, Some(&data)), a.finish());

    let mut c = flate2::Crc::new();
    c.update(&data);
    prop_assert_eq!(crc32(0, Some(&data)), c.sum());
  }

  #[test]
  fn incremental_equals_oneshot((data, splits) in arb_data_with_splits()) {
    prop_assert_eq!(stream::<Adler32>(&data, &splits), Adler32::checksum(&data));
    prop_assert_eq!(stream::<Crc32>(&data, &splits), Crc32::checksum(&data));
  }

  #[test]
  fn copy_matches_plain(data in arb_data(), running in any::<u32>()) {
    let mut dst = vec![0u8; data.len()];
    prop_assert_eq!(adler32_copy(running, Some(&data), &mut dst), adler32(running, Some(&data)));
    prop_assert_eq!(&dst, &data);
    dst.fill(0);
    prop_assert_eq!(crc32_copy(running, Some(&data), &mut dst), crc32(running, Some(&data)));
    prop_assert_eq!(&dst, &data);
  }

  #[test]
  fn streaming_copy((data, splits) in arb_data_with_splits()) {
    let mut dst = vec![0u8; data.len()];
    let mut h = Crc32::new();
    let mut prev = 0;
    for &split in &splits {
      h.update_copy(&data[prev..split], &mut dst[prev..split]);
      prev = split;
    }
    prop_assert_eq!(h.finalize(), Crc32::checksum(&data));
    prop_assert_eq!(&dst, &data);
  }

  #[test]
  fn combine_matches_concatenation(a in arb_data(), b in arb_data()) {
    let mut whole = a.clone();
    whole.extend_from_slice(&b);
    prop_assert_eq!(
      adler32_combine(adler32(1, Some(&a)), adler32(1, Some(&b)), b.len()),
      adler32(1, Some(&whole))
    );
    prop_assert_eq!(
      crc32_combine(crc32(0, Some(&a)), crc32(0, Some(&b)), b.len()),
      crc32(0, Some(&whole))
    );
  }

  #[test]
  fn single_bit_flip_changes_crc(data in prop::collection::vec(any::<u8>(), 1..2048), bit in any::<usize>()) {
    let mut flipped = data.clone();
    let bit = bit % (data.len() * 8);
    flipped[bit / 8] ^= 1 << (bit % 8);
    prop_assert_ne!(crc32(0, Some(&data)), crc32(0, Some(&flipped)));
  }

  #[test]
  fn slide_is_saturating_subtract(table in prop::collection::vec(any::<u16>(), 0..1024), wsize in any::<u16>()) {
    prop_assert!(verify_slide_agreement(&table, wsize).is_ok());
    let mut slid = table.clone();
    slide_hash(&mut slid, wsize);
    for (&before, &after) in table.iter().zip(&slid) {
      prop_assert_eq!(after, before.saturating_sub(wsize));
    }
  }
}
