//! The portable backend is selected whenever no extension is available,
//! and is correct on its own.

use backend::{ForceMode, KernelTier};
use checksum::{bench, select_adler32, select_adler32_copy, select_crc32, select_crc32_copy, select_slide_hash};
use platform::Caps;

const CHECK_STRING: &[u8] = b"123456789";
const CRC32_CHECK: u32 = 0xCBF4_3926;
const ADLER32_CHECK: u32 = 0x091E_01DE;

#[test]
fn empty_caps_select_portable_everywhere() {
  for force in [ForceMode::Auto, ForceMode::Avx2, ForceMode::Pclmul, ForceMode::Neon, ForceMode::HwCrc] {
    assert_eq!(select_adler32(Caps::NONE, force).name, "portable");
    assert_eq!(select_adler32_copy(Caps::NONE, force).name, "portable");
    assert_eq!(select_crc32(Caps::NONE, force).name, "portable");
    assert_eq!(select_crc32_copy(Caps::NONE, force).name, "portable");
    assert_eq!(select_slide_hash(Caps::NONE, force).name, "portable");
  }
  assert_eq!(select_crc32(Caps::NONE, ForceMode::Auto).tier, KernelTier::Portable);
}

#[test]
fn forcing_portable_wins_on_any_cpu() {
  let caps = platform::caps();
  assert_eq!(select_adler32(caps, ForceMode::Portable).name, "portable");
  assert_eq!(select_crc32_copy(caps, ForceMode::Portable).name, "portable");
  assert_eq!(select_slide_hash(caps, ForceMode::Portable).name, "portable");
}

#[test]
fn portable_kernels_produce_check_values() {
  let adler = select_adler32(Caps::NONE, ForceMode::Auto).func;
  let crc = select_crc32(Caps::NONE, ForceMode::Auto).func;
  assert_eq!(adler(1, CHECK_STRING), ADLER32_CHECK, "adler32 portable: got {:#010X}", adler(1, CHECK_STRING));
  assert_eq!(crc(0, CHECK_STRING), CRC32_CHECK, "crc32 portable: got {:#010X}", crc(0, CHECK_STRING));

  let mut dst = [0u8; 9];
  assert_eq!((select_crc32_copy(Caps::NONE, ForceMode::Auto).func)(0, CHECK_STRING, &mut dst), CRC32_CHECK);
  assert_eq!(&dst, CHECK_STRING);
}

#[test]
fn portable_kernel_is_always_listed() {
  assert!(bench::adler32_kernel("portable").is_some());
  assert!(bench::crc32_kernel("portable").is_some());
  assert_eq!(bench::slide_hash_kernels().last().map(|k| k.name), Some("portable"));
}
