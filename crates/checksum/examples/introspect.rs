//! Kernel introspection: which backend each operation resolved to.
//!
//! Run with: `cargo run --example introspect -p zsum-checksum`
//! Force a backend: `ZSUM_CRC32_FORCE=portable cargo run --example introspect -p zsum-checksum`

use backend::ForceMode;
use checksum::{Adler32, Crc32, DispatchInfo, KernelIntrospect, backend_for, bench, select_adler32, select_crc32};
use platform::Caps;

fn main() {
  let info = DispatchInfo::current();
  println!("{info}\n");

  println!("hardware accelerated: {}", info.is_hardware_accelerated());
  for slot in info.slots() {
    println!("  {:<12} {:<16} {}", slot.op, slot.backend, slot.tier);
  }

  println!("\nvia KernelIntrospect:");
  println!("  adler32: {} ({})", backend_for::<Adler32>(), <Adler32 as KernelIntrospect>::backend_tier());
  println!("  crc32:   {} ({})", backend_for::<Crc32>(), <Crc32 as KernelIntrospect>::backend_tier());

  println!("\neligible kernels:");
  let adler: Vec<_> = bench::adler32_kernels().iter().map(|k| k.name).collect();
  let crc: Vec<_> = bench::crc32_kernels().iter().map(|k| k.name).collect();
  println!("  adler32: {adler:?}");
  println!("  crc32:   {crc:?}");

  // Selection is a pure function of the capability set.
  println!("\nselection without extensions:");
  println!("  adler32: {}", select_adler32(Caps::NONE, ForceMode::Auto).name);
  println!("  crc32:   {}", select_crc32(Caps::NONE, ForceMode::Auto).name);
}
