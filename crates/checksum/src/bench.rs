//! Kernel lookup by name, bypassing the dispatch slots.
//!
//! Benchmarks and the `zsum-bench` harness use this to time or check one
//! specific backend. Only kernels the current CPU can run are returned.

use alloc::vec::Vec;

use backend::dispatch::{Candidate, Selected};

use crate::{
  adler32::{ADLER32_COPY_KERNELS, ADLER32_KERNELS},
  crc32::{CRC32_COPY_KERNELS, CRC32_KERNELS},
  dispatchers::{Adler32CopyFn, Adler32Fn, Crc32CopyFn, Crc32Fn, SlideHashFn},
  window::SLIDE_HASH_KERNELS,
};

fn eligible<F: Copy>(list: &[Candidate<F>]) -> Vec<Selected<F>> {
  let caps = platform::caps();
  list.iter().filter(|c| caps.has(c.requires)).map(Selected::from).collect()
}

fn by_name<F: Copy>(list: &[Candidate<F>], name: &str) -> Option<Selected<F>> {
  let caps = platform::caps();
  list.iter().find(|c| c.name == name && caps.has(c.requires)).map(Selected::from)
}

/// Adler-32 kernels runnable here, best first.
#[must_use]
pub fn adler32_kernels() -> Vec<Selected<Adler32Fn>> {
  eligible(ADLER32_KERNELS)
}

/// Fused copy-and-Adler-32 kernels runnable here, best first.
#[must_use]
pub fn adler32_copy_kernels() -> Vec<Selected<Adler32CopyFn>> {
  eligible(ADLER32_COPY_KERNELS)
}

/// CRC-32 kernels runnable here, best first.
#[must_use]
pub fn crc32_kernels() -> Vec<Selected<Crc32Fn>> {
  eligible(CRC32_KERNELS)
}

/// Fused copy-and-CRC-32 kernels runnable here, best first.
#[must_use]
pub fn crc32_copy_kernels() -> Vec<Selected<Crc32CopyFn>> {
  eligible(CRC32_COPY_KERNELS)
}

/// Hash-chain slide kernels runnable here, best first.
#[must_use]
pub fn slide_hash_kernels() -> Vec<Selected<SlideHashFn>> {
  eligible(SLIDE_HASH_KERNELS)
}

/// The Adler-32 kernel called `name`, if it exists and can run here.
#[must_use]
pub fn adler32_kernel(name: &str) -> Option<Selected<Adler32Fn>> {
  by_name(ADLER32_KERNELS, name)
}

/// The CRC-32 kernel called `name`, if it exists and can run here.
#[must_use]
pub fn crc32_kernel(name: &str) -> Option<Selected<Crc32Fn>> {
  by_name(CRC32_KERNELS, name)
}
