use std::sync::Once;

use checksum::DispatchInfo;

pub const CASES: &[(&str, usize)] = &[
  ("xs", 64),
  ("s", 256),
  ("m", 4usize.strict_mul(1024)),
  ("l", 64usize.strict_mul(1024)),
  ("xl", 1024usize.strict_mul(1024)),
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Alignment {
  /// A slice starting at a 64B-aligned address.
  A64,
  /// One byte past a 64B boundary, forcing every kernel through its head path.
  Off1,
  /// Fifteen bytes past a 64B boundary.
  Off15,
}

impl Alignment {
  pub const ALL: [Self; 3] = [Self::A64, Self::Off1, Self::Off15];

  #[inline]
  #[must_use]
  pub const fn label(self) -> &'static str {
    match self {
      Self::A64 => "a64",
      Self::Off1 => "a64+1",
      Self::Off15 => "a64+15",
    }
  }

  #[inline]
  #[must_use]
  pub const fn skew(self) -> usize {
    match self {
      Self::A64 => 0,
      Self::Off1 => 1,
      Self::Off15 => 15,
    }
  }
}

pub struct BenchData {
  alignment: Alignment,
  backing: Vec<u8>,
  offset: usize,
  len: usize,
}

impl BenchData {
  #[must_use]
  pub fn aligned_copy(src: &[u8], alignment: Alignment) -> Self {
    let len = src.len();
    let mut backing = vec![0u8; len.strict_add(128)];
    let base = backing.as_ptr() as usize;
    let offset = (64 - base % 64) % 64 + alignment.skew();
    backing[offset..offset + len].copy_from_slice(src);
    Self { alignment, backing, offset, len }
  }

  #[inline]
  #[must_use]
  pub fn alignment(&self) -> Alignment {
    self.alignment
  }

  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[u8] {
    &self.backing[self.offset..self.offset + self.len]
  }
}

#[must_use]
pub fn make_data(len: usize) -> Vec<u8> {
  (0..len)
    .map(|i| (i as u8).wrapping_mul(31).wrapping_add(i.strict_shr(8) as u8))
    .collect()
}

#[must_use]
pub fn make_alignment_variants(src: &[u8]) -> Vec<BenchData> {
  Alignment::ALL.iter().map(|&a| BenchData::aligned_copy(src, a)).collect()
}

#[inline]
#[must_use]
pub fn bench_param_label(size_label: &str, alignment: Alignment) -> String {
  format!("{size_label}@{}", alignment.label())
}

/// Print detected capabilities and slot resolution once per bench binary.
pub fn print_platform_info() {
  static ONCE: Once = Once::new();
  ONCE.call_once(|| {
    let info = DispatchInfo::current();
    eprintln!("arch: {}  caps: {}", info.arch(), info.caps());
    for slot in info.slots() {
      eprintln!("  {slot}");
    }
  });
}
