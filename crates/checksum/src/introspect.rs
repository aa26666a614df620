//! Dispatch introspection: which backend each slot resolved to.
//!
//! Reading this information resolves the slots it reports on (exactly as a
//! first checksum call would), so it never disagrees with what later calls
//! will use.
//!
//! # Examples
//!
//! ```
//! use checksum::{Adler32, DispatchInfo, KernelIntrospect};
//!
//! let info = DispatchInfo::current();
//! println!("{info}");
//!
//! println!("Adler-32 backend: {}", Adler32::backend_name());
//! ```

use core::fmt;

use backend::KernelTier;
use platform::{Arch, Caps};

use crate::{Adler32, Crc32, adler32, crc32, window};

/// Backend chosen for one dispatch slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotInfo {
  /// Operation name (e.g. `"crc32_copy"`).
  pub op: &'static str,
  /// Kernel name (e.g. `"x86_64/pclmul"`).
  pub backend: &'static str,
  /// Kernel tier.
  pub tier: KernelTier,
}

impl SlotInfo {
  fn of<F: Copy + 'static>(slot: &backend::Dispatcher<F>) -> Self {
    let selected = slot.get();
    Self { op: slot.op(), backend: selected.name, tier: selected.tier }
  }
}

impl fmt::Display for SlotInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {} ({})", self.op, self.backend, self.tier)
  }
}

/// Detected capabilities and the backend of every dispatch slot.
///
/// # Examples
///
/// ```
/// use checksum::DispatchInfo;
///
/// let info = DispatchInfo::current();
/// println!("{info}");
/// // e.g. "x86_64 [SSE2+SSSE3+...] adler32: x86_64/avx2 (simd256), ..."
/// ```
#[derive(Clone, Copy)]
pub struct DispatchInfo {
  arch: Arch,
  caps: Caps,
  slots: [SlotInfo; 5],
}

impl DispatchInfo {
  /// Snapshot of the current process, resolving every slot.
  #[must_use]
  pub fn current() -> Self {
    Self {
      arch: Arch::current(),
      caps: platform::caps(),
      slots: [
        SlotInfo::of(&adler32::ADLER32),
        SlotInfo::of(&adler32::ADLER32_COPY),
        SlotInfo::of(&crc32::CRC32),
        SlotInfo::of(&crc32::CRC32_COPY),
        SlotInfo::of(&window::SLIDE_HASH),
      ],
    }
  }

  /// Architecture the crate was compiled for.
  #[inline]
  #[must_use]
  pub fn arch(&self) -> Arch {
    self.arch
  }

  /// Capabilities the kernels were selected against.
  #[inline]
  #[must_use]
  pub fn caps(&self) -> Caps {
    self.caps
  }

  /// Every slot, in the order `adler32`, `adler32_copy`, `crc32`, `crc32_copy`, `slide_hash`.
  #[inline]
  #[must_use]
  pub fn slots(&self) -> &[SlotInfo] {
    &self.slots
  }

  /// The slot serving `op`, if there is one.
  #[must_use]
  pub fn slot(&self, op: &str) -> Option<SlotInfo> {
    self.slots.iter().copied().find(|s| s.op == op)
  }

  /// Whether any checksum slot runs something faster than the portable code.
  #[must_use]
  pub fn is_hardware_accelerated(&self) -> bool {
    self.slots.iter().any(|s| s.op != window::SLIDE_HASH.op() && s.tier.is_accelerated())
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} [{}]", self.arch, self.caps)?;
    for slot in &self.slots {
      write!(f, " {slot}")?;
    }
    Ok(())
  }
}

impl fmt::Debug for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchInfo")
      .field("arch", &self.arch)
      .field("caps", &format_args!("{}", self.caps))
      .field("slots", &self.slots)
      .finish()
  }
}

/// Checksum types that can report the backend behind them.
pub trait KernelIntrospect {
  /// Name of the backend serving this type's `update`.
  fn backend_name() -> &'static str;

  /// Tier of the backend serving this type's `update`.
  fn backend_tier() -> KernelTier;
}

impl KernelIntrospect for Adler32 {
  fn backend_name() -> &'static str {
    adler32::ADLER32.backend_name()
  }

  fn backend_tier() -> KernelTier {
    adler32::ADLER32.tier()
  }
}

impl KernelIntrospect for Crc32 {
  fn backend_name() -> &'static str {
    crc32::CRC32.backend_name()
  }

  fn backend_tier() -> KernelTier {
    crc32::CRC32.tier()
  }
}

/// Backend name of `T`, for generic code.
#[inline]
#[must_use]
pub fn backend_for<T: KernelIntrospect>() -> &'static str {
  T::backend_name()
}
