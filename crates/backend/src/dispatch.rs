//! Kernel dispatch: selection and lazily-resolved dispatch slots.
//!
//! - [`Candidate`]: a kernel with capability requirements
//! - [`Selected`]: the result of kernel selection
//! - [`select`] / [`select_forced`]: pure choice of the best kernel for a capability set
//! - [`Dispatcher`]: the per-operation dispatch slot
//!
//! # Design
//!
//! Selection is a pure function `Caps -> Selected<F>`, so every policy can be
//! unit-tested with synthetic capability sets. The dispatch slot only adds
//! one-time resolution on top:
//!
//! ```text
//! Uninitialized --first get()--> run selector --publish--> Resolved
//!                                                           |
//!              every later get(): one acquire load + indirect call
//! ```
//!
//! # Usage
//!
//! ```
//! use backend::{candidates, dispatch::{Dispatcher, Selected, select}, KernelTier};
//! use platform::Caps;
//!
//! type SumFn = fn(u32, &[u8]) -> u32;
//!
//! fn wide(sum: u32, data: &[u8]) -> u32 {
//!   data.iter().fold(sum, |s, &b| s.wrapping_add(u32::from(b)))
//! }
//! fn portable(sum: u32, data: &[u8]) -> u32 {
//!   data.iter().fold(sum, |s, &b| s.wrapping_add(u32::from(b)))
//! }
//!
//! const PORTABLE: Selected<SumFn> = Selected::new("portable", KernelTier::Portable, portable);
//!
//! fn select_sum() -> Selected<SumFn> {
//!   select::<SumFn>(platform::caps(), candidates![
//!     "x86_64/avx2" => Caps::AVX2_READY => KernelTier::Simd256 => wide,
//!     "portable" => Caps::NONE => KernelTier::Portable => portable,
//!   ])
//!   .unwrap_or(PORTABLE)
//! }
//!
//! static SUM: Dispatcher<SumFn> = Dispatcher::new("sum", select_sum);
//!
//! assert_eq!((SUM.get().func)(0, b"abc"), 294);
//! ```

use platform::Caps;

use crate::{cache::OnceCache, policy::ForceMode, tier::KernelTier};

// ─────────────────────────────────────────────────────────────────────────────
// Core Types
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate kernel with capability requirements.
///
/// Candidates are ordered from best to worst. Selection picks the first
/// candidate whose requirements are satisfied by the capability set.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., `"x86_64/avx2"`).
  pub name: &'static str,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  /// Acceleration tier, for introspection.
  pub tier: KernelTier,
  /// The kernel function pointer.
  pub func: F,
}

impl<F> Candidate<F> {
  /// Create a new candidate.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, tier: KernelTier, func: F) -> Self {
    Self { name, requires, tier, func }
  }
}

/// The result of kernel selection.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  /// Name of the selected kernel.
  pub name: &'static str,
  /// Acceleration tier of the selected kernel.
  pub tier: KernelTier,
  /// The selected kernel function.
  pub func: F,
}

impl<F> Selected<F> {
  /// Create a new selected result.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, tier: KernelTier, func: F) -> Self {
    Self { name, tier, func }
  }
}

impl<F: Copy> From<&Candidate<F>> for Selected<F> {
  #[inline]
  fn from(c: &Candidate<F>) -> Self {
    Self::new(c.name, c.tier, c.func)
  }
}

/// Select the best kernel from a candidate list.
///
/// Returns the first candidate whose `requires` is satisfied by `caps`, or
/// `None` if the list has no eligible entry (lists normally end with a
/// `Caps::NONE` portable candidate, which is always eligible).
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Option<Selected<F>> {
  candidates.iter().find(|c| caps.has(c.requires)).map(Selected::from)
}

/// Select a kernel honoring a [`ForceMode`].
///
/// A forced kernel is used only if it exists in `candidates` and `caps`
/// satisfies it; otherwise selection falls back to [`select`] and the
/// rejection is logged.
#[must_use]
pub fn select_forced<F: Copy>(caps: Caps, candidates: &[Candidate<F>], force: ForceMode) -> Option<Selected<F>> {
  if force != ForceMode::Auto {
    match candidates.iter().find(|c| force.matches(c.name)) {
      Some(c) if caps.has(c.requires) => return Some(Selected::from(c)),
      Some(c) => log::warn!("forced backend `{force}` ({}) not supported on this CPU ({caps}); using auto", c.name),
      None => log::warn!("forced backend `{force}` is not built for this target; using auto"),
    }
  }
  select(caps, candidates)
}

/// Build a `&[Candidate<_>]` slice.
///
/// ```
/// # use backend::{candidates, KernelTier};
/// # use platform::Caps;
/// # fn k(x: u32, _: &[u8]) -> u32 { x }
/// let list: &[backend::dispatch::Candidate<fn(u32, &[u8]) -> u32>] = candidates![
///   "x86_64/pclmul" => Caps::PCLMUL_READY => KernelTier::Folding => k,
///   "portable" => Caps::NONE => KernelTier::Portable => k,
/// ];
/// assert_eq!(list.len(), 2);
/// ```
#[macro_export]
macro_rules! candidates {
  ($($name:expr => $requires:expr => $tier:expr => $func:expr),+ $(,)?) => {
    &[$($crate::dispatch::Candidate::new($name, $requires, $tier, $func)),+]
  };
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch Slot
// ─────────────────────────────────────────────────────────────────────────────

/// A process-wide dispatch slot for one operation.
///
/// Starts unresolved. The first [`get`](Self::get) runs the selector, publishes
/// the chosen kernel, and every later call returns that same kernel. The
/// selector must be deterministic for a given machine, so racing first callers
/// agree on the choice.
///
/// # Example
///
/// ```ignore
/// static ADLER32: Dispatcher<Adler32Fn> = Dispatcher::new("adler32", select_adler32);
///
/// fn adler32(adler: u32, data: &[u8]) -> u32 {
///   (ADLER32.get().func)(adler, data)
/// }
/// ```
pub struct Dispatcher<F: Copy + 'static> {
  op: &'static str,
  cache: OnceCache<Selected<F>>,
  selector: fn() -> Selected<F>,
}

impl<F: Copy + 'static> Dispatcher<F> {
  /// Create an unresolved slot for operation `op`.
  #[must_use]
  pub const fn new(op: &'static str, selector: fn() -> Selected<F>) -> Self {
    Self { op, cache: OnceCache::new(), selector }
  }

  /// Get the selected kernel, resolving the slot on first call.
  #[inline]
  #[must_use]
  pub fn get(&self) -> Selected<F> {
    self.cache.get_or_init(|| {
      let selected = (self.selector)();
      log::debug!("{} dispatch resolved to {} ({})", self.op, selected.name, selected.tier);
      selected
    })
  }

  /// Name of the selected kernel (resolves the slot if needed).
  #[inline]
  #[must_use]
  pub fn backend_name(&self) -> &'static str {
    self.get().name
  }

  /// Tier of the selected kernel (resolves the slot if needed).
  #[inline]
  #[must_use]
  pub fn tier(&self) -> KernelTier {
    self.get().tier
  }

  /// Whether the slot has been resolved.
  #[inline]
  #[must_use]
  pub fn is_resolved(&self) -> bool {
    self.cache.get().is_some()
  }

  /// Operation name this slot serves.
  #[inline]
  #[must_use]
  pub const fn op(&self) -> &'static str {
    self.op
  }
}
