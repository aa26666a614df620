//! Adler-32 constants.
//!
//! `a` is one plus the sum of all bytes, `b` is the sum of every intermediate
//! `a`, both modulo [`BASE`]. The packed value is `(b << 16) | a`.

/// Largest prime below 2^16.
pub const BASE: u32 = 65521;

/// Largest `n` such that `255 * n * (n + 1) / 2 + (n + 1) * (BASE - 1)` fits in
/// a `u32`: the number of bytes that can be summed before `b` must be reduced.
pub const NMAX: usize = 5552;

/// Bytes consumed per vector iteration by every SIMD backend.
pub const BLOCK: usize = 32;

/// Bytes processed between modular reductions in the SIMD backends: the
/// largest multiple of [`BLOCK`] not exceeding [`NMAX`].
pub const CHUNK: usize = (NMAX / BLOCK) * BLOCK;

/// Seed value (`a = 1`, `b = 0`).
pub const SEED: u32 = 1;

/// `Adler-32("Wikipedia")`.
pub const CHECK: u32 = 0x11E6_0398;

const fn worst_case_b(n: u64) -> u64 {
  255 * n * (n + 1) / 2 + (n + 1) * (BASE as u64 - 1)
}

const _: () = assert!(worst_case_b(NMAX as u64) <= u32::MAX as u64);
const _: () = assert!(worst_case_b(NMAX as u64 + 1) > u32::MAX as u64);
const _: () = assert!(CHUNK % BLOCK == 0 && CHUNK <= NMAX);

/// Split a packed Adler-32 value into `(a, b)`.
#[inline(always)]
#[must_use]
pub const fn split(adler: u32) -> (u32, u32) {
  (adler & 0xFFFF, adler >> 16)
}

/// Pack `(a, b)` into an Adler-32 value.
#[inline(always)]
#[must_use]
pub const fn join(a: u32, b: u32) -> u32 {
  (b << 16) | a
}
