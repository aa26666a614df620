//! Conformance and throughput harness for the dispatched checksums.
//!
//! `zsum-bench` runs the conformance pass and then the throughput pass.
//! `zsum-bench --check` stops after conformance; `--iters N` sets how many
//! timed repetitions the throughput pass keeps the best of.
//!
//! Set `RUST_LOG=debug` to see capability detection and slot resolution.

use core::hint::black_box;
use std::{
  env,
  process::ExitCode,
  time::{Duration, Instant},
};

use checksum::{DispatchInfo, adler32, adler32_copy, bench, crc32, crc32_copy};
use log::{error, info};

const SEED: u32 = 0x2712_1978;
const MAX_CHUNK: usize = 8192;
const MAX_MISALIGN: usize = 32;
const THROUGHPUT_MAX: usize = 32768;
const THROUGHPUT_MIN: usize = 4;
/// Bytes hashed per timed repetition, regardless of chunk size.
const THROUGHPUT_BYTES: usize = 8 << 20;

#[derive(Clone, Debug)]
struct Args {
  check_only: bool,
  iters: u32,
}

impl Default for Args {
  fn default() -> Self {
    Self { check_only: false, iters: 5 }
  }
}

fn parse_args() -> Result<Args, String> {
  let mut args = Args::default();
  let mut it = env::args().skip(1);
  while let Some(arg) = it.next() {
    match arg.as_str() {
      "--check" => args.check_only = true,
      "--iters" => {
        let v = it.next().ok_or("--iters needs a value")?;
        args.iters = v.parse().map_err(|e| format!("--iters {v:?}: {e}"))?;
        if args.iters == 0 {
          return Err("--iters must be at least 1".into());
        }
      }
      "-h" | "--help" => {
        println!("usage: zsum-bench [--check] [--iters N]");
        std::process::exit(0);
      }
      other => return Err(format!("unknown argument {other:?}")),
    }
  }
  Ok(args)
}

/// Linear congruential fill; the same bytes on every platform.
fn lcg_fill(buf: &mut [u8]) {
  let mut x = SEED;
  for b in buf {
    x = x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    *b = (x >> 24) as u8;
  }
}

/// Halving chunk sizes from `max` down to `min`.
fn chunk_sizes(max: usize, min: usize) -> impl Iterator<Item = usize> {
  core::iter::successors(Some(max), move |&n| (n / 2 >= min).then_some(n / 2))
}

#[derive(Debug)]
struct Mismatch {
  op: &'static str,
  kernel: &'static str,
  len: usize,
  misalign: usize,
  detail: String,
}

fn check_kernels(buf: &[u8]) -> Result<usize, Mismatch> {
  let adler = bench::adler32_kernels();
  let adler_copy = bench::adler32_copy_kernels();
  let crc = bench::crc32_kernels();
  let crc_copy = bench::crc32_copy_kernels();
  let adler_ref = bench::adler32_kernel("portable").map(|k| k.func);
  let crc_ref = bench::crc32_kernel("portable").map(|k| k.func);
  let (Some(adler_ref), Some(crc_ref)) = (adler_ref, crc_ref) else {
    return Err(Mismatch { op: "setup", kernel: "portable", len: 0, misalign: 0, detail: "portable kernel missing".into() });
  };

  let mut dst = vec![0u8; MAX_CHUNK];
  let mut checked = 0usize;

  for len in chunk_sizes(MAX_CHUNK, 1) {
    for misalign in 0..MAX_MISALIGN {
      let src = &buf[misalign..misalign + len];
      let fail = |op, kernel, detail: String| Mismatch { op, kernel, len, misalign, detail };

      let want = adler_ref(1, src);
      for k in &adler {
        let got = (k.func)(1, src);
        if got != want {
          return Err(fail("adler32", k.name, format!("{got:#010x} != {want:#010x}")));
        }
      }
      for k in &adler_copy {
        dst.fill(0);
        let got = (k.func)(1, src, &mut dst[..len]);
        if got != want {
          return Err(fail("adler32_copy", k.name, format!("{got:#010x} != {want:#010x}")));
        }
        if dst[..len] != *src {
          return Err(fail("adler32_copy", k.name, "destination differs from source".into()));
        }
      }

      let want = crc_ref(0, src);
      for k in &crc {
        let got = (k.func)(0, src);
        if got != want {
          return Err(fail("crc32", k.name, format!("{got:#010x} != {want:#010x}")));
        }
      }
      for k in &crc_copy {
        dst.fill(0);
        let got = (k.func)(0, src, &mut dst[..len]);
        if got != want {
          return Err(fail("crc32_copy", k.name, format!("{got:#010x} != {want:#010x}")));
        }
        if dst[..len] != *src {
          return Err(fail("crc32_copy", k.name, "destination differs from source".into()));
        }
      }
      checked += adler.len() + adler_copy.len() + crc.len() + crc_copy.len();
    }
  }
  Ok(checked)
}

/// Best-of-`iters` throughput in MB/s for `f` over `THROUGHPUT_BYTES` in `chunk` pieces.
fn measure(iters: u32, src: &[u8], chunk: usize, mut f: impl FnMut(&[u8])) -> f64 {
  let reps = (THROUGHPUT_BYTES / chunk).max(1);
  let mut best = Duration::MAX;
  for _ in 0..iters {
    let start = Instant::now();
    for _ in 0..reps {
      f(black_box(&src[..chunk]));
    }
    best = best.min(start.elapsed());
  }
  let bytes = (reps * chunk) as f64;
  bytes / best.as_secs_f64().max(f64::MIN_POSITIVE) / 1e6
}

fn throughput(iters: u32, buf: &[u8]) {
  let mut dst = vec![0u8; THROUGHPUT_MAX];
  println!(
    "{:>7}  {:>10} {:>10} {:>10}  {:>10} {:>10} {:>10}",
    "chunk", "adler32", "+copy", "memcpy+a", "crc32", "+copy", "memcpy+c"
  );
  for chunk in chunk_sizes(THROUGHPUT_MAX, THROUGHPUT_MIN) {
    let mut sink = 0u32;
    let a = measure(iters, buf, chunk, |s| sink ^= adler32(1, Some(s)));
    let ac = measure(iters, buf, chunk, |s| sink ^= adler32_copy(1, Some(s), &mut dst[..s.len()]));
    let am = measure(iters, buf, chunk, |s| {
      dst[..s.len()].copy_from_slice(s);
      sink ^= adler32(1, Some(&dst[..s.len()]));
    });
    let c = measure(iters, buf, chunk, |s| sink ^= crc32(0, Some(s)));
    let cc = measure(iters, buf, chunk, |s| sink ^= crc32_copy(0, Some(s), &mut dst[..s.len()]));
    let cm = measure(iters, buf, chunk, |s| {
      dst[..s.len()].copy_from_slice(s);
      sink ^= crc32(0, Some(&dst[..s.len()]));
    });
    black_box(sink);
    println!("{chunk:>7}  {a:>10.1} {ac:>10.1} {am:>10.1}  {c:>10.1} {cc:>10.1} {cm:>10.1}");
  }
}

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let args = match parse_args() {
    Ok(args) => args,
    Err(err) => {
      error!("{err}");
      return ExitCode::from(2);
    }
  };

  let info = DispatchInfo::current();
  println!("{info}");

  let mut buf = vec![0u8; THROUGHPUT_MAX.max(MAX_CHUNK + MAX_MISALIGN)];
  lcg_fill(&mut buf);

  let started = Instant::now();
  match check_kernels(&buf) {
    Ok(checked) => info!("conformance: {checked} kernel runs agree ({:.2?})", started.elapsed()),
    Err(m) => {
      error!(
        "conformance: {} backend {} failed at len {} misalign {}: {}",
        m.op, m.kernel, m.len, m.misalign, m.detail
      );
      return ExitCode::FAILURE;
    }
  }

  if !args.check_only {
    throughput(args.iters, &buf);
  }
  ExitCode::SUCCESS
}
