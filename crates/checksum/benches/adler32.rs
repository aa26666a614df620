//! Adler-32 benchmarks: dispatched path and every eligible kernel.
//!
//! Run: `cargo bench -p zsum-checksum --bench adler32`
//! Native: `RUSTFLAGS='-C target-cpu=native' cargo bench -p zsum-checksum --bench adler32`

use core::hint::black_box;

use checksum::{adler32, adler32_copy, bench};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

mod util;

fn bench_dispatch(c: &mut Criterion) {
  util::print_platform_info();
  let mut group = c.benchmark_group("adler32/dispatch");
  for &(label, size) in util::CASES {
    let src = util::make_data(size);
    group.throughput(Throughput::Bytes(size as u64));
    for variant in util::make_alignment_variants(&src) {
      let param = util::bench_param_label(label, variant.alignment());
      group.bench_with_input(BenchmarkId::from_parameter(&param), variant.as_slice(), |b, data| {
        b.iter(|| black_box(adler32(black_box(1), Some(black_box(data)))));
      });
    }
  }
  group.finish();
}

fn bench_kernels(c: &mut Criterion) {
  let kernels = bench::adler32_kernels();
  let mut group = c.benchmark_group("adler32/kernels");
  for &(label, size) in util::CASES {
    let src = util::make_data(size);
    group.throughput(Throughput::Bytes(size as u64));
    for variant in util::make_alignment_variants(&src) {
      let param = util::bench_param_label(label, variant.alignment());
      for k in &kernels {
        let func = k.func;
        group.bench_with_input(BenchmarkId::new(k.name, &param), variant.as_slice(), |b, data| {
          b.iter(|| black_box(func(black_box(1), black_box(data))));
        });
      }
    }
  }
  group.finish();
}

/// Fused copy against copying first and checksumming the copy.
fn bench_copy(c: &mut Criterion) {
  let mut group = c.benchmark_group("adler32/copy");
  for &(label, size) in util::CASES {
    let src = util::make_data(size);
    let mut dst = vec![0u8; size];
    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function(BenchmarkId::new("fused", label), |b| {
      b.iter(|| black_box(adler32_copy(1, Some(black_box(&src)), &mut dst)));
    });
    group.bench_function(BenchmarkId::new("memcpy+sum", label), |b| {
      b.iter(|| {
        dst.copy_from_slice(black_box(&src));
        black_box(adler32(1, Some(&dst)))
      });
    });
  }
  group.finish();
}

criterion_group!(benches, bench_dispatch, bench_kernels, bench_copy);
criterion_main!(benches);
