//! CRC-32 benchmarks: dispatched path and every eligible kernel.
//!
//! Run: `cargo bench -p zsum-checksum --bench crc32`
//! Native: `RUSTFLAGS='-C target-cpu=native' cargo bench -p zsum-checksum --bench crc32`

use core::hint::black_box;

use checksum::{bench, crc32, crc32_combine, crc32_copy};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

mod util;

fn bench_dispatch(c: &mut Criterion) {
  util::print_platform_info();
  let mut group = c.benchmark_group("crc32/dispatch");
  for &(label, size) in util::CASES {
    let src = util::make_data(size);
    group.throughput(Throughput::Bytes(size as u64));
    for variant in util::make_alignment_variants(&src) {
      let param = util::bench_param_label(label, variant.alignment());
      group.bench_with_input(BenchmarkId::from_parameter(&param), variant.as_slice(), |b, data| {
        b.iter(|| black_box(crc32(black_box(0), Some(black_box(data)))));
      });
    }
  }
  group.finish();
}

fn bench_kernels(c: &mut Criterion) {
  let kernels = bench::crc32_kernels();
  let mut group = c.benchmark_group("crc32/kernels");
  for &(label, size) in util::CASES {
    let src = util::make_data(size);
    group.throughput(Throughput::Bytes(size as u64));
    for variant in util::make_alignment_variants(&src) {
      let param = util::bench_param_label(label, variant.alignment());
      for k in &kernels {
        let func = k.func;
        group.bench_with_input(BenchmarkId::new(k.name, &param), variant.as_slice(), |b, data| {
          b.iter(|| black_box(func(black_box(0), black_box(data))));
        });
      }
    }
  }
  group.finish();
}

/// Fused copy against copying first and checksumming the copy.
fn bench_copy(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32/copy");
  for &(label, size) in util::CASES {
    let src = util::make_data(size);
    let mut dst = vec![0u8; size];
    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function(BenchmarkId::new("fused", label), |b| {
      b.iter(|| black_box(crc32_copy(0, Some(black_box(&src)), &mut dst)));
    });
    group.bench_function(BenchmarkId::new("memcpy+sum", label), |b| {
      b.iter(|| {
        dst.copy_from_slice(black_box(&src));
        black_box(crc32(0, Some(&dst)))
      });
    });
  }
  group.finish();
}

/// Joining per-chunk CRCs; cost grows with the log of the second length.
fn bench_combine(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32/combine");
  for &(label, size) in util::CASES {
    group.bench_function(BenchmarkId::from_parameter(label), |b| {
      b.iter(|| black_box(crc32_combine(black_box(0x1234_5678), black_box(0x9ABC_DEF0), black_box(size))));
    });
  }
  group.finish();
}

criterion_group!(benches, bench_dispatch, bench_kernels, bench_copy, bench_combine);
criterion_main!(benches);
