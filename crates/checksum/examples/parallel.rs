//! Checksumming a large buffer on several threads and combining the parts.
//!
//! Run with: `cargo run --release --example parallel -p zsum-checksum`

use std::time::Instant;

use checksum::{Adler32, Checksum, Crc32, parallel::checksum_parallel};

fn main() {
  let data: Vec<u8> = (0..64u32 << 20).map(|i| (i ^ (i >> 11)) as u8).collect();
  let threads = std::thread::available_parallelism().map_or(4, |n| n.get());

  let t = Instant::now();
  let serial = Crc32::checksum(&data);
  let serial_time = t.elapsed();

  let t = Instant::now();
  let parallel = checksum_parallel::<Crc32>(&data, threads, 1 << 20);
  let parallel_time = t.elapsed();

  assert_eq!(serial, parallel);
  println!("crc32   {serial:#010x}  serial {serial_time:.2?}  {threads} threads {parallel_time:.2?}");

  let adler = checksum_parallel::<Adler32>(&data, threads, 1 << 20);
  assert_eq!(adler, Adler32::checksum(&data));
  println!("adler32 {adler:#010x}");
}
