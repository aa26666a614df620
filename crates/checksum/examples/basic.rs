//! Basic usage: one-shot, streaming, fused copy and the "new checksum" sentinel.
//!
//! Run with: `cargo run --example basic -p zsum-checksum`

use std::io::{Read, Write};

use checksum::{
  Adler32, Checksum, ChecksumCopy, Crc32, adler32, crc32, crc32_copy,
  io::{ChecksumReader, ChecksumWriter},
};

fn main() -> std::io::Result<()> {
  let data = b"123456789";

  // zlib-style calls: `None` starts a new checksum.
  let mut crc = crc32(0, None);
  crc = crc32(crc, Some(data));
  let mut adler = adler32(0, None);
  adler = adler32(adler, Some(data));
  println!("crc32   = {crc:#010x}");
  println!("adler32 = {adler:#010x}");

  // Streaming types.
  let mut h = Adler32::new();
  h.update(b"1234");
  h.update(b"56789");
  assert_eq!(h.finalize(), adler);

  // Copy while checksumming.
  let mut dst = [0u8; 9];
  assert_eq!(crc32_copy(0, Some(data), &mut dst), crc);
  assert_eq!(&dst, data);

  let mut h = Crc32::new();
  let mut out = vec![0u8; data.len()];
  h.update_copy(data, &mut out);
  assert_eq!(h.finalize(), crc);

  // std::io adapters.
  let mut reader = ChecksumReader::<_, Crc32>::new(&data[..]);
  let mut sink = Vec::new();
  reader.read_to_end(&mut sink)?;
  println!("reader  = {:#010x} over {} bytes", reader.checksum(), ChecksumReader::bytes(&reader));

  let mut writer = ChecksumWriter::<_, Adler32>::new(Vec::new());
  writer.write_all(data)?;
  writer.flush()?;
  println!("writer  = {:#010x}", writer.checksum());

  // A truncated input fails verification.
  let mut h = Crc32::new();
  h.update(b"12345678");
  if let Err(err) = h.verify(crc) {
    println!("truncated: {err}");
  }
  Ok(())
}
