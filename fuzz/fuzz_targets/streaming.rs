//! Fuzz target for the streaming hashers.
//!
//! Tests that arbitrary sequences of update calls produce the same digest as
//! the corresponding one-shot hash, for all four variants.

#![no_main]

use arbitrary::Arbitrary;
use hashes::fast::{
  Xxh32, Xxh32Dual, Xxh32DualHasher, Xxh32Hasher, Xxh64, Xxh64Dual, Xxh64DualHasher, Xxh64Hasher,
};
use libfuzzer_sys::fuzz_target;
use traits::{FastHash, StreamingHash};

#[derive(Arbitrary, Debug)]
struct Input {
  seed: u64,
  data: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;

  test_streaming::<Xxh32, Xxh32Hasher>(input.seed as u32, data, &input.chunk_sizes);
  test_streaming::<Xxh64, Xxh64Hasher>(input.seed, data, &input.chunk_sizes);
  test_streaming::<Xxh32Dual, Xxh32DualHasher>(input.seed as u32, data, &input.chunk_sizes);
  test_streaming::<Xxh64Dual, Xxh64DualHasher>(input.seed, data, &input.chunk_sizes);
});

fn test_streaming<F, H>(seed: H::Seed, data: &[u8], chunk_sizes: &[usize])
where
  F: FastHash<Seed = H::Seed, Output = H::Output>,
  H: StreamingHash,
{
  let expected = F::hash_with_seed(seed, data);

  let mut hasher = H::with_seed(seed);
  let mut offset = 0;
  let mut chunk_idx = 0;

  while offset < data.len() {
    let chunk_size = if chunk_sizes.is_empty() {
      1
    } else {
      (chunk_sizes[chunk_idx % chunk_sizes.len()] % 256).max(1)
    };

    let end = (offset + chunk_size).min(data.len());
    hasher.update(&data[offset..end]);
    offset = end;
    chunk_idx += 1;
  }

  assert_eq!(hasher.digest(), expected, "streaming mismatch (len={})", data.len());
}
