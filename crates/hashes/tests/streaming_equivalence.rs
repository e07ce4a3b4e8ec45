//! Streaming digests must equal one-shot digests for every chunking of the
//! input, including chunkings that straddle block boundaries byte by byte.

use hashes::fast::{
  Xxh32, Xxh32Dual, Xxh32DualHasher, Xxh32Hasher, Xxh64, Xxh64Dual, Xxh64DualHasher, Xxh64Hasher,
};
use proptest::prelude::*;
use traits::{FastHash, StreamingHash};

fn feed_in_chunks<H: StreamingHash>(seed: H::Seed, data: &[u8], chunk: usize) -> H::Output {
  let mut hasher = H::with_seed(seed);
  if chunk == 0 {
    hasher.update(data);
  } else {
    for piece in data.chunks(chunk) {
      hasher.update(piece);
    }
  }
  hasher.digest()
}

fn check_fixed_chunkings<F, H>(data: &[u8], seed: H::Seed)
where
  F: FastHash<Seed = H::Seed, Output = H::Output>,
  H: StreamingHash,
{
  let expected = F::hash_with_seed(seed, data);
  // Chunk sizes straddling the 16- and 32-byte block sizes and the staging
  // buffer in every phase.
  for chunk in [1, 2, 3, 5, 7, 15, 16, 17, 31, 32, 33, 64, 1000] {
    assert_eq!(feed_in_chunks::<H>(seed, data, chunk), expected, "chunk={chunk}");
  }
  // Byte-at-a-time interleaved with whole-rest.
  for cut in [0, 1, 15, 16, 17, 31, 32, 33, data.len()] {
    let cut = cut.min(data.len());
    let mut hasher = H::with_seed(seed);
    hasher.update(&data[..cut]);
    hasher.update(&data[cut..]);
    assert_eq!(hasher.digest(), expected, "cut={cut}");
  }
}

fn sample_data() -> Vec<u8> {
  let mut data = vec![0u8; 333];
  let mut x = 0x853C_49E6_748F_EA9Bu64;
  for b in &mut data {
    x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    *b = (x >> 33) as u8;
  }
  data
}

#[test]
fn xxh32_streaming_equals_one_shot() {
  check_fixed_chunkings::<Xxh32, Xxh32Hasher>(&sample_data(), 0);
  check_fixed_chunkings::<Xxh32, Xxh32Hasher>(&sample_data(), u32::MAX);
}

#[test]
fn xxh64_streaming_equals_one_shot() {
  check_fixed_chunkings::<Xxh64, Xxh64Hasher>(&sample_data(), 0);
  check_fixed_chunkings::<Xxh64, Xxh64Hasher>(&sample_data(), u64::MAX);
}

#[test]
fn xxh32_dual_streaming_equals_one_shot() {
  check_fixed_chunkings::<Xxh32Dual, Xxh32DualHasher>(&sample_data(), 0);
  check_fixed_chunkings::<Xxh32Dual, Xxh32DualHasher>(&sample_data(), 0xDEAD_BEEF);
}

#[test]
fn xxh64_dual_streaming_equals_one_shot() {
  check_fixed_chunkings::<Xxh64Dual, Xxh64DualHasher>(&sample_data(), 0);
  check_fixed_chunkings::<Xxh64Dual, Xxh64DualHasher>(&sample_data(), 0xDEAD_BEEF_CAFE_F00D);
}

#[test]
fn empty_updates_are_no_ops() {
  let data = sample_data();
  let mut hasher = Xxh64Hasher::with_seed(5);
  hasher.update(&[]);
  hasher.update(&data);
  hasher.update(&[]);
  assert_eq!(hasher.digest(), Xxh64::hash_with_seed(5, &data));
}

#[test]
fn hasher_default_is_zero_seed() {
  let data = sample_data();
  let mut a = Xxh32Hasher::default();
  let mut b = Xxh32Hasher::with_seed(0);
  a.update(&data);
  b.update(&data);
  assert_eq!(a.digest(), b.digest());
}

proptest! {
  #[test]
  fn random_chunkings_match_32(
    seed in any::<u32>(),
    data in proptest::collection::vec(any::<u8>(), 0..1024),
    chunk in 1usize..128,
  ) {
    prop_assert_eq!(feed_in_chunks::<Xxh32Hasher>(seed, &data, chunk), Xxh32::hash_with_seed(seed, &data));
    prop_assert_eq!(feed_in_chunks::<Xxh32DualHasher>(seed, &data, chunk), Xxh32Dual::hash_with_seed(seed, &data));
  }

  #[test]
  fn random_chunkings_match_64(
    seed in any::<u64>(),
    data in proptest::collection::vec(any::<u8>(), 0..1024),
    chunk in 1usize..128,
  ) {
    prop_assert_eq!(feed_in_chunks::<Xxh64Hasher>(seed, &data, chunk), Xxh64::hash_with_seed(seed, &data));
    prop_assert_eq!(feed_in_chunks::<Xxh64DualHasher>(seed, &data, chunk), Xxh64Dual::hash_with_seed(seed, &data));
  }

  #[test]
  fn clone_preserves_stream_state(seed in any::<u64>(), a in proptest::collection::vec(any::<u8>(), 0..256), b in proptest::collection::vec(any::<u8>(), 0..256)) {
    let mut original = Xxh64Hasher::with_seed(seed);
    original.update(&a);
    let mut cloned = original.clone();
    original.update(&b);
    cloned.update(&b);
    prop_assert_eq!(original.digest(), cloned.digest());
  }
}
