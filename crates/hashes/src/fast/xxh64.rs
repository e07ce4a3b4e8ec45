//! XXH64 (**NOT CRYPTO**).
//!
//! The 64-bit sequential family: four dependent u64 lanes over 32-byte
//! blocks. Structurally parallel to [`xxh32`](crate::fast::xxh32), with one
//! extra wrinkle: combining the lanes folds each one back into the
//! accumulator through a merge round, where the 32-bit variant only rotates
//! and sums.

#![allow(clippy::indexing_slicing)] // Tight block parsing + fixed-size arrays

use platform::ByteOrder;
use traits::{FastHash, StreamingHash};

use super::load::{read_u32, read_u64, INPUT_ORDER};

pub(crate) const PRIME64_1: u64 = 0x9E37_79B1_85EB_CA87;
pub(crate) const PRIME64_2: u64 = 0xC2B2_AE3D_27D4_EB4F;
pub(crate) const PRIME64_3: u64 = 0x1656_67B1_9E37_79F9;
pub(crate) const PRIME64_4: u64 = 0x85EB_CA77_C2B2_AE63;
pub(crate) const PRIME64_5: u64 = 0x27D4_EB2F_1656_67C5;

/// Bytes consumed per bulk step (4 lanes x 8 bytes).
const BLOCK: usize = 32;

/// One-shot XXH64.
#[derive(Clone, Default)]
pub struct Xxh64;

#[inline(always)]
pub(crate) const fn round(acc: u64, input: u64) -> u64 {
  acc.wrapping_add(input.wrapping_mul(PRIME64_2)).rotate_left(31).wrapping_mul(PRIME64_1)
}

/// Fold one lane into the combined accumulator.
#[inline(always)]
pub(crate) const fn merge_round(acc: u64, lane: u64) -> u64 {
  (acc ^ round(0, lane)).wrapping_mul(PRIME64_1).wrapping_add(PRIME64_4)
}

#[inline(always)]
pub(crate) const fn avalanche(mut h: u64) -> u64 {
  h ^= h >> 33;
  h = h.wrapping_mul(PRIME64_2);
  h ^= h >> 29;
  h = h.wrapping_mul(PRIME64_3);
  h ^ (h >> 32)
}

#[inline(always)]
pub(crate) const fn seed_lanes(seed: u64) -> [u64; 4] {
  [
    seed.wrapping_add(PRIME64_1).wrapping_add(PRIME64_2),
    seed.wrapping_add(PRIME64_2),
    seed,
    seed.wrapping_sub(PRIME64_1),
  ]
}

/// Rotate-sum the four lanes, then merge each one back in.
#[inline(always)]
pub(crate) const fn combine_lanes(v: [u64; 4]) -> u64 {
  let mut h = v[0]
    .rotate_left(1)
    .wrapping_add(v[1].rotate_left(7))
    .wrapping_add(v[2].rotate_left(12))
    .wrapping_add(v[3].rotate_left(18));
  h = merge_round(h, v[0]);
  h = merge_round(h, v[1]);
  h = merge_round(h, v[2]);
  merge_round(h, v[3])
}

/// Consume the final `tail.len()` bytes and avalanche.
///
/// Greedy decomposition of the remainder: 8-byte steps, then at most one
/// 4-byte step, then single bytes.
#[inline(always)]
pub(crate) fn finalize(mut h: u64, tail: &[u8], order: ByteOrder) -> u64 {
  debug_assert!(tail.len() < 32);
  let mut offset = 0usize;
  while offset + 8 <= tail.len() {
    h ^= round(0, read_u64(tail, offset, order));
    h = h.rotate_left(27).wrapping_mul(PRIME64_1).wrapping_add(PRIME64_4);
    offset += 8;
  }
  if offset + 4 <= tail.len() {
    h ^= u64::from(read_u32(tail, offset, order)).wrapping_mul(PRIME64_1);
    h = h.rotate_left(23).wrapping_mul(PRIME64_2).wrapping_add(PRIME64_3);
    offset += 4;
  }
  while offset < tail.len() {
    h ^= u64::from(tail[offset]).wrapping_mul(PRIME64_5);
    h = h.rotate_left(11).wrapping_mul(PRIME64_1);
    offset += 1;
  }
  avalanche(h)
}

#[inline(always)]
fn xxh64_with_seed(input: &[u8], seed: u64) -> u64 {
  let order = INPUT_ORDER;
  let mut h: u64;

  if input.len() >= BLOCK {
    let mut v = seed_lanes(seed);
    let limit = input.len() - BLOCK;
    let mut offset = 0usize;
    while offset <= limit {
      v[0] = round(v[0], read_u64(input, offset, order));
      v[1] = round(v[1], read_u64(input, offset + 8, order));
      v[2] = round(v[2], read_u64(input, offset + 16, order));
      v[3] = round(v[3], read_u64(input, offset + 24, order));
      offset += BLOCK;
    }
    h = combine_lanes(v);
  } else {
    h = seed.wrapping_add(PRIME64_5);
  }

  h = h.wrapping_add(input.len() as u64);

  finalize(h, &input[input.len() & !(BLOCK - 1)..], order)
}

impl FastHash for Xxh64 {
  const OUTPUT_SIZE: usize = 8;
  type Output = u64;
  type Seed = u64;

  #[inline]
  fn hash_with_seed(seed: Self::Seed, data: &[u8]) -> Self::Output {
    xxh64_with_seed(data, seed)
  }
}

/// Streaming XXH64.
#[derive(Clone)]
pub struct Xxh64Hasher {
  total_len: u64,
  v: [u64; 4],
  buf: [u8; BLOCK],
  buf_len: usize,
}

impl Xxh64Hasher {
  #[inline(always)]
  fn absorb_buffer(&mut self, order: ByteOrder) {
    let buf = self.buf;
    self.v[0] = round(self.v[0], read_u64(&buf, 0, order));
    self.v[1] = round(self.v[1], read_u64(&buf, 8, order));
    self.v[2] = round(self.v[2], read_u64(&buf, 16, order));
    self.v[3] = round(self.v[3], read_u64(&buf, 24, order));
  }
}

impl StreamingHash for Xxh64Hasher {
  const OUTPUT_SIZE: usize = 8;
  type Output = u64;
  type Seed = u64;

  #[inline]
  fn with_seed(seed: u64) -> Self {
    Self { total_len: 0, v: seed_lanes(seed), buf: [0u8; BLOCK], buf_len: 0 }
  }

  fn update(&mut self, mut data: &[u8]) {
    let order = INPUT_ORDER;

    self.total_len = self.total_len.wrapping_add(data.len() as u64);

    if self.buf_len + data.len() < BLOCK {
      // Everything fits in the staging buffer.
      self.buf[self.buf_len..self.buf_len + data.len()].copy_from_slice(data);
      self.buf_len += data.len();
      return;
    }

    if self.buf_len > 0 {
      // Complete the block straddling the previous update.
      let fill = BLOCK - self.buf_len;
      self.buf[self.buf_len..].copy_from_slice(&data[..fill]);
      self.absorb_buffer(order);
      data = &data[fill..];
      self.buf_len = 0;
    }

    let mut offset = 0usize;
    if data.len() >= BLOCK {
      let limit = data.len() - BLOCK;
      let mut v = self.v;
      while offset <= limit {
        v[0] = round(v[0], read_u64(data, offset, order));
        v[1] = round(v[1], read_u64(data, offset + 8, order));
        v[2] = round(v[2], read_u64(data, offset + 16, order));
        v[3] = round(v[3], read_u64(data, offset + 24, order));
        offset += BLOCK;
      }
      self.v = v;
    }

    if offset < data.len() {
      let tail = &data[offset..];
      self.buf[..tail.len()].copy_from_slice(tail);
      self.buf_len = tail.len();
    }
  }

  #[inline]
  fn digest(&self) -> u64 {
    let order = INPUT_ORDER;
    // A 64-bit length counter cannot roll over in practice, so the exact
    // total distinguishes the short path (unlike the 32-bit hasher's latched
    // flag).
    let mut h = if self.total_len >= BLOCK as u64 {
      combine_lanes(self.v)
    } else {
      // Lane 2 still holds the raw seed on the short path.
      self.v[2].wrapping_add(PRIME64_5)
    };
    h = h.wrapping_add(self.total_len);
    finalize(h, &self.buf[..self.buf_len], order)
  }

  #[inline]
  fn reset(&mut self, seed: u64) {
    *self = Self::with_seed(seed);
  }
}

impl Default for Xxh64Hasher {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

/// Big-endian canonical form of a 64-bit digest.
#[inline]
#[must_use]
pub const fn to_canonical(hash: u64) -> [u8; 8] {
  hash.to_be_bytes()
}

/// Inverse of [`to_canonical`]; reads big-endian regardless of host order.
#[inline]
#[must_use]
pub const fn from_canonical(bytes: [u8; 8]) -> u64 {
  u64::from_be_bytes(bytes)
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use proptest::prelude::*;
  use traits::{FastHash as _, StreamingHash as _};

  use super::{from_canonical, to_canonical, Xxh64, Xxh64Hasher};

  #[test]
  fn empty_input_known_vector() {
    assert_eq!(Xxh64::hash_with_seed(0, b""), 0xEF46_DB37_51D8_E999);
  }

  #[test]
  fn smoke_matches_oracle() {
    for data in [&b""[..], b"a", b"abc", b"0123456789abcdef", b"0123456789abcdef0123456789abcdef0123456789abcdef"]
    {
      assert_eq!(Xxh64::hash_with_seed(0, data), xxhash_rust::xxh64::xxh64(data, 0));
      assert_eq!(
        Xxh64::hash_with_seed(0x9E37_79B1_85EB_CA87, data),
        xxhash_rust::xxh64::xxh64(data, 0x9E37_79B1_85EB_CA87)
      );
    }
  }

  #[test]
  fn canonical_is_big_endian() {
    assert_eq!(to_canonical(0x0123_4567_89AB_CDEF), [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]);
    assert_eq!(from_canonical([0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]), 0x0123_4567_89AB_CDEF);
  }

  #[test]
  fn digest_is_repeatable_and_non_mutating() {
    let mut hasher = Xxh64Hasher::with_seed(7);
    hasher.update(b"hello ");
    let first = hasher.digest();
    assert_eq!(first, hasher.digest());
    hasher.update(b"world");
    assert_eq!(hasher.digest(), Xxh64::hash_with_seed(7, b"hello world"));
  }

  fn deterministic_bytes(len: usize) -> Vec<u8> {
    let mut out = alloc::vec![0u8; len];
    let mut x = 0x243F_6A88_85A3_08D3u64;
    for b in &mut out {
      x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
      *b = (x >> 56) as u8;
    }
    out
  }

  #[test]
  fn every_tail_length_matches_oracle() {
    for len in 0..=96usize {
      let data = deterministic_bytes(len);
      assert_eq!(
        Xxh64::hash_with_seed(1, &data),
        xxhash_rust::xxh64::xxh64(&data, 1),
        "xxh64 mismatch (len={len})"
      );
    }
  }

  proptest! {
    #[test]
    fn matches_oracle(seed in any::<u64>(), data in proptest::collection::vec(any::<u8>(), 0..2048)) {
      prop_assert_eq!(Xxh64::hash_with_seed(seed, &data), xxhash_rust::xxh64::xxh64(&data, seed));
    }

    #[test]
    fn streaming_matches_one_shot(seed in any::<u64>(), data in proptest::collection::vec(any::<u8>(), 0..512), cut in any::<prop::sample::Index>()) {
      let cut = cut.index(data.len() + 1);
      let mut hasher = Xxh64Hasher::with_seed(seed);
      hasher.update(&data[..cut]);
      hasher.update(&data[cut..]);
      prop_assert_eq!(hasher.digest(), Xxh64::hash_with_seed(seed, &data));
    }

    #[test]
    fn canonical_round_trip(h in any::<u64>()) {
      prop_assert_eq!(from_canonical(to_canonical(h)), h);
    }
  }
}
