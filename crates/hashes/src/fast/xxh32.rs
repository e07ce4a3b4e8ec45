//! XXH32 (**NOT CRYPTO**).
//!
//! The 32-bit sequential family: four dependent u32 lanes over 16-byte
//! blocks. The kernels and the tail finalizer are shared with the dual-lane
//! variants in [`dual`](crate::fast::dual), which reuse them over a 2x4 lane
//! matrix and 32-byte blocks.

#![allow(clippy::indexing_slicing)] // Tight block parsing + fixed-size arrays

use platform::ByteOrder;
use traits::{FastHash, StreamingHash};

use super::load::{read_u32, INPUT_ORDER};

pub(crate) const PRIME32_1: u32 = 0x9E37_79B1;
pub(crate) const PRIME32_2: u32 = 0x85EB_CA77;
pub(crate) const PRIME32_3: u32 = 0xC2B2_AE3D;
pub(crate) const PRIME32_4: u32 = 0x27D4_EB2F;
pub(crate) const PRIME32_5: u32 = 0x1656_67B1;

/// Bytes consumed per bulk step (4 lanes x 4 bytes).
const BLOCK: usize = 16;

/// One-shot XXH32.
#[derive(Clone, Default)]
pub struct Xxh32;

/// Single-lane mixing step, applied once per input word.
///
/// Wraparound arithmetic is load-bearing: every add and multiply is mod 2^32.
#[inline(always)]
pub(crate) const fn round(acc: u32, input: u32) -> u32 {
  acc.wrapping_add(input.wrapping_mul(PRIME32_2)).rotate_left(13).wrapping_mul(PRIME32_1)
}

/// Final bit diffusion, applied after the tail has been consumed.
#[inline(always)]
pub(crate) const fn avalanche(mut h: u32) -> u32 {
  h ^= h >> 15;
  h = h.wrapping_mul(PRIME32_2);
  h ^= h >> 13;
  h = h.wrapping_mul(PRIME32_3);
  h ^ (h >> 16)
}

/// Derive the four lane accumulators from a seed.
#[inline(always)]
pub(crate) const fn seed_lanes(seed: u32) -> [u32; 4] {
  [
    seed.wrapping_add(PRIME32_1).wrapping_add(PRIME32_2),
    seed.wrapping_add(PRIME32_2),
    seed,
    seed.wrapping_sub(PRIME32_1),
  ]
}

/// Fold the four lanes into a single accumulator.
#[inline(always)]
pub(crate) const fn combine_lanes(v: [u32; 4]) -> u32 {
  v[0]
    .rotate_left(1)
    .wrapping_add(v[1].rotate_left(7))
    .wrapping_add(v[2].rotate_left(12))
    .wrapping_add(v[3].rotate_left(18))
}

/// Consume the final `tail.len()` bytes and avalanche.
///
/// The remainder is decomposed greedily: 4-byte steps first, then single
/// bytes. That decomposition is part of the published output, not an
/// implementation choice. The dual-lane variants feed tails up to 31 bytes
/// through the same code, hence the 32-byte bound.
#[inline(always)]
pub(crate) fn finalize(mut h: u32, tail: &[u8], order: ByteOrder) -> u32 {
  debug_assert!(tail.len() < 32);
  let mut offset = 0usize;
  while offset + 4 <= tail.len() {
    h = h.wrapping_add(read_u32(tail, offset, order).wrapping_mul(PRIME32_3));
    h = h.rotate_left(17).wrapping_mul(PRIME32_4);
    offset += 4;
  }
  while offset < tail.len() {
    h = h.wrapping_add((tail[offset] as u32).wrapping_mul(PRIME32_5));
    h = h.rotate_left(11).wrapping_mul(PRIME32_1);
    offset += 1;
  }
  avalanche(h)
}

#[inline(always)]
fn xxh32_with_seed(input: &[u8], seed: u32) -> u32 {
  let order = INPUT_ORDER;
  let mut h: u32;

  if input.len() >= BLOCK {
    let mut v = seed_lanes(seed);
    let limit = input.len() - BLOCK;
    let mut offset = 0usize;
    while offset <= limit {
      v[0] = round(v[0], read_u32(input, offset, order));
      v[1] = round(v[1], read_u32(input, offset + 4, order));
      v[2] = round(v[2], read_u32(input, offset + 8, order));
      v[3] = round(v[3], read_u32(input, offset + 12, order));
      offset += BLOCK;
    }
    h = combine_lanes(v);
  } else {
    h = seed.wrapping_add(PRIME32_5);
  }

  h = h.wrapping_add(input.len() as u32);

  finalize(h, &input[input.len() & !(BLOCK - 1)..], order)
}

impl FastHash for Xxh32 {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;
  type Seed = u32;

  #[inline]
  fn hash_with_seed(seed: Self::Seed, data: &[u8]) -> Self::Output {
    xxh32_with_seed(data, seed)
  }
}

/// Streaming XXH32.
///
/// A plain owned value: no heap, no sharing. Distinct hashers may run on
/// separate threads without synchronization.
#[derive(Clone)]
pub struct Xxh32Hasher {
  total_len: u32,
  large_len: bool,
  v: [u32; 4],
  buf: [u8; BLOCK],
  buf_len: usize,
}

impl Xxh32Hasher {
  #[inline(always)]
  fn absorb_buffer(&mut self, order: ByteOrder) {
    let buf = self.buf;
    self.v[0] = round(self.v[0], read_u32(&buf, 0, order));
    self.v[1] = round(self.v[1], read_u32(&buf, 4, order));
    self.v[2] = round(self.v[2], read_u32(&buf, 8, order));
    self.v[3] = round(self.v[3], read_u32(&buf, 12, order));
  }
}

impl StreamingHash for Xxh32Hasher {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;
  type Seed = u32;

  #[inline]
  fn with_seed(seed: u32) -> Self {
    Self { total_len: 0, large_len: false, v: seed_lanes(seed), buf: [0u8; BLOCK], buf_len: 0 }
  }

  fn update(&mut self, mut data: &[u8]) {
    let order = INPUT_ORDER;

    self.total_len = self.total_len.wrapping_add(data.len() as u32);
    self.large_len |= data.len() >= BLOCK || self.total_len as usize >= BLOCK;

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
        v[0] = round(v[0], read_u32(data, offset, order));
        v[1] = round(v[1], read_u32(data, offset + 4, order));
        v[2] = round(v[2], read_u32(data, offset + 8, order));
        v[3] = round(v[3], read_u32(data, offset + 12, order));
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
  fn digest(&self) -> u32 {
    let order = INPUT_ORDER;
    // The flag, not the buffer length, selects the formula: the stream may
    // have crossed a block boundary even though the buffer is short again.
    let mut h = if self.large_len { combine_lanes(self.v) } else { self.v[2].wrapping_add(PRIME32_5) };
    h = h.wrapping_add(self.total_len);
    finalize(h, &self.buf[..self.buf_len], order)
  }

  #[inline]
  fn reset(&mut self, seed: u32) {
    *self = Self::with_seed(seed);
  }
}

impl Default for Xxh32Hasher {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

/// Big-endian canonical form of a 32-bit digest.
///
/// Also applies to [`Xxh32Dual`](crate::fast::Xxh32Dual) digests, which share
/// the output width.
#[inline]
#[must_use]
pub const fn to_canonical(hash: u32) -> [u8; 4] {
  hash.to_be_bytes()
}

/// Inverse of [`to_canonical`]; reads big-endian regardless of host order.
#[inline]
#[must_use]
pub const fn from_canonical(bytes: [u8; 4]) -> u32 {
  u32::from_be_bytes(bytes)
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use proptest::prelude::*;
  use traits::{FastHash as _, StreamingHash as _};

  use super::{from_canonical, to_canonical, Xxh32, Xxh32Hasher};

  #[test]
  fn empty_input_known_vector() {
    assert_eq!(Xxh32::hash_with_seed(0, b""), 0x02CC_5D05);
  }

  #[test]
  fn smoke_matches_oracle() {
    for data in [&b""[..], b"a", b"abc", b"0123456789abcdef", b"0123456789abcdef0123456789abcdef"] {
      assert_eq!(Xxh32::hash_with_seed(0, data), xxhash_rust::xxh32::xxh32(data, 0));
      assert_eq!(Xxh32::hash_with_seed(0x9E37_79B1, data), xxhash_rust::xxh32::xxh32(data, 0x9E37_79B1));
    }
  }

  #[test]
  fn canonical_is_big_endian() {
    assert_eq!(to_canonical(0x0123_4567), [0x01, 0x23, 0x45, 0x67]);
    assert_eq!(from_canonical([0x01, 0x23, 0x45, 0x67]), 0x0123_4567);
  }

  #[test]
  fn digest_is_repeatable_and_non_mutating() {
    let mut hasher = Xxh32Hasher::with_seed(7);
    hasher.update(b"hello ");
    let first = hasher.digest();
    assert_eq!(first, hasher.digest());
    hasher.update(b"world");
    assert_eq!(hasher.digest(), Xxh32::hash_with_seed(7, b"hello world"));
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
        Xxh32::hash_with_seed(1, &data),
        xxhash_rust::xxh32::xxh32(&data, 1),
        "xxh32 mismatch (len={len})"
      );
    }
  }

  proptest! {
    #[test]
    fn matches_oracle(seed in any::<u32>(), data in proptest::collection::vec(any::<u8>(), 0..2048)) {
      prop_assert_eq!(Xxh32::hash_with_seed(seed, &data), xxhash_rust::xxh32::xxh32(&data, seed));
    }

    #[test]
    fn streaming_matches_one_shot(seed in any::<u32>(), data in proptest::collection::vec(any::<u8>(), 0..512), cut in any::<prop::sample::Index>()) {
      let cut = cut.index(data.len() + 1);
      let mut hasher = Xxh32Hasher::with_seed(seed);
      hasher.update(&data[..cut]);
      hasher.update(&data[cut..]);
      prop_assert_eq!(hasher.digest(), Xxh32::hash_with_seed(seed, &data));
    }

    #[test]
    fn canonical_round_trip(h in any::<u32>()) {
      prop_assert_eq!(from_canonical(to_canonical(h)), h);
    }
  }
}
