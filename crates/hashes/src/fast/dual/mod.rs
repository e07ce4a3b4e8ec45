//! Dual-lane xxHash variants (**NOT CRYPTO**).
//!
//! Both variants run two independent sets of four u32 lanes over 32-byte
//! blocks: row 0 absorbs the first 16 bytes of each block, row 1 the next 16.
//! The rows never interact until the end, so the block loop vectorizes to one
//! 128-bit register per row (see [`dispatch`]). The price is a different
//! digest than the sequential family for any input of 32 bytes or more.
//!
//! Below one block the dual variants never touch the lane matrix and reduce
//! to the sequential short path. [`Xxh32Dual`] therefore equals
//! [`Xxh32`](crate::fast::Xxh32) for inputs under 16 bytes, and [`Xxh64Dual`]
//! equals [`Xxh64`](crate::fast::Xxh64) for inputs under 32 bytes.
//!
//! The 64-bit variant carries two quirks from its wire format: the seed is
//! split into u32 halves (low half seeds row 0, high half row 1), and the
//! length mixed into the digest is truncated to u32.

#![allow(clippy::indexing_slicing)] // Tight block parsing + fixed-size arrays

mod dispatch;
mod kernels;

pub use dispatch::{kernel_name, KernelId};
use platform::ByteOrder;
use traits::{FastHash, StreamingHash};

use super::{
  load::{read_u32, INPUT_ORDER},
  xxh32,
  xxh32::{round, seed_lanes, PRIME32_5},
  xxh64,
  xxh64::PRIME64_5,
};

/// Two rows of four u32 lanes. Row-major: `lanes[row][lane]`.
pub(crate) type LaneMatrix = [[u32; 4]; 2];

/// Bytes consumed per bulk step (2 rows x 4 lanes x 4 bytes).
const BLOCK: usize = 32;

/// Fold the two rows together, then rotate-sum as in the sequential 32-bit
/// combine. Each row-0 lane absorbs its row-1 partner through a normal round.
#[inline(always)]
const fn combine32(v: LaneMatrix) -> u32 {
  xxh32::combine_lanes([
    round(v[0][0], v[1][0]),
    round(v[0][1], v[1][1]),
    round(v[0][2], v[1][2]),
    round(v[0][3], v[1][3]),
  ])
}

/// Pack each lane pair into a u64 (row 0 low, row 1 high), then run the
/// sequential 64-bit combine including its merge rounds.
#[inline(always)]
const fn combine64(v: LaneMatrix) -> u64 {
  xxh64::combine_lanes([
    v[0][0] as u64 | ((v[1][0] as u64) << 32),
    v[0][1] as u64 | ((v[1][1] as u64) << 32),
    v[0][2] as u64 | ((v[1][2] as u64) << 32),
    v[0][3] as u64 | ((v[1][3] as u64) << 32),
  ])
}

/// One-shot dual-lane 32-bit hash.
#[derive(Clone, Default)]
pub struct Xxh32Dual;

/// One-shot dual-lane 64-bit hash.
#[derive(Clone, Default)]
pub struct Xxh64Dual;

#[inline(always)]
fn xxh32_dual_with_seed(input: &[u8], seed: u32) -> u32 {
  let order = INPUT_ORDER;
  let mut h: u32;

  if input.len() >= BLOCK {
    let row = seed_lanes(seed);
    let mut v = [row, row];
    let consumed = dispatch::bulk(&mut v, input, order);
    debug_assert_eq!(consumed, input.len() & !(BLOCK - 1));
    h = combine32(v);
  } else {
    h = seed.wrapping_add(PRIME32_5);
  }

  h = h.wrapping_add(input.len() as u32);

  xxh32::finalize(h, &input[input.len() & !(BLOCK - 1)..], order)
}

#[inline(always)]
fn xxh64_dual_with_seed(input: &[u8], seed: u64) -> u64 {
  let order = INPUT_ORDER;
  let (lo, hi) = (seed as u32, (seed >> 32) as u32);
  let mut h: u64;

  if input.len() >= BLOCK {
    let mut v = [seed_lanes(lo), seed_lanes(hi)];
    let consumed = dispatch::bulk(&mut v, input, order);
    debug_assert_eq!(consumed, input.len() & !(BLOCK - 1));
    h = combine64(v);
  } else {
    h = seed.wrapping_add(PRIME64_5);
  }

  // Wire format: only the low 32 bits of the length are mixed in.
  h = h.wrapping_add(u64::from(input.len() as u32));

  xxh64::finalize(h, &input[input.len() & !(BLOCK - 1)..], order)
}

impl FastHash for Xxh32Dual {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;
  type Seed = u32;

  #[inline]
  fn hash_with_seed(seed: Self::Seed, data: &[u8]) -> Self::Output {
    xxh32_dual_with_seed(data, seed)
  }
}

impl FastHash for Xxh64Dual {
  const OUTPUT_SIZE: usize = 8;
  type Output = u64;
  type Seed = u64;

  #[inline]
  fn hash_with_seed(seed: Self::Seed, data: &[u8]) -> Self::Output {
    xxh64_dual_with_seed(data, seed)
  }
}

/// Streaming state shared by both dual hashers. Only the seeding and the
/// digest differ between the 32- and 64-bit variants.
#[derive(Clone)]
struct DualCore {
  total_len: u32,
  large_len: bool,
  v: LaneMatrix,
  buf: [u8; BLOCK],
  buf_len: usize,
}

impl DualCore {
  #[inline]
  fn with_matrix(v: LaneMatrix) -> Self {
    Self { total_len: 0, large_len: false, v, buf: [0u8; BLOCK], buf_len: 0 }
  }

  /// Absorb the staging buffer as one block. A single block is not worth a
  /// kernel call.
  #[inline(always)]
  fn absorb_buffer(&mut self, order: ByteOrder) {
    let buf = self.buf;
    self.v[0][0] = round(self.v[0][0], read_u32(&buf, 0, order));
    self.v[0][1] = round(self.v[0][1], read_u32(&buf, 4, order));
    self.v[0][2] = round(self.v[0][2], read_u32(&buf, 8, order));
    self.v[0][3] = round(self.v[0][3], read_u32(&buf, 12, order));

    self.v[1][0] = round(self.v[1][0], read_u32(&buf, 16, order));
    self.v[1][1] = round(self.v[1][1], read_u32(&buf, 20, order));
    self.v[1][2] = round(self.v[1][2], read_u32(&buf, 24, order));
    self.v[1][3] = round(self.v[1][3], read_u32(&buf, 28, order));
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

    let consumed = dispatch::bulk(&mut self.v, data, order);

    if consumed < data.len() {
      let tail = &data[consumed..];
      self.buf[..tail.len()].copy_from_slice(tail);
      self.buf_len = tail.len();
    }
  }

  #[inline]
  fn reset(&mut self, v: LaneMatrix) {
    *self = Self::with_matrix(v);
  }
}

/// Streaming dual-lane 32-bit hash.
#[derive(Clone)]
pub struct Xxh32DualHasher {
  core: DualCore,
}

impl StreamingHash for Xxh32DualHasher {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;
  type Seed = u32;

  #[inline]
  fn with_seed(seed: u32) -> Self {
    let row = seed_lanes(seed);
    Self { core: DualCore::with_matrix([row, row]) }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.core.update(data);
  }

  #[inline]
  fn digest(&self) -> u32 {
    let core = &self.core;
    let mut h = if core.large_len {
      combine32(core.v)
    } else {
      // Lane [0][2] still holds the raw seed on the short path.
      core.v[0][2].wrapping_add(PRIME32_5)
    };
    h = h.wrapping_add(core.total_len);
    xxh32::finalize(h, &core.buf[..core.buf_len], INPUT_ORDER)
  }

  #[inline]
  fn reset(&mut self, seed: u32) {
    let row = seed_lanes(seed);
    self.core.reset([row, row]);
  }
}

impl Default for Xxh32DualHasher {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

/// Streaming dual-lane 64-bit hash.
#[derive(Clone)]
pub struct Xxh64DualHasher {
  core: DualCore,
}

impl StreamingHash for Xxh64DualHasher {
  const OUTPUT_SIZE: usize = 8;
  type Output = u64;
  type Seed = u64;

  #[inline]
  fn with_seed(seed: u64) -> Self {
    Self { core: DualCore::with_matrix([seed_lanes(seed as u32), seed_lanes((seed >> 32) as u32)]) }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.core.update(data);
  }

  #[inline]
  fn digest(&self) -> u64 {
    let core = &self.core;
    let mut h = if core.large_len {
      combine64(core.v)
    } else {
      // Lanes [0][2] and [1][2] still hold the seed halves on the short path.
      (core.v[0][2] as u64 | ((core.v[1][2] as u64) << 32)).wrapping_add(PRIME64_5)
    };
    // The counter is u32 by wire format, matching the one-shot truncation.
    h = h.wrapping_add(u64::from(core.total_len));
    xxh64::finalize(h, &core.buf[..core.buf_len], INPUT_ORDER)
  }

  #[inline]
  fn reset(&mut self, seed: u64) {
    self.core.reset([seed_lanes(seed as u32), seed_lanes((seed >> 32) as u32)]);
  }
}

impl Default for Xxh64DualHasher {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
