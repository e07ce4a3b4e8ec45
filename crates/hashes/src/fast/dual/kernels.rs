//! Bulk kernels for the dual-lane block loop.
//!
//! Every kernel consumes as many whole 32-byte blocks as the input holds and
//! returns the number of bytes consumed. The two lane rows are independent
//! within a block (row 0 takes the first 16 bytes, row 1 the next 16), which
//! is what lets the vector kernels run one row per 128-bit register.
//!
//! The vector kernels interpret input words as little-endian; the dispatcher
//! never selects them for big-endian reads.

use platform::ByteOrder;

use super::LaneMatrix;
use crate::fast::{
  load::read_u32,
  xxh32::{round, PRIME32_1, PRIME32_2},
};

pub(super) const BLOCK: usize = 32;

/// Scalar reference kernel. Works for either byte order and is the fallback
/// on every target.
pub(super) fn portable(lanes: &mut LaneMatrix, data: &[u8], order: ByteOrder) -> usize {
  let blocks = data.len() / BLOCK;
  let mut v = *lanes;
  let mut offset = 0usize;
  for _ in 0..blocks {
    v[0][0] = round(v[0][0], read_u32(data, offset, order));
    v[0][1] = round(v[0][1], read_u32(data, offset + 4, order));
    v[0][2] = round(v[0][2], read_u32(data, offset + 8, order));
    v[0][3] = round(v[0][3], read_u32(data, offset + 12, order));

    v[1][0] = round(v[1][0], read_u32(data, offset + 16, order));
    v[1][1] = round(v[1][1], read_u32(data, offset + 20, order));
    v[1][2] = round(v[1][2], read_u32(data, offset + 24, order));
    v[1][3] = round(v[1][3], read_u32(data, offset + 28, order));

    offset += BLOCK;
  }
  *lanes = v;
  offset
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[allow(unsafe_code)]
pub(super) fn sse41(lanes: &mut LaneMatrix, data: &[u8], order: ByteOrder) -> usize {
  debug_assert!(matches!(order, ByteOrder::Little));
  // SAFETY: the dispatcher only selects this kernel after `platform::caps()`
  // reports SSE4.1.
  unsafe { sse41_impl(lanes, data) }
}

// `_mm_mullo_epi32` is the reason this kernel needs SSE4.1 rather than SSE2.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[target_feature(enable = "sse4.1")]
#[allow(unsafe_code)]
unsafe fn sse41_impl(lanes: &mut LaneMatrix, data: &[u8]) -> usize {
  #[cfg(target_arch = "x86")]
  use core::arch::x86::*;
  #[cfg(target_arch = "x86_64")]
  use core::arch::x86_64::*;

  #[inline(always)]
  unsafe fn rotl13(v: __m128i) -> __m128i {
    _mm_or_si128(_mm_slli_epi32(v, 13), _mm_srli_epi32(v, 19))
  }

  let blocks = data.len() / BLOCK;
  let prime1 = _mm_set1_epi32(PRIME32_1 as i32);
  let prime2 = _mm_set1_epi32(PRIME32_2 as i32);

  let mut v0 = _mm_loadu_si128(lanes[0].as_ptr().cast());
  let mut v1 = _mm_loadu_si128(lanes[1].as_ptr().cast());

  let mut p = data.as_ptr();
  for _ in 0..blocks {
    let in0 = _mm_loadu_si128(p.cast());
    let in1 = _mm_loadu_si128(p.add(16).cast());

    v0 = _mm_add_epi32(v0, _mm_mullo_epi32(in0, prime2));
    v0 = rotl13(v0);
    v0 = _mm_mullo_epi32(v0, prime1);

    v1 = _mm_add_epi32(v1, _mm_mullo_epi32(in1, prime2));
    v1 = rotl13(v1);
    v1 = _mm_mullo_epi32(v1, prime1);

    p = p.add(BLOCK);
  }

  _mm_storeu_si128(lanes[0].as_mut_ptr().cast(), v0);
  _mm_storeu_si128(lanes[1].as_mut_ptr().cast(), v1);

  blocks * BLOCK
}

#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
#[allow(unsafe_code)]
pub(super) fn neon(lanes: &mut LaneMatrix, data: &[u8], order: ByteOrder) -> usize {
  debug_assert!(matches!(order, ByteOrder::Little));
  // SAFETY: the dispatcher only selects this kernel after `platform::caps()`
  // reports NEON.
  unsafe { neon_impl(lanes, data) }
}

#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
#[target_feature(enable = "neon")]
#[allow(unsafe_code)]
unsafe fn neon_impl(lanes: &mut LaneMatrix, data: &[u8]) -> usize {
  use core::arch::aarch64::*;

  // rotl13 as shift-right + shift-left-insert, one instruction cheaper than
  // the or-of-shifts form.
  #[inline(always)]
  unsafe fn rotl13(v: uint32x4_t) -> uint32x4_t {
    vsliq_n_u32::<13>(vshrq_n_u32::<19>(v), v)
  }

  let blocks = data.len() / BLOCK;
  let prime1 = vdupq_n_u32(PRIME32_1);
  let prime2 = vdupq_n_u32(PRIME32_2);

  let mut v0 = vld1q_u32(lanes[0].as_ptr());
  let mut v1 = vld1q_u32(lanes[1].as_ptr());

  let mut p = data.as_ptr();
  for _ in 0..blocks {
    let in0 = vreinterpretq_u32_u8(vld1q_u8(p));
    let in1 = vreinterpretq_u32_u8(vld1q_u8(p.add(16)));

    v0 = vmlaq_u32(v0, in0, prime2);
    v0 = rotl13(v0);
    v0 = vmulq_u32(v0, prime1);

    v1 = vmlaq_u32(v1, in1, prime2);
    v1 = rotl13(v1);
    v1 = vmulq_u32(v1, prime1);

    p = p.add(BLOCK);
  }

  vst1q_u32(lanes[0].as_mut_ptr(), v0);
  vst1q_u32(lanes[1].as_mut_ptr(), v1);

  blocks * BLOCK
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use platform::ByteOrder;

  use super::{portable, BLOCK};
  use crate::fast::xxh32::seed_lanes;

  fn deterministic_bytes(len: usize) -> alloc::vec::Vec<u8> {
    let mut out = alloc::vec![0u8; len];
    let mut x = 0x9E37_79B9_7F4A_7C15u64;
    for b in &mut out {
      x ^= x << 13;
      x ^= x >> 7;
      x ^= x << 17;
      *b = x as u8;
    }
    out
  }

  #[test]
  fn portable_consumes_whole_blocks_only() {
    let data = deterministic_bytes(BLOCK * 3 + 17);
    let mut lanes = [seed_lanes(1), seed_lanes(2)];
    assert_eq!(portable(&mut lanes, &data, ByteOrder::Little), BLOCK * 3);

    let mut untouched = [seed_lanes(1), seed_lanes(2)];
    assert_eq!(portable(&mut untouched, &data[..BLOCK - 1], ByteOrder::Little), 0);
    assert_eq!(untouched, [seed_lanes(1), seed_lanes(2)]);
  }

  #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
  #[test]
  fn sse41_matches_portable() {
    if !platform::caps().has(platform::caps::x86::SSE41) {
      return;
    }
    for len in [BLOCK, BLOCK * 4, BLOCK * 7 + 31] {
      let data = deterministic_bytes(len);
      let mut a = [seed_lanes(3), seed_lanes(4)];
      let mut b = a;
      let consumed_a = portable(&mut a, &data, ByteOrder::Little);
      let consumed_b = super::sse41(&mut b, &data, ByteOrder::Little);
      assert_eq!(consumed_a, consumed_b);
      assert_eq!(a, b, "sse4.1 kernel diverged (len={len})");
    }
  }

  #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
  #[test]
  fn neon_matches_portable() {
    if !platform::caps().has(platform::caps::aarch64::NEON) {
      return;
    }
    for len in [BLOCK, BLOCK * 4, BLOCK * 7 + 31] {
      let data = deterministic_bytes(len);
      let mut a = [seed_lanes(3), seed_lanes(4)];
      let mut b = a;
      let consumed_a = portable(&mut a, &data, ByteOrder::Little);
      let consumed_b = super::neon(&mut b, &data, ByteOrder::Little);
      assert_eq!(consumed_a, consumed_b);
      assert_eq!(a, b, "neon kernel diverged (len={len})");
    }
  }
}
