//! Differential fuzzing against the reference xxHash implementations.
//!
//! Compares the sequential variants against xxhash-rust to catch any
//! discrepancies, and checks the dual variants against the properties that
//! define them (sequential agreement below one block).

#![no_main]

use hashes::fast::{Xxh32, Xxh32Dual, Xxh64, Xxh64Dual};
use libfuzzer_sys::fuzz_target;
use traits::FastHash;

fuzz_target!(|data: &[u8]| {
  test_xxh32_differential(data);
  test_xxh64_differential(data);
  test_dual_short_input_agreement(data);
});

fn test_xxh32_differential(data: &[u8]) {
  for seed in [0u32, 1, u32::MAX, 0x9E3779B1] {
    let ours = Xxh32::hash_with_seed(seed, data);
    let reference = xxhash_rust::xxh32::xxh32(data, seed);
    assert_eq!(
      ours,
      reference,
      "XXH32 differential mismatch: ours={ours:#010x}, reference={reference:#010x}, seed={seed}, len={}",
      data.len()
    );
  }
}

fn test_xxh64_differential(data: &[u8]) {
  for seed in [0u64, 1, u64::MAX, 0x9E3779B185EBCA87] {
    let ours = Xxh64::hash_with_seed(seed, data);
    let reference = xxhash_rust::xxh64::xxh64(data, seed);
    assert_eq!(
      ours,
      reference,
      "XXH64 differential mismatch: ours={ours:#018x}, reference={reference:#018x}, seed={seed}, len={}",
      data.len()
    );
  }
}

fn test_dual_short_input_agreement(data: &[u8]) {
  if data.len() < 16 {
    assert_eq!(Xxh32Dual::hash_with_seed(42, data), Xxh32::hash_with_seed(42, data), "dual32 short-input mismatch");
  }
  if data.len() < 32 {
    assert_eq!(Xxh64Dual::hash_with_seed(42, data), Xxh64::hash_with_seed(42, data), "dual64 short-input mismatch");
  }
}
