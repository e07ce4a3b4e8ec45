//! Streaming (incremental) non-cryptographic hash trait.

use core::fmt::Debug;

/// A seeded hash computed incrementally over a byte stream.
///
/// The defining contract is *chunking independence*: feeding a byte sequence
/// through any partition of [`update`](Self::update) calls (including
/// zero-length calls) must yield the same digest as hashing the concatenation
/// in one shot with the same seed.
///
/// # Usage
///
/// ```rust,ignore
/// use hashes::fast::Xxh32Hasher;
/// use traits::StreamingHash;
///
/// let mut hasher = Xxh32Hasher::with_seed(0);
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// let digest = hasher.digest();
/// ```
///
/// # Implementor Requirements
///
/// - `new()` must return the same state as `Default::default()`
/// - `digest()` must be idempotent and must not mutate observable state;
///   further `update` calls after a `digest` continue the same stream
/// - `reset(seed)` must restore the hasher to the state of `with_seed(seed)`
pub trait StreamingHash: Clone + Default {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// Hash output type.
  type Output: Copy + Eq + Debug + Default;

  /// Seed type (typically `u32` or `u64`).
  type Seed: Copy + Debug + Default;

  /// Create a hasher seeded with `seed`.
  #[must_use]
  fn with_seed(seed: Self::Seed) -> Self;

  /// Create a hasher with the default seed.
  #[inline]
  #[must_use]
  fn new() -> Self {
    Self::with_seed(Self::Seed::default())
  }

  /// Append `data` to the stream.
  ///
  /// This method can be called any number of times; zero-length calls are
  /// valid and leave the stream unchanged.
  fn update(&mut self, data: &[u8]);

  /// Return the digest of all bytes fed since the last reset.
  ///
  /// Does not consume or mutate the hasher; it may be called repeatedly and
  /// interleaved with further [`update`](Self::update) calls.
  #[must_use]
  fn digest(&self) -> Self::Output;

  /// Restore the hasher to the state of `with_seed(seed)`.
  fn reset(&mut self, seed: Self::Seed);

  /// Hash `data` in one call through the streaming path.
  ///
  /// Mostly useful in tests; prefer
  /// [`FastHash::hash_with_seed`](crate::FastHash::hash_with_seed) for data
  /// already in memory.
  #[inline]
  #[must_use]
  fn hash_streaming(seed: Self::Seed, data: &[u8]) -> Self::Output {
    let mut hasher = Self::with_seed(seed);
    hasher.update(data);
    hasher.digest()
  }
}
