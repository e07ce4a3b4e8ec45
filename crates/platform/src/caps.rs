//! CPU capability representation.
//!
//! [`Caps`] is a 64-bit bitset representing available CPU features. Each bit
//! corresponds to a specific ISA extension. The bits are architecture-specific
//! but the API is uniform across all targets.
//!
//! # Bit Layout
//!
//! - Bits 0-31: x86/x86_64 features
//! - Bits 32-63: aarch64 features

/// CPU capabilities: a 64-bit feature bitset.
///
/// This is the core type for capability-based dispatch. Use [`has()`](Caps::has)
/// to check if required features are available.
///
/// # Thread Safety
///
/// `Caps` is `Copy`, `Send`, and `Sync`. It can be freely shared across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self(0);

  /// Check if all features in `required` are present.
  ///
  /// This is the core dispatch check, marked `#[inline(always)]` for zero overhead.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }
}

/// x86/x86_64 feature bits.
pub mod x86 {
  use super::Caps;

  /// SSE2 (baseline on x86_64).
  pub const SSE2: Caps = Caps(1 << 0);
  /// SSE4.1 (packed 32-bit multiply, needed by the dual-lane kernel).
  pub const SSE41: Caps = Caps(1 << 1);
}

/// aarch64 feature bits.
pub mod aarch64 {
  use super::Caps;

  /// Advanced SIMD (baseline on aarch64).
  pub const NEON: Caps = Caps(1 << 32);
}
