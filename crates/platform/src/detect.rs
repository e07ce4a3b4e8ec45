//! Compile-time and runtime CPU feature detection.
//!
//! [`caps_static`] reports features guaranteed by the target (via
//! `-C target-feature=...` or `-C target-cpu=...`) and is `const`.
//! [`caps`] additionally performs runtime detection under `std`, caching the
//! result in a `OnceLock`. Without `std` there is nothing to probe safely, so
//! [`caps`] degrades to the compile-time answer.

use crate::caps::{aarch64, x86, Caps};

/// Capabilities known at compile time from target features.
///
/// Evaluates at compile time; the compiler eliminates all runtime checks.
/// For generic binaries that run on multiple CPUs, use [`caps()`] instead.
#[must_use]
pub const fn caps_static() -> Caps {
  let mut c = Caps::NONE;
  if cfg!(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse2")) {
    c = c.union(x86::SSE2);
  }
  if cfg!(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "sse4.1")) {
    c = c.union(x86::SSE41);
  }
  if cfg!(all(target_arch = "aarch64", target_feature = "neon")) {
    c = c.union(aarch64::NEON);
  }
  c
}

#[cfg(all(feature = "std", not(miri)))]
fn caps_runtime() -> Caps {
  #[allow(unused_mut)]
  let mut c = caps_static();
  #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
  {
    if std::arch::is_x86_feature_detected!("sse2") {
      c = c.union(x86::SSE2);
    }
    if std::arch::is_x86_feature_detected!("sse4.1") {
      c = c.union(x86::SSE41);
    }
  }
  #[cfg(target_arch = "aarch64")]
  {
    if std::arch::is_aarch64_feature_detected!("neon") {
      c = c.union(aarch64::NEON);
    }
  }
  c
}

/// Get detected CPU capabilities.
///
/// This is the main entry point for capability-based dispatch.
///
/// # Caching
///
/// - With `std`: Results are cached in a `OnceLock` (one-time detection).
/// - Without `std`: Returns the compile-time feature set.
/// - Under Miri: Returns [`Caps::NONE`] so only portable kernels run.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  #[cfg(miri)]
  {
    Caps::NONE
  }
  #[cfg(all(feature = "std", not(miri)))]
  {
    static CACHE: std::sync::OnceLock<Caps> = std::sync::OnceLock::new();
    *CACHE.get_or_init(caps_runtime)
  }
  #[cfg(all(not(feature = "std"), not(miri)))]
  {
    caps_static()
  }
}
