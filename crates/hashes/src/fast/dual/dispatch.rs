//! Kernel selection for the dual-lane block loop.
//!
//! Selection runs once per process: the preferred kernel list for the compile
//! target is filtered against `platform::caps()` and the winning function
//! pointer is cached in a [`OnceCache`]. After that, dispatch is a single
//! cached load plus an indirect call per bulk run.

use backend::OnceCache;
use platform::{ByteOrder, Caps};

use super::{kernels, LaneMatrix};

type BulkFn = fn(&mut LaneMatrix, &[u8], ByteOrder) -> usize;

/// Identifier for a dual-lane bulk kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelId {
  /// Scalar loop, available everywhere.
  Portable,
  /// 128-bit SSE4.1 kernel, one lane row per register.
  #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
  Sse41,
  /// 128-bit NEON kernel, one lane row per register.
  #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
  Neon,
}

impl KernelId {
  /// CPU features this kernel needs at runtime.
  #[must_use]
  pub const fn required_caps(self) -> Caps {
    match self {
      Self::Portable => Caps::NONE,
      #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
      Self::Sse41 => platform::caps::x86::SSE41,
      #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
      Self::Neon => platform::caps::aarch64::NEON,
    }
  }

  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
      Self::Sse41 => "sse4.1",
      #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
      Self::Neon => "neon",
    }
  }
}

/// Candidate kernels for this target, best first. Ends with `Portable`, which
/// needs no caps, so resolution always succeeds.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const PREFERRED: &[KernelId] = &[KernelId::Sse41, KernelId::Portable];
#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
const PREFERRED: &[KernelId] = &[KernelId::Neon, KernelId::Portable];
#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little"))))]
const PREFERRED: &[KernelId] = &[KernelId::Portable];

fn bulk_fn(id: KernelId) -> BulkFn {
  match id {
    KernelId::Portable => kernels::portable,
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    KernelId::Sse41 => kernels::sse41,
    #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
    KernelId::Neon => kernels::neon,
  }
}

#[derive(Clone, Copy)]
struct Active {
  id: KernelId,
  bulk: BulkFn,
}

static ACTIVE: OnceCache<Active> = OnceCache::new();

fn active() -> Active {
  ACTIVE.get_or_init(|| {
    let caps = platform::caps();
    let mut id = KernelId::Portable;
    for &candidate in PREFERRED {
      if caps.has(candidate.required_caps()) {
        id = candidate;
        break;
      }
    }
    Active { id, bulk: bulk_fn(id) }
  })
}

/// Run the best available kernel over all whole 32-byte blocks in `data`.
///
/// Returns the number of bytes consumed. The vector kernels only implement
/// little-endian word reads, so big-endian reads route to the scalar kernel
/// unconditionally.
#[inline]
pub(super) fn bulk(lanes: &mut LaneMatrix, data: &[u8], order: ByteOrder) -> usize {
  if !matches!(order, ByteOrder::Little) {
    return kernels::portable(lanes, data, order);
  }
  (active().bulk)(lanes, data, order)
}

/// Name of the kernel dispatch resolved to, for logs and bench labels.
#[must_use]
pub fn kernel_name() -> &'static str {
  active().id.as_str()
}
