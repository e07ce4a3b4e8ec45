//! xxHash family: fast non-cryptographic hashes.
//!
//! This crate is `no_std` compatible and has zero library dependencies outside
//! the xxhs workspace. Dev-only dependencies are used for oracle testing and
//! benchmarking.
//!
//! # Modules
//!
//! - [`fast`] - Non-cryptographic hashes (**NOT CRYPTO**).
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod fast;

pub use traits::{FastHash, StreamingHash};

const VERSION_MAJOR: u32 = 0;
const VERSION_MINOR: u32 = 1;
const VERSION_RELEASE: u32 = 0;

/// Library version as a single number: `major*10000 + minor*100 + release`.
#[inline]
#[must_use]
pub const fn version_number() -> u32 {
  VERSION_MAJOR * 100 * 100 + VERSION_MINOR * 100 + VERSION_RELEASE
}
