//! Fast non-cryptographic hashes (**NOT CRYPTO**).
//!
//! This module intentionally requires explicit opt-in. Do not use these hashes
//! for signatures, MACs, key derivation, or anything requiring cryptographic
//! security.
//!
//! Two algorithm families are provided, each in 32- and 64-bit widths:
//!
//! - [`Xxh32`] / [`Xxh64`] - the sequential family. One chain of dependent
//!   multiplies per lane; the reference algorithms with published test vectors.
//! - [`Xxh32Dual`] / [`Xxh64Dual`] - the dual-lane family. Two independent
//!   lane-sets per block expose enough parallel arithmetic to vectorize, at
//!   the cost of producing *different* digests than the sequential family for
//!   the same input and seed.

pub mod dual;
mod load;
pub mod xxh32;
pub mod xxh64;

pub use dual::{Xxh32Dual, Xxh32DualHasher, Xxh64Dual, Xxh64DualHasher};
pub use xxh32::{Xxh32, Xxh32Hasher};
pub use xxh64::{Xxh64, Xxh64Hasher};
