//! Core hashing traits for the xxhs workspace.
//!
//! This crate provides the foundational traits that all xxhs implementations
//! conform to. It is `no_std` compatible and has zero dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`FastHash`] | One-shot seeded non-cryptographic hashes | XXH32, XXH64 |
//! | [`StreamingHash`] | Incremental seeded non-cryptographic hashes | streaming XXH32/XXH64 |
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod fast_hash;
mod streaming;

pub use fast_hash::FastHash;
pub use streaming::StreamingHash;
