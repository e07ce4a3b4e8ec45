//! Backend crate: dispatch primitives for xxhs.
//!
//! The dispatch system has two paths:
//!
//! 1. **Compile-time selection** (zero-cost): When target features are known at compile time (`-C
//!    target-feature=...`), a dispatcher can resolve to a direct function call with no overhead.
//!
//! 2. **Runtime selection** (cached): For generic binaries, the dispatcher detects CPU features
//!    once and caches the selected kernel in a [`OnceCache`]. Subsequent calls are a single
//!    indirect call.
//!
//! Algorithm crates build a small `ActiveDispatch` table of function pointers,
//! initialize it once against `platform::caps()`, and store it here.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod cache;

pub use cache::OnceCache;
