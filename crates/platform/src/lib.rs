//! CPU detection, capabilities, and byte-order model for xxhs.
//!
//! This crate is the single source of truth for CPU feature detection across
//! the workspace.
//!
//! # Core Types
//!
//! - [`Caps`]: What instructions can run on this machine (capabilities)
//! - [`ByteOrder`]: Byte order of multi-byte word reads, threaded explicitly
//!   through load helpers so they stay pure and testable on any host
//!
//! # Main Entry Point
//!
//! ```ignore
//! use platform::caps;
//!
//! if caps().has(platform::caps::x86::SSE41) {
//!     // Use the SSE4.1 kernel
//! }
//! ```
//!
//! # Design Philosophy
//!
//! 1. **One API**: Algorithms query [`caps()`] instead of doing ad-hoc detection.
//! 2. **Zero-cost when possible**: Compile-time features are detected via `cfg!`.
//! 3. **Cached otherwise**: Runtime detection is cached in a `OnceLock` under `std`.
//! 4. **Miri-safe**: Under Miri, always returns portable-only caps.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod byte_order;
pub mod caps;
mod detect;

pub use byte_order::ByteOrder;
pub use caps::Caps;
pub use detect::{caps, caps_static};
