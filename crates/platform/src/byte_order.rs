//! Byte-order model for multi-byte word reads.
//!
//! Host byte order is modeled as a value threaded explicitly through every
//! read operation instead of ambient global state. This keeps load helpers
//! pure: `read_u32(bytes, offset, ByteOrder::Big)` means the same thing on
//! every host and can be tested anywhere.

/// Byte order used to interpret multi-byte words in a byte stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrder {
  /// Least-significant byte first.
  Little,
  /// Most-significant byte first.
  Big,
}

impl ByteOrder {
  /// The byte order of the current target.
  pub const NATIVE: Self = if cfg!(target_endian = "big") { Self::Big } else { Self::Little };
}
