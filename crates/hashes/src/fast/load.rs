//! Unaligned word loads with an explicit byte-order parameter.
//!
//! The order is a parameter rather than ambient state so the helpers stay
//! pure: `from_le`/`from_be` on a native unaligned load is equivalent to
//! `from_le_bytes`/`from_be_bytes` on every host, which makes both orders
//! testable without a big-endian machine.

use platform::ByteOrder;

/// Byte order applied to input words by every hash in this crate.
///
/// Little-endian is the published format; the `native-order` feature switches
/// to the host order, reproducing the upstream force-native mode.
pub(crate) const INPUT_ORDER: ByteOrder =
  if cfg!(feature = "native-order") { ByteOrder::NATIVE } else { ByteOrder::Little };

#[inline(always)]
pub(crate) fn read_u32(input: &[u8], offset: usize, order: ByteOrder) -> u32 {
  debug_assert!(offset + 4 <= input.len());
  // SAFETY: caller ensures `offset + 4 <= input.len()`, and `read_unaligned`
  // supports unaligned loads.
  let raw = unsafe { core::ptr::read_unaligned(input.as_ptr().add(offset) as *const u32) };
  match order {
    ByteOrder::Little => u32::from_le(raw),
    ByteOrder::Big => u32::from_be(raw),
  }
}

#[inline(always)]
pub(crate) fn read_u64(input: &[u8], offset: usize, order: ByteOrder) -> u64 {
  debug_assert!(offset + 8 <= input.len());
  // SAFETY: caller ensures `offset + 8 <= input.len()`, and `read_unaligned`
  // supports unaligned loads.
  let raw = unsafe { core::ptr::read_unaligned(input.as_ptr().add(offset) as *const u64) };
  match order {
    ByteOrder::Little => u64::from_le(raw),
    ByteOrder::Big => u64::from_be(raw),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn little_is_from_le_bytes() {
    let bytes = [0x01u8, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFF];
    assert_eq!(read_u32(&bytes, 0, ByteOrder::Little), 0x6745_2301);
    assert_eq!(read_u32(&bytes, 1, ByteOrder::Little), 0x8967_4523);
    assert_eq!(read_u64(&bytes, 0, ByteOrder::Little), 0xEFCD_AB89_6745_2301);
  }

  #[test]
  fn big_is_from_be_bytes() {
    let bytes = [0x01u8, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFF];
    assert_eq!(read_u32(&bytes, 0, ByteOrder::Big), 0x0123_4567);
    assert_eq!(read_u32(&bytes, 1, ByteOrder::Big), 0x2345_6789);
    assert_eq!(read_u64(&bytes, 1, ByteOrder::Big), 0x2345_6789_ABCD_EFFF);
  }

  #[test]
  fn orders_agree_on_palindromic_words() {
    let bytes = [0xAAu8, 0xAA, 0xAA, 0xAA];
    assert_eq!(read_u32(&bytes, 0, ByteOrder::Little), read_u32(&bytes, 0, ByteOrder::Big));
  }
}
