/// The current format version, written to the `VN` record. Bumped whenever
/// the wire format changes in an incompatible way.
pub const VERSION: u64 = 1;

/// Byte 0 is the record separator; byte 1 is its escape prefix.
pub const SEPARATOR_BYTE: u8 = 0;
pub const ESCAPE_BYTE: u8 = 1;

/// The reserved keys the format itself writes. A user metadata key
/// colliding with one of these is silently dropped on write.
pub const RESERVED_KEYS: [&str; 13] = [
  "SD", "VN", "MP", "MN", "DP", "DN", "VD", "DB", "DR", "RO", "AS", "DO", "CD",
];

/// The reserved keys that, taken together, signal an entry block is
/// present. Exactly 8 of these 9 must appear (`MP` xor `MN`).
pub const KEYS_FOR_ENTRIES: [&str; 9] = [
  "MP", "MN", "VD", "DB", "DR", "RO", "AS", "DO", "CD",
];
pub const MIN_ENTRY_KEYS_PRESENT: usize = 8;

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn test_reserved_keys_cover_entry_keys() {
    let reserved: HashSet<_> = RESERVED_KEYS.iter().collect();
    for key in KEYS_FOR_ENTRIES {
      assert!(reserved.contains(&key));
    }
  }

  #[test]
  fn test_min_entry_keys_bound() {
    assert_eq!(MIN_ENTRY_KEYS_PRESENT, KEYS_FOR_ENTRIES.len() - 1);
  }
}
