//! Escape transparency, version guarding, and malformed-payload
//! rejection at the framing layer.

use crate::bits::escape;
use crate::errors::ErrorKind;
use crate::{compress, deserialise, serialise, Metadata, NdInt};

fn row(vs: &[i64]) -> NdInt {
  NdInt::Seq(vs.iter().map(|&v| NdInt::Leaf(v)).collect())
}

#[test]
fn escape_handles_every_byte_value() {
  let all_bytes: Vec<u8> = (0..=255).collect();
  let escaped = escape(&all_bytes);
  // Neither reserved byte should appear unescaped: every 0 or 1 in the
  // escaped stream must be immediately preceded by an escape byte.
  let mut i = 0;
  while i < escaped.len() {
    if escaped[i] <= 1 {
      assert_eq!(escaped[i], 1, "byte 0 must never appear unescaped");
      i += 1;
      assert!(i < escaped.len());
      i += 1;
    } else {
      i += 1;
    }
  }
}

#[test]
fn metadata_key_and_value_with_nul_and_escape_bytes_round_trip() {
  let data = row(&[4, 4, 4]);
  let compressed = compress(&data).unwrap();

  let mut meta = Metadata::new();
  meta.insert("a\u{0}b\u{1}c".to_string(), "\u{1}\u{1}\u{0}\u{0}x".to_string());
  let bytes = serialise(&compressed, Some(&meta));
  let (_, decoded_meta) = deserialise(&bytes).unwrap();
  assert_eq!(decoded_meta, Some(meta));
}

#[test]
fn empty_metadata_value_decodes_to_a_single_nul_byte() {
  // Per the reference decoder's `curr_item or chr(0)` quirk: a value field
  // that unescapes to zero bytes comes back as one `\x00` byte rather than
  // the empty string that was originally written.
  let data = row(&[4, 4, 4]);
  let compressed = compress(&data).unwrap();

  let mut meta = Metadata::new();
  meta.insert("empty".to_string(), String::new());
  let bytes = serialise(&compressed, Some(&meta));
  let (_, decoded_meta) = deserialise(&bytes).unwrap();

  let mut expected = Metadata::new();
  expected.insert("empty".to_string(), "\u{0}".to_string());
  assert_eq!(decoded_meta, Some(expected));
}

#[test]
fn tampering_with_version_byte_is_rejected() {
  let data = row(&[1, 2, 3]);
  let compressed = compress(&data).unwrap();
  let mut bytes = serialise(&compressed, None);

  let vn_value_pos = bytes.iter().position(|&b| b == b'N').unwrap() + 2;
  let original = bytes[vn_value_pos];
  bytes[vn_value_pos] = original.wrapping_add(2);

  let err = deserialise(&bytes).unwrap_err();
  assert!(matches!(err.kind, ErrorKind::VersionMisMatch { .. }));
}

#[test]
fn truncated_payload_is_corruption_not_a_panic() {
  let data = NdInt::Seq(vec![row(&[2, 2, 5]), row(&[2, 2, 5])]);
  let compressed = compress(&data).unwrap();
  let bytes = serialise(&compressed, None);

  for cut in [1, bytes.len() / 2, bytes.len() - 1] {
    let truncated = &bytes[..cut];
    // Must fail cleanly, never panic.
    let _ = deserialise(truncated);
  }
}

#[test]
fn partial_entry_key_set_is_rejected() {
  let data = NdInt::Seq(vec![row(&[0, 0, 0]), row(&[0, 0, 0])]);
  let compressed = compress(&data).unwrap();
  let mut bytes = serialise(&compressed, None);

  // Graft a lone MP record onto an otherwise entry-less payload: now
  // exactly one of the nine entry-block keys is present, not zero or all.
  bytes.extend(b"MP");
  bytes.push(0);
  bytes.push(0);

  let err = deserialise(&bytes).unwrap_err();
  assert!(matches!(err.kind, ErrorKind::Corruption));
}

#[test]
fn missing_shape_record_is_corruption() {
  let data = row(&[1, 2]);
  let compressed = compress(&data).unwrap();
  let bytes = serialise(&compressed, None);

  // Truncate right after the VN record's two separators, so SD (and
  // everything else) never arrives.
  let vn_key_start = bytes.windows(2).position(|w| w == b"VN").unwrap();
  let first_sep = vn_key_start + 2;
  let second_sep = first_sep + 1 + bytes[first_sep + 1..].iter().position(|&b| b == 0).unwrap();
  let truncated = &bytes[..=second_sep];

  assert!(deserialise(truncated).is_err());
}
