//! The literal end-to-end scenarios.

use crate::{compress, decompress, deserialise, serialise, Metadata, NdInt};

fn row(vs: &[i64]) -> NdInt {
  NdInt::Seq(vs.iter().map(|&v| NdInt::Leaf(v)).collect())
}

#[test]
fn e1_all_zero_writes_only_vn_dp_sd() {
  let data = NdInt::Seq(vec![row(&[0, 0, 0]), row(&[0, 0, 0])]);
  let compressed = compress(&data).unwrap();
  assert_eq!(compressed.shape, vec![2, 3]);
  assert_eq!(compressed.default_value, 0);
  assert!(compressed.entries.is_empty());

  let bytes = serialise(&compressed, None);
  for missing in ["MP", "MN", "VD", "DR", "DB", "RO", "AS", "DO", "CD"] {
    assert!(
      !bytes.windows(2).any(|w| w == missing.as_bytes()),
      "unexpected record {} in an entry-less payload",
      missing,
    );
  }
  for present in ["VN", "DP", "SD"] {
    assert!(
      bytes.windows(2).any(|w| w == present.as_bytes()),
      "missing record {} in an entry-less payload",
      present,
    );
  }
}

#[test]
fn e2_all_distinct_1d() {
  let data = row(&[1, 2, 3, 4]);
  let compressed = compress(&data).unwrap();
  assert_eq!(compressed.shape, vec![4]);
  assert_eq!(compressed.default_value, 1);
  assert_eq!(compressed.entries.len(), 3);
  assert_eq!(
    compressed
      .entries
      .iter()
      .map(|e| (e.value, e.path.clone(), e.lengths.clone()))
      .collect::<Vec<_>>(),
    vec![
      (2, vec![1], vec![1]),
      (3, vec![2], vec![1]),
      (4, vec![3], vec![1]),
    ],
  );
  assert_eq!(decompress(&compressed), data);
}

#[test]
fn e3_2x3_block_plus_column() {
  let data = NdInt::Seq(vec![row(&[2, 2, 5]), row(&[2, 2, 5])]);
  let compressed = compress(&data).unwrap();
  assert_eq!(compressed.default_value, 2);
  assert_eq!(compressed.entries.len(), 1);
  assert_eq!(compressed.entries[0].value, 5);
  assert_eq!(compressed.entries[0].path, vec![0, 2]);
  assert_eq!(compressed.entries[0].lengths, vec![2, 1]);
}

#[test]
fn e4_3d_with_user_metadata_round_trips() {
  let shape = [3usize, 4, 5];
  let mut planes = Vec::new();
  let mut n = 0_i64;
  for _ in 0..shape[0] {
    let mut rows = Vec::new();
    for _ in 0..shape[1] {
      let mut r = Vec::new();
      for _ in 0..shape[2] {
        r.push(NdInt::Leaf(2 * ((n / 5) % 4)));
        n += 1;
      }
      rows.push(NdInt::Seq(r));
    }
    planes.push(NdInt::Seq(rows));
  }
  let data = NdInt::Seq(planes);

  let mut user_metadata = Metadata::new();
  user_metadata.insert("foo".to_string(), "bar".to_string());
  user_metadata.insert("hello".to_string(), "world".to_string());

  let compressed = compress(&data).unwrap();
  let bytes = serialise(&compressed, Some(&user_metadata));
  let (decoded, meta) = deserialise(&bytes).unwrap();

  assert_eq!(decompress(&decoded), data);
  assert_eq!(meta, Some(user_metadata));
}

#[test]
fn e5_negative_default_and_positive_minimum() {
  let data = NdInt::Seq(vec![row(&[-3, -3]), row(&[7, 7])]);
  let compressed = compress(&data).unwrap();
  assert_eq!(compressed.default_value, -3);
  assert_eq!(compressed.entries.len(), 1);
  assert_eq!(compressed.entries[0].value, 7);
  assert_eq!(compressed.entries[0].path, vec![1, 0]);
  assert_eq!(compressed.entries[0].lengths, vec![1, 2]);

  let bytes = serialise(&compressed, None);
  assert!(bytes.windows(2).any(|w| w == b"DN"));
  assert!(!bytes.windows(2).any(|w| w == b"DP"));
  assert!(bytes.windows(2).any(|w| w == b"MP"));
  assert!(!bytes.windows(2).any(|w| w == b"MN"));
}

#[test]
fn e6_metadata_with_reserved_bytes_round_trips_byte_identical() {
  let data = row(&[1, 2, 3]);
  let compressed = compress(&data).unwrap();

  let mut user_metadata = Metadata::new();
  user_metadata.insert("k\u{0}y".to_string(), "v\u{1}u".to_string());

  let bytes = serialise(&compressed, Some(&user_metadata));
  let (_, meta) = deserialise(&bytes).unwrap();
  assert_eq!(meta, Some(user_metadata));
}
