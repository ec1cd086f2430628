use std::collections::HashMap;

use crate::decompose::decompose;
use crate::entry::{CompressedList, DataEntry};
use crate::errors::CuboidCompressResult;
use crate::nd::NdInt;
use crate::shape;

/// Picks the value that appears in the most entries, breaking ties in
/// favor of whichever tied value was emitted first by the decomposer
/// (i.e. lowest path in lexicographic order). This tallies the multiset
/// of *entry* values, one count per cuboid regardless of how many cells
/// it spans -- not a per-cell frequency count, which the decomposer's
/// greedy cuboid sizes would otherwise skew.
fn choose_default_value(entries: &[DataEntry]) -> i64 {
  let mut first_seen_order = Vec::new();
  let mut counts: HashMap<i64, usize> = HashMap::new();
  for e in entries {
    if !counts.contains_key(&e.value) {
      first_seen_order.push(e.value);
    }
    *counts.entry(e.value).or_insert(0) += 1;
  }

  let mut best: Option<(i64, usize)> = None;
  for v in first_seen_order {
    let c = counts[&v];
    match best {
      None => best = Some((v, c)),
      Some((_, best_c)) if c > best_c => best = Some((v, c)),
      _ => {}
    }
  }
  best.map(|(v, _)| v).unwrap_or(0)
}

/// Validates `root`'s shape, fully decomposes it into maximal cuboids,
/// then picks whichever value covers the most of those cuboids as the
/// default and drops the now-redundant entries that hold it.
pub fn compress(root: &NdInt) -> CuboidCompressResult<CompressedList> {
  let (mut flat, shape) = shape::validate_and_copy(root)?;
  let mut entries = decompose(&mut flat, &shape);

  let default_value = choose_default_value(&entries);
  entries.retain(|e| e.value != default_value);

  Ok(CompressedList { shape, default_value, entries })
}
