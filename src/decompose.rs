use crate::entry::DataEntry;

/// Row-major strides for `shape`: `strides[i]` is the number of flat cells
/// spanned by incrementing index `i` by one.
pub(crate) fn strides_for(shape: &[usize]) -> Vec<usize> {
  let k = shape.len();
  let mut strides = vec![1_usize; k];
  for i in (0..k.saturating_sub(1)).rev() {
    strides[i] = strides[i + 1] * shape[i + 1];
  }
  strides
}

fn path_from_index(shape: &[usize], strides: &[usize], index: usize) -> Vec<usize> {
  (0..shape.len())
    .map(|i| (index / strides[i]) % shape[i])
    .collect()
}

fn flat_index(strides: &[usize], path: &[usize]) -> usize {
  path.iter().zip(strides).map(|(p, s)| p * s).sum()
}

fn value_at(flat: &[Option<i64>], strides: &[usize], path: &[usize]) -> Option<i64> {
  flat[flat_index(strides, path)]
}

/// Checks whether every cell of the thickness-1 slab anchored at `path`
/// with `path[dim]` offset by `candidate_offset` holds `value`, ranging
/// over the already-established extents `lengths[dim+1..]` and pinned to
/// a single coordinate on every other axis.
fn slab_all_equal(
  flat: &[Option<i64>],
  strides: &[usize],
  path: &[usize],
  lengths: &[usize],
  dim: usize,
  candidate_offset: usize,
  value: i64,
) -> bool {
  let k = path.len();
  let varying: Vec<usize> = (dim + 1..k).collect();
  let mut counters = vec![0_usize; varying.len()];

  loop {
    let mut cell = path.to_vec();
    cell[dim] += candidate_offset;
    for (pos, &axis) in varying.iter().enumerate() {
      cell[axis] += counters[pos];
    }
    match value_at(flat, strides, &cell) {
      Some(v) if v == value => {}
      _ => return false,
    }

    if varying.is_empty() {
      return true;
    }
    let mut carry = true;
    for i in (0..counters.len()).rev() {
      if !carry {
        break;
      }
      counters[i] += 1;
      if counters[i] < lengths[varying[i]] {
        carry = false;
      } else {
        counters[i] = 0;
      }
    }
    if carry {
      return true;
    }
  }
}

/// Greedily measures the maximal axis-aligned cuboid anchored at `path`
/// whose cells all hold `value`, extending one axis at a time from the
/// innermost axis outward. Each axis's extension only needs to check a
/// slab of dimensionality one less than the cuboid built so far, since
/// all shorter-axis combinations were already validated by earlier steps.
fn calculate_cuboid(
  flat: &[Option<i64>],
  strides: &[usize],
  shape: &[usize],
  path: &[usize],
  value: i64,
) -> Vec<usize> {
  let k = shape.len();
  let mut lengths = vec![0_usize; k];

  for dim in (0..k).rev() {
    loop {
      if path[dim] + lengths[dim] >= shape[dim] {
        break;
      }
      if slab_all_equal(flat, strides, path, &lengths, dim, lengths[dim], value) {
        lengths[dim] += 1;
      } else {
        break;
      }
    }
  }

  lengths
}

/// Sets every cell of the cuboid anchored at `path` with extent `lengths`
/// to `None`, marking it consumed.
fn mark_consumed(flat: &mut [Option<i64>], strides: &[usize], path: &[usize], lengths: &[usize]) {
  let k = path.len();
  let mut counters = vec![0_usize; k];

  loop {
    let cell: Vec<usize> = path.iter().zip(&counters).map(|(p, c)| p + c).collect();
    flat[flat_index(strides, &cell)] = None;

    let mut carry = true;
    for i in (0..k).rev() {
      if !carry {
        break;
      }
      counters[i] += 1;
      if counters[i] < lengths[i] {
        carry = false;
      } else {
        counters[i] = 0;
      }
    }
    if carry {
      break;
    }
  }
}

/// Decomposes a flat, row-major buffer of nullable cells into the minimal
/// number of entries a greedy maximal-cuboid sweep can find: repeatedly
/// take the lowest remaining cell in lexicographic index order, measure
/// the maximal cuboid of equal value anchored there, emit an entry, and
/// mark those cells consumed. Consumes `flat` in place; the default value
/// (the value every cell not covered by an entry should assume) is left
/// for the caller to pick, since it depends on frequency across the whole
/// array, not on the decomposition itself.
pub fn decompose(flat: &mut [Option<i64>], shape: &[usize]) -> Vec<DataEntry> {
  let strides = strides_for(shape);
  let total: usize = shape.iter().product();
  let mut entries = Vec::new();

  let mut index = 0;
  while index < total {
    let path = path_from_index(shape, &strides, index);
    let value = match value_at(flat, &strides, &path) {
      None => {
        index += 1;
        continue;
      }
      Some(v) => v,
    };

    let lengths = calculate_cuboid(flat, &strides, shape, &path, value);
    mark_consumed(flat, &strides, &path, &lengths);
    let advance = lengths[lengths.len() - 1];
    entries.push(DataEntry { value, path, lengths });
    index += advance;
  }

  entries
}
