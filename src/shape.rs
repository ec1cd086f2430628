use crate::errors::{CuboidCompressError, CuboidCompressResult};
use crate::nd::NdInt;

/// Validates `root`'s shape and copies its leaves into a flat, row-major
/// buffer of nullable slots: a flat `Vec<Option<i64>>` plus a
/// stride-addressable shape rather than a nested owning structure, so the
/// decomposer can mark a cell consumed with a single indexed write.
///
/// The shape is inferred by descending along index 0 of each sequence
/// (the "spine"); every other branch is then checked for consistency
/// against it.
pub fn validate_and_copy(root: &NdInt) -> CuboidCompressResult<(Vec<Option<i64>>, Vec<usize>)> {
  let mut shape = Vec::new();
  let mut flat = Vec::new();

  match root {
    NdInt::Leaf(_) => return Err(CuboidCompressError::unexpected_leaf(shape, 0)),
    NdInt::Seq(items) => {
      let mut building = true;
      validate_seq(items, &mut shape, 0, &mut building, &mut flat)?;
    }
  }

  Ok((flat, shape))
}

fn validate_seq(
  items: &[NdInt],
  shape: &mut Vec<usize>,
  depth: usize,
  building: &mut bool,
  flat: &mut Vec<Option<i64>>,
) -> CuboidCompressResult<()> {
  if *building {
    shape.push(items.len());
  }
  if items.len() != shape[depth] {
    return Err(CuboidCompressError::inconsistent_shape(
      shape.clone(),
      items.len(),
      depth,
    ));
  }

  for item in items {
    match item {
      NdInt::Leaf(v) => {
        if shape.len() != depth + 1 {
          return Err(CuboidCompressError::unexpected_leaf(shape.clone(), depth));
        }
        flat.push(Some(*v));
        *building = false;
      }
      NdInt::Seq(sub_items) => {
        if shape.len() <= depth {
          return Err(CuboidCompressError::inconsistent_shape(
            shape.clone(),
            sub_items.len(),
            depth + 1,
          ));
        }
        let mut child_building = *building;
        validate_seq(sub_items, shape, depth + 1, &mut child_building, flat)?;
        *building = false;
      }
    }
  }

  Ok(())
}
