use crate::decompose::strides_for;
use crate::entry::CompressedList;
use crate::nd::NdInt;

fn paint_cuboid(flat: &mut [i64], strides: &[usize], path: &[usize], lengths: &[usize], value: i64) {
  let k = path.len();
  let mut counters = vec![0_usize; k];

  loop {
    let idx: usize = (0..k).map(|i| (path[i] + counters[i]) * strides[i]).sum();
    flat[idx] = value;

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

/// Rebuilds a nested sequence from a flat row-major buffer, one level of
/// nesting per remaining axis.
fn build_nd(shape: &[usize], flat: &[i64]) -> NdInt {
  if shape.len() == 1 {
    return NdInt::Seq(flat.iter().map(|&v| NdInt::Leaf(v)).collect());
  }
  let chunk: usize = shape[1..].iter().product();
  let items = flat.chunks(chunk).map(|c| build_nd(&shape[1..], c)).collect();
  NdInt::Seq(items)
}

/// Allocates a dense array of `compressed.shape` filled with its default
/// value, then paints each entry's cuboid, and reassembles the nested
/// sequence form.
pub fn decompress(compressed: &CompressedList) -> NdInt {
  let strides = strides_for(&compressed.shape);
  let total: usize = compressed.shape.iter().product();
  let mut flat = vec![compressed.default_value; total];

  for e in &compressed.entries {
    paint_cuboid(&mut flat, &strides, &e.path, &e.lengths, e.value);
  }

  build_nd(&compressed.shape, &flat)
}
