/// An arbitrarily nested, rectangular sequence of signed integers: the
/// input `compress` validates and the output `decompress` reconstructs.
///
/// Leaves only ever occur at one inferred depth — the shape validator in
/// [`crate::shape`] rejects any input where that is not the case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NdInt {
  Leaf(i64),
  Seq(Vec<NdInt>),
}

impl NdInt {
  pub fn leaf(v: i64) -> Self {
    NdInt::Leaf(v)
  }

  pub fn seq(items: impl IntoIterator<Item = NdInt>) -> Self {
    NdInt::Seq(items.into_iter().collect())
  }
}

impl From<i64> for NdInt {
  fn from(v: i64) -> Self {
    NdInt::Leaf(v)
  }
}

impl From<Vec<NdInt>> for NdInt {
  fn from(items: Vec<NdInt>) -> Self {
    NdInt::Seq(items)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_construction_helpers() {
    let row = NdInt::seq([NdInt::leaf(1), NdInt::leaf(2), NdInt::leaf(3)]);
    assert_eq!(
      row,
      NdInt::Seq(vec![NdInt::Leaf(1), NdInt::Leaf(2), NdInt::Leaf(3)])
    );
  }
}
