use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fmt;
use std::io;

/// The different kinds of errors the library can return.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
  /// A sub-sequence of the input had the wrong length for its position in
  /// the inferred shape.
  InconsistentShape {
    shape: Vec<usize>,
    observed_len: usize,
    depth: usize,
  },
  /// An integer leaf appeared above the depth the shape says leaves live at.
  UnexpectedLeaf { shape: Vec<usize>, depth: usize },
  /// The `VN` record did not match the format version this build speaks.
  VersionMisMatch { version_read: u64 },
  /// The payload is structurally invalid: a required reserved key is
  /// missing, a variable-length integer ran past the end of its bit
  /// string, or an ASCII integer field failed to parse.
  Corruption,
  /// A parameter passed in by the caller was invalid on its own terms,
  /// independent of any serialised payload.
  InvalidArgument,
  /// Propagated from a `Read`/`Write` call made by the file adapters.
  Io(io::ErrorKind),
}

/// The error type used in results for all `cuboid_compress` functionality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CuboidCompressError {
  pub kind: ErrorKind,
  pub message: String,
}

impl CuboidCompressError {
  pub(crate) fn new<S: AsRef<str>>(kind: ErrorKind, message: S) -> Self {
    CuboidCompressError {
      kind,
      message: message.as_ref().to_string(),
    }
  }

  pub(crate) fn inconsistent_shape(shape: Vec<usize>, observed_len: usize, depth: usize) -> Self {
    let message = format!(
      "expected shape {:?}, found length {} at depth {}",
      shape, observed_len, depth,
    );
    Self::new(
      ErrorKind::InconsistentShape { shape, observed_len, depth },
      message,
    )
  }

  pub(crate) fn unexpected_leaf(shape: Vec<usize>, depth: usize) -> Self {
    let message = format!(
      "found an unexpected leaf for shape {:?} at depth {}",
      shape, depth,
    );
    Self::new(ErrorKind::UnexpectedLeaf { shape, depth }, message)
  }

  pub(crate) fn version_mismatch(version_read: u64, current: u64) -> Self {
    let message = format!(
      "tried deserialising data with an incompatible version; current version: {}, version read: {}",
      current, version_read,
    );
    Self::new(ErrorKind::VersionMisMatch { version_read }, message)
  }

  pub(crate) fn corruption<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::Corruption, message)
  }

  pub(crate) fn invalid_argument<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::InvalidArgument, message)
  }
}

impl Display for CuboidCompressError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "cuboid_compress {:?} error: {}",
      self.kind,
      &self.message
    )
  }
}

impl From<io::Error> for CuboidCompressError {
  fn from(err: io::Error) -> Self {
    CuboidCompressError {
      kind: ErrorKind::Io(err.kind()),
      message: format!("{}", err),
    }
  }
}

impl Error for CuboidCompressError {}

pub type CuboidCompressResult<T> = Result<T, CuboidCompressError>;
