use std::fs;
use std::path::Path;

use crate::compress::compress;
use crate::decompress::decompress;
use crate::deserialise::deserialise;
use crate::errors::CuboidCompressResult;
use crate::metadata::Metadata;
use crate::nd::NdInt;
use crate::serialise::serialise;

/// Compresses `data` and writes the serialised payload to `path` as raw
/// bytes. The core speaks bytes end-to-end; this wrapper's only job is
/// the `Read`/`Write` call the core itself never makes.
pub fn compress_to_file<P: AsRef<Path>>(
  path: P,
  data: &NdInt,
  user_metadata: Option<&Metadata>,
) -> CuboidCompressResult<()> {
  let compressed = compress(data)?;
  let bytes = serialise(&compressed, user_metadata);
  fs::write(path, bytes)?;
  Ok(())
}

/// Reads `path` and decompresses it back into a nested array plus any
/// user metadata it carried.
pub fn decompress_from_file<P: AsRef<Path>>(
  path: P,
) -> CuboidCompressResult<(NdInt, Option<Metadata>)> {
  let bytes = fs::read(path)?;
  let (compressed, user_metadata) = deserialise(&bytes)?;
  Ok((decompress(&compressed), user_metadata))
}
