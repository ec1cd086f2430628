use std::collections::HashMap;

use crate::bit_reader::BitReader;
use crate::bits::{bit_width, bytes_to_bits, unescape_field, var_bytes_decode, var_bytes_list_decode};
use crate::constants::{KEYS_FOR_ENTRIES, MIN_ENTRY_KEYS_PRESENT, VERSION};
use crate::entry::{CompressedList, DataEntry};
use crate::errors::{CuboidCompressError, CuboidCompressResult};
use crate::metadata::{is_reserved, Metadata};

/// Scans `bytes` into an ordered list of raw `(key, value)` fields. Stops
/// escape-aware parsing the moment a flushed key is literally `"CD"`: the
/// rest of the input, unescaped-verbatim, becomes that record's value. A
/// value that unescapes to zero bytes is mapped to a single `\x00` byte
/// instead (mirroring the reference decoder's `curr_item or chr(0)`); this
/// never affects a `CD` value, since that one bypasses this flush entirely.
fn unframe(bytes: &[u8]) -> CuboidCompressResult<Vec<(Vec<u8>, Vec<u8>)>> {
  let mut records = Vec::new();
  let mut i = 0;
  while i < bytes.len() {
    let (key, next) = unescape_field(bytes, i)?;
    i = next;
    if key == b"CD" {
      records.push((key, bytes[i..].to_vec()));
      return Ok(records);
    }
    let (mut value, next) = unescape_field(bytes, i)?;
    i = next;
    if value.is_empty() {
      value.push(0);
    }
    records.push((key, value));
  }
  Ok(records)
}

/// Inverse of `i64::unsigned_abs`: recovers the negative `i64` whose
/// magnitude is `magnitude`. Plain `-(magnitude as i64)` panics on overflow
/// when `magnitude == i64::MIN.unsigned_abs()` (the encoder's own
/// `unsigned_abs()` call happily produces that magnitude for `i64::MIN`);
/// casting then `wrapping_neg`-ing stays panic-free for every magnitude a
/// valid encoder can have written, including that one.
fn negative_from_magnitude(magnitude: u64) -> i64 {
  (magnitude as i64).wrapping_neg()
}

fn decode_ascii_usize(bytes: &[u8]) -> CuboidCompressResult<usize> {
  let s = std::str::from_utf8(bytes)
    .map_err(|_| CuboidCompressError::corruption("pad length is not ASCII"))?;
  s.parse::<usize>()
    .map_err(|_| CuboidCompressError::corruption("pad length is not a valid integer"))
}

fn required<'a>(meta: &'a HashMap<String, Vec<u8>>, key: &str) -> CuboidCompressResult<&'a [u8]> {
  meta
    .get(key)
    .map(|v| v.as_slice())
    .ok_or_else(|| CuboidCompressError::corruption(format!("missing required record {}", key)))
}

fn decode_min_value(meta: &HashMap<String, Vec<u8>>) -> CuboidCompressResult<i64> {
  if let Some(b) = meta.get("MP") {
    Ok(var_bytes_decode(b)? as i64)
  } else if let Some(b) = meta.get("MN") {
    Ok(negative_from_magnitude(var_bytes_decode(b)?))
  } else {
    Err(CuboidCompressError::corruption("missing MP/MN record"))
  }
}

/// Decodes the run-length-offset-encoded value dictionary into the sorted
/// ascending list of distinct entry values, `V`.
fn decode_dictionary(meta: &HashMap<String, Vec<u8>>, min_value: i64) -> CuboidCompressResult<Vec<i64>> {
  let dr = var_bytes_decode(required(meta, "DR")?)? as usize;
  let db = var_bytes_decode(required(meta, "DB")?)? as usize;
  let ro = decode_ascii_usize(required(meta, "RO")?)?;
  let delta_bits = bytes_to_bits(required(meta, "VD")?);
  let limit = delta_bits
    .len()
    .checked_sub(ro)
    .ok_or_else(|| CuboidCompressError::corruption("RO pad length exceeds dictionary bit stream"))?;

  let mut reader = BitReader::with_end(&delta_bits, limit);
  let mut values = vec![min_value];
  let mut last = min_value;
  while reader.has_remaining() {
    let run = if dr > 0 { reader.read_usize(dr)? } else { 0 };
    let offset = if db > 0 { reader.read_u64(db)? } else { 0 };
    for _ in 0..=run {
      last += offset as i64 + 1;
      values.push(last);
    }
  }
  Ok(values)
}

/// Decodes the bit-packed entry stream into `DataEntry` records, using
/// `values` to turn each entry's dictionary index back into its value.
fn decode_entry_stream(
  meta: &HashMap<String, Vec<u8>>,
  k: usize,
  values: &[i64],
) -> CuboidCompressResult<Vec<DataEntry>> {
  let do_pad = decode_ascii_usize(required(meta, "DO")?)?;
  let data_bits = bytes_to_bits(required(meta, "CD")?);
  let as_list = var_bytes_list_decode(required(meta, "AS")?)?;
  if as_list.len() != 2 * k {
    return Err(CuboidCompressError::corruption(
      "AS record does not cover both path and length widths for this shape",
    ));
  }
  let max_path_sizes: Vec<usize> = as_list[..k].iter().map(|&w| w as usize).collect();
  let max_length_sizes: Vec<usize> = as_list[k..].iter().map(|&w| w as usize).collect();
  let value_width = bit_width(values.len() as u64);

  let limit = data_bits
    .len()
    .checked_sub(do_pad)
    .ok_or_else(|| CuboidCompressError::corruption("DO pad length exceeds entry bit stream"))?;
  let mut reader = BitReader::with_end(&data_bits, limit);
  let mut entries = Vec::new();

  while reader.has_remaining() {
    let idx = if value_width > 0 { reader.read_usize(value_width)? } else { 0 };
    let value = *values
      .get(idx)
      .ok_or_else(|| CuboidCompressError::corruption("entry value index out of range"))?;

    let mut path = Vec::with_capacity(k);
    for &w in &max_path_sizes {
      path.push(if w > 0 { reader.read_usize(w)? } else { 0 });
    }
    let mut lengths = Vec::with_capacity(k);
    for &w in &max_length_sizes {
      lengths.push(if w > 0 { reader.read_usize(w)? + 1 } else { 1 });
    }
    entries.push(DataEntry { value, path, lengths });
  }
  Ok(entries)
}

/// Inverse of [`crate::serialise::serialise`]: unframes the byte stream,
/// checks the format version, and — if the full entry-block key set is
/// present — decodes the value dictionary and entry stream back into a
/// [`CompressedList`]. Reserved keys never surface in the returned
/// metadata.
pub fn deserialise(bytes: &[u8]) -> CuboidCompressResult<(CompressedList, Option<Metadata>)> {
  let records = unframe(bytes)?;

  let mut meta: HashMap<String, Vec<u8>> = HashMap::new();
  let mut custom = Metadata::new();
  for (k, v) in records {
    let key = String::from_utf8(k)
      .map_err(|_| CuboidCompressError::corruption("metadata key is not valid UTF-8"))?;
    if is_reserved(&key) {
      meta.insert(key, v);
    } else {
      let value = String::from_utf8(v)
        .map_err(|_| CuboidCompressError::corruption("metadata value is not valid UTF-8"))?;
      custom.insert(key, value);
    }
  }

  let version = var_bytes_decode(required(&meta, "VN")?)?;
  if version != VERSION {
    return Err(CuboidCompressError::version_mismatch(version, VERSION));
  }

  let default_value = if let Some(b) = meta.get("DP") {
    var_bytes_decode(b)? as i64
  } else if let Some(b) = meta.get("DN") {
    negative_from_magnitude(var_bytes_decode(b)?)
  } else {
    return Err(CuboidCompressError::corruption("missing DP/DN record"));
  };

  let shape: Vec<usize> = var_bytes_list_decode(required(&meta, "SD")?)?
    .into_iter()
    .map(|d| d as usize)
    .collect();
  let k = shape.len();

  let present_count = KEYS_FOR_ENTRIES.iter().filter(|key| meta.contains_key(**key)).count();
  let entries = if present_count == 0 {
    Vec::new()
  } else if present_count == MIN_ENTRY_KEYS_PRESENT {
    let min_value = decode_min_value(&meta)?;
    let values = decode_dictionary(&meta, min_value)?;
    decode_entry_stream(&meta, k, &values)?
  } else {
    return Err(CuboidCompressError::corruption(
      "entry block reserved keys are partially present",
    ));
  };

  let compressed = CompressedList { shape, default_value, entries };
  let custom_metadata = if custom.is_empty() { None } else { Some(custom) };
  Ok((compressed, custom_metadata))
}
