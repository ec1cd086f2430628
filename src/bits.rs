use crate::constants::{ESCAPE_BYTE, SEPARATOR_BYTE};
use crate::errors::{CuboidCompressError, CuboidCompressResult};

/// Big-endian binary of `n`, left-padded with zeros to exactly `w` bits.
/// Panics if `n` does not fit in `w` bits.
pub fn fixed_bits(n: u64, w: usize) -> Vec<bool> {
  if w < 64 {
    assert!(
      n < (1_u64 << w),
      "fixed_bits: {} does not fit in {} bits",
      n,
      w,
    );
  }

  let mut res = Vec::with_capacity(w);
  for i in 0..w {
    let shift = w - 1 - i;
    // `n` never has more than 64 significant bits, so any shift amount at
    // or beyond that is an implicit leading zero; shifting a `u64` by >=64
    // bits itself panics, so that case is special-cased rather than asked
    // of the shift operator.
    let bit = shift < 64 && (n >> shift) & 1 > 0;
    res.push(bit);
  }
  res
}

fn natural_bit_len(n: u64) -> usize {
  if n == 0 {
    1
  } else {
    (64 - n.leading_zeros()) as usize
  }
}

/// `⌈log₂(max_value + 1)⌉`: the number of bits needed for `fixed_bits` to
/// hold any value in `0..=max_value`, or `0` when `max_value` is `0`.
pub fn bit_width(max_value: u64) -> usize {
  if max_value == 0 {
    0
  } else {
    (64 - max_value.leading_zeros()) as usize
  }
}

/// Dynamic-width, continuation-bit-framed encoding of `n`: big-endian binary
/// padded on the left until its length is a positive multiple of `c`, with a
/// continuation bit `1` between successive `c`-bit groups and a terminator
/// bit `0` after the last one. `n = 0` encodes as `c` zero bits then `0`.
pub fn var_bits(n: u64, c: usize) -> Vec<bool> {
  assert!(c > 0, "var_bits: chunk size must be positive");

  let len = natural_bit_len(n);
  // Always pad to the next multiple of `c` strictly greater than `len`, even
  // when `len` is already a multiple of `c`.
  let total_len = c * (len / c + 1);
  let bits = fixed_bits(n, total_len);

  let n_groups = total_len / c;
  let mut res = Vec::with_capacity(total_len + n_groups);
  for g in 0..n_groups {
    res.extend_from_slice(&bits[g * c..(g + 1) * c]);
    res.push(g + 1 < n_groups);
  }
  res
}

/// Inverse of [`var_bits`]: reads successive `c`-bit groups starting at
/// `i`, stopping at the first `0` flag bit. Returns the decoded integer and
/// the index one past the terminator.
pub fn var_int_decode(bits: &[bool], c: usize, i: usize) -> CuboidCompressResult<(u64, usize)> {
  assert!(c > 0, "var_int_decode: chunk size must be positive");

  let mut idx = i;
  let mut collected = Vec::new();
  loop {
    if idx + c > bits.len() {
      return Err(CuboidCompressError::corruption(
        "truncated variable-length integer: not enough bits for chunk",
      ));
    }
    collected.extend_from_slice(&bits[idx..idx + c]);
    idx += c;

    if idx >= bits.len() {
      return Err(CuboidCompressError::corruption(
        "truncated variable-length integer: missing continuation bit",
      ));
    }
    let flag = bits[idx];
    idx += 1;
    if !flag {
      break;
    }
  }

  let mut value: u64 = 0;
  for bit in collected {
    value = (value << 1) | (bit as u64);
  }
  Ok((value, idx))
}

/// Groups bits into 8-bit MSB-first bytes, zero-padding the last byte on
/// the right.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
  let mut res = Vec::with_capacity((bits.len() + 7) / 8);
  let mut i = 0;
  while i < bits.len() {
    let mut byte = 0_u8;
    for _ in 0..8 {
      byte <<= 1;
      if i < bits.len() {
        if bits[i] {
          byte |= 1;
        }
        i += 1;
      }
    }
    res.push(byte);
  }
  res
}

/// Inverse of [`bits_to_bytes`]: expands each byte MSB-first into 8 bits.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
  let mut res = Vec::with_capacity(bytes.len() * 8);
  for &b in bytes {
    for i in 0_usize..8 {
      res.push(b & (1 << (7 - i)) > 0);
    }
  }
  res
}

/// `var_bits(n, 7)` packed into bytes.
pub fn var_bytes(n: u64) -> Vec<u8> {
  bits_to_bytes(&var_bits(n, 7))
}

/// Inverse of [`var_bytes`].
pub fn var_bytes_decode(bytes: &[u8]) -> CuboidCompressResult<u64> {
  let bits = bytes_to_bits(bytes);
  var_int_decode(&bits, 7, 0).map(|(value, _)| value)
}

/// A `var_bytes` length prefix followed by the `var_bits(_, 7)` encoding of
/// each item, all packed into bytes.
pub fn var_bytes_list(xs: &[u64]) -> Vec<u8> {
  let mut bits = var_bits(xs.len() as u64, 7);
  for &x in xs {
    bits.extend(var_bits(x, 7));
  }
  bits_to_bytes(&bits)
}

/// Inverse of [`var_bytes_list`].
pub fn var_bytes_list_decode(bytes: &[u8]) -> CuboidCompressResult<Vec<u64>> {
  let bits = bytes_to_bits(bytes);
  let (len, mut i) = var_int_decode(&bits, 7, 0)?;
  let mut res = Vec::with_capacity(len as usize);
  for _ in 0..len {
    let (x, next_i) = var_int_decode(&bits, 7, i)?;
    res.push(x);
    i = next_i;
  }
  Ok(res)
}

/// Replaces every `\x01` with `\x01\x01` and every `\x00` with `\x01\x00`,
/// so the result contains neither byte unescaped.
pub fn escape(bytes: &[u8]) -> Vec<u8> {
  let mut res = Vec::with_capacity(bytes.len());
  for &b in bytes {
    if b == ESCAPE_BYTE || b == SEPARATOR_BYTE {
      res.push(ESCAPE_BYTE);
    }
    res.push(b);
  }
  res
}

/// Inverse of [`escape`]: reads one escape-framed field out of `bytes`
/// starting at `start`, stopping at the first unescaped `\x00` separator.
/// An escape byte is dropped and the byte following it is consumed
/// literally regardless of its value. Returns the unescaped field and the
/// index just past the separator.
pub fn unescape_field(bytes: &[u8], start: usize) -> CuboidCompressResult<(Vec<u8>, usize)> {
  let mut i = start;
  let mut out = Vec::new();
  loop {
    if i >= bytes.len() {
      return Err(CuboidCompressError::corruption(
        "unterminated record: missing separator",
      ));
    }
    let b = bytes[i];
    if b == ESCAPE_BYTE {
      i += 1;
      if i >= bytes.len() {
        return Err(CuboidCompressError::corruption(
          "dangling escape byte at end of input",
        ));
      }
      out.push(bytes[i]);
      i += 1;
    } else if b == SEPARATOR_BYTE {
      return Ok((out, i + 1));
    } else {
      out.push(b);
      i += 1;
    }
  }
}
