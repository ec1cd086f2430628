//! Lossless compression for N-dimensional integer arrays via cuboid
//! decomposition: maximal axis-aligned blocks of equal value are
//! extracted greedily and the remainder is described by a single default
//! value, then packed into a self-describing byte format.
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
struct ReadmeDoctest;

pub use compress::compress;
pub use decompress::decompress;
pub use deserialise::deserialise;
pub use entry::{CompressedList, DataEntry};
pub use file::{compress_to_file, decompress_from_file};
pub use metadata::Metadata;
pub use nd::NdInt;
pub use serialise::serialise;

pub mod errors;

mod bit_reader;
mod bits;
mod compress;
mod constants;
mod decompose;
mod decompress;
mod deserialise;
mod entry;
mod file;
mod metadata;
mod nd;
mod serialise;
mod shape;

#[cfg(test)]
mod tests;
