//! Tree persistence - the "compact, depth-first sorted" read/write contract.
//!
//! The stream is a bincode-encoded record:
//!
//! ```text
//!   version: u32 | dimension: u32 | levels: [u32; N] | coordinates: [u64; N * D]
//! ```
//!
//! Locations are stored by level and integer coordinates, so a tree written
//! with one location representation can be read back with another.
//!
//! Writing a tree that is not compact and sorted is a programming error and
//! panics. Reading re-verifies the same invariants and reports violations as
//! [`TreeError`]s, since the bytes may come from anywhere.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use super::compact::CompactTree;
use super::location::Location;
use crate::error::TreeError;

/// Current stream format version.
pub const TREE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct TreeRecord {
  version: u32,
  dimension: u32,
  levels: Vec<u32>,
  coordinates: Vec<u64>,
}

/// Write `tree` to `writer`.
///
/// # Panics
/// If the tree is not compact and depth-first sorted.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "tree::write"))]
pub fn write_tree<const D: usize, L: Location<D>, W: Write>(
  tree: &CompactTree<D, L>,
  writer: W,
) -> Result<(), TreeError> {
  assert!(tree.is_compact(), "cannot write a tree that is not compact");
  assert!(
    tree.is_depth_first_sorted(),
    "cannot write a tree that is not depth-first sorted"
  );

  let mut levels = Vec::with_capacity(tree.len());
  let mut coordinates = Vec::with_capacity(tree.len() * D);
  for location in tree.locations() {
    levels.push(location.level());
    coordinates.extend_from_slice(&location.coordinates());
  }

  let record = TreeRecord {
    version: TREE_FORMAT_VERSION,
    dimension: D as u32,
    levels,
    coordinates,
  };
  bincode::serialize_into(writer, &record)?;
  Ok(())
}

/// Read a tree previously written by [`write_tree`].
///
/// Fails if the stream is malformed, was written for another dimension, or
/// does not describe a compact, depth-first sorted tree closed under
/// `parent`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "tree::read"))]
pub fn read_tree<const D: usize, L: Location<D>, R: Read>(
  reader: R,
) -> Result<CompactTree<D, L>, TreeError> {
  let record: TreeRecord = bincode::deserialize_from(reader)?;

  if record.version != TREE_FORMAT_VERSION {
    return Err(TreeError::UnsupportedVersion(record.version));
  }
  if record.dimension as usize != D {
    return Err(TreeError::DimensionMismatch {
      expected: D,
      found: record.dimension as usize,
    });
  }
  if record.coordinates.len() != record.levels.len() * D {
    return Err(TreeError::CoordinateCount {
      expected: record.levels.len() * D,
      found: record.coordinates.len(),
    });
  }

  let mut locations = Vec::with_capacity(record.levels.len());
  for (position, (&level, chunk)) in record
    .levels
    .iter()
    .zip(record.coordinates.chunks_exact(D))
    .enumerate()
  {
    if level > L::MAX_LEVEL {
      return Err(TreeError::LevelOutOfRange {
        position,
        level,
        max_level: L::MAX_LEVEL,
      });
    }
    if chunk.iter().any(|&c| c >> level != 0) {
      return Err(TreeError::InvalidLocation { position });
    }
    let mut coordinates = [0u64; D];
    coordinates.copy_from_slice(chunk);
    locations.push(L::from_coordinates(coordinates, level));
  }

  let tree = CompactTree::from_sorted_locations(locations)?;

  #[cfg(feature = "tracing")]
  tracing::debug!(nodes = tree.len(), "read tree");

  Ok(tree)
}

#[cfg(test)]
#[path = "serialization_test.rs"]
mod serialization_test;
