//! Error types for module-boundary failures.
//!
//! Contract violations (out-of-bounds tile arithmetic, non-unit shifts,
//! writing a non-compact tree) are panics, not errors. The types here cover
//! input that can legitimately be wrong: a configuration supplied by the
//! caller, or a tree stream read back from storage.

use crate::types::Level;

/// Invalid [`GridConfig`](crate::GridConfig).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
  #[error("internal cells per axis must be a positive even number, got {0}")]
  InvalidInternalCells(usize),

  #[error("halo layers must be in 1..={internal_cells}, got {halo_layers}")]
  InvalidHaloLayers {
    halo_layers: usize,
    internal_cells: usize,
  },

  #[error("at least one state variable per cell is required")]
  NoVariables,

  #[error("root length must be finite and positive, got {0}")]
  InvalidRootLength(f64),
}

/// Failure while reading or validating a serialized tree.
///
/// None of these are retryable: they mean the stream was not produced by
/// [`write_tree`](crate::write_tree) from a compact, sorted tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
  #[error("tree contains no nodes")]
  Empty,

  #[error("unsupported tree format version {0}")]
  UnsupportedVersion(u32),

  #[error("dimension mismatch: expected {expected}, found {found}")]
  DimensionMismatch { expected: usize, found: usize },

  #[error("node {position}: level {level} exceeds the maximum level {max_level}")]
  LevelOutOfRange {
    position: usize,
    level: Level,
    max_level: Level,
  },

  #[error("expected {expected} coordinates, found {found}")]
  CoordinateCount { expected: usize, found: usize },

  #[error("node {position}: coordinates outside the domain at its level")]
  InvalidLocation { position: usize },

  #[error("tree is not depth-first sorted at node {position}")]
  NotSorted { position: usize },

  #[error("tree is not compact: node {position} is a duplicate")]
  NotCompact { position: usize },

  #[error("node {position} has no parent in the tree")]
  MissingParent { position: usize },

  #[error("malformed tree stream: {0}")]
  Codec(#[from] bincode::Error),
}
