//! GridConfig - root domain geometry and per-node tile shape.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::NodeBox;
use crate::tile::TileLayout;
use crate::tree::relations::node_length_at_level;
use crate::tree::Location;
use crate::types::Level;

/// Configuration of the root domain and of the tile every leaf carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
  /// Minimum corner of the root node. Axes at or beyond `D` are ignored.
  pub origin: DVec3,

  /// Edge length of the root node.
  pub root_length: f64,

  /// Internal cells per axis of a tile (`Nic`). Must be even so each child
  /// of a refined node covers whole cells of its parent.
  pub internal_cells: usize,

  /// Halo layers per side of a tile (`Nhl`), in `1..=Nic`.
  pub halo_layers: usize,

  /// State variables stored per cell.
  pub variables: usize,
}

impl GridConfig {
  /// Check every field, returning the first violation.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.internal_cells == 0 || self.internal_cells % 2 != 0 {
      return Err(ConfigError::InvalidInternalCells(self.internal_cells));
    }
    if self.halo_layers == 0 || self.halo_layers > self.internal_cells {
      return Err(ConfigError::InvalidHaloLayers {
        halo_layers: self.halo_layers,
        internal_cells: self.internal_cells,
      });
    }
    if self.variables == 0 {
      return Err(ConfigError::NoVariables);
    }
    if !self.root_length.is_finite() || self.root_length <= 0.0 {
      return Err(ConfigError::InvalidRootLength(self.root_length));
    }
    Ok(())
  }

  /// Tile layout shared by every node.
  #[inline]
  pub fn layout<const D: usize>(&self) -> TileLayout<D> {
    TileLayout::new(self.internal_cells, self.halo_layers)
  }

  /// Edge length of a node at `level`.
  /// node_length = root_length / 2^level
  #[inline]
  pub fn node_length(&self, level: Level) -> f64 {
    self.root_length * node_length_at_level(level)
  }

  /// Edge length of a tile cell at `level`.
  /// cell_length = node_length / Nic
  #[inline]
  pub fn cell_length(&self, level: Level) -> f64 {
    self.node_length(level) / self.internal_cells as f64
  }

  /// Minimum corner of the node at `location`.
  pub fn node_min<const D: usize, L: Location<D>>(&self, location: &L) -> DVec3 {
    let length = self.node_length(location.level());
    let coordinates = location.coordinates();
    let mut min = self.origin;
    for d in 0..D {
      min[d] += coordinates[d] as f64 * length;
    }
    min
  }

  /// Center of the node at `location`.
  pub fn node_centroid<const D: usize, L: Location<D>>(&self, location: &L) -> DVec3 {
    self.node_box::<D, L>(location).centroid
  }

  /// Box of the node at `location`.
  pub fn node_box<const D: usize, L: Location<D>>(&self, location: &L) -> NodeBox<D> {
    NodeBox::from_min_length(
      self.node_min::<D, L>(location),
      self.node_length(location.level()),
    )
  }
}

impl Default for GridConfig {
  fn default() -> Self {
    Self {
      origin: DVec3::ZERO,
      root_length: 1.0,
      internal_cells: 4,
      halo_layers: 1,
      variables: 1,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
