//! Mesh - a compact tree with one tile of cell state per leaf.
//!
//! ```text
//!   Mesh
//!   ├── tree     CompactTree (topology, node indices)
//!   ├── config   GridConfig  (root geometry, Nic, Nhl, variables)
//!   └── tiles    [Option<Tile>; tree.len()]  (Some for leaves)
//!                  └── Tile: node box + TileLayout + StateBuffer
//! ```
//!
//! Tiles are indexed by [`NodeIdx`], so a mesh is tied to one tree topology.
//! Refining or coarsening means taking the tree back out
//! ([`Mesh::into_tree`]) and building a new mesh.

use glam::DVec3;

use crate::config::GridConfig;
use crate::error::ConfigError;
use crate::geometry::{BoundingLength, Centroid, ContainsPoint, NodeBox};
use crate::tile::{CellCoord, TileLayout};
use crate::tree::{CompactTree, InterleavedLocation, Location};
use crate::types::{ChildPos, Level, NodeIdx};

// =============================================================================
// StateBuffer
// =============================================================================

/// Cell-major `f64` storage: `variables` consecutive values per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct StateBuffer {
  variables: usize,
  data: Vec<f64>,
}

impl StateBuffer {
  /// Zero-initialized buffer for `cells` cells.
  pub fn new(cells: usize, variables: usize) -> Self {
    assert!(variables > 0, "a state buffer needs at least one variable");
    Self {
      variables,
      data: vec![0.0; cells * variables],
    }
  }

  #[inline]
  pub fn variables(&self) -> usize {
    self.variables
  }

  #[inline]
  pub fn cells(&self) -> usize {
    self.data.len() / self.variables
  }

  /// State vector of cell `index`.
  #[inline]
  pub fn cell(&self, index: usize) -> &[f64] {
    let start = index * self.variables;
    &self.data[start..start + self.variables]
  }

  /// Mutable state vector of cell `index`.
  #[inline]
  pub fn cell_mut(&mut self, index: usize) -> &mut [f64] {
    let start = index * self.variables;
    &mut self.data[start..start + self.variables]
  }

  /// Raw storage.
  #[inline]
  pub fn as_slice(&self) -> &[f64] {
    &self.data
  }

  /// Set every value of every cell.
  pub fn fill(&mut self, value: f64) {
    self.data.fill(value);
  }
}

// =============================================================================
// Tile
// =============================================================================

/// Cell grid of one leaf: geometry plus state.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile<const D: usize> {
  node: NodeIdx,
  level: Level,
  geometry: NodeBox<D>,
  layout: TileLayout<D>,
  state: StateBuffer,
}

impl<const D: usize> Tile<D> {
  /// Zero-initialized tile covering `geometry`.
  pub fn new(
    node: NodeIdx,
    level: Level,
    geometry: NodeBox<D>,
    layout: TileLayout<D>,
    variables: usize,
  ) -> Self {
    Self {
      node,
      level,
      geometry,
      layout,
      state: StateBuffer::new(layout.size(), variables),
    }
  }

  #[inline]
  pub fn node(&self) -> NodeIdx {
    self.node
  }

  #[inline]
  pub fn level(&self) -> Level {
    self.level
  }

  /// Box of the node (internal cells only; halos extend beyond it).
  #[inline]
  pub fn geometry(&self) -> &NodeBox<D> {
    &self.geometry
  }

  #[inline]
  pub fn layout(&self) -> &TileLayout<D> {
    &self.layout
  }

  #[inline]
  pub fn state(&self) -> &StateBuffer {
    &self.state
  }

  #[inline]
  pub fn state_mut(&mut self) -> &mut StateBuffer {
    &mut self.state
  }

  /// Edge length of one cell.
  #[inline]
  pub fn cell_length(&self) -> f64 {
    self.geometry.length / self.layout.internal_cells() as f64
  }

  /// Center of cell `coord` (halo cells lie outside the node box).
  pub fn cell_centroid(&self, coord: CellCoord<D>) -> DVec3 {
    debug_assert!(self.layout.contains(coord));
    let dx = self.cell_length();
    let min = self.geometry.min();
    let halo = self.layout.halo_layers() as f64;
    let mut x = self.geometry.centroid;
    for d in 0..D {
      x[d] = min[d] + (coord[d] as f64 - halo + 0.5) * dx;
    }
    x
  }

  /// Tile cell (halos included) containing `x`.
  pub fn cell_containing(&self, x: DVec3) -> Option<CellCoord<D>> {
    let dx = self.cell_length();
    let min = self.geometry.min();
    let halo = self.layout.halo_layers() as f64;
    let n = self.layout.cells_per_length() as f64;
    let mut coord = [0usize; D];
    for d in 0..D {
      let rel = (x[d] - min[d]) / dx + halo;
      if !(rel >= 0.0 && rel < n) {
        return None;
      }
      coord[d] = rel.floor() as usize;
    }
    Some(coord)
  }

  /// Internal cell containing `x`, if `x` lies in the node box.
  pub fn internal_cell_containing(&self, x: DVec3) -> Option<CellCoord<D>> {
    self
      .cell_containing(x)
      .filter(|&coord| self.layout.is_internal(coord))
  }

  /// Halo cell containing `x`, if `x` lies in the halo band.
  pub fn halo_cell_containing(&self, x: DVec3) -> Option<CellCoord<D>> {
    self.cell_containing(x).filter(|&coord| self.layout.is_halo(coord))
  }

  /// State vector of cell `coord`.
  #[inline]
  pub fn get(&self, coord: CellCoord<D>) -> &[f64] {
    self.state.cell(self.layout.index(coord))
  }

  /// Mutable state vector of cell `coord`.
  #[inline]
  pub fn get_mut(&mut self, coord: CellCoord<D>) -> &mut [f64] {
    let index = self.layout.index(coord);
    self.state.cell_mut(index)
  }
}

impl<const D: usize> Centroid for Tile<D> {
  fn centroid(&self) -> DVec3 {
    self.geometry.centroid
  }
}

impl<const D: usize> BoundingLength for Tile<D> {
  fn bounding_length(&self) -> f64 {
    self.geometry.length
  }
}

impl<const D: usize> ContainsPoint for Tile<D> {
  fn contains_point(&self, point: DVec3) -> bool {
    self.geometry.contains_point(point)
  }
}

// =============================================================================
// Mesh
// =============================================================================

/// Compact tree plus one tile per leaf.
#[derive(Clone, Debug)]
pub struct Mesh<const D: usize, L: Location<D> = InterleavedLocation<D>> {
  tree: CompactTree<D, L>,
  config: GridConfig,
  layout: TileLayout<D>,
  tiles: Vec<Option<Tile<D>>>,
}

impl<const D: usize, L: Location<D>> Mesh<D, L> {
  /// Allocate a zero-initialized tile for every leaf of `tree`.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "mesh::new"))]
  pub fn new(tree: CompactTree<D, L>, config: GridConfig) -> Result<Self, ConfigError> {
    config.validate()?;
    let layout = config.layout::<D>();

    let mut tiles: Vec<Option<Tile<D>>> = vec![None; tree.len()];
    for leaf in tree.leaves() {
      let location = tree.location(leaf);
      tiles[leaf.index()] = Some(Tile::new(
        leaf,
        location.level(),
        config.node_box::<D, L>(&location),
        layout,
        config.variables,
      ));
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(leaves = tiles.iter().flatten().count(), "mesh allocated");

    Ok(Self {
      tree,
      config,
      layout,
      tiles,
    })
  }

  #[inline]
  pub fn tree(&self) -> &CompactTree<D, L> {
    &self.tree
  }

  #[inline]
  pub fn config(&self) -> &GridConfig {
    &self.config
  }

  #[inline]
  pub fn layout(&self) -> &TileLayout<D> {
    &self.layout
  }

  /// Give the tree back, dropping all cell state.
  pub fn into_tree(self) -> CompactTree<D, L> {
    self.tree
  }

  /// Tile of `node`, `None` for internal nodes.
  #[inline]
  pub fn tile(&self, node: NodeIdx) -> Option<&Tile<D>> {
    self.tiles.get(node.index()).and_then(Option::as_ref)
  }

  #[inline]
  pub fn tile_mut(&mut self, node: NodeIdx) -> Option<&mut Tile<D>> {
    self.tiles.get_mut(node.index()).and_then(Option::as_mut)
  }

  /// Tile of the leaf at `location`.
  pub fn tile_at(&self, location: &L) -> Option<&Tile<D>> {
    self.tree.node_at(location).and_then(|node| self.tile(node))
  }

  /// All tiles, in depth-first order of their leaves.
  pub fn tiles(&self) -> impl Iterator<Item = &Tile<D>> + '_ {
    self.tiles.iter().flatten()
  }

  /// Number of tiles (= leaves).
  pub fn tile_count(&self) -> usize {
    self.tiles().count()
  }

  /// Leaf whose node box contains `x`.
  ///
  /// `None` outside the root box, or where the tree has no leaf covering
  /// `x` (a node refined with only some of its children present).
  pub fn leaf_containing(&self, x: DVec3) -> Option<NodeIdx> {
    let mut unit = [0.0f64; D];
    for d in 0..D {
      let rel = (x[d] - self.config.origin[d]) / self.config.root_length;
      if !(0.0..1.0).contains(&rel) {
        return None;
      }
      unit[d] = rel;
    }

    let mut location = L::root();
    let mut node = self.tree.node_at(&location)?;
    while !self.tree.is_leaf(node) {
      let depth = (location.level() + 1) as i32;
      let mut bits = 0u8;
      for (d, u) in unit.iter().enumerate() {
        let cell = (u * 2f64.powi(depth)).floor() as u64;
        bits |= ((cell & 1) as u8) << d;
      }
      location = location.child(ChildPos::new::<D>(bits))?;
      node = self.tree.node_at(&location)?;
    }
    Some(node)
  }

  /// Set every internal cell from its centroid.
  pub fn fill_internal<F: FnMut(DVec3, &mut [f64])>(&mut self, mut f: F) {
    let layout = self.layout;
    for tile in self.tiles.iter_mut().flatten() {
      layout.for_each_internal(|coord| {
        let x = tile.cell_centroid(coord);
        f(x, tile.get_mut(coord));
      });
    }
  }

  /// Set every halo cell from its centroid.
  ///
  /// Halos across the domain boundary are never written by the exchange;
  /// this is how a solver applies its boundary conditions.
  pub fn fill_halos<F: FnMut(DVec3, &mut [f64])>(&mut self, mut f: F) {
    let layout = self.layout;
    for tile in self.tiles.iter_mut().flatten() {
      layout.for_each_halo(|coord| {
        let x = tile.cell_centroid(coord);
        f(x, tile.get_mut(coord));
      });
    }
  }
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
