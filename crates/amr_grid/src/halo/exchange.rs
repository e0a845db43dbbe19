//! Two-phase halo exchange.
//!
//! ```text
//!   level(T) vs level(N)     operation     phase
//!   ────────────────────     ─────────     ─────
//!   equal                    copy          1
//!   T coarser (N finer)      restrict      1
//!   T finer (N coarser)      project       2
//! ```
//!
//! Phase 1 reads only internal cells of the source tile, so it never depends
//! on another halo. Phase 2 reconstructs a gradient on the coarse tile,
//! which reads that tile's halos, so it must run after phase 1 has finished
//! for the whole mesh.
//!
//! Each phase is gather-then-apply: updates for every tile are computed in
//! parallel from the state as it was when the phase started, then written.
//! Only a tile's own halo cells are written, and each by exactly one source,
//! so the result does not depend on traversal order.

use glam::DVec3;
use rayon::prelude::*;
use smallvec::SmallVec;
use web_time::Instant;

use super::limiter::Limiter;
use super::mesh::{Mesh, Tile};
use super::stats::HaloExchangeStats;
use crate::tile::CellCoord;
use crate::tree::{leaf_neighbors, Direction, Location};
use crate::types::NodeIdx;

type CellValues = SmallVec<[f64; 4]>;

/// Pending writes into one tile's halo cells: (linear cell index, values).
struct TileUpdates {
  node: NodeIdx,
  cells: Vec<(usize, CellValues)>,
  stats: HaloExchangeStats,
}

/// Run both phases in order.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "halo::exchange"))]
pub fn exchange_halos<const D: usize, L: Location<D>>(
  mesh: &mut Mesh<D, L>,
  limiter: Limiter,
) -> HaloExchangeStats {
  let one = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("phase_one").entered();
    phase_one(mesh)
  };
  let two = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("phase_two").entered();
    phase_two(mesh, limiter)
  };
  let stats = one.merge(two);

  #[cfg(feature = "tracing")]
  tracing::debug!(
    copied = stats.copied_cells,
    restricted = stats.restricted_cells,
    projected = stats.projected_cells,
    absent = stats.absent_directions,
    total_us = stats.total_us(),
    "halo exchange"
  );

  stats
}

/// Phase 1: copy from same-level neighbors, restrict from finer ones.
pub fn phase_one<const D: usize, L: Location<D>>(mesh: &mut Mesh<D, L>) -> HaloExchangeStats {
  let start = Instant::now();
  let updates = gather(mesh, |mesh, leaf| gather_copy_restrict(mesh, leaf));
  let mut stats = apply(mesh, updates);
  stats.phase_one_us = start.elapsed().as_micros() as u64;
  stats
}

/// Phase 2: project from coarser neighbors.
pub fn phase_two<const D: usize, L: Location<D>>(
  mesh: &mut Mesh<D, L>,
  limiter: Limiter,
) -> HaloExchangeStats {
  let start = Instant::now();
  let updates = gather(mesh, |mesh, leaf| gather_project(mesh, leaf, limiter));
  let mut stats = apply(mesh, updates);
  stats.phase_two_us = start.elapsed().as_micros() as u64;
  stats
}

fn gather<const D: usize, L, F>(mesh: &Mesh<D, L>, per_leaf: F) -> Vec<TileUpdates>
where
  L: Location<D>,
  F: Fn(&Mesh<D, L>, NodeIdx) -> TileUpdates + Sync,
{
  let leaves: Vec<NodeIdx> = mesh.tree().leaves().collect();
  leaves.par_iter().map(|&leaf| per_leaf(mesh, leaf)).collect()
}

fn apply<const D: usize, L: Location<D>>(
  mesh: &mut Mesh<D, L>,
  updates: Vec<TileUpdates>,
) -> HaloExchangeStats {
  let mut stats = HaloExchangeStats::default();
  for update in updates {
    stats = stats.merge(update.stats);
    let Some(tile) = mesh.tile_mut(update.node) else {
      continue;
    };
    let state = tile.state_mut();
    for (index, values) in update.cells {
      state.cell_mut(index).copy_from_slice(&values);
    }
  }
  stats
}

/// Leaf neighbors of `leaf` over all directions (de-duplicated), and the
/// number of directions without any.
fn neighbor_tiles<'a, const D: usize, L: Location<D>>(
  mesh: &'a Mesh<D, L>,
  leaf: NodeIdx,
) -> (SmallVec<[&'a Tile<D>; 32]>, usize) {
  let mut tiles: SmallVec<[&Tile<D>; 32]> = SmallVec::new();
  let mut absent = 0;
  for direction in Direction::<D>::all() {
    let found = leaf_neighbors(mesh.tree(), leaf, direction);
    if found.is_empty() {
      absent += 1;
    }
    for node in found {
      if let Some(tile) = mesh.tile(node) {
        if !tiles.iter().any(|t| t.node() == node) {
          tiles.push(tile);
        }
      }
    }
  }
  (tiles, absent)
}

fn gather_copy_restrict<const D: usize, L: Location<D>>(
  mesh: &Mesh<D, L>,
  leaf: NodeIdx,
) -> TileUpdates {
  let mut stats = HaloExchangeStats::default();
  let mut cells = Vec::new();
  let Some(tile) = mesh.tile(leaf) else {
    return TileUpdates { node: leaf, cells, stats };
  };

  let (neighbors, absent) = neighbor_tiles(mesh, leaf);
  stats.absent_directions = absent;
  let same: SmallVec<[&Tile<D>; 32]> = neighbors
    .iter()
    .copied()
    .filter(|n| n.level() == tile.level())
    .collect();
  let has_finer = neighbors.iter().any(|n| n.level() > tile.level());

  let layout = tile.layout();
  layout.for_each_halo(|halo| {
    let x = tile.cell_centroid(halo);
    for neighbor in &same {
      if let Some(source) = neighbor.internal_cell_containing(x) {
        cells.push((layout.index(halo), CellValues::from_slice(neighbor.get(source))));
        stats.copied_cells += 1;
        return;
      }
    }
    if !has_finer {
      return;
    }
    // A halo cell over a refined region is covered by finer leaves only,
    // possibly several of them at different levels.
    let Some(covering) = mesh.leaf_containing(x) else {
      return;
    };
    if mesh.tree().level(covering) <= tile.level() {
      return;
    }
    if let Some(values) = restrict(mesh, x, tile.cell_length()) {
      cells.push((layout.index(halo), values));
      stats.restricted_cells += 1;
    }
  });

  TileUpdates { node: leaf, cells, stats }
}

fn gather_project<const D: usize, L: Location<D>>(
  mesh: &Mesh<D, L>,
  leaf: NodeIdx,
  limiter: Limiter,
) -> TileUpdates {
  let mut stats = HaloExchangeStats::default();
  let mut cells = Vec::new();
  let Some(tile) = mesh.tile(leaf) else {
    return TileUpdates { node: leaf, cells, stats };
  };

  let (neighbors, _) = neighbor_tiles(mesh, leaf);
  let coarser: SmallVec<[&Tile<D>; 32]> = neighbors
    .into_iter()
    .filter(|n| n.level() < tile.level())
    .collect();
  if coarser.is_empty() {
    return TileUpdates { node: leaf, cells, stats };
  }

  let layout = tile.layout();
  layout.for_each_halo(|halo| {
    let x = tile.cell_centroid(halo);
    for neighbor in &coarser {
      if let Some(source) = neighbor.internal_cell_containing(x) {
        cells.push((layout.index(halo), project(neighbor, source, x, limiter)));
        stats.projected_cells += 1;
        return;
      }
    }
  });

  TileUpdates { node: leaf, cells, stats }
}

/// Volume average of the leaf cells covering the box of edge `length`
/// centred at `x`, or `None` if part of the box has no leaf.
///
/// Box and cell edges all lie on dyadic subdivisions of one cell grid, so a
/// box no larger than the cell holding its centre lies inside that cell.
/// Larger boxes are split into their `2^D` halves:
///
/// ```text
///   ┌───────────┐        ┌─────┬─────┐
///   │           │        │ a   │  b  │   mean(a, b, c, d), where each
///   │     x     │  -->   ├─────┼─────┤   part recurses until one leaf
///   │           │        │ c   │  d  │   cell covers it
///   └───────────┘        └─────┴─────┘
/// ```
fn restrict<const D: usize, L: Location<D>>(
  mesh: &Mesh<D, L>,
  x: DVec3,
  length: f64,
) -> Option<CellValues> {
  let leaf = mesh.leaf_containing(x)?;
  let tile = mesh.tile(leaf)?;
  // Lengths differ by powers of two, so 3/4 separates "at least" from "half".
  if tile.cell_length() > 0.75 * length {
    let source = tile.internal_cell_containing(x)?;
    return Some(CellValues::from_slice(tile.get(source)));
  }

  let parts = 1usize << D;
  let quarter = 0.25 * length;
  let mut sum: CellValues = SmallVec::from_elem(0.0, tile.state().variables());
  for part in 0..parts {
    let mut p = x;
    for d in 0..D {
      p[d] += if (part >> d) & 1 == 1 { quarter } else { -quarter };
    }
    let values = restrict(mesh, p, 0.5 * length)?;
    for (acc, v) in sum.iter_mut().zip(&values) {
      *acc += v;
    }
  }

  let weight = 1.0 / parts as f64;
  for acc in sum.iter_mut() {
    *acc *= weight;
  }
  Some(sum)
}

/// Limited linear reconstruction of the coarse cell `source` evaluated at
/// `x`: `u + sum_d slope_d / dx * (x - x_c)_d`.
///
/// Reads the face neighbors of `source`, which may be halo cells of the
/// coarse tile.
fn project<const D: usize>(
  coarse: &Tile<D>,
  source: CellCoord<D>,
  x: DVec3,
  limiter: Limiter,
) -> CellValues {
  let layout = coarse.layout();
  let dx = coarse.cell_length();
  let centroid = coarse.cell_centroid(source);
  let center = coarse.get(source);

  let mut values = CellValues::from_slice(center);
  for d in 0..D {
    let lower = coarse.get(layout.at(source, d, -1));
    let upper = coarse.get(layout.at(source, d, 1));
    let delta = (x[d] - centroid[d]) / dx;
    for (v, value) in values.iter_mut().enumerate() {
      let slope = limiter.slope(center[v] - lower[v], upper[v] - center[v]);
      *value += slope * delta;
    }
  }
  values
}

#[cfg(test)]
#[path = "exchange_test.rs"]
mod exchange_test;
