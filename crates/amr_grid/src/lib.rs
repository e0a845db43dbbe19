//! amr_grid - Spatial backbone for adaptive-mesh solvers
//!
//! This crate provides the hierarchical tree that subdivides a bounded domain
//! into axis-aligned nodes of varying refinement level, together with the
//! algorithms a block-structured adaptive solver needs on top of it:
//!
//! - **Location codes**: compact, depth-first ordered encodings of a node's
//!   position and level (interleaved and deinterleaved bit layouts)
//! - **Tree relations**: closed-form counting formulas and the relative child
//!   position table
//! - **Compact tree index**: dense node indices over a depth-first sorted,
//!   de-duplicated location array
//! - **Neighbor resolution**: face/edge/corner neighbors at the same level, and
//!   the adjacent leaves at any level
//! - **Structured tiles**: per-node cell grids with halo layers, ring
//!   iteration and closest-cell search
//! - **Halo exchange**: the two-phase copy/restrict then project protocol that
//!   keeps halo cells consistent across refinement levels
//!
//! The spatial dimension is a const generic (`D` in `1..=3`) everywhere.
//!
//! # Example
//!
//! ```ignore
//! use amr_grid::{exchange_halos, CompactTree, GridConfig, Limiter, Mesh};
//!
//! // Uniformly refined quadtree with 16 leaves
//! let tree = CompactTree::<2>::uniform(2);
//! let mut mesh = Mesh::new(tree, GridConfig::default())?;
//!
//! // Initial condition on the internal cells
//! mesh.fill_internal(|x, state| state[0] = x.x + x.y);
//!
//! let stats = exchange_halos(&mut mesh, Limiter::Minmod);
//! println!("copied {} halo cells", stats.copied_cells);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod types;

pub use config::GridConfig;
pub use error::{ConfigError, TreeError};
pub use geometry::{BoundingLength, Centroid, ContainsPoint, NodeBox};
pub use types::{ChildPos, Level, NodeIdx, Offset};

// Hierarchical tree: location codes, relations, compact index, neighbors
pub mod tree;
pub use tree::{
  node_neighbor, read_tree, write_tree, CompactTree, DeinterleavedLocation, Direction,
  InterleavedLocation, Location, Manifold,
};

// Structured tile indices
pub mod tile;
pub use tile::{CellCoord, TileLayout};

// Halo exchange between tiles of neighboring nodes
pub mod halo;
pub use halo::{
  exchange_halos, phase_one, phase_two, HaloExchangeStats, Limiter, Mesh, StateBuffer, Tile,
};

#[cfg(test)]
mod test_utils;
