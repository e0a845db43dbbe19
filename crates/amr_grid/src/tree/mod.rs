//! Hierarchical tree: location codes, relations, compact index, neighbors.
//!
//! The tree subdivides a square (1D: segment, 3D: cube) root domain. Every
//! node splits into `2^D` equal children.
//!
//! # Level Convention
//!
//! Level 0 = root (coarsest), higher level = finer.
//!
//! ```text
//! Node length = root_length / 2^level
//! ```
//!
//! # Module Structure
//!
//! - [`location`]: `Location` trait - depth-first ordered node addresses
//! - [`interleaved`] / [`deinterleaved`]: the two location layouts
//! - [`relations`]: closed-form counts and child geometry
//! - [`manifold`]: `Manifold` / `Direction` - enumerable neighbor directions
//! - [`compact`]: `CompactTree` - dense node indices over sorted locations
//! - [`neighbor`]: same-level and cross-level neighbor resolution
//! - [`serialization`]: read/write of compact, sorted trees

pub mod compact;
pub mod deinterleaved;
pub mod interleaved;
pub mod location;
pub mod manifold;
pub mod neighbor;
pub mod relations;
pub mod serialization;

// Re-exports
pub use compact::CompactTree;
pub use deinterleaved::DeinterleavedLocation;
pub use interleaved::InterleavedLocation;
pub use location::{depth_first_cmp, Location, Word};
pub use manifold::{Direction, Manifold};
pub use neighbor::{all_leaf_neighbors, leaf_neighbors, neighbor_location, node_neighbor};
pub use serialization::{read_tree, write_tree, TREE_FORMAT_VERSION};
