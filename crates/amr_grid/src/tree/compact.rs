//! CompactTree - dense node indices over a depth-first sorted location array.
//!
//! Every node (internal and leaf) is stored exactly once, in ascending
//! location order. Because the order is depth-first, a node's descendants
//! form the contiguous run directly after it:
//!
//! ```text
//!   index:  0     1      2       3       4       5      6      7      8
//!   node:   root  [0]    [1]     [1,0]   [1,1]   [1,2]  [1,3]  [2]    [3]
//!                        └──── subtree of [1] ────────────────┘
//! ```
//!
//! - location → index: binary search, O(log N)
//! - index → location: array access, O(1)
//! - leaf test: "is the next entry a descendant?", O(1)
//!
//! A [`NodeIdx`] is only meaningful until the next [`refine`](CompactTree::refine)
//! or [`coarsen`](CompactTree::coarsen).

use std::collections::HashSet;

use rayon::prelude::*;
use smallvec::SmallVec;

use super::interleaved::InterleavedLocation;
use super::location::Location;
use super::relations::nodes_until_uniform_level;
use crate::error::TreeError;
use crate::types::{ChildPos, Level, NodeIdx};

/// Compact, depth-first sorted tree index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactTree<const D: usize, L: Location<D> = InterleavedLocation<D>> {
  locations: Vec<L>,
}

impl<const D: usize, L: Location<D>> CompactTree<D, L> {
  /// Tree with the root node only.
  pub fn new() -> Self {
    Self {
      locations: vec![L::root()],
    }
  }

  /// Tree refined uniformly down to `level` (all leaves at `level`).
  ///
  /// # Panics
  /// If `level > L::MAX_LEVEL`.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "tree::uniform"))]
  pub fn uniform(level: Level) -> Self {
    assert!(
      level <= L::MAX_LEVEL,
      "level {} exceeds the maximum level {} of the location type",
      level,
      L::MAX_LEVEL
    );
    let mut locations = Vec::with_capacity(nodes_until_uniform_level(D, level) as usize);
    push_subtree(L::root(), level, &mut locations);
    Self { locations }
  }

  /// Build a tree from an arbitrary collection of locations.
  ///
  /// Missing ancestors (the root included) are added, then the set is sorted
  /// and de-duplicated. This is the compaction step every topology change
  /// goes through.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "tree::from_locations"))]
  pub fn from_locations<I: IntoIterator<Item = L>>(locations: I) -> Self {
    let mut all = vec![L::root()];
    for location in locations {
      let mut current = location;
      all.push(current);
      while let Some(parent) = current.parent() {
        all.push(parent);
        current = parent;
      }
    }

    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("sort_and_dedup", nodes = all.len()).entered();
      all.par_sort_unstable();
      all.dedup();
    }

    Self { locations: all }
  }

  /// Adopt an already sorted location array, verifying the compact tree
  /// invariants.
  ///
  /// Checks, in order for every entry: well formed, strictly ascending
  /// (duplicates are reported as [`TreeError::NotCompact`]), and parent
  /// present. The first entry must be the root.
  pub fn from_sorted_locations(locations: Vec<L>) -> Result<Self, TreeError> {
    if locations.is_empty() {
      return Err(TreeError::Empty);
    }

    for (position, location) in locations.iter().enumerate() {
      if !location.is_valid() {
        return Err(TreeError::InvalidLocation { position });
      }
      if position == 0 {
        if !location.is_root() {
          return Err(TreeError::MissingParent { position });
        }
        continue;
      }

      let previous = &locations[position - 1];
      if previous == location {
        return Err(TreeError::NotCompact { position });
      }
      if previous > location {
        return Err(TreeError::NotSorted { position });
      }

      // The prefix is sorted, so the parent can be found by binary search.
      let has_parent = location
        .parent()
        .is_some_and(|parent| locations[..position].binary_search(&parent).is_ok());
      if !has_parent {
        return Err(TreeError::MissingParent { position });
      }
    }

    Ok(Self { locations })
  }

  /// Adopt `locations` as is, skipping every invariant check.
  #[cfg(test)]
  pub(crate) fn from_unchecked(locations: Vec<L>) -> Self {
    Self { locations }
  }

  // ===========================================================================
  // Queries
  // ===========================================================================

  /// Number of nodes (internal and leaf).
  #[inline]
  pub fn len(&self) -> usize {
    self.locations.len()
  }

  /// Always false for a constructed tree (the root is always present).
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.locations.is_empty()
  }

  /// Sorted location array.
  #[inline]
  pub fn locations(&self) -> &[L] {
    &self.locations
  }

  /// Node index of `location`, or `None` if the tree has no such node.
  ///
  /// Binary search; every constructor and mutation keeps the array sorted.
  pub fn node_at(&self, location: &L) -> Option<NodeIdx> {
    self.locations.binary_search(location).ok().map(NodeIdx)
  }

  /// Whether the tree contains `location`.
  #[inline]
  pub fn contains(&self, location: &L) -> bool {
    self.node_at(location).is_some()
  }

  /// Location of `node`.
  ///
  /// # Panics
  /// If `node` is out of range.
  #[inline]
  pub fn location(&self, node: NodeIdx) -> L {
    self.locations[node.index()]
  }

  #[inline]
  pub fn level(&self, node: NodeIdx) -> Level {
    self.locations[node.index()].level()
  }

  /// Parent of `node`, `None` for the root.
  pub fn parent(&self, node: NodeIdx) -> Option<NodeIdx> {
    self
      .location(node)
      .parent()
      .and_then(|parent| self.node_at(&parent))
  }

  /// Children of `node` present in the tree, in child position order.
  /// Empty for a leaf.
  pub fn children(&self, node: NodeIdx) -> SmallVec<[NodeIdx; 8]> {
    if self.is_leaf(node) {
      return SmallVec::new();
    }
    let location = self.location(node);
    ChildPos::all::<D>()
      .filter_map(|position| location.child(position))
      .filter_map(|child| self.node_at(&child))
      .collect()
  }

  /// Whether `node` has no children.
  #[inline]
  pub fn is_leaf(&self, node: NodeIdx) -> bool {
    let location = self.location(node);
    self
      .locations
      .get(node.index() + 1)
      .map_or(true, |next| !location.is_ancestor_of(next))
  }

  /// All node indices, in depth-first order.
  pub fn nodes(&self) -> impl Iterator<Item = NodeIdx> + '_ {
    (0..self.locations.len()).map(NodeIdx)
  }

  /// Leaf node indices, in depth-first order.
  pub fn leaves(&self) -> impl Iterator<Item = NodeIdx> + '_ {
    self.nodes().filter(|&node| self.is_leaf(node))
  }

  /// Number of leaves.
  pub fn leaf_count(&self) -> usize {
    self.leaves().count()
  }

  /// Deepest level present.
  pub fn max_level(&self) -> Level {
    self.locations.iter().map(|l| l.level()).max().unwrap_or(0)
  }

  /// No location is listed more than once.
  pub fn is_compact(&self) -> bool {
    let mut seen = HashSet::with_capacity(self.locations.len());
    self.locations.iter().all(|l| seen.insert(*l))
  }

  /// Locations appear in ascending depth-first order.
  pub fn is_depth_first_sorted(&self) -> bool {
    self.locations.windows(2).all(|w| w[0] <= w[1])
  }

  // ===========================================================================
  // Mutation
  // ===========================================================================

  /// Add the `2^D` children of leaf `node`.
  ///
  /// Returns `false` (and leaves the tree unchanged) if `node` is not a leaf
  /// or already sits at the deepest encodable level.
  pub fn refine(&mut self, node: NodeIdx) -> bool {
    if !self.is_leaf(node) {
      return false;
    }
    let location = self.location(node);
    if location.level() >= L::MAX_LEVEL {
      return false;
    }
    let children: SmallVec<[L; 8]> = ChildPos::all::<D>()
      .filter_map(|position| location.child(position))
      .collect();
    let at = node.index() + 1;
    self.locations.splice(at..at, children);
    true
  }

  /// Remove every descendant of `node`, turning it into a leaf.
  ///
  /// Returns the number of nodes removed.
  pub fn coarsen(&mut self, node: NodeIdx) -> usize {
    let location = self.location(node);
    let start = node.index() + 1;
    let end = start
      + self.locations[start..]
        .iter()
        .take_while(|l| location.is_ancestor_of(l))
        .count();
    self.locations.drain(start..end);
    end - start
  }
}

impl<const D: usize, L: Location<D>> Default for CompactTree<D, L> {
  fn default() -> Self {
    Self::new()
  }
}

/// Depth-first emission of every node below `location` down to `level`.
fn push_subtree<const D: usize, L: Location<D>>(location: L, level: Level, out: &mut Vec<L>) {
  out.push(location);
  if location.level() < level {
    for position in ChildPos::all::<D>() {
      let mut child = location;
      child.push(position);
      push_subtree(child, level, out);
    }
  }
}

#[cfg(test)]
#[path = "compact_test.rs"]
mod compact_test;
