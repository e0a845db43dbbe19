//! Node neighbor resolution across faces, edges and corners.
//!
//! Two questions are answered here:
//!
//! - [`node_neighbor`]: which node sits next to `node` at the **same level**
//!   along a direction? Absent across the domain boundary or where that part
//!   of the tree is not refined as deep.
//! - [`leaf_neighbors`]: which **leaves** touch leaf `leaf` across a
//!   direction, whatever their level?
//!
//! ```text
//!   same level        finer               coarser
//!   ┌───┬───┐        ┌───┬─┬─┐           ┌───┬───────┐
//!   │ L │ N │        │   │n│ │           │ L │       │
//!   └───┴───┘        │ L ├─┼─┤           ├───┤   N   │
//!                    │   │n│ │           │   │       │
//!                    └───┴─┴─┘           └───┴───────┘
//! ```
//!
//! A finer neighbor is any leaf below the same-level neighbor whose children
//! stay on the side facing `leaf` along every axis of the direction. A coarser
//! neighbor is the leaf ancestor of the shifted location.

use smallvec::SmallVec;

use super::compact::CompactTree;
use super::location::Location;
use super::manifold::Direction;
use super::relations::relative_child_position;
use crate::types::NodeIdx;

/// Same-level location one step from `location` along `direction`, or `None`
/// outside the root domain.
#[inline]
pub fn neighbor_location<const D: usize, L: Location<D>>(
  location: &L,
  direction: Direction<D>,
) -> Option<L> {
  location.shift(direction.offset())
}

/// Same-level neighbor of `node` along `direction`.
///
/// Returns `None` if the neighbor lies outside the domain or is not a node
/// of the tree.
pub fn node_neighbor<const D: usize, L: Location<D>>(
  tree: &CompactTree<D, L>,
  node: NodeIdx,
  direction: Direction<D>,
) -> Option<NodeIdx> {
  let location = tree.location(node);
  neighbor_location(&location, direction).and_then(|neighbor| tree.node_at(&neighbor))
}

/// Leaves adjacent to `leaf` across `direction`, at any level.
///
/// Returns the same-level leaf, the finer leaves touching the shared
/// face/edge/corner (in depth-first order), or the enclosing coarser leaf.
/// Empty across the domain boundary.
pub fn leaf_neighbors<const D: usize, L: Location<D>>(
  tree: &CompactTree<D, L>,
  leaf: NodeIdx,
  direction: Direction<D>,
) -> SmallVec<[NodeIdx; 4]> {
  debug_assert!(tree.is_leaf(leaf), "node {} is not a leaf", leaf);
  let mut out = SmallVec::new();
  let Some(target) = neighbor_location(&tree.location(leaf), direction) else {
    return out;
  };

  match tree.node_at(&target) {
    Some(node) if tree.is_leaf(node) => out.push(node),
    Some(node) => collect_facing_leaves(tree, node, direction, &mut out),
    None => {
      let mut current = target;
      while let Some(parent) = current.parent() {
        if let Some(node) = tree.node_at(&parent) {
          if tree.is_leaf(node) {
            out.push(node);
          }
          break;
        }
        current = parent;
      }
    }
  }
  out
}

/// Union of [`leaf_neighbors`] over every direction, de-duplicated, in order
/// of first appearance.
pub fn all_leaf_neighbors<const D: usize, L: Location<D>>(
  tree: &CompactTree<D, L>,
  leaf: NodeIdx,
) -> SmallVec<[NodeIdx; 32]> {
  let mut out: SmallVec<[NodeIdx; 32]> = SmallVec::new();
  for direction in Direction::<D>::all() {
    for neighbor in leaf_neighbors(tree, leaf, direction) {
      if !out.contains(&neighbor) {
        out.push(neighbor);
      }
    }
  }
  out
}

/// Leaves below `node` lying on the face opposite to `direction`.
fn collect_facing_leaves<const D: usize, L: Location<D>>(
  tree: &CompactTree<D, L>,
  node: NodeIdx,
  direction: Direction<D>,
  out: &mut SmallVec<[NodeIdx; 4]>,
) {
  let offset = direction.offset();
  for child in tree.children(node) {
    let location = tree.location(child);
    let rcp = relative_child_position::<D>(location.child_position(location.level()));
    let facing = (0..D).all(|d| offset[d] == 0 || rcp[d] == -offset[d]);
    if !facing {
      continue;
    }
    if tree.is_leaf(child) {
      out.push(child);
    } else {
      collect_facing_leaves(tree, child, direction, out);
    }
  }
}

#[cfg(test)]
#[path = "neighbor_test.rs"]
mod neighbor_test;
