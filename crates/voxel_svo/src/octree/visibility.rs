//! Draw-turn tagging and depth-limited collection of visible voxels.
//!
//! Each sweep has its own turn number. Nodes touched in a sweep are tagged
//! with it, and stale tags are never cleared: a node counts as visible only
//! if its tag equals the current turn.
//!
//! Upward and downward propagation are separate operations:
//!
//! - `mark_visible_path`: the node and every ancestor up to the root
//! - `mark_visible_subtree`: the node and its descendants `depth` levels down
//!
//! `set_draw_turn` composes the two. Ascension happens once from the hit node
//! and never again from each tagged descendant.

use super::{DrawTurn, NodeId, Octree};
use crate::constants::OCTANTS;
use crate::error::OctreeError;
use crate::types::Voxel;

/// How a frame tags the node returned by a march.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaggingPolicy {
  /// Tag only the hit node.
  LeafOnly,
  /// Tag the hit node, all its ancestors, and descendants `depth` levels
  /// down.
  Propagated { depth: u32 },
}

impl Default for TaggingPolicy {
  fn default() -> Self {
    TaggingPolicy::Propagated { depth: 1000 }
  }
}

impl Octree {
  /// Tag `id` and every ancestor with `turn`.
  ///
  /// Returns the number of nodes whose tag changed.
  pub fn mark_visible_path(&mut self, id: NodeId, turn: DrawTurn) -> Result<usize, OctreeError> {
    let mut changed = 0;
    let mut cursor = Some(id);
    while let Some(current) = cursor {
      let node = self.node_mut(current)?;
      changed += usize::from(node.tag(turn));
      cursor = node.parent;
    }
    Ok(changed)
  }

  /// Tag `id` and its descendants down to `depth` levels (`0` = `id` only).
  ///
  /// Returns the number of nodes whose tag changed.
  pub fn mark_visible_subtree(
    &mut self,
    id: NodeId,
    turn: DrawTurn,
    depth: u32,
  ) -> Result<usize, OctreeError> {
    let mut changed = 0;
    let mut stack = vec![(id, depth)];
    while let Some((current, remaining)) = stack.pop() {
      let node = self.node_mut(current)?;
      changed += usize::from(node.tag(turn));
      if remaining == 0 {
        continue;
      }
      if let Some(children) = node.children {
        stack.extend(children.iter().map(|&child| (child, remaining - 1)));
      }
    }
    Ok(changed)
  }

  /// Tag a hit node: ancestors unconditionally, descendants to `depth`.
  pub fn set_draw_turn(
    &mut self,
    id: NodeId,
    turn: DrawTurn,
    depth: u32,
  ) -> Result<usize, OctreeError> {
    let up = self.mark_visible_path(id, turn)?;
    let down = self.mark_visible_subtree(id, turn, depth)?;
    Ok(up + down)
  }

  /// Tag according to a policy.
  pub fn tag_hit(
    &mut self,
    id: NodeId,
    turn: DrawTurn,
    policy: TaggingPolicy,
  ) -> Result<usize, OctreeError> {
    match policy {
      TaggingPolicy::LeafOnly => Ok(usize::from(self.node_mut(id)?.tag(turn))),
      TaggingPolicy::Propagated { depth } => self.set_draw_turn(id, turn, depth),
    }
  }

  /// Collect world-space voxels of nodes tagged with `turn`.
  ///
  /// Untagged nodes prune their whole subtree. At `depth <= 1` all eight
  /// slots of the node are pushed, unused ones included. At `depth > 1` the
  /// children are visited with `depth - 1`; a leaf reached there contributes
  /// nothing.
  pub fn get_voxels_with_depth(&self, id: NodeId, turn: DrawTurn, depth: u32, out: &mut Vec<Voxel>) {
    let Some(node) = self.node(id) else {
      return;
    };
    if !node.is_visible_in(turn) {
      return;
    }

    if depth <= 1 {
      let origin = self.config.origin;
      out.extend(node.voxels.iter().map(|voxel| voxel.translated(origin)));
    } else if let Some(children) = node.children {
      for child in children {
        self.get_voxels_with_depth(child, turn, depth - 1, out);
      }
    }
  }

  /// Slots of the root for `turn` (depth 1).
  pub fn get_voxels(&self, turn: DrawTurn) -> Vec<Voxel> {
    self.visible_voxels(turn, 1)
  }

  /// Voxels `depth` levels below the root that were tagged in `turn`.
  pub fn visible_voxels(&self, turn: DrawTurn, depth: u32) -> Vec<Voxel> {
    let mut out = Vec::with_capacity(OCTANTS);
    self.get_voxels_with_depth(NodeId::ROOT, turn, depth, &mut out);
    out
  }

  /// Number of nodes tagged with `turn`.
  pub fn count_visible(&self, turn: DrawTurn) -> usize {
    self
      .nodes
      .iter()
      .filter(|node| node.is_visible_in(turn))
      .count()
  }
}

#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;
