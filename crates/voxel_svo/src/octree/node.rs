//! Node - one cell of the arena-backed octree.
//!
//! Nodes are owned by the `Octree`'s arena and addressed by `NodeId`.
//! Children are stored as indices, never as owning pointers, and the parent
//! link is a plain index used to walk visibility tags upward.

use glam::Vec3;

use crate::constants::{octant_signs, OCTANTS};
use crate::types::Voxel;

/// Identifier of a visibility sweep. One turn per rendered frame.
pub type DrawTurn = u32;

/// Index of a node in its octree's arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
  /// The root of every octree.
  pub const ROOT: Self = Self(0);

  #[inline]
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Octree cell.
///
/// Slot 0 holds the node's own cube. On leaves, slots 1-7 may carry extra
/// payload voxels. A node is either a leaf (`children == None`) or has all
/// eight children.
#[derive(Clone, Debug)]
pub struct Node {
  pub(crate) voxels: [Voxel; OCTANTS],
  pub(crate) children: Option<[NodeId; OCTANTS]>,
  pub(crate) parent: Option<NodeId>,
  pub(crate) draw_turn: Option<DrawTurn>,
  pub(crate) depth: u32,
}

impl Node {
  pub(crate) fn new(voxel: Voxel, parent: Option<NodeId>, depth: u32) -> Self {
    let mut voxels = [Voxel::EMPTY; OCTANTS];
    voxels[0] = voxel;
    Self {
      voxels,
      children: None,
      parent,
      draw_turn: None,
      depth,
    }
  }

  /// The node's own cube (slot 0).
  #[inline]
  pub fn voxel(&self) -> &Voxel {
    &self.voxels[0]
  }

  /// All eight slots, including unused ones.
  #[inline]
  pub fn voxels(&self) -> &[Voxel; OCTANTS] {
    &self.voxels
  }

  /// Center of the node's cube, octree-local.
  #[inline]
  pub fn position(&self) -> Vec3 {
    self.voxels[0].position
  }

  /// Edge length of the node's cube.
  #[inline]
  pub fn size(&self) -> f32 {
    self.voxels[0].size
  }

  #[inline]
  pub fn children(&self) -> Option<&[NodeId; OCTANTS]> {
    self.children.as_ref()
  }

  #[inline]
  pub fn child(&self, octant: usize) -> Option<NodeId> {
    self.children.and_then(|c| c.get(octant).copied())
  }

  #[inline]
  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.children.is_none()
  }

  /// Distance from the root (root = 0).
  #[inline]
  pub fn depth(&self) -> u32 {
    self.depth
  }

  /// Most recent turn this node was tagged in, `None` if never drawn.
  #[inline]
  pub fn draw_turn(&self) -> Option<DrawTurn> {
    self.draw_turn
  }

  /// True if tagged in exactly `turn`.
  #[inline]
  pub fn is_visible_in(&self, turn: DrawTurn) -> bool {
    self.draw_turn == Some(turn)
  }

  /// Tag the node with `turn`.
  ///
  /// Tags never move backwards: an older turn leaves the node unchanged.
  /// Returns true if the stored tag changed.
  #[inline]
  pub(crate) fn tag(&mut self, turn: DrawTurn) -> bool {
    match self.draw_turn {
      Some(current) if current >= turn => false,
      _ => {
        self.draw_turn = Some(turn);
        true
      }
    }
  }

  /// Center of child `octant`: offset by `±child_size` per axis.
  pub fn child_position(&self, octant: usize) -> Vec3 {
    let child_size = self.size() * 0.5;
    self.position() + Vec3::from_array(octant_signs(octant)) * child_size
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
