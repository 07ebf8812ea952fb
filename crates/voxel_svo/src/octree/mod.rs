//! Sparse voxel octree with visibility bookkeeping.
//!
//! The tree is stored as an arena: `Octree` owns a `Vec<Node>` and every
//! parent/child link is a `NodeId` into it. Nodes are never removed, so ids
//! stay valid for the lifetime of the octree.
//!
//! # Coordinate frames
//!
//! Node positions are octree-local: the root cube is centered at the local
//! origin and `OctreeConfig::origin` places it in the world. Rays enter in
//! world space; voxels leave (`get_voxels_with_depth`, `flatten`) in world
//! space.
//!
//! # Module Structure
//!
//! - [`node`]: `Node`, `NodeId`, `DrawTurn`
//! - [`bounds`]: `Aabb3` and the slab ray test
//! - [`config`]: `OctreeConfig`, `ColorPolicy`, `TraversalOrder`
//! - [`build`]: uniform and fixed-depth subdivision
//! - [`march`]: ray marching
//! - [`visibility`]: draw-turn tagging and visible voxel collection
//! - [`flatten`]: pre-order serialization for bulk upload

pub mod bounds;
pub mod build;
pub mod config;
pub mod flatten;
pub mod march;
pub mod node;
pub mod visibility;

// Re-exports
pub use bounds::Aabb3;
pub use config::{ColorPolicy, OctreeConfig, TraversalOrder};
pub use flatten::PreOrder;
pub use march::MarchHit;
pub use node::{DrawTurn, Node, NodeId};
pub use visibility::TaggingPolicy;

use glam::Vec3;

use crate::constants::OCTANTS;
use crate::error::OctreeError;
use crate::types::Voxel;

/// Arena-backed sparse voxel octree.
#[derive(Clone, Debug)]
pub struct Octree {
  nodes: Vec<Node>,
  config: OctreeConfig,
}

impl Octree {
  /// Create an octree holding just the root voxel.
  pub fn new(config: OctreeConfig) -> Result<Self, OctreeError> {
    config.validate()?;
    let root = Node::new(
      Voxel::new(Vec3::ZERO, config.root_color, config.root_size),
      None,
      0,
    );
    Ok(Self {
      nodes: vec![root],
      config,
    })
  }

  /// Root at world `position` with the given color and edge length, using
  /// defaults for everything else.
  pub fn with_root(position: Vec3, color: Vec3, root_size: f32) -> Result<Self, OctreeError> {
    Self::new(
      OctreeConfig::default()
        .with_origin(position)
        .with_root_color(color)
        .with_root_size(root_size),
    )
  }

  #[inline]
  pub fn config(&self) -> &OctreeConfig {
    &self.config
  }

  /// World-space center of the root cube.
  #[inline]
  pub fn origin(&self) -> Vec3 {
    self.config.origin
  }

  #[inline]
  pub fn root(&self) -> NodeId {
    NodeId::ROOT
  }

  /// Total number of nodes in the arena.
  #[inline]
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  /// Never true: the root always exists.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Look up a node. `None` for ids from another octree.
  #[inline]
  pub fn node(&self, id: NodeId) -> Option<&Node> {
    self.nodes.get(id.index())
  }

  pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, OctreeError> {
    self.nodes.get_mut(id.index()).ok_or(OctreeError::UnknownNode(id))
  }

  /// Node lookup for ids produced by this octree's own traversal.
  #[inline]
  pub(crate) fn get(&self, id: NodeId) -> &Node {
    &self.nodes[id.index()]
  }

  /// Iterate over all nodes with their ids, in allocation order.
  pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
    self
      .nodes
      .iter()
      .enumerate()
      .map(|(i, node)| (NodeId(i as u32), node))
  }

  /// Ids of all leaves.
  pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
    self
      .iter()
      .filter(|(_, node)| node.is_leaf())
      .map(|(id, _)| id)
  }

  /// Slot `slot` of node `id`, translated to world space.
  pub fn world_voxel(&self, id: NodeId, slot: usize) -> Option<Voxel> {
    self
      .node(id)
      .and_then(|node| node.voxels.get(slot))
      .map(|voxel| voxel.translated(self.config.origin))
  }

  /// Voxel hit by a march, in world space.
  pub fn hit_voxel(&self, hit: &MarchHit) -> Option<Voxel> {
    self.world_voxel(hit.node, hit.slot)
  }

  /// Recolor one slot. Color is the only mutable voxel attribute.
  pub fn set_color(&mut self, id: NodeId, slot: usize, color: Vec3) -> Result<(), OctreeError> {
    if slot >= OCTANTS {
      return Err(OctreeError::SlotOutOfRange(slot));
    }
    self.node_mut(id)?.voxels[slot].color = color;
    Ok(())
  }

  /// Place an extra payload voxel (octree-local position) in slot 1-7 of a
  /// leaf.
  pub fn set_voxel(&mut self, id: NodeId, slot: usize, voxel: Voxel) -> Result<(), OctreeError> {
    if slot >= OCTANTS {
      return Err(OctreeError::SlotOutOfRange(slot));
    }
    if slot == 0 {
      return Err(OctreeError::ReservedSlot);
    }
    let node = self.node_mut(id)?;
    if !node.is_leaf() {
      return Err(OctreeError::NotALeaf(id));
    }
    node.voxels[slot] = voxel;
    Ok(())
  }

  /// Number of levels below the root (0 for a lone root).
  pub fn height(&self) -> u32 {
    self.nodes.iter().map(Node::depth).max().unwrap_or(0)
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
