//! Tree construction: atomic 8-way subdivision, uniform halving down to the
//! minimum voxel size, and fixed-depth subdivision.

use log::debug;

use super::{Node, NodeId, Octree};
use crate::constants::OCTANTS;
use crate::error::OctreeError;
use crate::types::Voxel;

impl Octree {
  /// Split a leaf into eight children.
  ///
  /// Child `i` is centered at `parent ± child_size` per axis (octant bits
  /// X=0, Y=1, Z=2) with half the parent's edge length, colored by the
  /// configured `ColorPolicy`. All eight are created together. Calling this
  /// on an interior node returns its existing children unchanged.
  pub fn subdivide_node(&mut self, id: NodeId) -> Result<[NodeId; OCTANTS], OctreeError> {
    let parent = self.node(id).ok_or(OctreeError::UnknownNode(id))?;
    if let Some(children) = parent.children {
      return Ok(children);
    }

    let parent_voxel = *parent.voxel();
    let depth = parent.depth + 1;
    let child_size = parent_voxel.size * 0.5;
    let len = self.nodes.len();
    // Every new id must fit, not just the first.
    let first = u32::try_from(len + OCTANTS)
      .map(|end| end - OCTANTS as u32)
      .map_err(|_| OctreeError::ArenaFull(len))?;

    let new_children: Vec<Node> = (0..OCTANTS)
      .map(|octant| {
        let voxel = Voxel::new(
          parent.child_position(octant),
          self
            .config
            .color_policy
            .child_color(parent_voxel.color, octant),
          child_size,
        );
        Node::new(voxel, Some(id), depth)
      })
      .collect();

    self.nodes.extend(new_children);
    let children = std::array::from_fn(|i| NodeId(first + i as u32));
    self.get_mut(id).children = Some(children);
    Ok(children)
  }

  /// Subdivide every leaf until all leaves are at most `min_voxel_size`.
  ///
  /// Depth-first from the root. Existing interior nodes are descended, not
  /// rebuilt. Fails with `TooDeep` before touching the tree when reaching
  /// the threshold needs more than `max_depth` levels.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::construct"))]
  pub fn construct_octree(&mut self) -> Result<(), OctreeError> {
    self.config.check_depth(self.config.uniform_levels())?;

    let before = self.nodes.len();
    self.construct_recursive(NodeId::ROOT)?;
    debug!(
      "construct_octree: {} -> {} nodes (min voxel size {})",
      before,
      self.nodes.len(),
      self.config.min_voxel_size
    );
    Ok(())
  }

  fn construct_recursive(&mut self, id: NodeId) -> Result<(), OctreeError> {
    if self.get(id).size() <= self.config.min_voxel_size {
      return Ok(());
    }
    for child in self.subdivide_node(id)? {
      self.construct_recursive(child)?;
    }
    Ok(())
  }

  /// Subdivide `id` and its descendants `depth` levels deep, regardless of
  /// voxel size. `depth == 0` leaves the tree untouched.
  ///
  /// Fails with `TooDeep`, before subdividing anything, if the new leaves
  /// would lie deeper than `max_depth`.
  pub fn subdivide_recursively(&mut self, id: NodeId, depth: u32) -> Result<(), OctreeError> {
    let node = self.node(id).ok_or(OctreeError::UnknownNode(id))?;
    if depth == 0 {
      return Ok(());
    }
    self
      .config
      .check_depth(node.depth.saturating_add(depth))?;
    self.subdivide_levels(id, depth)
  }

  fn subdivide_levels(&mut self, id: NodeId, depth: u32) -> Result<(), OctreeError> {
    if depth == 0 {
      return Ok(());
    }
    for child in self.subdivide_node(id)? {
      self.subdivide_levels(child, depth - 1)?;
    }
    Ok(())
  }

  #[inline]
  fn get_mut(&mut self, id: NodeId) -> &mut Node {
    &mut self.nodes[id.index()]
  }
}

#[cfg(test)]
#[path = "build_test.rs"]
mod build_test;
