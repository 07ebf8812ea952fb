//! Pre-order flattening of the tree for one-shot bulk upload.
//!
//! `count_voxels` and `flatten_octree` are both defined on [`PreOrder`], so
//! the size of the buffer and the number of records written can never
//! disagree.

use log::trace;

use super::{NodeId, Octree};
use crate::error::OctreeError;
use crate::grid_buffer::GpuBuffer;
use crate::types::{GpuVoxel, Voxel};

/// Depth-first pre-order walk: a node, then its children 0..8 recursively.
pub struct PreOrder<'a> {
  octree: &'a Octree,
  stack: Vec<NodeId>,
}

impl<'a> PreOrder<'a> {
  fn new(octree: &'a Octree, start: NodeId) -> Self {
    let stack = if octree.node(start).is_some() {
      vec![start]
    } else {
      Vec::new()
    };
    Self { octree, stack }
  }
}

impl Iterator for PreOrder<'_> {
  type Item = NodeId;

  fn next(&mut self) -> Option<NodeId> {
    let id = self.stack.pop()?;
    if let Some(children) = self.octree.get(id).children {
      // Reversed so child 0 is popped first.
      self.stack.extend(children.iter().rev());
    }
    Some(id)
  }
}

impl Octree {
  /// Pre-order walk of the subtree rooted at `start`.
  pub fn walk(&self, start: NodeId) -> PreOrder<'_> {
    PreOrder::new(self, start)
  }

  /// Number of nodes in the subtree (one record per node when flattened).
  pub fn count_voxels(&self, start: NodeId) -> usize {
    self.walk(start).count()
  }

  /// Write each node's bounding voxel, in world space, into `out` starting
  /// at `*cursor`, advancing the cursor.
  ///
  /// Stops with `FlattenOverflow` instead of writing past the end of `out`.
  pub fn flatten_octree(
    &self,
    start: NodeId,
    out: &mut [Voxel],
    cursor: &mut usize,
  ) -> Result<(), OctreeError> {
    let origin = self.config.origin;
    let capacity = out.len();
    for id in self.walk(start) {
      let slot = out
        .get_mut(*cursor)
        .ok_or(OctreeError::FlattenOverflow { capacity })?;
      *slot = self.get(id).voxel().translated(origin);
      *cursor += 1;
    }
    Ok(())
  }

  /// Whole tree flattened into a freshly sized vector.
  pub fn flatten(&self) -> Vec<Voxel> {
    let origin = self.config.origin;
    self
      .walk(NodeId::ROOT)
      .map(|id| self.get(id).voxel().translated(origin))
      .collect()
  }

  /// Upload the flattened tree as tightly packed `GpuVoxel` records.
  ///
  /// Returns the number of records written.
  pub fn bind_to_gpu<B: GpuBuffer + ?Sized>(&self, buffer: &mut B) -> Result<usize, OctreeError> {
    let count = self.count_voxels(NodeId::ROOT);
    let mut data = vec![Voxel::EMPTY; count];
    let mut cursor = 0;
    self.flatten_octree(NodeId::ROOT, &mut data, &mut cursor)?;

    let records: Vec<GpuVoxel> = data.into_iter().map(GpuVoxel::from).collect();
    buffer.resize(std::mem::size_of_val(records.as_slice()));
    buffer.write(bytemuck::cast_slice(&records), 0)?;

    trace!("bind_to_gpu: uploaded {} voxels", cursor);
    Ok(cursor)
  }
}

#[cfg(test)]
#[path = "flatten_test.rs"]
mod flatten_test;
