//! OctreeConfig - root cube, construction threshold and query policies.

use glam::Vec3;

use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MIN_VOXEL_SIZE};
use crate::error::OctreeError;

/// How a child's color is derived from its parent at subdivision time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorPolicy {
  /// Children copy the parent color.
  Inherit,
  /// Child `i` gets `parent_color * i / 8` (decorative gradient).
  #[default]
  IndexGradient,
}

impl ColorPolicy {
  #[inline]
  pub fn child_color(self, parent: Vec3, octant: usize) -> Vec3 {
    match self {
      ColorPolicy::Inherit => parent,
      ColorPolicy::IndexGradient => parent * (octant as f32 / 8.0),
    }
  }
}

/// Order in which `march` explores the children of an interior node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraversalOrder {
  /// Scan children 0..8 and accept the first one whose subtree hits.
  ///
  /// Cheap, but may return a farther hit than a later-indexed child holds.
  #[default]
  IndexOrder,
  /// Explore every entered child and keep the closest hit.
  Nearest,
}

/// Configuration for octree construction and marching.
#[derive(Clone, Debug, PartialEq)]
pub struct OctreeConfig {
  /// World-space center of the root cube. Node positions are stored
  /// relative to it.
  pub origin: Vec3,

  /// Color of the root voxel.
  pub root_color: Vec3,

  /// Edge length of the root cube.
  pub root_size: f32,

  /// Uniform construction stops once a voxel is at most this large.
  pub min_voxel_size: f32,

  /// Deepest level `construct_octree` and `subdivide_recursively` may
  /// create.
  pub max_depth: u32,

  /// Child color derivation.
  pub color_policy: ColorPolicy,

  /// Child exploration order during marching.
  pub traversal: TraversalOrder,
}

impl Default for OctreeConfig {
  fn default() -> Self {
    Self {
      origin: Vec3::ZERO,
      root_color: Vec3::new(1.0, 0.5, 0.5),
      root_size: 1.0,
      min_voxel_size: DEFAULT_MIN_VOXEL_SIZE,
      max_depth: DEFAULT_MAX_DEPTH,
      color_policy: ColorPolicy::default(),
      traversal: TraversalOrder::default(),
    }
  }
}

impl OctreeConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_origin(mut self, origin: Vec3) -> Self {
    self.origin = origin;
    self
  }

  pub fn with_root_color(mut self, color: Vec3) -> Self {
    self.root_color = color;
    self
  }

  pub fn with_root_size(mut self, size: f32) -> Self {
    self.root_size = size;
    self
  }

  pub fn with_min_voxel_size(mut self, size: f32) -> Self {
    self.min_voxel_size = size;
    self
  }

  pub fn with_max_depth(mut self, depth: u32) -> Self {
    self.max_depth = depth;
    self
  }

  pub fn with_color_policy(mut self, policy: ColorPolicy) -> Self {
    self.color_policy = policy;
    self
  }

  pub fn with_traversal(mut self, order: TraversalOrder) -> Self {
    self.traversal = order;
    self
  }

  /// Number of halvings uniform construction performs before every leaf is
  /// at most `min_voxel_size`.
  pub fn uniform_levels(&self) -> u32 {
    let mut size = self.root_size;
    let mut levels = 0;
    while size > self.min_voxel_size {
      size *= 0.5;
      levels += 1;
    }
    levels
  }

  /// Reject sizes that cannot describe a cube.
  ///
  /// Depth is not checked here: a tree may only ever be refined by
  /// `subdivide_recursively`, so the limit applies when subdividing.
  pub fn validate(&self) -> Result<(), OctreeError> {
    if !(self.root_size.is_finite() && self.root_size > 0.0) {
      return Err(OctreeError::InvalidRootSize(self.root_size));
    }
    if !(self.min_voxel_size.is_finite() && self.min_voxel_size > 0.0) {
      return Err(OctreeError::InvalidMinVoxelSize(self.min_voxel_size));
    }
    Ok(())
  }

  /// Fail with `TooDeep` if a subtree would reach past `max_depth`.
  pub fn check_depth(&self, levels: u32) -> Result<(), OctreeError> {
    if levels > self.max_depth {
      return Err(OctreeError::TooDeep {
        levels,
        max: self.max_depth,
      });
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
