//! Core value types shared by the octree, the sweep and the mesher.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::octree::Aabb3;

/// Axis-aligned colored cube.
///
/// A `size` of zero (or less) marks an unused slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voxel {
  /// Cube center.
  pub position: Vec3,
  /// Linear RGB in [0, 1].
  pub color: Vec3,
  /// Edge length.
  pub size: f32,
}

impl Voxel {
  /// Unused slot.
  pub const EMPTY: Self = Self {
    position: Vec3::ZERO,
    color: Vec3::ZERO,
    size: 0.0,
  };

  pub fn new(position: Vec3, color: Vec3, size: f32) -> Self {
    Self {
      position,
      color,
      size,
    }
  }

  /// True if this slot holds geometry.
  #[inline]
  pub fn is_occupied(&self) -> bool {
    self.size > 0.0
  }

  /// Bounding cube of this voxel.
  #[inline]
  pub fn bounds(&self) -> Aabb3 {
    Aabb3::from_center_size(self.position, self.size)
  }

  /// Same voxel shifted by `offset`.
  #[inline]
  pub fn translated(&self, offset: Vec3) -> Self {
    Self {
      position: self.position + offset,
      ..*self
    }
  }
}

impl Default for Voxel {
  fn default() -> Self {
    Self::EMPTY
  }
}

/// GPU layout of a voxel for bulk uploads (28 bytes, tightly packed).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuVoxel {
  pub position: [f32; 3],
  pub color: [f32; 3],
  pub size: f32,
}

impl From<Voxel> for GpuVoxel {
  fn from(voxel: Voxel) -> Self {
    Self {
      position: voxel.position.to_array(),
      color: voxel.color.to_array(),
      size: voxel.size,
    }
  }
}

/// Half-line with a unit direction.
///
/// Rays are plain values: marching never mutates them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
  pub origin: Vec3,
  pub direction: Vec3,
}

impl Ray {
  /// Create a ray, normalizing `direction`.
  ///
  /// A zero (or non-finite) direction yields a zero direction that never
  /// hits anything.
  pub fn new(origin: Vec3, direction: Vec3) -> Self {
    Self {
      origin,
      direction: direction.normalize_or_zero(),
    }
  }

  /// Point at distance `t` along the ray.
  #[inline]
  pub fn at(&self, t: f32) -> Vec3 {
    self.origin + self.direction * t
  }

  /// True if the ray can never hit anything: zero direction or a
  /// non-finite origin.
  #[inline]
  pub fn is_degenerate(&self) -> bool {
    self.direction == Vec3::ZERO || !self.origin.is_finite()
  }
}

/// Eye position and view direction supplied by the camera collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
  pub position: Vec3,
  pub forward: Vec3,
}

impl CameraView {
  pub fn new(position: Vec3, forward: Vec3) -> Self {
    Self {
      position,
      forward: forward.normalize_or_zero(),
    }
  }

  /// Camera at `position` looking at `target`.
  pub fn looking_at(position: Vec3, target: Vec3) -> Self {
    Self::new(position, target - position)
  }
}

impl Default for CameraView {
  fn default() -> Self {
    Self {
      position: Vec3::new(0.0, 0.0, 3.0),
      forward: Vec3::NEG_Z,
    }
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
