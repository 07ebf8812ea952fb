//! CubeMesh - expands voxels into unshared 36-vertex cubes.
//!
//! Pure CPU side of the grid buffer: no device calls happen here.

use glam::Vec3;

use crate::constants::{CUBE_CORNERS, CUBE_INDICES, CUBE_VERTEX_COUNT};
use crate::types::Voxel;

/// Triangle-list geometry for a set of voxels.
///
/// Every cube gets its own 36 vertices, so `indices` is simply `0..36n`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CubeMesh {
  pub positions: Vec<[f32; 3]>,
  pub colors: Vec<[f32; 3]>,
  pub indices: Vec<u32>,
}

impl CubeMesh {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build the mesh for `voxels`, skipping unused (zero-size) slots.
  pub fn from_voxels(voxels: &[Voxel]) -> Self {
    let cubes = voxels.iter().filter(|v| v.is_occupied()).count();
    let vertex_count = cubes * CUBE_VERTEX_COUNT;

    let mut mesh = Self {
      positions: Vec::with_capacity(vertex_count),
      colors: Vec::with_capacity(vertex_count),
      indices: Vec::with_capacity(vertex_count),
    };

    for voxel in voxels.iter().filter(|v| v.is_occupied()) {
      mesh.push_cube(voxel);
    }
    mesh
  }

  fn push_cube(&mut self, voxel: &Voxel) {
    let half = voxel.size * 0.5;
    let color = voxel.color.to_array();

    for &corner in CUBE_INDICES.iter() {
      let offset = Vec3::from_array(CUBE_CORNERS[corner as usize]) * half;
      let index = self.positions.len() as u32;
      self.positions.push((voxel.position + offset).to_array());
      self.colors.push(color);
      self.indices.push(index);
    }
  }

  #[inline]
  pub fn vertex_count(&self) -> usize {
    self.positions.len()
  }

  #[inline]
  pub fn cube_count(&self) -> usize {
    self.positions.len() / CUBE_VERTEX_COUNT
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  pub fn clear(&mut self) {
    self.positions.clear();
    self.colors.clear();
    self.indices.clear();
  }
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
