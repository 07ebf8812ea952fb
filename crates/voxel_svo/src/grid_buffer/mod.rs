//! Grid buffer: per-frame cube geometry uploaded to three device buffers.
//!
//! `update_buffers` rebuilds everything from the visible voxel set and
//! `draw` issues a single indexed draw over it.
//!
//! # Module Structure
//!
//! - [`device`]: `GpuBuffer` / `DrawTarget` traits
//! - [`host`]: in-memory `HostBuffer` and `RecordingTarget`
//! - [`mesh`]: `CubeMesh` voxel expansion

pub mod device;
pub mod host;
pub mod mesh;

pub use device::{DrawTarget, GpuBuffer};
pub use host::{DrawCommand, HostBuffer, RecordingTarget};
pub use mesh::CubeMesh;

use log::trace;

use crate::error::BufferError;
use crate::types::Voxel;

/// Vertex attribute slot for positions.
pub const POSITION_SLOT: u32 = 0;
/// Vertex attribute slot for colors.
pub const COLOR_SLOT: u32 = 1;

/// Counts from the last `update_buffers`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CubeMeshStats {
  /// Voxels that produced a cube.
  pub cubes: usize,
  /// Vertices uploaded (36 per cube).
  pub vertices: usize,
  /// Bytes written across all three buffers.
  pub bytes: usize,
}

/// Position, color and index buffers for the current frame's cubes.
#[derive(Debug)]
pub struct GridBuffer<B: GpuBuffer> {
  positions: B,
  colors: B,
  indices: B,
  index_count: u32,
}

impl<B: GpuBuffer + Default> Default for GridBuffer<B> {
  fn default() -> Self {
    Self::new(B::default(), B::default(), B::default())
  }
}

impl GridBuffer<HostBuffer> {
  /// Host-backed grid buffer with distinct buffer ids 0, 1 and 2.
  pub fn host() -> Self {
    Self::new(
      HostBuffer::with_id(0),
      HostBuffer::with_id(1),
      HostBuffer::with_id(2),
    )
  }
}

impl<B: GpuBuffer> GridBuffer<B> {
  pub fn new(positions: B, colors: B, indices: B) -> Self {
    Self {
      positions,
      colors,
      indices,
      index_count: 0,
    }
  }

  /// Replace the buffer contents with cubes for `voxels`.
  ///
  /// All three buffers are resized to fit exactly, so an empty (or
  /// all-unused) input leaves them empty and `draw` becomes a no-op.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "grid_buffer::update"))]
  pub fn update_buffers(&mut self, voxels: &[Voxel]) -> Result<CubeMeshStats, BufferError> {
    let mesh = CubeMesh::from_voxels(voxels);

    let position_bytes: &[u8] = bytemuck::cast_slice(&mesh.positions);
    let color_bytes: &[u8] = bytemuck::cast_slice(&mesh.colors);
    let index_bytes: &[u8] = bytemuck::cast_slice(&mesh.indices);

    self.positions.resize(position_bytes.len());
    self.colors.resize(color_bytes.len());
    self.indices.resize(index_bytes.len());

    self.positions.write(position_bytes, 0)?;
    self.colors.write(color_bytes, 0)?;
    self.indices.update(index_bytes)?;
    self.index_count = mesh.indices.len() as u32;

    let stats = CubeMeshStats {
      cubes: mesh.cube_count(),
      vertices: mesh.vertex_count(),
      bytes: position_bytes.len() + color_bytes.len() + index_bytes.len(),
    };
    trace!(
      "update_buffers: {} voxels -> {} cubes, {} bytes",
      voxels.len(),
      stats.cubes,
      stats.bytes
    );
    Ok(stats)
  }

  /// Bind the buffers and draw every cube with one indexed call.
  pub fn draw<T>(&self, target: &mut T)
  where
    T: DrawTarget<Buffer = B>,
  {
    if self.positions.size() == 0 {
      return;
    }
    target.bind_vertex(&self.positions, POSITION_SLOT, 3);
    target.bind_vertex(&self.colors, COLOR_SLOT, 3);
    target.bind_indices(&self.indices);
    target.draw_elements(self.index_count);
  }

  /// Number of indices the next `draw` will issue.
  #[inline]
  pub fn index_count(&self) -> u32 {
    self.index_count
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.index_count == 0
  }

  pub fn position_buffer(&self) -> &B {
    &self.positions
  }

  pub fn color_buffer(&self) -> &B {
    &self.colors
  }

  pub fn index_buffer(&self) -> &B {
    &self.indices
  }
}
