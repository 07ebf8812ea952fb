//! Fixed tables and defaults for the octree and the cube mesher.
//!
//! # Cube corner layout
//!
//! Corners are numbered around the -Z face first, then the +Z face, each
//! face counter-clockwise when viewed from -Z:
//!
//! ```text
//!        7────────6
//!       /│       /│        +Y
//!      3────────2 │         │
//!      │ 4──────│─5         └── +X
//!      │/       │/         /
//!      0────────1         +Z
//! ```
//!
//! `CUBE_INDICES` references those corners as 6 faces × 2 triangles, in the
//! face order front, right, back, left, top, bottom.
//!
//! # Child octants
//!
//! Child `i` of a node is offset from the parent center along each axis by
//! `±child_size`, with the sign taken from the octant bits:
//! bit 0 = X, bit 1 = Y, bit 2 = Z (set bit = positive direction).

/// Children per interior node, and voxel slots per node.
pub const OCTANTS: usize = 8;

/// Vertices (and indices) emitted per cube: 6 faces × 2 triangles × 3.
pub const CUBE_VERTEX_COUNT: usize = 36;

/// Default threshold at which uniform construction stops subdividing.
pub const DEFAULT_MIN_VOXEL_SIZE: f32 = 0.01;

/// Default cap on construction depth (8^8 leaves is already ~16.7M nodes).
pub const DEFAULT_MAX_DEPTH: u32 = 8;

/// Default distance budget for a single march.
pub const DEFAULT_MAX_DISTANCE: f32 = 25.0;

/// Tolerance for a ray running parallel to a face plane: an origin this close
/// outside the slab still counts as inside it.
pub const SURFACE_EPSILON: f32 = 1e-5;

/// Local corner offsets of a unit cube (multiply by half the edge length).
pub const CUBE_CORNERS: [[f32; 3]; 8] = [
  [-1.0, -1.0, -1.0],
  [1.0, -1.0, -1.0],
  [1.0, 1.0, -1.0],
  [-1.0, 1.0, -1.0],
  [-1.0, -1.0, 1.0],
  [1.0, -1.0, 1.0],
  [1.0, 1.0, 1.0],
  [-1.0, 1.0, 1.0],
];

/// Corner references for the 12 triangles of a cube.
#[rustfmt::skip]
pub const CUBE_INDICES: [u8; CUBE_VERTEX_COUNT] = [
  0, 1, 2, 2, 3, 0, // front
  1, 5, 6, 6, 2, 1, // right
  5, 4, 7, 7, 6, 5, // back
  4, 0, 3, 3, 7, 4, // left
  3, 2, 6, 6, 7, 3, // top
  4, 5, 1, 1, 0, 4, // bottom
];

/// Sign vector (+1/-1 per axis) for a child octant.
#[inline]
pub fn octant_signs(octant: usize) -> [f32; 3] {
  let sign = |bit: usize| if octant & bit != 0 { 1.0 } else { -1.0 };
  [sign(1), sign(2), sign(4)]
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
