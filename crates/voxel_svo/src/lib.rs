//! voxel_svo - Framework/engine independent sparse voxel octree
//!
//! An arena-backed octree of colored cubes with ray marching, per-frame
//! visibility tagging and a cube mesher that feeds a narrow GPU buffer
//! contract.
//!
//! # Features
//!
//! - **Ray marching**: slab-test descent with a distance budget, index-order
//!   or nearest-hit child traversal
//! - **Visibility sweep**: a yaw/pitch fan of rays marched in parallel with
//!   rayon, then merged serially into draw-turn tags
//! - **Depth queries**: collect the voxels tagged in a turn at a fixed depth
//! - **Grid buffer**: unshared 36-vertex cubes uploaded through `GpuBuffer`
//!   and drawn with one indexed call
//! - **Flattening**: pre-order serialization for bulk upload
//!
//! # Example
//!
//! ```ignore
//! use voxel_svo::{CameraView, FrameDriver, GridBuffer, Octree, OctreeConfig, RecordingTarget};
//!
//! let mut octree = Octree::new(OctreeConfig::default().with_min_voxel_size(0.25))?;
//! octree.construct_octree()?;
//!
//! let mut grid = GridBuffer::host();
//! let mut target = RecordingTarget::new();
//! let mut driver = FrameDriver::default();
//!
//! let report = driver.run_frame(&mut octree, &mut grid, &CameraView::default(), &mut target)?;
//! println!("{} rays, {} hits, {} vertices", report.rays_cast, report.hits, report.vertices);
//! ```

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use constants::{CUBE_CORNERS, CUBE_INDICES, CUBE_VERTEX_COUNT, OCTANTS};
pub use error::{BufferError, OctreeError};
pub use types::{CameraView, GpuVoxel, Ray, Voxel};

// Arena octree: construction, marching, visibility, flattening
pub mod octree;
pub use octree::{
  Aabb3, ColorPolicy, DrawTurn, MarchHit, Node, NodeId, Octree, OctreeConfig, TaggingPolicy,
  TraversalOrder,
};

// Cube meshing and the GPU binding contract
pub mod grid_buffer;
pub use grid_buffer::{
  CubeMesh, CubeMeshStats, DrawCommand, DrawTarget, GpuBuffer, GridBuffer, HostBuffer,
  RecordingTarget,
};

// Ray fan around the camera
pub mod sweep;
pub use sweep::{SweepPattern, MAX_AXIS_SAMPLES};

// Per-frame orchestration
pub mod frame;
pub use frame::{FrameConfig, FrameDriver, FrameReport};

pub mod metrics;
pub use metrics::FrameMetrics;
