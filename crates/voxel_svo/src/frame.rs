//! Frame driver: one visibility frame from sweep to draw call.
//!
//! Order per frame:
//!
//! 1. advance the draw turn
//! 2. build the sweep rays and march them in parallel (`&Octree`)
//! 3. merge hits serially in ray order, tagging on `&mut Octree`
//! 4. collect visible voxels at `query_depth`
//! 5. rebuild the grid buffer and draw, only if anything is visible

use log::{debug, trace};
use web_time::Instant;

use crate::constants::DEFAULT_MAX_DISTANCE;
use crate::error::OctreeError;
use crate::grid_buffer::{DrawTarget, GpuBuffer, GridBuffer};
use crate::metrics::FrameMetrics;
use crate::octree::{DrawTurn, Octree, TaggingPolicy};
use crate::sweep::SweepPattern;
use crate::types::CameraView;

/// Per-frame query settings.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameConfig {
  pub sweep: SweepPattern,
  /// Distance budget for every sweep ray.
  pub max_distance: f32,
  /// Depth passed to `get_voxels_with_depth` from the root.
  pub query_depth: u32,
  /// How hit nodes are tagged.
  pub tagging: TaggingPolicy,
}

impl Default for FrameConfig {
  fn default() -> Self {
    Self {
      sweep: SweepPattern::default(),
      max_distance: DEFAULT_MAX_DISTANCE,
      query_depth: 4,
      tagging: TaggingPolicy::default(),
    }
  }
}

impl FrameConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_sweep(mut self, sweep: SweepPattern) -> Self {
    self.sweep = sweep;
    self
  }

  pub fn with_max_distance(mut self, distance: f32) -> Self {
    self.max_distance = distance;
    self
  }

  pub fn with_query_depth(mut self, depth: u32) -> Self {
    self.query_depth = depth;
    self
  }

  pub fn with_tagging(mut self, tagging: TaggingPolicy) -> Self {
    self.tagging = tagging;
    self
  }
}

/// What one frame did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
  pub turn: DrawTurn,
  pub rays_cast: usize,
  pub hits: usize,
  /// Hit nodes that were not yet tagged in this turn when their hit was
  /// merged.
  pub nodes_drawn: usize,
  /// Voxel slots collected at `query_depth` (unused slots included).
  pub voxels_emitted: usize,
  /// Vertices uploaded to the grid buffer, 0 if nothing was drawn.
  pub vertices: usize,
  pub drew: bool,
  pub sweep_us: u64,
  pub mesh_us: u64,
}

/// Owns the draw-turn counter and runs frames against an octree.
#[derive(Debug, Default)]
pub struct FrameDriver {
  turn: DrawTurn,
  config: FrameConfig,
  metrics: FrameMetrics,
}

impl FrameDriver {
  pub fn new(config: FrameConfig) -> Self {
    Self {
      turn: 0,
      config,
      metrics: FrameMetrics::default(),
    }
  }

  /// Turn of the most recent frame (0 before the first).
  #[inline]
  pub fn turn(&self) -> DrawTurn {
    self.turn
  }

  #[inline]
  pub fn config(&self) -> &FrameConfig {
    &self.config
  }

  #[inline]
  pub fn config_mut(&mut self) -> &mut FrameConfig {
    &mut self.config
  }

  #[inline]
  pub fn metrics(&self) -> &FrameMetrics {
    &self.metrics
  }

  /// Run one frame: sweep, tag, collect, upload, draw.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "frame::run"))]
  pub fn run_frame<B, T>(
    &mut self,
    octree: &mut Octree,
    grid: &mut GridBuffer<B>,
    camera: &CameraView,
    target: &mut T,
  ) -> Result<FrameReport, OctreeError>
  where
    B: GpuBuffer,
    T: DrawTarget<Buffer = B>,
  {
    self.turn = self.turn.saturating_add(1);
    let turn = self.turn;
    let mut report = FrameReport {
      turn,
      ..Default::default()
    };

    let sweep_start = Instant::now();
    let hits = self
      .config
      .sweep
      .cast(octree, camera, self.config.max_distance);
    report.rays_cast = hits.len();

    for hit in hits.iter().flatten() {
      report.hits += 1;
      let already_tagged = octree
        .node(hit.node)
        .is_some_and(|node| node.is_visible_in(turn));
      if !already_tagged {
        octree.tag_hit(hit.node, turn, self.config.tagging)?;
        report.nodes_drawn += 1;
      }
    }
    report.sweep_us = sweep_start.elapsed().as_micros() as u64;
    self
      .metrics
      .record_sweep(report.rays_cast, report.hits, report.sweep_us);
    self.metrics.record_tagging(report.nodes_drawn);

    let mesh_start = Instant::now();
    let voxels = octree.visible_voxels(turn, self.config.query_depth);
    report.voxels_emitted = voxels.len();

    if !voxels.is_empty() {
      let stats = grid.update_buffers(&voxels)?;
      grid.draw(target);
      report.vertices = stats.vertices;
      report.drew = !grid.is_empty();
      report.mesh_us = mesh_start.elapsed().as_micros() as u64;
      self
        .metrics
        .record_mesh(voxels.len(), stats.vertices, stats.bytes, report.mesh_us);
    } else {
      trace!("frame {}: nothing visible, grid buffer left as is", turn);
    }

    debug!(
      "frame {}: {}/{} rays hit, {} nodes drawn, {} voxels, {} vertices",
      turn, report.hits, report.rays_cast, report.nodes_drawn, report.voxels_emitted, report.vertices
    );
    Ok(report)
  }
}

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;
