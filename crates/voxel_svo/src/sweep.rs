//! Visibility sweep: a fan of rays around the camera's forward vector.
//!
//! Rays are built serially (cheap) and marched in parallel with rayon.
//! Results keep ray order so the tagging that follows is deterministic.

use glam::{Quat, Vec3};
use log::warn;

use crate::octree::{MarchHit, Octree};
use crate::types::{CameraView, Ray};

/// Most samples a single yaw or pitch axis may produce. Patterns past this
/// are treated as malformed and cast no rays.
pub const MAX_AXIS_SAMPLES: usize = 16_384;

/// Yaw/pitch grid of ray directions, in degrees.
///
/// Pitch rotates about X first, then yaw about Y. Both are multiplied by
/// `angle_scale` before being converted to radians.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepPattern {
  pub min_yaw: f32,
  pub max_yaw: f32,
  pub min_pitch: f32,
  pub max_pitch: f32,
  /// Spacing between neighbouring rays on both axes.
  pub step: f32,
  pub angle_scale: f32,
}

impl Default for SweepPattern {
  fn default() -> Self {
    Self {
      min_yaw: -45.0,
      max_yaw: 45.0,
      min_pitch: -45.0,
      max_pitch: 45.0,
      step: 1.0,
      angle_scale: 1.0,
    }
  }
}

impl SweepPattern {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_yaw(mut self, min: f32, max: f32) -> Self {
    self.min_yaw = min;
    self.max_yaw = max;
    self
  }

  pub fn with_pitch(mut self, min: f32, max: f32) -> Self {
    self.min_pitch = min;
    self.max_pitch = max;
    self
  }

  pub fn with_step(mut self, step: f32) -> Self {
    self.step = step;
    self
  }

  pub fn with_angle_scale(mut self, scale: f32) -> Self {
    self.angle_scale = scale;
    self
  }

  /// A single ray straight along the camera's forward vector.
  pub fn single() -> Self {
    Self::default().with_yaw(0.0, 0.0).with_pitch(0.0, 0.0)
  }

  /// Samples on one axis, inclusive of both ends when they align with
  /// `step`. Zero for an empty or malformed range, including one that would
  /// need more than `MAX_AXIS_SAMPLES` samples.
  fn axis_count(&self, min: f32, max: f32) -> usize {
    if !(self.step > 0.0) || !(max >= min) {
      return 0;
    }
    let intervals = ((max - min) / self.step).floor();
    if !(intervals < MAX_AXIS_SAMPLES as f32) {
      return 0;
    }
    intervals as usize + 1
  }

  /// Total number of rays per sweep.
  pub fn ray_count(&self) -> usize {
    self
      .axis_count(self.min_yaw, self.max_yaw)
      .checked_mul(self.axis_count(self.min_pitch, self.max_pitch))
      .unwrap_or(0)
  }

  /// True if the pattern casts at least one ray.
  pub fn is_valid(&self) -> bool {
    self.ray_count() > 0
  }

  /// `(yaw, pitch)` pairs in degrees, yaw-major.
  pub fn angles(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
    let yaws = self.axis_count(self.min_yaw, self.max_yaw);
    let pitches = self.axis_count(self.min_pitch, self.max_pitch);
    (0..yaws).flat_map(move |i| {
      let yaw = self.min_yaw + i as f32 * self.step;
      (0..pitches).map(move |j| (yaw, self.min_pitch + j as f32 * self.step))
    })
  }

  /// Direction of the ray at `(yaw, pitch)` degrees around `forward`.
  pub fn direction(&self, forward: Vec3, yaw: f32, pitch: f32) -> Vec3 {
    let pitch = Quat::from_rotation_x((pitch * self.angle_scale).to_radians());
    let yaw = Quat::from_rotation_y((yaw * self.angle_scale).to_radians());
    yaw * (pitch * forward)
  }

  /// Every ray of the sweep, starting at the camera position.
  pub fn rays(&self, camera: &CameraView) -> Vec<Ray> {
    if !self.is_valid() {
      warn!("sweep pattern produces no rays: {:?}", self);
      return Vec::new();
    }
    self
      .angles()
      .map(|(yaw, pitch)| Ray::new(camera.position, self.direction(camera.forward, yaw, pitch)))
      .collect()
  }

  /// Build and march every ray. Output is in ray order.
  pub fn cast(&self, octree: &Octree, camera: &CameraView, max_distance: f32) -> Vec<Option<MarchHit>> {
    octree.march_batch(&self.rays(camera), max_distance)
  }
}

#[cfg(test)]
#[path = "sweep_test.rs"]
mod sweep_test;
