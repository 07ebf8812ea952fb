//! Axis-aligned bounding box and the slab ray test used by marching.

use glam::Vec3;

use crate::constants::SURFACE_EPSILON;

/// Single-precision axis-aligned bounding box.
///
/// Voxel cubes are converted to boxes on the fly; nothing stores them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb3 {
	/// Minimum corner (inclusive).
	pub min: Vec3,
	/// Maximum corner (inclusive).
	pub max: Vec3,
}

impl Aabb3 {
	/// Create a new AABB from min and max corners.
	///
	/// # Panics
	/// Debug-asserts that min <= max on all axes.
	pub fn new(min: Vec3, max: Vec3) -> Self {
		debug_assert!(
			min.x <= max.x && min.y <= max.y && min.z <= max.z,
			"AABB min must be <= max on all axes"
		);
		Self { min, max }
	}

	/// Cube centered at `center` with edge length `size`.
	pub fn from_center_size(center: Vec3, size: f32) -> Self {
		let half = Vec3::splat(size * 0.5);
		Self {
			min: center - half,
			max: center + half,
		}
	}

	/// Check if this AABB contains a point.
	#[inline]
	pub fn contains_point(&self, point: Vec3) -> bool {
		point.cmpge(self.min).all() && point.cmple(self.max).all()
	}

	/// Get the size of the AABB (max - min).
	#[inline]
	pub fn size(&self) -> Vec3 {
		self.max - self.min
	}

	/// Get the center of the AABB.
	#[inline]
	pub fn center(&self) -> Vec3 {
		(self.min + self.max) * 0.5
	}

	/// Slab test: distance along `direction` at which the ray enters the box.
	///
	/// Returns `None` when the ray misses or the box lies behind the origin.
	/// An origin inside the box (or on its surface) enters at `Some(0.0)`.
	/// Axes the ray runs parallel to only check that the origin lies within
	/// that slab, widened by `SURFACE_EPSILON`, so a ray grazing a face plane
	/// still counts as inside it.
	///
	/// `direction` does not need to be normalized, but distances are in units
	/// of its length. Non-finite input never hits.
	#[inline]
	pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
		if direction == Vec3::ZERO || !origin.is_finite() || !direction.is_finite() {
			return None;
		}

		let mut t_near = f32::NEG_INFINITY;
		let mut t_far = f32::INFINITY;
		for axis in 0..3 {
			let (o, d) = (origin[axis], direction[axis]);
			let (lo, hi) = (self.min[axis], self.max[axis]);
			if d == 0.0 {
				if o < lo - SURFACE_EPSILON || o > hi + SURFACE_EPSILON {
					return None;
				}
				continue;
			}
			let (t0, t1) = ((lo - o) / d, (hi - o) / d);
			t_near = t_near.max(t0.min(t1));
			t_far = t_far.min(t0.max(t1));
		}

		if t_far < t_near || t_far < 0.0 {
			return None;
		}
		Some(t_near.max(0.0))
	}
}
