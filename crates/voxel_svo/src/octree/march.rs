//! Ray marching through the octree.
//!
//! The recursion threads the current origin and the remaining distance
//! budget explicitly instead of advancing a shared ray object:
//!
//! ```text
//! march_node(node, origin, dir, budget)
//!   leaf:     min entry t over occupied slots, t < budget
//!   interior: for each child entered at t in [0, budget):
//!               hit = march_node(child, origin + dir*t, dir, budget - t)
//!               → t + hit.distance
//! ```
//!
//! Marching is read-only (`&self`), so rays may be cast from many threads.

use glam::Vec3;
use smallvec::SmallVec;

use super::{NodeId, Octree, TraversalOrder};
use crate::constants::OCTANTS;
use crate::types::Ray;

/// Result of a successful march.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchHit {
  /// Distance from the ray origin to the hit voxel's surface.
  pub distance: f32,
  /// Leaf that holds the hit voxel.
  pub node: NodeId,
  /// Slot of the hit voxel within `node`.
  pub slot: usize,
}

impl MarchHit {
  #[inline]
  fn offset(self, t: f32) -> Self {
    Self {
      distance: self.distance + t,
      ..self
    }
  }
}

impl Octree {
  /// Find a voxel along `ray` closer than `max_distance`.
  ///
  /// `None` means nothing was hit. Which voxel wins among several candidates
  /// depends on `OctreeConfig::traversal`.
  pub fn march(&self, ray: Ray, max_distance: f32) -> Option<MarchHit> {
    self.march_from(NodeId::ROOT, ray, max_distance)
  }

  /// March starting at an arbitrary node instead of the root.
  pub fn march_from(&self, start: NodeId, ray: Ray, max_distance: f32) -> Option<MarchHit> {
    if ray.is_degenerate() || !(max_distance > 0.0) || self.node(start).is_none() {
      return None;
    }
    let local_origin = ray.origin - self.config.origin;
    self.march_node(start, local_origin, ray.direction, max_distance)
  }

  fn march_node(&self, id: NodeId, origin: Vec3, direction: Vec3, budget: f32) -> Option<MarchHit> {
    let node = self.get(id);

    let Some(children) = node.children else {
      return self.march_leaf(id, origin, direction, budget);
    };

    match self.config.traversal {
      TraversalOrder::IndexOrder => children.iter().find_map(|&child| {
        let t = self.enter_child(child, origin, direction, budget)?;
        self
          .march_node(child, origin + direction * t, direction, budget - t)
          .map(|hit| hit.offset(t))
      }),
      TraversalOrder::Nearest => {
        let entered: SmallVec<[(f32, NodeId); OCTANTS]> = children
          .iter()
          .filter_map(|&child| {
            self
              .enter_child(child, origin, direction, budget)
              .map(|t| (t, child))
          })
          .collect();

        entered
          .into_iter()
          .filter_map(|(t, child)| {
            self
              .march_node(child, origin + direction * t, direction, budget - t)
              .map(|hit| hit.offset(t))
          })
          .min_by(|a, b| a.distance.total_cmp(&b.distance))
      }
    }
  }

  /// Entry distance into a child's cube, if within budget.
  #[inline]
  fn enter_child(&self, child: NodeId, origin: Vec3, direction: Vec3, budget: f32) -> Option<f32> {
    let voxel = self.get(child).voxel();
    if !voxel.is_occupied() {
      return None;
    }
    voxel
      .bounds()
      .intersect_ray(origin, direction)
      .filter(|&t| t < budget)
  }

  fn march_leaf(&self, id: NodeId, origin: Vec3, direction: Vec3, budget: f32) -> Option<MarchHit> {
    let mut best: Option<MarchHit> = None;

    for (slot, voxel) in self.get(id).voxels.iter().enumerate() {
      if !voxel.is_occupied() {
        continue;
      }
      let Some(t) = voxel.bounds().intersect_ray(origin, direction) else {
        continue;
      };
      if t < budget && best.map_or(true, |b| t < b.distance) {
        best = Some(MarchHit {
          distance: t,
          node: id,
          slot,
        });
      }
    }

    best
  }

  /// March a batch of rays in parallel. Results are in ray order.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::march_batch"))]
  pub fn march_batch(&self, rays: &[Ray], max_distance: f32) -> Vec<Option<MarchHit>> {
    use rayon::prelude::*;

    rays
      .par_iter()
      .map(|&ray| self.march(ray, max_distance))
      .collect()
  }
}

#[cfg(test)]
#[path = "march_test.rs"]
mod march_test;
