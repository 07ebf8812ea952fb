use glam::Vec3;

use super::*;
use crate::octree::OctreeConfig;
use crate::types::Voxel;

const EPS: f32 = 1e-4;

/// Root size 1 at the origin, split once: children of size 0.5 centered at
/// (±0.5, ±0.5, ±0.5).
fn one_level(traversal: TraversalOrder) -> Octree {
  let mut octree = Octree::new(
    OctreeConfig::new()
      .with_min_voxel_size(0.5)
      .with_traversal(traversal),
  )
  .unwrap();
  octree.construct_octree().unwrap();
  octree
}

fn two_levels() -> Octree {
  let mut octree = Octree::new(OctreeConfig::new().with_min_voxel_size(0.25)).unwrap();
  octree.construct_octree().unwrap();
  octree
}

fn child(octree: &Octree, parent: NodeId, octant: usize) -> NodeId {
  octree.node(parent).unwrap().child(octant).unwrap()
}

#[test]
fn test_lone_root_hit() {
  let octree = Octree::new(OctreeConfig::default()).unwrap();
  let hit = octree
    .march(Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z), 25.0)
    .expect("ray through the root should hit");

  assert_eq!(hit.node, octree.root());
  assert_eq!(hit.slot, 0);
  assert!((hit.distance - 4.5).abs() < EPS);
}

/// Ray aimed at the center of child 3 (+X, +Y, -Z) from outside the root.
#[test]
fn test_hit_known_leaf_center() {
  let octree = one_level(TraversalOrder::IndexOrder);
  let target = child(&octree, octree.root(), 3);
  assert_eq!(octree.node(target).unwrap().position(), Vec3::new(0.5, 0.5, -0.5));

  let hit = octree
    .march(Ray::new(Vec3::new(0.5, 0.5, -5.0), Vec3::Z), 25.0)
    .expect("ray at leaf center should hit");

  assert_eq!(hit.node, target);
  // Leaf spans z in [-0.75, -0.25].
  assert!((hit.distance - 4.25).abs() < EPS, "distance {}", hit.distance);
}

#[test]
fn test_diagonal_hit_distance() {
  let octree = one_level(TraversalOrder::IndexOrder);
  let target = child(&octree, octree.root(), 0);

  let origin = Vec3::splat(-3.0);
  let hit = octree
    .march(Ray::new(origin, Vec3::splat(-0.5) - origin), 25.0)
    .expect("diagonal ray should hit child 0");

  assert_eq!(hit.node, target);
  let expected = 2.25 * 3.0_f32.sqrt();
  assert!((hit.distance - expected).abs() < EPS, "distance {}", hit.distance);
}

/// Two levels: the ray enters child 3 at its face, which lies inside the
/// front grandchild 3 because children overhang their parent. That
/// grandchild is entered at once.
#[test]
fn test_two_level_enters_overhanging_grandchild() {
  let octree = two_levels();
  let level1 = child(&octree, octree.root(), 3);
  let leaf = child(&octree, level1, 3);
  assert_eq!(octree.node(leaf).unwrap().position(), Vec3::new(0.75, 0.75, -0.75));

  let hit = octree
    .march(Ray::new(Vec3::new(0.7, 0.7, -5.0), Vec3::Z), 25.0)
    .expect("ray should reach a leaf");

  assert_eq!(hit.node, leaf);
  // Child 3 face at z = -0.75, then zero further into the grandchild.
  assert!((hit.distance - 4.25).abs() < EPS, "distance {}", hit.distance);
  assert!(octree.node(hit.node).unwrap().is_leaf());
}

/// Every leaf of the front layer is returned by a ray aimed at its center,
/// in both traversal orders.
#[test]
fn test_rays_at_front_leaf_centers_hit_those_leaves() {
  for traversal in [TraversalOrder::IndexOrder, TraversalOrder::Nearest] {
    let mut octree = Octree::new(
      OctreeConfig::new()
        .with_min_voxel_size(0.25)
        .with_traversal(traversal),
    )
    .unwrap();
    octree.construct_octree().unwrap();

    let front: Vec<NodeId> = octree
      .leaves()
      .filter(|&id| octree.node(id).unwrap().position().z == -0.75)
      .collect();
    assert_eq!(front.len(), 16);

    for leaf in front {
      let center = octree.node(leaf).unwrap().position();
      let hit = octree
        .march(Ray::new(Vec3::new(center.x, center.y, -5.0), Vec3::Z), 25.0)
        .unwrap_or_else(|| panic!("{:?}: ray at {} missed", traversal, center));
      assert_eq!(hit.node, leaf, "{:?}: ray at {}", traversal, center);
    }
  }
}

/// Aimed at grandchild 3, which overhangs child 3 toward the camera.
#[test]
fn test_hit_overhanging_leaf_center() {
  let octree = two_levels();
  let level1 = child(&octree, octree.root(), 3);
  let target = child(&octree, level1, 3);
  assert_eq!(target, NodeId(36));

  let hit = octree
    .march(Ray::new(Vec3::new(0.75, 0.75, -5.0), Vec3::Z), 25.0)
    .unwrap();
  assert_eq!(hit.node, target);
}

#[test]
fn test_miss_outside_root() {
  let octree = two_levels();
  assert_eq!(
    octree.march(Ray::new(Vec3::new(5.0, 5.0, -5.0), Vec3::Z), 25.0),
    None
  );
}

#[test]
fn test_ray_pointing_away() {
  let octree = two_levels();
  assert_eq!(
    octree.march(Ray::new(Vec3::new(0.5, 0.5, -5.0), Vec3::NEG_Z), 25.0),
    None
  );
}

#[test]
fn test_distance_budget() {
  let octree = one_level(TraversalOrder::IndexOrder);
  let ray = Ray::new(Vec3::new(0.5, 0.5, -5.0), Vec3::Z);

  assert_eq!(octree.march(ray, 4.0), None);
  assert!(octree.march(ray, 4.3).is_some());
  assert_eq!(octree.march(ray, 0.0), None);
}

#[test]
fn test_degenerate_ray() {
  let octree = one_level(TraversalOrder::IndexOrder);
  assert_eq!(octree.march(Ray::new(Vec3::new(0.5, 0.5, -5.0), Vec3::ZERO), 25.0), None);
}

/// From +Z looking down -Z, child 7 (+Z) is nearer but child 3 (-Z) has the
/// lower index. Index order accepts the first subtree that hits.
#[test]
fn test_index_order_accepts_first_indexed_hit() {
  let octree = one_level(TraversalOrder::IndexOrder);
  let hit = octree
    .march(Ray::new(Vec3::new(0.5, 0.5, 5.0), Vec3::NEG_Z), 25.0)
    .unwrap();

  assert_eq!(hit.node, child(&octree, octree.root(), 3));
  assert!((hit.distance - 5.25).abs() < EPS);
}

#[test]
fn test_nearest_order_picks_closest_hit() {
  let octree = one_level(TraversalOrder::Nearest);
  let hit = octree
    .march(Ray::new(Vec3::new(0.5, 0.5, 5.0), Vec3::NEG_Z), 25.0)
    .unwrap();

  assert_eq!(hit.node, child(&octree, octree.root(), 7));
  assert!((hit.distance - 4.25).abs() < EPS);
}

/// Both orders agree when the lowest-indexed child is also the nearest.
#[test]
fn test_orders_agree_from_negative_side() {
  let ray = Ray::new(Vec3::new(0.5, 0.5, -5.0), Vec3::Z);
  let a = one_level(TraversalOrder::IndexOrder).march(ray, 25.0);
  let b = one_level(TraversalOrder::Nearest).march(ray, 25.0);
  assert_eq!(a, b);
}

#[test]
fn test_translated_octree() {
  let mut octree = Octree::new(
    OctreeConfig::new()
      .with_origin(Vec3::new(10.0, 0.0, 0.0))
      .with_min_voxel_size(0.5),
  )
  .unwrap();
  octree.construct_octree().unwrap();

  let hit = octree
    .march(Ray::new(Vec3::new(10.5, 0.5, -5.0), Vec3::Z), 25.0)
    .unwrap();
  assert_eq!(hit.node, child(&octree, octree.root(), 3));
  assert!((hit.distance - 4.25).abs() < EPS);

  let voxel = octree.hit_voxel(&hit).unwrap();
  assert_eq!(voxel.position, Vec3::new(10.5, 0.5, -0.5));

  // The untranslated position misses.
  assert_eq!(
    octree.march(Ray::new(Vec3::new(0.5, 0.5, -5.0), Vec3::Z), 25.0),
    None
  );
}

/// Leaves test every occupied slot and keep the nearest.
#[test]
fn test_leaf_picks_nearest_slot() {
  let mut octree = Octree::new(OctreeConfig::default()).unwrap();
  let root = octree.root();
  octree
    .set_voxel(root, 1, Voxel::new(Vec3::new(0.0, 0.0, -2.0), Vec3::X, 0.5))
    .unwrap();
  octree
    .set_voxel(root, 2, Voxel::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Y, 0.5))
    .unwrap();

  let hit = octree
    .march(Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z), 25.0)
    .unwrap();

  assert_eq!(hit.slot, 2);
  assert!((hit.distance - 1.75).abs() < EPS);
}

/// An origin inside a cube hits that cube at distance zero.
#[test]
fn test_origin_inside_root_leaf() {
  let octree = Octree::new(OctreeConfig::default()).unwrap();
  let hit = octree.march(Ray::new(Vec3::ZERO, Vec3::Z), 25.0).unwrap();
  assert_eq!(hit.node, octree.root());
  assert_eq!(hit.distance, 0.0);
}

#[test]
fn test_non_finite_origin_misses() {
  let octree = two_levels();
  assert_eq!(
    octree.march(Ray::new(Vec3::new(f32::NAN, 0.5, -5.0), Vec3::Z), 25.0),
    None
  );
}

#[test]
fn test_march_from_subtree() {
  let octree = two_levels();
  let level1 = child(&octree, octree.root(), 3);

  let hit = octree
    .march_from(level1, Ray::new(Vec3::new(0.7, 0.7, -5.0), Vec3::Z), 25.0)
    .unwrap();
  assert_eq!(hit.node, child(&octree, level1, 3));
  assert!((hit.distance - 4.25).abs() < EPS);

  assert_eq!(
    octree.march_from(NodeId(10_000), Ray::new(Vec3::ZERO, Vec3::Z), 25.0),
    None
  );
}

#[test]
fn test_march_batch_matches_serial() {
  let octree = two_levels();
  let rays: Vec<Ray> = (0..64)
    .map(|i| {
      let x = (i % 8) as f32 * 0.2 - 0.7;
      let y = (i / 8) as f32 * 0.2 - 0.7;
      Ray::new(Vec3::new(x, y, -5.0), Vec3::Z)
    })
    .collect();

  let parallel = octree.march_batch(&rays, 25.0);
  let serial: Vec<_> = rays.iter().map(|&r| octree.march(r, 25.0)).collect();

  assert_eq!(parallel, serial);
  assert!(parallel.iter().any(Option::is_some));
}
