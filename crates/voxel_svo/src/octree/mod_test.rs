use glam::Vec3;

use super::*;

#[test]
fn test_new_holds_only_root() {
  let octree = Octree::new(OctreeConfig::default()).unwrap();
  assert_eq!(octree.len(), 1);
  assert!(!octree.is_empty());
  assert_eq!(octree.height(), 0);

  let root = octree.node(octree.root()).unwrap();
  assert!(root.is_leaf());
  assert_eq!(root.parent(), None);
  assert_eq!(root.draw_turn(), None);
  assert_eq!(root.position(), Vec3::ZERO);
  assert_eq!(root.size(), 1.0);
  assert_eq!(root.voxel().color, Vec3::new(1.0, 0.5, 0.5));
}

#[test]
fn test_with_root_sets_world_placement() {
  let octree = Octree::with_root(Vec3::new(2.0, 0.0, -1.0), Vec3::ONE, 4.0).unwrap();
  assert_eq!(octree.origin(), Vec3::new(2.0, 0.0, -1.0));

  let root = octree.world_voxel(octree.root(), 0).unwrap();
  assert_eq!(root.position, Vec3::new(2.0, 0.0, -1.0));
  assert_eq!(root.color, Vec3::ONE);
  assert_eq!(root.size, 4.0);
}

#[test]
fn test_invalid_configs_are_rejected() {
  assert_eq!(
    Octree::new(OctreeConfig::new().with_root_size(0.0)).err(),
    Some(OctreeError::InvalidRootSize(0.0))
  );
  assert_eq!(
    Octree::new(OctreeConfig::new().with_min_voxel_size(-1.0)).err(),
    Some(OctreeError::InvalidMinVoxelSize(-1.0))
  );
}

/// Depth limits apply to subdivision, not to creating the root.
#[test]
fn test_new_accepts_any_root_size() {
  let large = Octree::with_root(Vec3::ZERO, Vec3::ONE, 4096.0).unwrap();
  assert_eq!(large.len(), 1);
  let fine = OctreeConfig::new()
    .with_min_voxel_size(0.001)
    .with_max_depth(4);
  assert!(Octree::new(fine).is_ok());
}

#[test]
fn test_leaves_and_height_after_construct() {
  let mut octree = Octree::new(OctreeConfig::new().with_min_voxel_size(0.25)).unwrap();
  octree.construct_octree().unwrap();

  assert_eq!(octree.height(), 2);
  assert_eq!(octree.leaves().count(), 64);
  assert!(octree
    .leaves()
    .all(|id| octree.node(id).unwrap().depth() == 2));
}

#[test]
fn test_iter_visits_every_node() {
  let mut octree = Octree::new(OctreeConfig::new().with_min_voxel_size(0.5)).unwrap();
  octree.construct_octree().unwrap();

  let ids: Vec<NodeId> = octree.iter().map(|(id, _)| id).collect();
  assert_eq!(ids.len(), octree.len());
  assert_eq!(ids[0], NodeId::ROOT);
  assert!(octree.iter().skip(1).all(|(_, n)| n.parent() == Some(NodeId::ROOT)));
}

#[test]
fn test_set_color_on_any_slot() {
  let mut octree = Octree::new(OctreeConfig::default()).unwrap();
  let root = octree.root();

  octree.set_color(root, 0, Vec3::new(0.1, 0.2, 0.3)).unwrap();
  assert_eq!(
    octree.node(root).unwrap().voxel().color,
    Vec3::new(0.1, 0.2, 0.3)
  );
  assert_eq!(
    octree.set_color(root, 8, Vec3::ONE),
    Err(OctreeError::SlotOutOfRange(8))
  );
  assert_eq!(
    octree.set_color(NodeId(42), 0, Vec3::ONE),
    Err(OctreeError::UnknownNode(NodeId(42)))
  );
}

#[test]
fn test_set_voxel_payload_rules() {
  let mut octree = Octree::new(OctreeConfig::new().with_min_voxel_size(0.5)).unwrap();
  octree.construct_octree().unwrap();
  let root = octree.root();
  let leaf = octree.node(root).unwrap().child(0).unwrap();
  let payload = Voxel::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::X, 0.1);

  assert_eq!(
    octree.set_voxel(leaf, 0, payload),
    Err(OctreeError::ReservedSlot)
  );
  assert_eq!(
    octree.set_voxel(leaf, 9, payload),
    Err(OctreeError::SlotOutOfRange(9))
  );
  assert_eq!(
    octree.set_voxel(root, 3, payload),
    Err(OctreeError::NotALeaf(root))
  );

  octree.set_voxel(leaf, 3, payload).unwrap();
  assert_eq!(octree.node(leaf).unwrap().voxels()[3], payload);
}

#[test]
fn test_hit_voxel_resolves_slot() {
  let mut octree = Octree::with_root(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE, 1.0).unwrap();
  octree.subdivide_node(octree.root()).unwrap();
  let leaf = octree.node(octree.root()).unwrap().child(1).unwrap();

  let hit = MarchHit {
    distance: 1.0,
    node: leaf,
    slot: 0,
  };
  let voxel = octree.hit_voxel(&hit).unwrap();
  assert_eq!(voxel.position, Vec3::new(0.5, -0.5, 4.5));
  assert_eq!(voxel.size, 0.5);
}
