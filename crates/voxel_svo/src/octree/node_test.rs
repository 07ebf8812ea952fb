use glam::Vec3;

use super::*;

fn unit_node() -> Node {
  Node::new(Voxel::new(Vec3::ZERO, Vec3::ONE, 1.0), None, 0)
}

#[test]
fn test_new_node_is_untagged_leaf() {
  let node = unit_node();
  assert!(node.is_leaf());
  assert_eq!(node.draw_turn(), None);
  assert_eq!(node.parent(), None);
  assert_eq!(node.child(0), None);
}

/// Only slot 0 is populated on creation.
#[test]
fn test_new_node_has_single_voxel() {
  let node = unit_node();
  assert!(node.voxels()[0].is_occupied());
  for slot in 1..8 {
    assert!(!node.voxels()[slot].is_occupied(), "Slot {} should be empty", slot);
  }
}

/// child.position = parent.position + child_size * signs(octant)
#[test]
fn test_child_position_all_8_octants() {
  let node = Node::new(Voxel::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ONE, 2.0), None, 0);
  let child_size = 1.0;

  for octant in 0..8 {
    let expected = Vec3::new(
      1.0 + if octant & 1 != 0 { child_size } else { -child_size },
      2.0 + if octant & 2 != 0 { child_size } else { -child_size },
      3.0 + if octant & 4 != 0 { child_size } else { -child_size },
    );
    assert_eq!(node.child_position(octant), expected, "Octant {} mismatch", octant);
  }
}

#[test]
fn test_tag_is_monotonic() {
  let mut node = unit_node();

  assert!(node.tag(3));
  assert!(node.is_visible_in(3));

  // Same turn: idempotent
  assert!(!node.tag(3));

  // Older turn never overwrites
  assert!(!node.tag(2));
  assert_eq!(node.draw_turn(), Some(3));

  assert!(node.tag(4));
  assert_eq!(node.draw_turn(), Some(4));
}

#[test]
fn test_turn_zero_is_distinct_from_never_drawn() {
  let mut node = unit_node();
  assert!(!node.is_visible_in(0));
  assert!(node.tag(0));
  assert!(node.is_visible_in(0));
}
