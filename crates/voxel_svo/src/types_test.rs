use glam::Vec3;

use super::*;

#[test]
fn test_empty_voxel_is_unoccupied() {
  assert!(!Voxel::EMPTY.is_occupied());
  assert!(!Voxel::new(Vec3::ONE, Vec3::ONE, -1.0).is_occupied());
  assert!(Voxel::new(Vec3::ZERO, Vec3::ONE, 0.5).is_occupied());
}

#[test]
fn test_voxel_bounds_use_half_extent() {
  let voxel = Voxel::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ONE, 2.0);
  let bounds = voxel.bounds();
  assert_eq!(bounds.min, Vec3::new(0.0, 1.0, 2.0));
  assert_eq!(bounds.max, Vec3::new(2.0, 3.0, 4.0));
}

#[test]
fn test_translated_keeps_color_and_size() {
  let voxel = Voxel::new(Vec3::ONE, Vec3::new(0.2, 0.4, 0.6), 0.5);
  let moved = voxel.translated(Vec3::new(10.0, 0.0, 0.0));
  assert_eq!(moved.position, Vec3::new(11.0, 1.0, 1.0));
  assert_eq!(moved.color, voxel.color);
  assert_eq!(moved.size, voxel.size);
}

#[test]
fn test_gpu_voxel_is_tightly_packed() {
  assert_eq!(std::mem::size_of::<GpuVoxel>(), 28);

  let gpu = GpuVoxel::from(Voxel::new(Vec3::new(1.0, 2.0, 3.0), Vec3::X, 0.25));
  let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&gpu));
  assert_eq!(floats, &[1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 0.25]);
}

#[test]
fn test_ray_normalizes_direction() {
  let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
  assert_eq!(ray.direction, Vec3::Z);
  assert_eq!(ray.at(2.0), Vec3::new(0.0, 0.0, 2.0));
}

#[test]
fn test_zero_direction_is_degenerate() {
  let ray = Ray::new(Vec3::ONE, Vec3::ZERO);
  assert!(ray.is_degenerate());
}

#[test]
fn test_non_finite_origin_is_degenerate() {
  assert!(Ray::new(Vec3::new(f32::NAN, 0.5, -5.0), Vec3::Z).is_degenerate());
  assert!(Ray::new(Vec3::splat(f32::INFINITY), Vec3::Z).is_degenerate());
  assert!(!Ray::new(Vec3::new(0.0, 0.5, -5.0), Vec3::Z).is_degenerate());
}

#[test]
fn test_camera_looking_at() {
  let camera = CameraView::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
  assert!((camera.forward - Vec3::NEG_Z).length() < 1e-6);
}
