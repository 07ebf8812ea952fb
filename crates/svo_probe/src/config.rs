//! Configuration parsing for headless octree frames.

use anyhow::{Context, Result};
use glam::Vec3;
use serde::Deserialize;
use std::path::Path;

use voxel_svo::{
	CameraView, ColorPolicy, FrameConfig, OctreeConfig, SweepPattern, TaggingPolicy, TraversalOrder,
};

/// Root configuration. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub octree: OctreeSection,
	pub camera: CameraSection,
	pub sweep: SweepSection,
	pub frame: FrameSection,
}

/// Root cube, construction threshold and extra refinement.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OctreeSection {
	pub origin: [f32; 3],
	pub root_color: [f32; 3],
	pub root_size: f32,
	pub min_voxel_size: f32,
	pub max_depth: u32,
	pub color_policy: ColorPolicyName,
	pub traversal: TraversalName,
	/// Branches subdivided further after uniform construction.
	pub refine: Vec<RefineEntry>,
}

impl Default for OctreeSection {
	fn default() -> Self {
		let defaults = OctreeConfig::default();
		Self {
			origin: defaults.origin.to_array(),
			root_color: defaults.root_color.to_array(),
			root_size: defaults.root_size,
			min_voxel_size: 0.0625,
			max_depth: defaults.max_depth,
			color_policy: ColorPolicyName::IndexGradient,
			traversal: TraversalName::IndexOrder,
			refine: Vec::new(),
		}
	}
}

/// Fixed-depth subdivision of the node reached by `path` (octants from the
/// root).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefineEntry {
	pub path: Vec<usize>,
	pub depth: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorPolicyName {
	Inherit,
	IndexGradient,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalName {
	IndexOrder,
	Nearest,
}

/// Eye position, look target and per-frame orbit about the target's Y axis.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSection {
	pub position: [f32; 3],
	pub target: [f32; 3],
	pub orbit_degrees_per_frame: f32,
}

impl Default for CameraSection {
	fn default() -> Self {
		Self {
			position: [0.3, 0.2, 3.0],
			target: [0.0, 0.0, 0.0],
			orbit_degrees_per_frame: 0.0,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepSection {
	pub min_yaw: f32,
	pub max_yaw: f32,
	pub min_pitch: f32,
	pub max_pitch: f32,
	pub step: f32,
	pub angle_scale: f32,
}

impl Default for SweepSection {
	fn default() -> Self {
		let defaults = SweepPattern::default();
		Self {
			min_yaw: defaults.min_yaw,
			max_yaw: defaults.max_yaw,
			min_pitch: defaults.min_pitch,
			max_pitch: defaults.max_pitch,
			step: defaults.step,
			angle_scale: defaults.angle_scale,
		}
	}
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaggingName {
	LeafOnly,
	Propagated,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameSection {
	pub max_distance: f32,
	pub query_depth: u32,
	pub tagging: TaggingName,
	/// Descendant depth for `propagated` tagging.
	pub tag_depth: u32,
}

impl Default for FrameSection {
	fn default() -> Self {
		let defaults = FrameConfig::default();
		let tag_depth = match defaults.tagging {
			TaggingPolicy::Propagated { depth } => depth,
			TaggingPolicy::LeafOnly => 0,
		};
		Self {
			max_distance: defaults.max_distance,
			query_depth: defaults.query_depth,
			tagging: TaggingName::Propagated,
			tag_depth,
		}
	}
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content)
	}

	pub fn parse(content: &str) -> Result<Self> {
		let config: Config = toml::from_str(content).context("Failed to parse config TOML")?;

		if !(config.frame.max_distance > 0.0) {
			anyhow::bail!(
				"frame.max_distance must be positive, got {}",
				config.frame.max_distance
			);
		}
		if !(config.sweep.step > 0.0) {
			anyhow::bail!("sweep.step must be positive, got {}", config.sweep.step);
		}
		if !config.frame_config().sweep.is_valid() {
			anyhow::bail!(
				"sweep must cast between 1 and {} rays per axis (yaw {}..{}, pitch {}..{}, step {})",
				voxel_svo::MAX_AXIS_SAMPLES,
				config.sweep.min_yaw,
				config.sweep.max_yaw,
				config.sweep.min_pitch,
				config.sweep.max_pitch,
				config.sweep.step
			);
		}
		for entry in &config.octree.refine {
			if let Some(octant) = entry.path.iter().find(|&&o| o >= voxel_svo::OCTANTS) {
				anyhow::bail!("refine path octant {} out of range 0..8", octant);
			}
		}

		Ok(config)
	}

	pub fn octree_config(&self) -> OctreeConfig {
		let s = &self.octree;
		OctreeConfig::new()
			.with_origin(Vec3::from_array(s.origin))
			.with_root_color(Vec3::from_array(s.root_color))
			.with_root_size(s.root_size)
			.with_min_voxel_size(s.min_voxel_size)
			.with_max_depth(s.max_depth)
			.with_color_policy(match s.color_policy {
				ColorPolicyName::Inherit => ColorPolicy::Inherit,
				ColorPolicyName::IndexGradient => ColorPolicy::IndexGradient,
			})
			.with_traversal(match s.traversal {
				TraversalName::IndexOrder => TraversalOrder::IndexOrder,
				TraversalName::Nearest => TraversalOrder::Nearest,
			})
	}

	pub fn frame_config(&self) -> FrameConfig {
		let s = &self.sweep;
		let sweep = SweepPattern::new()
			.with_yaw(s.min_yaw, s.max_yaw)
			.with_pitch(s.min_pitch, s.max_pitch)
			.with_step(s.step)
			.with_angle_scale(s.angle_scale);
		let tagging = match self.frame.tagging {
			TaggingName::LeafOnly => TaggingPolicy::LeafOnly,
			TaggingName::Propagated => TaggingPolicy::Propagated {
				depth: self.frame.tag_depth,
			},
		};
		FrameConfig::new()
			.with_sweep(sweep)
			.with_max_distance(self.frame.max_distance)
			.with_query_depth(self.frame.query_depth)
			.with_tagging(tagging)
	}

	/// Camera for frame `index` (0-based), orbiting the target.
	pub fn camera(&self, index: u32) -> CameraView {
		let target = Vec3::from_array(self.camera.target);
		let start = Vec3::from_array(self.camera.position);
		let angle = (self.camera.orbit_degrees_per_frame * index as f32).to_radians();
		let position = target + glam::Quat::from_rotation_y(angle) * (start - target);
		CameraView::looking_at(position, target)
	}
}
