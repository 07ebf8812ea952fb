//! Headless frame runner for the sparse voxel octree.
//!
//! Builds an octree from a TOML config, runs visibility frames against the
//! in-memory buffer backend and reports what each frame would have drawn.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

use config::Config;
use voxel_svo::{FrameDriver, GpuBuffer, GridBuffer, HostBuffer, NodeId, Octree, RecordingTarget};

/// Headless sparse voxel octree frame runner.
#[derive(Parser, Debug)]
#[command(name = "svo_probe")]
#[command(about = "Runs octree visibility frames without a GPU")]
struct Args {
	/// Path to configuration TOML file (defaults apply when omitted).
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Number of frames to run.
	#[arg(short, long, default_value_t = 1)]
	frames: u32,

	/// Also flatten the whole tree into a host buffer.
	#[arg(long)]
	flatten: bool,
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let config = match &args.config {
		Some(path) => {
			info!("Loading config from: {}", path.display());
			Config::load(path)?
		}
		None => Config::default(),
	};

	let octree = build_octree(&config)?;
	println!(
		"Octree: {} nodes, height {}, {} leaves",
		octree.len(),
		octree.height(),
		octree.leaves().count()
	);

	if args.flatten {
		let mut buffer = HostBuffer::new();
		let records = octree
			.bind_to_gpu(&mut buffer)
			.context("Flattening octree")?;
		println!("Flattened {} voxels into {} bytes", records, buffer.size());
	}

	run_frames(octree, &config, args.frames)
}

fn build_octree(config: &Config) -> Result<Octree> {
	let mut octree = Octree::new(config.octree_config()).context("Invalid octree config")?;
	octree.construct_octree().context("Uniform construction")?;

	for entry in &config.octree.refine {
		let node = resolve_path(&octree, &entry.path)
			.with_context(|| format!("Refine path {:?} does not reach a node", entry.path))?;
		octree
			.subdivide_recursively(node, entry.depth)
			.with_context(|| format!("Refining {:?}", entry.path))?;
		debug!("refined {:?} by {} levels", entry.path, entry.depth);
	}

	Ok(octree)
}

/// Follow `path` (child octants) down from the root.
fn resolve_path(octree: &Octree, path: &[usize]) -> Option<NodeId> {
	path.iter().try_fold(octree.root(), |id, &octant| {
		octree.node(id).and_then(|node| node.child(octant))
	})
}

fn run_frames(mut octree: Octree, config: &Config, frames: u32) -> Result<()> {
	let mut driver = FrameDriver::new(config.frame_config());
	let mut grid = GridBuffer::host();

	for index in 0..frames {
		let camera = config.camera(index);
		let mut target = RecordingTarget::new();
		let report = driver
			.run_frame(&mut octree, &mut grid, &camera, &mut target)
			.with_context(|| format!("Frame {}", index))?;

		info!(
			"turn {}: {}/{} hits, {} nodes drawn, {} voxels, {} vertices, {} draw calls ({} us sweep, {} us mesh)",
			report.turn,
			report.hits,
			report.rays_cast,
			report.nodes_drawn,
			report.voxels_emitted,
			report.vertices,
			target.draw_calls(),
			report.sweep_us,
			report.mesh_us
		);
	}

	let metrics = driver.metrics();
	println!(
		"\nDone! {} frames, hit rate {:.1}%, {} nodes tagged",
		metrics.frames,
		metrics.hit_rate() * 100.0,
		metrics.nodes_tagged
	);
	println!(
		"  sweep avg {:.0} us, mesh avg {:.0} us, last upload {:.3} MiB",
		metrics.avg_sweep_timing_us(),
		metrics.avg_mesh_timing_us(),
		metrics.upload_mb()
	);
	if let Some((fastest, slowest)) = metrics.sweep_timing_range_us() {
		println!("  sweep range {} .. {} us", fastest, slowest);
	}
	if let Some((fastest, slowest)) = metrics.mesh_timing_range_us() {
		println!("  mesh range {} .. {} us", fastest, slowest);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_applies_refinement() {
		let config = Config::parse(
			r#"
			[octree]
			min_voxel_size = 0.5
			refine = [{ path = [3], depth = 1 }]
			"#,
		)
		.unwrap();
		let octree = build_octree(&config).unwrap();
		assert_eq!(octree.len(), 1 + 8 + 8);
		assert_eq!(octree.height(), 2);
	}

	#[test]
	fn test_unreachable_refine_path_is_an_error() {
		let config = Config::parse(
			r#"
			[octree]
			min_voxel_size = 0.5
			refine = [{ path = [3, 1], depth = 1 }]
			"#,
		)
		.unwrap();
		assert!(build_octree(&config).is_err());
	}

	#[test]
	fn test_resolve_path() {
		let mut octree = Octree::new(voxel_svo::OctreeConfig::default()).unwrap();
		octree.subdivide_recursively(octree.root(), 2).unwrap();

		assert_eq!(resolve_path(&octree, &[]), Some(octree.root()));
		let child = octree.node(octree.root()).unwrap().child(6).unwrap();
		let grandchild = octree.node(child).unwrap().child(2);
		assert_eq!(resolve_path(&octree, &[6, 2]), grandchild);
		assert_eq!(resolve_path(&octree, &[6, 2, 0]), None);
	}
}
