//! Engine-agnostic metrics collection for visibility frames.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use voxel_svo::metrics::{FrameMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // Record one sweep:
//! metrics.record_sweep(rays, hits, sweep_us);
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create a new rolling window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
    /// Compute the sum of all values.
    pub fn sum(&self) -> T {
        self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
    }
}

impl RollingWindow<u64> {
    /// Compute the average of all values.
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }

    /// Get min and max values.
    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = self.buffer.iter().min()?;
        let max = self.buffer.iter().max()?;
        Some((*min, *max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128) // ~2 seconds at 60fps
    }
}

/// Per-frame visibility statistics.
///
/// Counters are cumulative over the session; `last_*` fields hold the most
/// recent frame.
#[derive(Debug, Clone)]
pub struct FrameMetrics {
    /// Frames recorded.
    pub frames: u64,

    // Sweep
    /// Total rays marched.
    pub rays_cast: u64,
    /// Total rays that hit a voxel.
    pub hits: u64,
    /// Total hit nodes newly tagged.
    pub nodes_tagged: u64,

    // Mesh
    /// Visible voxels collected in the last frame.
    pub last_voxels_emitted: u64,
    /// Vertices uploaded in the last frame.
    pub last_vertices: u64,
    /// Bytes uploaded in the last frame.
    pub last_upload_bytes: u64,

    // Timing
    /// Rolling window of sweep (build + march) times in microseconds.
    pub sweep_timings: RollingWindow<u64>,
    /// Rolling window of mesh rebuild + upload times in microseconds.
    pub mesh_timings: RollingWindow<u64>,
    pub last_sweep_us: u64,
    pub last_mesh_us: u64,
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self {
            frames: 0,
            rays_cast: 0,
            hits: 0,
            nodes_tagged: 0,
            last_voxels_emitted: 0,
            last_vertices: 0,
            last_upload_bytes: 0,
            sweep_timings: RollingWindow::default(),
            mesh_timings: RollingWindow::default(),
            last_sweep_us: 0,
            last_mesh_us: 0,
        }
    }
}

impl FrameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything except the cumulative frame count.
    pub fn reset(&mut self) {
        let frames = self.frames;
        *self = Self::default();
        self.frames = frames;
    }

    /// Record one sweep: rays marched, rays that hit, and its duration.
    pub fn record_sweep(&mut self, rays: usize, hits: usize, timing_us: u64) {
        if !is_enabled() {
            return;
        }
        self.frames += 1;
        self.rays_cast += rays as u64;
        self.hits += hits as u64;
        self.sweep_timings.push(timing_us);
        self.last_sweep_us = timing_us;
    }

    pub fn record_tagging(&mut self, nodes: usize) {
        if is_enabled() {
            self.nodes_tagged += nodes as u64;
        }
    }

    /// Record the collected voxel set and the resulting upload.
    pub fn record_mesh(&mut self, voxels: usize, vertices: usize, bytes: usize, timing_us: u64) {
        if !is_enabled() {
            return;
        }
        self.last_voxels_emitted = voxels as u64;
        self.last_vertices = vertices as u64;
        self.last_upload_bytes = bytes as u64;
        self.mesh_timings.push(timing_us);
        self.last_mesh_us = timing_us;
    }

    /// Fraction of rays that hit something, 0 before the first frame.
    pub fn hit_rate(&self) -> f64 {
        if self.rays_cast == 0 {
            0.0
        } else {
            self.hits as f64 / self.rays_cast as f64
        }
    }

    pub fn avg_sweep_timing_us(&self) -> f64 {
        self.sweep_timings.average()
    }

    pub fn avg_mesh_timing_us(&self) -> f64 {
        self.mesh_timings.average()
    }

    /// Fastest and slowest sweep in the window, in microseconds.
    pub fn sweep_timing_range_us(&self) -> Option<(u64, u64)> {
        self.sweep_timings.min_max()
    }

    /// Fastest and slowest mesh rebuild in the window, in microseconds.
    pub fn mesh_timing_range_us(&self) -> Option<(u64, u64)> {
        self.mesh_timings.min_max()
    }

    /// Last upload size in MiB.
    pub fn upload_mb(&self) -> f64 {
        self.last_upload_bytes as f64 / 1_048_576.0
    }
}
