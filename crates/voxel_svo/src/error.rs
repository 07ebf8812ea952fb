//! Error types for octree mutation and GPU buffer uploads.
//!
//! Queries (`march`, `get_voxels_with_depth`, `count_voxels`) never fail;
//! only structural edits, flattening into caller-sized storage and buffer
//! writes can.

use thiserror::Error;

use crate::octree::NodeId;

/// Errors from octree construction and editing.
#[derive(Debug, Error, PartialEq)]
pub enum OctreeError {
  #[error("root size must be finite and positive, got {0}")]
  InvalidRootSize(f32),

  #[error("minimum voxel size must be finite and positive, got {0}")]
  InvalidMinVoxelSize(f32),

  #[error("subdivision would reach depth {levels}, limit is {max}")]
  TooDeep { levels: u32, max: u32 },

  #[error("node arena is full at {0} nodes")]
  ArenaFull(usize),

  #[error("node {0:?} does not belong to this octree")]
  UnknownNode(NodeId),

  #[error("voxel slot {0} out of range (0..8)")]
  SlotOutOfRange(usize),

  #[error("slot 0 holds the node's bounding voxel and cannot be replaced")]
  ReservedSlot,

  #[error("node {0:?} has children; payload slots are only writable on leaves")]
  NotALeaf(NodeId),

  #[error("flatten output holds {capacity} voxels but the subtree has more")]
  FlattenOverflow { capacity: usize },

  #[error(transparent)]
  Buffer(#[from] BufferError),
}

/// Errors from writing into a GPU (or host) buffer.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum BufferError {
  #[error("write of {len} bytes at offset {offset} exceeds buffer size {size}")]
  OutOfBounds {
    offset: usize,
    len: usize,
    size: usize,
  },

  #[error("full update expected {expected} bytes, got {actual}")]
  SizeMismatch { expected: usize, actual: usize },
}
