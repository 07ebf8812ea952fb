//! In-memory backend: a `Vec<u8>` buffer and a draw recorder.
//!
//! Used by headless runs (`svo_probe`), benches and tests.

use super::device::{DrawTarget, GpuBuffer};
use crate::error::BufferError;

/// Host-side stand-in for a device buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostBuffer {
  bytes: Vec<u8>,
  /// Id reported in recorded bind commands.
  id: u32,
}

impl HostBuffer {
  pub fn new() -> Self {
    Self::default()
  }

  /// Buffer tagged with `id` so recorded binds can be told apart.
  pub fn with_id(id: u32) -> Self {
    Self {
      bytes: Vec::new(),
      id,
    }
  }

  #[inline]
  pub fn id(&self) -> u32 {
    self.id
  }

  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }
}

impl GpuBuffer for HostBuffer {
  #[inline]
  fn size(&self) -> usize {
    self.bytes.len()
  }

  fn resize(&mut self, bytes: usize) {
    self.bytes.clear();
    self.bytes.resize(bytes, 0);
  }

  fn write(&mut self, data: &[u8], offset: usize) -> Result<(), BufferError> {
    let size = self.bytes.len();
    let out_of_bounds = BufferError::OutOfBounds {
      offset,
      len: data.len(),
      size,
    };
    let end = offset.checked_add(data.len()).ok_or(out_of_bounds)?;
    let dst = self.bytes.get_mut(offset..end).ok_or(out_of_bounds)?;
    dst.copy_from_slice(data);
    Ok(())
  }
}

/// One call made against a [`RecordingTarget`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCommand {
  BindVertex { buffer: u32, slot: u32, components: u32 },
  BindIndices { buffer: u32 },
  DrawElements { count: u32 },
  DrawArrays { first: u32, count: u32 },
}

/// Draw target that records every call instead of rendering.
#[derive(Clone, Debug, Default)]
pub struct RecordingTarget {
  commands: Vec<DrawCommand>,
}

impl RecordingTarget {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn commands(&self) -> &[DrawCommand] {
    &self.commands
  }

  /// Number of draw calls (indexed or not) recorded so far.
  pub fn draw_calls(&self) -> usize {
    self
      .commands
      .iter()
      .filter(|c| matches!(c, DrawCommand::DrawElements { .. } | DrawCommand::DrawArrays { .. }))
      .count()
  }

  pub fn clear(&mut self) {
    self.commands.clear();
  }
}

impl DrawTarget for RecordingTarget {
  type Buffer = HostBuffer;

  fn bind_vertex(&mut self, buffer: &HostBuffer, slot: u32, components: u32) {
    self.commands.push(DrawCommand::BindVertex {
      buffer: buffer.id,
      slot,
      components,
    });
  }

  fn bind_indices(&mut self, buffer: &HostBuffer) {
    self
      .commands
      .push(DrawCommand::BindIndices { buffer: buffer.id });
  }

  fn draw_elements(&mut self, count: u32) {
    self.commands.push(DrawCommand::DrawElements { count });
  }

  fn draw_arrays(&mut self, first: u32, count: u32) {
    self.commands.push(DrawCommand::DrawArrays { first, count });
  }
}

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;
