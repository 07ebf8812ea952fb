//! Narrow GPU binding contract.
//!
//! The crate never talks to a graphics API directly. Anything that can hold
//! bytes and issue draws (a wgpu wrapper, a GL context, the in-memory
//! [`HostBuffer`](super::HostBuffer)) plugs in through these two traits.

use crate::error::BufferError;

/// A resizable byte buffer living on the device.
pub trait GpuBuffer {
  /// Current size in bytes.
  fn size(&self) -> usize;

  /// Reallocate to `bytes`. Contents after a resize are unspecified.
  fn resize(&mut self, bytes: usize);

  /// Write `data` at `offset`. The range must fit in the current size.
  fn write(&mut self, data: &[u8], offset: usize) -> Result<(), BufferError>;

  /// Replace the whole contents. `data` must match the current size.
  fn update(&mut self, data: &[u8]) -> Result<(), BufferError> {
    if data.len() != self.size() {
      return Err(BufferError::SizeMismatch {
        expected: self.size(),
        actual: data.len(),
      });
    }
    self.write(data, 0)
  }
}

/// Something that binds buffers and issues draw calls.
pub trait DrawTarget {
  type Buffer: GpuBuffer;

  /// Bind `buffer` as vertex attribute `slot` with `components` floats per
  /// vertex.
  fn bind_vertex(&mut self, buffer: &Self::Buffer, slot: u32, components: u32);

  /// Bind `buffer` as the `u32` index buffer.
  fn bind_indices(&mut self, buffer: &Self::Buffer);

  /// Indexed triangle draw of `count` indices.
  fn draw_elements(&mut self, count: u32);

  /// Non-indexed triangle draw.
  fn draw_arrays(&mut self, first: u32, count: u32);
}
