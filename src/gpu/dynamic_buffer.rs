//! Growable GPU buffers.
//!
//! Buffers grow with a 2x strategy when data exceeds capacity and never
//! shrink (GPU buffers cannot be resized in place).

use std::marker::PhantomData;

/// Minimum allocation in bytes.
const MIN_CAPACITY_BYTES: u64 = 64;

/// A typed GPU buffer that reallocates when a write does not fit.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: u64, // bytes
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Empty buffer with room for `capacity` items.
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = byte_len::<T>(capacity).max(MIN_CAPACITY_BYTES);
        Self {
            buffer: create(device, label, capacity, usage),
            capacity,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Upload `data`, growing first if needed.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = bytes.len() as u64;

        if needed > self.capacity {
            let new_capacity = grown_capacity(self.capacity, needed);
            log::debug!(
                "{}: growing {} -> {} bytes",
                self.label,
                self.capacity,
                new_capacity
            );
            self.buffer = create(device, &self.label, new_capacity, self.usage);
            self.capacity = new_capacity;
        }

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len();
    }

    /// The underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Whether the last [`write`](Self::write) was empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

fn byte_len<T>(items: usize) -> u64 {
    (size_of::<T>() * items) as u64
}

/// 2x growth, at least 1 KiB more than before.
fn grown_capacity(current: u64, needed: u64) -> u64 {
    (needed * 2).max(current + 1024)
}

fn create(
    device: &wgpu::Device,
    label: &str,
    size: u64,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_doubles_large_requests() {
        assert_eq!(grown_capacity(64, 4096), 8192);
    }

    #[test]
    fn growth_adds_at_least_one_kib() {
        assert_eq!(grown_capacity(4096, 4100), 8200);
        assert_eq!(grown_capacity(8192, 8200), 16400);
        assert_eq!(grown_capacity(2048, 2050), 4100);
        assert_eq!(grown_capacity(4000, 2100), 5024);
    }

    #[test]
    fn byte_len_scales_with_item_size() {
        assert_eq!(byte_len::<[f32; 2]>(10), 80);
        assert_eq!(byte_len::<u8>(0), 0);
    }
}
