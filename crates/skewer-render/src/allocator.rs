use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug)]
pub struct OwnedBuffer {
    pub buffer: wgpu::Buffer,
    pub key: BufKey,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct BufKey {
    pub size: u64,
    pub usage: wgpu::BufferUsages,
}

/// Buffer pool keyed by size and usage.
///
/// The demo redraws the same handful of shapes every frame, so the vertex and
/// index buffers of one frame fit the next one exactly and get recycled.
pub struct RenderAllocator {
    device: Arc<wgpu::Device>,
    buffer_pool: HashMap<BufKey, Vec<wgpu::Buffer>>,
}

impl RenderAllocator {
    pub fn new(device: Arc<wgpu::Device>) -> Self {
        Self {
            device,
            buffer_pool: HashMap::new(),
        }
    }

    pub fn allocate_buffer(&mut self, key: BufKey) -> OwnedBuffer {
        let entry = self.buffer_pool.entry(key).or_default();
        let buffer = entry.pop().unwrap_or_else(|| {
            self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("alloc:buf"),
                size: key.size,
                usage: key.usage,
                mapped_at_creation: false,
            })
        });
        OwnedBuffer { buffer, key }
    }

    pub fn release_buffer(&mut self, buf: OwnedBuffer) {
        self.buffer_pool
            .entry(buf.key)
            .or_default()
            .push(buf.buffer);
    }
}
