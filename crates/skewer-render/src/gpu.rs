use std::sync::Arc;

use anyhow::Result;

use crate::allocator::RenderAllocator;
use crate::display_list::{DisplayList, Viewport};
use crate::painter::Painter;
use crate::pipeline::SolidRenderer;
use crate::renderer::Renderer;
use crate::scene::{Color, Rect};
use crate::upload::{DEFAULT_TOLERANCE, tessellate_display_list, upload_geometry};

/// Owns the GPU side of drawing: pipeline, viewport uniform and buffer pool.
pub struct GpuRenderer {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    allocator: RenderAllocator,
    solid: SolidRenderer,
    vp_buffer: wgpu::Buffer,
    vp_bind_group: wgpu::BindGroup,
    tolerance: f32,
    // Target stores values verbatim, so colors must be gamma-encoded first.
    encode_srgb: bool,
}

impl GpuRenderer {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        target_format: wgpu::TextureFormat,
    ) -> Self {
        let solid = SolidRenderer::new(device.clone(), target_format);
        let vp_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("viewport-uniform"),
            size: 16,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let vp_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("solid-vp-bg"),
            layout: solid.viewport_bgl(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: vp_buffer.as_entire_binding(),
            }],
        });
        let allocator = RenderAllocator::new(device.clone());
        let encode_srgb = !target_format.is_srgb();
        if encode_srgb {
            log::warn!("{target_format:?} is not an sRGB format; encoding colors in the shader inputs");
        }
        Self {
            device,
            queue,
            allocator,
            solid,
            vp_buffer,
            vp_bind_group,
            tolerance: DEFAULT_TOLERANCE,
            encode_srgb,
        }
    }

    /// Flattening tolerance for circles, in pixels.
    pub fn set_tolerance(&mut self, tolerance: f32) {
        self.tolerance = tolerance.max(0.001);
    }

    /// Acquire the next surface texture and start recording a frame.
    pub fn begin_frame<'a>(
        &'a mut self,
        surface: &wgpu::Surface<'static>,
        viewport: Viewport,
    ) -> Result<Frame<'a>> {
        let texture = surface.get_current_texture()?;
        Ok(Frame {
            renderer: self,
            texture: Some(texture),
            painter: Painter::begin_frame(viewport),
        })
    }

    /// Draw `list` into `view`, clearing it first.
    pub fn render(&mut self, view: &wgpu::TextureView, list: &DisplayList) {
        let encoded;
        let list = if self.encode_srgb {
            encoded = list.map_colors(|c| c.srgb_encoded());
            &encoded
        } else {
            list
        };
        let geometry = tessellate_display_list(list, self.tolerance);
        let scene = upload_geometry(&mut self.allocator, &self.queue, &geometry);
        let vp = skewer_shaders::viewport_uniform(list.viewport.width, list.viewport.height);
        self.queue
            .write_buffer(&self.vp_buffer, 0, bytemuck::bytes_of(&vp));

        let clear = list.clear.map(|c| c.to_wgpu()).unwrap_or(wgpu::Color::BLACK);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("solid-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            if scene.indices > 0 {
                self.solid.record(&mut pass, &self.vp_bind_group, &scene);
            }
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        self.allocator.release_buffer(scene.vertex);
        self.allocator.release_buffer(scene.index);
    }
}

/// One frame in flight: records draw calls, then renders and presents on `present`.
pub struct Frame<'a> {
    renderer: &'a mut GpuRenderer,
    texture: Option<wgpu::SurfaceTexture>,
    painter: Painter,
}

impl Renderer for Frame<'_> {
    fn clear(&mut self, color: Color) {
        self.painter.clear(color);
    }

    fn draw_polygon(&mut self, points: &[[f32; 2]], color: Color) {
        self.painter.draw_polygon(points, color);
    }

    fn draw_circle(&mut self, center: [f32; 2], radius: f32, color: Color) {
        self.painter.draw_circle(center, radius, color);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.painter.draw_rect(rect, color);
    }

    fn present(&mut self) -> Result<()> {
        let Some(texture) = self.texture.take() else {
            anyhow::bail!("frame already presented");
        };
        let viewport = self.painter.display_list().viewport;
        let painter = std::mem::replace(&mut self.painter, Painter::begin_frame(viewport));
        let list = painter.finish();
        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(&view, &list);
        texture.present();
        Ok(())
    }
}
