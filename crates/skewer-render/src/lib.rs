//! skewer-render: display-list drawing for the skewer demo.
//!
//! Scenes draw through the [`Renderer`] trait. [`Painter`] records the calls
//! into a [`DisplayList`]; [`GpuRenderer`] tessellates that list with lyon and
//! submits it to a wgpu surface.

use anyhow::{Context, Result};

/// Re-export wgpu for downstream crates while avoiding direct dependency leakage.
pub use wgpu;

mod allocator;
mod color;
mod display_list;
mod gpu;
mod painter;
mod pipeline;
mod renderer;
mod scene;
mod upload;

pub use allocator::{BufKey, OwnedBuffer, RenderAllocator};
pub use color::named;
pub use display_list::*;
pub use gpu::{Frame, GpuRenderer};
pub use painter::Painter;
pub use pipeline::SolidRenderer;
pub use renderer::Renderer;
pub use scene::*;
pub use upload::*;

/// Choose an sRGB surface format when available; otherwise, pick the first format.
pub fn choose_srgb_surface_format(
    adapter: &wgpu::Adapter,
    surface: &wgpu::Surface,
) -> Result<wgpu::TextureFormat> {
    let caps = surface.get_capabilities(adapter);
    if let Some(format) = caps.formats.iter().copied().find(|f| f.is_srgb()) {
        return Ok(format);
    }
    let format = caps
        .formats
        .first()
        .copied()
        .context("surface reports no supported formats")?;
    log::warn!("no sRGB surface format available; falling back to {format:?}");
    Ok(format)
}

/// Create a surface configuration for the given size, favoring FIFO present mode when present.
pub fn make_surface_config(
    adapter: &wgpu::Adapter,
    surface: &wgpu::Surface,
    width: u32,
    height: u32,
) -> Result<wgpu::SurfaceConfiguration> {
    let caps = surface.get_capabilities(adapter);
    let format = choose_srgb_surface_format(adapter, surface)?;
    let present_mode = caps
        .present_modes
        .iter()
        .copied()
        .find(|m| *m == wgpu::PresentMode::Fifo)
        .unwrap_or(wgpu::PresentMode::Fifo);
    let alpha_mode = caps
        .alpha_modes
        .iter()
        .copied()
        .find(|m| *m == wgpu::CompositeAlphaMode::Opaque)
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);
    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 1,
    })
}
