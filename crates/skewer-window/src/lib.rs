//! skewer-window: minimal winit + wgpu window/event wrapper.
//!
//! Responsibilities:
//! - Create window + surface + device/queue.
//! - Manage surface configuration and resizing.
//! - Translate key presses into engine input and dispatch redraws.

use std::sync::Arc;

use anyhow::{Context, Result};
use skewer_core::InputEvent;
use skewer_render::{make_surface_config, wgpu};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::window::{Window, WindowBuilder};

pub mod events;

use events::{SkewerWindowEvent, translate_window_event};

pub struct SkewerWindow {
    event_loop: EventLoop<()>,
    // Leaked so the surface can borrow it for 'static.
    window: &'static Window,
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'static>,
    _adapter: wgpu::Adapter,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    scale_factor: f64,
}

pub struct WindowCtx<'a> {
    window: &'a Window,
    device: &'a Arc<wgpu::Device>,
    queue: &'a Arc<wgpu::Queue>,
    surface: &'a wgpu::Surface<'static>,
    config: &'a mut wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    scale_factor: f64,
    elwt: &'a EventLoopWindowTarget<()>,
}

impl<'a> WindowCtx<'a> {
    pub fn window(&self) -> &Window {
        self.window
    }
    pub fn device_arc(&self) -> Arc<wgpu::Device> {
        self.device.clone()
    }
    pub fn queue_arc(&self) -> Arc<wgpu::Queue> {
        self.queue.clone()
    }
    pub fn surface(&self) -> &wgpu::Surface<'static> {
        self.surface
    }
    pub fn surface_config(&self) -> &wgpu::SurfaceConfiguration {
        self.config
    }
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Re-apply the current configuration after the surface was lost or outdated.
    pub fn reconfigure_surface(&mut self) {
        if self.size.width > 0 && self.size.height > 0 {
            self.config.width = self.size.width;
            self.config.height = self.size.height;
        }
        log::warn!(
            "reconfiguring surface at {}x{}",
            self.config.width,
            self.config.height
        );
        self.surface.configure(self.device, self.config);
    }

    /// Leave the event loop after the current event.
    pub fn exit(&self) {
        self.elwt.exit();
    }
}

pub trait EventHandler {
    fn init(&mut self, _ctx: &mut WindowCtx) -> Result<()> {
        Ok(())
    }
    fn on_resize(&mut self, _ctx: &mut WindowCtx, _size: PhysicalSize<u32>) -> Result<()> {
        Ok(())
    }
    fn on_input(&mut self, _ctx: &mut WindowCtx, _input: InputEvent) -> Result<()> {
        Ok(())
    }
    fn on_redraw(&mut self, _ctx: &mut WindowCtx) -> Result<()> {
        Ok(())
    }
}

fn report(what: &str, result: Result<()>) {
    if let Err(e) = result {
        log::error!("{what} failed: {e:#}");
    }
}

impl SkewerWindow {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(width.max(1), height.max(1)))
            .build(&event_loop)?;
        let window: &'static Window = Box::leak(Box::new(window));

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .context("no suitable GPU adapter found")?;
        let (device, queue) = pollster::block_on(
            adapter.request_device(&wgpu::DeviceDescriptor::default(), None),
        )?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        let config = make_surface_config(&adapter, &surface, size.width, size.height)?;
        surface.configure(&device, &config);

        Ok(Self {
            event_loop,
            window,
            _instance: instance,
            surface,
            _adapter: adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
            config,
            size,
            scale_factor,
        })
    }

    pub fn window(&self) -> &Window {
        self.window
    }

    pub fn run(mut self, mut handler: impl EventHandler + 'static) -> Result<()> {
        let mut needs_init = true;

        macro_rules! ctx {
            ($elwt:expr) => {
                WindowCtx {
                    window: self.window,
                    device: &self.device,
                    queue: &self.queue,
                    surface: &self.surface,
                    config: &mut self.config,
                    size: self.size,
                    scale_factor: self.scale_factor,
                    elwt: $elwt,
                }
            };
        }

        Ok(self.event_loop.run(move |event, elwt| {
            if redraws_after(&event) {
                self.window.request_redraw();
            }
            match event {
                Event::Resumed => {
                    if needs_init {
                        report("init", handler.init(&mut ctx!(elwt)));
                        needs_init = false;
                    }
                }
                Event::WindowEvent { window_id, event } if window_id == self.window.id() => {
                    let Some(translated) = translate_window_event(&event) else {
                        return;
                    };
                    match translated {
                        SkewerWindowEvent::CloseRequested => {
                            log::info!("window closed");
                            elwt.exit();
                        }
                        SkewerWindowEvent::Resized(new_size) => {
                            self.size = new_size;
                            if new_size.width > 0 && new_size.height > 0 {
                                self.config.width = new_size.width;
                                self.config.height = new_size.height;
                                self.surface.configure(&self.device, &self.config);
                            }
                            report("resize", handler.on_resize(&mut ctx!(elwt), new_size));
                        }
                        SkewerWindowEvent::ScaleFactorChanged(scale_factor) => {
                            log::debug!("scale factor now {scale_factor}");
                            self.scale_factor = scale_factor;
                        }
                        SkewerWindowEvent::Input(input) => {
                            report("input", handler.on_input(&mut ctx!(elwt), input));
                        }
                        SkewerWindowEvent::RedrawRequested => {
                            report("redraw", handler.on_redraw(&mut ctx!(elwt)));
                        }
                    }
                }
                _ => {}
            }
        })?)
    }
}

/// The shape is drawn every frame: once at startup, after resizes, and
/// whenever the loop goes idle, whether or not a preset just ran.
pub fn redraws_after(event: &Event<()>) -> bool {
    matches!(
        event,
        Event::Resumed
            | Event::AboutToWait
            | Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            }
    )
}
