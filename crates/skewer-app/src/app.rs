use anyhow::Result;
use skewer_core::{Dispatch, InputEvent};
use skewer_render::{GpuRenderer, Renderer, Viewport, wgpu};
use skewer_window::{EventHandler, WindowCtx};
use winit::dpi::PhysicalSize;

use crate::scenes::Scene;

/// Window event handler driving one scene.
pub struct App {
    scene: Box<dyn Scene>,
    renderer: Option<GpuRenderer>,
    tolerance: f32,
}

impl App {
    pub fn new(scene: Box<dyn Scene>, tolerance: f32) -> Self {
        Self {
            scene,
            renderer: None,
            tolerance,
        }
    }
}

/// What to do when the next surface texture cannot be acquired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameRecovery {
    Reconfigure,
    Retry,
    Fail,
}

fn recovery_for(err: &anyhow::Error) -> FrameRecovery {
    match err.downcast_ref::<wgpu::SurfaceError>() {
        Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => FrameRecovery::Reconfigure,
        Some(wgpu::SurfaceError::Timeout) => FrameRecovery::Retry,
        _ => FrameRecovery::Fail,
    }
}

fn viewport(size: PhysicalSize<u32>) -> Viewport {
    Viewport {
        width: size.width,
        height: size.height,
    }
}

impl EventHandler for App {
    fn init(&mut self, ctx: &mut WindowCtx) -> Result<()> {
        let format = ctx.surface_config().format;
        let mut renderer = GpuRenderer::new(ctx.device_arc(), ctx.queue_arc(), format);
        renderer.set_tolerance(self.tolerance);
        self.renderer = Some(renderer);
        log::info!("scene {} ready ({format:?})", self.scene.name());
        ctx.request_redraw();
        Ok(())
    }

    fn on_resize(&mut self, _ctx: &mut WindowCtx, size: PhysicalSize<u32>) -> Result<()> {
        self.scene.on_resize(viewport(size));
        Ok(())
    }

    fn on_input(&mut self, ctx: &mut WindowCtx, input: InputEvent) -> Result<()> {
        match self.scene.on_input(input) {
            Dispatch::Quit => {
                log::info!("quit requested");
                ctx.exit();
            }
            Dispatch::Applied(trigger) => {
                log::info!("applied preset {trigger}");
                ctx.request_redraw();
            }
            Dispatch::Ignored | Dispatch::Failed(_) => ctx.request_redraw(),
        }
        Ok(())
    }

    fn on_redraw(&mut self, ctx: &mut WindowCtx) -> Result<()> {
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };
        let size = ctx.size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        let mut frame = match renderer.begin_frame(ctx.surface(), viewport(size)) {
            Ok(frame) => frame,
            Err(e) => {
                match recovery_for(&e) {
                    FrameRecovery::Reconfigure => ctx.reconfigure_surface(),
                    FrameRecovery::Retry => log::warn!("skipping frame: {e}"),
                    FrameRecovery::Fail => return Err(e),
                }
                ctx.request_redraw();
                return Ok(());
            }
        };
        self.scene.draw(&mut frame);
        frame.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_surfaces_are_reconfigured() {
        for err in [wgpu::SurfaceError::Lost, wgpu::SurfaceError::Outdated] {
            assert_eq!(recovery_for(&anyhow::Error::from(err)), FrameRecovery::Reconfigure);
        }
    }

    #[test]
    fn timeouts_retry_on_the_next_frame() {
        let err = anyhow::Error::from(wgpu::SurfaceError::Timeout);
        assert_eq!(recovery_for(&err), FrameRecovery::Retry);
    }

    #[test]
    fn other_failures_propagate() {
        let oom = anyhow::Error::from(wgpu::SurfaceError::OutOfMemory);
        assert_eq!(recovery_for(&oom), FrameRecovery::Fail);
        assert_eq!(recovery_for(&anyhow::anyhow!("frame already presented")), FrameRecovery::Fail);
    }
}
