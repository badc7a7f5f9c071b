use skewer_core::{Dispatch, InputEvent};
use skewer_render::{Color, Rect, Renderer, Viewport};

use super::Scene;

const CIRCLE_RADIUS: f32 = 100.0;
const SQUARE_SIDE: f32 = 100.0;

/// Fixed drawing smoke test: black circle with a yellow square on top.
pub struct StaticScene {
    viewport: Viewport,
}

impl StaticScene {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    fn center(&self) -> [f32; 2] {
        [
            self.viewport.width as f32 * 0.5,
            self.viewport.height as f32 * 0.5,
        ]
    }
}

impl Scene for StaticScene {
    fn name(&self) -> &'static str {
        "static"
    }

    fn on_input(&mut self, event: InputEvent) -> Dispatch {
        match event {
            InputEvent::Quit => Dispatch::Quit,
            InputEvent::Trigger(_) => Dispatch::Ignored,
        }
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        let center = self.center();
        renderer.clear(Color::white());
        renderer.draw_circle(center, CIRCLE_RADIUS, Color::black());
        renderer.draw_rect(Rect::centered(center, SQUARE_SIDE), Color::yellow());
    }

    fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}
