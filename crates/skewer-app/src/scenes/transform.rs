use skewer_config::SkewerConfig;
use skewer_core::{Dispatch, InputDispatcher, InputEvent, Point2, PresetTable, ShapeState};
use skewer_render::{Color, Renderer, Viewport};

use super::Scene;

/// The pentagon demo: number keys re-derive the shape from its baseline.
pub struct TransformScene {
    state: ShapeState,
    dispatcher: InputDispatcher,
    background: Color,
    fill: Color,
}

impl TransformScene {
    pub fn new(state: ShapeState, dispatcher: InputDispatcher) -> Self {
        Self {
            state,
            dispatcher,
            background: Color::yellow(),
            fill: Color::blue(),
        }
    }

    /// Build the baseline polygon and preset table described by `config`.
    pub fn from_config(config: &SkewerConfig, viewport: Viewport) -> skewer_core::Result<Self> {
        let shape = &config.shape;
        let center = Point2::from(shape.center_for(viewport.width, viewport.height));
        let state = ShapeState::regular_polygon(
            center,
            shape.radius,
            shape.sides,
            shape.rotation_offset,
        )?;
        let presets = PresetTable::standard().merge(config.presets.iter().flatten().cloned());
        log::info!(
            "transform scene: {} sides around ({}, {}), {} presets",
            shape.sides,
            center.x,
            center.y,
            presets.len()
        );
        Ok(Self {
            state,
            dispatcher: InputDispatcher::new(presets),
            background: Color::rgb(config.colors.background),
            fill: Color::rgb(config.colors.fill),
        })
    }

    pub fn state(&self) -> &ShapeState {
        &self.state
    }
}

impl Scene for TransformScene {
    fn name(&self) -> &'static str {
        "transform"
    }

    fn on_input(&mut self, event: InputEvent) -> Dispatch {
        self.dispatcher.dispatch(&mut self.state, event)
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.clear(self.background);
        let points: Vec<[f32; 2]> = self
            .state
            .current_points()
            .iter()
            .map(|p| p.to_f32())
            .collect();
        renderer.draw_polygon(&points, self.fill);
    }
}
