use anyhow::Result;

use crate::display_list::{Command, DisplayList, Viewport};
use crate::renderer::Renderer;
use crate::scene::*;

/// Records draw calls into a [`DisplayList`].
pub struct Painter {
    list: DisplayList,
    presented: usize,
}

impl Painter {
    pub fn begin_frame(viewport: Viewport) -> Self {
        Self {
            list: DisplayList {
                viewport,
                clear: None,
                commands: Vec::new(),
            },
            presented: 0,
        }
    }

    pub fn set_clear(&mut self, color: ColorLinPremul) {
        self.list.clear = Some(color);
    }

    /// Polygons with fewer than three vertices cover no area and are dropped.
    pub fn polygon(&mut self, points: &[[f32; 2]], color: ColorLinPremul) {
        if points.len() < 3 {
            log::debug!("skipping polygon with {} vertices", points.len());
            return;
        }
        self.list.commands.push(Command::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    pub fn circle(&mut self, center: [f32; 2], radius: f32, color: ColorLinPremul) {
        self.list.commands.push(Command::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn rect(&mut self, rect: Rect, color: ColorLinPremul) {
        self.list.commands.push(Command::FillRect { rect, color });
    }

    /// Get a reference to the display list recorded so far.
    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    /// How many times `present` was called on this painter.
    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn finish(self) -> DisplayList {
        self.list
    }
}

impl Renderer for Painter {
    fn clear(&mut self, color: Color) {
        // A clear discards whatever was drawn before it in the frame.
        self.list.commands.clear();
        self.set_clear(color);
    }

    fn draw_polygon(&mut self, points: &[[f32; 2]], color: Color) {
        self.polygon(points, color);
    }

    fn draw_circle(&mut self, center: [f32; 2], radius: f32, color: Color) {
        self.circle(center, radius, color);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.rect(rect, color);
    }

    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_commands_in_order() {
        let mut p = Painter::begin_frame(Viewport { width: 600, height: 600 });
        p.clear(Color::white());
        p.draw_circle([300.0, 300.0], 100.0, Color::black());
        p.draw_rect(Rect::centered([300.0, 300.0], 100.0), Color::yellow());
        p.present().unwrap();

        let list = p.display_list();
        assert_eq!(list.clear, Some(Color::white()));
        assert_eq!(list.commands.len(), 2);
        assert!(matches!(list.commands[0], Command::FillCircle { radius, .. } if radius == 100.0));
        assert_eq!(
            list.commands[1],
            Command::FillRect {
                rect: Rect::new(250.0, 250.0, 100.0, 100.0),
                color: Color::yellow()
            }
        );
        assert_eq!(p.presented(), 1);
    }

    #[test]
    fn clear_discards_earlier_draws() {
        let mut p = Painter::begin_frame(Viewport::default());
        p.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::black());
        p.clear(Color::yellow());
        assert!(p.display_list().commands.is_empty());
    }

    #[test]
    fn degenerate_polygons_are_dropped() {
        let mut p = Painter::begin_frame(Viewport::default());
        p.draw_polygon(&[[0.0, 0.0], [1.0, 1.0]], Color::blue());
        assert!(p.finish().commands.is_empty());
    }
}
