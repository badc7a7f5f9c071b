use anyhow::Result;

use crate::scene::{Color, Rect};

/// Drawing surface the scenes talk to.
///
/// Coordinates are window pixels: origin top-left, y growing downward.
pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn draw_polygon(&mut self, points: &[[f32; 2]], color: Color);
    fn draw_circle(&mut self, center: [f32; 2], radius: f32, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    /// Flush everything drawn since the last present to the target.
    fn present(&mut self) -> Result<()>;
}
