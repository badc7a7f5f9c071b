use crate::scene::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Closed polygon, vertices in drawing order (last connects back to first).
    FillPolygon { points: Vec<[f32; 2]>, color: ColorLinPremul },
    FillCircle { center: [f32; 2], radius: f32, color: ColorLinPremul },
    FillRect { rect: Rect, color: ColorLinPremul },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    pub viewport: Viewport,
    /// Background for the frame; `None` leaves the target cleared to black.
    pub clear: Option<ColorLinPremul>,
    pub commands: Vec<Command>,
}

impl DisplayList {
    /// Copy of this list with every color (clear included) passed through `f`.
    pub fn map_colors(&self, f: impl Fn(ColorLinPremul) -> ColorLinPremul) -> Self {
        let commands = self
            .commands
            .iter()
            .map(|cmd| match cmd {
                Command::FillPolygon { points, color } => Command::FillPolygon {
                    points: points.clone(),
                    color: f(*color),
                },
                Command::FillCircle {
                    center,
                    radius,
                    color,
                } => Command::FillCircle {
                    center: *center,
                    radius: *radius,
                    color: f(*color),
                },
                Command::FillRect { rect, color } => Command::FillRect {
                    rect: *rect,
                    color: f(*color),
                },
            })
            .collect();
        Self {
            viewport: self.viewport,
            clear: self.clear.map(&f),
            commands,
        }
    }
}
