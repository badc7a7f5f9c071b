use crate::error::{Result, TransformError, ensure_finite};
use crate::ops;
use crate::point::Point2;
use crate::preset::Preset;

/// Immutable baseline plus a working copy re-derived on every preset.
///
/// The working pair is rebuilt from the baseline before each preset, so repeated
/// presses of the same key never accumulate floating-point drift.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeState {
    baseline_points: Vec<Point2>,
    baseline_pivot: Point2,
    current_points: Vec<Point2>,
    current_pivot: Point2,
}

impl ShapeState {
    pub fn new(points: Vec<Point2>, pivot: Point2) -> Self {
        Self {
            current_points: points.clone(),
            current_pivot: pivot,
            baseline_points: points,
            baseline_pivot: pivot,
        }
    }

    /// Regular `sides`-gon around `center`, turned by `offset_degrees` about the center.
    ///
    /// Vertex `i` starts at angle `i * 2π / sides`; the offset is applied with the
    /// same rotation primitive the presets use.
    pub fn regular_polygon(
        center: Point2,
        radius: f64,
        sides: usize,
        offset_degrees: f64,
    ) -> Result<Self> {
        if sides < 3 {
            return Err(TransformError::TooFewSides(sides));
        }
        ensure_finite("regular_polygon", "center.x", center.x)?;
        ensure_finite("regular_polygon", "center.y", center.y)?;
        ensure_finite("regular_polygon", "radius", radius)?;

        let step = 2.0 * std::f64::consts::PI / sides as f64;
        let mut points: Vec<Point2> = (0..sides)
            .map(|i| {
                let angle = i as f64 * step;
                Point2::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect();
        ops::rotate(&mut points, center, offset_degrees)?;
        Ok(Self::new(points, center))
    }

    /// Copy the baseline back into the working pair.
    pub fn reset(&mut self) {
        self.current_points.clone_from(&self.baseline_points);
        self.current_pivot = self.baseline_pivot;
    }

    /// Reset, then run the preset's steps in order.
    ///
    /// There is no rollback: when step `k` fails, steps before it stay applied.
    /// The baseline is never touched.
    pub fn apply_preset(&mut self, preset: &Preset) -> Result<()> {
        self.reset();
        for op in &preset.ops {
            op.apply(&mut self.current_points, self.current_pivot)?;
        }
        Ok(())
    }

    pub fn baseline_points(&self) -> &[Point2] {
        &self.baseline_points
    }

    pub fn baseline_pivot(&self) -> Point2 {
        self.baseline_pivot
    }

    pub fn current_points(&self) -> &[Point2] {
        &self.current_points
    }

    pub fn current_pivot(&self) -> Point2 {
        self.current_pivot
    }

    pub fn len(&self) -> usize {
        self.baseline_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baseline_points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::Op;
    use crate::preset::Trigger;

    fn pentagon() -> ShapeState {
        ShapeState::regular_polygon(Point2::new(300.0, 300.0), 150.0, 5, 54.0).unwrap()
    }

    #[test]
    fn polygon_vertices_sit_on_the_circle() {
        let shape = pentagon();
        assert_eq!(shape.len(), 5);
        for p in shape.baseline_points() {
            assert!((p.distance(Point2::new(300.0, 300.0)) - 150.0).abs() < 1e-9);
        }
    }

    #[test]
    fn offset_turns_first_vertex() {
        // 54° from +x, y-down: below and to the right of the center.
        let first = pentagon().baseline_points()[0];
        let rad = 54f64.to_radians();
        assert!((first.x - (300.0 + 150.0 * rad.cos())).abs() < 1e-9);
        assert!((first.y - (300.0 + 150.0 * rad.sin())).abs() < 1e-9);
    }

    #[test]
    fn too_few_sides() {
        let err = ShapeState::regular_polygon(Point2::ORIGIN, 1.0, 2, 0.0).unwrap_err();
        assert_eq!(err, TransformError::TooFewSides(2));
    }

    #[test]
    fn failed_step_keeps_earlier_steps() {
        let mut shape = pentagon();
        let preset = Preset::new(
            Trigger::new(1).unwrap(),
            vec![
                Op::Translate { dx: 10.0, dy: 0.0 },
                Op::Scale { sx: f64::NAN, sy: 1.0 },
            ],
        );
        assert!(shape.apply_preset(&preset).is_err());
        for (cur, base) in shape.current_points().iter().zip(shape.baseline_points()) {
            assert_eq!(cur.x, base.x + 10.0);
            assert_eq!(cur.y, base.y);
        }
        assert_eq!(shape.len(), shape.current_points().len());
    }

    #[test]
    fn reset_restores_baseline() {
        let mut shape = pentagon();
        let preset = Preset::new(Trigger::new(2).unwrap(), vec![Op::Rotate { degrees: 24.0 }]);
        shape.apply_preset(&preset).unwrap();
        assert_ne!(shape.current_points(), shape.baseline_points());
        shape.reset();
        assert_eq!(shape.current_points(), shape.baseline_points());
        assert_eq!(shape.current_pivot(), shape.baseline_pivot());
    }
}
