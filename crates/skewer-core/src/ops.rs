//! Primitive transforms applied in place to a point sequence.
//!
//! Every pivoted operation moves each point into pivot-relative coordinates,
//! applies a 2x2 map, and moves it back. The pivot itself is only read.
//! Parameters are validated up front, so a failing call leaves `points` untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::affine::Affine2;
use crate::error::{Result, ensure_finite};
use crate::point::Point2;

fn ensure_pivot(op: &'static str, pivot: Point2) -> Result<()> {
    ensure_finite(op, "pivot.x", pivot.x)?;
    ensure_finite(op, "pivot.y", pivot.y)
}

fn map_about(points: &mut [Point2], pivot: Point2, m: &Affine2) {
    for p in points.iter_mut() {
        *p = m.apply_about(*p, pivot);
    }
}

/// Add `offset` to every point. Pivot independent.
pub fn translate(points: &mut [Point2], offset: Point2) -> Result<()> {
    ensure_finite("translate", "offset.x", offset.x)?;
    ensure_finite("translate", "offset.y", offset.y)?;
    for p in points.iter_mut() {
        *p += offset;
    }
    Ok(())
}

/// Rotate by `degrees` about `pivot`; see [`Affine2::rotate`] for the direction convention.
pub fn rotate(points: &mut [Point2], pivot: Point2, degrees: f64) -> Result<()> {
    ensure_finite("rotate", "degrees", degrees)?;
    ensure_pivot("rotate", pivot)?;
    map_about(points, pivot, &Affine2::rotate_deg(degrees));
    Ok(())
}

/// Negate the pivot-relative y coordinate.
pub fn reflect_across_horizontal_axis(points: &mut [Point2], pivot: Point2) -> Result<()> {
    ensure_pivot("reflect_across_horizontal_axis", pivot)?;
    map_about(points, pivot, &Affine2::reflect_horizontal());
    Ok(())
}

/// Negate the pivot-relative x coordinate.
pub fn reflect_across_vertical_axis(points: &mut [Point2], pivot: Point2) -> Result<()> {
    ensure_pivot("reflect_across_vertical_axis", pivot)?;
    map_about(points, pivot, &Affine2::reflect_vertical());
    Ok(())
}

/// Scale pivot-relative coordinates. Zero and negative factors are accepted.
pub fn scale(points: &mut [Point2], pivot: Point2, sx: f64, sy: f64) -> Result<()> {
    ensure_finite("scale", "sx", sx)?;
    ensure_finite("scale", "sy", sy)?;
    ensure_pivot("scale", pivot)?;
    map_about(points, pivot, &Affine2::scale(sx, sy));
    Ok(())
}

/// Lean the shape: relative x gains `shx * y`, relative y gains `shy * x`.
/// `shx * shy == 1` is singular and still accepted.
pub fn shear(points: &mut [Point2], pivot: Point2, shx: f64, shy: f64) -> Result<()> {
    ensure_finite("shear", "shx", shx)?;
    ensure_finite("shear", "shy", shy)?;
    ensure_pivot("shear", pivot)?;
    map_about(points, pivot, &Affine2::shear(shx, shy));
    Ok(())
}

/// One primitive invocation inside a preset.
///
/// Tagged so preset tables read naturally in TOML:
/// `{ op = "scale", sx = 0.5, sy = 0.75 }`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Translate { dx: f64, dy: f64 },
    Rotate { degrees: f64 },
    ReflectHorizontal,
    ReflectVertical,
    Scale { sx: f64, sy: f64 },
    Shear { shx: f64, shy: f64 },
}

impl Op {
    pub fn apply(&self, points: &mut [Point2], pivot: Point2) -> Result<()> {
        match *self {
            Op::Translate { dx, dy } => translate(points, Point2::new(dx, dy)),
            Op::Rotate { degrees } => rotate(points, pivot, degrees),
            Op::ReflectHorizontal => reflect_across_horizontal_axis(points, pivot),
            Op::ReflectVertical => reflect_across_vertical_axis(points, pivot),
            Op::Scale { sx, sy } => scale(points, pivot, sx, sy),
            Op::Shear { shx, shy } => shear(points, pivot, shx, shy),
        }
    }

    /// The full homogeneous matrix this step applies for the given pivot.
    pub fn matrix(&self, pivot: Point2) -> Affine2 {
        match *self {
            Op::Translate { dx, dy } => Affine2::translate(dx, dy),
            Op::Rotate { degrees } => Affine2::rotate_deg(degrees).about(pivot),
            Op::ReflectHorizontal => Affine2::reflect_horizontal().about(pivot),
            Op::ReflectVertical => Affine2::reflect_vertical().about(pivot),
            Op::Scale { sx, sy } => Affine2::scale(sx, sy).about(pivot),
            Op::Shear { shx, shy } => Affine2::shear(shx, shy).about(pivot),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Op::Translate { .. } => "translate",
            Op::Rotate { .. } => "rotate",
            Op::ReflectHorizontal => "reflect_horizontal",
            Op::ReflectVertical => "reflect_vertical",
            Op::Scale { .. } => "scale",
            Op::Shear { .. } => "shear",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Op::Translate { dx, dy } => write!(f, "translate({dx}, {dy})"),
            Op::Rotate { degrees } => write!(f, "rotate({degrees}°)"),
            Op::ReflectHorizontal | Op::ReflectVertical => f.write_str(self.name()),
            Op::Scale { sx, sy } => write!(f, "scale({sx}, {sy})"),
            Op::Shear { shx, shy } => write!(f, "shear({shx}, {shy})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;

    const EPSILON: f64 = 1e-9;

    fn approx_point(a: Point2, b: Point2) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
    }

    #[test]
    fn translate_adds_offset() {
        let mut pts = vec![Point2::new(1.0, 2.0), Point2::new(-3.0, 4.0)];
        translate(&mut pts, Point2::new(10.0, -5.0)).unwrap();
        assert_eq!(pts, vec![Point2::new(11.0, -3.0), Point2::new(7.0, -1.0)]);
    }

    #[test]
    fn scale_about_pivot() {
        let pivot = Point2::new(100.0, 100.0);
        let mut pts = vec![Point2::new(120.0, 60.0)];
        scale(&mut pts, pivot, 0.5, 0.75).unwrap();
        assert!(approx_point(pts[0], Point2::new(110.0, 70.0)));
    }

    #[test]
    fn rotate_about_pivot() {
        let pivot = Point2::new(10.0, 10.0);
        let mut pts = vec![Point2::new(20.0, 10.0)];
        rotate(&mut pts, pivot, 90.0).unwrap();
        assert!(approx_point(pts[0], Point2::new(10.0, 20.0)));
    }

    #[test]
    fn reflections_about_pivot() {
        let pivot = Point2::new(5.0, 5.0);
        let mut pts = vec![Point2::new(7.0, 9.0)];
        reflect_across_horizontal_axis(&mut pts, pivot).unwrap();
        assert_eq!(pts[0], Point2::new(7.0, 1.0));
        reflect_across_vertical_axis(&mut pts, pivot).unwrap();
        assert_eq!(pts[0], Point2::new(3.0, 1.0));
    }

    #[test]
    fn shear_uses_other_axis() {
        let pivot = Point2::new(0.0, 0.0);
        let mut pts = vec![Point2::new(4.0, 8.0)];
        shear(&mut pts, pivot, 0.25, 0.0).unwrap();
        assert_eq!(pts[0], Point2::new(6.0, 8.0));
    }

    #[test]
    fn zero_scale_collapses() {
        let pivot = Point2::new(1.0, 1.0);
        let mut pts = vec![Point2::new(3.0, 4.0), Point2::new(-2.0, 0.0)];
        scale(&mut pts, pivot, 0.0, 1.0).unwrap();
        assert!(pts.iter().all(|p| p.x == 1.0));
    }

    #[test]
    fn non_finite_parameter_is_rejected_without_mutation() {
        let original = vec![Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)];
        let mut pts = original.clone();
        let err = scale(&mut pts, Point2::ORIGIN, f64::NAN, 1.0).unwrap_err();
        assert!(matches!(
            err,
            TransformError::InvalidParameter { op: "scale", name: "sx", .. }
        ));
        assert_eq!(pts, original);

        let err = rotate(&mut pts, Point2::ORIGIN, f64::INFINITY).unwrap_err();
        assert!(matches!(err, TransformError::InvalidParameter { op: "rotate", .. }));
        assert!(translate(&mut pts, Point2::new(0.0, f64::NEG_INFINITY)).is_err());
        assert!(reflect_across_vertical_axis(&mut pts, Point2::new(f64::NAN, 0.0)).is_err());
        assert_eq!(pts, original);
    }

    #[test]
    fn op_matrix_agrees_with_apply() {
        let pivot = Point2::new(300.0, 300.0);
        let ops = [
            Op::Translate { dx: -40.0, dy: 45.0 },
            Op::Rotate { degrees: -45.0 },
            Op::ReflectHorizontal,
            Op::ReflectVertical,
            Op::Scale { sx: 2.0, sy: 0.5 },
            Op::Shear { shx: 0.25, shy: 0.0 },
        ];
        for op in ops {
            let mut pts = vec![Point2::new(420.0, 180.0)];
            op.apply(&mut pts, pivot).unwrap();
            let expected = op.matrix(pivot).apply(Point2::new(420.0, 180.0));
            assert!(approx_point(pts[0], expected), "{op} disagrees");
        }
    }

    #[test]
    fn op_display() {
        assert_eq!(Op::Scale { sx: 0.5, sy: 0.75 }.to_string(), "scale(0.5, 0.75)");
        assert_eq!(Op::ReflectVertical.to_string(), "reflect_vertical");
    }
}
