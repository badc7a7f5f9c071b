//! Closed-form 2D affine matrices.
//!
//! Every primitive the demo needs is a 2x2 linear map, optionally conjugated by a
//! translation to a pivot, so a fixed 3x3 homogeneous layout is all we carry:
//!
//! ```text
//! | a  c  tx |
//! | b  d  ty |
//! | 0  0  1  |
//! ```

use crate::point::Point2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2 {
    pub const fn identity() -> Self {
        Self::linear(1.0, 0.0, 0.0, 1.0)
    }

    /// Pure 2x2 map `[[a, c], [b, d]]` with no translation.
    pub const fn linear(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            a,
            b,
            c,
            d,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx,
            ty,
        }
    }

    /// `[[cos, -sin], [sin, cos]]`.
    ///
    /// Counter-clockwise for positive angles in a y-up frame. On a y-down
    /// surface (window pixels) the same matrix turns shapes clockwise.
    pub fn rotate(angle_rad: f64) -> Self {
        let cos = angle_rad.cos();
        let sin = angle_rad.sin();
        Self::linear(cos, sin, -sin, cos)
    }

    pub fn rotate_deg(angle_deg: f64) -> Self {
        Self::rotate(angle_deg.to_radians())
    }

    /// `[[sx, 0], [0, sy]]`. Negative factors mirror, zero collapses onto an axis.
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::linear(sx, 0.0, 0.0, sy)
    }

    /// `[[1, shx], [shy, 1]]`: x picks up `shx * y`, y picks up `shy * x`.
    pub const fn shear(shx: f64, shy: f64) -> Self {
        Self::linear(1.0, shy, shx, 1.0)
    }

    /// Mirror across the horizontal axis: `[[1, 0], [0, -1]]`.
    pub const fn reflect_horizontal() -> Self {
        Self::scale(1.0, -1.0)
    }

    /// Mirror across the vertical axis: `[[-1, 0], [0, 1]]`.
    pub const fn reflect_vertical() -> Self {
        Self::scale(-1.0, 1.0)
    }

    /// Compose: the result applies `other` first, then `self`.
    pub fn then(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            tx: self.a * other.tx + self.c * other.ty + self.tx,
            ty: self.b * other.tx + self.d * other.ty + self.ty,
        }
    }

    /// Conjugate by the pivot: `T(pivot) * self * T(-pivot)`.
    pub fn about(&self, pivot: Point2) -> Self {
        Self::translate(pivot.x, pivot.y)
            .then(self)
            .then(&Self::translate(-pivot.x, -pivot.y))
    }

    pub fn apply(&self, p: Point2) -> Point2 {
        Point2::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Apply the linear part only (translation ignored).
    pub fn apply_vector(&self, v: Point2) -> Point2 {
        Point2::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    /// Map `p` in pivot-relative coordinates and translate back.
    ///
    /// This is the per-point path the primitives take; it keeps the pivot an exact
    /// fixed point instead of relying on a folded translation.
    pub fn apply_about(&self, p: Point2, pivot: Point2) -> Point2 {
        self.apply_vector(p - pivot) + pivot
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() > f64::EPSILON
    }

    /// `None` for singular maps (zero scale, `shx * shy == 1` shear).
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() <= f64::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Self {
            a: self.d * inv_det,
            b: -self.b * inv_det,
            c: -self.c * inv_det,
            d: self.a * inv_det,
            tx: (self.c * self.ty - self.d * self.tx) * inv_det,
            ty: (self.b * self.tx - self.a * self.ty) * inv_det,
        })
    }

    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.approx_eq(&Self::identity(), epsilon)
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.a - other.a).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.c - other.c).abs() < epsilon
            && (self.d - other.d).abs() < epsilon
            && (self.tx - other.tx).abs() < epsilon
            && (self.ty - other.ty).abs() < epsilon
    }

    /// Row-major homogeneous matrix.
    pub fn to_matrix3x3(&self) -> [[f64; 3]; 3] {
        [
            [self.a, self.c, self.tx],
            [self.b, self.d, self.ty],
            [0.0, 0.0, 1.0],
        ]
    }
}
