use palette::{FromColor, LinSrgba, Srgba};

use crate::scene::ColorLinPremul;

/// sRGB byte triples for the colors the demo scenes use.
pub mod named {
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const BLACK: [u8; 3] = [0, 0, 0];
    pub const YELLOW: [u8; 3] = [255, 255, 0];
    pub const BLUE: [u8; 3] = [0, 0, 255];
}

// sRGB → linear premultiplied conversions.
impl ColorLinPremul {
    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_srgba_u8([r, g, b, a])
    }

    /// Opaque color from an sRGB byte triple.
    #[inline]
    pub fn rgb(c: [u8; 3]) -> Self {
        Self::from_srgba_u8([c[0], c[1], c[2], 255])
    }

    pub fn white() -> Self {
        Self::rgb(named::WHITE)
    }

    pub fn black() -> Self {
        Self::rgb(named::BLACK)
    }

    pub fn yellow() -> Self {
        Self::rgb(named::YELLOW)
    }

    pub fn blue() -> Self {
        Self::rgb(named::BLUE)
    }

    /// Create from sRGB u8 RGBA array (premultiplied in linear space).
    #[inline]
    pub fn from_srgba_u8(c: [u8; 4]) -> Self {
        let s = Srgba::new(
            c[0] as f32 / 255.0,
            c[1] as f32 / 255.0,
            c[2] as f32 / 255.0,
            c[3] as f32 / 255.0,
        );
        let lin: LinSrgba = LinSrgba::from_color(s);
        Self {
            r: lin.red * lin.alpha,
            g: lin.green * lin.alpha,
            b: lin.blue * lin.alpha,
            a: lin.alpha,
        }
    }

    /// Convert back to sRGB u8 RGBA array (unpremultiplied).
    #[inline]
    pub fn to_srgba_u8(&self) -> [u8; 4] {
        let (r, g, b) = if self.a > 0.0001 {
            (self.r / self.a, self.g / self.a, self.b / self.a)
        } else {
            (0.0, 0.0, 0.0)
        };

        let lin = LinSrgba::new(r, g, b, self.a);
        let srgb: Srgba = Srgba::from_color(lin);

        [
            (srgb.red * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.green * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.blue * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Same color with gamma-encoded components, still premultiplied.
    ///
    /// For render targets without an sRGB view format, where the hardware
    /// would otherwise store the linear values as-is.
    pub fn srgb_encoded(&self) -> Self {
        let (r, g, b) = if self.a > 0.0001 {
            (self.r / self.a, self.g / self.a, self.b / self.a)
        } else {
            (0.0, 0.0, 0.0)
        };
        let s: Srgba = Srgba::from_color(LinSrgba::new(r, g, b, self.a));
        Self {
            r: s.red * s.alpha,
            g: s.green * s.alpha,
            b: s.blue * s.alpha,
            a: s.alpha,
        }
    }

    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Clear value for a render pass on an sRGB surface (expects linear components).
    pub fn to_wgpu(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn primaries_survive_linearization() {
        assert!(close(ColorLinPremul::blue().to_array(), [0.0, 0.0, 1.0, 1.0]));
        assert!(close(ColorLinPremul::yellow().to_array(), [1.0, 1.0, 0.0, 1.0]));
        assert!(close(ColorLinPremul::black().to_array(), [0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn srgb_encoding_keeps_primaries_and_lifts_midtones() {
        assert!(close(ColorLinPremul::yellow().srgb_encoded().to_array(), [1.0, 1.0, 0.0, 1.0]));
        assert!(close(ColorLinPremul::blue().srgb_encoded().to_array(), [0.0, 0.0, 1.0, 1.0]));

        let grey = ColorLinPremul::rgba(128, 128, 128, 255);
        assert!(grey.r < 0.25);
        let encoded = grey.srgb_encoded();
        assert!((encoded.r - 128.0 / 255.0).abs() < 1e-5);
        assert_eq!(encoded.a, 1.0);
    }

    #[test]
    fn srgb_round_trip() {
        let c = ColorLinPremul::rgba(12, 128, 200, 255);
        assert_eq!(c.to_srgba_u8(), [12, 128, 200, 255]);
    }
}
