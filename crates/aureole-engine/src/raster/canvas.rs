use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

use super::DrawContext;

/// One premultiplied RGBA8 pixel.
///
/// Layout matches the byte order image encoders expect for RGBA8.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Quantizes a premultiplied color, rounding to nearest.
    #[inline]
    pub fn from_color(c: Color) -> Self {
        let c = c.clamped();
        Self {
            r: quantize(c.r),
            g: quantize(c.g),
            b: quantize(c.b),
            a: quantize(c.a),
        }
    }

    #[inline]
    pub fn to_color(self) -> Color {
        Color::from_premul(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }

    /// Straight-alpha bytes, for encoders that expect unassociated alpha.
    #[inline]
    pub fn to_straight(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        let a = self.a as u32;
        let un = |c: u8| ((c as u32 * 255 + a / 2) / a).min(255) as u8;
        [un(self.r), un(self.g), un(self.b), self.a]
    }
}

#[inline]
fn quantize(v: f32) -> u8 {
    (v * 255.0 + 0.5) as u8
}

/// Owned `width × height` premultiplied RGBA8 surface.
///
/// Rows are stored top to bottom without padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Canvas {
    /// Creates a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); width as usize * height as usize],
        }
    }

    /// Overwrites every pixel with `color` (no blending).
    pub fn clear(&mut self, color: Color) {
        let px = Pixel::from_color(color);
        self.pixels.fill(px);
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Zero-copy view of the premultiplied RGBA8 bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Unpremultiplied RGBA8 bytes, row-major.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_straight()).collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl DrawContext for Canvas {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let Some(i) = self.index(x, y) else { return };
        let coverage = if coverage.is_finite() { coverage.clamp(0.0, 1.0) } else { 0.0 };
        if coverage <= 0.0 {
            return;
        }
        let src = color.clamped().scaled(coverage);
        if src.a >= 1.0 {
            self.pixels[i] = Pixel::from_color(src);
            return;
        }
        // Premultiplied source-over.
        let dst = self.pixels[i].to_color();
        let inv = 1.0 - src.a;
        self.pixels[i] = Pixel::from_color(Color::from_premul(
            src.r + dst.r * inv,
            src.g + dst.g * inv,
            src.b + dst.b * inv,
            src.a + dst.a * inv,
        ));
    }
}
