use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

/// Integer pixel span `[x0, x1) × [y0, y1)` covered by a rect on a raster.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PixelSpan {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelSpan {
    #[inline]
    pub fn width(self) -> u32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(self) -> u32 {
        self.y1 - self.y0
    }
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_size(w: f32, h: f32) -> Self {
        Self::new(0.0, 0.0, w, h)
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let x1 = (self.origin.x + self.size.x).min(other.origin.x + other.size.x);
        let y1 = (self.origin.y + self.size.y).min(other.origin.y + other.size.y);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }

    /// Pixels of a `width × height` raster whose centers fall inside this rect.
    ///
    /// Returns `None` for empty or non-finite rects and for rects that miss the raster.
    pub fn pixel_span(self, width: u32, height: u32) -> Option<PixelSpan> {
        if self.is_empty() || !self.is_finite() {
            return None;
        }
        let raster = Rect::from_size(width as f32, height as f32);
        let clipped = self.intersect(raster)?;
        let max = clipped.max();

        // Center of pixel i is i + 0.5; the first center >= min is ceil(min - 0.5).
        let x0 = (clipped.origin.x - 0.5).ceil().max(0.0) as u32;
        let y0 = (clipped.origin.y - 0.5).ceil().max(0.0) as u32;
        let x1 = ((max.x - 0.5).ceil().max(0.0) as u32).min(width);
        let y1 = ((max.y - 0.5).ceil().max(0.0) as u32).min(height);

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(PixelSpan { x0, y0, x1, y1 })
        }
    }
}
