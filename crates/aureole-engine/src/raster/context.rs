use crate::paint::Color;

/// Drawing context handed to a layer by the host's draw cycle.
///
/// Coordinates are integer pixel indices; `(0, 0)` is the top-left pixel.
/// Implementations composite premultiplied `color` source-over, weighted by
/// `coverage` in [0, 1]. Out-of-range pixels must be ignored.
pub trait DrawContext {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn blend_pixel(&mut self, x: u32, y: u32, color: Color, coverage: f32);
}
