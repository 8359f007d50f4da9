//! Coordinate and geometry types shared by the paint model and the rasterizer.
//!
//! Canonical CPU space:
//! - Logical pixels (one logical pixel maps to one canvas pixel)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Pixel `(x, y)` is sampled at its center `(x + 0.5, y + 0.5)`.

mod rect;
mod vec2;

pub use rect::{PixelSpan, Rect};
pub use vec2::Vec2;
