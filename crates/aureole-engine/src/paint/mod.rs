//! Paint model shared by the gradient layer and the rasterizer.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - gradient stops, spread modes and the color ramp
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{sample_stops, ColorRamp, ColorStop, SpreadMode};
