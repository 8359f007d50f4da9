//! CPU raster targets.
//!
//! Responsibilities:
//! - define the drawing-context abstraction the gradient layer renders into
//! - provide an owned premultiplied RGBA8 canvas for hosts, demos and tests
//!
//! Hosts that own their own surfaces implement [`DrawContext`] directly.

mod canvas;
mod context;

pub use canvas::{Canvas, Pixel};
pub use context::DrawContext;
