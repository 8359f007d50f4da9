//! Easing-driven layer animation.
//!
//! A host advances tweens with frame deltas (see `time::FrameClock`) and applies
//! them to layers. Progress is pushed through the layer's setters followed by
//! `force_update`, so the host redraws every animated frame.

mod easing;
mod tween;

pub use easing::Easing;
pub use tween::{Repeat, TransformTween};
