//! Aureole engine crate.
//!
//! A gradient layer for host compositing systems: the host owns the layer tree,
//! invalidation and timing; this crate owns gradient configuration and turns it
//! into pixels on demand.

pub mod anim;
pub mod coords;
pub mod layer;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod time;

pub use layer::{ConfigError, GradientConfig, GradientLayer, GradientStyle, RadialGeometry, Transform};
