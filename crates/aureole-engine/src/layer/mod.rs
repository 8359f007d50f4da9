//! Gradient layer.
//!
//! Responsibilities:
//! - hold and validate gradient configuration (stops, transform, geometry)
//! - notify the host's invalidation mechanism on every accepted change
//! - rasterize the gradient into a host-provided drawing context
//!
//! Configuration errors surface at the mutating call. Rendering never fails.

mod config;
mod error;
mod gradient_layer;
mod invalidate;
mod render;

pub use config::{even_location, GradientConfig, GradientStyle, RadialGeometry, Transform};
pub use error::ConfigError;
pub use gradient_layer::GradientLayer;
pub use invalidate::{LayerId, RedrawQueue, RedrawSink};
