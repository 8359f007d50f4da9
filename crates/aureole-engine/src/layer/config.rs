use crate::coords::{Rect, Vec2};
use crate::paint::{Color, ColorStop, SpreadMode};

use super::ConfigError;

/// How a pixel position maps to a ramp parameter.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum GradientStyle {
    /// Distance from the center: inner edge is `t = 0`, outer edge is `t = 1`.
    #[default]
    Radial,
    /// Angle around the center: `t = 0` along +X, sweeping clockwise on screen
    /// back to `t = 1`.
    Angular,
}

/// Where the gradient sits inside the layer bounds.
///
/// Centers are in layer-local coordinates (relative to the bounds origin);
/// `None` uses the bounds center.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum RadialGeometry {
    /// Centered in the bounds, radius half the shorter side.
    #[default]
    Fit,
    /// A disc of `radius` around `center`.
    Simple { center: Option<Vec2>, radius: f32 },
    /// A ring between `inner` and `outer`; nothing is painted outside it.
    Annular { center: Option<Vec2>, inner: f32, outer: f32 },
}

/// Geometry resolved against concrete bounds, in canvas coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct ResolvedGeometry {
    pub center: Vec2,
    pub inner: f32,
    pub outer: f32,
    /// Mask pixels outside `[inner, outer]`.
    pub ring: bool,
}

impl RadialGeometry {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            RadialGeometry::Fit => Ok(()),
            RadialGeometry::Simple { center, radius } => {
                check_center(center)?;
                check_radius("radius", radius)
            }
            RadialGeometry::Annular { center, inner, outer } => {
                check_center(center)?;
                check_radius("inner radius", inner)?;
                check_radius("outer radius", outer)?;
                if inner > outer {
                    return Err(ConfigError::InvertedRadii { inner, outer });
                }
                Ok(())
            }
        }
    }

    pub(crate) fn resolve(&self, bounds: Rect) -> ResolvedGeometry {
        let at = |center: Option<Vec2>| match center {
            Some(c) => bounds.origin + c,
            None => bounds.center(),
        };
        match *self {
            RadialGeometry::Fit => ResolvedGeometry {
                center: bounds.center(),
                inner: 0.0,
                outer: bounds.size.x.min(bounds.size.y) * 0.5,
                ring: false,
            },
            RadialGeometry::Simple { center, radius } => ResolvedGeometry {
                center: at(center),
                inner: 0.0,
                outer: radius,
                ring: false,
            },
            RadialGeometry::Annular { center, inner, outer } => ResolvedGeometry {
                center: at(center),
                inner,
                outer,
                ring: true,
            },
        }
    }
}

fn check_center(center: Option<Vec2>) -> Result<(), ConfigError> {
    match center {
        Some(c) if !c.is_finite() => Err(ConfigError::NonFiniteCenter),
        _ => Ok(()),
    }
}

fn check_radius(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRadius { name, value })
    }
}

/// Offset, rotation and scale applied to the gradient geometry.
///
/// Composition order around the resolved center: scale, then rotate, then
/// translate by `offset`. `rotation` is in radians, clockwise on screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub offset: Vec2,
    pub rotation: f32,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { offset: Vec2::zero(), rotation: 0.0, scale: 1.0 };

    #[inline]
    pub const fn new(offset: Vec2, rotation: f32, scale: f32) -> Self {
        Self { offset, rotation, scale }
    }

    /// False for zero or non-finite scale and for non-finite offset/rotation.
    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.offset.is_finite() && self.rotation.is_finite() && self.scale.is_finite() && self.scale != 0.0
    }

    /// Maps a point relative to the gradient center into gradient space.
    #[inline]
    pub(crate) fn to_local(&self, p: Vec2) -> Vec2 {
        (p - self.offset).rotated(-self.rotation) / self.scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Full configuration of a gradient layer.
///
/// `stops` carry colors and positions together; `explicit_locations` records
/// whether positions were supplied or derived by even spacing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradientConfig {
    pub stops: Vec<ColorStop>,
    pub explicit_locations: bool,
    pub style: GradientStyle,
    pub geometry: RadialGeometry,
    pub transform: Transform,
    pub spread: SpreadMode,
}

impl GradientConfig {
    /// Checks stops and geometry. Transform values are never rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_colors(self.stops.iter().map(|s| s.color))?;
        if self.explicit_locations {
            let locations: Vec<f32> = self.stops.iter().map(|s| s.t).collect();
            check_locations(&locations)?;
        }
        self.geometry.validate()
    }

    /// Rewrites implicit positions to the even spacing for the current count.
    pub(crate) fn normalize(&mut self) {
        if !self.explicit_locations {
            let n = self.stops.len();
            for (i, stop) in self.stops.iter_mut().enumerate() {
                stop.t = even_location(i, n);
            }
        }
    }
}

/// Position of stop `i` out of `n` evenly spaced stops: `i / (n - 1)`.
///
/// A lone stop sits at 0.
#[inline]
pub fn even_location(i: usize, n: usize) -> f32 {
    if n <= 1 { 0.0 } else { i as f32 / (n - 1) as f32 }
}

pub(crate) fn even_stops(colors: &[Color]) -> Vec<ColorStop> {
    colors
        .iter()
        .enumerate()
        .map(|(i, &c)| ColorStop::new(even_location(i, colors.len()), c))
        .collect()
}

pub(crate) fn check_colors(colors: impl IntoIterator<Item = Color>) -> Result<(), ConfigError> {
    match colors.into_iter().position(|c| !c.is_finite()) {
        Some(index) => Err(ConfigError::NonFiniteColor { index }),
        None => Ok(()),
    }
}

pub(crate) fn check_locations(locations: &[f32]) -> Result<(), ConfigError> {
    let mut prev = 0.0f32;
    for (index, &value) in locations.iter().enumerate() {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::LocationOutOfRange { index, value });
        }
        if value < prev {
            return Err(ConfigError::LocationsNotMonotonic { index });
        }
        prev = value;
    }
    Ok(())
}
