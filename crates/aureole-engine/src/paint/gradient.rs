use super::Color;

/// Gradient spread behavior outside [0, 1] range.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    #[default]
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

impl SpreadMode {
    /// Maps an unbounded gradient parameter into [0, 1].
    ///
    /// Non-finite input maps to 0 so rasterization stays deterministic.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        if !t.is_finite() {
            return 0.0;
        }
        match self {
            SpreadMode::Pad => t.clamp(0.0, 1.0),
            SpreadMode::Repeat => t - t.floor(),
            SpreadMode::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }
}

/// A single gradient stop.
///
/// `t` is the normalized position in [0, 1]. Layers validate positions before
/// building stops; [`ColorRamp`] assumes stops are sorted by `t`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Sorted stop list evaluated exactly at every parameter.
///
/// Positions are not quantized, so hard edges (stops sharing a position) land
/// exactly where they are configured regardless of the gradient's size.
#[derive(Debug, Clone)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// Returns `None` when `stops` is empty.
    pub fn new(stops: &[ColorStop]) -> Option<Self> {
        if stops.is_empty() {
            return None;
        }
        Some(Self { stops: stops.to_vec() })
    }

    /// Ramp color at `t`, clamped to [0, 1].
    #[inline]
    pub fn eval(&self, t: f32) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        sample_stops(&self.stops, t)
    }
}

/// Stop interpolation at `t`. Stops must be sorted by position.
///
/// Below the first stop the first color is used, above the last stop the last
/// color. Stops sharing a position form a hard edge; the later stop wins at
/// the shared position.
pub fn sample_stops(stops: &[ColorStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::transparent();
    };
    // First stop strictly past `t`.
    let j = stops.partition_point(|s| s.t <= t);
    if j == 0 {
        return first.color;
    }
    if j == stops.len() {
        return stops[j - 1].color;
    }
    let a = stops[j - 1];
    let b = stops[j];
    // b.t > t >= a.t, so the span is strictly positive.
    let f = (t - a.t) / (b.t - a.t);
    a.color.lerp(b.color, f)
}
