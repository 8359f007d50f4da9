/// Timing curve mapping linear progress to eased progress.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic, slow start.
    EaseIn,
    /// Quadratic, slow end.
    EaseOut,
    /// Cubic, slow start and end.
    EaseInOut,
}

impl Easing {
    /// Eased progress for `t`, clamped to [0, 1]. Endpoints map to themselves.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}
