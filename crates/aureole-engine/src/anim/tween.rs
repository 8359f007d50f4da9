use crate::layer::{GradientLayer, Transform};

use super::Easing;

/// What a tween does after reaching its end.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Repeat {
    /// Stop at `to`.
    #[default]
    Once,
    /// Jump back to `from` and run again.
    Loop,
    /// Run back towards `from`, then forward again.
    PingPong,
}

/// Interpolates a layer transform between two keyframes.
///
/// Rotation is interpolated numerically, so `0 → 2π` is one full turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformTween {
    from: Transform,
    to: Transform,
    duration: f32,
    easing: Easing,
    repeat: Repeat,
    elapsed: f32,
}

impl TransformTween {
    /// `duration` is in seconds; a non-positive duration completes immediately.
    pub fn new(from: Transform, to: Transform, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            easing: Easing::Linear,
            repeat: Repeat::Once,
            elapsed: 0.0,
        }
    }

    pub fn easing(mut self, v: Easing) -> Self { self.easing = v; self }
    pub fn repeat(mut self, v: Repeat) -> Self { self.repeat = v; self }

    /// Advances by `dt` seconds. Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn is_finished(&self) -> bool {
        self.repeat == Repeat::Once && self.elapsed >= self.duration
    }

    /// Linear progress through the current cycle, in [0, 1].
    pub fn progress(&self) -> f32 {
        if !(self.duration > 0.0) {
            return 1.0;
        }
        let cycles = self.elapsed / self.duration;
        match self.repeat {
            Repeat::Once => cycles.min(1.0),
            Repeat::Loop => cycles.fract(),
            Repeat::PingPong => {
                let m = cycles.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }

    /// The eased transform at the current time.
    pub fn value(&self) -> Transform {
        let k = self.easing.apply(self.progress());
        Transform {
            offset: self.from.offset.lerp(self.to.offset, k),
            rotation: self.from.rotation + (self.to.rotation - self.from.rotation) * k,
            scale: self.from.scale + (self.to.scale - self.from.scale) * k,
        }
    }

    /// Pushes the current value into `layer` and forces a redraw.
    pub fn apply(&self, layer: &mut GradientLayer) {
        let t = self.value();
        layer.set_transform(t.offset, t.rotation, t.scale);
        layer.force_update();
    }
}
