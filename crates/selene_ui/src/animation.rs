//! Scalar animation driven by the frame clock.
//!
//! Widgets animate presentation-only values (a switch thumb, a reveal
//! fraction) by stepping an [`Animation`] from `update` with the frame's
//! delta time. Targets can be retargeted mid-flight; the animation restarts
//! from the current value so motion never jumps.

/// Easing curve applied to animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Straight interpolation.
    Linear,
    /// Exponential ease-out: most of the motion happens immediately.
    #[default]
    ExpoOut,
    /// Exponential ease-in: accelerating toward the target.
    ExpoIn,
    /// Exponential ease-in-out.
    ExpoInOut,
    /// No animation; jumps straight to the target.
    Instant,
}

impl Easing {
    /// Maps raw progress `t` in `[0, 1]` through the curve.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::ExpoIn => {
                if t <= 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * (t - 1.0))
                }
            }
            Self::ExpoInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::Instant => 1.0,
        }
    }
}

/// A single scalar eased toward a target over a fixed duration.
#[derive(Debug, Clone)]
pub struct Animation {
    current: f32,
    target: f32,
    start: f32,
    progress: f32,
    duration: f32,
    easing: Easing,
}

impl Animation {
    /// Default duration in seconds.
    pub const DEFAULT_DURATION: f32 = 0.15;

    /// Creates an animation resting at `value`.
    #[must_use]
    pub fn new(value: f32, easing: Easing) -> Self {
        Self {
            current: value,
            target: value,
            start: value,
            progress: 1.0,
            duration: Self::DEFAULT_DURATION,
            easing,
        }
    }

    /// Overrides the duration.
    #[must_use]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Target value.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// True once the value has settled on the target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Begins animating toward `target` from the current value.
    ///
    /// Setting the target it already has is a no-op, so callers may retarget
    /// every frame without restarting the curve.
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() > 0.0001 {
            self.start = self.current;
            self.target = target;
            self.progress = 0.0;
        }
    }

    /// Jumps to `value` with no animation.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.start = value;
        self.progress = 1.0;
    }

    /// Advances the animation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.progress >= 1.0 {
            return;
        }

        if self.duration > 0.0 {
            self.progress += dt / self.duration;
        } else {
            self.progress = 1.0;
        }
        self.progress = self.progress.min(1.0);

        let eased = self.easing.apply(self.progress);
        self.current = self.start + (self.target - self.start) * eased;

        if self.progress >= 1.0 {
            self.current = self.target;
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(0.0, Easing::ExpoOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expo_out_front_loads_motion() {
        let value = Easing::ExpoOut.apply(0.3);
        assert!(value > 0.8, "expected most motion early, got {value}");
    }

    #[test]
    fn settles_on_target() {
        let mut anim = Animation::new(0.0, Easing::ExpoOut);
        anim.set_target(1.0);

        for _ in 0..20 {
            anim.update(0.016);
        }

        assert!(anim.is_complete());
        assert!((anim.value() - 1.0).abs() < 0.001);
    }

    #[test]
    fn retarget_restarts_from_current_value() {
        let mut anim = Animation::new(0.0, Easing::Linear).with_duration(1.0);
        anim.set_target(10.0);
        anim.update(0.5);
        let midway = anim.value();
        assert!((midway - 5.0).abs() < 0.001);

        anim.set_target(0.0);
        anim.update(0.0);
        // Still at the value it was retargeted from.
        assert!((anim.value() - midway).abs() < 0.001);
    }

    #[test]
    fn instant_easing_jumps_on_first_update() {
        let mut anim = Animation::new(0.0, Easing::Instant);
        anim.set_target(4.0);
        anim.update(0.001);
        assert_eq!(anim.value(), 4.0);
    }
}
