use crate::{
    animation::{ease::Ease, target::Prop, target::Target},
    foundation::error::{ScrollstageError, ScrollstageResult},
};

/// End value of a tweened property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenValue {
    /// Absolute end value.
    To(f64),
    /// Relative end value (`"+=delta"`), added to whatever the property holds when the tween
    /// starts.
    By(f64),
}

impl TweenValue {
    fn raw(self) -> f64 {
        match self {
            Self::To(v) | Self::By(v) => v,
        }
    }

    /// Resolve against the value held at tween start.
    pub fn resolve(self, from: f64) -> f64 {
        match self {
            Self::To(v) => v,
            Self::By(d) => from + d,
        }
    }
}

/// Builder for tween properties, duration and stagger.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenVars {
    /// Properties and their end values, in insertion order.
    pub props: Vec<(Prop, TweenValue)>,
    /// Per-target duration in seconds.
    pub duration: f64,
    /// Start offset between consecutive targets.
    pub stagger_each: f64,
    /// Progress curve.
    pub ease: Ease,
}

impl TweenVars {
    /// Tween of `duration` seconds with no properties yet.
    pub fn new(duration: f64) -> Self {
        Self {
            props: Vec::new(),
            duration,
            stagger_each: 0.0,
            ease: Ease::default(),
        }
    }

    /// Zero-duration tween.
    pub fn set() -> Self {
        Self::new(0.0)
    }

    /// Animate `prop` to an absolute value.
    pub fn to(mut self, prop: Prop, value: f64) -> Self {
        self.props.push((prop, TweenValue::To(value)));
        self
    }

    /// Animate `prop` by a relative delta.
    pub fn by(mut self, prop: Prop, delta: f64) -> Self {
        self.props.push((prop, TweenValue::By(delta)));
        self
    }

    /// Offset each successive target's start by `each` seconds.
    pub fn stagger(mut self, each: f64) -> Self {
        self.stagger_each = each;
        self
    }

    /// Replace the duration.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub(crate) fn validate(&self) -> ScrollstageResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ScrollstageError::animation(format!(
                "tween duration must be finite and >= 0, got {}",
                self.duration
            )));
        }
        if !self.stagger_each.is_finite() || self.stagger_each < 0.0 {
            return Err(ScrollstageError::animation(format!(
                "stagger must be finite and >= 0, got {}",
                self.stagger_each
            )));
        }
        if let Some((prop, _)) = self.props.iter().find(|(_, v)| !v.raw().is_finite()) {
            return Err(ScrollstageError::animation(format!(
                "tween value for {prop} is not finite"
            )));
        }
        Ok(())
    }
}

/// A tween placed in a timeline, in that timeline's local time.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    /// Targets, staggered in order.
    pub targets: Vec<Target>,
    /// What to animate and how.
    pub vars: TweenVars,
    /// Local start time of the first target.
    pub start: f64,
}

impl Tween {
    /// Duration including stagger spread.
    pub fn total_duration(&self) -> f64 {
        let spread = self.targets.len().saturating_sub(1) as f64 * self.vars.stagger_each;
        self.vars.duration + spread
    }

    /// Local end time of the last target.
    pub fn end(&self) -> f64 {
        self.start + self.total_duration()
    }

    /// Start time of the `k`-th target.
    pub fn target_start(&self, k: usize) -> f64 {
        self.start + k as f64 * self.vars.stagger_each
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
