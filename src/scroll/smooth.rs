use crate::{foundation::math::lerp, interactive::config::SmoothScrollConfig};

const SETTLED: f64 = 0.01;

/// Rendered scroll offset that trails the requested one.
///
/// Each update closes most of the gap over `smoothness` seconds. A smoothness of zero tracks the
/// request exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothScroll {
    smoothness: f64,
    current: f64,
    target: f64,
}

impl SmoothScroll {
    /// Scroller resting at offset 0.
    pub fn new(config: &SmoothScrollConfig) -> Self {
        Self {
            smoothness: config.smoothness.max(0.0),
            current: 0.0,
            target: 0.0,
        }
    }

    /// Request a new offset.
    pub fn scroll_to(&mut self, y: f64) {
        self.target = y;
    }

    /// Move there immediately.
    pub fn jump_to(&mut self, y: f64) {
        self.target = y;
        self.current = y;
    }

    /// Rendered offset.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Requested offset.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// `true` once the rendered offset has caught up.
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Advance by `dt` seconds and return the rendered offset.
    pub fn update(&mut self, dt: f64) -> f64 {
        if self.smoothness <= 0.0 {
            self.current = self.target;
            return self.current;
        }
        let alpha = 1.0 - (-3.0 * dt.max(0.0) / self.smoothness).exp();
        self.current = lerp(self.current, self.target, alpha);
        if (self.target - self.current).abs() < SETTLED {
            self.current = self.target;
        }
        self.current
    }
}

/// One percent of the usable viewport height, the `--bettervh` unit.
///
/// Mobile browsers report a `clientHeight` that ignores collapsing toolbars, so the larger of the
/// two heights is used.
pub fn viewport_unit(client_height: f64, inner_height: f64) -> f64 {
    client_height.max(inner_height).max(0.0) / 100.0
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/smooth.rs"]
mod tests;
