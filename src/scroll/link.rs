use crate::{
    animation::Ease,
    foundation::{
        error::{ScrollstageError, ScrollstageResult},
        math::lerp,
    },
    interactive::config::{InteractiveConfig, Scrub},
};

const SETTLED: f64 = 1e-6;

/// Directional label snapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapConfig {
    /// Idle seconds before a snap starts.
    pub delay: f64,
    /// Shortest snap animation.
    pub duration_min: f64,
    /// Longest snap animation.
    pub duration_max: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SnapMotion {
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
}

/// Result of one [`ScrollLink::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkFrame {
    /// Timeline time to sample.
    pub time: f64,
    /// Scroll offset the page should move to while a snap is running.
    pub snap_scroll: Option<f64>,
}

/// Maps the scroll offset over a pinned element to timeline time.
///
/// The element is pinned from `element_top` for `window_height * scrollLength` pixels.
#[derive(Clone, Debug)]
pub struct ScrollLink {
    start: f64,
    end: f64,
    duration: f64,
    window_height: f64,
    scrub: Scrub,
    snap: Option<SnapConfig>,
    snap_points: Vec<f64>,
    time: f64,
    last_scroll: Option<f64>,
    direction: f64,
    idle: f64,
    armed: bool,
    motion: Option<SnapMotion>,
}

impl ScrollLink {
    /// Link for a timeline of `duration` seconds. `labels` are root label times, used as snap
    /// points when `snapScroll` is on.
    pub fn new(
        element_top: f64,
        window_height: f64,
        config: &InteractiveConfig,
        duration: f64,
        labels: &[f64],
    ) -> ScrollstageResult<Self> {
        if !window_height.is_finite() || window_height <= 0.0 {
            return Err(ScrollstageError::validation(format!(
                "window height must be positive, got {window_height}"
            )));
        }
        let start = element_top;
        let end = start + window_height * config.scroll_length;

        let mut snap_points: Vec<f64> = if duration > 0.0 {
            labels
                .iter()
                .map(|t| (t / duration).clamp(0.0, 1.0))
                .collect()
        } else {
            Vec::new()
        };
        snap_points.sort_by(f64::total_cmp);
        snap_points.dedup();

        let snap = config.snap_scroll.then_some(SnapConfig {
            delay: config.snap_delay,
            duration_min: config.snap_duration_min,
            duration_max: config.snap_duration_max,
        });

        Ok(Self {
            start,
            end,
            duration: duration.max(0.0),
            window_height,
            scrub: config.scrub_factor,
            snap,
            snap_points,
            time: 0.0,
            last_scroll: None,
            direction: 0.0,
            idle: 0.0,
            armed: false,
            motion: None,
        })
    }

    /// Scroll offset where the pin starts.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Scroll offset where the pin ends.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Current timeline time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Snap points as progress values in `[0, 1]`.
    pub fn snap_points(&self) -> &[f64] {
        &self.snap_points
    }

    /// Progress through the pin, clamped to `[0, 1]`.
    pub fn progress(&self, scroll_y: f64) -> f64 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if scroll_y >= self.end { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / span).clamp(0.0, 1.0)
    }

    /// Scroll offset for a progress value.
    pub fn scroll_for_progress(&self, progress: f64) -> f64 {
        lerp(self.start, self.end, progress.clamp(0.0, 1.0))
    }

    /// Jump straight to the time for `scroll_y`, dropping any smoothing or snap in flight.
    pub fn seek(&mut self, scroll_y: f64) -> f64 {
        self.time = self.progress(scroll_y) * self.duration;
        self.last_scroll = Some(scroll_y);
        self.idle = 0.0;
        self.armed = false;
        self.motion = None;
        self.time
    }

    /// Advance by `dt` seconds with the page at `scroll_y`.
    ///
    /// While a snap runs, the returned `snap_scroll` must be fed back as the next `scroll_y`. A
    /// different offset counts as user input and cancels the snap.
    pub fn update(&mut self, scroll_y: f64, dt: f64) -> LinkFrame {
        let dt = dt.max(0.0);
        let mut scroll_y = scroll_y;
        let mut snap_scroll = None;

        let moved = self
            .last_scroll
            .map(|last| scroll_y - last)
            .unwrap_or(0.0);
        // A running snap expects its own `snap_scroll` back; anything else is the user.
        let user_moved = moved.abs() > SETTLED;

        if user_moved {
            self.direction = moved.signum();
            self.idle = 0.0;
            self.armed = true;
            self.motion = None;
        } else {
            self.idle += dt;
        }

        if let Some(motion) = self.motion.as_mut() {
            motion.elapsed += dt;
            let p = if motion.duration > 0.0 {
                (motion.elapsed / motion.duration).min(1.0)
            } else {
                1.0
            };
            scroll_y = lerp(motion.from, motion.to, Ease::InOutCubic.apply(p));
            snap_scroll = Some(scroll_y);
            if p >= 1.0 {
                self.motion = None;
            }
        } else if let Some(snap) = self.snap
            && self.armed
            && !user_moved
            && self.idle >= snap.delay
            && let Some(to) = self.snap_target(scroll_y)
        {
            let distance = (to - scroll_y).abs();
            let duration =
                (distance / self.window_height).clamp(snap.duration_min, snap.duration_max);
            tracing::trace!(from = scroll_y, to, duration, "snap");
            self.armed = false;
            self.motion = Some(SnapMotion {
                from: scroll_y,
                to,
                elapsed: 0.0,
                duration,
            });
        }

        self.last_scroll = Some(scroll_y);
        let target = self.progress(scroll_y) * self.duration;
        self.time = match self.scrub {
            Scrub::Enabled(true) => target,
            Scrub::Enabled(false) => {
                // Without scrubbing the timeline just plays once the pin is entered.
                if scroll_y >= self.start || self.time > 0.0 {
                    (self.time + dt).min(self.duration)
                } else {
                    self.time
                }
            }
            Scrub::Smoothed(secs) => {
                if secs <= 0.0 {
                    target
                } else {
                    let alpha = 1.0 - (-3.0 * dt / secs).exp();
                    let next = lerp(self.time, target, alpha);
                    if (target - next).abs() < SETTLED {
                        target
                    } else {
                        next
                    }
                }
            }
        };

        LinkFrame {
            time: self.time,
            snap_scroll,
        }
    }

    /// Next snap point in the travel direction, as a scroll offset.
    ///
    /// With no direction yet, or nothing ahead, the nearest point wins. Returns `None` when
    /// already on a point or outside the pin.
    fn snap_target(&self, scroll_y: f64) -> Option<f64> {
        if scroll_y < self.start || scroll_y > self.end {
            return None;
        }
        let p = self.progress(scroll_y);
        if self.snap_points.iter().any(|s| (s - p).abs() < SETTLED) {
            return None;
        }

        let ahead = if self.direction > 0.0 {
            self.snap_points.iter().copied().find(|s| *s > p)
        } else if self.direction < 0.0 {
            self.snap_points.iter().rev().copied().find(|s| *s < p)
        } else {
            None
        };
        let chosen = ahead.or_else(|| {
            self.snap_points
                .iter()
                .copied()
                .min_by(|a, b| (a - p).abs().total_cmp(&(b - p).abs()))
        })?;
        Some(self.scroll_for_progress(chosen))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/link.rs"]
mod tests;
