/// Easing curves mapping normalized progress.
///
/// Tweens default to [`Ease::OutQuad`]. Label snapping uses [`Ease::InOutCubic`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    /// Quadratic ease-out.
    #[default]
    OutQuad,
    /// Cubic ease-in/out.
    InOutCubic,
}

impl Ease {
    /// Eased value of progress `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutCubic if t < 0.5 => 4.0 * t * t * t,
            Self::InOutCubic => 1.0 - (-2.0 * t + 2.0).powi(3) / 2.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
