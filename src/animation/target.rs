use std::fmt;

use crate::drawable::DrawableId;

/// Index of an animatable content element (a split character, a block, a progress stage).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ContentTargetId(pub u32);

/// Anything a tween may write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    /// A canvas drawable.
    Drawable(DrawableId),
    /// One stop of the rainbow gradient.
    GradientStop(usize),
    /// The element wrapping the canvas (CSS `scale`).
    Background,
    /// A DOM-side content element.
    Content(ContentTargetId),
    /// Fill bar of one progress stage.
    ProgressBar(usize),
    /// Placeholder target used to pad stage timelines.
    Null,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drawable(id) => write!(f, "{id}"),
            Self::GradientStop(i) => write!(f, "colorStop{i}"),
            Self::Background => f.write_str("background"),
            Self::Content(id) => write!(f, "content{}", id.0),
            Self::ProgressBar(i) => write!(f, "progressBar{i}"),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<DrawableId> for Target {
    fn from(id: DrawableId) -> Self {
        Self::Drawable(id)
    }
}

/// Animatable scalar property.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Prop {
    /// Vertical position (center for shapes, top edge for the rainbow rect).
    Top,
    /// Horizontal position.
    Left,
    /// Width.
    Width,
    /// Height.
    Height,
    /// Circle radius.
    Radius,
    /// Rounded-rect corner radius (`rx = ry`).
    CornerRadius,
    /// Rotation in degrees.
    Angle,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Custom scale applied by the render hook.
    ScaleFactor,
    /// Custom stroke width applied by the render hook.
    StrokeWidth,
    /// CSS scale.
    Scale,
    /// CSS horizontal scale.
    ScaleX,
    /// CSS X-axis rotation in degrees.
    RotationX,
    /// Gradient stop offset.
    Offset,
    /// Generic scalar.
    Value,
}

impl Prop {
    /// Value a property holds before anything writes it.
    pub fn default_value(self) -> f64 {
        match self {
            Self::Opacity | Self::ScaleFactor | Self::Scale | Self::ScaleX => 1.0,
            _ => 0.0,
        }
    }

    /// camelCase property name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Width => "width",
            Self::Height => "height",
            Self::Radius => "radius",
            Self::CornerRadius => "cornerRadius",
            Self::Angle => "angle",
            Self::Opacity => "opacity",
            Self::ScaleFactor => "scaleFactor",
            Self::StrokeWidth => "strokeWidth",
            Self::Scale => "scale",
            Self::ScaleX => "scaleX",
            Self::RotationX => "rotationX",
            Self::Offset => "offset",
            Self::Value => "value",
        }
    }
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
