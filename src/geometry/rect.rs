use crate::foundation::core::{Point, Rect};

/// A measured layout rectangle, as reported by a layout query or written literally.
///
/// `top/right/bottom/left` are optional in the serialized form and default to the edges implied
/// by `x/y/width/height`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawRectRepr", into = "RawRectRepr")]
pub struct RawRect {
    /// Horizontal origin.
    pub x: f64,
    /// Vertical origin.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
}

impl RawRect {
    /// Rectangle with edges derived from origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            top: y,
            right: x + width,
            bottom: y + height,
            left: x,
        }
    }

    /// Scale every coordinate independently on each axis.
    pub fn scaled(self, sx: f64, sy: f64) -> Self {
        Self {
            x: self.x * sx,
            y: self.y * sy,
            width: self.width * sx,
            height: self.height * sy,
            top: self.top * sy,
            right: self.right * sx,
            bottom: self.bottom * sy,
            left: self.left * sx,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct RawRectRepr {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    left: Option<f64>,
}

impl From<RawRectRepr> for RawRect {
    fn from(r: RawRectRepr) -> Self {
        let base = RawRect::new(r.x, r.y, r.width, r.height);
        Self {
            top: r.top.unwrap_or(base.top),
            right: r.right.unwrap_or(base.right),
            bottom: r.bottom.unwrap_or(base.bottom),
            left: r.left.unwrap_or(base.left),
            ..base
        }
    }
}

impl From<RawRect> for RawRectRepr {
    fn from(r: RawRect) -> Self {
        Self {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
            top: Some(r.top),
            right: Some(r.right),
            bottom: Some(r.bottom),
            left: Some(r.left),
        }
    }
}

/// A normalized rectangle carrying its center and half-extents.
///
/// Derived fields are computed once in [`normalize`], so a value can never disagree with itself.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingRect {
    #[serde(flatten)]
    raw: RawRect,
    cx: f64,
    cy: f64,
    half_width: f64,
    half_height: f64,
}

impl BoundingRect {
    /// Horizontal origin.
    pub fn x(&self) -> f64 {
        self.raw.x
    }

    /// Vertical origin.
    pub fn y(&self) -> f64 {
        self.raw.y
    }

    /// Width.
    pub fn width(&self) -> f64 {
        self.raw.width
    }

    /// Height.
    pub fn height(&self) -> f64 {
        self.raw.height
    }

    /// Top edge.
    pub fn top(&self) -> f64 {
        self.raw.top
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.raw.right
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.raw.bottom
    }

    /// Left edge.
    pub fn left(&self) -> f64 {
        self.raw.left
    }

    /// `x + width / 2`.
    pub fn cx(&self) -> f64 {
        self.cx
    }

    /// `y + height / 2`.
    pub fn cy(&self) -> f64 {
        self.cy
    }

    /// `width / 2`.
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// `height / 2`.
    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    /// The raw (un-normalized) form.
    pub fn raw(&self) -> RawRect {
        self.raw
    }

    /// As a kurbo rectangle spanning `x..x+width`, `y..y+height`.
    pub fn to_kurbo(&self) -> Rect {
        Rect::new(
            self.raw.x,
            self.raw.y,
            self.raw.x + self.raw.width,
            self.raw.y + self.raw.height,
        )
    }
}

impl From<RawRect> for BoundingRect {
    fn from(raw: RawRect) -> Self {
        normalize(raw)
    }
}

/// Populate center and half-extents.
pub fn normalize(raw: RawRect) -> BoundingRect {
    BoundingRect {
        raw,
        cx: raw.x + raw.width / 2.0,
        cy: raw.y + raw.height / 2.0,
        half_width: raw.width / 2.0,
        half_height: raw.height / 2.0,
    }
}

/// Express `target` in the coordinate space of `reference`.
///
/// Position fields are differenced, size is carried from `target`. Not commutative.
pub fn relative_to(reference: &BoundingRect, target: &BoundingRect) -> BoundingRect {
    let r = reference.raw;
    let t = target.raw;
    normalize(RawRect {
        x: t.x - r.x,
        y: t.y - r.y,
        width: t.width,
        height: t.height,
        top: t.top - r.top,
        right: t.right - r.right,
        bottom: t.bottom - r.bottom,
        left: t.left - r.left,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/rect.rs"]
mod tests;
