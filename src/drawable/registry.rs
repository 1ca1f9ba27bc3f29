use std::fmt;

/// Identity of a canvas drawable.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum DrawableId {
    /// Gradient-filled backdrop rectangle.
    Rainbow,
    /// Full background image over the gradient.
    RainbowImage,
    /// Stroked outline of shape `i`.
    Shape(usize),
    /// Clip geometry of shape `i`.
    ShapeMask(usize),
    /// Background image clipped by mask `i`.
    ShapeImage(usize),
}

impl fmt::Display for DrawableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rainbow => f.write_str("rainbow"),
            Self::RainbowImage => f.write_str("rainbowImage"),
            Self::Shape(i) => write!(f, "shape{i}"),
            Self::ShapeMask(i) => write!(f, "shape{i}Mask"),
            Self::ShapeImage(i) => write!(f, "shape{i}Image"),
        }
    }
}

/// Outline primitive of a shape slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Circle sized by radius.
    Circle,
    /// Rounded rectangle sized by width and height.
    Rect,
}

/// One shape position in markup order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeSlot {
    /// Outline primitive shared by the shape and its mask.
    pub kind: ShapeKind,
}

/// A parallel group of drawables, selectable through an `includes` mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawableGroup {
    /// `[RainbowImage]`.
    RainbowImage,
    /// Every `Shape(i)`.
    Shapes,
    /// Every `ShapeMask(i)`.
    ShapeMasks,
    /// Every `ShapeImage(i)`.
    ShapeImages,
}

/// Fixed set of drawables created once at setup.
#[derive(Clone, Debug, Default)]
pub struct DrawableRegistry {
    slots: Vec<ShapeSlot>,
}

impl DrawableRegistry {
    /// Registry holding only the two singleton drawables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape slot, returning its index.
    pub fn register_shape(&mut self, kind: ShapeKind) -> usize {
        self.slots.push(ShapeSlot { kind });
        self.slots.len() - 1
    }

    /// Number of shape slots.
    pub fn shape_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot `i`, if registered.
    pub fn slot(&self, i: usize) -> Option<&ShapeSlot> {
        self.slots.get(i)
    }

    /// Members of one group, in slot order.
    pub fn members(&self, group: DrawableGroup) -> Vec<DrawableId> {
        let n = self.slots.len();
        match group {
            DrawableGroup::RainbowImage => vec![DrawableId::RainbowImage],
            DrawableGroup::Shapes => (0..n).map(DrawableId::Shape).collect(),
            DrawableGroup::ShapeMasks => (0..n).map(DrawableId::ShapeMask).collect(),
            DrawableGroup::ShapeImages => (0..n).map(DrawableId::ShapeImage).collect(),
        }
    }

    /// Concatenate the groups whose `includes` flag is set.
    ///
    /// A missing flag counts as unset. With `index`, only that member of each selected group is
    /// taken, and groups too short for it contribute nothing.
    pub fn get_drawables(
        &self,
        groups: &[DrawableGroup],
        includes: &[bool],
        index: Option<usize>,
    ) -> Vec<DrawableId> {
        let mut out = Vec::new();
        for (i, group) in groups.iter().enumerate() {
            if !includes.get(i).copied().unwrap_or(false) {
                continue;
            }
            let members = self.members(*group);
            match index {
                Some(idx) => out.extend(members.get(idx).copied()),
                None => out.extend(members),
            }
        }
        out
    }

    /// Select from `[RainbowImage], ShapeImages`.
    pub fn images(&self, includes: &[bool], index: Option<usize>) -> Vec<DrawableId> {
        self.get_drawables(
            &[DrawableGroup::RainbowImage, DrawableGroup::ShapeImages],
            includes,
            index,
        )
    }

    /// Select from `Shapes, ShapeMasks, ShapeImages`.
    pub fn shapes(&self, includes: &[bool], index: Option<usize>) -> Vec<DrawableId> {
        self.get_drawables(
            &[
                DrawableGroup::Shapes,
                DrawableGroup::ShapeMasks,
                DrawableGroup::ShapeImages,
            ],
            includes,
            index,
        )
    }

    /// Every drawable, in canvas add order.
    pub fn all(&self) -> Vec<DrawableId> {
        let mut out = vec![DrawableId::Rainbow, DrawableId::RainbowImage];
        for i in 0..self.slots.len() {
            out.extend([
                DrawableId::Shape(i),
                DrawableId::ShapeMask(i),
                DrawableId::ShapeImage(i),
            ]);
        }
        out
    }

    /// Dense index of `id` into [`DrawableRegistry::all`].
    pub fn index_of(&self, id: DrawableId) -> Option<usize> {
        let n = self.slots.len();
        match id {
            DrawableId::Rainbow => Some(0),
            DrawableId::RainbowImage => Some(1),
            DrawableId::Shape(i) if i < n => Some(2 + 3 * i),
            DrawableId::ShapeMask(i) if i < n => Some(3 + 3 * i),
            DrawableId::ShapeImage(i) if i < n => Some(4 + 3 * i),
            _ => None,
        }
    }

    /// Total number of drawables.
    pub fn len(&self) -> usize {
        2 + 3 * self.slots.len()
    }

    /// Always `false`: the singletons exist from construction.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drawable/registry.rs"]
mod tests;
