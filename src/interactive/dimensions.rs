use crate::{
    foundation::error::{ScrollstageError, ScrollstageResult},
    geometry::{BoundingRect, RawRect, normalize, relative_to},
    interactive::page::PageSnapshot,
};

/// Frequently used rectangles, page-space and relative to the background (canvas space).
#[derive(Clone, Debug, PartialEq)]
pub struct Dimensions {
    /// Viewport.
    pub window: BoundingRect,
    /// Canvas host element.
    pub background: BoundingRect,
    /// Interactive root.
    pub element: BoundingRect,
    /// Root in canvas space.
    pub element_from_background: BoundingRect,
    /// Focal point marker.
    pub focal_point: BoundingRect,
    /// Focal point in canvas space.
    pub focal_point_from_background: BoundingRect,
    /// Shape layout guide.
    pub shape_guide: BoundingRect,
    /// Guide in canvas space.
    pub shape_guide_from_background: BoundingRect,
    /// Guide shapes.
    pub shapes: Vec<BoundingRect>,
    /// Guide shapes in canvas space.
    pub shapes_from_background: Vec<BoundingRect>,
}

/// Scale relationships between the background and its image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ratios {
    /// `background.width / image natural width`.
    pub background_to_image: f64,
    /// Inverse of `background_to_image`.
    pub image_to_background: f64,
}

impl Dimensions {
    /// Recompute everything from a snapshot. Called at setup and on every resize.
    pub fn calculate(page: &PageSnapshot, element: RawRect) -> ScrollstageResult<(Self, Ratios)> {
        page.validate()?;

        let background = normalize(page.background);
        let window = normalize(RawRect::new(0.0, 0.0, page.window.width, page.window.height));
        let element = normalize(element);
        let focal_point = normalize(page.focal_point);
        let shape_guide = normalize(page.shape_guide);
        let shapes: Vec<BoundingRect> = page.shapes.iter().map(|s| normalize(s.rect)).collect();
        let shapes_from_background = shapes
            .iter()
            .map(|s| relative_to(&background, s))
            .collect();

        let natural_width = f64::from(page.background_image.width);
        let background_to_image = background.width() / natural_width;
        if !background_to_image.is_finite() || background_to_image <= 0.0 {
            return Err(ScrollstageError::validation(
                "background to image ratio is not positive",
            ));
        }

        let dims = Self {
            element_from_background: relative_to(&background, &element),
            focal_point_from_background: relative_to(&background, &focal_point),
            shape_guide_from_background: relative_to(&background, &shape_guide),
            window,
            background,
            element,
            focal_point,
            shape_guide,
            shapes,
            shapes_from_background,
        };
        let ratios = Ratios {
            background_to_image,
            image_to_background: 1.0 / background_to_image,
        };
        Ok((dims, ratios))
    }
}
