use std::sync::Arc;

use kurbo::{Circle, RoundedRect, Shape as _};

use crate::{
    animation::{Prop, Target},
    assets::PreparedImage,
    drawable::{DrawableId, DrawableRegistry, DrawableStates, ShapeKind},
    foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2},
    interactive::config::Palette,
    timeline::PropertyStore,
};

/// Gradient start point as a fraction of the rainbow rect.
pub const RAINBOW_GRADIENT_START: Point = Point::new(-0.33, -0.33);
/// Gradient end point as a fraction of the rainbow rect.
pub const RAINBOW_GRADIENT_END: Point = Point::new(0.66, 1.33);

const PATH_TOLERANCE: f64 = 0.1;

/// One color stop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient vector in `[0, 1]`.
    pub offset: f64,
    /// Straight-alpha color.
    pub color: Rgba8,
}

/// Linear gradient in coordinates relative to the filled rect (`0..1` spans the rect).
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    /// Start of the gradient vector.
    pub start: Point,
    /// End of the gradient vector.
    pub end: Point,
    /// Stops in authored order.
    pub stops: Vec<GradientStop>,
}

/// A single draw call, in canvas space before the backdrop transform.
#[derive(Clone, Debug)]
pub enum DrawItem {
    /// Gradient-filled rectangle. `cache_token` changes whenever the raster must be rebuilt.
    GradientRect {
        /// Rect in canvas pixels.
        rect: Rect,
        /// Fill.
        gradient: LinearGradient,
        /// Opacity in `[0, 1]`.
        opacity: f64,
        /// Raster cache key component.
        cache_token: u64,
    },
    /// Image drawn at `transform`, optionally clipped by a canvas-space path.
    Image {
        /// Pixels.
        image: Arc<PreparedImage>,
        /// Maps image pixels to canvas pixels.
        transform: Affine,
        /// Opacity in `[0, 1]`.
        opacity: f64,
        /// Clip region in canvas pixels.
        clip: Option<BezPath>,
        /// Clipped raster cache key component.
        cache_token: u64,
    },
    /// Stroked outline.
    Outline {
        /// Path in local coordinates.
        path: BezPath,
        /// Maps local coordinates to canvas pixels.
        transform: Affine,
        /// Stroke width in local units.
        stroke_width: f64,
        /// Stroke color.
        color: Rgba8,
        /// Opacity in `[0, 1]`.
        opacity: f64,
    },
}

/// Everything drawn in one tick.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Applied to every item (the background element's CSS scale about the canvas center).
    pub backdrop: Affine,
    /// Back to front.
    pub items: Vec<DrawItem>,
}

/// Read-only inputs for building a [`Scene`].
#[derive(Clone, Copy)]
pub struct SceneInputs<'a> {
    /// Drawable set.
    pub registry: &'a DrawableRegistry,
    /// Current animated values.
    pub store: &'a PropertyStore,
    /// Canvas size.
    pub canvas: Canvas,
    /// Background image, shared by the rainbow image and every shape image.
    pub image: &'a Arc<PreparedImage>,
    /// Colors.
    pub palette: &'a Palette,
}

impl Scene {
    /// Draw order: rainbow, rainbow image, shape images (clipped by their masks), outlines.
    pub fn build(inputs: &SceneInputs<'_>, states: &DrawableStates) -> Self {
        let SceneInputs {
            registry,
            store,
            canvas,
            image,
            palette,
        } = *inputs;

        let center = canvas.center();
        let bg_scale = store.value(Target::Background, Prop::Scale);
        let backdrop = Affine::translate(center.to_vec2())
            * Affine::scale(bg_scale)
            * Affine::translate(-center.to_vec2());

        let mut items = Vec::new();

        let rainbow = Target::Drawable(DrawableId::Rainbow);
        let rainbow_opacity = opacity(store, rainbow);
        if rainbow_opacity > 0.0 {
            let left = store.value(rainbow, Prop::Left);
            let top = store.value(rainbow, Prop::Top);
            let rect = Rect::new(
                left,
                top,
                left + store.value(rainbow, Prop::Width),
                top + store.value(rainbow, Prop::Height),
            );
            let stops = palette
                .rainbow_stops()
                .iter()
                .enumerate()
                .map(|(i, &(offset, color))| GradientStop {
                    offset: store
                        .get(Target::GradientStop(i), Prop::Offset)
                        .unwrap_or(offset),
                    color,
                })
                .collect();
            items.push(DrawItem::GradientRect {
                rect,
                gradient: LinearGradient {
                    start: RAINBOW_GRADIENT_START,
                    end: RAINBOW_GRADIENT_END,
                    stops,
                },
                opacity: rainbow_opacity,
                cache_token: states.state(registry, DrawableId::Rainbow).cache_token,
            });
        }

        let image_item = |id: DrawableId, clip: Option<BezPath>| -> Option<DrawItem> {
            let alpha = opacity(store, Target::Drawable(id));
            let state = states.state(registry, id);
            if alpha <= 0.0 || state.applied_scale <= 0.0 {
                return None;
            }
            let c = state.center.unwrap_or(center);
            let size = Vec2::new(f64::from(image.width), f64::from(image.height));
            let transform = Affine::translate(c.to_vec2())
                * Affine::scale(state.applied_scale)
                * Affine::translate(-size / 2.0);
            Some(DrawItem::Image {
                image: Arc::clone(image),
                transform,
                opacity: alpha,
                clip,
                cache_token: state.cache_token,
            })
        };

        items.extend(image_item(DrawableId::RainbowImage, None));

        for i in 0..registry.shape_count() {
            let Some(slot) = registry.slot(i) else {
                continue;
            };
            let mask = DrawableId::ShapeMask(i);
            let mask_scale = states.state(registry, mask).applied_scale;
            if mask_scale <= 0.0 {
                continue;
            }
            let (path, transform) = shape_geometry(slot.kind, store, mask, mask_scale);
            items.extend(image_item(DrawableId::ShapeImage(i), Some(transform * path)));
        }

        for i in 0..registry.shape_count() {
            let Some(slot) = registry.slot(i) else {
                continue;
            };
            let id = DrawableId::Shape(i);
            let state = states.state(registry, id);
            let alpha = opacity(store, Target::Drawable(id));
            if alpha <= 0.0 || state.applied_scale <= 0.0 || state.stroke_width <= 0.0 {
                continue;
            }
            let (path, transform) = shape_geometry(slot.kind, store, id, state.applied_scale);
            items.push(DrawItem::Outline {
                path,
                transform,
                stroke_width: state.stroke_width,
                color: palette.white,
                opacity: alpha,
            });
        }

        Self {
            width: canvas.width,
            height: canvas.height,
            backdrop,
            items,
        }
    }
}

fn opacity(store: &PropertyStore, target: Target) -> f64 {
    store.value(target, Prop::Opacity).clamp(0.0, 1.0)
}

/// Local path and placement of a shape or mask.
///
/// Shapes are positioned by their center (`left`, `top`), rotated by `angle` degrees and scaled
/// uniformly by `scale`. Rect corners are clamped to half the shorter side.
pub fn shape_geometry(
    kind: ShapeKind,
    store: &PropertyStore,
    id: DrawableId,
    scale: f64,
) -> (BezPath, Affine) {
    let target = Target::Drawable(id);
    let path = match kind {
        ShapeKind::Circle => {
            let r = store.value(target, Prop::Radius).max(0.0);
            Circle::new(Point::ZERO, r).to_path(PATH_TOLERANCE)
        }
        ShapeKind::Rect => {
            let w = store.value(target, Prop::Width).max(0.0);
            let h = store.value(target, Prop::Height).max(0.0);
            let rx = store
                .value(target, Prop::CornerRadius)
                .min(w / 2.0)
                .min(h / 2.0)
                .max(0.0);
            RoundedRect::new(-w / 2.0, -h / 2.0, w / 2.0, h / 2.0, rx).to_path(PATH_TOLERANCE)
        }
    };
    let transform = Affine::translate((store.value(target, Prop::Left), store.value(target, Prop::Top)))
        * Affine::rotate(store.value(target, Prop::Angle).to_radians())
        * Affine::scale(scale);
    (path, transform)
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
