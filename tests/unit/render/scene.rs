use super::*;
use kurbo::Shape as _;

use crate::{drawable::DrawableState, foundation::core::Rgba8};

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "{a} != {b}");
}

fn setup() -> (DrawableRegistry, PropertyStore, DrawableStates) {
    let mut registry = DrawableRegistry::new();
    registry.register_shape(ShapeKind::Circle);
    registry.register_shape(ShapeKind::Rect);

    let mut store = PropertyStore::new();
    let rainbow = Target::Drawable(DrawableId::Rainbow);
    store.set(rainbow, Prop::Left, 10.0);
    store.set(rainbow, Prop::Top, 20.0);
    store.set(rainbow, Prop::Width, 100.0);
    store.set(rainbow, Prop::Height, 50.0);
    store.set(Target::Drawable(DrawableId::RainbowImage), Prop::Opacity, 0.5);
    let mask = Target::Drawable(DrawableId::ShapeMask(0));
    store.set(mask, Prop::Radius, 10.0);
    store.set(mask, Prop::Left, 50.0);
    store.set(mask, Prop::Top, 40.0);
    store.set(Target::Drawable(DrawableId::ShapeImage(1)), Prop::Opacity, 0.0);
    store.set(Target::Drawable(DrawableId::Shape(1)), Prop::Opacity, 0.0);
    store.set(Target::GradientStop(0), Prop::Offset, 0.1);
    store.set(Target::Background, Prop::Scale, 2.0);

    let mut states = DrawableStates::new(&registry);
    for id in registry.all() {
        if let Some(s) = states.get_mut(&registry, id) {
            *s = DrawableState {
                stroke_width: 2.0,
                ..DrawableState::default()
            };
        }
    }
    (registry, store, states)
}

fn image() -> Arc<PreparedImage> {
    Arc::new(PreparedImage::solid(40, 20, Rgba8::opaque(200, 100, 50)).unwrap())
}

#[test]
fn items_follow_draw_order_and_skip_invisible() {
    let (registry, store, states) = setup();
    let image = image();
    let palette = Palette::default();
    let inputs = SceneInputs {
        registry: &registry,
        store: &store,
        canvas: Canvas {
            width: 200,
            height: 100,
        },
        image: &image,
        palette: &palette,
    };
    let scene = Scene::build(&inputs, &states);

    assert_eq!((scene.width, scene.height), (200, 100));
    assert_eq!(scene.items.len(), 4);
    match &scene.items[0] {
        DrawItem::GradientRect {
            rect,
            gradient,
            opacity,
            ..
        } => {
            assert_eq!(*rect, Rect::new(10.0, 20.0, 110.0, 70.0));
            assert_eq!(*opacity, 1.0);
            assert_eq!(gradient.stops.len(), 3);
            approx(gradient.stops[0].offset, 0.1);
            approx(gradient.stops[1].offset, 0.833);
            assert_eq!(gradient.stops[2].color, palette.sea_crystal);
        }
        other => panic!("expected gradient, got {other:?}"),
    }
    assert!(matches!(
        &scene.items[1],
        DrawItem::Image { clip: None, opacity, .. } if *opacity == 0.5
    ));
    match &scene.items[2] {
        DrawItem::Image {
            clip: Some(clip), ..
        } => {
            let bb = clip.bounding_box();
            approx(bb.x0, 40.0);
            approx(bb.y1, 50.0);
        }
        other => panic!("expected clipped image, got {other:?}"),
    }
    assert!(matches!(
        &scene.items[3],
        DrawItem::Outline { stroke_width, color, .. }
            if *stroke_width == 2.0 && *color == palette.white
    ));
}

#[test]
fn backdrop_scales_about_canvas_center() {
    let (registry, store, states) = setup();
    let image = image();
    let palette = Palette::default();
    let inputs = SceneInputs {
        registry: &registry,
        store: &store,
        canvas: Canvas {
            width: 200,
            height: 100,
        },
        image: &image,
        palette: &palette,
    };
    let scene = Scene::build(&inputs, &states);
    let c = scene.backdrop * Point::new(100.0, 50.0);
    approx(c.x, 100.0);
    approx(c.y, 50.0);
    let o = scene.backdrop * Point::ZERO;
    approx(o.x, -100.0);
    approx(o.y, -50.0);
}

#[test]
fn images_are_centered_on_their_state_center() {
    let (registry, store, mut states) = setup();
    if let Some(s) = states.get_mut(&registry, DrawableId::RainbowImage) {
        s.applied_scale = 2.0;
        s.center = Some(Point::new(100.0, 50.0));
    }
    let image = image();
    let palette = Palette::default();
    let inputs = SceneInputs {
        registry: &registry,
        store: &store,
        canvas: Canvas {
            width: 200,
            height: 100,
        },
        image: &image,
        palette: &palette,
    };
    let scene = Scene::build(&inputs, &states);
    let DrawItem::Image { transform, .. } = &scene.items[1] else {
        panic!("expected rainbow image");
    };
    // Image center (20, 10) lands on the canvas center; corners spread by the scale.
    let mid = *transform * Point::new(20.0, 10.0);
    approx(mid.x, 100.0);
    approx(mid.y, 50.0);
    let corner = *transform * Point::ZERO;
    approx(corner.x, 60.0);
    approx(corner.y, 30.0);
}

#[test]
fn rect_geometry_clamps_corners_and_applies_placement() {
    let mut store = PropertyStore::new();
    let id = DrawableId::Shape(0);
    let t = Target::Drawable(id);
    store.set(t, Prop::Width, 40.0);
    store.set(t, Prop::Height, 10.0);
    store.set(t, Prop::CornerRadius, 20.0);
    store.set(t, Prop::Left, 100.0);
    store.set(t, Prop::Top, 50.0);
    store.set(t, Prop::Angle, 90.0);

    let (path, transform) = shape_geometry(ShapeKind::Rect, &store, id, 2.0);
    let bb = path.bounding_box();
    approx(bb.x0, -20.0);
    approx(bb.y1, 5.0);

    let p = transform * Point::new(20.0, 0.0);
    approx(p.x, 100.0);
    approx(p.y, 90.0);
}

#[test]
fn circle_geometry_uses_radius() {
    let mut store = PropertyStore::new();
    let id = DrawableId::ShapeMask(3);
    store.set(Target::Drawable(id), Prop::Radius, 12.0);
    let (path, transform) = shape_geometry(ShapeKind::Circle, &store, id, 1.0);
    let bb = path.bounding_box();
    approx(bb.width(), 24.0);
    assert_eq!(transform, Affine::IDENTITY);
}
