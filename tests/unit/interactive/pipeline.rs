use super::*;
use crate::{
    animation::Prop,
    drawable::{DrawableId, ShapeKind},
    foundation::error::ScrollstageError,
    interactive::page::{BackgroundImage, ShapeSnapshot, WindowSize},
    render::Scene,
    stage::{ContentBlock, ScrollPrompt, SetupStage},
};

#[derive(Default)]
struct RecordingSurface {
    sizes: Vec<(u32, u32)>,
    renders: usize,
}

impl DrawingSurface for RecordingSurface {
    fn set_dimensions(&mut self, width: u32, height: u32) -> ScrollstageResult<()> {
        self.sizes.push((width, height));
        Ok(())
    }

    fn render_all(&mut self, _scene: &Scene) -> ScrollstageResult<()> {
        self.renders += 1;
        Ok(())
    }
}

fn page() -> PageSnapshot {
    PageSnapshot {
        window: WindowSize {
            width: 1000.0,
            height: 800.0,
        },
        element: Some(RawRect::new(0.0, 0.0, 1000.0, 800.0)),
        background: RawRect::new(0.0, 0.0, 1000.0, 800.0),
        focal_point: RawRect::new(450.0, 350.0, 100.0, 100.0),
        shape_guide: RawRect::new(200.0, 100.0, 600.0, 600.0),
        shapes: (0..20)
            .map(|i| ShapeSnapshot {
                kind: if i % 3 == 0 {
                    ShapeKind::Rect
                } else {
                    ShapeKind::Circle
                },
                rect: RawRect::new(30.0 * i as f64, 25.0 * i as f64, 50.0, 50.0),
            })
            .collect(),
        background_image: BackgroundImage {
            source: None,
            width: 500,
            height: 400,
            fill: Some("#203040".to_owned()),
        },
        setup_stages: vec![SetupStage {
            header: vec![ContentBlock {
                tag: "h1".to_owned(),
                text: "Hi".to_owned(),
            }],
            body: vec![],
        }],
        scroll_prompt: ScrollPrompt::default(),
        client_height: None,
    }
}

fn start(config: InteractiveConfig, surface: &mut RecordingSurface) -> Interactive {
    init(&page(), config, 9, None, surface).unwrap().unwrap()
}

#[test]
fn missing_element_is_a_silent_no_op() {
    let mut p = page();
    p.element = None;
    let mut surface = RecordingSurface::default();
    let out = init(&p, InteractiveConfig::default(), 1, None, &mut surface).unwrap();
    assert!(out.is_none());
    assert!(surface.sizes.is_empty());
    assert_eq!(surface.renders, 0);
}

#[test]
fn init_sizes_the_surface_and_draws_once() {
    let mut surface = RecordingSurface::default();
    let interactive = start(InteractiveConfig::default(), &mut surface);
    assert_eq!(surface.sizes, [(1000, 800)]);
    assert_eq!(surface.renders, 1);
    assert_eq!(interactive.ratios().background_to_image, 2.0);
    assert_eq!(interactive.labels().unwrap().len(), 5);
    assert!(interactive.duration() > 0.0);
}

#[test]
fn every_tick_draws_once_and_follows_the_scroll() {
    let mut surface = RecordingSurface::default();
    let mut interactive = start(InteractiveConfig::default(), &mut surface);

    let end = interactive.link().end();
    let frame = interactive.tick(end / 2.0, 1.0 / 60.0, &mut surface).unwrap();
    assert!((frame.time - interactive.duration() / 2.0).abs() < 1e-9);
    assert_eq!(surface.renders, 2);

    interactive.tick(end, 1.0 / 60.0, &mut surface).unwrap();
    assert_eq!(surface.renders, 3);
    assert_eq!(interactive.time(), interactive.duration());
}

#[test]
fn disabled_interactive_renders_the_setup_state() {
    let mut surface = RecordingSurface::default();
    let config = InteractiveConfig {
        enabled: false,
        ..InteractiveConfig::default()
    };
    let mut interactive = start(config, &mut surface);
    assert!(interactive.master().is_none());
    assert!(interactive.labels().unwrap().is_empty());
    assert_eq!(interactive.duration(), 0.0);

    interactive.tick(500.0, 0.1, &mut surface).unwrap();
    assert_eq!(surface.renders, 2);
    let store = interactive.properties();
    assert_eq!(store.value(Target::GradientStop(1), Prop::Offset), 0.833);
    assert_eq!(
        store.get(Target::Drawable(DrawableId::Shape(0)), Prop::Top),
        None
    );
}

#[test]
fn expandable_selection_skips_the_focal_shape() {
    let mut rng = Rng64::new(3);
    let picked = select_expandable(&mut rng, 20, 18, 0.5);
    assert_eq!(picked.len(), 10);
    assert!(!picked.contains(&18));
    let mut sorted = picked.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 10);

    assert_eq!(picked, select_expandable(&mut Rng64::new(3), 20, 18, 0.5));
    assert!(select_expandable(&mut Rng64::new(3), 20, 18, 0.0).is_empty());
}

#[test]
fn resize_rebuilds_with_the_same_choreography() {
    let mut surface = RecordingSurface::default();
    let mut interactive = start(InteractiveConfig::default(), &mut surface);
    let expandable = interactive.expandable().to_vec();
    let labels = interactive.labels().unwrap();
    let angle = Target::Drawable(DrawableId::Shape(4));
    let before = interactive.properties().value(angle, Prop::Angle);

    interactive.handle_resize(500.0, 400.0, &mut surface).unwrap();

    assert_eq!(surface.sizes, [(1000, 800), (500, 400)]);
    assert_eq!(interactive.canvas(), Canvas { width: 500, height: 400 });
    assert_eq!(interactive.expandable(), expandable.as_slice());
    assert_eq!(interactive.labels().unwrap(), labels);
    assert_eq!(interactive.properties().value(angle, Prop::Angle), before);
    assert_eq!(interactive.dimensions().focal_point.cx(), 250.0);
}

#[test]
fn resize_keeps_scroll_progress() {
    let mut surface = RecordingSurface::default();
    let mut interactive = start(InteractiveConfig::default(), &mut surface);
    let quarter = interactive.link().end() / 4.0;
    let t = interactive.seek(quarter, &mut surface).unwrap();

    interactive.handle_resize(1200.0, 960.0, &mut surface).unwrap();
    assert!((interactive.time() - t).abs() < 1e-9);
}

#[test]
fn described_properties_use_readable_names() {
    let mut surface = RecordingSurface::default();
    let interactive = start(InteractiveConfig::default(), &mut surface);
    let described = interactive.described_properties();

    assert_eq!(described["shape0"]["opacity"], 0.0);
    assert_eq!(described["background"]["scale"], 1.075);
    assert_eq!(described["stage0.header.0.char0[H]"]["rotationX"], -60.0);
    assert_eq!(described["progressBar0"]["scaleX"], 0.0);
}

#[test]
fn invalid_config_fails_setup() {
    let config = InteractiveConfig {
        shape_to_count: 2.0,
        ..InteractiveConfig::default()
    };
    let err = DynamicContent::setup(&page(), config, InternalConfig::default()).unwrap_err();
    assert!(matches!(err, ScrollstageError::Validation(_)));
}

#[test]
fn viewport_unit_follows_the_layout() {
    let mut p = page();
    p.client_height = Some(900.0);
    let mut surface = RecordingSurface::default();
    let mut interactive = init(&p, InteractiveConfig::default(), 9, None, &mut surface)
        .unwrap()
        .unwrap();
    assert_eq!(interactive.viewport_unit(), 9.0);

    interactive.handle_resize(500.0, 400.0, &mut surface).unwrap();
    assert_eq!(interactive.page().client_height, Some(450.0));
    assert_eq!(interactive.viewport_unit(), 4.5);

    let mut p = page();
    p.client_height = None;
    assert_eq!(p.viewport_unit(), 8.0);
    p.client_height = Some(700.0);
    assert_eq!(p.viewport_unit(), 8.0);
}

#[test]
fn applied_drawables_cover_the_registry_in_add_order() {
    let mut surface = RecordingSurface::default();
    let interactive = start(InteractiveConfig::default(), &mut surface);
    let applied = interactive.applied_drawables();
    assert_eq!(applied.len(), 2 + 3 * 20);
    assert_eq!(applied[0].0, DrawableId::Rainbow);
    assert_eq!(applied[2].0, DrawableId::Shape(0));
    assert_eq!(applied[4].0, DrawableId::ShapeImage(0));
    assert_eq!(
        applied[1].1.center,
        Some(interactive.canvas().center())
    );
}
