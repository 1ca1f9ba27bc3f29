use crate::{
    animation::{Prop, Target, TweenVars},
    drawable::{DrawableId, DrawableRegistry, ShapeKind},
    foundation::{
        error::{ScrollstageError, ScrollstageResult},
        rng::{Rng64, rand_in_range},
    },
    geometry::BoundingRect,
    interactive::{
        config::{InteractiveConfig, InternalConfig},
        dimensions::{Dimensions, Ratios},
    },
    stage::{AnimatableContent, StageLabel, StageSequencer, add_in_between_tween},
    timeline::{Position, PropertyStore, TimelineArena, TimelineId, resolve_label_time},
};

const PLACES: i32 = 3;

/// Gradient stop offsets per segment, one row per stop.
const GRADIENT_STOP_OFFSETS: [[f64; 5]; 3] = [
    [0.0, 0.0, 0.125, 0.0, 0.0],
    [0.5, 0.375, 0.625, 0.375, 0.5],
    [1.0, 0.875, 1.0, 0.875, 1.0],
];

/// The master timeline and the arena that owns it.
#[derive(Clone, Debug)]
pub struct MasterTimeline {
    /// Every timeline node.
    pub arena: TimelineArena,
    /// Root node.
    pub root: TimelineId,
}

impl MasterTimeline {
    /// Root duration in seconds.
    pub fn duration(&self) -> ScrollstageResult<f64> {
        self.arena.duration(self.root)
    }

    /// Absolute time of `label`, searching nested stages.
    pub fn label_time(&self, label: &str) -> ScrollstageResult<f64> {
        resolve_label_time(&self.arena, self.root, label)
    }

    /// Labels registered on the root, sorted by time.
    pub fn root_labels(&self) -> ScrollstageResult<Vec<(String, f64)>> {
        let mut labels = self.arena.labels(self.root)?.to_vec();
        labels.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(labels)
    }
}

/// Values the canvas objects hold before any tween touches them.
///
/// Only the gradient stop offsets differ from the property defaults.
pub fn construction_state(internal: &InternalConfig) -> PropertyStore {
    let mut store = PropertyStore::new();
    for (i, (offset, _)) in internal.palette.rainbow_stops().iter().enumerate() {
        store.set(Target::GradientStop(i), Prop::Offset, *offset);
    }
    store
}

/// Everything the master timeline is built from.
#[derive(Clone, Copy)]
pub struct Choreography<'a> {
    /// Measured rectangles.
    pub dims: &'a Dimensions,
    /// Background/image scale.
    pub ratios: Ratios,
    /// Canvas drawables.
    pub registry: &'a DrawableRegistry,
    /// DOM-side targets.
    pub content: &'a AnimatableContent,
    /// User configuration.
    pub config: &'a InteractiveConfig,
    /// Design constants.
    pub internal: &'a InternalConfig,
    /// Shapes that drift away from the focal point, in selection order.
    pub expandable: &'a [usize],
}

impl Choreography<'_> {
    /// Build the master timeline. Random values are drawn from `rng` in a fixed order, so the same
    /// seed always yields the same timeline.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(shapes = self.registry.shape_count(), expandable = self.expandable.len())
    )]
    pub fn build(&self, rng: &mut Rng64) -> ScrollstageResult<MasterTimeline> {
        let stage_count = self.internal.stage_count;
        if stage_count < 5 {
            return Err(ScrollstageError::validation(format!(
                "choreography needs at least 5 stages, got {stage_count}"
            )));
        }

        let mut arena = TimelineArena::new();
        let root = arena.new_timeline();

        self.initial_sets(&mut arena, root, rng)?;
        StageSequencer::new(&mut arena, root, self.content, self.config, stage_count)
            .with_components(&self.internal.dynamic_components)
            .build_stages()?;
        self.background(&mut arena, root)?;
        self.gradient_stops(&mut arena, root)?;
        self.images(&mut arena, root)?;
        self.shapes(&mut arena, root, rng)?;
        StageSequencer::new(&mut arena, root, self.content, self.config, stage_count)
            .hoist_snap_labels()?;

        tracing::debug!(duration = arena.duration(root)?, "master timeline built");
        Ok(MasterTimeline { arena, root })
    }

    fn initial_sets(
        &self,
        arena: &mut TimelineArena,
        root: TimelineId,
        rng: &mut Rng64,
    ) -> ScrollstageResult<()> {
        let cfg = self.config;
        let registry = self.registry;

        arena.set(
            root,
            [Target::Background],
            TweenVars::set().to(Prop::Scale, cfg.image_scale_from),
            Position::End,
        )?;

        let element = &self.dims.element_from_background;
        arena.set(
            root,
            [Target::Drawable(DrawableId::Rainbow)],
            TweenVars::set()
                .to(Prop::Top, element.top())
                .to(Prop::Left, element.left())
                .to(Prop::Width, element.width())
                .to(Prop::Height, element.height())
                .to(Prop::Opacity, 0.0),
            Position::End,
        )?;

        arena.set(
            root,
            drawable_targets(registry.images(&[true, true], None)),
            TweenVars::set()
                .to(Prop::Opacity, 0.0)
                .to(Prop::ScaleFactor, self.ratios.background_to_image),
            Position::End,
        )?;

        let focal = &self.dims.focal_point_from_background;
        let focal_index = self.internal.focal_point_shape_index;
        for i in 0..registry.shape_count() {
            let Some(slot) = registry.slot(i) else {
                continue;
            };
            let rect = self.shape_from_background(i)?;
            let mut vars = TweenVars::set()
                .to(Prop::Top, focal.cy())
                .to(Prop::Left, focal.cx())
                .to(Prop::Opacity, 0.0)
                .to(Prop::ScaleFactor, 0.0)
                .to(
                    Prop::Angle,
                    rand_in_range(
                        rng,
                        cfg.shape_rotate_from_min,
                        Some(cfg.shape_rotate_from_max),
                        true,
                        PLACES,
                    ),
                );
            vars = match slot.kind {
                ShapeKind::Circle => {
                    // The focal shape starts as big as the focal point marker.
                    let radius = if i == focal_index {
                        focal.half_width()
                    } else {
                        rect.half_width()
                    };
                    vars.to(Prop::Radius, radius)
                }
                ShapeKind::Rect => vars
                    .to(Prop::Width, rect.width())
                    .to(Prop::Height, rect.height())
                    .to(Prop::CornerRadius, rect.half_height()),
            };
            arena.set(
                root,
                drawable_targets(registry.shapes(&[true, true], Some(i))),
                vars,
                Position::End,
            )?;
        }

        if !self.content.is_empty() {
            arena.set(
                root,
                self.content.all_targets().map(Target::Content),
                TweenVars::set()
                    .to(Prop::Opacity, 0.0)
                    .to(Prop::RotationX, -60.0),
                Position::End,
            )?;
        }

        let bars = self.content.progress_bars();
        if bars > 0 {
            arena.set(
                root,
                (0..bars).map(Target::ProgressBar),
                TweenVars::set().to(Prop::ScaleX, 0.0),
                Position::End,
            )?;
        }
        Ok(())
    }

    fn background(&self, arena: &mut TimelineArena, root: TimelineId) -> ScrollstageResult<()> {
        let stage0_in = StageLabel::In.name(0);
        let stage0_snap = StageLabel::Snap.name(0);

        add_in_between_tween(
            arena,
            root,
            [Target::Background],
            TweenVars::new(0.0).to(Prop::Scale, 1.0),
            &stage0_in,
            &stage0_snap,
            0.0,
        )?;
        add_in_between_tween(
            arena,
            root,
            [Target::Drawable(DrawableId::Rainbow)],
            TweenVars::new(0.0).to(Prop::Opacity, 1.0),
            &stage0_in,
            &stage0_snap,
            0.0,
        )?;
        add_in_between_tween(
            arena,
            root,
            [Target::Background],
            TweenVars::new(0.0).to(Prop::Scale, self.config.image_scale_to),
            &StageLabel::ContentOut.name(3),
            "end",
            0.0,
        )
    }

    fn gradient_stops(
        &self,
        arena: &mut TimelineArena,
        root: TimelineId,
    ) -> ScrollstageResult<()> {
        let bounds = [
            StageLabel::In.name(0),
            StageLabel::Out.name(0),
            StageLabel::Out.name(1),
            StageLabel::Out.name(2),
            StageLabel::Out.name(3),
            "end".to_owned(),
        ];
        for (stop, offsets) in GRADIENT_STOP_OFFSETS.iter().enumerate() {
            for (segment, offset) in offsets.iter().enumerate() {
                add_in_between_tween(
                    arena,
                    root,
                    [Target::GradientStop(stop)],
                    TweenVars::new(0.0).to(Prop::Offset, *offset),
                    &bounds[segment],
                    &bounds[segment + 1],
                    0.0,
                )?;
            }
        }
        Ok(())
    }

    fn images(&self, arena: &mut TimelineArena, root: TimelineId) -> ScrollstageResult<()> {
        let cfg = self.config;
        let registry = self.registry;

        let rainbow_image = [Target::Drawable(DrawableId::RainbowImage)];
        let opacity_steps = [
            (
                cfg.rainbow_image_opacity_min,
                StageLabel::In.name(0),
                StageLabel::ContentIn.name(0),
            ),
            (
                cfg.rainbow_image_opacity_max,
                StageLabel::ContentIn.name(0),
                StageLabel::ContentOut.name(1),
            ),
            (
                cfg.rainbow_image_opacity_min,
                StageLabel::ContentOut.name(1),
                StageLabel::Out.name(2),
            ),
            (
                cfg.rainbow_image_opacity_max,
                StageLabel::Out.name(2),
                StageLabel::Snap.name(3),
            ),
            (
                cfg.rainbow_image_opacity_to,
                StageLabel::Snap.name(3),
                "end".to_owned(),
            ),
        ];
        for (opacity, start, end) in &opacity_steps {
            add_in_between_tween(
                arena,
                root,
                rainbow_image,
                TweenVars::new(0.0).to(Prop::Opacity, *opacity),
                start,
                end,
                0.0,
            )?;
        }

        let all_images = drawable_targets(registry.images(&[true, true], None));
        let b2i = self.ratios.background_to_image;
        add_in_between_tween(
            arena,
            root,
            all_images.clone(),
            TweenVars::new(0.0).to(Prop::ScaleFactor, b2i * cfg.image_scale_max),
            &StageLabel::Snap.name(0),
            &StageLabel::Snap.name(2),
            0.0,
        )?;
        add_in_between_tween(
            arena,
            root,
            all_images,
            TweenVars::new(0.0).to(Prop::ScaleFactor, b2i),
            &StageLabel::Snap.name(2),
            &StageLabel::Snap.name(3),
            0.0,
        )?;

        let shape_images = drawable_targets(registry.images(&[false, true], None));
        if !shape_images.is_empty() {
            add_in_between_tween(
                arena,
                root,
                shape_images,
                TweenVars::new(0.0).to(Prop::Opacity, 0.0),
                &StageLabel::In.name(3),
                &StageLabel::Snap.name(3),
                0.0,
            )?;
        }
        Ok(())
    }

    fn shapes(
        &self,
        arena: &mut TimelineArena,
        root: TimelineId,
        rng: &mut Rng64,
    ) -> ScrollstageResult<()> {
        let cfg = self.config;
        let registry = self.registry;
        let count = registry.shape_count();
        if count == 0 {
            tracing::debug!("no shapes to choreograph");
            return Ok(());
        }

        let reveal_at = resolve_label_time(arena, root, &StageLabel::ContentIn.name(0))?;
        arena.set(
            root,
            drawable_targets(registry.shapes(&[true, true, true], None)),
            TweenVars::set().to(Prop::Opacity, 1.0),
            reveal_at,
        )?;

        let focal_index = self.internal.focal_point_shape_index;
        if focal_index < count {
            let focal = drawable_targets(registry.shapes(&[true, true], Some(focal_index)));
            add_in_between_tween(
                arena,
                root,
                focal.clone(),
                TweenVars::new(0.0).to(Prop::ScaleFactor, 1.0),
                &StageLabel::ContentOut.name(0),
                &StageLabel::Snap.name(1),
                0.0,
            )?;
            add_in_between_tween(
                arena,
                root,
                focal,
                TweenVars::new(0.0).to(Prop::ScaleFactor, cfg.focal_point_scale_to_max),
                &StageLabel::Snap.name(1),
                &StageLabel::Snap.name(2),
                0.0,
            )?;
        } else {
            tracing::warn!(
                focal_index,
                shapes = count,
                "focal point shape is missing, skipping its expansion"
            );
        }

        let guide = &self.dims.shape_guide;
        let (gw, gh) = (guide.width(), guide.height());

        for (k, &index) in self.expandable.iter().enumerate() {
            let dy = rand_in_range(
                rng,
                gh * cfg.shape_to_y_min,
                Some(gh * cfg.shape_to_y_max),
                true,
                PLACES,
            );
            let dx = rand_in_range(
                rng,
                gw * cfg.shape_to_x_min,
                Some(gw * cfg.shape_to_x_max),
                true,
                PLACES,
            );
            let angle = rand_in_range(
                rng,
                cfg.shape_rotate_to_min,
                Some(cfg.shape_rotate_to_max),
                true,
                PLACES,
            );
            let scale = rand_in_range(
                rng,
                cfg.shape_scale_to_min,
                Some(cfg.shape_scale_to_max),
                false,
                PLACES,
            );
            add_in_between_tween(
                arena,
                root,
                drawable_targets(registry.shapes(&[true, true], Some(index))),
                TweenVars::new(0.0)
                    .by(Prop::Top, dy)
                    .by(Prop::Left, dx)
                    .to(Prop::Angle, angle)
                    .to(Prop::ScaleFactor, scale),
                &StageLabel::Snap.name(1),
                &StageLabel::Snap.name(2),
                cfg.shape_expand_stagger * k as f64,
            )?;
        }

        for i in 0..count {
            let home = self.shape_from_background(i)?;
            add_in_between_tween(
                arena,
                root,
                drawable_targets(registry.shapes(&[true, true], Some(i))),
                TweenVars::new(0.0)
                    .to(Prop::Top, home.cy())
                    .to(Prop::Left, home.cx())
                    .to(Prop::Angle, 0.0)
                    .to(Prop::ScaleFactor, 1.0),
                &StageLabel::Snap.name(2),
                &StageLabel::Snap.name(3),
                cfg.shape_snap_stagger * i as f64,
            )?;
        }

        for i in 0..count {
            add_in_between_tween(
                arena,
                root,
                drawable_targets(registry.shapes(&[true, true], Some(i))),
                TweenVars::new(0.0).to(Prop::StrokeWidth, cfg.shape_stroke_width),
                &StageLabel::In.name(3),
                &StageLabel::Snap.name(3),
                cfg.shape_snap_stagger * i as f64,
            )?;
        }

        let focal = &self.dims.focal_point_from_background;
        for i in 0..count {
            let dy = rand_in_range(rng, gh * cfg.shape_to_y_min, None, false, PLACES);
            let dx = rand_in_range(rng, gw * cfg.shape_to_x_min, None, false, PLACES);
            let angle = rand_in_range(
                rng,
                cfg.shape_rotate_to_min,
                Some(cfg.shape_rotate_to_max),
                true,
                PLACES,
            );
            add_in_between_tween(
                arena,
                root,
                drawable_targets(registry.shapes(&[true, true], Some(i))),
                TweenVars::new(0.0)
                    .to(Prop::Top, focal.cy() + dy)
                    .to(Prop::Left, focal.cx() + dx)
                    .to(Prop::Opacity, 0.0)
                    .to(Prop::Angle, angle)
                    .to(Prop::ScaleFactor, 0.0),
                &StageLabel::ContentOut.name(3),
                &StageLabel::Snap.name(4),
                cfg.shape_expand_stagger * i as f64,
            )?;
        }
        Ok(())
    }

    fn shape_from_background(&self, i: usize) -> ScrollstageResult<&BoundingRect> {
        self.dims.shapes_from_background.get(i).ok_or_else(|| {
            ScrollstageError::validation(format!("shape {i} has no measured rectangle"))
        })
    }
}

fn drawable_targets(ids: Vec<DrawableId>) -> Vec<Target> {
    ids.into_iter().map(Target::Drawable).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/interactive/choreography.rs"]
mod tests;
