use std::{collections::BTreeMap, path::Path, sync::Arc};

use crate::{
    animation::Target,
    assets::PreparedImage,
    drawable::{DrawableId, DrawableRegistry, DrawableState},
    foundation::{
        core::Canvas,
        error::ScrollstageResult,
        rng::{Rng64, shuffle},
    },
    geometry::RawRect,
    interactive::{
        choreography::{Choreography, MasterTimeline, construction_state},
        config::{InteractiveConfig, InternalConfig},
        dimensions::{Dimensions, Ratios},
        page::PageSnapshot,
    },
    render::{DrawingSurface, RenderUpdateHook, SceneInputs},
    scroll::{LinkFrame, ScrollLink},
    stage::{AnimatableContent, DynamicContent},
    timeline::{CompiledTimeline, PropertyStore},
};

/// Mixed into the seed so cache tokens never share a stream with the choreography.
const HOOK_SEED_SALT: u64 = 0x5eed_cace_70ce_0001;

/// Stage copy has been moved into the dynamic components.
#[derive(Clone, Debug)]
pub struct ContentReady {
    page: PageSnapshot,
    element: RawRect,
    config: InteractiveConfig,
    internal: InternalConfig,
    content: DynamicContent,
}

/// Dimensions, drawables and content targets exist; the timeline does not yet.
#[derive(Clone, Debug)]
pub struct AnimationsReady {
    ready: ContentReady,
    image: Arc<PreparedImage>,
    seed: u64,
    rng: Rng64,
    dims: Dimensions,
    ratios: Ratios,
    canvas: Canvas,
    registry: DrawableRegistry,
    content: AnimatableContent,
    expandable: Vec<usize>,
}

impl DynamicContent {
    /// First setup step. Returns `None` when the page has no interactive root.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn setup(
        page: &PageSnapshot,
        config: InteractiveConfig,
        internal: InternalConfig,
    ) -> ScrollstageResult<Option<ContentReady>> {
        let Some(element) = page.element else {
            tracing::debug!("no interactive element on the page");
            return Ok(None);
        };
        config.validate()?;
        page.validate()?;

        let content = Self::copy_from(&page.setup_stages, internal.stage_count);
        Ok(Some(ContentReady {
            page: page.clone(),
            element,
            config,
            internal,
            content,
        }))
    }
}

impl ContentReady {
    /// Copied stage content.
    pub fn content(&self) -> &DynamicContent {
        &self.content
    }

    /// Measure the page, register drawables, split content and size the surface.
    ///
    /// `seed` drives every random choice from here on.
    #[tracing::instrument(level = "debug", skip(self, image, surface))]
    pub fn setup_animations(
        self,
        image: Arc<PreparedImage>,
        seed: u64,
        surface: &mut dyn DrawingSurface,
    ) -> ScrollstageResult<AnimationsReady> {
        let (dims, ratios) = Dimensions::calculate(&self.page, self.element)?;

        let mut registry = DrawableRegistry::new();
        for shape in &self.page.shapes {
            registry.register_shape(shape.kind);
        }

        let content = AnimatableContent::split(&self.content, &self.page.scroll_prompt);

        let mut rng = Rng64::new(seed);
        let expandable = select_expandable(
            &mut rng,
            registry.shape_count(),
            self.internal.focal_point_shape_index,
            self.config.shape_to_count,
        );

        let canvas = Canvas::from_measured(dims.background.width(), dims.background.height())?;
        surface.set_dimensions(canvas.width, canvas.height)?;
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            shapes = registry.shape_count(),
            "animations set up"
        );

        Ok(AnimationsReady {
            ready: self,
            image,
            seed,
            rng,
            dims,
            ratios,
            canvas,
            registry,
            content,
            expandable,
        })
    }
}

impl AnimationsReady {
    /// Measured rectangles.
    pub fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    /// Shapes chosen to drift, in selection order.
    pub fn expandable(&self) -> &[usize] {
        &self.expandable
    }

    /// Build the master timeline and scroll link.
    ///
    /// With `enabled = false` no timeline is built and every tick renders the setup state.
    #[tracing::instrument(level = "debug", skip_all, fields(enabled = self.ready.config.enabled))]
    pub fn build(self) -> ScrollstageResult<Interactive> {
        let Self {
            ready,
            image,
            seed,
            mut rng,
            dims,
            ratios,
            canvas,
            registry,
            content,
            expandable,
        } = self;

        let baseline = construction_state(&ready.internal);
        let (master, compiled) = if ready.config.enabled {
            let master = Choreography {
                dims: &dims,
                ratios,
                registry: &registry,
                content: &content,
                config: &ready.config,
                internal: &ready.internal,
                expandable: &expandable,
            }
            .build(&mut rng)?;
            let compiled = CompiledTimeline::compile(&master.arena, master.root, &baseline)?;
            (Some(master), Some(compiled))
        } else {
            tracing::debug!("interactive disabled, rendering the setup state");
            (None, None)
        };

        let (duration, label_times) = match &master {
            Some(m) => (
                m.duration()?,
                m.root_labels()?.into_iter().map(|(_, t)| t).collect(),
            ),
            None => (0.0, Vec::new()),
        };
        let link = ScrollLink::new(
            dims.element.top(),
            dims.window.height(),
            &ready.config,
            duration,
            &label_times,
        )?;

        let hook = RenderUpdateHook::new(&registry, seed ^ HOOK_SEED_SALT);
        let mut store = baseline.clone();
        if let Some(c) = &compiled {
            c.sample(0.0, &mut store);
        }

        Ok(Interactive {
            page: ready.page,
            config: ready.config,
            internal: ready.internal,
            seed,
            image,
            dims,
            ratios,
            canvas,
            registry,
            content,
            expandable,
            master,
            compiled,
            store,
            link,
            hook,
            last_scroll: 0.0,
        })
    }
}

/// Every shape except the focal one, shuffled, truncated to `round(shape_count * share)`.
pub fn select_expandable(
    rng: &mut Rng64,
    shape_count: usize,
    focal_index: usize,
    share: f64,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..shape_count).filter(|&i| i != focal_index).collect();
    shuffle(rng, &mut indices);
    let keep = (shape_count as f64 * share).round().max(0.0) as usize;
    indices.truncate(keep);
    indices
}

/// Run the whole setup pipeline.
///
/// Loads the background image (resolving its source against `base_dir`), then sets up content,
/// animations and the timeline. Returns `Ok(None)` when the page has no interactive root.
#[tracing::instrument(level = "debug", skip(page, config, surface))]
pub fn init(
    page: &PageSnapshot,
    config: InteractiveConfig,
    seed: u64,
    base_dir: Option<&Path>,
    surface: &mut dyn DrawingSurface,
) -> ScrollstageResult<Option<Interactive>> {
    if page.element.is_none() {
        tracing::debug!("no interactive element on the page");
        return Ok(None);
    }
    let image = Arc::new(page.load_background_image(base_dir)?);
    // Ratios follow the decoded natural size, not the declared one.
    let mut page = page.clone();
    page.background_image.width = image.width;
    page.background_image.height = image.height;

    let Some(ready) = DynamicContent::setup(&page, config, InternalConfig::default())? else {
        return Ok(None);
    };
    let mut interactive = ready.setup_animations(image, seed, surface)?.build()?;
    interactive.seek(0.0, surface)?;
    Ok(Some(interactive))
}

/// A fully set up interactive.
#[derive(Debug)]
pub struct Interactive {
    page: PageSnapshot,
    config: InteractiveConfig,
    internal: InternalConfig,
    seed: u64,
    image: Arc<PreparedImage>,
    dims: Dimensions,
    ratios: Ratios,
    canvas: Canvas,
    registry: DrawableRegistry,
    content: AnimatableContent,
    expandable: Vec<usize>,
    master: Option<MasterTimeline>,
    compiled: Option<CompiledTimeline>,
    store: PropertyStore,
    link: ScrollLink,
    hook: RenderUpdateHook,
    last_scroll: f64,
}

impl Interactive {
    /// Advance by `dt` seconds with the page scrolled to `scroll_y`, then redraw.
    ///
    /// While a snap runs, feed the returned `snap_scroll` back as the next `scroll_y`.
    pub fn tick(
        &mut self,
        scroll_y: f64,
        dt: f64,
        surface: &mut dyn DrawingSurface,
    ) -> ScrollstageResult<LinkFrame> {
        let frame = self.link.update(scroll_y, dt);
        self.last_scroll = frame.snap_scroll.unwrap_or(scroll_y);
        tracing::trace!(scroll_y, time = frame.time, "tick");
        self.redraw(frame.time, surface)?;
        Ok(frame)
    }

    /// Jump to `scroll_y` without smoothing and redraw. Returns the timeline time.
    pub fn seek(&mut self, scroll_y: f64, surface: &mut dyn DrawingSurface) -> ScrollstageResult<f64> {
        let time = self.link.seek(scroll_y);
        self.last_scroll = scroll_y;
        self.redraw(time, surface)?;
        Ok(time)
    }

    fn redraw(&mut self, time: f64, surface: &mut dyn DrawingSurface) -> ScrollstageResult<()> {
        if let Some(compiled) = &self.compiled {
            compiled.sample(time, &mut self.store);
        }
        let inputs = SceneInputs {
            registry: &self.registry,
            store: &self.store,
            canvas: self.canvas,
            image: &self.image,
            palette: &self.internal.palette,
        };
        self.hook.on_update(&inputs, surface)
    }

    /// Lay the page out for a new window size and rebuild from the same seed.
    ///
    /// Scroll progress through the pin is kept.
    #[tracing::instrument(level = "debug", skip(self, surface))]
    pub fn handle_resize(
        &mut self,
        width: f64,
        height: f64,
        surface: &mut dyn DrawingSurface,
    ) -> ScrollstageResult<()> {
        let progress = self.link.progress(self.last_scroll);
        let page = self.page.resized(width, height)?;
        let Some(ready) = DynamicContent::setup(&page, self.config.clone(), self.internal.clone())?
        else {
            return Ok(());
        };
        let rebuilt = ready
            .setup_animations(Arc::clone(&self.image), self.seed, surface)?
            .build()?;
        *self = rebuilt;
        let scroll_y = self.link.scroll_for_progress(progress);
        self.seek(scroll_y, surface)?;
        Ok(())
    }

    /// Root labels and their times, sorted by time. Empty when disabled.
    pub fn labels(&self) -> ScrollstageResult<Vec<(String, f64)>> {
        match &self.master {
            Some(m) => m.root_labels(),
            None => Ok(Vec::new()),
        }
    }

    /// Master timeline, if built.
    pub fn master(&self) -> Option<&MasterTimeline> {
        self.master.as_ref()
    }

    /// Timeline duration in seconds (0 when disabled).
    pub fn duration(&self) -> f64 {
        self.compiled.as_ref().map_or(0.0, CompiledTimeline::duration)
    }

    /// Current timeline time.
    pub fn time(&self) -> f64 {
        self.link.time()
    }

    /// Values written by the last sample.
    pub fn properties(&self) -> &PropertyStore {
        &self.store
    }

    /// Current values keyed by target name, then property name.
    pub fn described_properties(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        let mut out: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for (target, prop, value) in self.store.iter() {
            let name = match target {
                Target::Content(id) => self
                    .content
                    .name(id)
                    .map_or_else(|| target.to_string(), str::to_owned),
                _ => target.to_string(),
            };
            out.entry(name)
                .or_default()
                .insert(prop.name().to_owned(), value);
        }
        out
    }

    /// State the render hook last applied, for every drawable in canvas add order.
    pub fn applied_drawables(&self) -> Vec<(DrawableId, DrawableState)> {
        let states = self.hook.states();
        self.registry
            .all()
            .into_iter()
            .map(|id| (id, states.state(&self.registry, id)))
            .collect()
    }

    /// The scroll link.
    pub fn link(&self) -> &ScrollLink {
        &self.link
    }

    /// Measured rectangles.
    pub fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    /// Background/image scale.
    pub fn ratios(&self) -> Ratios {
        self.ratios
    }

    /// Canvas size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Drawables.
    pub fn registry(&self) -> &DrawableRegistry {
        &self.registry
    }

    /// Shapes chosen to drift.
    pub fn expandable(&self) -> &[usize] {
        &self.expandable
    }

    /// Render hook.
    pub fn hook(&self) -> &RenderUpdateHook {
        &self.hook
    }

    /// The page as currently laid out.
    pub fn page(&self) -> &PageSnapshot {
        &self.page
    }

    /// Viewport height unit of the current layout, in pixels.
    pub fn viewport_unit(&self) -> f64 {
        self.page.viewport_unit()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interactive/pipeline.rs"]
mod tests;
