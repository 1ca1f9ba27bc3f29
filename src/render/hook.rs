use crate::{
    animation::{Prop, Target},
    drawable::{DrawableId, DrawableRegistry, DrawableStates},
    foundation::{error::ScrollstageResult, rng::Rng64},
    render::{
        backend::DrawingSurface,
        scene::{Scene, SceneInputs},
    },
};

/// Per-tick bridge from animated values to the drawing surface.
#[derive(Clone, Debug)]
pub struct RenderUpdateHook {
    states: DrawableStates,
    rng: Rng64,
    renders: u64,
}

impl RenderUpdateHook {
    /// Hook for `registry`, drawing cache tokens from a generator seeded with `seed`.
    pub fn new(registry: &DrawableRegistry, seed: u64) -> Self {
        Self {
            states: DrawableStates::new(registry),
            rng: Rng64::new(seed),
            renders: 0,
        }
    }

    /// State applied by the most recent update.
    pub fn states(&self) -> &DrawableStates {
        &self.states
    }

    /// Number of completed `render_all` calls.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Apply animated state to the drawables and redraw once.
    ///
    /// The rainbow's cache token is replaced first. Images then take their `scaleFactor` and are
    /// recentered on the canvas. Each shape and its mask take the shape's `scaleFactor`, the shape
    /// takes its `strokeWidth`, and the paired shape image gets a fresh cache token.
    pub fn on_update(
        &mut self,
        inputs: &SceneInputs<'_>,
        surface: &mut dyn DrawingSurface,
    ) -> ScrollstageResult<()> {
        let registry = inputs.registry;
        let store = inputs.store;

        let token = self.rng.next_u64();
        if let Some(s) = self.states.get_mut(registry, DrawableId::Rainbow) {
            s.cache_token = token;
        }

        let center = inputs.canvas.center();
        for id in registry.images(&[true, true], None) {
            let scale = store.value(Target::Drawable(id), Prop::ScaleFactor);
            if let Some(s) = self.states.get_mut(registry, id) {
                s.applied_scale = scale;
                s.center = Some(center);
            }
        }

        for i in 0..registry.shape_count() {
            let shape = Target::Drawable(DrawableId::Shape(i));
            let scale = store.value(shape, Prop::ScaleFactor);
            let stroke_width = store.value(shape, Prop::StrokeWidth);
            if let Some(s) = self.states.get_mut(registry, DrawableId::Shape(i)) {
                s.applied_scale = scale;
                s.stroke_width = stroke_width;
            }
            if let Some(s) = self.states.get_mut(registry, DrawableId::ShapeMask(i)) {
                s.applied_scale = scale;
            }
            let token = self.rng.next_u64();
            if let Some(s) = self.states.get_mut(registry, DrawableId::ShapeImage(i)) {
                s.cache_token = token;
            }
        }

        let scene = Scene::build(inputs, &self.states);
        tracing::trace!(items = scene.items.len(), "render_all");
        surface.render_all(&scene)?;
        self.renders += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/hook.rs"]
mod tests;
