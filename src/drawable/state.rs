use crate::{
    drawable::registry::{DrawableId, DrawableRegistry},
    foundation::core::Point,
};

/// State the render hook has actually applied to a drawable.
///
/// Timeline writes land in the property store; these are the copies the scene is built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawableState {
    /// Uniform scale applied to the drawable.
    pub applied_scale: f64,
    /// Stroke width applied to outlines.
    pub stroke_width: f64,
    /// Changes whenever the cached raster must be regenerated.
    pub cache_token: u64,
    /// Explicit center, set for images recentered on the canvas.
    pub center: Option<Point>,
}

impl Default for DrawableState {
    fn default() -> Self {
        Self {
            applied_scale: 1.0,
            stroke_width: 0.0,
            cache_token: 0,
            center: None,
        }
    }
}

/// Dense array of [`DrawableState`], one per registered drawable.
#[derive(Clone, Debug)]
pub struct DrawableStates {
    states: Vec<DrawableState>,
}

impl DrawableStates {
    /// Default state for every drawable in `registry`.
    pub fn new(registry: &DrawableRegistry) -> Self {
        Self {
            states: vec![DrawableState::default(); registry.len()],
        }
    }

    /// State of `id`, if it belongs to `registry`.
    pub fn get(&self, registry: &DrawableRegistry, id: DrawableId) -> Option<&DrawableState> {
        registry.index_of(id).and_then(|i| self.states.get(i))
    }

    /// Mutable state of `id`, if it belongs to `registry`.
    pub fn get_mut(
        &mut self,
        registry: &DrawableRegistry,
        id: DrawableId,
    ) -> Option<&mut DrawableState> {
        registry.index_of(id).and_then(|i| self.states.get_mut(i))
    }

    /// State of `id`, or the default for unknown ids.
    pub fn state(&self, registry: &DrawableRegistry, id: DrawableId) -> DrawableState {
        self.get(registry, id).copied().unwrap_or_default()
    }
}
