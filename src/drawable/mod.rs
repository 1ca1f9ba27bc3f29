/// Drawable identities and group selection.
pub mod registry;
/// Per-drawable state applied by the render hook.
pub mod state;

pub use registry::{DrawableGroup, DrawableId, DrawableRegistry, ShapeKind, ShapeSlot};
pub use state::{DrawableState, DrawableStates};
