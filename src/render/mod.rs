//! Scene building and rasterization.
//!
//! [`RenderUpdateHook`] turns the sampled property store into a [`Scene`] once per tick and hands
//! it to a [`DrawingSurface`]. [`CpuCanvas`] is the `vello_cpu` implementation.

/// Frames and the drawing surface trait.
pub mod backend;
/// `vello_cpu` drawing surface.
pub mod cpu;
/// Per-tick render update.
pub mod hook;
/// Draw lists built from animated state.
pub mod scene;

pub use backend::{DrawingSurface, FrameRGBA, RenderSettings};
pub use cpu::CpuCanvas;
pub use hook::RenderUpdateHook;
pub use scene::{DrawItem, GradientStop, LinearGradient, Scene, SceneInputs, shape_geometry};
