//! Scroll-driven stage choreography for a hero canvas collage.
//!
//! A page is described by a [`PageSnapshot`]. [`init`] measures it, registers the canvas
//! drawables and builds a master timeline of labeled stages. Each [`Interactive::tick`] maps the
//! scroll offset to a time, samples every animated property, and redraws through a
//! [`DrawingSurface`] such as [`CpuCanvas`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Tween vocabulary: targets, properties, eases.
pub mod animation;
/// Background image loading.
pub mod assets;
/// Canvas drawables.
pub mod drawable;
/// Shared primitives.
pub mod foundation;
/// Rectangle helpers.
pub mod geometry;
/// The interactive and its setup.
pub mod interactive;
/// Scenes and drawing surfaces.
pub mod render;
/// Scroll driving.
pub mod scroll;
/// Stage sequencing.
pub mod stage;
/// Timelines, labels and sampling.
pub mod timeline;

pub use animation::{Ease, Prop, Target, TweenVars};
pub use assets::{PreparedImage, decode_image};
pub use drawable::{DrawableId, DrawableRegistry, ShapeKind};
pub use foundation::core::{Canvas, Rgba8};
pub use foundation::error::{ScrollstageError, ScrollstageResult};
pub use foundation::rng::Rng64;
pub use geometry::{BoundingRect, RawRect};
pub use interactive::{
    Interactive, InteractiveConfig, InternalConfig, PageSnapshot, SmoothScrollConfig, init,
};
pub use render::{CpuCanvas, DrawingSurface, FrameRGBA, RenderSettings, Scene};
pub use scroll::{LinkFrame, ScrollLink, SmoothScroll, viewport_unit};
pub use stage::{StageLabel, add_in_between_tween};
pub use timeline::{CompiledTimeline, Position, PropertyStore, TimelineArena, resolve_label_time};
