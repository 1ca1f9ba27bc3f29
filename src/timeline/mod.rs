//! Nested, labeled timelines and their flattened, scrubbable form.

/// Timeline tree storage.
pub mod arena;
/// Position expressions.
pub mod position;
/// Label lookup across nested timelines.
pub mod resolve;
/// Flattened tracks and sampling.
pub mod scrub;

pub use arena::{Child, TimelineArena, TimelineId};
pub use position::Position;
pub use resolve::resolve_label_time;
pub use scrub::{CompiledTimeline, PropertyStore};
