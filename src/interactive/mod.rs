//! The hero interactive: configuration, page measurements, choreography and the setup pipeline.
//!
//! Setup runs in three typed steps, each consuming the previous one:
//! [`DynamicContent::setup`](crate::stage::DynamicContent::setup) yields [`ContentReady`],
//! [`ContentReady::setup_animations`] yields [`AnimationsReady`], and [`AnimationsReady::build`]
//! yields the running [`Interactive`]. [`init`] runs all three.

/// Master timeline construction.
pub mod choreography;
/// User and design configuration.
pub mod config;
/// Rectangles derived from a page snapshot.
pub mod dimensions;
/// Page measurement document.
pub mod page;
/// Typed setup steps and the running interactive.
pub mod pipeline;

pub use choreography::{Choreography, MasterTimeline, construction_state};
pub use config::{InteractiveConfig, InternalConfig, Palette, Scrub, SmoothScrollConfig};
pub use dimensions::{Dimensions, Ratios};
pub use page::{BackgroundImage, PageSnapshot, ShapeSnapshot, WindowSize};
pub use pipeline::{AnimationsReady, ContentReady, Interactive, init, select_expandable};
