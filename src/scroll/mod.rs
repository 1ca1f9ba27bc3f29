//! Scroll position to timeline time: pinning, scrub smoothing, label snapping and the smooth
//! scroller that feeds it.

/// Scroll to timeline mapping.
pub mod link;
/// Smoothed scroll position.
pub mod smooth;

pub use link::{LinkFrame, ScrollLink, SnapConfig};
pub use smooth::{SmoothScroll, viewport_unit};
