/// Measured rectangles.
pub mod rect;

pub use rect::{BoundingRect, RawRect, normalize, relative_to};
