/// Easing curves.
pub mod ease;
/// What a tween writes to.
pub mod target;
/// Tween values and placement.
pub mod tween;

pub use ease::Ease;
pub use target::{ContentTargetId, Prop, Target};
pub use tween::{Tween, TweenValue, TweenVars};
