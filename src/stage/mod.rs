//! Per-stage timelines: labels, content reveal tweens and progress fills.

/// Stage copy and its animatable targets.
pub mod content;
/// Canonical stage labels.
pub mod labels;
/// Stage timeline construction.
pub mod sequencer;

pub use content::{
    AnimatableContent, ContentBlock, ContentChild, ContentComponent, DynamicContent, ScrollPrompt,
    SetupStage,
};
pub use labels::StageLabel;
pub use sequencer::{StageSequencer, add_in_between_tween};
