use crate::{
    foundation::error::{ScrollstageError, ScrollstageResult},
    timeline::arena::{TimelineArena, TimelineId},
};

/// Absolute time of `label` in `root`'s local time, searching nested timelines.
///
/// `"start"` and `"end"` are reserved and never searched. Otherwise the candidates are every
/// descendant of `root` in pre-order followed by `root` itself, scanned from the back: `root` wins
/// a name collision, then the most recently enumerated descendant. The matching node's label time
/// is mapped up through each ancestor's start and time scale.
#[tracing::instrument(level = "trace", skip(arena))]
pub fn resolve_label_time(
    arena: &TimelineArena,
    root: TimelineId,
    label: &str,
) -> ScrollstageResult<f64> {
    match label {
        "start" => return Ok(0.0),
        "end" => return arena.duration(root),
        _ => {}
    }

    let mut bloodline = arena.descendants(root)?;
    bloodline.push(root);

    for &candidate in bloodline.iter().rev() {
        if let Some(local) = arena.label(candidate, label)? {
            return arena.to_ancestor_time(candidate, local, root);
        }
    }

    Err(ScrollstageError::label_not_found(label))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/resolve.rs"]
mod tests;
