use std::collections::BTreeMap;

use crate::{
    animation::{Ease, Prop, Target, TweenValue},
    foundation::{error::ScrollstageResult, math::lerp},
    timeline::arena::{Child, TimelineArena, TimelineId},
};

/// Current value of every animated (target, property) pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyStore {
    values: BTreeMap<(Target, Prop), f64>,
}

impl PropertyStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value, if any.
    pub fn get(&self, target: Target, prop: Prop) -> Option<f64> {
        self.values.get(&(target, prop)).copied()
    }

    /// Stored value or the property's resting default.
    pub fn value(&self, target: Target, prop: Prop) -> f64 {
        self.get(target, prop).unwrap_or_else(|| prop.default_value())
    }

    /// Overwrite a value.
    pub fn set(&mut self, target: Target, prop: Prop, value: f64) {
        self.values.insert((target, prop), value);
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in (target, prop) order.
    pub fn iter(&self) -> impl Iterator<Item = (Target, Prop, f64)> + '_ {
        self.values.iter().map(|(&(t, p), &v)| (t, p, v))
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Segment {
    start: f64,
    duration: f64,
    from: f64,
    to: f64,
    ease: Ease,
}

impl Segment {
    fn value_at(&self, t: f64) -> f64 {
        if self.duration <= 0.0 || t >= self.start + self.duration {
            return self.to;
        }
        let p = ((t - self.start) / self.duration).clamp(0.0, 1.0);
        lerp(self.from, self.to, self.ease.apply(p))
    }
}

struct RawSegment {
    start: f64,
    duration: f64,
    value: TweenValue,
    ease: Ease,
}

/// A timeline tree flattened into per-property tracks in root time.
///
/// Within a track the most recently started segment wins. A segment's start value is whatever the
/// track holds at that moment, so relative (`By`) values chain from earlier segments.
#[derive(Clone, Debug, Default)]
pub struct CompiledTimeline {
    duration: f64,
    tracks: BTreeMap<(Target, Prop), Vec<Segment>>,
}

impl CompiledTimeline {
    /// Flatten `root`. Properties absent from `baseline` start from [`Prop::default_value`].
    #[tracing::instrument(level = "debug", skip(arena, baseline))]
    pub fn compile(
        arena: &TimelineArena,
        root: TimelineId,
        baseline: &PropertyStore,
    ) -> ScrollstageResult<Self> {
        let mut raw: BTreeMap<(Target, Prop), Vec<RawSegment>> = BTreeMap::new();
        flatten(arena, root, 0.0, 1.0, &mut raw)?;

        let mut tracks = BTreeMap::new();
        for (key, mut segs) in raw {
            // Stable: equal starts keep insertion order.
            segs.sort_by(|a, b| a.start.total_cmp(&b.start));

            let mut resolved: Vec<Segment> = Vec::with_capacity(segs.len());
            for seg in segs {
                let from = match resolved.last() {
                    Some(prev) => prev.value_at(seg.start),
                    None => baseline.value(key.0, key.1),
                };
                resolved.push(Segment {
                    start: seg.start,
                    duration: seg.duration,
                    from,
                    to: seg.value.resolve(from),
                    ease: seg.ease,
                });
            }
            tracks.insert(key, resolved);
        }

        let duration = arena.duration(root)?;
        tracing::debug!(tracks = tracks.len(), duration, "compiled timeline");
        Ok(Self { duration, tracks })
    }

    /// Root duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of (target, prop) tracks.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Write every track's value at root time `t` into `store`.
    ///
    /// Before a track's first segment the segment's start value is written.
    pub fn sample(&self, t: f64, store: &mut PropertyStore) {
        for (&(target, prop), segs) in &self.tracks {
            let started = segs.partition_point(|s| s.start <= t);
            let value = match started.checked_sub(1) {
                Some(i) => segs[i].value_at(t),
                None => segs[0].from,
            };
            store.set(target, prop, value);
        }
    }
}

fn flatten(
    arena: &TimelineArena,
    id: TimelineId,
    offset: f64,
    scale: f64,
    out: &mut BTreeMap<(Target, Prop), Vec<RawSegment>>,
) -> ScrollstageResult<()> {
    for child in arena.children(id)? {
        match child {
            Child::Tween(tween) => {
                for (k, target) in tween.targets.iter().enumerate() {
                    let start = offset + tween.target_start(k) / scale;
                    let duration = tween.vars.duration / scale;
                    for &(prop, value) in &tween.vars.props {
                        out.entry((*target, prop)).or_default().push(RawSegment {
                            start,
                            duration,
                            value,
                            ease: tween.vars.ease,
                        });
                    }
                }
            }
            Child::Timeline(c) => {
                let child_scale = scale * arena.time_scale(*c)?;
                let child_offset = offset + arena.start_in_parent(*c)? / scale;
                flatten(arena, *c, child_offset, child_scale, out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scrub.rs"]
mod tests;
