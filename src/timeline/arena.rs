use crate::{
    animation::{Target, Tween, TweenVars},
    foundation::error::{ScrollstageError, ScrollstageResult},
    timeline::position::Position,
};

/// Handle to a timeline node inside a [`TimelineArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimelineId(usize);

/// Child of a timeline node, in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub enum Child {
    /// A nested timeline.
    Timeline(TimelineId),
    /// A tween in the owning node's local time.
    Tween(Tween),
}

#[derive(Clone, Debug)]
struct TimelineNode {
    labels: Vec<(String, f64)>,
    time_scale: f64,
    start_in_parent: f64,
    parent: Option<TimelineId>,
    children: Vec<Child>,
    // (start, end) of the most recently added child, local time.
    last_added: Option<(f64, f64)>,
}

impl TimelineNode {
    fn new() -> Self {
        Self {
            labels: Vec::new(),
            time_scale: 1.0,
            start_in_parent: 0.0,
            parent: None,
            children: Vec::new(),
            last_added: None,
        }
    }
}

/// Owns every timeline node. Nodes refer to each other by [`TimelineId`].
#[derive(Clone, Debug, Default)]
pub struct TimelineArena {
    nodes: Vec<TimelineNode>,
}

impl TimelineArena {
    /// Empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a detached timeline with time scale 1.
    pub fn new_timeline(&mut self) -> TimelineId {
        self.nodes.push(TimelineNode::new());
        TimelineId(self.nodes.len() - 1)
    }

    fn node(&self, id: TimelineId) -> ScrollstageResult<&TimelineNode> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| ScrollstageError::timeline(format!("unknown timeline {:?}", id)))
    }

    fn node_mut(&mut self, id: TimelineId) -> ScrollstageResult<&mut TimelineNode> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| ScrollstageError::timeline(format!("unknown timeline {:?}", id)))
    }

    /// Set a node's local time scale. Must be finite and positive.
    pub fn set_time_scale(&mut self, id: TimelineId, scale: f64) -> ScrollstageResult<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ScrollstageError::timeline(format!(
                "time scale must be finite and > 0, got {scale}"
            )));
        }
        self.node_mut(id)?.time_scale = scale;
        Ok(())
    }

    /// Local time scale.
    pub fn time_scale(&self, id: TimelineId) -> ScrollstageResult<f64> {
        Ok(self.node(id)?.time_scale)
    }

    /// Start time inside the parent's local time (0 for detached nodes).
    pub fn start_in_parent(&self, id: TimelineId) -> ScrollstageResult<f64> {
        Ok(self.node(id)?.start_in_parent)
    }

    /// Parent node, if attached.
    pub fn parent(&self, id: TimelineId) -> ScrollstageResult<Option<TimelineId>> {
        Ok(self.node(id)?.parent)
    }

    /// Children in insertion order.
    pub fn children(&self, id: TimelineId) -> ScrollstageResult<&[Child]> {
        Ok(&self.node(id)?.children)
    }

    /// Labels in insertion order.
    pub fn labels(&self, id: TimelineId) -> ScrollstageResult<&[(String, f64)]> {
        Ok(&self.node(id)?.labels)
    }

    /// Local time of a label registered directly on `id`.
    pub fn label(&self, id: TimelineId, name: &str) -> ScrollstageResult<Option<f64>> {
        Ok(self
            .node(id)?
            .labels
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| *t))
    }

    /// Local duration: the latest end among children. Labels never extend it.
    pub fn duration(&self, id: TimelineId) -> ScrollstageResult<f64> {
        let node = self.node(id)?;
        let mut end = 0.0f64;
        for child in &node.children {
            end = end.max(self.child_end(child)?);
        }
        Ok(end)
    }

    fn child_end(&self, child: &Child) -> ScrollstageResult<f64> {
        match child {
            Child::Tween(t) => Ok(t.end()),
            Child::Timeline(c) => {
                let node = self.node(*c)?;
                Ok(node.start_in_parent + self.duration(*c)? / node.time_scale)
            }
        }
    }

    /// Resolve a position to local time in `id`.
    pub fn resolve_position(&self, id: TimelineId, position: &Position) -> ScrollstageResult<f64> {
        let node = self.node(id)?;
        let t = match position {
            Position::End => self.duration(id)?,
            Position::At(t) => *t,
            Position::FromEnd(offset) => self.duration(id)? + offset,
            Position::Label { name, offset } => {
                let at = match name.as_str() {
                    "start" => 0.0,
                    "end" => self.duration(id)?,
                    _ => self
                        .label(id, name)?
                        .ok_or_else(|| ScrollstageError::label_not_found(name.clone()))?,
                };
                at + offset
            }
            Position::AfterPrevious(offset) => {
                let end = match node.last_added {
                    Some((_, end)) => end,
                    None => self.duration(id)?,
                };
                end + offset
            }
            Position::WithPrevious(offset) => {
                let start = match node.last_added {
                    Some((start, _)) => start,
                    None => self.duration(id)?,
                };
                start + offset
            }
        };
        Ok(t.max(0.0))
    }

    /// Register (or move) a label on `id`.
    pub fn add_label(
        &mut self,
        id: TimelineId,
        name: impl Into<String>,
        position: impl Into<Position>,
    ) -> ScrollstageResult<f64> {
        let name = name.into();
        if name.is_empty() || name == "start" || name == "end" {
            return Err(ScrollstageError::timeline(format!(
                "\"{name}\" cannot be used as a label name"
            )));
        }
        let t = self.resolve_position(id, &position.into())?;
        let node = self.node_mut(id)?;
        match node.labels.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = t,
            None => node.labels.push((name, t)),
        }
        Ok(t)
    }

    /// Append a tween on `targets` at `position`.
    pub fn to(
        &mut self,
        id: TimelineId,
        targets: impl IntoIterator<Item = Target>,
        vars: TweenVars,
        position: impl Into<Position>,
    ) -> ScrollstageResult<()> {
        vars.validate()?;
        let start = self.resolve_position(id, &position.into())?;
        let tween = Tween {
            targets: targets.into_iter().collect(),
            vars,
            start,
        };
        let end = tween.end();
        let node = self.node_mut(id)?;
        node.children.push(Child::Tween(tween));
        node.last_added = Some((start, end));
        Ok(())
    }

    /// Zero-duration tween: the properties jump at `position`.
    pub fn set(
        &mut self,
        id: TimelineId,
        targets: impl IntoIterator<Item = Target>,
        vars: TweenVars,
        position: impl Into<Position>,
    ) -> ScrollstageResult<()> {
        self.to(id, targets, vars.with_duration(0.0).stagger(0.0), position)
    }

    /// Attach a detached timeline `child` under `parent` at `position`.
    pub fn add(
        &mut self,
        parent: TimelineId,
        child: TimelineId,
        position: impl Into<Position>,
    ) -> ScrollstageResult<()> {
        if parent == child {
            return Err(ScrollstageError::timeline(
                "a timeline cannot be added to itself",
            ));
        }
        if self.node(child)?.parent.is_some() {
            return Err(ScrollstageError::timeline(format!(
                "timeline {:?} already has a parent",
                child
            )));
        }
        if self.is_ancestor(child, parent)? {
            return Err(ScrollstageError::timeline(
                "adding this timeline would create a cycle",
            ));
        }

        let start = self.resolve_position(parent, &position.into())?;
        let child_node = self.node(child)?;
        let end = start + self.duration(child)? / child_node.time_scale;

        let child_node = self.node_mut(child)?;
        child_node.parent = Some(parent);
        child_node.start_in_parent = start;

        let parent_node = self.node_mut(parent)?;
        parent_node.children.push(Child::Timeline(child));
        parent_node.last_added = Some((start, end));
        Ok(())
    }

    fn is_ancestor(&self, candidate: TimelineId, of: TimelineId) -> ScrollstageResult<bool> {
        let mut cur = self.node(of)?.parent;
        while let Some(p) = cur {
            if p == candidate {
                return Ok(true);
            }
            cur = self.node(p)?.parent;
        }
        Ok(false)
    }

    /// Every descendant timeline of `id`, depth-first pre-order.
    pub fn descendants(&self, id: TimelineId) -> ScrollstageResult<Vec<TimelineId>> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out)?;
        Ok(out)
    }

    fn collect_descendants(
        &self,
        id: TimelineId,
        out: &mut Vec<TimelineId>,
    ) -> ScrollstageResult<()> {
        for child in &self.node(id)?.children {
            if let Child::Timeline(c) = child {
                out.push(*c);
                self.collect_descendants(*c, out)?;
            }
        }
        Ok(())
    }

    /// Map local time in `id` to local time in its ancestor `root`.
    pub fn to_ancestor_time(
        &self,
        id: TimelineId,
        local: f64,
        root: TimelineId,
    ) -> ScrollstageResult<f64> {
        let mut time = local;
        let mut cur = id;
        while cur != root {
            let node = self.node(cur)?;
            time = node.start_in_parent + time / node.time_scale;
            cur = node.parent.ok_or_else(|| {
                ScrollstageError::timeline(format!("timeline {:?} is not under {:?}", id, root))
            })?;
        }
        Ok(time)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/arena.rs"]
mod tests;
