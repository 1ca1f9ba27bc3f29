use crate::{
    animation::{Prop, Target, TweenVars},
    foundation::error::{ScrollstageError, ScrollstageResult},
    interactive::config::InteractiveConfig,
    stage::{
        content::{AnimatableContent, ContentComponent},
        labels::StageLabel,
    },
    timeline::{Position, TimelineArena, TimelineId, resolve_label_time},
};

/// Add a tween on `tl` that spans from label `start` (plus `offset`) to label `end`.
///
/// Both labels resolve through [`resolve_label_time`], so they may live on nested timelines. The
/// derived duration is `end - start - offset` and must not be negative.
pub fn add_in_between_tween(
    arena: &mut TimelineArena,
    tl: TimelineId,
    targets: impl IntoIterator<Item = Target>,
    vars: TweenVars,
    start: &str,
    end: &str,
    offset: f64,
) -> ScrollstageResult<()> {
    let start_time = resolve_label_time(arena, tl, start)?;
    let end_time = resolve_label_time(arena, tl, end)?;
    let duration = end_time - start_time - offset;
    if duration < 0.0 {
        return Err(ScrollstageError::animation(format!(
            "tween from \"{start}\"+{offset} to \"{end}\" has negative duration {duration}"
        )));
    }
    arena.to(
        tl,
        targets,
        vars.with_duration(duration),
        start_time + offset,
    )
}

/// Builds one child timeline per stage under a root timeline.
pub struct StageSequencer<'a> {
    arena: &'a mut TimelineArena,
    root: TimelineId,
    content: &'a AnimatableContent,
    config: &'a InteractiveConfig,
    stage_count: usize,
    components: Vec<ContentComponent>,
}

impl<'a> StageSequencer<'a> {
    /// Sequencer appending to `root`.
    pub fn new(
        arena: &'a mut TimelineArena,
        root: TimelineId,
        content: &'a AnimatableContent,
        config: &'a InteractiveConfig,
        stage_count: usize,
    ) -> Self {
        Self {
            arena,
            root,
            content,
            config,
            stage_count,
            components: vec![ContentComponent::Header, ContentComponent::Body],
        }
    }

    /// Per-stage components in content-in order. Defaults to header then body.
    pub fn with_components(mut self, components: &[ContentComponent]) -> Self {
        self.components = components.to_vec();
        self
    }

    /// Append every stage timeline to the root, in order.
    #[tracing::instrument(level = "debug", skip(self), fields(stages = self.stage_count))]
    pub fn build_stages(&mut self) -> ScrollstageResult<()> {
        for i in 0..self.stage_count {
            let tl = self.build_stage(i)?;
            self.arena.add(self.root, tl, Position::End)?;
        }
        tracing::debug!(duration = self.arena.duration(self.root)?, "stages built");
        Ok(())
    }

    fn build_stage(&mut self, i: usize) -> ScrollstageResult<TimelineId> {
        let cfg = self.config;
        let last = self.stage_count - 1;
        let tl = self.arena.new_timeline();

        let progress_in = i == 1;
        let progress_bar = i > 0 && i < last;
        let progress_out = self.stage_count >= 2 && i == self.stage_count - 2;
        let scroll_prompt = i == 0;

        let stage_in = StageLabel::In.name(i);
        let content_in = StageLabel::ContentIn.name(i);

        self.arena.add_label(tl, stage_in.clone(), Position::End)?;
        self.arena.add_label(
            tl,
            content_in.clone(),
            Position::label(stage_in.clone(), cfg.stage_in_duration),
        )?;
        self.add_stage_content_tween(tl, i, &content_in, false, progress_in, scroll_prompt)?;

        self.arena.add_label(
            tl,
            StageLabel::Snap.name(i),
            Position::AfterPrevious(cfg.stage_out_delay / 2.0),
        )?;

        if i < last {
            let content_out = StageLabel::ContentOut.name(i);
            self.arena.add_label(
                tl,
                content_out.clone(),
                Position::AfterPrevious(cfg.stage_out_delay),
            )?;
            self.add_stage_content_tween(tl, i, &content_out, true, progress_out, scroll_prompt)?;
        }

        self.arena
            .add_label(tl, StageLabel::Out.name(i), Position::End)?;
        self.arena.to(
            tl,
            [Target::Null],
            TweenVars::new(cfg.stage_out_delay).to(Prop::Value, 1.0),
            Position::End,
        )?;

        if progress_bar {
            let start = if i == 1 { &content_in } else { &stage_in };
            add_in_between_tween(
                self.arena,
                tl,
                [Target::ProgressBar(i - 1)],
                TweenVars::new(0.0).to(Prop::ScaleX, 1.0),
                start,
                "end",
                0.0,
            )?;
        }

        Ok(tl)
    }

    /// Content tweens for stage `stage` starting at `start_label` on `tl`.
    ///
    /// Out tweens reverse the component order, each component's children, and each child's parts.
    fn add_stage_content_tween(
        &mut self,
        tl: TimelineId,
        stage: usize,
        start_label: &str,
        is_out: bool,
        include_progress: bool,
        include_scroll_prompt: bool,
    ) -> ScrollstageResult<()> {
        let cfg = self.config;

        let mut order = self.components.clone();
        if include_progress {
            order.push(ContentComponent::Progress);
        }
        if include_scroll_prompt {
            order.push(ContentComponent::ScrollPrompt);
        }
        if is_out {
            order.reverse();
        }

        let (opacity, rotation_x) = if is_out { (0.0, 60.0) } else { (1.0, 0.0) };

        for (ci, component) in order.into_iter().enumerate() {
            let mut children = self.content.children(component, stage);
            if is_out {
                children.reverse();
            }

            let each = cfg.letters_stagger_for(component);
            let component_delay = cfg.text_component_stagger * ci as f64;

            for (n, child) in children.iter().enumerate() {
                let targets = child.targets(is_out);
                if targets.is_empty() {
                    continue;
                }
                let delay = component_delay + cfg.text_component_child_stagger * n as f64;
                self.arena.to(
                    tl,
                    targets.into_iter().map(Target::Content),
                    TweenVars::new(cfg.letters_duration)
                        .to(Prop::Opacity, opacity)
                        .to(Prop::RotationX, rotation_x)
                        .stagger(each),
                    Position::label(start_label, delay),
                )?;
            }
        }
        Ok(())
    }

    /// Copy every `stage{i}Snap` onto the root at its absolute time.
    pub fn hoist_snap_labels(&mut self) -> ScrollstageResult<()> {
        for i in 0..self.stage_count {
            let name = StageLabel::Snap.name(i);
            let t = resolve_label_time(self.arena, self.root, &name)?;
            self.arena.add_label(self.root, name, t)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/sequencer.rs"]
mod tests;
