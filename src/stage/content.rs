use crate::animation::ContentTargetId;

/// Tags whose text is split into per-character targets.
const SPLITTABLE_TAGS: [&str; 7] = ["h1", "h2", "h3", "h4", "h5", "h6", "p"];

/// One markup block of stage copy.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContentBlock {
    /// Element tag name, e.g. `h2`, `p`, `a`.
    pub tag: String,
    /// Text content.
    #[serde(default)]
    pub text: String,
}

impl ContentBlock {
    fn is_splittable(&self) -> bool {
        let tag = self.tag.to_ascii_lowercase();
        SPLITTABLE_TAGS.contains(&tag.as_str())
    }
}

/// Authored copy of one stage.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SetupStage {
    /// Header blocks.
    pub header: Vec<ContentBlock>,
    /// Body blocks.
    pub body: Vec<ContentBlock>,
}

/// The scroll hint shown during the first stage.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrollPrompt {
    /// Prompt copy, split per character.
    pub text: String,
    /// Whether an arrow element follows the text.
    pub arrow: bool,
}

impl Default for ScrollPrompt {
    fn default() -> Self {
        Self {
            text: "Scroll".to_owned(),
            arrow: true,
        }
    }
}

/// Text component kinds, in their content-in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentComponent {
    /// Stage header copy.
    Header,
    /// Stage body copy.
    Body,
    /// The progress indicator.
    Progress,
    /// The scroll hint.
    ScrollPrompt,
}

impl ContentComponent {
    /// camelCase component name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Body => "body",
            Self::Progress => "progress",
            Self::ScrollPrompt => "scrollPrompt",
        }
    }

    /// `true` for components copied per stage.
    pub fn is_dynamic(self) -> bool {
        matches!(self, Self::Header | Self::Body)
    }
}

/// Copy moved from the authored setup stages into the dynamic components.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DynamicContent {
    stages: Vec<SetupStage>,
    progress_stages: usize,
}

impl DynamicContent {
    /// Copy `stage_count` stages. Stages missing from `setup_stages` are left empty.
    pub fn copy_from(setup_stages: &[SetupStage], stage_count: usize) -> Self {
        if setup_stages.len() < stage_count {
            tracing::debug!(
                authored = setup_stages.len(),
                stage_count,
                "missing setup stages are left empty"
            );
        }
        let stages = (0..stage_count)
            .map(|i| setup_stages.get(i).cloned().unwrap_or_default())
            .collect();

        Self {
            stages,
            // First and last stages have no progress indicator.
            progress_stages: stage_count.saturating_sub(2),
        }
    }

    /// Copied stages.
    pub fn stages(&self) -> &[SetupStage] {
        &self.stages
    }

    /// Number of progress indicator stages.
    pub fn progress_stages(&self) -> usize {
        self.progress_stages
    }
}

/// One animatable child of a component.
///
/// `parts` is what reverses when the child animates out: single characters for split text,
/// `[chars, arrow]` for the scroll prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentChild {
    /// Ordered target groups.
    pub parts: Vec<Vec<ContentTargetId>>,
}

impl ContentChild {
    /// Flattened targets, with part order reversed when `reversed`.
    pub fn targets(&self, reversed: bool) -> Vec<ContentTargetId> {
        let mut parts: Vec<&Vec<ContentTargetId>> = self.parts.iter().collect();
        if reversed {
            parts.reverse();
        }
        parts.into_iter().flatten().copied().collect()
    }

    fn single(id: ContentTargetId) -> Self {
        Self {
            parts: vec![vec![id]],
        }
    }
}

/// Every DOM-side animatable: split characters, unsplit blocks, progress stages and the scroll
/// prompt.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimatableContent {
    names: Vec<String>,
    header: Vec<Vec<ContentChild>>,
    body: Vec<Vec<ContentChild>>,
    progress: ContentChild,
    progress_bars: usize,
    scroll_prompt: ContentChild,
}

impl AnimatableContent {
    /// Split the copied stages and the scroll prompt into targets.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn split(content: &DynamicContent, scroll_prompt: &ScrollPrompt) -> Self {
        let mut out = Self::default();

        for (s, stage) in content.stages().iter().enumerate() {
            let header = out.split_blocks(&stage.header, &format!("stage{s}.header"));
            out.header.push(header);
            let body = out.split_blocks(&stage.body, &format!("stage{s}.body"));
            out.body.push(body);
        }

        let progress = (0..content.progress_stages())
            .map(|i| vec![out.push(format!("progress.stage{i}"))])
            .collect();
        out.progress = ContentChild { parts: progress };
        out.progress_bars = content.progress_stages();

        let chars = out.split_chars(&scroll_prompt.text, "scrollPrompt");
        let mut parts = vec![chars];
        if scroll_prompt.arrow {
            parts.push(vec![out.push("scrollPrompt.arrow".to_owned())]);
        }
        out.scroll_prompt = ContentChild { parts };

        tracing::debug!(targets = out.names.len(), "split animatable content");
        out
    }

    fn push(&mut self, name: String) -> ContentTargetId {
        self.names.push(name);
        ContentTargetId((self.names.len() - 1) as u32)
    }

    fn split_chars(&mut self, text: &str, prefix: &str) -> Vec<ContentTargetId> {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(k, c)| self.push(format!("{prefix}.char{k}[{c}]")))
            .collect()
    }

    fn split_blocks(&mut self, blocks: &[ContentBlock], prefix: &str) -> Vec<ContentChild> {
        blocks
            .iter()
            .enumerate()
            .map(|(n, block)| {
                let prefix = format!("{prefix}.{n}");
                if block.is_splittable() {
                    let chars = self.split_chars(&block.text, &prefix);
                    ContentChild {
                        parts: chars.into_iter().map(|id| vec![id]).collect(),
                    }
                } else {
                    ContentChild::single(self.push(format!("{prefix}.{}", block.tag)))
                }
            })
            .collect()
    }

    /// Children of `component` for `stage`. Progress and scroll prompt are a single child.
    pub fn children(&self, component: ContentComponent, stage: usize) -> Vec<ContentChild> {
        match component {
            ContentComponent::Header => self.header.get(stage).cloned().unwrap_or_default(),
            ContentComponent::Body => self.body.get(stage).cloned().unwrap_or_default(),
            ContentComponent::Progress => vec![self.progress.clone()],
            ContentComponent::ScrollPrompt => vec![self.scroll_prompt.clone()],
        }
    }

    /// Every target id.
    pub fn all_targets(&self) -> impl Iterator<Item = ContentTargetId> + '_ {
        (0..self.names.len()).map(|i| ContentTargetId(i as u32))
    }

    /// Number of progress bars (one per progress stage).
    pub fn progress_bars(&self) -> usize {
        self.progress_bars
    }

    /// Debug name of a target.
    pub fn name(&self, id: ContentTargetId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// `true` when there is nothing to animate.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/content.rs"]
mod tests;
