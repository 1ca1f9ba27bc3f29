/// The five canonical labels every stage timeline carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StageLabel {
    /// Start of the stage.
    In,
    /// Content starts animating in.
    ContentIn,
    /// Resting point the scroll can snap to.
    Snap,
    /// Content starts animating out (absent on the last stage).
    ContentOut,
    /// Start of the trailing pad.
    Out,
}

impl StageLabel {
    /// Every label kind, in timeline order.
    pub const ALL: [Self; 5] = [
        Self::In,
        Self::ContentIn,
        Self::Snap,
        Self::ContentOut,
        Self::Out,
    ];

    /// Name suffix after `stage{i}`, e.g. `Snap`.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::In => "In",
            Self::ContentIn => "ContentIn",
            Self::Snap => "Snap",
            Self::ContentOut => "ContentOut",
            Self::Out => "Out",
        }
    }

    /// Label name for stage `i`, e.g. `stage2Snap`.
    pub fn name(self, i: usize) -> String {
        format!("stage{i}{}", self.suffix())
    }

    /// Inverse of [`StageLabel::name`].
    pub fn parse(name: &str) -> Option<(usize, Self)> {
        let rest = name.strip_prefix("stage")?;
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let (index, suffix) = rest.split_at(digits);
        let index = index.parse().ok()?;
        Self::ALL
            .into_iter()
            .find(|l| l.suffix() == suffix)
            .map(|l| (index, l))
    }
}
