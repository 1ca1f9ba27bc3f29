/// Crate-wide result alias.
pub type ScrollstageResult<T> = Result<T, ScrollstageError>;

/// Errors surfaced by setup, timeline construction, and rendering.
#[derive(thiserror::Error, Debug)]
pub enum ScrollstageError {
    /// Invalid configuration or page data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Structural misuse of the timeline tree (bad position, re-parenting).
    #[error("timeline error: {0}")]
    Timeline(String),

    /// A label was resolved before it was registered anywhere in the tree.
    #[error("label not found: {0}")]
    LabelNotFound(String),

    /// Tween construction failed.
    #[error("animation error: {0}")]
    Animation(String),

    /// Rasterization or surface failure.
    #[error("render error: {0}")]
    Render(String),

    /// (De)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually IO at the edges.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollstageError {
    /// Build a [`ScrollstageError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollstageError::Timeline`].
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`ScrollstageError::LabelNotFound`].
    pub fn label_not_found(label: impl Into<String>) -> Self {
        Self::LabelNotFound(label.into())
    }

    /// Build a [`ScrollstageError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ScrollstageError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScrollstageError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ScrollstageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}
