use std::path::Path;

use anyhow::Context;

use crate::{
    assets::{PreparedImage, decode_image},
    drawable::ShapeKind,
    foundation::{
        core::Rgba8,
        error::{ScrollstageError, ScrollstageResult},
    },
    geometry::RawRect,
    scroll::viewport_unit,
    stage::content::{ScrollPrompt, SetupStage},
};

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WindowSize {
    /// `innerWidth`.
    pub width: f64,
    /// `innerHeight`.
    pub height: f64,
}

/// A measured guide shape.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeSnapshot {
    /// Outline primitive.
    pub kind: ShapeKind,
    /// Page-space bounds.
    pub rect: RawRect,
}

/// The image shown through the gradient and the shape masks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackgroundImage {
    /// Path to an image file, relative to the page document. Without one, a solid placeholder of
    /// the natural size is used.
    #[serde(default)]
    pub source: Option<String>,
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Placeholder color (`#RRGGBB[AA]`).
    #[serde(default)]
    pub fill: Option<String>,
}

/// Layout measurements and authored copy for one page load.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    /// Viewport size.
    pub window: WindowSize,
    /// The interactive root. Absent means the page has no interactive.
    #[serde(default)]
    pub element: Option<RawRect>,
    /// The element the canvas fills.
    pub background: RawRect,
    /// Where the focal shape starts.
    pub focal_point: RawRect,
    /// Bounds the shapes are laid out in.
    pub shape_guide: RawRect,
    /// Guide shapes in markup order.
    #[serde(default)]
    pub shapes: Vec<ShapeSnapshot>,
    /// Background image.
    pub background_image: BackgroundImage,
    /// Authored copy per stage.
    #[serde(default)]
    pub setup_stages: Vec<SetupStage>,
    /// Scroll hint.
    #[serde(default)]
    pub scroll_prompt: ScrollPrompt,
    /// `documentElement.clientHeight`, when it differs from the window height.
    #[serde(default)]
    pub client_height: Option<f64>,
}

const DEFAULT_FILL: Rgba8 = Rgba8::opaque(0x1b, 0x1f, 0x3a);

impl PageSnapshot {
    /// Parse a snapshot document.
    pub fn from_json_str(s: &str) -> ScrollstageResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reject snapshots the interactive cannot lay out.
    pub fn validate(&self) -> ScrollstageResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.window.width) || !positive(self.window.height) {
            return Err(ScrollstageError::validation(format!(
                "window must have a positive size, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !positive(self.background.width) || !positive(self.background.height) {
            return Err(ScrollstageError::validation(format!(
                "background must have a positive size, got {}x{}",
                self.background.width, self.background.height
            )));
        }
        if self.background_image.width == 0 || self.background_image.height == 0 {
            return Err(ScrollstageError::validation(
                "background image must have a non-zero natural size",
            ));
        }
        Ok(())
    }

    /// One percent of the usable viewport height for this layout.
    pub fn viewport_unit(&self) -> f64 {
        let client = self.client_height.unwrap_or(self.window.height);
        viewport_unit(client, self.window.height)
    }

    /// The same page laid out for a `width` x `height` window.
    ///
    /// Every measured rectangle scales with the window on its own axis.
    pub fn resized(&self, width: f64, height: f64) -> ScrollstageResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ScrollstageError::validation(format!(
                "resize target must be positive, got {width}x{height}"
            )));
        }
        let sx = width / self.window.width;
        let sy = height / self.window.height;
        Ok(Self {
            window: WindowSize { width, height },
            element: self.element.map(|r| r.scaled(sx, sy)),
            background: self.background.scaled(sx, sy),
            focal_point: self.focal_point.scaled(sx, sy),
            shape_guide: self.shape_guide.scaled(sx, sy),
            shapes: self
                .shapes
                .iter()
                .map(|s| ShapeSnapshot {
                    kind: s.kind,
                    rect: s.rect.scaled(sx, sy),
                })
                .collect(),
            client_height: self.client_height.map(|h| h * sy),
            ..self.clone()
        })
    }

    /// Load the background image, resolving `source` against `base_dir`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load_background_image(
        &self,
        base_dir: Option<&Path>,
    ) -> ScrollstageResult<PreparedImage> {
        let bg = &self.background_image;
        match &bg.source {
            Some(source) => {
                let path = match base_dir {
                    Some(dir) => dir.join(source),
                    None => Path::new(source).to_path_buf(),
                };
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read background image {}", path.display()))?;
                decode_image(&bytes)
            }
            None => {
                let color = match &bg.fill {
                    Some(hex) => Rgba8::from_hex(hex)?,
                    None => DEFAULT_FILL,
                };
                PreparedImage::solid(bg.width, bg.height, color)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interactive/page.rs"]
mod tests;
