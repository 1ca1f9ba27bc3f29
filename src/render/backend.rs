use crate::{foundation::error::ScrollstageResult, render::scene::Scene};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// `true` if any pixel has non-zero alpha.
    pub fn has_coverage(&self) -> bool {
        self.data.chunks_exact(4).any(|px| px[3] != 0)
    }

    /// Pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Backend-agnostic settings.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// If set, surfaces clear to this RGBA8 color before drawing.
    pub clear_rgba: Option<[u8; 4]>,
}

/// Something a [`Scene`] can be drawn onto.
///
/// The render hook calls [`DrawingSurface::render_all`] exactly once per tick.
pub trait DrawingSurface {
    /// Resize the backing store. Called at setup and on every resize.
    fn set_dimensions(&mut self, width: u32, height: u32) -> ScrollstageResult<()>;

    /// Redraw everything.
    fn render_all(&mut self, scene: &Scene) -> ScrollstageResult<()>;
}
