use std::sync::Arc;

use anyhow::Context;

use crate::foundation::{
    core::Rgba8,
    error::{ScrollstageError, ScrollstageResult},
    math::Fnv1a64,
};

/// Decoded raster ready for drawing: premultiplied RGBA8, tightly packed.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub rgba8_premul: Arc<Vec<u8>>,
    /// Content fingerprint, used as a raster cache key.
    pub fingerprint: u64,
}

impl PreparedImage {
    fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> Self {
        let mut h = Fnv1a64::new_default();
        h.write_u32(width);
        h.write_u32(height);
        h.write_bytes(&rgba8_premul);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
            fingerprint: h.finish(),
        }
    }

    /// Single-color placeholder of the given natural size.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> ScrollstageResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScrollstageError::validation(
                "placeholder image must have a non-zero size",
            ));
        }
        let px = color.premultiplied().to_array();
        let len = width as usize * height as usize;
        let bytes = px.iter().copied().cycle().take(len * 4).collect();
        Ok(Self::from_premul(width, height, bytes))
    }
}

/// Decode any format `image` understands into a premultiplied [`PreparedImage`].
pub fn decode_image(bytes: &[u8]) -> ScrollstageResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage::from_premul(width, height, rgba8_premul))
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
