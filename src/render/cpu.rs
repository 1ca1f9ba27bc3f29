use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use kurbo::Shape as _;

use crate::{
    assets::PreparedImage,
    foundation::{
        core::{Affine, BezPath, Point, Rect, Rgba8, Rgba8Premul},
        error::{ScrollstageError, ScrollstageResult},
        math::{Fnv1a64, lerp},
    },
    render::{
        backend::{DrawingSurface, FrameRGBA, RenderSettings},
        scene::{DrawItem, GradientStop, LinearGradient, Scene},
    },
};

/// `vello_cpu` canvas holding one premultiplied pixmap.
pub struct CpuCanvas {
    settings: RenderSettings,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    image_cache: HashMap<u64, vello_cpu::Image>,
    gradient_cache: Option<(u64, vello_cpu::Image)>,
    gradient_rasters: u64,
    clip_cache: HashMap<u64, (Rect, vello_cpu::Image)>,
    clip_used: HashSet<u64>,
    clipped_rasters: u64,
}

impl CpuCanvas {
    /// A 1x1 canvas; call [`DrawingSurface::set_dimensions`] before drawing.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            width: 1,
            height: 1,
            pixmap: vello_cpu::Pixmap::new(1, 1),
            image_cache: HashMap::new(),
            gradient_cache: None,
            gradient_rasters: 0,
            clip_cache: HashMap::new(),
            clip_used: HashSet::new(),
            clipped_rasters: 0,
        }
    }

    /// Current size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    /// Copy of the last rendered frame.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// How many times the gradient has been rasterized.
    pub fn gradient_rasters(&self) -> u64 {
        self.gradient_rasters
    }

    /// How many clipped images have been rasterized.
    pub fn clipped_rasters(&self) -> u64 {
        self.clipped_rasters
    }

    fn image_paint_for(&mut self, image: &PreparedImage) -> ScrollstageResult<vello_cpu::Image> {
        if let Some(paint) = self.image_cache.get(&image.fingerprint) {
            return Ok(paint.clone());
        }
        let pixmap =
            image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache.insert(image.fingerprint, paint.clone());
        Ok(paint)
    }

    fn gradient_paint_for(
        &mut self,
        width: u32,
        height: u32,
        gradient: &LinearGradient,
        cache_token: u64,
    ) -> ScrollstageResult<vello_cpu::Image> {
        let key = gradient_key(width, height, gradient, cache_token);
        if let Some((k, paint)) = &self.gradient_cache
            && *k == key
        {
            return Ok(paint.clone());
        }

        let bytes = rasterize_linear_gradient(width, height, gradient);
        let pixmap = image_premul_bytes_to_pixmap(&bytes, width, height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.gradient_rasters += 1;
        self.gradient_cache = Some((key, paint.clone()));
        Ok(paint)
    }

    /// Raster of `image` drawn at `transform` and clipped by `clip`, covering the clip's pixel
    /// bounds within the canvas. `None` when the clip is off canvas.
    fn clipped_paint_for(
        &mut self,
        image: &PreparedImage,
        transform: Affine,
        clip: &BezPath,
        cache_token: u64,
    ) -> ScrollstageResult<Option<(Rect, vello_cpu::Image)>> {
        let canvas = Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        let bounds = clip.bounding_box().intersect(canvas).expand();
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Ok(None);
        }

        let key = clipped_key(image.fingerprint, transform, bounds, cache_token);
        self.clip_used.insert(key);
        if let Some(hit) = self.clip_cache.get(&key) {
            return Ok(Some(hit.clone()));
        }

        let w = raster_extent(bounds.width())?;
        let h = raster_extent(bounds.height())?;
        let to_local = Affine::translate(-bounds.origin().to_vec2());
        let paint = self.image_paint_for(image)?;

        let mut ctx = vello_cpu::RenderContext::new(w as u16, h as u16);
        ctx.set_transform(affine_to_cpu(to_local));
        ctx.push_clip_layer(&bezpath_to_cpu(clip));
        ctx.set_transform(affine_to_cpu(to_local * transform));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        ctx.pop_layer();
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w as u16, h as u16);
        ctx.render_to_pixmap(&mut pixmap);

        let raster = (
            Rect::from_origin_size(bounds.origin(), (f64::from(w), f64::from(h))),
            vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
        );
        self.clipped_rasters += 1;
        self.clip_cache.insert(key, raster.clone());
        Ok(Some(raster))
    }

    fn draw_item(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        backdrop: Affine,
        item: &DrawItem,
    ) -> ScrollstageResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match item {
            DrawItem::GradientRect {
                rect,
                gradient,
                opacity,
                cache_token,
            } => {
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return Ok(());
                }
                let w = raster_extent(rect.width())?;
                let h = raster_extent(rect.height())?;
                let paint = self.gradient_paint_for(w, h, gradient, *cache_token)?;

                let place = Affine::translate(rect.origin().to_vec2())
                    * Affine::scale_non_uniform(
                        rect.width() / f64::from(w),
                        rect.height() / f64::from(h),
                    );
                ctx.set_transform(affine_to_cpu(backdrop * place));
                ctx.set_paint(paint);
                with_opacity(ctx, *opacity, |ctx| {
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(w),
                        f64::from(h),
                    ));
                });
                Ok(())
            }
            DrawItem::Image {
                image,
                transform,
                opacity,
                clip: None,
                ..
            } => {
                let paint = self.image_paint_for(image)?;
                ctx.set_transform(affine_to_cpu(backdrop * *transform));
                ctx.set_paint(paint);
                with_opacity(ctx, *opacity, |ctx| {
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(image.width),
                        f64::from(image.height),
                    ));
                });
                Ok(())
            }
            DrawItem::Image {
                image,
                transform,
                opacity,
                clip: Some(clip),
                cache_token,
            } => {
                let Some((bounds, paint)) =
                    self.clipped_paint_for(image, *transform, clip, *cache_token)?
                else {
                    return Ok(());
                };
                ctx.set_transform(affine_to_cpu(
                    backdrop * Affine::translate(bounds.origin().to_vec2()),
                ));
                ctx.set_paint(paint);
                with_opacity(ctx, *opacity, |ctx| {
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        bounds.width(),
                        bounds.height(),
                    ));
                });
                Ok(())
            }
            DrawItem::Outline {
                path,
                transform,
                stroke_width,
                color,
                opacity,
            } => {
                ctx.set_transform(affine_to_cpu(backdrop * *transform));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*stroke_width));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    color.r, color.g, color.b, color.a,
                ));
                let cpu_path = bezpath_to_cpu(path);
                with_opacity(ctx, *opacity, |ctx| ctx.stroke_path(&cpu_path));
                Ok(())
            }
        }
    }
}

impl DrawingSurface for CpuCanvas {
    fn set_dimensions(&mut self, width: u32, height: u32) -> ScrollstageResult<()> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| ScrollstageError::render("canvas width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| ScrollstageError::render("canvas height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(ScrollstageError::render("canvas must have a non-zero size"));
        }
        if width_u16 != self.width || height_u16 != self.height {
            self.width = width_u16;
            self.height = height_u16;
            self.pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
            self.gradient_cache = None;
            self.clip_cache.clear();
        }
        tracing::debug!(width, height, "canvas dimensions set");
        Ok(())
    }

    fn render_all(&mut self, scene: &Scene) -> ScrollstageResult<()> {
        if scene.width != u32::from(self.width) || scene.height != u32::from(self.height) {
            return Err(ScrollstageError::render(format!(
                "scene is {}x{} but canvas is {}x{}",
                scene.width, scene.height, self.width, self.height
            )));
        }

        self.clip_used.clear();
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
        for item in &scene.items {
            self.draw_item(&mut ctx, scene.backdrop, item)?;
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        let used = &self.clip_used;
        self.clip_cache.retain(|key, _| used.contains(key));
        Ok(())
    }
}

fn with_opacity(
    ctx: &mut vello_cpu::RenderContext,
    opacity: f64,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) {
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity as f32);
        draw(ctx);
        ctx.pop_layer();
    } else {
        draw(ctx);
    }
}

fn raster_extent(v: f64) -> ScrollstageResult<u32> {
    let px = v.ceil().max(1.0);
    if px > f64::from(u16::MAX) {
        return Err(ScrollstageError::render("raster exceeds u16"));
    }
    Ok(px as u32)
}

fn gradient_key(width: u32, height: u32, gradient: &LinearGradient, cache_token: u64) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u32(width);
    h.write_u32(height);
    h.write_f64(gradient.start.x);
    h.write_f64(gradient.start.y);
    h.write_f64(gradient.end.x);
    h.write_f64(gradient.end.y);
    for stop in &gradient.stops {
        h.write_f64(stop.offset);
        h.write_bytes(&[stop.color.r, stop.color.g, stop.color.b, stop.color.a]);
    }
    h.write_u64(cache_token);
    h.finish()
}

fn clipped_key(fingerprint: u64, transform: Affine, bounds: Rect, cache_token: u64) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(fingerprint);
    for c in transform.as_coeffs() {
        h.write_f64(c);
    }
    h.write_f64(bounds.x0);
    h.write_f64(bounds.y0);
    h.write_f64(bounds.x1);
    h.write_f64(bounds.y1);
    h.write_u64(cache_token);
    h.finish()
}

/// Rasterize `gradient` over a `width` x `height` rect into premultiplied RGBA8.
///
/// Stops are applied in offset order and the ends pad with the outermost colors.
pub(crate) fn rasterize_linear_gradient(
    width: u32,
    height: u32,
    gradient: &LinearGradient,
) -> Vec<u8> {
    let (w, h) = (f64::from(width), f64::from(height));
    let mut stops = gradient.stops.clone();
    stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));

    let p0 = Point::new(gradient.start.x * w, gradient.start.y * h);
    let p1 = Point::new(gradient.end.x * w, gradient.end.y * h);
    let d = p1 - p0;
    let len2 = d.hypot2();

    let mut out = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let t = if len2 > 0.0 { (p - p0).dot(d) / len2 } else { 0.0 };
            out.extend_from_slice(&color_at(&stops, t).to_array());
        }
    }
    out
}

fn color_at(stops: &[GradientStop], t: f64) -> Rgba8Premul {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba8Premul::transparent();
    };
    if t <= first.offset {
        return first.color.premultiplied();
    }
    if t >= last.offset {
        return last.color.premultiplied();
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let u = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return mix(a.color, b.color, u).premultiplied();
        }
    }
    last.color.premultiplied()
}

fn mix(a: Rgba8, b: Rgba8, t: f64) -> Rgba8 {
    let ch = |x: u8, y: u8| lerp(f64::from(x), f64::from(y), t).round().clamp(0.0, 255.0) as u8;
    Rgba8 {
        r: ch(a.r, b.r),
        g: ch(a.g, b.g),
        b: ch(a.b, b.b),
        a: ch(a.a, b.a),
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> ScrollstageResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ScrollstageError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ScrollstageError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(ScrollstageError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
