//! CPU rasterizer: walks the display tree back-to-front and executes
//! its draw commands through `vello_cpu`, with text shaped by Parley.
//!
//! Strokes are expanded to fill paths with kurbo's stroker so the
//! backend only ever fills; dash patterns ride through the stroke
//! style. Output is premultiplied RGBA8.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::assets::store::TextureStore;
use crate::display::container::{Container, DisplayObject};
use crate::display::graphics::{DrawCmd, Graphics, Paint, StrokeStyle, TextAnchor};
use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgb, Vec2, Viewport};
use crate::foundation::error::{WaymarkError, WaymarkResult};
use crate::render::backend::{FrameRGBA, RenderSettings};

/// Glyph brush carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct TextBrush {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
}

impl TextEngine {
    fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    fn layout_plain(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrush,
    ) -> WaymarkResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(WaymarkError::validation("text size must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            WaymarkError::asset("no font families registered from font bytes")
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| WaymarkError::asset("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// CPU backend rendering the display tree to [`FrameRGBA`].
pub struct CpuRenderer {
    viewport: Viewport,
    settings: RenderSettings,

    ctx: Option<vello_cpu::RenderContext>,
    text_engine: TextEngine,
    font: Option<vello_cpu::peniko::FontData>,
    image_cache: HashMap<String, vello_cpu::Image>,
    warned_missing_font: bool,
}

impl CpuRenderer {
    /// Construct a renderer for the viewport, validating that the
    /// dimensions fit the rasterizer's surface limits.
    pub fn new(viewport: Viewport, settings: RenderSettings) -> WaymarkResult<Self> {
        if viewport.width == 0 || viewport.height == 0 {
            return Err(WaymarkError::render("render target must be > 0 on each axis"));
        }
        if viewport.width > u32::from(u16::MAX) || viewport.height > u32::from(u16::MAX) {
            return Err(WaymarkError::render("render target exceeds u16 surface limit"));
        }
        Ok(Self {
            viewport,
            settings,
            ctx: None,
            text_engine: TextEngine::new(),
            font: None,
            image_cache: HashMap::new(),
            warned_missing_font: false,
        })
    }

    /// Curve flattening tolerance; coarser on the degraded path.
    fn tolerance(&self) -> f64 {
        if self.settings.antialias { 0.1 } else { 0.5 }
    }

    /// Rasterize the world with the camera offset applied, clearing to
    /// `clear` (or the settings override).
    pub fn render(
        &mut self,
        world: &Container,
        camera_offset: Vec2,
        store: &TextureStore,
        clear: Rgb,
    ) -> WaymarkResult<FrameRGBA> {
        let width = self.viewport.width as u16;
        let height = self.viewport.height as u16;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();

        let clear_rgba = self.settings.clear_rgba.unwrap_or(clear.with_alpha(1.0));
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            clear_rgba[0],
            clear_rgba[1],
            clear_rgba[2],
            clear_rgba[3],
        ));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            self.viewport.width_f(),
            self.viewport.height_f(),
        ));

        let root = Affine::translate(camera_offset);
        self.draw_container(&mut ctx, world, root, 1.0, store)?;

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        Ok(FrameRGBA {
            width: self.viewport.width,
            height: self.viewport.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_container(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        container: &Container,
        parent: Affine,
        parent_alpha: f32,
        store: &TextureStore,
    ) -> WaymarkResult<()> {
        if !container.visible || container.alpha <= 0.0 {
            return Ok(());
        }
        let transform = parent * container.transform();
        let alpha = parent_alpha * container.alpha;

        for child in container.draw_order() {
            match child {
                DisplayObject::Graphics(g) => self.draw_graphics(ctx, g, transform, alpha, store)?,
                DisplayObject::Container(c) => {
                    self.draw_container(ctx, c, transform, alpha, store)?
                }
            }
        }
        Ok(())
    }

    fn draw_graphics(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        g: &Graphics,
        parent: Affine,
        parent_alpha: f32,
        store: &TextureStore,
    ) -> WaymarkResult<()> {
        if !g.visible || g.alpha <= 0.0 {
            return Ok(());
        }
        let transform = parent * g.transform();
        let alpha = parent_alpha * g.alpha;

        for cmd in g.commands() {
            match cmd {
                DrawCmd::Image {
                    key,
                    x,
                    y,
                    anchor_x,
                    anchor_y,
                } => self.draw_image(ctx, store, key, *x, *y, *anchor_x, *anchor_y, transform, alpha)?,
                DrawCmd::Text {
                    content,
                    x,
                    y,
                    size,
                    color,
                    anchor,
                } => self.draw_text(ctx, store, content, *x, *y, *size, *color, *anchor, transform, alpha)?,
                shape => {
                    let (path, paint) = shape_to_path(shape, self.tolerance())?;
                    let (color, paint_alpha) = match paint {
                        Paint::Fill(f) => (f.color, f.alpha),
                        Paint::Stroke(s) => (s.color, s.alpha),
                    };
                    let final_path = match paint {
                        Paint::Fill(_) => path,
                        Paint::Stroke(s) => expand_stroke(&path, s, self.tolerance()),
                    };

                    ctx.set_transform(affine_to_cpu(transform));
                    let rgba = color.with_alpha(paint_alpha * alpha);
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        rgba[0], rgba[1], rgba[2], rgba[3],
                    ));
                    ctx.fill_path(&bezpath_to_cpu(&final_path));
                }
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_image(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        store: &TextureStore,
        key: &str,
        x: f64,
        y: f64,
        anchor_x: f64,
        anchor_y: f64,
        transform: Affine,
        alpha: f32,
    ) -> WaymarkResult<()> {
        let texture = store.get_or_blank(key);
        let (w, h) = (f64::from(texture.width), f64::from(texture.height));

        if !self.image_cache.contains_key(key) {
            let paint = image_from_premul_bytes(&texture.data, texture.width, texture.height)?;
            self.image_cache.insert(key.to_string(), paint);
        }
        let paint = self.image_cache[key].clone();

        let placed = transform * Affine::translate((x - w * anchor_x, y - h * anchor_y));
        ctx.set_transform(affine_to_cpu(placed));
        ctx.set_paint(paint);
        if alpha < 1.0 {
            ctx.push_opacity_layer(alpha);
        }
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        if alpha < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        store: &TextureStore,
        content: &str,
        x: f64,
        y: f64,
        size: f32,
        color: Rgb,
        anchor: TextAnchor,
        transform: Affine,
        alpha: f32,
    ) -> WaymarkResult<()> {
        let Some(font_bytes) = store.font_bytes() else {
            if !self.warned_missing_font {
                self.warned_missing_font = true;
                warn!("no font registered; text commands are skipped");
            }
            return Ok(());
        };

        if self.font.is_none() {
            self.font = Some(vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
                0,
            ));
        }
        let font = self.font.clone().ok_or_else(|| WaymarkError::asset("font missing"))?;

        let rgba = color.with_alpha(alpha);
        let brush = TextBrush {
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: rgba[3],
        };
        let layout = self.text_engine.layout_plain(content, font_bytes, size, brush)?;

        let (ox, oy) = match anchor {
            TextAnchor::Center => (
                -f64::from(layout.width()) / 2.0,
                -f64::from(layout.height()) / 2.0,
            ),
            TextAnchor::Top => (-f64::from(layout.width()) / 2.0, 0.0),
        };
        let placed = transform * Affine::translate((x + ox, y + oy));
        ctx.set_transform(affine_to_cpu(placed));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let b = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(b.r, b.g, b.b, b.a));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("viewport", &self.viewport)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Canvas-style sweep: from `start` increasing to `end`, wrapping once.
fn arc_sweep(start: f64, end: f64) -> f64 {
    let sweep = end - start;
    if sweep <= 0.0 {
        sweep + std::f64::consts::TAU
    } else {
        sweep
    }
}

fn shape_to_path(cmd: &DrawCmd, tolerance: f64) -> WaymarkResult<(BezPath, Paint)> {
    use kurbo::Shape;

    match cmd {
        DrawCmd::Circle { cx, cy, r, paint } => Ok((
            kurbo::Circle::new((*cx, *cy), *r).to_path(tolerance),
            *paint,
        )),
        DrawCmd::Ellipse {
            cx,
            cy,
            rx,
            ry,
            paint,
        } => Ok((
            kurbo::Ellipse::new((*cx, *cy), (*rx, *ry), 0.0).to_path(tolerance),
            *paint,
        )),
        DrawCmd::Rect { x, y, w, h, paint } => Ok((
            Rect::new(*x, *y, *x + *w, *y + *h).to_path(tolerance),
            *paint,
        )),
        DrawCmd::RoundRect {
            x,
            y,
            w,
            h,
            radius,
            paint,
        } => Ok((
            kurbo::RoundedRect::new(*x, *y, *x + *w, *y + *h, *radius).to_path(tolerance),
            *paint,
        )),
        DrawCmd::Arc {
            cx,
            cy,
            r,
            start,
            end,
            paint,
        } => {
            let arc = kurbo::Arc::new((*cx, *cy), (*r, *r), *start, arc_sweep(*start, *end), 0.0);
            let mut path = BezPath::new();
            path.move_to(arc_start_point(&arc));
            arc.to_cubic_beziers(tolerance, |p1, p2, p3| path.curve_to(p1, p2, p3));
            if matches!(paint, Paint::Fill(_)) {
                path.close_path();
            }
            Ok((path, *paint))
        }
        DrawCmd::Star {
            cx,
            cy,
            points,
            outer,
            inner,
            paint,
        } => {
            let n = (*points).max(3);
            let mut path = BezPath::new();
            for i in 0..(n * 2) {
                let radius = if i % 2 == 0 { *outer } else { *inner };
                let angle = -std::f64::consts::FRAC_PI_2
                    + std::f64::consts::PI * f64::from(i) / f64::from(n);
                let p = (cx + angle.cos() * radius, cy + angle.sin() * radius);
                if i == 0 {
                    path.move_to(p);
                } else {
                    path.line_to(p);
                }
            }
            path.close_path();
            Ok((path, *paint))
        }
        DrawCmd::Path { path, paint } => Ok((path.clone(), *paint)),
        DrawCmd::Image { .. } | DrawCmd::Text { .. } => {
            Err(WaymarkError::render("image/text commands have no shape path"))
        }
    }
}

fn arc_start_point(arc: &kurbo::Arc) -> Point {
    Point::new(
        arc.center.x + arc.radii.x * arc.start_angle.cos(),
        arc.center.y + arc.radii.y * arc.start_angle.sin(),
    )
}

fn expand_stroke(path: &BezPath, style: StrokeStyle, tolerance: f64) -> BezPath {
    let mut stroke = kurbo::Stroke::new(style.width)
        .with_caps(kurbo::Cap::Round)
        .with_join(kurbo::Join::Round);
    if let Some([on, off]) = style.dash {
        stroke = stroke.with_dashes(0.0, [on, off]);
    }
    kurbo::stroke(path.iter(), &stroke, &kurbo::StrokeOpts::default(), tolerance)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> WaymarkResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| WaymarkError::render("texture width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| WaymarkError::render("texture height exceeds u16"))?;
    if bytes.len() != (width as usize).saturating_mul(height as usize).saturating_mul(4) {
        return Err(WaymarkError::render("texture byte length mismatch"));
    }

    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
