//! Label textures: a shape's name rendered once at load time.

use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::{Rgb8, Rgba8, Size};
use crate::foundation::error::{RicochetError, RicochetResult};
use crate::text::layout::{TextBrushRgba8, TextLayoutEngine};

/// Rendered label pixels in row-major premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelTexture {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl LabelTexture {
    /// Wrap `width * height` premultiplied pixels.
    pub fn new(width: u32, height: u32, rgba8_premul: Vec<u8>) -> RicochetResult<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba8_premul.len() != expected {
            return Err(RicochetError::resource(format!(
                "label texture {width}x{height} expects {expected} bytes, got {}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Fully transparent texture; only its size matters.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::solid(width, height, Rgba8::new(0, 0, 0, 0))
    }

    /// Texture filled with one color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> Self {
        let px = color.to_premul();
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Measured text size in pixels.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.rgba8_premul
    }
}

/// Text-to-texture collaborator used while loading a scene.
pub trait LabelFactory {
    /// Render `text` into a texture sized to its layout.
    fn render_label(&mut self, text: &str) -> RicochetResult<LabelTexture>;
}

/// Font-free labels: one solid cell per character.
#[derive(Clone, Copy, Debug)]
pub struct BlockLabelFactory {
    /// Cell width per character.
    pub advance: u32,
    /// Cell height.
    pub line_height: u32,
    /// Cell color.
    pub color: Rgba8,
}

impl Default for BlockLabelFactory {
    fn default() -> Self {
        Self {
            advance: 12,
            line_height: 24,
            color: Rgb8::WHITE.opaque(),
        }
    }
}

impl LabelFactory for BlockLabelFactory {
    fn render_label(&mut self, text: &str) -> RicochetResult<LabelTexture> {
        let chars = u32::try_from(text.chars().count().max(1))
            .map_err(|_| RicochetError::resource("label text too long"))?;
        let width = chars.saturating_mul(self.advance).max(1);
        let height = self.line_height.max(1);
        Ok(LabelTexture::solid(width, height, self.color))
    }
}

/// Labels shaped with Parley and rasterized with `vello_cpu`.
pub struct FontLabelFactory {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
    size_px: f32,
    color: Rgb8,
}

impl FontLabelFactory {
    /// Load a TrueType/OpenType font from disk.
    pub fn from_path(path: &Path, size_px: f32, color: Rgb8) -> RicochetResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            RicochetError::resource(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes, size_px, color)
    }

    /// Register font bytes for layout and rasterization.
    pub fn from_bytes(font_bytes: Vec<u8>, size_px: f32, color: Rgb8) -> RicochetResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(RicochetError::geometry(format!(
                "font size must be finite and > 0, got {size_px}"
            )));
        }
        let engine = TextLayoutEngine::with_font(&font_bytes)?;
        tracing::debug!(family = engine.family_name(), size_px, "font registered");
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            engine,
            font,
            size_px,
            color,
        })
    }

    fn brush(&self) -> TextBrushRgba8 {
        TextBrushRgba8 {
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: Rgba8::OPAQUE,
        }
    }
}

fn layout_extent(layout: &parley::Layout<TextBrushRgba8>) -> (u32, u32) {
    let w = layout.width().ceil().max(1.0) as u32;
    let h = layout.height().ceil().max(1.0) as u32;
    (w, h)
}

impl LabelFactory for FontLabelFactory {
    fn render_label(&mut self, text: &str) -> RicochetResult<LabelTexture> {
        let layout = self.engine.layout_plain(text, self.size_px, self.brush())?;
        let (w, h) = layout_extent(&layout);
        let (Ok(w16), Ok(h16)) = (u16::try_from(w), u16::try_from(h)) else {
            return Err(RicochetError::resource(format!(
                "label '{text}' is too large to rasterize ({w}x{h})"
            )));
        };

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);
        LabelTexture::new(w, h, pixmap.data_as_u8_slice().to_vec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/label.rs"]
mod tests;
