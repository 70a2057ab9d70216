//! Headless software presenter.
//!
//! Pixels live in a premultiplied RGBA8 buffer; every `present` hands a copy to a [`FrameSink`].

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex, Rect, Rgba8};
use crate::foundation::error::RicochetResult;
use crate::render::composite::{PremulRgba8, over};
use crate::render::target::{BlendMode, ClipRect, Presenter, PrimitiveTarget};
use crate::scene::model::Label;

/// A rendered frame in CPU memory.
#[derive(Clone, Debug, PartialEq, Eq)]
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
    /// Premultiplied pixel at `(x, y)`, or `None` outside the frame.
    /// Premultiplied pixel of the frame being drawn.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

/// In-memory [`Presenter`] that hands every presented frame to a [`FrameSink`].
pub struct SoftwareSurface<S: FrameSink> {
    canvas: Canvas,
    frame: FrameRGBA,
    color: Rgba8,
    blend: BlendMode,
    sink: S,
    next: FrameIndex,
}

impl<S: FrameSink> SoftwareSurface<S> {
    /// Allocate a cleared surface and start `sink`.
    pub fn new(canvas: Canvas, fps: Fps, mut sink: S) -> RicochetResult<Self> {
        let mut data = canvas.alloc_rgba8()?;
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps,
        })?;
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&Rgba8::BLACK.to_premul());
        }
        Ok(Self {
            canvas,
            frame: FrameRGBA {
                width: canvas.width,
                height: canvas.height,
                data,
                premultiplied: true,
            },
            color: Rgba8::BLACK,
            blend: BlendMode::None,
            sink,
            next: FrameIndex(0),
        })
    }

    /// The frame being drawn.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    /// Premultiplied pixel of the frame being drawn.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        self.frame.pixel(x, y)
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> u64 {
        self.next.0
    }

    /// The sink frames are presented to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Finish the sink and hand it back.
    pub fn finish(mut self) -> RicochetResult<S> {
        self.sink.end()?;
        Ok(self.sink)
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.canvas.width) || y >= i64::from(self.canvas.height)
        {
            return None;
        }
        Some((y as usize * self.canvas.width as usize + x as usize) * 4)
    }

    fn put(&mut self, x: i64, y: i64, src: PremulRgba8, blend: BlendMode) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let dst = &mut self.frame.data[i..i + 4];
        let out = match blend {
            BlendMode::None => src,
            BlendMode::Blend => over([dst[0], dst[1], dst[2], dst[3]], src),
        };
        dst.copy_from_slice(&out);
    }

    /// Inclusive horizontal run clipped to the canvas.
    fn hspan(&mut self, y: i64, x0: i64, x1: i64, src: PremulRgba8, blend: BlendMode) {
        if y < 0 || y >= i64::from(self.canvas.height) {
            return;
        }
        let lo = x0.min(x1).max(0);
        let hi = x0.max(x1).min(i64::from(self.canvas.width) - 1);
        for x in lo..=hi {
            self.put(x, y, src, blend);
        }
    }

    /// Inclusive vertical run clipped to the canvas.
    fn vspan(&mut self, x: i64, y0: i64, y1: i64, src: PremulRgba8, blend: BlendMode) {
        if x < 0 || x >= i64::from(self.canvas.width) {
            return;
        }
        let lo = y0.min(y1).max(0);
        let hi = y0.max(y1).min(i64::from(self.canvas.height) - 1);
        for y in lo..=hi {
            self.put(x, y, src, blend);
        }
    }

    /// Half-open pixel box `[round(x0), round(x1)) x [round(y0), round(y1))`.
    fn pixel_box(rect: Rect) -> (i64, i64, i64, i64) {
        let r = rect.abs();
        (
            r.x0.round() as i64,
            r.y0.round() as i64,
            r.x1.round() as i64,
            r.y1.round() as i64,
        )
    }

    fn mode_for(color: Rgba8) -> BlendMode {
        if color.is_opaque() {
            BlendMode::None
        } else {
            BlendMode::Blend
        }
    }
}

impl<S: FrameSink> PrimitiveTarget for SoftwareSurface<S> {
    fn set_draw_color(&mut self, color: Rgba8) {
        self.color = color;
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        self.put(
            i64::from(x),
            i64::from(y),
            self.color.to_premul(),
            self.blend,
        );
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let src = self.color.to_premul();
        let blend = self.blend;
        let (x0, y0, x1, y1) = (
            i64::from(x0),
            i64::from(y0),
            i64::from(x1),
            i64::from(y1),
        );
        if x0 == x1 {
            self.vspan(x0, y0, y1, src, blend);
            return;
        }
        if y0 == y1 {
            self.hspan(y0, x0, x1, src, blend);
            return;
        }

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.put(x, y, src, blend);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn clip_rect(&self) -> Option<ClipRect> {
        Some(ClipRect::of_canvas(self.canvas))
    }
}

impl<S: FrameSink> Presenter for SoftwareSurface<S> {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, color: Rgba8) {
        let px = color.to_premul();
        for dst in self.frame.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        let (x0, y0, x1, y1) = Self::pixel_box(rect);
        if x1 <= x0 {
            return;
        }
        let src = color.to_premul();
        let blend = Self::mode_for(color);
        for y in y0.max(0)..y1.min(i64::from(self.canvas.height)) {
            self.hspan(y, x0, x1 - 1, src, blend);
        }
    }

    fn outline_rect(&mut self, rect: Rect, color: Rgba8) {
        let (x0, y0, x1, y1) = Self::pixel_box(rect);
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let src = color.to_premul();
        let blend = Self::mode_for(color);
        self.hspan(y0, x0, x1 - 1, src, blend);
        self.hspan(y1 - 1, x0, x1 - 1, src, blend);
        self.vspan(x0, y0, y1 - 1, src, blend);
        self.vspan(x1 - 1, y0, y1 - 1, src, blend);
    }

    fn draw_label(&mut self, label: &Label) {
        let tex = label.texture();
        let rect = label.rect();
        // Float-to-int casts saturate, so far-away labels land on an extreme and are skipped.
        let ox = rect.x0.round() as i64;
        let oy = rect.y0.round() as i64;
        let (w, h) = (i64::from(tex.width()), i64::from(tex.height()));
        let (cw, ch) = (i64::from(self.canvas.width), i64::from(self.canvas.height));
        if w == 0
            || h == 0
            || ox >= cw
            || oy >= ch
            || ox.saturating_add(w) <= 0
            || oy.saturating_add(h) <= 0
        {
            return;
        }

        // ox in (-w, cw) and oy in (-h, ch) from here on.
        let stride = tex.width() as usize * 4;
        let data = tex.data();
        for row in (-oy).max(0)..h.min(ch - oy) {
            let line = &data[row as usize * stride..(row as usize + 1) * stride];
            for col in (-ox).max(0)..w.min(cw - ox) {
                let i = col as usize * 4;
                self.put(
                    ox + col,
                    oy + row,
                    [line[i], line[i + 1], line[i + 2], line[i + 3]],
                    BlendMode::Blend,
                );
            }
        }
    }

    fn present(&mut self) -> RicochetResult<()> {
        let idx = self.next;
        self.sink.push_frame(idx, &self.frame)?;
        self.next = FrameIndex(idx.0 + 1);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
