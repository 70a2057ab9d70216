use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::foundation::error::RicochetResult;
use crate::scene::model::Label;

/// How subsequent primitive draws combine with the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Overwrite destination pixels.
    #[default]
    None,
    /// Source-over alpha blending.
    Blend,
}

/// Inclusive pixel bounds; draws outside are discarded by the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipRect {
    /// Leftmost visible column.
    pub x0: i32,
    /// Topmost visible row.
    pub y0: i32,
    /// Rightmost visible column.
    pub x1: i32,
    /// Bottom visible row.
    pub y1: i32,
}

impl ClipRect {
    /// Every pixel of `canvas`.
    pub fn of_canvas(canvas: Canvas) -> Self {
        let last = |n: u32| i32::try_from(n.saturating_sub(1)).unwrap_or(i32::MAX);
        Self {
            x0: 0,
            y0: 0,
            x1: last(canvas.width),
            y1: last(canvas.height),
        }
    }
}

/// Stateful point/segment drawing, the only capability the rasterizer needs.
///
/// Draw color and blend mode persist until changed.
pub trait PrimitiveTarget {
    /// Color used by later point and segment draws.
    fn set_draw_color(&mut self, color: Rgba8);
    /// Blend mode used by later point and segment draws.
    fn set_blend_mode(&mut self, mode: BlendMode);
    /// Draw one pixel.
    fn draw_point(&mut self, x: i32, y: i32);
    /// Inclusive segment from `(x0, y0)` to `(x1, y1)`.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);

    /// Pixels a draw can change, or `None` when unbounded.
    ///
    /// The rasterizer skips stepping work that cannot reach these bounds.
    fn clip_rect(&self) -> Option<ClipRect> {
        None
    }
}

/// Frame-level presentation: everything the render phase draws besides ellipses.
pub trait Presenter: PrimitiveTarget {
    /// Size of the presented frame.
    fn canvas(&self) -> Canvas;
    /// Fill the whole frame, ignoring the blend mode.
    fn clear(&mut self, color: Rgba8);
    /// Fill the pixels covered by `rect`.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);
    /// Draw the one-pixel border of `rect`.
    fn outline_rect(&mut self, rect: Rect, color: Rgba8);
    /// Blit a label texture at its current box.
    fn draw_label(&mut self, label: &Label);
    /// Hand the finished frame to the output.
    fn present(&mut self) -> RicochetResult<()>;
}
