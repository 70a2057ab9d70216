//! Midpoint ellipse rasterization over a [`PrimitiveTarget`].
//!
//! Radii are scaled by [`ELLIPSE_OVERSCAN`] while stepping, and the stepped coordinates are
//! divided back down to pick output columns/rows. Filled ellipses are emitted as stacked
//! vertical spans, mirrored into all four quadrants.
//!
//! Stepping runs in 128-bit integers. When the target reports a clip rectangle, columns that
//! cannot reach it are skipped by solving the stepping error in closed form instead of walking
//! every step, so work scales with the visible part of the ellipse, not its radius.

use crate::foundation::core::Rgba8;
use crate::foundation::error::{RicochetError, RicochetResult};
use crate::render::target::{BlendMode, PrimitiveTarget};

/// Sub-pixel steps per output pixel.
pub const ELLIPSE_OVERSCAN: i64 = 4;

/// Largest accepted radius, in pixels.
pub const MAX_ELLIPSE_RADIUS: i32 = 1 << 28;

const OV: i128 = ELLIPSE_OVERSCAN as i128;

// The first segment can trail the exact curve in its last couple of steps.
const SEGMENT1_MARGIN: i128 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fill {
    Solid,
    Outline,
}

/// Filled circle of radius `rad` centered at `(x, y)`.
pub fn fill_circle<T: PrimitiveTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    rad: i32,
    color: Rgba8,
) -> RicochetResult<()> {
    ellipse(target, x, y, rad, rad, color, Fill::Solid)
}

/// Filled axis-aligned ellipse.
pub fn fill_ellipse<T: PrimitiveTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    rx: i32,
    ry: i32,
    color: Rgba8,
) -> RicochetResult<()> {
    ellipse(target, x, y, rx, ry, color, Fill::Solid)
}

/// One-pixel ellipse outline.
pub fn stroke_ellipse<T: PrimitiveTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    rx: i32,
    ry: i32,
    color: Rgba8,
) -> RicochetResult<()> {
    ellipse(target, x, y, rx, ry, color, Fill::Outline)
}

fn ellipse<T: PrimitiveTarget + ?Sized>(
    t: &mut T,
    x: i32,
    y: i32,
    rx: i32,
    ry: i32,
    color: Rgba8,
    fill: Fill,
) -> RicochetResult<()> {
    if rx < 0 || ry < 0 {
        return Err(RicochetError::geometry(format!(
            "ellipse radii must be >= 0, got rx={rx} ry={ry}"
        )));
    }
    if rx > MAX_ELLIPSE_RADIUS || ry > MAX_ELLIPSE_RADIUS {
        return Err(RicochetError::geometry(format!(
            "ellipse radii must be <= {MAX_ELLIPSE_RADIUS}, got rx={rx} ry={ry}"
        )));
    }

    t.set_blend_mode(if color.is_opaque() {
        BlendMode::None
    } else {
        BlendMode::Blend
    });
    t.set_draw_color(color);

    if rx == 0 {
        if ry == 0 {
            t.draw_point(x, y);
        } else {
            t.draw_line(x, y.saturating_sub(ry), x, y.saturating_add(ry));
        }
        return Ok(());
    }
    if ry == 0 {
        t.draw_line(x.saturating_sub(rx), y, x.saturating_add(rx), y);
        return Ok(());
    }

    let (reach_x, reach_y) = match t.clip_rect() {
        Some(c) => (Reach::new(x, c.x0, c.x1), Reach::new(y, c.y0, c.y1)),
        None => (Reach::ALL, Reach::ALL),
    };
    if reach_x.min > i128::from(rx) || reach_y.min > i128::from(ry) {
        return Ok(());
    }

    Stepper::new(t, x, y, rx, ry, fill, reach_x, reach_y).run();
    Ok(())
}

/// Offsets from the center whose mirrored copies can land inside a clip interval.
#[derive(Clone, Copy, Debug)]
struct Reach {
    min: i128,
    max: i128,
}

impl Reach {
    const ALL: Self = Self {
        min: 0,
        max: i128::MAX,
    };

    fn new(center: i32, lo: i32, hi: i32) -> Self {
        let (c, lo, hi) = (i128::from(center), i128::from(lo), i128::from(hi));
        let min = if c < lo {
            lo - c
        } else if c > hi {
            c - hi
        } else {
            0
        };
        Self {
            min,
            max: (c - lo).abs().max((c - hi).abs()),
        }
    }
}

/// Midpoint stepping state. `cur_*`, `delta_*` and `error` are in oversampled units, `old_*` and
/// `scr_x` in pixels.
struct Stepper<'a, T: ?Sized> {
    t: &'a mut T,
    x: i128,
    y: i128,
    fill: Fill,
    reach_x: Reach,
    reach_y: Reach,
    rx: i128,
    ry: i128,
    rx2: i128,
    ry2: i128,
    cur_x: i128,
    cur_y: i128,
    delta_x: i128,
    delta_y: i128,
    error: i128,
    old_x: i128,
    old_y: i128,
    scr_x: i128,
}

impl<'a, T: PrimitiveTarget + ?Sized> Stepper<'a, T> {
    #[allow(clippy::too_many_arguments)]
    fn new(
        t: &'a mut T,
        x: i32,
        y: i32,
        rx: i32,
        ry: i32,
        fill: Fill,
        reach_x: Reach,
        reach_y: Reach,
    ) -> Self {
        let ry_px = i128::from(ry);
        let (rx, ry) = (i128::from(rx) * OV, ry_px * OV);
        let (rx2, ry2) = (rx * rx, ry * ry);
        let mut s = Self {
            t,
            x: i128::from(x),
            y: i128::from(y),
            fill,
            reach_x,
            reach_y,
            rx,
            ry,
            rx2,
            ry2,
            cur_x: 0,
            cur_y: ry,
            delta_x: 0,
            delta_y: 2 * rx2 * ry,
            error: 0,
            old_x: 0,
            old_y: ry_px,
            scr_x: 0,
        };
        s.error = s.error1(0, ry);
        s
    }

    fn run(mut self) {
        // Top/bottom center points.
        self.quadrants(0, self.old_y);
        self.skip_segment1();
        if self.segment1() && self.cur_y > 0 {
            self.segment2();
        }
    }

    /// Stepping error at `(x, y)` while `|slope| < 1`.
    fn error1(&self, x: i128, y: i128) -> i128 {
        self.ry2 * (x + 1) * (x + 1) + self.rx2 * (y * y - y) + self.rx2 / 4 - self.rx2 * self.ry2
    }

    /// Stepping error at `(x, y)` while `|slope| >= 1`.
    fn error2(&self, x: i128, y: i128) -> i128 {
        self.ry2 * x * (x + 1) + (self.ry2 + 3) / 4 + self.rx2 * (y - 1) * (y - 1)
            - self.rx2 * self.ry2
    }

    /// Row the first segment reaches at column `x`.
    fn track_y(&self, x: i128) -> Option<i128> {
        last_where(0, self.ry, |y| self.error1(x, y) < 0)
    }

    /// Jump the first segment to just before the first column that can be visible.
    fn skip_segment1(&mut self) {
        if self.reach_x.min < 1 {
            return;
        }
        let target = OV * self.reach_x.min - 1;
        let end = first_where(1, self.rx + 1, |x| {
            self.ry2 * x > self.rx2 * self.track_y(x).unwrap_or(-1)
        })
        .unwrap_or(self.rx + 1);
        let x = target.min(end - SEGMENT1_MARGIN);
        if x < 1 {
            return;
        }
        let Some(y) = self.track_y(x) else {
            return;
        };
        let col = x / OV;
        let old_y = if col == 0 {
            self.old_y
        } else {
            match self.track_y(OV * col) {
                Some(first) => first / OV,
                None => return,
            }
        };

        self.cur_x = x;
        self.cur_y = y;
        self.delta_x = 2 * self.ry2 * x;
        self.delta_y = 2 * self.rx2 * y;
        self.error = self.error1(x, y);
        self.old_x = col;
        self.old_y = old_y;
        self.scr_x = col;
    }

    /// Segment 1: |slope| < 1, step x. Returns `false` once past every visible column.
    fn segment1(&mut self) -> bool {
        while self.delta_x <= self.delta_y {
            self.cur_x += 1;
            self.delta_x += 2 * self.ry2;

            self.error += self.delta_x + self.ry2;
            if self.error >= 0 {
                self.cur_y -= 1;
                self.delta_y -= 2 * self.rx2;
                self.error -= self.delta_y;
            }

            self.scr_x = self.cur_x / OV;
            let scr_y = self.cur_y / OV;
            if self.scr_x > self.reach_x.max {
                return false;
            }
            if self.scr_x != self.old_x {
                self.quadrants(self.scr_x, scr_y);
                self.old_x = self.scr_x;
                self.old_y = scr_y;
            }
        }
        true
    }

    /// Segment 2: |slope| >= 1, step y.
    fn segment2(&mut self) {
        let x0 = self.cur_x;
        self.error = self.error2(self.cur_x, self.cur_y);
        let mut pending_skip = self.reach_x.min >= 1;
        let mut stepped = false;

        while self.cur_y > 0 {
            if pending_skip
                && stepped
                && OV * self.reach_x.min - 1 > self.cur_x
                && self.on_track(x0)
            {
                pending_skip = false;
                if self.skip_segment2() {
                    continue;
                }
            }
            self.fast_forward();
            stepped = true;

            self.cur_y -= 1;
            self.delta_y -= 2 * self.rx2;

            self.error += self.rx2;
            self.error -= self.delta_y;

            if self.error <= 0 {
                self.cur_x += 1;
                self.delta_x += 2 * self.ry2;
                self.error += self.delta_x;
            }

            self.scr_x = self.cur_x / OV;
            let scr_y = self.cur_y / OV;
            if self.scr_x > self.reach_x.max {
                return;
            }
            if self.scr_x != self.old_x {
                match self.fill {
                    // A solid span already covers every row below it.
                    Fill::Solid => {
                        if self.old_y - 1 >= scr_y {
                            self.quadrants(self.scr_x, self.old_y - 1);
                        }
                    }
                    Fill::Outline => self.column(self.scr_x, self.old_y - 1, scr_y),
                }
                self.old_x = self.scr_x;
                self.old_y = scr_y;
            }
        }

        // Remaining points in vertical.
        if self.fill == Fill::Outline {
            self.column(self.scr_x, self.old_y - 1, 0);
        }
    }

    /// Whether `cur_x` is the smallest column with a positive error at `cur_y`.
    ///
    /// Early second-segment steps can trail the curve; once they catch up they stay on it.
    fn on_track(&self, x0: i128) -> bool {
        self.error2(self.cur_x, self.cur_y) > 0
            && (self.cur_x == x0 || self.error2(self.cur_x - 1, self.cur_y) <= 0)
    }

    /// Jump the second segment to just before the first column that can be visible.
    fn skip_segment2(&mut self) -> bool {
        let target = OV * self.reach_x.min - 1;
        let Some(y) = first_where(1, self.cur_y - 1, |y| self.error2(target, y) > 0) else {
            return false;
        };
        let Some(x) = first_where(self.cur_x, target, |x| self.error2(x, y) > 0) else {
            return false;
        };
        let col = x / OV;
        let mut old_y = self.old_y;
        if OV * col > self.cur_x {
            let first = OV * col;
            match last_where(y, self.cur_y - 1, |yy| self.error2(first - 1, yy) <= 0) {
                Some(row) => old_y = row / OV,
                None => return false,
            }
        }

        self.cur_x = x;
        self.cur_y = y;
        self.delta_x = 2 * self.ry2 * x;
        self.delta_y = 2 * self.rx2 * y;
        self.error = self.error2(x, y);
        self.old_x = col;
        self.old_y = old_y;
        self.scr_x = col;
        true
    }

    /// Skip second-segment steps that leave `cur_x` unchanged; they draw nothing.
    fn fast_forward(&mut self) {
        if self.cur_y <= 1 {
            return;
        }
        let x = self.cur_x;
        let next = last_where(1, self.cur_y - 1, |y| self.error2(x, y) <= 0).map_or(1, |y| y + 1);
        if next < self.cur_y {
            self.cur_y = next;
            self.delta_y = 2 * self.rx2 * next;
            self.error = self.error2(x, next);
        }
    }

    /// Outline points of column `dx` for rows `hi` down to `lo`, limited to visible rows.
    fn column(&mut self, dx: i128, hi: i128, lo: i128) {
        let lo = lo.max(self.reach_y.min);
        let mut row = hi.min(self.reach_y.max);
        while row >= lo {
            self.quadrants(dx, row);
            row -= 1;
        }
    }

    /// Emit the four mirrored copies of offset `(dx, dy)`.
    fn quadrants(&mut self, dx: i128, dy: i128) {
        let (x, y) = (self.x, self.y);
        if dx == 0 {
            if dy == 0 {
                self.t.draw_point(px(x), px(y));
            } else if self.fill == Fill::Solid {
                self.t.draw_line(px(x), px(y - dy), px(x), px(y + dy));
            } else {
                self.t.draw_point(px(x), px(y + dy));
                self.t.draw_point(px(x), px(y - dy));
            }
            return;
        }

        let (xpdx, xmdx) = (px(x + dx), px(x - dx));
        let (ypdy, ymdy) = (px(y + dy), px(y - dy));
        match self.fill {
            Fill::Solid => {
                self.t.draw_line(xpdx, ymdy, xpdx, ypdy);
                self.t.draw_line(xmdx, ymdy, xmdx, ypdy);
            }
            Fill::Outline => {
                self.t.draw_point(xpdx, ypdy);
                self.t.draw_point(xmdx, ypdy);
                self.t.draw_point(xpdx, ymdy);
                self.t.draw_point(xmdx, ymdy);
            }
        }
    }
}

/// Largest `v` in `[lo, hi]` with `pred(v)`, for a predicate that holds up to some point.
fn last_where(lo: i128, hi: i128, pred: impl Fn(i128) -> bool) -> Option<i128> {
    if lo > hi || !pred(lo) {
        return None;
    }
    let (mut lo, mut hi) = (lo, hi);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if pred(mid) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Some(lo)
}

/// Smallest `v` in `[lo, hi]` with `pred(v)`, for a predicate that holds from some point on.
fn first_where(lo: i128, hi: i128, pred: impl Fn(i128) -> bool) -> Option<i128> {
    if lo > hi || !pred(hi) {
        return None;
    }
    let (mut lo, mut hi) = (lo, hi);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Some(lo)
}

fn px(v: i128) -> i32 {
    v.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
