//! Canvas, frame timing and color values.

use std::time::Duration;

use crate::foundation::error::{RicochetError, RicochetResult};
use crate::foundation::math::mul_div255_u8;

pub use kurbo::{Point, Rect, Size, Vec2};

/// 0-based index of a presented frame.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> RicochetResult<Self> {
        if den == 0 {
            return Err(RicochetError::geometry("fps den must be > 0"));
        }
        if num == 0 {
            return Err(RicochetError::geometry("fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Target duration of one frame.
    pub fn frame_period(self) -> Duration {
        let nanos = 1_000_000_000u64 * u64::from(self.den) / u64::from(self.num);
        Duration::from_nanos(nanos)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// World and display dimensions in pixels.
///
/// The same canvas bounds both the presented surface and the collision walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// 1280x720, used when a scene has no `Window` directive.
    pub const DEFAULT: Self = Self {
        width: 1280,
        height: 720,
    };

    /// Non-empty canvas.
    pub fn new(width: u32, height: u32) -> RicochetResult<Self> {
        if width == 0 || height == 0 {
            return Err(RicochetError::geometry(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Bytes in one RGBA8 frame, or `None` if that does not fit in `usize`.
    pub fn frame_bytes(self) -> Option<usize> {
        usize::try_from(self.width)
            .ok()?
            .checked_mul(usize::try_from(self.height).ok()?)?
            .checked_mul(4)
    }

    /// Zeroed RGBA8 frame buffer, failing instead of aborting when it cannot be allocated.
    pub fn alloc_rgba8(self) -> RicochetResult<Vec<u8>> {
        let len = self.frame_bytes().ok_or_else(|| {
            RicochetError::resource(format!(
                "a {}x{} RGBA8 frame does not fit in memory",
                self.width, self.height
            ))
        })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            RicochetError::resource(format!(
                "allocate {len} bytes for a {}x{} frame: {e}",
                self.width, self.height
            ))
        })?;
        data.resize(len, 0);
        Ok(data)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Straight RGB8 color as written in scene files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Rgb8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb8 {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach the fully-opaque alpha.
    pub const fn opaque(self) -> Rgba8 {
        Rgba8::new(self.r, self.g, self.b, Rgba8::OPAQUE)
    }
}

/// Straight-alpha RGBA8 draw color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Coverage.
    pub a: u8,
}

impl Rgba8 {
    /// Alpha value that selects the unblended draw path.
    pub const OPAQUE: u8 = 255;
    /// Opaque black, the clear color.
    pub const BLACK: Self = Self::new(0, 0, 0, Self::OPAQUE);

    /// Color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether `a` is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == Self::OPAQUE
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
