//! Line-oriented scene description format.
//!
//! ```text
//! Window <width> <height>
//! Font <path> <size> <r> <g> <b>
//! Circle <name> <x> <y> <vx> <vy> <r> <g> <b> <radius>
//! Rectangle <name> <x> <y> <vx> <vy> <r> <g> <b> <w> <h>
//! ```
//!
//! The first character of a line's first token selects the directive.

use std::path::PathBuf;
use std::str::{FromStr, SplitAsciiWhitespace};

use crate::foundation::core::{Canvas, Point, Rgb8, Size, Vec2};
use crate::foundation::error::{RicochetError, RicochetResult};
use crate::scene::model::{Kinematics, MAX_NAME_LEN};

/// Label font selection.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FontSpec {
    /// As written in the scene file; relative paths resolve against the file's directory.
    pub path: PathBuf,
    /// Pixel size.
    pub size_px: u32,
    /// Label color.
    pub color: Rgb8,
}

/// One `Circle` line.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CircleSpec {
    /// Label text.
    pub name: String,
    /// Center and velocity.
    pub kinematics: Kinematics,
    /// Fill color.
    pub color: Rgb8,
    /// Radius in pixels.
    pub radius: f64,
    /// 1-based source line.
    pub line: usize,
}

/// One `Rectangle` line.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RectangleSpec {
    /// Label text.
    pub name: String,
    /// Top-left corner and velocity.
    pub kinematics: Kinematics,
    /// Fill color.
    pub color: Rgb8,
    /// Width and height.
    pub size: Size,
    /// 1-based source line.
    pub line: usize,
}

/// A shape directive of either kind.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    /// `Circle` line.
    Circle(CircleSpec),
    /// `Rectangle` line.
    Rectangle(RectangleSpec),
}

/// A parsed but not yet instantiated scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneDescription {
    /// Last `Window` directive, else the default canvas.
    pub canvas: Canvas,
    /// Last `Font` directive.
    pub font: Option<FontSpec>,
    /// File order, both kinds interleaved.
    pub shapes: Vec<ShapeSpec>,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            canvas: Canvas::DEFAULT,
            font: None,
            shapes: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Directive {
    Window(Canvas),
    Font(FontSpec),
    Shape(ShapeSpec),
}

impl SceneDescription {
    /// Parse a whole scene description. Stops at the first bad line.
    pub fn parse(src: &str) -> RicochetResult<Self> {
        let mut desc = Self::default();
        for (i, raw) in src.lines().enumerate() {
            match parse_line(i + 1, raw)? {
                None => {}
                Some(Directive::Window(canvas)) => desc.canvas = canvas,
                Some(Directive::Font(font)) => desc.font = Some(font),
                Some(Directive::Shape(shape)) => desc.shapes.push(shape),
            }
        }
        Ok(desc)
    }

    /// Circle directives in file order.
    pub fn circles(&self) -> impl Iterator<Item = &CircleSpec> {
        self.shapes.iter().filter_map(|s| match s {
            ShapeSpec::Circle(c) => Some(c),
            ShapeSpec::Rectangle(_) => None,
        })
    }

    /// Rectangle directives in file order.
    pub fn rectangles(&self) -> impl Iterator<Item = &RectangleSpec> {
        self.shapes.iter().filter_map(|s| match s {
            ShapeSpec::Rectangle(r) => Some(r),
            ShapeSpec::Circle(_) => None,
        })
    }
}

fn parse_line(line: usize, raw: &str) -> RicochetResult<Option<Directive>> {
    let mut toks = Tokens {
        line,
        it: raw.split_ascii_whitespace(),
    };
    let Some(head) = toks.it.next() else {
        return Ok(None);
    };

    let directive = match head.as_bytes()[0] {
        b'W' => {
            let w: u32 = toks.number("width")?;
            let h: u32 = toks.number("height")?;
            if w == 0 || h == 0 {
                return Err(RicochetError::geometry(format!(
                    "line {line}: window must be non-empty, got {w}x{h}"
                )));
            }
            Directive::Window(Canvas {
                width: w,
                height: h,
            })
        }
        b'F' => {
            let path = PathBuf::from(toks.word("font path")?);
            let size_px: u32 = toks.number("font size")?;
            if size_px == 0 {
                return Err(RicochetError::geometry(format!(
                    "line {line}: font size must be > 0"
                )));
            }
            let color = toks.color()?;
            Directive::Font(FontSpec {
                path,
                size_px,
                color,
            })
        }
        b'C' => {
            let name = toks.name()?;
            let kinematics = toks.kinematics()?;
            let color = toks.color()?;
            let radius = toks.extent("radius")?;
            Directive::Shape(ShapeSpec::Circle(CircleSpec {
                name,
                kinematics,
                color,
                radius,
                line,
            }))
        }
        b'R' => {
            let name = toks.name()?;
            let kinematics = toks.kinematics()?;
            let color = toks.color()?;
            let width = toks.extent("width")?;
            let height = toks.extent("height")?;
            Directive::Shape(ShapeSpec::Rectangle(RectangleSpec {
                name,
                kinematics,
                color,
                size: Size::new(width, height),
                line,
            }))
        }
        _ => {
            return Err(RicochetError::malformed(
                line,
                format!("unrecognized directive '{head}'"),
            ));
        }
    };

    toks.finish()?;
    Ok(Some(directive))
}

struct Tokens<'a> {
    line: usize,
    it: SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn word(&mut self, field: &str) -> RicochetResult<&'a str> {
        self.it
            .next()
            .ok_or_else(|| RicochetError::malformed(self.line, format!("missing {field}")))
    }

    fn number<T: FromStr>(&mut self, field: &str) -> RicochetResult<T> {
        let tok = self.word(field)?;
        tok.parse::<T>().map_err(|_| {
            RicochetError::malformed(self.line, format!("invalid {field} '{tok}'"))
        })
    }

    fn finite(&mut self, field: &str) -> RicochetResult<f64> {
        let v: f64 = self.number(field)?;
        if !v.is_finite() {
            return Err(RicochetError::malformed(
                self.line,
                format!("{field} must be finite"),
            ));
        }
        Ok(v)
    }

    fn extent(&mut self, field: &str) -> RicochetResult<f64> {
        let v = self.finite(field)?;
        if v <= 0.0 {
            return Err(RicochetError::geometry(format!(
                "line {}: {field} must be > 0, got {v}",
                self.line
            )));
        }
        Ok(v)
    }

    fn name(&mut self) -> RicochetResult<String> {
        let name = self.word("name")?;
        if name.len() > MAX_NAME_LEN {
            return Err(RicochetError::malformed(
                self.line,
                format!("name longer than {MAX_NAME_LEN} bytes"),
            ));
        }
        Ok(name.to_string())
    }

    fn kinematics(&mut self) -> RicochetResult<Kinematics> {
        let x = self.finite("x")?;
        let y = self.finite("y")?;
        let vx = self.finite("vx")?;
        let vy = self.finite("vy")?;
        Ok(Kinematics::new(Point::new(x, y), Vec2::new(vx, vy)))
    }

    fn color(&mut self) -> RicochetResult<Rgb8> {
        let r: u8 = self.number("red")?;
        let g: u8 = self.number("green")?;
        let b: u8 = self.number("blue")?;
        Ok(Rgb8::new(r, g, b))
    }

    fn finish(mut self) -> RicochetResult<()> {
        match self.it.next() {
            None => Ok(()),
            Some(extra) => Err(RicochetError::malformed(
                self.line,
                format!("unexpected trailing token '{extra}'"),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/directive.rs"]
mod tests;
