use crate::foundation::core::{Point, Rect, Rgb8, Size, Vec2};
use crate::foundation::error::{RicochetError, RicochetResult};
use crate::render::raster::MAX_ELLIPSE_RADIUS;
use crate::text::label::LabelTexture;

/// Longest shape name accepted, in bytes.
pub const MAX_NAME_LEN: usize = 99;

/// Position and per-frame displacement of a shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Kinematics {
    /// Shape anchor: center for circles, top-left corner for rectangles.
    pub position: Point,
    /// Displacement applied once per update.
    pub velocity: Vec2,
}

impl Kinematics {
    /// Kinematics at `position` moving by `velocity` per frame.
    pub fn new(position: Point, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

/// Where a label box is centered when it is attached to its shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LabelAnchor {
    /// Center the label on a point (circles draw from their midpoint).
    Center(Point),
    /// Center the label inside a box (rectangles draw from their corner).
    BoxCenter(Rect),
}

impl LabelAnchor {
    fn origin_for(self, text: Size) -> Point {
        match self {
            Self::Center(p) => Point::new(p.x - text.width / 2.0, p.y - text.height / 2.0),
            Self::BoxCenter(r) => Point::new(
                r.x0 + (r.width() / 2.0 - text.width / 2.0),
                r.y0 + (r.height() / 2.0 - text.height / 2.0),
            ),
        }
    }
}

/// Rendered shape name plus the on-screen box it is drawn into.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    text: String,
    texture: LabelTexture,
    rect: Rect,
}

impl Label {
    /// Place `texture` relative to `anchor`. The offset to the anchor never changes afterwards.
    pub fn attach(text: impl Into<String>, texture: LabelTexture, anchor: LabelAnchor) -> Self {
        let size = texture.size();
        let rect = Rect::from_origin_size(anchor.origin_for(size), size);
        Self {
            text: text.into(),
            texture,
            rect,
        }
    }

    /// The shape name the label shows.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Rendered pixels.
    pub fn texture(&self) -> &LabelTexture {
        &self.texture
    }

    /// Current on-screen box.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    fn translate(&mut self, d: Vec2) {
        self.rect = self.rect + d;
    }
}

/// Shared motion/collision view over the two shape kinds.
pub trait Body {
    /// Position and velocity.
    fn kinematics(&self) -> &Kinematics;

    #[doc(hidden)]
    fn parts_mut(&mut self) -> (&mut Kinematics, &mut Label);

    /// Horizontal `(min, max)` extent tested against the world walls.
    fn extent_x(&self) -> (f64, f64);

    /// Vertical `(min, max)` extent tested against the world walls.
    fn extent_y(&self) -> (f64, f64);

    /// Move shape and label by their velocity.
    fn advance(&mut self) {
        let (kin, label) = self.parts_mut();
        let d = kin.velocity;
        kin.position += d;
        label.translate(d);
    }

    /// Negate the horizontal velocity.
    fn reflect_x(&mut self) {
        let (kin, _) = self.parts_mut();
        kin.velocity.x = -kin.velocity.x;
    }

    /// Negate the vertical velocity.
    fn reflect_y(&mut self) {
        let (kin, _) = self.parts_mut();
        kin.velocity.y = -kin.velocity.y;
    }
}

fn positive_finite(what: &str, name: &str, v: f64) -> RicochetResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(RicochetError::geometry(format!(
            "{what} of '{name}' must be finite and > 0, got {v}"
        )))
    }
}

/// A labelled circle, positioned by its center.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    name: String,
    kin: Kinematics,
    color: Rgb8,
    radius: f64,
    label: Label,
}

impl Circle {
    /// Build a circle and center `label` on it.
    pub fn new(
        name: impl Into<String>,
        kin: Kinematics,
        color: Rgb8,
        radius: f64,
        label: LabelTexture,
    ) -> RicochetResult<Self> {
        let name = name.into();
        positive_finite("radius", &name, radius)?;
        if radius > f64::from(MAX_ELLIPSE_RADIUS) {
            return Err(RicochetError::geometry(format!(
                "radius of '{name}' must be <= {MAX_ELLIPSE_RADIUS}, got {radius}"
            )));
        }
        let label = Label::attach(name.clone(), label, LabelAnchor::Center(kin.position));
        Ok(Self {
            name,
            kin,
            color,
            radius,
            label,
        })
    }

    /// Shape name from the scene file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current center.
    pub fn center(&self) -> Point {
        self.kin.position
    }

    /// Displacement per frame.
    pub fn velocity(&self) -> Vec2 {
        self.kin.velocity
    }

    /// Fill color.
    pub fn color(&self) -> Rgb8 {
        self.color
    }

    /// Radius in pixels.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Attached name label.
    pub fn label(&self) -> &Label {
        &self.label
    }
}

impl Body for Circle {
    fn kinematics(&self) -> &Kinematics {
        &self.kin
    }

    fn parts_mut(&mut self) -> (&mut Kinematics, &mut Label) {
        (&mut self.kin, &mut self.label)
    }

    fn extent_x(&self) -> (f64, f64) {
        (self.kin.position.x - self.radius, self.kin.position.x + self.radius)
    }

    fn extent_y(&self) -> (f64, f64) {
        (self.kin.position.y - self.radius, self.kin.position.y + self.radius)
    }
}

/// A labelled axis-aligned rectangle, positioned by its top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    name: String,
    kin: Kinematics,
    color: Rgb8,
    size: Size,
    label: Label,
}

impl Rectangle {
    /// Build a rectangle (`kin.position` is the top-left corner) and center `label` inside it.
    pub fn new(
        name: impl Into<String>,
        kin: Kinematics,
        color: Rgb8,
        size: Size,
        label: LabelTexture,
    ) -> RicochetResult<Self> {
        let name = name.into();
        positive_finite("width", &name, size.width)?;
        positive_finite("height", &name, size.height)?;
        let bounds = Rect::from_origin_size(kin.position, size);
        let label = Label::attach(name.clone(), label, LabelAnchor::BoxCenter(bounds));
        Ok(Self {
            name,
            kin,
            color,
            size,
            label,
        })
    }

    /// Shape name from the scene file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        self.kin.position
    }

    /// Displacement per frame.
    pub fn velocity(&self) -> Vec2 {
        self.kin.velocity
    }

    /// Fill color.
    pub fn color(&self) -> Rgb8 {
        self.color
    }

    /// Width and height.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Current bounds in world coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.kin.position, self.size)
    }

    /// Attached name label.
    pub fn label(&self) -> &Label {
        &self.label
    }
}

impl Body for Rectangle {
    fn kinematics(&self) -> &Kinematics {
        &self.kin
    }

    fn parts_mut(&mut self) -> (&mut Kinematics, &mut Label) {
        (&mut self.kin, &mut self.label)
    }

    fn extent_x(&self) -> (f64, f64) {
        (self.kin.position.x, self.kin.position.x + self.size.width)
    }

    fn extent_y(&self) -> (f64, f64) {
        (self.kin.position.y, self.kin.position.y + self.size.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
