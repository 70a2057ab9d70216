//! Ricochet animates circles and rectangles read from a scene description, bouncing them off the
//! world walls at a fixed frame rate.
//!
//! - Load a [`Scene`] from text ([`SceneDescription`] is the parsed form)
//! - Drive it with a [`Simulation`]: PollInput -> Update -> Render, once per frame
//! - Render into any [`Presenter`]; [`SoftwareSurface`] draws into memory and hands frames to a
//!   [`FrameSink`]
//!
//! Circles are drawn by a midpoint ellipse rasterizer ([`fill_circle`]) composed only from point
//! and segment primitives.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Frame sinks.
pub mod encode;
/// Shared value types and errors.
pub mod foundation;
/// Software rendering.
pub mod render;
/// Scene description and shape model.
pub mod scene;
/// The runtime loop.
pub mod session;
/// Label text.
pub mod text;

pub use crate::foundation::core::{
    Canvas, Fps, FrameIndex, Point, Rect, Rgb8, Rgba8, Size, Vec2,
};
pub use crate::foundation::error::{RicochetError, RicochetResult, ShapeKind};

pub use crate::encode::sink::{FrameSink, InMemorySink, NullSink, PngSequenceSink, SinkConfig};
pub use crate::render::raster::{
    ELLIPSE_OVERSCAN, MAX_ELLIPSE_RADIUS, fill_circle, fill_ellipse, stroke_ellipse,
};
pub use crate::render::surface::{FrameRGBA, SoftwareSurface};
pub use crate::render::target::{BlendMode, ClipRect, Presenter, PrimitiveTarget};
pub use crate::scene::directive::{
    CircleSpec, FontSpec, RectangleSpec, SceneDescription, ShapeSpec,
};
pub use crate::scene::load::{LabelSource, LoadOpts, Scene};
pub use crate::scene::model::{Body, Circle, Kinematics, Label, LabelAnchor, Rectangle};
pub use crate::scene::store::{
    CircleId, RectangleId, SceneLimits, SceneStore, ShapeArena, ShapeId,
};
pub use crate::session::clock::{Clock, ManualClock, SystemClock};
pub use crate::session::input::{
    FrameBudget, InputEvent, InputSource, Key, NoInput, ScriptedInput,
};
pub use crate::session::simulation::{
    RunStats, Simulation, SimulationOpts, resolve_collisions, step_motion,
};
pub use crate::text::label::{BlockLabelFactory, FontLabelFactory, LabelFactory, LabelTexture};
