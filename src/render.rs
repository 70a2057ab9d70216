//! Software rendering: collaborator traits, the ellipse rasterizer and a headless surface.

/// Premultiplied RGBA8 compositing.
pub mod composite;
/// Midpoint ellipse rasterizer.
pub mod raster;
/// Frame buffer implementing the drawing traits.
pub mod surface;
/// Drawing capabilities the loop and rasterizer are written against.
pub mod target;
