//! Label text layout and rasterization.

/// Label textures and factories.
pub mod label;
pub(crate) mod layout;
