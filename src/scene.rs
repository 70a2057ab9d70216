//! Scene description parsing, shape model and the capacity-checked store.

/// Scene file parsing.
pub mod directive;
/// Building a scene from its description.
pub mod load;
/// Shapes, labels and motion.
pub mod model;
/// Capacity-checked shape storage.
pub mod store;
