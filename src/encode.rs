//! Frame sinks.
//!
//! Sinks consume presented frames in order; the headless surface hands every frame to one.

/// Generic frame sink trait and built-in sinks.
pub mod sink;
