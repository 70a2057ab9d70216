//! Runtime loop and its time/input collaborators.

/// Frame pacing clocks.
pub mod clock;
/// Input events and sources.
pub mod input;
/// The frame loop.
pub mod simulation;
