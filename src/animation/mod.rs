//! Timed property interpolation: easing curves, tweens, the engine that advances them and the
//! animation-frame ticker that drives the engine.

pub mod ease;
pub mod engine;
pub mod plugins;
pub mod ticker;
pub mod tween;
