//! Page-instance lifecycle: the motion gate, the stage configuration, the [`stage::Stage`]
//! that owns every mounted resource, and the landing-page fixture.

pub mod config;
pub mod homepage;
pub mod preference;
pub mod stage;
