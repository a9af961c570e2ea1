#![forbid(unsafe_code)]
//! Page-level animation and rendering orchestration for a landing page.
//!
//! A [`Stage`] is mounted against a [`Host`] (document, viewport, scroll position, media
//! signals, animation frames) and drives three effect systems from it: a rotating wireframe
//! globe rendered every frame, a table of scroll-triggered entrance tweens, and hover scale
//! interactions. A reduced-motion preference turns the tweens into instant terminal states.
//! Unmounting releases every frame loop, listener, observer and tween the stage created.

pub mod animation;
pub mod dom;
pub mod foundation;
pub mod host;
pub mod interaction;
pub mod page;
pub mod render;
pub mod scene;
pub mod scroll;

pub use animation::ease::Ease;
pub use animation::engine::{SharedEngine, TweenEngine, TweenId};
pub use animation::tween::{Repeat, Timing, Tween};
pub use dom::document::{Document, NodeId};
pub use dom::page::{ElementDef, PageDef};
pub use dom::selector::SelectorList;
pub use dom::style::{Property, PropertyMap};
pub use foundation::core::{Rect, Rgb8, Viewport};
pub use foundation::error::{VerdantError, VerdantResult};
pub use host::environment::Host;
pub use host::observer::{TriggerStart, VisibilityChange};
pub use interaction::hover::{HoverConfig, HoverInteractionBinder};
pub use page::config::StageConfig;
pub use page::homepage::{globe_container, homepage_document, homepage_page};
pub use page::preference::MotionPreference;
pub use page::stage::{LifecycleState, Stage, StageReport};
pub use render::{BackendKind, FrameRGBA, RenderSettings, SceneRenderer, create_renderer};
pub use scene::SceneConfig;
pub use scene::controller::{RenderStats, SceneController};
pub use scroll::descriptor::{
    Anchor, AnimationDescriptor, AnimationTable, ReplayPolicy, SubEffect, Trigger,
};
pub use scroll::registry::{BuildReport, ScrollAnimationRegistry};
