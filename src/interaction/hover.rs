use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::animation::ease::Ease;
use crate::animation::engine::{SharedEngine, TweenEngine};
use crate::animation::tween::{Timing, Tween, TweenTag};
use crate::dom::document::NodeId;
use crate::dom::selector::SelectorList;
use crate::dom::style::{Property, PropertyMap};
use crate::host::environment::Host;
use crate::host::listeners::{ListenerId, PointerKind};

fn default_selector() -> SelectorList {
    SelectorList::any_class(&["feature-card", "hero-button", "cta-button", "team-card"])
}
fn default_scale() -> f64 {
    1.05
}
fn default_duration() -> f64 {
    0.3
}
fn default_ease() -> Ease {
    Ease::OutCubic
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoverConfig {
    #[serde(default = "default_selector")]
    pub selector: SelectorList,
    /// Scale reached while the pointer is over the element.
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_ease")]
    pub ease: Ease,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            selector: default_selector(),
            scale: default_scale(),
            duration: default_duration(),
            ease: default_ease(),
        }
    }
}

/// Enter/leave scale interactions on every element matching the configured selector.
///
/// Leave always brings the element back to scale 1, tweened when motion is allowed and
/// assigned directly otherwise, so an element never stays enlarged.
#[derive(Debug)]
pub struct HoverInteractionBinder {
    nodes: Vec<NodeId>,
    listeners: Vec<ListenerId>,
    detached: bool,
}

impl HoverInteractionBinder {
    #[tracing::instrument(skip_all, fields(motion_allowed = motion_allowed))]
    pub fn attach(
        host: &mut Host,
        config: &HoverConfig,
        engine: &SharedEngine,
        motion_allowed: bool,
    ) -> Self {
        let nodes = host.document().query_selector_all(&config.selector);
        if nodes.is_empty() {
            tracing::debug!(selector = %config.selector, "no hover targets");
        }

        let timing = Timing::new(config.duration, config.ease);
        let mut listeners = Vec::with_capacity(nodes.len() * 2);
        for &node in &nodes {
            let weak = Rc::downgrade(engine);
            let scale = config.scale;
            listeners.push(host.add_pointer_listener(
                node,
                PointerKind::Enter,
                Rc::new(move |h: &mut Host, node: NodeId| {
                    if motion_allowed {
                        scale_to(&weak, h, node, scale, timing);
                    }
                }),
            ));

            let weak = Rc::downgrade(engine);
            listeners.push(host.add_pointer_listener(
                node,
                PointerKind::Leave,
                Rc::new(move |h: &mut Host, node: NodeId| {
                    if motion_allowed {
                        scale_to(&weak, h, node, 1.0, timing);
                    } else {
                        if let Some(engine) = weak.upgrade() {
                            engine.borrow_mut().kill_tagged(node, TweenTag::Hover);
                        }
                        h.document_mut().set_style(node, Property::Scale, 1.0);
                    }
                }),
            ));
        }

        Self {
            nodes,
            listeners,
            detached: false,
        }
    }

    /// Removes every pointer listener. Returns `false` when already detached.
    pub fn detach(&mut self, host: &mut Host) -> bool {
        if self.detached {
            return false;
        }
        self.detached = true;
        for id in self.listeners.drain(..) {
            host.remove_pointer_listener(id);
        }
        true
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

/// Replaces any running hover tween on `node` with one from its current scale to `scale`.
fn scale_to(
    engine: &Weak<RefCell<TweenEngine>>,
    host: &mut Host,
    node: NodeId,
    scale: f64,
    timing: Timing,
) {
    let Some(engine) = engine.upgrade() else {
        return;
    };
    let Some(current) = host.document().style(node, Property::Scale) else {
        return;
    };
    let from: PropertyMap = [(Property::Scale, current)].into_iter().collect();
    let to: PropertyMap = [(Property::Scale, scale)].into_iter().collect();
    let tween = Tween::style(vec![node], &from, &to, timing).tagged(TweenTag::Hover);

    let now = host.now();
    let mut engine = engine.borrow_mut();
    engine.kill_tagged(node, TweenTag::Hover);
    engine.start(host.document_mut(), tween, now);
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/hover.rs"]
mod tests;
