use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::animation::engine::{SharedEngine, TweenId};
use crate::animation::tween::{Tween, format_counter};
use crate::dom::document::{Document, NodeId};
use crate::dom::style::{Property, PropertyMap};
use crate::foundation::math::wrap_degrees;
use crate::host::environment::Host;
use crate::host::observer::{ObserverId, VisibilityChange};
use crate::scroll::descriptor::{Anchor, AnimationDescriptor, AnimationTable, ReplayPolicy, SubEffect};

/// Why a descriptor did not produce anything.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Skipped {
    pub name: String,
    pub reason: String,
}

/// Outcome of [`ScrollAnimationRegistry::build`], one entry per descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BuildReport {
    /// Descriptors assigned their terminal state (reduced motion).
    pub applied: Vec<String>,
    /// Descriptors with at least one armed binding.
    pub armed: Vec<String>,
    pub skipped: Vec<Skipped>,
    pub bindings: usize,
}

impl BuildReport {
    fn skip(&mut self, name: &str, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(descriptor = name, %reason, "skipping scroll animation");
        self.skipped.push(Skipped {
            name: name.to_owned(),
            reason,
        });
    }
}

/// A tween that can be replayed from its start state.
struct Playable {
    tween: Tween,
    replay: ReplayPolicy,
    running: Option<TweenId>,
    played: bool,
}

impl Playable {
    fn new(tween: Tween, replay: ReplayPolicy) -> Self {
        Self {
            tween,
            replay,
            running: None,
            played: false,
        }
    }

    fn enter(&mut self, engine: &SharedEngine, host: &mut Host) {
        if self.played && self.replay == ReplayPolicy::Once {
            return;
        }
        let now = host.now();
        let mut engine = engine.borrow_mut();
        if let Some(id) = self.running.take() {
            engine.kill(id);
        }
        self.running = Some(engine.start(host.document_mut(), self.tween.clone(), now));
        self.played = true;
    }

    fn leave_back(&mut self, engine: &SharedEngine, doc: &mut Document) {
        if self.replay != ReplayPolicy::ResetOnReentry {
            return;
        }
        if let Some(id) = self.running.take() {
            engine.borrow_mut().kill(id);
        }
        self.tween.render_start(doc);
    }

    fn kill(&mut self, engine: &SharedEngine) {
        if let Some(id) = self.running.take() {
            engine.borrow_mut().kill(id);
        }
    }
}

/// Runtime pairing of one descriptor with one visibility observer.
struct Binding {
    descriptor: String,
    observer: Option<ObserverId>,
    main: Playable,
    effects: Vec<Playable>,
}

impl Binding {
    fn on_change(&mut self, engine: &SharedEngine, host: &mut Host, change: VisibilityChange) {
        tracing::debug!(descriptor = %self.descriptor, ?change, "scroll trigger");
        match change {
            VisibilityChange::Enter => {
                self.main.enter(engine, host);
                for e in &mut self.effects {
                    e.enter(engine, host);
                }
            }
            VisibilityChange::LeaveBack => {
                self.main.leave_back(engine, host.document_mut());
                for e in &mut self.effects {
                    e.leave_back(engine, host.document_mut());
                }
            }
        }
    }
}

struct RegistryState {
    engine: SharedEngine,
    bindings: Vec<Binding>,
}

/// Scroll-triggered animations compiled against one document.
pub struct ScrollAnimationRegistry {
    state: Rc<RefCell<RegistryState>>,
    report: BuildReport,
    destroyed: bool,
}

impl ScrollAnimationRegistry {
    /// Compiles `table` against the host document.
    ///
    /// With motion allowed, every target immediately shows its start state and one observer
    /// per anchor is armed. With reduced motion, every target receives its terminal state now
    /// and nothing is armed. Descriptors that resolve to nothing are skipped individually.
    #[tracing::instrument(skip_all, fields(descriptors = table.len(), reduced_motion = reduced_motion))]
    pub fn build(
        host: &mut Host,
        table: &AnimationTable,
        reduced_motion: bool,
        engine: &SharedEngine,
    ) -> Self {
        let state = Rc::new(RefCell::new(RegistryState {
            engine: Rc::clone(engine),
            bindings: Vec::new(),
        }));
        let mut report = BuildReport::default();

        for d in table.iter() {
            let targets = host.document().query_selector_all(&d.targets);
            if targets.is_empty() {
                report.skip(&d.name, format!("no element matches '{}'", d.targets));
                continue;
            }
            if reduced_motion {
                apply_terminal(host.document_mut(), d, &targets);
                report.applied.push(d.name.clone());
                continue;
            }

            let groups: Vec<(NodeId, Vec<NodeId>)> = match &d.trigger.anchor {
                Anchor::Each => targets.iter().map(|&t| (t, vec![t])).collect(),
                Anchor::Selector(sel) => match host.document().query_selector(sel) {
                    Some(anchor) => vec![(anchor, targets)],
                    None => {
                        report.skip(&d.name, format!("no anchor matches '{sel}'"));
                        continue;
                    }
                },
            };

            for (anchor, group) in groups {
                let binding = arm_binding(host, d, &group);
                let index = {
                    let mut s = state.borrow_mut();
                    s.bindings.push(binding);
                    s.bindings.len() - 1
                };
                let weak = Rc::downgrade(&state);
                let observer = host.observe(
                    anchor,
                    d.trigger.start,
                    Rc::new(move |h: &mut Host, change: VisibilityChange| {
                        dispatch(&weak, index, h, change);
                    }),
                );
                if let Some(b) = state.borrow_mut().bindings.get_mut(index) {
                    b.observer = Some(observer);
                }
                report.bindings += 1;
            }
            report.armed.push(d.name.clone());
        }

        tracing::info!(
            applied = report.applied.len(),
            armed = report.armed.len(),
            skipped = report.skipped.len(),
            bindings = report.bindings,
            "scroll animations built"
        );
        Self {
            state,
            report,
            destroyed: false,
        }
    }

    /// Unobserves every binding and kills every tween started from them. Safe after the
    /// bindings fired, never fired, or lost their anchor. Returns `false` when already
    /// destroyed.
    #[tracing::instrument(skip_all)]
    pub fn destroy(&mut self, host: &mut Host) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        let mut state = self.state.borrow_mut();
        let engine = Rc::clone(&state.engine);
        let mut disarmed = 0usize;
        for mut b in state.bindings.drain(..) {
            if let Some(id) = b.observer.take()
                && host.unobserve(id)
            {
                disarmed += 1;
            }
            b.main.kill(&engine);
            for e in &mut b.effects {
                e.kill(&engine);
            }
        }
        tracing::debug!(disarmed, "scroll animations destroyed");
        true
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Bindings still held; zero after [`Self::destroy`].
    pub fn binding_count(&self) -> usize {
        self.state.borrow().bindings.len()
    }

    /// Observer handles of the live bindings.
    pub fn observers(&self) -> Vec<ObserverId> {
        self.state
            .borrow()
            .bindings
            .iter()
            .filter_map(|b| b.observer)
            .collect()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

fn dispatch(
    state: &Weak<RefCell<RegistryState>>,
    index: usize,
    host: &mut Host,
    change: VisibilityChange,
) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = state.borrow_mut();
    let RegistryState { engine, bindings } = &mut *state;
    if let Some(b) = bindings.get_mut(index) {
        b.on_change(engine, host, change);
    }
}

/// Builds the tweens of one binding and renders their start states.
fn arm_binding(host: &mut Host, d: &AnimationDescriptor, targets: &[NodeId]) -> Binding {
    let doc = host.document_mut();
    let main = Tween::style(targets.to_vec(), &d.start_state(), &d.terminal_state(), d.timing);
    main.render_start(doc);

    let mut effects = Vec::new();
    for (i, &target) in targets.iter().enumerate() {
        let delay = d.timing.delay + d.timing.stagger * i as f64;
        for effect in &d.effects {
            for tween in effect_tweens(doc, &d.name, effect, target, delay) {
                tween.render_start(doc);
                effects.push(Playable::new(tween, effect.replay()));
            }
        }
    }

    Binding {
        descriptor: d.name.clone(),
        observer: None,
        main: Playable::new(main, d.trigger.replay),
        effects,
    }
}

fn effect_tweens(
    doc: &mut Document,
    name: &str,
    effect: &SubEffect,
    target: NodeId,
    delay: f64,
) -> Vec<Tween> {
    match effect {
        SubEffect::Counter {
            select, attribute, ..
        } => {
            let Some(node) = doc.query_selector_within(target, select) else {
                tracing::warn!(descriptor = name, selector = %select, "counter element missing");
                return Vec::new();
            };
            let Some(value) = counter_target(doc, node, attribute) else {
                tracing::warn!(descriptor = name, attribute = %attribute, "counter has no integer target");
                return Vec::new();
            };
            if value == 0 {
                doc.set_text(node, format_counter(0.0));
                return Vec::new();
            }
            vec![Tween::counter(node, 0.0, value as f64, effect.timing(delay))]
        }
        SubEffect::PathReveal {
            select,
            from_offset,
            ..
        } => {
            let paths = doc.query_selector_all_within(target, select);
            if paths.is_empty() {
                tracing::warn!(descriptor = name, selector = %select, "no paths to reveal");
                return Vec::new();
            }
            let from: PropertyMap = [(Property::StrokeDashOffset, *from_offset)].into_iter().collect();
            let to: PropertyMap = [(Property::StrokeDashOffset, 0.0)].into_iter().collect();
            vec![Tween::style(paths, &from, &to, effect.timing(delay))]
        }
    }
}

fn counter_target(doc: &Document, node: NodeId, attribute: &str) -> Option<i64> {
    doc.data(node, attribute)?.trim().parse().ok()
}

/// Reduced-motion path: writes every end value synchronously.
fn apply_terminal(doc: &mut Document, d: &AnimationDescriptor, targets: &[NodeId]) {
    let terminal: PropertyMap = d
        .terminal_state()
        .into_iter()
        .map(|(p, v)| if p.is_angular() { (p, wrap_degrees(v)) } else { (p, v) })
        .collect();
    for &target in targets {
        doc.apply_style(target, &terminal);
        for effect in &d.effects {
            match effect {
                SubEffect::Counter {
                    select, attribute, ..
                } => {
                    if let Some(node) = doc.query_selector_within(target, select)
                        && let Some(value) = counter_target(doc, node, attribute)
                    {
                        doc.set_text(node, value.to_string());
                    }
                }
                SubEffect::PathReveal { select, .. } => {
                    for path in doc.query_selector_all_within(target, select) {
                        doc.set_style(path, Property::StrokeDashOffset, 0.0);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/registry.rs"]
mod tests;
