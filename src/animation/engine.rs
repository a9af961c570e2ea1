use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::animation::tween::{Tween, TweenTag};
use crate::dom::document::{Document, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TweenId(pub u64);

struct Running {
    tween: Tween,
    start: f64,
}

/// Set of running tweens, advanced against host time.
///
/// Tweens are rendered in start order, so when two tweens write the same property of the same
/// element the most recently started one wins the frame.
#[derive(Default)]
pub struct TweenEngine {
    next: u64,
    running: BTreeMap<TweenId, Running>,
    completed: u64,
}

/// Engine handle shared between the ticker and the components that start tweens.
pub type SharedEngine = Rc<RefCell<TweenEngine>>;

impl TweenEngine {
    pub fn shared() -> SharedEngine {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Starts `tween` at host time `now` and renders its first state right away. A tween with
    /// nothing left to play finishes immediately and is never stored.
    pub fn start(&mut self, doc: &mut Document, tween: Tween, now: f64) -> TweenId {
        self.next = self.next.saturating_add(1);
        let id = TweenId(self.next);
        if tween.render(doc, 0.0) {
            self.completed += 1;
            tracing::trace!(tween = id.0, "tween finished on start");
            return id;
        }
        self.running.insert(id, Running { tween, start: now });
        id
    }

    /// Renders every running tween at host time `now` and drops the finished ones.
    pub fn tick(&mut self, doc: &mut Document, now: f64) {
        let mut finished = Vec::new();
        for (&id, r) in &self.running {
            if r.tween.render(doc, now - r.start) {
                finished.push(id);
            }
        }
        for id in finished {
            self.running.remove(&id);
            self.completed += 1;
            tracing::trace!(tween = id.0, "tween finished");
        }
    }

    /// Stops a tween where it is. Returns `false` when it already finished or was killed.
    pub fn kill(&mut self, id: TweenId) -> bool {
        self.running.remove(&id).is_some()
    }

    /// Kills every running tween with `tag` that writes to `node`.
    pub fn kill_tagged(&mut self, node: NodeId, tag: TweenTag) -> usize {
        let before = self.running.len();
        self.running
            .retain(|_, r| !(r.tween.tag() == tag && r.tween.touches(node)));
        before - self.running.len()
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.running.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.running.len()
    }

    pub fn completed_count(&self) -> u64 {
        self.completed
    }

    /// Kills everything. Returns the number of tweens stopped.
    pub fn clear(&mut self) -> usize {
        let n = self.running.len();
        self.running.clear();
        n
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/engine.rs"]
mod tests;
