use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::animation::engine::{SharedEngine, TweenEngine};
use crate::host::environment::Host;

/// Animation-frame loop that advances a [`TweenEngine`] once per frame until stopped or until
/// the engine is dropped.
#[derive(Debug)]
pub struct Ticker {
    alive: Rc<Cell<bool>>,
    ticks: Rc<Cell<u64>>,
}

impl Ticker {
    pub fn start(host: &mut Host, engine: &SharedEngine) -> Self {
        let alive = Rc::new(Cell::new(true));
        let ticks = Rc::new(Cell::new(0));
        schedule(
            host,
            Rc::downgrade(engine),
            Rc::clone(&alive),
            Rc::clone(&ticks),
        );
        Self { alive, ticks }
    }

    /// Returns `false` when the ticker was already stopped.
    pub fn stop(&self) -> bool {
        self.alive.replace(false)
    }

    pub fn is_running(&self) -> bool {
        self.alive.get()
    }

    /// Frames in which the engine was advanced.
    pub fn ticks(&self) -> u64 {
        self.ticks.get()
    }
}

fn schedule(
    host: &mut Host,
    engine: Weak<RefCell<TweenEngine>>,
    alive: Rc<Cell<bool>>,
    ticks: Rc<Cell<u64>>,
) {
    host.request_animation_frame(Box::new(move |h: &mut Host, now: f64| {
        if !alive.get() {
            return;
        }
        let Some(strong) = engine.upgrade() else {
            alive.set(false);
            return;
        };
        strong.borrow_mut().tick(h.document_mut(), now);
        ticks.set(ticks.get() + 1);
        schedule(h, engine, alive, ticks);
    }));
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ticker.rs"]
mod tests;
