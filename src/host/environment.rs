use crate::dom::document::{Document, NodeId};
use crate::foundation::core::Viewport;
use crate::host::frame::{FrameCallback, FrameHandle, FrameQueue};
use crate::host::listeners::{
    ListenerId, Listeners, PointerCallback, PointerKind, PointerListener, ResizeCallback,
};
use crate::host::observer::{ObserverId, Observers, TriggerStart, VisibilityCallback};

/// The only media query the host answers.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Nominal display refresh interval (60 Hz).
pub const FRAME_INTERVAL_SECS: f64 = 1.0 / 60.0;

/// Single-threaded host environment: document, viewport, scroll offset, media signals and the
/// event sources (animation frames, resize, pointer, scroll visibility).
///
/// Nothing runs on its own. Drivers (`advance_frame`, `scroll_to`, `resize`, `pointer_enter`,
/// `pointer_leave`) dispatch to the registered callbacks, which receive `&mut Host` and may
/// register or remove callbacks while being dispatched.
pub struct Host {
    document: Document,
    viewport: Viewport,
    scroll_y: f64,
    reduced_motion: Option<bool>,
    now: f64,
    frames: FrameQueue,
    listeners: Listeners,
    observers: Observers,
}

impl Host {
    pub fn new(document: Document, viewport: Viewport) -> Self {
        Self {
            document,
            viewport,
            scroll_y: 0.0,
            reduced_motion: Some(false),
            now: 0.0,
            frames: FrameQueue::default(),
            listeners: Listeners::default(),
            observers: Observers::default(),
        }
    }

    /// Sets the `prefers-reduced-motion` signal. `None` models a host that cannot answer.
    pub fn with_reduced_motion(mut self, signal: Option<bool>) -> Self {
        self.reduced_motion = signal;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Timestamp of the most recent frame, in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Evaluates a media query. Unknown queries are unanswerable (`None`).
    pub fn match_media(&self, query: &str) -> Option<bool> {
        if query.trim() == REDUCED_MOTION_QUERY {
            self.reduced_motion
        } else {
            None
        }
    }

    pub fn request_animation_frame(&mut self, cb: FrameCallback) -> FrameHandle {
        self.frames.request(cb)
    }

    pub fn pending_frame_callbacks(&self) -> usize {
        self.frames.len()
    }

    pub fn add_resize_listener(&mut self, cb: ResizeCallback) -> ListenerId {
        let id = self.listeners.next_id();
        self.listeners.resize.insert(id, cb);
        id
    }

    /// Returns `false` when the listener was not registered.
    pub fn remove_resize_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.resize.remove(&id).is_some()
    }

    pub fn resize_listener_count(&self) -> usize {
        self.listeners.resize.len()
    }

    pub fn add_pointer_listener(
        &mut self,
        node: NodeId,
        kind: PointerKind,
        cb: PointerCallback,
    ) -> ListenerId {
        let id = self.listeners.next_id();
        self.listeners
            .pointer
            .insert(id, PointerListener { node, kind, cb });
        id
    }

    pub fn remove_pointer_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.pointer.remove(&id).is_some()
    }

    pub fn pointer_listener_count(&self) -> usize {
        self.listeners.pointer.len()
    }

    /// Starts observing `anchor` against `start`. The first evaluation happens on the next
    /// frame, so an anchor already past its threshold reports `Enter` then.
    pub fn observe(
        &mut self,
        anchor: NodeId,
        start: TriggerStart,
        cb: VisibilityCallback,
    ) -> ObserverId {
        self.observers.insert(anchor, start, cb)
    }

    /// Returns `false` when the observer is unknown or was already dropped.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn is_observing(&self, id: ObserverId) -> bool {
        self.observers.contains(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Moves the scroll offset. Observers see the change on the next frame.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for (id, cb) in self.listeners.resize_snapshot() {
            if self.listeners.resize.contains_key(&id) {
                cb(self, viewport);
            }
        }
    }

    pub fn pointer_enter(&mut self, node: NodeId) {
        self.dispatch_pointer(node, PointerKind::Enter);
    }

    pub fn pointer_leave(&mut self, node: NodeId) {
        self.dispatch_pointer(node, PointerKind::Leave);
    }

    fn dispatch_pointer(&mut self, node: NodeId, kind: PointerKind) {
        for (id, cb) in self.listeners.pointer_snapshot(node, kind) {
            if self.listeners.pointer.contains_key(&id) {
                cb(self, node);
            }
        }
    }

    /// Runs one display frame `dt` seconds after the previous one: visibility observers
    /// first, then every animation-frame callback requested before this frame.
    pub fn advance_frame(&mut self, dt: f64) {
        self.now += dt.max(0.0);

        let changes = self.observers.evaluate(
            &self.document,
            self.scroll_y,
            f64::from(self.viewport.height),
        );
        for (id, change, cb) in changes {
            if self.observers.contains(id) {
                cb(self, change);
            }
        }

        let now = self.now;
        for (_handle, cb) in self.frames.take() {
            cb(self, now);
        }
    }

    /// Runs `n` frames at the nominal refresh rate.
    pub fn run_frames(&mut self, n: usize) {
        for _ in 0..n {
            self.advance_frame(FRAME_INTERVAL_SECS);
        }
    }

    /// Runs frames until `secs` of host time have elapsed.
    pub fn run_for(&mut self, secs: f64) {
        let frames = (secs / FRAME_INTERVAL_SECS).ceil().max(0.0) as usize;
        self.run_frames(frames);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/environment.rs"]
mod tests;
