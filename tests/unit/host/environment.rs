use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::foundation::core::Rect;
use crate::host::observer::VisibilityChange;

fn host() -> Host {
    Host::new(Document::new(), Viewport::new(1200, 800))
}

#[test]
fn media_query_answers_only_reduced_motion() {
    let h = host().with_reduced_motion(Some(true));
    assert_eq!(h.match_media(REDUCED_MOTION_QUERY), Some(true));
    assert_eq!(h.match_media("(prefers-color-scheme: dark)"), None);
    let h = host().with_reduced_motion(None);
    assert_eq!(h.match_media(REDUCED_MOTION_QUERY), None);
}

fn schedule(host: &mut Host, hits: Rc<Cell<u32>>) {
    host.request_animation_frame(Box::new(move |h: &mut Host, _now: f64| {
        hits.set(hits.get() + 1);
        schedule(h, Rc::clone(&hits));
    }));
}

#[test]
fn self_rescheduling_callback_runs_once_per_frame() {
    let mut h = host();
    let hits = Rc::new(Cell::new(0));
    schedule(&mut h, Rc::clone(&hits));
    assert_eq!(hits.get(), 0);
    h.run_frames(5);
    assert_eq!(hits.get(), 5);
    assert_eq!(h.pending_frame_callbacks(), 1);
}

#[test]
fn frame_timestamps_accumulate() {
    let mut h = host();
    let seen = Rc::new(Cell::new(0.0));
    let s = Rc::clone(&seen);
    h.advance_frame(0.25);
    h.request_animation_frame(Box::new(move |_: &mut Host, now: f64| s.set(now)));
    h.advance_frame(0.25);
    assert_eq!(seen.get(), 0.5);
    assert_eq!(h.now(), 0.5);
}

#[test]
fn listener_removed_during_dispatch_is_skipped() {
    let mut h = host();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let second = Rc::new(Cell::new(None));

    let c = Rc::clone(&calls);
    let s = Rc::clone(&second);
    h.add_resize_listener(Rc::new(move |h: &mut Host, vp: Viewport| {
        c.borrow_mut().push(("first", vp));
        if let Some(id) = s.get() {
            h.remove_resize_listener(id);
        }
    }));
    let c = Rc::clone(&calls);
    let id = h.add_resize_listener(Rc::new(move |_h: &mut Host, vp: Viewport| {
        c.borrow_mut().push(("second", vp));
    }));
    second.set(Some(id));

    h.resize(Viewport::new(800, 600));
    assert_eq!(*calls.borrow(), vec![("first", Viewport::new(800, 600))]);
    assert_eq!(h.viewport(), Viewport::new(800, 600));
    assert_eq!(h.resize_listener_count(), 1);
    assert!(!h.remove_resize_listener(id));
}

#[test]
fn pointer_dispatch_targets_node_and_kind() {
    let mut h = host();
    let a = h.document_mut().create_element("div");
    let b = h.document_mut().create_element("div");
    let hits = Rc::new(Cell::new(0));
    let c = Rc::clone(&hits);
    let id = h.add_pointer_listener(a, PointerKind::Enter, Rc::new(move |_: &mut Host, _: NodeId| c.set(c.get() + 1)));

    h.pointer_enter(b);
    h.pointer_leave(a);
    assert_eq!(hits.get(), 0);
    h.pointer_enter(a);
    assert_eq!(hits.get(), 1);

    assert!(h.remove_pointer_listener(id));
    h.pointer_enter(a);
    assert_eq!(hits.get(), 1);
    assert_eq!(h.pointer_listener_count(), 0);
}

#[test]
fn observers_fire_on_the_frame_after_scrolling() {
    let mut h = host();
    let anchor = h.document_mut().create_element("section");
    h.document_mut().element_mut(anchor).unwrap().layout = Rect::new(0.0, 1000.0, 100.0, 1400.0);
    let root = h.document().root();
    h.document_mut().append_child(root, anchor).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let start: TriggerStart = "top 80%".parse().unwrap();
    let id = h.observe(anchor, start, Rc::new(move |_: &mut Host, change: VisibilityChange| {
        s.borrow_mut().push(change)
    }));

    h.scroll_to(400.0);
    assert!(seen.borrow().is_empty());
    h.run_frames(1);
    assert_eq!(*seen.borrow(), vec![VisibilityChange::Enter]);

    h.scroll_to(0.0);
    h.run_frames(2);
    assert_eq!(
        *seen.borrow(),
        vec![VisibilityChange::Enter, VisibilityChange::LeaveBack]
    );

    assert!(h.unobserve(id));
    assert!(!h.unobserve(id));
    h.scroll_to(400.0);
    h.run_frames(1);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn run_for_covers_requested_duration() {
    let mut h = host();
    h.run_for(1.0);
    assert!(h.now() >= 1.0 - 1e-9);
    assert!(h.now() < 1.0 + FRAME_INTERVAL_SECS);
}
