use super::*;
use crate::animation::ease::Ease;
use crate::animation::tween::{Timing, Tween};
use crate::dom::document::Document;
use crate::dom::style::{Property, PropertyMap};
use crate::foundation::core::Viewport;

fn host_with_target() -> (Host, crate::dom::document::NodeId) {
    let mut doc = Document::new();
    let id = doc.create_element("div");
    doc.append_child(doc.root(), id).unwrap();
    (Host::new(doc, Viewport::new(800, 600)), id)
}

#[test]
fn ticker_drives_engine_until_stopped() {
    let (mut host, id) = host_with_target();
    let engine = TweenEngine::shared();
    let ticker = Ticker::start(&mut host, &engine);

    let from: PropertyMap = [(Property::Y, 50.0)].into_iter().collect();
    let to: PropertyMap = [(Property::Y, 0.0)].into_iter().collect();
    let tween = Tween::style(vec![id], &from, &to, Timing::new(0.5, Ease::OutQuart));
    let now = host.now();
    engine.borrow_mut().start(host.document_mut(), tween, now);

    host.run_for(0.6);
    assert_eq!(host.document().style(id, Property::Y), Some(0.0));
    assert_eq!(engine.borrow().active_count(), 0);
    assert!(ticker.ticks() >= 36);

    assert!(ticker.stop());
    assert!(!ticker.stop());
    let ticks = ticker.ticks();
    host.run_frames(3);
    assert_eq!(ticker.ticks(), ticks);
    assert_eq!(host.pending_frame_callbacks(), 0);
}

#[test]
fn ticker_ends_when_engine_is_dropped() {
    let (mut host, _) = host_with_target();
    let engine = TweenEngine::shared();
    let ticker = Ticker::start(&mut host, &engine);
    host.run_frames(2);
    drop(engine);
    host.run_frames(2);
    assert!(!ticker.is_running());
    assert_eq!(ticker.ticks(), 2);
}
