use super::*;
use crate::animation::ease::Ease;
use crate::animation::tween::Timing;
use crate::dom::style::{Property, PropertyMap};

fn fade(target: NodeId, secs: f64) -> Tween {
    let from: PropertyMap = [(Property::Opacity, 0.0)].into_iter().collect();
    let to: PropertyMap = [(Property::Opacity, 1.0)].into_iter().collect();
    Tween::style(vec![target], &from, &to, Timing::new(secs, Ease::Linear))
}

fn doc() -> (Document, NodeId) {
    let mut doc = Document::new();
    let id = doc.create_element("div");
    doc.append_child(doc.root(), id).unwrap();
    (doc, id)
}

#[test]
fn tick_advances_relative_to_start_and_drops_finished() {
    let (mut d, id) = doc();
    let mut engine = TweenEngine::default();
    let t = engine.start(&mut d, fade(id, 1.0), 10.0);
    assert_eq!(d.style(id, Property::Opacity), Some(0.0));

    engine.tick(&mut d, 10.25);
    assert!((d.style(id, Property::Opacity).unwrap() - 0.25).abs() < 1e-12);
    assert!(engine.is_active(t));

    engine.tick(&mut d, 11.5);
    assert_eq!(d.style(id, Property::Opacity), Some(1.0));
    assert!(!engine.is_active(t));
    assert_eq!(engine.completed_count(), 1);
}

#[test]
fn zero_duration_tween_finishes_on_start() {
    let (mut d, id) = doc();
    let mut engine = TweenEngine::default();
    let t = engine.start(&mut d, fade(id, 0.0), 0.0);
    assert!(!engine.is_active(t));
    assert_eq!(d.style(id, Property::Opacity), Some(1.0));
}

#[test]
fn kill_freezes_values() {
    let (mut d, id) = doc();
    let mut engine = TweenEngine::default();
    let t = engine.start(&mut d, fade(id, 1.0), 0.0);
    engine.tick(&mut d, 0.5);
    assert!(engine.kill(t));
    assert!(!engine.kill(t));
    engine.tick(&mut d, 2.0);
    assert!((d.style(id, Property::Opacity).unwrap() - 0.5).abs() < 1e-12);
}

#[test]
fn kill_tagged_only_hits_matching_tag_and_node() {
    let (mut d, id) = doc();
    let other = d.create_element("div");
    let mut engine = TweenEngine::default();
    let scroll = engine.start(&mut d, fade(id, 1.0), 0.0);
    let hover = engine.start(&mut d, fade(id, 1.0).tagged(TweenTag::Hover), 0.0);
    let elsewhere = engine.start(&mut d, fade(other, 1.0).tagged(TweenTag::Hover), 0.0);

    assert_eq!(engine.kill_tagged(id, TweenTag::Hover), 1);
    assert!(engine.is_active(scroll));
    assert!(!engine.is_active(hover));
    assert!(engine.is_active(elsewhere));
    assert_eq!(engine.clear(), 2);
    assert_eq!(engine.active_count(), 0);
}
