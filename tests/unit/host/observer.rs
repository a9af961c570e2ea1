use super::*;

#[test]
fn parses_keywords_and_percentages() {
    let s: TriggerStart = "top 80%".parse().unwrap();
    assert_eq!(s, TriggerStart::new(0.0, 0.8));
    let s: TriggerStart = "center bottom".parse().unwrap();
    assert_eq!(s, TriggerStart::new(0.5, 1.0));
    assert!("top".parse::<TriggerStart>().is_err());
    assert!("top 80".parse::<TriggerStart>().is_err());
    assert!("top 80% extra".parse::<TriggerStart>().is_err());
    assert!("top abc%".parse::<TriggerStart>().is_err());
}

#[test]
fn display_roundtrips() {
    for src in ["top 80%", "top 85%", "center bottom", "bottom top"] {
        let s: TriggerStart = src.parse().unwrap();
        assert_eq!(s.to_string(), src);
    }
    let json = serde_json::to_string(&TriggerStart::new(0.0, 0.9)).unwrap();
    assert_eq!(json, "\"top 90%\"");
}

#[test]
fn activation_uses_anchor_edge_against_viewport_line() {
    let start: TriggerStart = "top 80%".parse().unwrap();
    let layout = Rect::new(0.0, 1000.0, 100.0, 1200.0);
    // Line sits at 640px for an 800px viewport.
    assert!(!start.is_active(layout, 0.0, 800.0));
    assert!(!start.is_active(layout, 359.0, 800.0));
    assert!(start.is_active(layout, 360.0, 800.0));
    assert!(start.is_active(layout, 5000.0, 800.0));
}

#[test]
fn evaluate_reports_crossings_once_and_drops_detached_anchors() {
    let mut doc = Document::new();
    let anchor = doc.create_element("section");
    doc.element_mut(anchor).unwrap().layout = Rect::new(0.0, 1000.0, 100.0, 1200.0);
    doc.append_child(doc.root(), anchor).unwrap();

    let mut observers = Observers::default();
    let start: TriggerStart = "top 80%".parse().unwrap();
    let id = observers.insert(anchor, start, Rc::new(|_: &mut Host, _: VisibilityChange| {}));

    assert!(observers.evaluate(&doc, 0.0, 800.0).is_empty());
    let changes = observers.evaluate(&doc, 500.0, 800.0);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].1, VisibilityChange::Enter);
    assert!(observers.evaluate(&doc, 600.0, 800.0).is_empty());
    let changes = observers.evaluate(&doc, 0.0, 800.0);
    assert_eq!(changes[0].1, VisibilityChange::LeaveBack);

    doc.detach(anchor);
    assert!(observers.evaluate(&doc, 500.0, 800.0).is_empty());
    assert!(!observers.contains(id));
    assert!(!observers.remove(id));
}
