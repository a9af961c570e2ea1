use super::*;
use crate::animation::engine::TweenEngine;
use crate::animation::ticker::Ticker;
use crate::dom::page::{ElementDef, PageDef};
use crate::dom::selector::SelectorList;
use crate::foundation::core::Viewport;

const TABLE: &str = r#"[
    {
        "name": "title",
        "targets": ".title span",
        "from": { "opacity": 0, "y": 50 },
        "to": { "opacity": 1, "y": 0 },
        "timing": { "duration": 0.8, "stagger": 0.1, "ease": "power3.out" },
        "trigger": { "anchor": ".hero", "start": "top 80%" }
    },
    {
        "name": "spin",
        "targets": ".leaf",
        "from": { "rotation": 0 },
        "to": { "rotation": 360 },
        "timing": { "duration": 2, "repeat": -1, "ease": "linear" },
        "trigger": { "anchor": ".hero", "start": "top 80%" }
    },
    {
        "name": "cards",
        "targets": ".card",
        "from": { "opacity": 0, "y": 100 },
        "to": { "opacity": 1, "y": 0 },
        "timing": { "duration": 0.8 },
        "trigger": { "anchor": "each", "start": "top 85%", "replay": "reset_on_reentry" },
        "effects": [
            { "kind": "counter", "select": ".num", "duration": 2, "ease": "power1.out" },
            { "kind": "path_reveal", "select": "svg path", "duration": 2 }
        ]
    },
    {
        "name": "notes",
        "targets": ".note",
        "from": { "opacity": 0 },
        "to": { "opacity": 1 },
        "timing": { "duration": 0.5 },
        "trigger": { "anchor": ".cards", "start": "top 85%" }
    },
    {
        "name": "ghost",
        "targets": ".missing",
        "from": { "opacity": 0 },
        "trigger": { "anchor": ".hero", "start": "top 80%" }
    },
    {
        "name": "orphan",
        "targets": ".note",
        "from": { "opacity": 0 },
        "trigger": { "anchor": ".nowhere", "start": "top 80%" }
    }
]"#;

fn card(top: f64, target: &str) -> ElementDef {
    ElementDef::new("div").class("card").at(top, 250.0).children([
        ElementDef::new("span").class("num").data("target", target).text("?").at(top + 10.0, 40.0),
        ElementDef::new("svg").at(top + 60.0, 80.0).child(ElementDef::new("path").at(top + 60.0, 80.0)),
    ])
}

fn host(reduced: bool) -> Host {
    let page = PageDef {
        children: vec![
            ElementDef::new("section").class("hero").at(0.0, 800.0).children([
                ElementDef::new("h1").class("title").at(100.0, 80.0).children([
                    ElementDef::new("span").text("Grow").at(100.0, 80.0),
                    ElementDef::new("span").text("green").at(100.0, 80.0),
                ]),
                ElementDef::new("svg").class("leaf").at(300.0, 60.0),
            ]),
            ElementDef::new("section").class("cards").at(1000.0, 700.0).children([
                card(1000.0, "1250"),
                card(1300.0, "0"),
                ElementDef::new("p").class("note").at(1600.0, 40.0),
            ]),
        ],
    };
    Host::new(page.build().unwrap(), Viewport::new(1200, 800)).with_reduced_motion(Some(reduced))
}

fn all(host: &Host, sel: &str) -> Vec<NodeId> {
    host.document().query_selector_all(&SelectorList::parse(sel).unwrap())
}

fn style(host: &Host, id: NodeId, p: Property) -> f64 {
    host.document().style(id, p).unwrap()
}

#[test]
fn reduced_motion_assigns_terminal_state_without_observers() {
    let mut h = host(true);
    let engine = TweenEngine::shared();
    let table = AnimationTable::from_json(TABLE).unwrap();
    let reg = ScrollAnimationRegistry::build(&mut h, &table, true, &engine);

    assert_eq!(h.observer_count(), 0);
    assert_eq!(engine.borrow().active_count(), 0);
    assert_eq!(reg.binding_count(), 0);
    for span in all(&h, ".title span") {
        assert_eq!(style(&h, span, Property::Opacity), 1.0);
        assert_eq!(style(&h, span, Property::Y), 0.0);
    }
    let leaf = all(&h, ".leaf")[0];
    assert_eq!(style(&h, leaf, Property::Rotation), 0.0);
    let nums = all(&h, ".num");
    assert_eq!(h.document().text(nums[0]), Some("1250"));
    assert_eq!(h.document().text(nums[1]), Some("0"));
    for path in all(&h, "svg path") {
        assert_eq!(style(&h, path, Property::StrokeDashOffset), 0.0);
    }
    // Anchors play no part without motion, so only the target-less descriptor is skipped.
    assert_eq!(reg.report().applied, ["title", "spin", "cards", "notes", "orphan"]);
    assert_eq!(reg.report().skipped.len(), 1);
}

#[test]
fn descriptors_that_resolve_to_nothing_are_skipped_alone() {
    let mut h = host(false);
    let engine = TweenEngine::shared();
    let table = AnimationTable::from_json(TABLE).unwrap();
    let reg = ScrollAnimationRegistry::build(&mut h, &table, false, &engine);

    let skipped: Vec<&str> = reg.report().skipped.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(skipped, ["ghost", "orphan"]);
    assert_eq!(reg.report().armed, ["title", "spin", "cards", "notes"]);
    // title, spin, notes share one anchor each; cards bind per element.
    assert_eq!(reg.report().bindings, 5);
    assert_eq!(h.observer_count(), 5);
    assert_eq!(reg.observers().len(), 5);
}

#[test]
fn start_state_is_rendered_before_any_trigger() {
    let mut h = host(false);
    let engine = TweenEngine::shared();
    let table = AnimationTable::from_json(TABLE).unwrap();
    let _reg = ScrollAnimationRegistry::build(&mut h, &table, false, &engine);

    for span in all(&h, ".title span") {
        assert_eq!(style(&h, span, Property::Opacity), 0.0);
        assert_eq!(style(&h, span, Property::Y), 50.0);
    }
    let nums = all(&h, ".num");
    assert_eq!(h.document().text(nums[0]), Some("0"));
    assert_eq!(h.document().text(nums[1]), Some("0"));
    for path in all(&h, "svg path") {
        assert_eq!(style(&h, path, Property::StrokeDashOffset), 1000.0);
    }
    assert_eq!(engine.borrow().active_count(), 0);
}

#[test]
fn triggers_play_to_exact_end_values() {
    let mut h = host(false);
    let engine = TweenEngine::shared();
    let _ticker = Ticker::start(&mut h, &engine);
    let table = AnimationTable::from_json(TABLE).unwrap();
    let _reg = ScrollAnimationRegistry::build(&mut h, &table, false, &engine);

    h.run_frames(1);
    // title + infinite spin are running; cards are below the fold.
    assert_eq!(engine.borrow().active_count(), 2);
    h.run_for(1.0);
    for span in all(&h, ".title span") {
        assert_eq!(style(&h, span, Property::Opacity), 1.0);
        assert_eq!(style(&h, span, Property::Y), 0.0);
    }
    assert_eq!(engine.borrow().active_count(), 1);

    h.scroll_to(2000.0);
    h.run_for(2.5);
    let nums = all(&h, ".num");
    assert_eq!(h.document().text(nums[0]), Some("1250"));
    assert_eq!(h.document().text(nums[1]), Some("0"));
    for path in all(&h, "svg path") {
        assert_eq!(style(&h, path, Property::StrokeDashOffset), 0.0);
    }
    let note = all(&h, ".note")[0];
    assert_eq!(style(&h, note, Property::Opacity), 1.0);
}

#[test]
fn reset_on_reentry_replays_while_once_holds() {
    let mut h = host(false);
    let engine = TweenEngine::shared();
    let _ticker = Ticker::start(&mut h, &engine);
    let table = AnimationTable::from_json(TABLE).unwrap();
    let _reg = ScrollAnimationRegistry::build(&mut h, &table, false, &engine);

    h.scroll_to(2000.0);
    h.run_for(2.5);
    let cards = all(&h, ".card");
    let note = all(&h, ".note")[0];
    assert_eq!(style(&h, cards[0], Property::Y), 0.0);

    h.scroll_to(0.0);
    h.run_frames(2);
    for &c in &cards {
        assert_eq!(style(&h, c, Property::Opacity), 0.0);
        assert_eq!(style(&h, c, Property::Y), 100.0);
    }
    assert_eq!(style(&h, note, Property::Opacity), 1.0);
    // The counter and path reveal play once and keep their end values.
    assert_eq!(h.document().text(all(&h, ".num")[0]), Some("1250"));
    assert_eq!(style(&h, all(&h, "svg path")[0], Property::StrokeDashOffset), 0.0);

    h.scroll_to(2000.0);
    h.run_frames(2);
    let y = style(&h, cards[0], Property::Y);
    assert!(y > 0.0 && y < 100.0, "replaying, got y = {y}");
    h.run_for(1.0);
    assert_eq!(style(&h, cards[0], Property::Y), 0.0);
}

#[test]
fn destroy_survives_removed_anchors_and_is_idempotent() {
    let mut h = host(false);
    let engine = TweenEngine::shared();
    let table = AnimationTable::from_json(TABLE).unwrap();
    let mut reg = ScrollAnimationRegistry::build(&mut h, &table, false, &engine);

    h.run_frames(1);
    assert!(engine.borrow().active_count() > 0);
    let cards = all(&h, ".card");
    h.document_mut().detach(cards[1]);
    h.run_frames(1);
    assert_eq!(h.observer_count(), 4);

    assert!(reg.destroy(&mut h));
    assert_eq!(h.observer_count(), 0);
    assert_eq!(engine.borrow().active_count(), 0);
    assert_eq!(reg.binding_count(), 0);
    assert!(reg.is_destroyed());
    assert!(!reg.destroy(&mut h));
}
