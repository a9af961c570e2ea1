use super::*;

fn count(doc: &Document, sel: &str) -> usize {
    doc.query_selector_all(&SelectorList::parse(sel).unwrap()).len()
}

#[test]
fn fixture_has_every_animated_section() {
    let doc = homepage_document().unwrap();
    for (sel, n) in [
        (".hero", 1),
        (".hero-title span", 3),
        (".hero-subtitle", 1),
        (".hero-button", 1),
        (".mission-text p", 4),
        (".mission-image", 1),
        (".stat-card", 3),
        (".stat-card .stat-number", 3),
        (".feature-card", 3),
        (".feature-svg path", 3),
        (".testimonial-card p", 2),
        (".team-card", 3),
        (".cta-button", 1),
        (".footer-note", 1),
        (".leaf-svg", 0),
        (".cta-svg", 0),
    ] {
        assert_eq!(count(&doc, sel), n, "{sel}");
    }
}

#[test]
fn counters_carry_integer_targets() {
    let doc = homepage_document().unwrap();
    let nums = doc.query_selector_all(&SelectorList::parse(".stat-number").unwrap());
    let targets: Vec<&str> = nums.iter().map(|&n| doc.data(n, "target").unwrap()).collect();
    assert_eq!(targets, ["5000", "10000", "2000"]);
    assert!(nums.iter().all(|&n| doc.text(n) == Some("0")));
}

#[test]
fn globe_container_is_the_hero_backdrop() {
    let doc = homepage_document().unwrap();
    let globe = globe_container(&doc).unwrap();
    assert!(doc.element(globe).unwrap().has_class("hero-globe"));
    assert_eq!(doc.layout(globe).unwrap().height(), 800.0);
}

#[test]
fn sections_stack_down_the_page() {
    let doc = homepage_document().unwrap();
    let tops: Vec<f64> = ["hero", "mission", "stats", "features", "testimonials", "team", "cta"]
        .iter()
        .map(|c| {
            let id = doc.query_selector(&SelectorList::parse(&format!(".{c}")).unwrap()).unwrap();
            doc.layout(id).unwrap().y0
        })
        .collect();
    assert!(tops.windows(2).all(|w| w[0] < w[1]));
    let page = homepage_page();
    let json = serde_json::to_string(&page).unwrap();
    let back = PageDef::from_json(&json).unwrap().build().unwrap();
    assert_eq!(back.len(), doc.len());
}
