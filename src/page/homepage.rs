use crate::dom::document::{Document, NodeId};
use crate::dom::page::{ElementDef, PageDef};
use crate::dom::selector::SelectorList;
use crate::foundation::error::VerdantResult;

/// Width the fixture is laid out for.
pub const PAGE_WIDTH: f64 = 1200.0;

/// Selector of the element that hosts the globe canvas.
pub const GLOBE_CONTAINER: &str = ".hero-globe";

fn el(tag: &str, class: &str, top: f64, height: f64) -> ElementDef {
    ElementDef::new(tag)
        .class(class)
        .at(top, height)
        .span(0.0, PAGE_WIDTH)
}

fn section(class: &str, top: f64, height: f64, title: Option<&str>) -> ElementDef {
    let s = el("section", class, top, height);
    match title {
        Some(t) => s.child(el("h2", "section-title", top + 20.0, 50.0).text(t)),
        None => s,
    }
}

fn column(def: ElementDef, index: usize, count: usize) -> ElementDef {
    let width = (PAGE_WIDTH - 100.0 * (count as f64 + 1.0)) / count as f64;
    def.span(100.0 + index as f64 * (width + 100.0), width)
}

fn hero() -> ElementDef {
    section("hero", 0.0, 800.0, None).children([
        el("div", "hero-globe", 0.0, 800.0),
        el("div", "hero-content", 220.0, 300.0).children([
            el("h1", "hero-title", 240.0, 80.0).children(
                ["Green", "Trust", " Marketplace"]
                    .map(|t| el("span", "", 240.0, 80.0).text(t)),
            ),
            el("p", "hero-subtitle", 340.0, 60.0).text(
                "Empowering sustainable living through a trusted platform to buy, sell, and trade.",
            ),
            el("a", "hero-button", 430.0, 50.0).text("Start Exploring"),
        ]),
    ])
}

fn mission() -> ElementDef {
    let paragraphs = [
        "GreenTrust is your go-to marketplace for buying, selling, and trading goods of all kinds.",
        "We make trading seamless and secure with verified users and transparent listings.",
        "Our green points system rewards sustainable choices and eco-friendly trading.",
        "Join our community to trade smarter and contribute to a more sustainable future.",
    ];
    section("mission", 800.0, 700.0, None).child(
        el("div", "mission-content", 860.0, 580.0).children([
            column(el("div", "mission-text", 860.0, 560.0), 0, 2).children(
                std::iter::once(el("h2", "", 860.0, 50.0).text("Our Mission")).chain(
                    paragraphs.iter().enumerate().map(|(i, t)| {
                        el("p", "", 930.0 + i as f64 * 110.0, 90.0).text(*t)
                    }),
                ),
            ),
            column(el("img", "mission-image", 880.0, 420.0), 1, 2),
        ]),
    )
}

fn stats() -> ElementDef {
    let cards = [("5000", "Trades Completed"), ("10000", "Users Engaged"), ("2000", "Tons Saved")];
    section("stats", 1500.0, 450.0, Some("Our Impact")).child(
        el("div", "stats-content", 1600.0, 250.0).children(cards.iter().enumerate().map(
            |(i, (target, label))| {
                column(el("div", "stat-card", 1600.0, 250.0), i, cards.len()).children([
                    el("h3", "stat-number", 1640.0, 60.0)
                        .data("target", *target)
                        .text("0"),
                    el("p", "", 1720.0, 40.0).text(*label),
                ])
            },
        )),
    )
}

fn features() -> ElementDef {
    let cards = [
        ("Versatile Trading", "Buy, sell, or trade anything in one trusted platform."),
        ("Built on Trust", "Verified users and clear listings keep every trade secure."),
        ("Green Rewards", "Earn green points for sustainable trades."),
    ];
    section("features", 1950.0, 700.0, Some("Why GreenTrust?")).child(
        el("div", "features-content", 2050.0, 500.0).children(cards.iter().enumerate().map(
            |(i, (title, text))| {
                column(el("div", "feature-card", 2050.0, 500.0), i, cards.len()).children([
                    el("svg", "feature-svg", 2070.0, 200.0)
                        .child(el("path", "", 2070.0, 200.0)),
                    el("h3", "feature-title", 2290.0, 40.0).text(*title),
                    el("p", "feature-text", 2340.0, 120.0).text(*text),
                ])
            },
        )),
    )
}

fn testimonials() -> ElementDef {
    let quotes = [
        ("GreenTrust makes trading so easy, and I love earning green points!", "Emma, Entrepreneur"),
        ("The trust and community here make every transaction a breeze.", "Liam, Sustainability Advocate"),
    ];
    section("testimonials", 2650.0, 500.0, Some("Our Community")).child(
        el("div", "testimonials-content", 2750.0, 250.0).children(quotes.iter().enumerate().map(
            |(i, (quote, who))| {
                column(el("div", "testimonial-card", 2750.0, 250.0), i, quotes.len()).children([
                    el("p", "", 2770.0, 120.0).text(*quote),
                    el("h4", "", 2900.0, 40.0).text(*who),
                ])
            },
        )),
    )
}

fn team() -> ElementDef {
    let members = [
        ("Suraj Malhotra", "Founder"),
        ("Rohan Chuhan", "Designer"),
        ("Anitha Devraj", "Developer"),
    ];
    section("team", 3150.0, 600.0, Some("Meet Our Visionaries")).child(
        el("div", "team-content", 3250.0, 400.0).children(members.iter().enumerate().map(
            |(i, (name, role))| {
                column(el("div", "team-card", 3250.0, 400.0), i, members.len()).children([
                    el("img", "", 3270.0, 200.0),
                    el("h3", "", 3490.0, 40.0).text(*name),
                    el("p", "", 3540.0, 40.0).text(*role),
                ])
            },
        )),
    )
}

fn cta_and_footer() -> [ElementDef; 2] {
    [
        section("cta", 3750.0, 400.0, None).children([
            el("h2", "", 3800.0, 60.0).text("Join the Trading Revolution"),
            el("a", "cta-button", 3900.0, 60.0).text("Get Started"),
        ]),
        el("footer", "footer", 4150.0, 200.0).child(
            el("p", "footer-note", 4200.0, 40.0)
                .text("GreenTrust: Connecting traders for a sustainable tomorrow."),
        ),
    ]
}

/// Landing-page markup with explicit layout boxes, 1200px wide and 4350px tall.
///
/// The leaf and call-to-action illustrations are not part of the markup, so their scroll
/// animations resolve to nothing.
pub fn homepage_page() -> PageDef {
    PageDef {
        children: vec![el("div", "homepage", 0.0, 4350.0)
            .children([hero(), mission(), stats(), features(), testimonials(), team()])
            .children(cta_and_footer())],
    }
}

pub fn homepage_document() -> VerdantResult<Document> {
    homepage_page().build()
}

/// The globe's container in `doc`, if present.
pub fn globe_container(doc: &Document) -> Option<NodeId> {
    let sel = SelectorList::parse(GLOBE_CONTAINER).ok()?;
    doc.query_selector(&sel)
}

#[cfg(test)]
#[path = "../../tests/unit/page/homepage.rs"]
mod tests;
