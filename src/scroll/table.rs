use crate::animation::ease::Ease;
use crate::animation::tween::{Repeat, Timing};
use crate::dom::selector::SelectorList;
use crate::dom::style::{Property, PropertyMap};
use crate::foundation::error::VerdantResult;
use crate::scroll::descriptor::{
    Anchor, AnimationDescriptor, AnimationTable, ReplayPolicy, SubEffect, Trigger,
};

use Property::{Opacity, Rotation, RotationX, Scale, XPercent, Y};

const POWER1_OUT: Ease = Ease::OutQuad;
const POWER2_OUT: Ease = Ease::OutCubic;
const POWER3_OUT: Ease = Ease::OutQuart;
const BACK_OUT: Ease = Ease::BackOut(1.7);
const ELASTIC_OUT: Ease = Ease::ElasticOut {
    amplitude: 1.0,
    period: 0.5,
};

fn props(pairs: &[(Property, f64)]) -> PropertyMap {
    pairs.iter().copied().collect()
}

fn row(
    name: &str,
    targets: &str,
    from: &[(Property, f64)],
    to: &[(Property, f64)],
    timing: Timing,
    anchor: &str,
    start: &str,
) -> VerdantResult<AnimationDescriptor> {
    Ok(AnimationDescriptor {
        name: name.to_owned(),
        targets: SelectorList::parse(targets)?,
        from: props(from),
        to: props(to),
        timing,
        trigger: Trigger {
            anchor: anchor.parse::<Anchor>()?,
            start: start.parse()?,
            replay: ReplayPolicy::Once,
        },
        effects: Vec::new(),
    })
}

impl AnimationTable {
    /// The landing page's entrance animations, section by section.
    pub fn homepage() -> VerdantResult<Self> {
        let hero = [
            row(
                "hero-title",
                ".hero-title span",
                &[(Opacity, 0.0), (Y, 50.0)],
                &[(Opacity, 1.0), (Y, 0.0)],
                Timing::new(0.8, POWER3_OUT).with_stagger(0.1),
                ".hero",
                "top 80%",
            )?,
            row(
                "hero-subtitle",
                ".hero-subtitle",
                &[(Opacity, 0.0), (Scale, 0.8)],
                &[(Opacity, 1.0), (Scale, 1.0)],
                Timing::new(1.0, BACK_OUT),
                ".hero",
                "top 80%",
            )?,
            row(
                "hero-button",
                ".hero-button",
                &[(Opacity, 0.0), (Scale, 0.0)],
                &[(Opacity, 1.0), (Scale, 1.0)],
                Timing::new(0.8, ELASTIC_OUT),
                ".hero",
                "top 80%",
            )?,
            row(
                "leaf-spin",
                ".leaf-svg",
                &[(Scale, 0.0), (Rotation, 0.0)],
                &[(Scale, 1.0), (Rotation, 360.0)],
                Timing::new(2.0, Ease::Linear).with_repeat(Repeat::Infinite),
                ".hero",
                "top 80%",
            )?,
        ];

        let mission = [
            row(
                "mission-text",
                ".mission-text p",
                &[(Opacity, 0.0), (Y, 30.0)],
                &[(Opacity, 1.0), (Y, 0.0)],
                Timing::new(0.6, POWER2_OUT).with_stagger(0.2),
                ".mission",
                "top 85%",
            )?,
            row(
                "mission-image",
                ".mission-image",
                &[(Opacity, 0.0), (XPercent, 50.0)],
                &[(Opacity, 1.0), (XPercent, 0.0)],
                Timing::new(1.0, POWER3_OUT),
                ".mission",
                "top 85%",
            )?,
        ];

        let mut stats = row(
            "stat-cards",
            ".stat-card",
            &[(Opacity, 0.0), (Scale, 0.8)],
            &[(Opacity, 1.0), (Scale, 1.0)],
            Timing::new(0.8, BACK_OUT),
            "each",
            "top 85%",
        )?;
        stats.effects.push(SubEffect::Counter {
            select: SelectorList::parse(".stat-number")?,
            attribute: "target".to_owned(),
            duration: 2.0,
            ease: POWER1_OUT,
            replay: ReplayPolicy::Once,
        });

        let mut features = row(
            "feature-cards",
            ".feature-card",
            &[(Opacity, 0.0), (Y, 100.0), (RotationX, 10.0)],
            &[(Opacity, 1.0), (Y, 0.0), (RotationX, 0.0)],
            Timing::new(0.8, POWER3_OUT),
            "each",
            "top 85%",
        )?;
        features.trigger.replay = ReplayPolicy::ResetOnReentry;
        features.effects.push(SubEffect::PathReveal {
            select: SelectorList::parse(".feature-svg path")?,
            from_offset: 1000.0,
            duration: 2.0,
            ease: POWER2_OUT,
            replay: ReplayPolicy::Once,
        });

        let rest = [
            row(
                "testimonials",
                ".testimonial-card p",
                &[(Opacity, 0.0), (Y, 20.0)],
                &[(Opacity, 1.0), (Y, 0.0)],
                Timing::new(0.6, POWER2_OUT).with_stagger(0.2),
                ".testimonials",
                "top 85%",
            )?,
            row(
                "team-cards",
                ".team-card",
                &[(Opacity, 0.0), (Scale, 0.9)],
                &[(Opacity, 1.0), (Scale, 1.0)],
                Timing::new(0.8, BACK_OUT),
                "each",
                "top 85%",
            )?,
            row(
                "cta-button",
                ".cta-button",
                &[(Opacity, 0.0), (Y, 50.0)],
                &[(Opacity, 1.0), (Y, 0.0)],
                Timing::new(1.0, ELASTIC_OUT),
                ".cta",
                "top 90%",
            )?,
            row(
                "cta-svg",
                ".cta-svg",
                &[(Scale, 0.5), (Opacity, 0.0)],
                &[(Scale, 1.0), (Opacity, 1.0)],
                Timing::new(1.5, POWER3_OUT),
                ".cta",
                "top 90%",
            )?,
            row(
                "footer-note",
                ".footer-note",
                &[(Opacity, 0.0), (Y, 50.0)],
                &[(Opacity, 1.0), (Y, 0.0)],
                Timing::new(1.0, POWER3_OUT),
                ".footer",
                "top 95%",
            )?,
        ];

        let descriptors = hero
            .into_iter()
            .chain(mission)
            .chain([stats, features])
            .chain(rest)
            .collect();
        Self::new(descriptors)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/table.rs"]
mod tests;
