use crate::animation::ease::Ease;
use crate::dom::document::{Document, NodeId};
use crate::dom::style::{Property, PropertyMap};
use crate::foundation::error::{VerdantError, VerdantResult};
use crate::foundation::math::{lerp, snap};

/// How many extra cycles a tween plays after the first. Serialized as an integer where `-1`
/// means forever.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Repeat {
    Count(u32),
    Infinite,
}

impl Default for Repeat {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl Repeat {
    fn extra_cycles(self) -> Option<u32> {
        match self {
            Self::Count(n) => Some(n),
            Self::Infinite => None,
        }
    }
}

impl TryFrom<i64> for Repeat {
    type Error = VerdantError;

    fn try_from(v: i64) -> VerdantResult<Self> {
        match v {
            -1 => Ok(Self::Infinite),
            n => u32::try_from(n)
                .map(Self::Count)
                .map_err(|_| VerdantError::animation(format!("repeat {n} out of range"))),
        }
    }
}

impl From<Repeat> for i64 {
    fn from(r: Repeat) -> Self {
        match r {
            Repeat::Count(n) => i64::from(n),
            Repeat::Infinite => -1,
        }
    }
}

fn default_duration() -> f64 {
    0.5
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

/// Timing of one tween. Seconds throughout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Timing {
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub delay: f64,
    /// Start offset between consecutive targets.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub stagger: f64,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub ease: Ease,
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(default_duration(), Ease::default())
    }
}

impl Timing {
    pub fn new(duration: f64, ease: Ease) -> Self {
        Self {
            duration,
            delay: 0.0,
            stagger: 0.0,
            repeat: Repeat::Count(0),
            ease,
        }
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn validate(&self) -> VerdantResult<()> {
        for (name, v) in [
            ("duration", self.duration),
            ("delay", self.delay),
            ("stagger", self.stagger),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(VerdantError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Which part of the target a tween writes.
#[derive(Clone, Debug, PartialEq)]
pub enum Channel {
    Style { from: PropertyMap, to: PropertyMap },
    /// Numeric text content, snapped to `increment` before display.
    Counter { from: f64, to: f64, increment: f64 },
}

/// Who started a tween. Used to overwrite hover tweens without touching scroll tweens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenTag {
    Scroll,
    Hover,
}

#[derive(Clone, Debug)]
pub struct Tween {
    targets: Vec<NodeId>,
    channel: Channel,
    timing: Timing,
    tag: TweenTag,
}

impl Tween {
    /// Style tween between two property maps. A property present on only one side takes its
    /// neutral value on the other.
    pub fn style(targets: Vec<NodeId>, from: &PropertyMap, to: &PropertyMap, timing: Timing) -> Self {
        let mut from = from.clone();
        let mut to = to.clone();
        let keys: Vec<Property> = from.keys().chain(to.keys()).copied().collect();
        for p in keys {
            from.entry(p).or_insert_with(|| p.neutral());
            to.entry(p).or_insert_with(|| p.neutral());
        }
        Self {
            targets,
            channel: Channel::Style { from, to },
            timing,
            tag: TweenTag::Scroll,
        }
    }

    /// Whole-number counter over the target's text.
    pub fn counter(target: NodeId, from: f64, to: f64, timing: Timing) -> Self {
        Self {
            targets: vec![target],
            channel: Channel::Counter {
                from,
                to,
                increment: 1.0,
            },
            timing,
            tag: TweenTag::Scroll,
        }
    }

    pub fn tagged(mut self, tag: TweenTag) -> Self {
        self.tag = tag;
        self
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn tag(&self) -> TweenTag {
        self.tag
    }

    /// Seconds from start until every target reached its end value; `None` when it repeats
    /// forever.
    pub fn total_duration(&self) -> Option<f64> {
        let cycles = f64::from(self.timing.repeat.extra_cycles()?) + 1.0;
        let last_offset = self.timing.stagger * self.targets.len().saturating_sub(1) as f64;
        Some(self.timing.delay + last_offset + self.timing.duration * cycles)
    }

    /// Linear progress of target `index` at `elapsed` seconds, or `None` before it starts.
    fn progress(&self, index: usize, elapsed: f64) -> Option<f64> {
        let local = elapsed - self.timing.delay - self.timing.stagger * index as f64;
        if local < 0.0 {
            return None;
        }
        let d = self.timing.duration;
        if d <= 0.0 {
            return Some(1.0);
        }
        let cycle = (local / d).floor();
        match self.timing.repeat.extra_cycles() {
            Some(extra) if cycle > f64::from(extra) => Some(1.0),
            _ => Some(local / d - cycle),
        }
    }

    /// Writes every target's value at `elapsed` seconds. Returns `true` once the tween has
    /// finished, in which case the exact end values were written.
    pub(crate) fn render(&self, doc: &mut Document, elapsed: f64) -> bool {
        let finished = self.total_duration().is_some_and(|total| elapsed >= total);
        for (i, &id) in self.targets.iter().enumerate() {
            let t = if finished {
                Some(1.0)
            } else {
                self.progress(i, elapsed)
            };
            let eased = t.map(|t| self.timing.ease.apply(t));
            self.write(doc, id, eased);
        }
        finished
    }

    /// Writes the start values to every target.
    pub(crate) fn render_start(&self, doc: &mut Document) {
        for &id in &self.targets {
            self.write(doc, id, None);
        }
    }

    fn write(&self, doc: &mut Document, id: NodeId, eased: Option<f64>) {
        match &self.channel {
            Channel::Style { from, to } => {
                let values: PropertyMap = match eased {
                    None => from.clone(),
                    Some(e) if e == 1.0 => to.clone(),
                    Some(e) => to
                        .iter()
                        .map(|(&p, &b)| (p, lerp(from.get(&p).copied().unwrap_or(b), b, e)))
                        .collect(),
                };
                doc.apply_style(id, &values);
            }
            Channel::Counter {
                from,
                to,
                increment,
            } => {
                let v = match eased {
                    None => *from,
                    Some(e) => snap(lerp(*from, *to, e), *increment),
                };
                doc.set_text(id, format_counter(v));
            }
        }
    }

    pub(crate) fn touches(&self, node: NodeId) -> bool {
        self.targets.contains(&node)
    }
}

pub(crate) fn format_counter(v: f64) -> String {
    format!("{v:.0}")
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
