use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::animation::ease::Ease;
use crate::animation::tween::Timing;
use crate::dom::selector::SelectorList;
use crate::dom::style::{Property, PropertyMap};
use crate::foundation::error::{VerdantError, VerdantResult};
use crate::host::observer::TriggerStart;

/// Element whose visibility fires a trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Every matched target anchors its own binding.
    Each,
    /// The first match anchors one binding shared by all targets.
    Selector(SelectorList),
}

impl FromStr for Anchor {
    type Err = VerdantError;

    fn from_str(s: &str) -> VerdantResult<Self> {
        match s.trim() {
            "each" => Ok(Self::Each),
            other => Ok(Self::Selector(SelectorList::parse(other)?)),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Each => f.write_str("each"),
            Self::Selector(sel) => fmt::Display::fmt(sel, f),
        }
    }
}

impl serde::Serialize for Anchor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Anchor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayPolicy {
    /// Plays on the first entry and holds its end state.
    #[default]
    Once,
    /// Returns to the start state when the anchor scrolls back above the threshold and plays
    /// again on the next entry.
    ResetOnReentry,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trigger {
    pub anchor: Anchor,
    pub start: TriggerStart,
    #[serde(default)]
    pub replay: ReplayPolicy,
}

fn default_counter_attribute() -> String {
    "target".to_owned()
}

fn default_reveal_offset() -> f64 {
    1000.0
}

/// Secondary tween resolved inside every matched target and started together with the
/// target's own tween.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubEffect {
    /// Counts the first `select` match's text from 0 up to the integer in its
    /// `data-<attribute>`.
    Counter {
        select: SelectorList,
        #[serde(default = "default_counter_attribute")]
        attribute: String,
        duration: f64,
        #[serde(default)]
        ease: Ease,
        #[serde(default)]
        replay: ReplayPolicy,
    },
    /// Draws every `select` match's stroke by animating its dash offset down to 0.
    PathReveal {
        select: SelectorList,
        #[serde(default = "default_reveal_offset")]
        from_offset: f64,
        duration: f64,
        #[serde(default)]
        ease: Ease,
        #[serde(default)]
        replay: ReplayPolicy,
    },
}

impl SubEffect {
    pub fn select(&self) -> &SelectorList {
        match self {
            Self::Counter { select, .. } | Self::PathReveal { select, .. } => select,
        }
    }

    pub fn replay(&self) -> ReplayPolicy {
        match self {
            Self::Counter { replay, .. } | Self::PathReveal { replay, .. } => *replay,
        }
    }

    /// Timing for a sub-effect that starts `delay` seconds after its trigger.
    pub fn timing(&self, delay: f64) -> Timing {
        let (Self::Counter { duration, ease, .. } | Self::PathReveal { duration, ease, .. }) = self;
        Timing::new(*duration, *ease).with_delay(delay)
    }

    fn validate(&self) -> VerdantResult<()> {
        self.timing(0.0).validate()?;
        if let Self::PathReveal { from_offset, .. } = self
            && !from_offset.is_finite()
        {
            return Err(VerdantError::validation("path reveal offset must be finite"));
        }
        Ok(())
    }
}

/// One row of the animation table.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationDescriptor {
    pub name: String,
    pub targets: SelectorList,
    #[serde(default)]
    pub from: PropertyMap,
    #[serde(default)]
    pub to: PropertyMap,
    #[serde(default)]
    pub timing: Timing,
    pub trigger: Trigger,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<SubEffect>,
}

impl AnimationDescriptor {
    /// State written before the trigger fires. Properties named only in `to` start neutral.
    pub fn start_state(&self) -> PropertyMap {
        merged(&self.from, &self.to)
    }

    /// State the tween ends in, which reduced motion assigns directly. Properties named only
    /// in `from` end neutral.
    pub fn terminal_state(&self) -> PropertyMap {
        merged(&self.to, &self.from)
    }

    pub fn validate(&self) -> VerdantResult<()> {
        if self.name.trim().is_empty() {
            return Err(VerdantError::validation("descriptor name must be non-empty"));
        }
        let ctx = |e: VerdantError| VerdantError::validation(format!("descriptor '{}': {e}", self.name));
        self.timing.validate().map_err(ctx)?;
        for (p, v) in self.from.iter().chain(self.to.iter()) {
            if !v.is_finite() {
                return Err(ctx(VerdantError::validation(format!("{p} is not finite"))));
            }
        }
        for effect in &self.effects {
            effect.validate().map_err(ctx)?;
        }
        Ok(())
    }
}

fn merged(primary: &PropertyMap, other: &PropertyMap) -> PropertyMap {
    let mut out = primary.clone();
    for &p in other.keys() {
        out.entry(p).or_insert_with(|| Property::neutral(p));
    }
    out
}

/// Ordered descriptor table. Serialized as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AnimationTable {
    descriptors: Vec<AnimationDescriptor>,
}

impl AnimationTable {
    pub fn new(descriptors: Vec<AnimationDescriptor>) -> VerdantResult<Self> {
        let table = Self { descriptors };
        table.validate()?;
        Ok(table)
    }

    pub fn from_json(json: &str) -> VerdantResult<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn to_json_pretty(&self) -> VerdantResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> VerdantResult<()> {
        let mut names = BTreeSet::new();
        for d in &self.descriptors {
            d.validate()?;
            if !names.insert(d.name.as_str()) {
                return Err(VerdantError::validation(format!(
                    "duplicate descriptor name '{}'",
                    d.name
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&AnimationDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/descriptor.rs"]
mod tests;
