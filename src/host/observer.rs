use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::dom::document::{Document, NodeId};
use crate::foundation::core::Rect;
use crate::foundation::error::{VerdantError, VerdantResult};
use crate::host::environment::Host;

/// Activation threshold of a scroll-visibility observer, written `"<element> <viewport>"`.
///
/// `"top 80%"` activates once the anchor's top edge scrolls up to 80% of the viewport height
/// (measured from the viewport top). Each side accepts `top`, `center`, `bottom` or a
/// percentage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerStart {
    /// Position on the anchor element, as a fraction of its height from its top edge.
    pub element: f64,
    /// Position in the viewport, as a fraction of its height from its top edge.
    pub viewport: f64,
}

impl TriggerStart {
    pub const fn new(element: f64, viewport: f64) -> Self {
        Self { element, viewport }
    }

    /// Whether an anchor laid out at `layout` is past the threshold at scroll offset `scroll_y`.
    pub fn is_active(self, layout: Rect, scroll_y: f64, viewport_height: f64) -> bool {
        let anchor_y = layout.y0 + layout.height() * self.element;
        anchor_y - scroll_y <= viewport_height * self.viewport
    }
}

impl Default for TriggerStart {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

fn parse_position(token: &str) -> VerdantResult<f64> {
    match token {
        "top" => Ok(0.0),
        "center" => Ok(0.5),
        "bottom" => Ok(1.0),
        _ => {
            let pct = token.strip_suffix('%').ok_or_else(|| {
                VerdantError::validation(format!("trigger position '{token}' is not a keyword or %"))
            })?;
            let v: f64 = pct.parse().map_err(|_| {
                VerdantError::validation(format!("trigger position '{token}' is not a number"))
            })?;
            if !v.is_finite() {
                return Err(VerdantError::validation(format!(
                    "trigger position '{token}' is not finite"
                )));
            }
            Ok(v / 100.0)
        }
    }
}

fn fmt_position(v: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if v == 0.0 {
        f.write_str("top")
    } else if v == 0.5 {
        f.write_str("center")
    } else if v == 1.0 {
        f.write_str("bottom")
    } else {
        write!(f, "{}%", v * 100.0)
    }
}

impl FromStr for TriggerStart {
    type Err = VerdantError;

    fn from_str(s: &str) -> VerdantResult<Self> {
        let mut tokens = s.split_whitespace();
        let (Some(el), Some(vp), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(VerdantError::validation(format!(
                "trigger start '{s}' must be '<element> <viewport>'"
            )));
        };
        Ok(Self::new(parse_position(el)?, parse_position(vp)?))
    }
}

impl fmt::Display for TriggerStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_position(self.element, f)?;
        f.write_str(" ")?;
        fmt_position(self.viewport, f)
    }
}

impl serde::Serialize for TriggerStart {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for TriggerStart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(pub u64);

/// Threshold crossing reported to an observer callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityChange {
    /// Scrolling down moved the anchor past the threshold.
    Enter,
    /// Scrolling back up moved the anchor above the threshold again.
    LeaveBack,
}

pub type VisibilityCallback = Rc<dyn Fn(&mut Host, VisibilityChange)>;

pub(crate) struct Observer {
    anchor: NodeId,
    start: TriggerStart,
    active: bool,
    cb: VisibilityCallback,
}

#[derive(Default)]
pub(crate) struct Observers {
    next: u64,
    map: BTreeMap<ObserverId, Observer>,
}

impl Observers {
    pub(crate) fn insert(
        &mut self,
        anchor: NodeId,
        start: TriggerStart,
        cb: VisibilityCallback,
    ) -> ObserverId {
        self.next = self.next.saturating_add(1);
        let id = ObserverId(self.next);
        self.map.insert(
            id,
            Observer {
                anchor,
                start,
                active: false,
                cb,
            },
        );
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        self.map.remove(&id).is_some()
    }

    pub(crate) fn contains(&self, id: ObserverId) -> bool {
        self.map.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// Recomputes every observer against the current scroll position.
    ///
    /// Observers whose anchor left the document are dropped. Returns the crossings to
    /// dispatch, in registration order.
    pub(crate) fn evaluate(
        &mut self,
        doc: &Document,
        scroll_y: f64,
        viewport_height: f64,
    ) -> Vec<(ObserverId, VisibilityChange, VisibilityCallback)> {
        let stale: Vec<ObserverId> = self
            .map
            .iter()
            .filter(|(_, o)| !doc.is_connected(o.anchor))
            .map(|(&id, _)| id)
            .collect();
        for id in stale {
            tracing::debug!(observer = id.0, "anchor detached, dropping observer");
            self.map.remove(&id);
        }

        let mut changes = Vec::new();
        for (&id, obs) in &mut self.map {
            let Some(layout) = doc.layout(obs.anchor) else {
                continue;
            };
            let active = obs.start.is_active(layout, scroll_y, viewport_height);
            if active == obs.active {
                continue;
            }
            obs.active = active;
            let change = if active {
                VisibilityChange::Enter
            } else {
                VisibilityChange::LeaveBack
            };
            changes.push((id, change, Rc::clone(&obs.cb)));
        }
        changes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/observer.rs"]
mod tests;
