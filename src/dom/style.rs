use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{VerdantError, VerdantResult};

/// Animatable inline style properties.
///
/// Names follow the transform shorthands the page markup was authored against
/// (`y` is a vertical offset in px, `xPercent` a horizontal offset relative to the element's
/// own width, rotations are in degrees).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Property {
    #[serde(rename = "opacity")]
    Opacity,
    #[serde(rename = "x")]
    X,
    #[serde(rename = "y")]
    Y,
    #[serde(rename = "xPercent")]
    XPercent,
    #[serde(rename = "scale")]
    Scale,
    #[serde(rename = "rotation")]
    Rotation,
    #[serde(rename = "rotationX")]
    RotationX,
    #[serde(rename = "strokeDashoffset")]
    StrokeDashOffset,
}

impl Property {
    pub const ALL: [Property; 8] = [
        Property::Opacity,
        Property::X,
        Property::Y,
        Property::XPercent,
        Property::Scale,
        Property::Rotation,
        Property::RotationX,
        Property::StrokeDashOffset,
    ];

    /// Value an element shows when the property was never written.
    pub fn neutral(self) -> f64 {
        match self {
            Self::Opacity | Self::Scale => 1.0,
            _ => 0.0,
        }
    }

    /// Rotations are angular: their terminal state is taken modulo a full turn.
    pub fn is_angular(self) -> bool {
        matches!(self, Self::Rotation | Self::RotationX)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::X => "x",
            Self::Y => "y",
            Self::XPercent => "xPercent",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
            Self::RotationX => "rotationX",
            Self::StrokeDashOffset => "strokeDashoffset",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = VerdantError;

    fn from_str(s: &str) -> VerdantResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| VerdantError::validation(format!("unknown style property '{s}'")))
    }
}

/// Property → value mapping, ordered for deterministic iteration and JSON output.
pub type PropertyMap = BTreeMap<Property, f64>;

/// Inline style of one element. Unset properties read as [`Property::neutral`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StyleMap(PropertyMap);

impl StyleMap {
    pub fn get(&self, prop: Property) -> f64 {
        self.0.get(&prop).copied().unwrap_or_else(|| prop.neutral())
    }

    pub fn set(&mut self, prop: Property, value: f64) {
        self.0.insert(prop, value);
    }

    pub fn apply(&mut self, values: &PropertyMap) {
        for (&prop, &value) in values {
            self.set(prop, value);
        }
    }

    pub fn is_set(&self, prop: Property) -> bool {
        self.0.contains_key(&prop)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f64)> + '_ {
        self.0.iter().map(|(&p, &v)| (p, v))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/style.rs"]
mod tests;
