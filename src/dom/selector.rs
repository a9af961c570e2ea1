use std::fmt;
use std::str::FromStr;

use crate::dom::document::{Document, NodeId};
use crate::foundation::error::{VerdantError, VerdantResult};

/// One compound selector: an optional tag name plus zero or more classes (`p`, `.card`,
/// `svg.leaf`).
#[derive(Clone, Debug, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(src: &str) -> VerdantResult<Self> {
        let mut parts = src.split('.');
        let head = parts.next().unwrap_or_default();
        let tag = if head.is_empty() {
            None
        } else {
            check_ident(head, src)?;
            Some(head.to_ascii_lowercase())
        };

        let mut classes = Vec::new();
        for class in parts {
            check_ident(class, src)?;
            classes.push(class.to_owned());
        }

        if tag.is_none() && classes.is_empty() {
            return Err(VerdantError::selector(format!("empty compound in '{src}'")));
        }
        Ok(Self { tag, classes })
    }

    fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some(el) = doc.element(id) else {
            return false;
        };
        if let Some(tag) = &self.tag
            && el.tag != *tag
        {
            return false;
        }
        self.classes.iter().all(|c| el.has_class(c))
    }
}

fn check_ident(ident: &str, src: &str) -> VerdantResult<()> {
    let ok = !ident.is_empty()
        && ident
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(VerdantError::selector(format!(
            "invalid identifier '{ident}' in '{src}'"
        )))
    }
}

/// Compounds joined by descendant combinators (`.feature-svg path`).
#[derive(Clone, Debug, PartialEq, Eq)]
struct Complex {
    compounds: Vec<Compound>,
}

impl Complex {
    fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some((last, rest)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(doc, id) {
            return false;
        }

        // Descendant-only combinators: greedy nearest-ancestor matching is exact.
        let mut cursor = doc.parent(id);
        for compound in rest.iter().rev() {
            loop {
                let Some(anc) = cursor else {
                    return false;
                };
                cursor = doc.parent(anc);
                if compound.matches(doc, anc) {
                    break;
                }
            }
        }
        true
    }
}

/// A comma-separated selector list restricted to tag, class and descendant selectors.
///
/// Serialized as its source text, so descriptor tables stay human-editable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    source: String,
    alternatives: Vec<Complex>,
}

impl SelectorList {
    pub fn parse(src: &str) -> VerdantResult<Self> {
        let mut alternatives = Vec::new();
        for alt in src.split(',') {
            let compounds = alt
                .split_whitespace()
                .map(Compound::parse)
                .collect::<VerdantResult<Vec<_>>>()?;
            if compounds.is_empty() {
                return Err(VerdantError::selector(format!(
                    "empty selector in list '{src}'"
                )));
            }
            alternatives.push(Complex { compounds });
        }
        Ok(Self {
            source: src.trim().to_owned(),
            alternatives,
        })
    }

    /// A list of single-class alternatives (`.a, .b`).
    pub fn any_class(classes: &[&str]) -> Self {
        let alternatives = classes
            .iter()
            .map(|class| Complex {
                compounds: vec![Compound {
                    tag: None,
                    classes: vec![(*class).to_owned()],
                }],
            })
            .collect();
        let source = classes
            .iter()
            .map(|class| format!(".{class}"))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            source,
            alternatives,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `id` matches any alternative.
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        self.alternatives.iter().any(|c| c.matches(doc, id))
    }

    /// Element-scoped matching: `id` must be a strict descendant of `scope`. Ancestor
    /// compounds may still match outside the scope, as with an element-level query.
    pub(crate) fn matches_within(&self, doc: &Document, id: NodeId, scope: NodeId) -> bool {
        doc.is_descendant_of(id, scope) && self.matches(doc, id)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for SelectorList {
    type Err = VerdantError;

    fn from_str(s: &str) -> VerdantResult<Self> {
        Self::parse(s)
    }
}

impl serde::Serialize for SelectorList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> serde::Deserialize<'de> for SelectorList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/selector.rs"]
mod tests;
