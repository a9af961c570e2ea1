use std::collections::BTreeMap;

use crate::dom::document::{Document, Element, NodeId};
use crate::foundation::core::Rect;
use crate::foundation::error::{VerdantError, VerdantResult};

/// Serde boundary for a page: a tree of element definitions attached under `body`.
///
/// Layout boxes are explicit (`top`/`height`, plus optional `left`/`width`); no layout engine
/// runs, so nested elements carry document-space coordinates.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PageDef {
    #[serde(default)]
    pub children: Vec<ElementDef>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ElementDef {
    pub tag: String,
    /// Space-separated class list, as in markup.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub class: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementDef>,
}

impl ElementDef {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class: String::new(),
            data: BTreeMap::new(),
            text: String::new(),
            top: 0.0,
            height: 0.0,
            left: 0.0,
            width: 0.0,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Vertical placement in document space.
    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }

    pub fn span(mut self, left: f64, width: f64) -> Self {
        self.left = left;
        self.width = width;
        self
    }

    pub fn child(mut self, child: ElementDef) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementDef>) -> Self {
        self.children.extend(children);
        self
    }

    fn validate(&self) -> VerdantResult<()> {
        if self.tag.trim().is_empty() {
            return Err(VerdantError::validation("element tag must be non-empty"));
        }
        if !(self.height >= 0.0 && self.width >= 0.0) {
            return Err(VerdantError::validation(format!(
                "element <{}> has a negative or NaN size",
                self.tag
            )));
        }
        Ok(())
    }

    fn to_element(&self) -> Element {
        let mut el = Element::new(self.tag.trim());
        el.classes = self.class.split_whitespace().map(str::to_owned).collect();
        el.dataset = self.data.clone();
        el.text = self.text.clone();
        el.layout = Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        );
        el
    }
}

impl PageDef {
    pub fn from_json(json: &str) -> VerdantResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Materializes the page into a fresh [`Document`].
    pub fn build(&self) -> VerdantResult<Document> {
        let mut doc = Document::new();
        let root = doc.root();
        for def in &self.children {
            attach(&mut doc, root, def)?;
        }
        Ok(doc)
    }
}

fn attach(doc: &mut Document, parent: NodeId, def: &ElementDef) -> VerdantResult<NodeId> {
    def.validate()?;
    let id = doc.insert_detached(def.to_element());
    doc.append_child(parent, id)?;
    for child in &def.children {
        attach(doc, id, child)?;
    }
    Ok(id)
}

#[cfg(test)]
#[path = "../../tests/unit/dom/page.rs"]
mod tests;
