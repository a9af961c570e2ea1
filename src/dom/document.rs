use std::collections::BTreeMap;

use crate::dom::selector::SelectorList;
use crate::dom::style::{Property, PropertyMap, StyleMap};
use crate::foundation::core::Rect;
use crate::foundation::error::{VerdantError, VerdantResult};

/// Handle to an element of a [`Document`]. Handles stay valid after the element is detached.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

#[derive(Clone, Debug)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    pub classes: Vec<String>,
    /// `data-*` attributes, keyed without the `data-` prefix.
    pub dataset: BTreeMap<String, String>,
    pub text: String,
    pub style: StyleMap,
    /// Document-space layout box (y grows downward).
    pub layout: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            classes: Vec::new(),
            dataset: BTreeMap::new(),
            text: String::new(),
            style: StyleMap::default(),
            layout: Rect::ZERO,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// In-memory element tree standing in for the host page's DOM.
///
/// Elements are never freed: removing one only detaches it, so handles held by callbacks can
/// still be inspected (and are reported as disconnected).
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            root: NodeId(0),
        }
    }

    /// The `body` element. Everything connected descends from it.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.insert_detached(Element::new(tag))
    }

    /// Adds a detached element. Parent/child links in `el` are ignored.
    pub fn insert_detached(&mut self, mut el: Element) -> NodeId {
        el.parent = None;
        el.children.clear();
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(el);
        id
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0 as usize)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        (id.0 as usize) < self.nodes.len()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.element(id).and_then(|el| el.parent)
    }

    /// Appends `child` as the last child of `parent`, moving it if it already has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> VerdantResult<()> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(VerdantError::dom("append_child: unknown node"));
        }
        if parent == child || self.is_descendant_of(parent, child) {
            return Err(VerdantError::dom(
                "append_child: a node cannot be appended inside itself",
            ));
        }
        self.detach(child);
        self.nodes[child.0 as usize].parent = Some(parent);
        self.nodes[parent.0 as usize].children.push(child);
        Ok(())
    }

    /// Removes `child` from `parent`. Fails when `child` is not currently a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> VerdantResult<()> {
        if self.parent(child) != Some(parent) {
            return Err(VerdantError::dom(format!(
                "remove_child: {child:?} is not a child of {parent:?}"
            )));
        }
        self.detach(child);
        Ok(())
    }

    /// Detaches `id` from its parent. Returns whether anything changed.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        self.nodes[parent.0 as usize].children.retain(|&c| c != id);
        self.nodes[id.0 as usize].parent = None;
        true
    }

    /// Whether `id` is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let mut cursor = Some(id);
        while let Some(n) = cursor {
            if n == self.root {
                return true;
            }
            cursor = self.parent(n);
        }
        false
    }

    /// Strict descendant test (`id != ancestor`).
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.parent(id);
        while let Some(n) = cursor {
            if n == ancestor {
                return true;
            }
            cursor = self.parent(n);
        }
        false
    }

    /// Connected elements matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &SelectorList) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(self.root, &mut |id| {
            if selector.matches(self, id) {
                out.push(id);
            }
        });
        out
    }

    pub fn query_selector(&self, selector: &SelectorList) -> Option<NodeId> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Descendants of `scope` matching `selector`, in document order.
    pub fn query_selector_all_within(&self, scope: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(scope) {
            return out;
        }
        self.walk(scope, &mut |id| {
            if selector.matches_within(self, id, scope) {
                out.push(id);
            }
        });
        out
    }

    pub fn query_selector_within(&self, scope: NodeId, selector: &SelectorList) -> Option<NodeId> {
        self.query_selector_all_within(scope, selector)
            .into_iter()
            .next()
    }

    fn walk(&self, from: NodeId, f: &mut dyn FnMut(NodeId)) {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            f(id);
            if let Some(el) = self.element(id) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
    }

    pub fn style(&self, id: NodeId, prop: Property) -> Option<f64> {
        self.element(id).map(|el| el.style.get(prop))
    }

    /// Writes one inline style property. Returns `false` for unknown nodes.
    pub fn set_style(&mut self, id: NodeId, prop: Property, value: f64) -> bool {
        match self.element_mut(id) {
            Some(el) => {
                el.style.set(prop, value);
                true
            }
            None => false,
        }
    }

    pub fn apply_style(&mut self, id: NodeId, values: &PropertyMap) -> bool {
        match self.element_mut(id) {
            Some(el) => {
                el.style.apply(values);
                true
            }
            None => false,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.text.as_str())
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> bool {
        match self.element_mut(id) {
            Some(el) => {
                el.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn data(&self, id: NodeId, key: &str) -> Option<&str> {
        self.element(id)
            .and_then(|el| el.dataset.get(key))
            .map(String::as_str)
    }

    pub fn layout(&self, id: NodeId) -> Option<Rect> {
        self.element(id).map(|el| el.layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/document.rs"]
mod tests;
