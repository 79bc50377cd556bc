// SPDX-License-Identifier: MPL-2.0
//! In-memory element tree for the pages decorated by the widgets.
//!
//! A page is described in TOML as nested nodes:
//!
//! ```toml
//! title = "Gallery"
//!
//! [[body]]
//! tag = "img"
//! class = "viewer"
//! attrs = { src = "photos/a.jpg", alt = "A", "data-reveal" = "" }
//! ```
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. The tree only
//! supports what the widgets need: id and class lookup, text content,
//! CSS-like selection (see [`selector`]) and wrapping a node in a new parent.

pub mod selector;

use crate::error::{Error, Result};
use selector::Selector;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Index of a node inside its [`Document`].
pub type NodeId = usize;

/// A single element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    /// Own text, rendered before the children.
    pub text: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns a `data-*` attribute by its suffix.
    #[must_use]
    pub fn data(&self, name: &str) -> Option<&str> {
        self.attr(&format!("data-{name}"))
    }
}

#[derive(Debug, Deserialize)]
struct PageSpec {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: Vec<NodeSpec>,
}

#[derive(Debug, Deserialize)]
struct NodeSpec {
    tag: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    class: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    attrs: BTreeMap<String, String>,
    #[serde(default)]
    children: Vec<NodeSpec>,
}

/// Arena-backed element tree.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    title: String,
    base_dir: Option<PathBuf>,
}

impl Document {
    /// Reads a page file; relative URLs resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source, path.parent())
    }

    pub fn from_toml_str(source: &str, base_dir: Option<&Path>) -> Result<Self> {
        let page: PageSpec =
            toml::from_str(source).map_err(|err| Error::Page(err.to_string()))?;

        let mut document = Self {
            title: page.title,
            base_dir: base_dir.map(Path::to_path_buf),
            ..Self::default()
        };
        for spec in page.body {
            let id = document.insert(spec, None);
            document.roots.push(id);
        }
        Ok(document)
    }

    fn insert(&mut self, spec: NodeSpec, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            tag: spec.tag.to_ascii_lowercase(),
            id: spec.id.filter(|id| !id.is_empty()),
            classes: spec.class.split_whitespace().map(str::to_string).collect(),
            attrs: spec.attrs,
            text: spec.text,
            parent,
            children: Vec::new(),
        });
        for child in spec.children {
            let child_id = self.insert(child, Some(id));
            self.nodes[id].children.push(child_id);
        }
        id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    fn siblings(&self, id: NodeId) -> &[NodeId] {
        match self.parent(id) {
            Some(parent) => &self.nodes[parent].children,
            None => &self.roots,
        }
    }

    #[must_use]
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.siblings(id);
        let position = siblings.iter().position(|s| *s == id)?;
        position.checked_sub(1).map(|p| siblings[p])
    }

    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.siblings(id);
        let position = siblings.iter().position(|s| *s == id)?;
        siblings.get(position + 1).copied()
    }

    /// Siblings before `id`, nearest first.
    #[must_use]
    pub fn previous_siblings(&self, id: NodeId) -> Vec<NodeId> {
        let siblings = self.siblings(id);
        let position = siblings.iter().position(|s| *s == id).unwrap_or(0);
        siblings[..position].iter().rev().copied().collect()
    }

    /// All nodes in document (pre-)order.
    #[must_use]
    pub fn traverse(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        order
    }

    /// Descendants of `id` in document order, excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            order.push(next);
            stack.extend(self.nodes[next].children.iter().rev().copied());
        }
        order
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.traverse()
            .into_iter()
            .find(|n| self.nodes[*n].id.as_deref() == Some(id))
    }

    /// `tag` nodes carrying `class`, in document order.
    #[must_use]
    pub fn elements_with_class(&self, tag: &str, class: &str) -> Vec<NodeId> {
        self.traverse()
            .into_iter()
            .filter(|n| {
                let node = &self.nodes[*n];
                node.tag.eq_ignore_ascii_case(tag) && node.has_class(class)
            })
            .collect()
    }

    /// Nodes matched by any selector of a comma-separated list, in document
    /// order and without duplicates.
    pub fn query_all(&self, selectors: &str) -> Result<Vec<NodeId>> {
        let selectors = Selector::parse_list(selectors)?;
        Ok(self
            .traverse()
            .into_iter()
            .filter(|n| selectors.iter().any(|s| s.matches(self, *n)))
            .collect())
    }

    /// Concatenated text of a node and its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(id, &mut text);
        text
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id];
        out.push_str(&node.text);
        for child in &node.children {
            self.collect_text(*child, out);
        }
    }

    /// Inserts a new `tag` element in place of `target` and moves `target`
    /// inside it. Returns the wrapper.
    pub fn wrap(&mut self, target: NodeId, tag: &str) -> NodeId {
        let wrapper = self.nodes.len();
        let parent = self.nodes[target].parent;
        self.nodes.push(Node {
            tag: tag.to_string(),
            parent,
            children: vec![target],
            ..Node::default()
        });

        let slots = match parent {
            Some(parent) => &mut self.nodes[parent].children,
            None => &mut self.roots,
        };
        if let Some(slot) = slots.iter_mut().find(|slot| **slot == target) {
            *slot = wrapper;
        }
        self.nodes[target].parent = Some(wrapper);
        wrapper
    }

    /// Resolves a possibly relative image or link URL.
    ///
    /// Absolute URLs (`scheme://...`) and absolute paths pass through.
    #[must_use]
    pub fn resolve_url(&self, url: &str) -> String {
        if url.contains("://") || Path::new(url).is_absolute() {
            return url.to_string();
        }
        match &self.base_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(url).to_string_lossy().into_owned(),
            _ => url.to_string(),
        }
    }
}
