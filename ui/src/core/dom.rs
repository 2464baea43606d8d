//! DOM/SVG construction facility used by the result charts.
//!
//! Renderers only talk to the [`Dom`] trait. The browser build plugs in
//! [`WebDom`] (a thin `web-sys` wrapper), tests and native builds use
//! [`MemoryDom`], a small arena-backed element tree that can also be
//! serialised to markup.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::WebDom;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Capability set the chart renderers build their element trees with.
///
/// Handles are cheap to clone; delayed callbacks capture both the facility and
/// the nodes they will touch later.
pub trait Dom: Clone + 'static {
    type Node: Clone + 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    fn create_svg_element(&self, tag: &str) -> Option<Self::Node>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn set_text(&self, node: &Self::Node, text: &str);
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    /// Inserts `node` as the next sibling of `reference`.
    fn insert_after(&self, reference: &Self::Node, node: &Self::Node);
    fn clear_children(&self, node: &Self::Node);
    /// Whether `node` is still part of the live document.
    fn is_connected(&self, node: &Self::Node) -> bool;

    fn set_class(&self, node: &Self::Node, class: &str) {
        self.set_attribute(node, "class", class);
    }

    /// Creates an HTML element carrying `class`.
    fn element_with_class(&self, tag: &str, class: &str) -> Option<Self::Node> {
        let node = self.create_element(tag)?;
        self.set_class(&node, class);
        Some(node)
    }

    /// Creates an SVG element and applies `attributes` in order.
    fn svg_element(&self, tag: &str, attributes: &[(&str, &str)]) -> Option<Self::Node> {
        let node = self.create_svg_element(tag)?;
        for (name, value) in attributes {
            self.set_attribute(&node, name, value);
        }
        Some(node)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Html,
    Svg,
}

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    namespace: Namespace,
    attributes: BTreeMap<String, String>,
    styles: Vec<(String, String)>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(tag: &str, namespace: Namespace) -> Self {
        Self {
            tag: tag.to_string(),
            namespace,
            attributes: BTreeMap::new(),
            styles: Vec::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<NodeData>,
}

impl Tree {
    const ROOT: NodeId = NodeId(0);

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|child| *child != id);
        }
    }

    fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }
}

/// In-memory element tree. The root node plays the role of `<body>`.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    tree: Rc<RefCell<Tree>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self {
            tree: Rc::new(RefCell::new(Tree {
                nodes: vec![NodeData::new("body", Namespace::Html)],
            })),
        }
    }

    pub fn body(&self) -> NodeId {
        Tree::ROOT
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.tree.borrow().node(node).tag.clone()
    }

    pub fn namespace(&self, node: NodeId) -> Namespace {
        self.tree.borrow().node(node).namespace
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree.borrow().node(node).attributes.get(name).cloned()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree
            .borrow()
            .node(node)
            .styles
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.clone())
    }

    pub fn text(&self, node: NodeId) -> String {
        self.tree.borrow().node(node).text.clone()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.borrow().node(node).children.clone()
    }

    /// Every node under `root` (inclusive, document order) whose class list contains `class`.
    pub fn find_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(root)
            .into_iter()
            .filter(|id| {
                tree.node(*id)
                    .attributes
                    .get("class")
                    .map(|classes| classes.split_whitespace().any(|c| c == class))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Every node under `root` (inclusive, document order) with the given tag.
    pub fn find_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(root)
            .into_iter()
            .filter(|id| tree.node(*id).tag == tag)
            .collect()
    }

    /// Serialises `node` and its subtree.
    pub fn to_markup(&self, node: NodeId) -> String {
        let tree = self.tree.borrow();
        let mut out = String::new();
        write_markup(&tree, node, &mut out);
        out
    }
}

fn write_markup(tree: &Tree, id: NodeId, out: &mut String) {
    let node = tree.node(id);
    out.push('<');
    out.push_str(&node.tag);
    if node.namespace == Namespace::Svg && node.tag == "svg" {
        let _ = write!(out, " xmlns=\"{SVG_NS}\"");
    }
    for (name, value) in &node.attributes {
        let _ = write!(out, " {name}=\"{}\"", escape(value));
    }
    if !node.styles.is_empty() {
        let style = node
            .styles
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        let _ = write!(out, " style=\"{}\"", escape(&style));
    }
    out.push('>');
    out.push_str(&escape(&node.text));
    for child in &node.children {
        write_markup(tree, *child, out);
    }
    let _ = write!(out, "</{}>", node.tag);
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(Tree::ROOT)
            .into_iter()
            .find(|node| tree.node(*node).attributes.get("id").map(String::as_str) == Some(id))
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let mut tree = self.tree.borrow_mut();
        tree.nodes.push(NodeData::new(tag, Namespace::Html));
        Some(NodeId(tree.nodes.len() - 1))
    }

    fn create_svg_element(&self, tag: &str) -> Option<NodeId> {
        let mut tree = self.tree.borrow_mut();
        tree.nodes.push(NodeData::new(tag, Namespace::Svg));
        Some(NodeId(tree.nodes.len() - 1))
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.tree
            .borrow_mut()
            .node_mut(*node)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut tree = self.tree.borrow_mut();
        let styles = &mut tree.node_mut(*node).styles;
        match styles.iter_mut().find(|(name, _)| name == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => styles.push((property.to_string(), value.to_string())),
        }
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        let mut tree = self.tree.borrow_mut();
        let children = std::mem::take(&mut tree.node_mut(*node).children);
        for child in children {
            tree.node_mut(child).parent = None;
        }
        tree.node_mut(*node).text = text.to_string();
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        tree.detach(*child);
        tree.node_mut(*child).parent = Some(*parent);
        tree.node_mut(*parent).children.push(*child);
    }

    fn insert_after(&self, reference: &NodeId, node: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        let Some(parent) = tree.node(*reference).parent else {
            return;
        };
        tree.detach(*node);
        let siblings = &tree.node(parent).children;
        let position = siblings
            .iter()
            .position(|sibling| sibling == reference)
            .map(|idx| idx + 1)
            .unwrap_or(siblings.len());
        tree.node_mut(parent).children.insert(position, *node);
        tree.node_mut(*node).parent = Some(parent);
    }

    fn clear_children(&self, node: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        let children = std::mem::take(&mut tree.node_mut(*node).children);
        for child in children {
            tree.node_mut(child).parent = None;
        }
        tree.node_mut(*node).text.clear();
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        let tree = self.tree.borrow();
        let mut current = *node;
        loop {
            if current == Tree::ROOT {
                return true;
            }
            match tree.node(current).parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id_ignores_detached_nodes() {
        let dom = MemoryDom::new();
        let div = dom.create_element("div").unwrap();
        dom.set_attribute(&div, "id", "hero");
        assert!(dom.element_by_id("hero").is_none());

        dom.append_child(&dom.body(), &div);
        assert_eq!(dom.element_by_id("hero"), Some(div));
    }

    #[test]
    fn clearing_children_disconnects_the_subtree() {
        let dom = MemoryDom::new();
        let container = dom.create_element("div").unwrap();
        let child = dom.create_element("span").unwrap();
        let grandchild = dom.create_element("b").unwrap();
        dom.append_child(&dom.body(), &container);
        dom.append_child(&container, &child);
        dom.append_child(&child, &grandchild);
        assert!(dom.is_connected(&grandchild));

        dom.clear_children(&container);
        assert!(dom.children(container).is_empty());
        assert!(!dom.is_connected(&child));
        assert!(!dom.is_connected(&grandchild));
    }

    #[test]
    fn insert_after_places_node_as_next_sibling() {
        let dom = MemoryDom::new();
        let body = dom.body();
        let first = dom.create_element("video").unwrap();
        let last = dom.create_element("footer").unwrap();
        dom.append_child(&body, &first);
        dom.append_child(&body, &last);

        let inserted = dom.create_element("div").unwrap();
        dom.insert_after(&first, &inserted);
        assert_eq!(dom.children(body), vec![first, inserted, last]);
    }

    #[test]
    fn markup_escapes_text_and_lists_styles() {
        let dom = MemoryDom::new();
        let div = dom.element_with_class("div", "bar").unwrap();
        dom.set_style(&div, "width", "0%");
        dom.set_style(&div, "width", "40%");
        dom.set_text(&div, "<40>");
        assert_eq!(
            dom.to_markup(div),
            "<div class=\"bar\" style=\"width: 40%\">&lt;40&gt;</div>"
        );
    }
}
