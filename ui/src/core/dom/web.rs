//! `web-sys` backed [`Dom`] implementation.

use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, HtmlElement, SvgElement};

use super::{Dom, SVG_NS};

#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Wraps the current window's document, if there is one.
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(document))
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn create_svg_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element_ns(Some(SVG_NS), tag).ok()
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if node.set_attribute(name, value).is_err() {
            tracing::warn!(name, "rejected attribute");
        }
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let style = if let Some(el) = node.dyn_ref::<HtmlElement>() {
            el.style()
        } else if let Some(el) = node.dyn_ref::<SvgElement>() {
            el.style()
        } else {
            return;
        };
        let _ = style.set_property(property, value);
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        let _ = parent.append_child(child);
    }

    fn insert_after(&self, reference: &Element, node: &Element) {
        if let Some(parent) = reference.parent_node() {
            let _ = parent.insert_before(node, reference.next_sibling().as_ref());
        }
    }

    fn clear_children(&self, node: &Element) {
        node.set_inner_html("");
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }
}
