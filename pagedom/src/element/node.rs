use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

const TEXT_NODE_TAG: &str = "#text";

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Inline display state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Shown,
    Hidden,
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,

    // Content
    pub content: Content,

    // Markup
    /// Class list in insertion order. Never contains duplicates when
    /// mutated through the builder or `Page`.
    pub classes: Vec<String>,
    pub attrs: HashMap<String, String>,

    // Visual
    pub display: Display,

    // Custom data storage (behavior markers, etc.)
    pub data: HashMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: "div".to_string(),
            content: Content::None,
            classes: Vec::new(),
            attrs: HashMap::new(),
            display: Display::Shown,
            data: HashMap::new(),
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn p(text: impl Into<String>) -> Self {
        Self::new("p").text(text)
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(format!("h{}", level.clamp(1, 6))).text(text)
    }

    /// An anonymous text node.
    pub fn text_node(text: impl Into<String>) -> Self {
        Self::new(TEXT_NODE_TAG).text(text)
    }

    /// Create an anchor with the given `href`.
    pub fn link(href: impl Into<String>) -> Self {
        Self::new("a").attr("href", href)
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Markup
    pub fn class(mut self, class: impl Into<String>) -> Self {
        for name in class.into().split_whitespace() {
            if !self.has_class(name) {
                self.classes.push(name.to_string());
            }
        }
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Anonymous text node created when children are appended to an
    /// element that held text.
    pub fn is_text_node(&self) -> bool {
        self.tag == TEXT_NODE_TAG
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// True for `<a>` elements carrying an `href`, i.e. clicks on them
    /// navigate unless the default action is prevented.
    pub fn is_navigable_link(&self) -> bool {
        self.tag == "a" && self.attrs.contains_key("href")
    }

    // Visual
    pub fn hidden(mut self) -> Self {
        self.display = Display::Hidden;
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.display == Display::Hidden
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    /// Text of this element and all its descendants, concatenated in
    /// document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        for child in new_children {
            self.push_child(child);
        }
        self
    }

    /// Append a child in place. Text content is kept as a leading text node.
    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            Content::Text(text) => {
                let text_node = Element::text_node(std::mem::take(text));
                self.content = Content::Children(vec![text_node, child]);
            }
        }
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }
}

fn collect_text(element: &Element, out: &mut String) {
    match &element.content {
        Content::None => {}
        Content::Text(text) => out.push_str(text),
        Content::Children(children) => {
            for child in children {
                collect_text(child, out);
            }
        }
    }
}
