use std::fmt;

use pagedom::{Content, Element};

/// An element tree rendered as an indented outline, one element per line:
/// `tag#id.class1.class2 "text" [hidden]`.
pub struct Outline<'a>(pub &'a Element);

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_element(self.0, 0, f)
    }
}

fn write_element(element: &Element, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if element.is_text_node() {
        return Ok(());
    }

    write!(f, "{:indent$}{}#{}", "", element.tag, element.id, indent = depth * 2)?;
    for class in &element.classes {
        write!(f, ".{class}")?;
    }

    let text = match &element.content {
        Content::Text(text) => Some(text.as_str()),
        Content::Children(children) => children
            .iter()
            .find(|c| c.is_text_node())
            .and_then(|c| match &c.content {
                Content::Text(text) => Some(text.as_str()),
                _ => None,
            }),
        Content::None => None,
    };
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        write!(f, " {text:?}")?;
    }
    if element.is_hidden() {
        f.write_str(" [hidden]")?;
    }
    f.write_str("\n")?;

    for child in element.child_elements() {
        write_element(child, depth + 1, f)?;
    }
    Ok(())
}
