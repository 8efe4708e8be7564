//! A small CSS-like selector engine.
//!
//! Supported forms:
//! - type selectors (`h2`) and the universal selector (`*`)
//! - class (`.title`) and id (`#intro`) selectors
//! - compounds of the above (`h3.title.large`)
//! - comma-separated groups (`h2, h3`)
//!
//! Combinators (descendant, child, sibling) are rejected at parse time.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::element::Element;

/// Errors produced while parsing a selector string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector, or one of its comma-separated groups, is empty.
    #[error("empty selector in '{0}'")]
    Empty(String),

    /// A `.` or `#` was not followed by a name.
    #[error("missing name after '{marker}' in selector '{selector}'")]
    MissingName { marker: char, selector: String },

    /// Whitespace or `>`, `+`, `~` between compounds.
    #[error("unsupported combinator in selector '{0}'")]
    UnsupportedCombinator(String),

    /// Any other character that cannot start or continue a compound.
    #[error("unexpected character '{ch}' at offset {offset} in selector '{selector}'")]
    UnexpectedChar {
        ch: char,
        offset: usize,
        selector: String,
    },
}

/// A parsed selector; matches an element if any of its groups matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    groups: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    /// `None` for the universal selector or a compound without a type.
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if &element.tag != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if &element.id != id {
                return false;
            }
        }
        self.classes.iter().all(|c| element.has_class(c))
    }
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let source = input.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty(input.to_string()));
        }

        let mut groups = Vec::new();
        let mut offset = 0;
        for raw in source.split(',') {
            let leading = raw.len() - raw.trim_start().len();
            let group = raw.trim();
            if group.is_empty() {
                return Err(SelectorError::Empty(source.to_string()));
            }
            groups.push(parse_compound(group, source, offset + leading)?);
            offset += raw.len() + 1;
        }

        Ok(Self {
            source: source.to_string(),
            groups,
        })
    }

    /// Whether `element` matches this selector. Text nodes never match.
    pub fn matches(&self, element: &Element) -> bool {
        !element.is_text_node() && self.groups.iter().any(|g| g.matches(element))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(group: &str, selector: &str, base: usize) -> Result<Compound, SelectorError> {
    let mut compound = Compound::default();
    let mut chars = group.char_indices().peekable();

    // Optional leading type or universal selector
    match chars.peek() {
        Some((_, '*')) => {
            chars.next();
        }
        Some((_, c)) if is_name_char(*c) => {
            let mut tag = String::new();
            while let Some((_, c)) = chars.peek().copied() {
                if !is_name_char(c) {
                    break;
                }
                tag.push(c.to_ascii_lowercase());
                chars.next();
            }
            compound.tag = Some(tag);
        }
        _ => {}
    }

    while let Some((offset, c)) = chars.next() {
        match c {
            '.' | '#' => {
                let mut name = String::new();
                while let Some((_, n)) = chars.peek().copied() {
                    if !is_name_char(n) {
                        break;
                    }
                    name.push(n);
                    chars.next();
                }
                if name.is_empty() {
                    return Err(SelectorError::MissingName {
                        marker: c,
                        selector: selector.to_string(),
                    });
                }
                if c == '.' {
                    compound.classes.push(name);
                } else {
                    compound.id = Some(name);
                }
            }
            c if c.is_whitespace() || c == '>' || c == '+' || c == '~' => {
                return Err(SelectorError::UnsupportedCombinator(selector.to_string()));
            }
            ch => {
                return Err(SelectorError::UnexpectedChar {
                    ch,
                    offset: base + offset,
                    selector: selector.to_string(),
                });
            }
        }
    }

    Ok(compound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type() {
        let sel = Selector::parse("H2").unwrap();
        assert!(sel.matches(&Element::new("h2")));
        assert!(!sel.matches(&Element::new("h3")));
    }

    #[test]
    fn test_parse_compound() {
        let sel = Selector::parse("h3.title#intro").unwrap();
        let hit = Element::new("h3").id("intro").class("title large");
        let miss = Element::new("h3").id("intro");
        assert!(sel.matches(&hit));
        assert!(!sel.matches(&miss));
    }

    #[test]
    fn test_parse_groups() {
        let sel = Selector::parse("h2, .faq").unwrap();
        assert!(sel.matches(&Element::new("h2")));
        assert!(sel.matches(&Element::new("dt").class("faq")));
        assert!(!sel.matches(&Element::new("dt")));
    }

    #[test]
    fn test_universal_skips_text_nodes() {
        let sel = Selector::parse("*").unwrap();
        assert!(sel.matches(&Element::div()));
        let parent = Element::p("hello").child(Element::new("em"));
        assert!(!sel.matches(&parent.child_elements()[0]));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Selector::parse("  "), Err(SelectorError::Empty(_))));
        assert!(matches!(Selector::parse("h2,"), Err(SelectorError::Empty(_))));
        assert!(matches!(
            Selector::parse("h2."),
            Err(SelectorError::MissingName { marker: '.', .. })
        ));
        assert!(matches!(
            Selector::parse("div h2"),
            Err(SelectorError::UnsupportedCombinator(_))
        ));
        assert_eq!(
            Selector::parse("h2, h[3]"),
            Err(SelectorError::UnexpectedChar {
                ch: '[',
                offset: 5,
                selector: "h2, h[3]".to_string(),
            })
        );
    }
}
