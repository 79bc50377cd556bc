// SPDX-License-Identifier: MPL-2.0
//! A small CSS selector subset used for caption lookup.
//!
//! Supported: type (`figcaption`), universal (`*`), id (`#x`), class (`.x`),
//! attribute presence or equality (`[data-x]`, `[data-x=y]`), the four
//! combinators (descendant, `>`, `+`, `~`) and comma-separated lists.

use super::{Document, NodeId};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
    Adjacent,
    Sibling,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn matches(&self, document: &Document, node: NodeId) -> bool {
        let node = document.node(node);
        if let Some(tag) = &self.tag {
            if tag != "*" && !tag.eq_ignore_ascii_case(&node.tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| node.has_class(class)) {
            return false;
        }
        self.attrs.iter().all(|(name, value)| match value {
            Some(expected) => node.attr(name) == Some(expected.as_str()),
            None => node.attr(name).is_some(),
        })
    }
}

/// One complex selector: compounds joined by combinators, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// The combinator of the first entry is unused.
    parts: Vec<(Combinator, Compound)>,
}

impl Selector {
    /// Parses a comma-separated selector list.
    pub fn parse_list(source: &str) -> Result<Vec<Selector>> {
        source
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Selector::parse)
            .collect()
    }

    /// Parses a single complex selector.
    pub fn parse(source: &str) -> Result<Selector> {
        let mut parts = Vec::new();
        let mut pending = Combinator::Descendant;
        let mut chars = source.trim().chars().peekable();

        while let Some(&c) = chars.peek() {
            match c {
                c if c.is_whitespace() => {
                    chars.next();
                }
                '>' | '+' | '~' => {
                    chars.next();
                    pending = match c {
                        '>' => Combinator::Child,
                        '+' => Combinator::Adjacent,
                        _ => Combinator::Sibling,
                    };
                }
                _ => {
                    let compound = parse_compound(&mut chars, source)?;
                    parts.push((pending, compound));
                    pending = Combinator::Descendant;
                }
            }
        }

        if parts.is_empty() {
            return Err(Error::Page(format!("empty selector `{source}`")));
        }
        Ok(Selector { parts })
    }

    /// Returns true if `node` is matched by this selector.
    pub fn matches(&self, document: &Document, node: NodeId) -> bool {
        self.matches_at(document, node, self.parts.len() - 1)
    }

    fn matches_at(&self, document: &Document, node: NodeId, index: usize) -> bool {
        let (combinator, compound) = &self.parts[index];
        if !compound.matches(document, node) {
            return false;
        }
        if index == 0 {
            return true;
        }

        let previous = index - 1;
        match combinator {
            Combinator::Child => document
                .parent(node)
                .is_some_and(|parent| self.matches_at(document, parent, previous)),
            Combinator::Descendant => {
                let mut current = document.parent(node);
                while let Some(ancestor) = current {
                    if self.matches_at(document, ancestor, previous) {
                        return true;
                    }
                    current = document.parent(ancestor);
                }
                false
            }
            Combinator::Adjacent => document
                .previous_sibling(node)
                .is_some_and(|sibling| self.matches_at(document, sibling, previous)),
            Combinator::Sibling => document
                .previous_siblings(node)
                .into_iter()
                .any(|sibling| self.matches_at(document, sibling, previous)),
        }
    }
}

fn parse_compound(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    source: &str,
) -> Result<Compound> {
    let mut compound = Compound::default();

    loop {
        match chars.peek().copied() {
            Some('#') => {
                chars.next();
                compound.id = Some(read_ident(chars, source)?);
            }
            Some('.') => {
                chars.next();
                compound.classes.push(read_ident(chars, source)?);
            }
            Some('[') => {
                chars.next();
                let body: String = chars.by_ref().take_while(|c| *c != ']').collect();
                let (name, value) = match body.split_once('=') {
                    Some((name, value)) => (
                        name.trim().to_string(),
                        Some(value.trim().trim_matches(['"', '\'']).to_string()),
                    ),
                    None => (body.trim().to_string(), None),
                };
                if name.is_empty() {
                    return Err(Error::Page(format!("empty attribute in `{source}`")));
                }
                compound.attrs.push((name, value));
            }
            Some('*') if compound.is_empty() => {
                chars.next();
                compound.tag = Some("*".to_string());
            }
            Some(c) if is_ident_char(c) && compound.is_empty() => {
                compound.tag = Some(read_ident(chars, source)?);
            }
            _ => break,
        }
    }

    if compound.is_empty() {
        return Err(Error::Page(format!("unexpected character in `{source}`")));
    }
    Ok(compound)
}

fn read_ident(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    source: &str,
) -> Result<String> {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    if ident.is_empty() {
        return Err(Error::Page(format!("missing name in `{source}`")));
    }
    Ok(ident)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
