//! Minimal selector language for the configuration options.
//!
//! Supports comma separated lists of compound selectors built from an optional tag
//! (or `*`), `#id` and any number of `.class` parts, e.g. `li.item, .card#first`.
//! Combinators are rejected: containers and items are identified by their own
//! attributes, never by their ancestry.

use crate::error::SelectorError;
use std::fmt;
use std::str::FromStr;

/// Something a selector can be matched against.
pub trait SelectorSubject {
    fn tag(&self) -> &str;
    fn id(&self) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
}

/// One compound selector (`tag#id.a.b`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl CompoundSelector {
    pub fn matches<S: SelectorSubject + ?Sized>(&self, subject: &S) -> bool {
        if let Some(tag) = &self.tag {
            if !subject.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if subject.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| subject.has_class(class))
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<CompoundSelector>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let source = input.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut alternatives = Vec::new();
        let mut offset = input.len() - input.trim_start().len();
        for part in source.split(',') {
            alternatives.push(parse_compound(input, part, offset)?);
            offset += part.len() + 1;
        }

        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    /// Shorthand for a single-class selector.
    pub fn class(name: &str) -> Self {
        Self {
            source: format!(".{name}"),
            alternatives: vec![CompoundSelector {
                classes: vec![name.to_string()],
                ..Default::default()
            }],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn alternatives(&self) -> &[CompoundSelector] {
        &self.alternatives
    }

    pub fn matches<S: SelectorSubject + ?Sized>(&self, subject: &S) -> bool {
        self.alternatives.iter().any(|alt| alt.matches(subject))
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

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn parse_compound(selector: &str, part: &str, offset: usize) -> Result<CompoundSelector, SelectorError> {
    let lead = part.len() - part.trim_start().len();
    let trimmed = part.trim();
    if trimmed.is_empty() {
        return Err(SelectorError::Empty);
    }
    if trimmed.contains(|c: char| c.is_whitespace() || c == '>' || c == '+' || c == '~') {
        return Err(SelectorError::Combinator(selector.to_string()));
    }

    let base = offset + lead;
    let chars: Vec<(usize, char)> = trimmed.char_indices().collect();
    let mut compound = CompoundSelector::default();
    let mut i = 0;

    // Optional leading type selector
    if let Some(&(_, '*')) = chars.first() {
        i = 1;
    } else {
        let start = i;
        while i < chars.len() && is_name_char(chars[i].1) {
            i += 1;
        }
        if i > start {
            let tag: String = chars[start..i].iter().map(|(_, c)| *c).collect();
            compound.tag = Some(tag.to_ascii_lowercase());
        }
    }

    while i < chars.len() {
        let (pos, prefix) = chars[i];
        if prefix != '.' && prefix != '#' {
            return Err(SelectorError::UnexpectedChar {
                selector: selector.to_string(),
                ch: prefix,
                pos: base + pos,
            });
        }
        i += 1;
        let start = i;
        while i < chars.len() && is_name_char(chars[i].1) {
            i += 1;
        }
        if i == start {
            return Err(SelectorError::MissingName {
                selector: selector.to_string(),
                prefix,
                pos: base + pos,
            });
        }
        let name: String = chars[start..i].iter().map(|(_, c)| *c).collect();
        if prefix == '.' {
            compound.classes.push(name);
        } else {
            compound.id = Some(name);
        }
    }

    Ok(compound)
}
