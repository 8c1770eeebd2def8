//! CSS-like selector parsing and matching against scene nodes.
//!
//! Supports:
//! - `"div"` - by tag
//! - `"#value"` - by ID
//! - `".gauge"` - by class
//! - `"[data-role='min']"` / `"[hidden]"` - by attribute
//! - `"*"` - any element
//! - compounds such as `"span.label-min"`
//! - descendant (`".wrap .gauge"`) and child (`".sldr > .wrap"`) combinators

use crate::scene::{NodeId, Scene};
use thiserror::Error;

/// Errors produced while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Selector is empty
    #[error("empty selector")]
    Empty,
    /// Unexpected character
    #[error("unexpected '{0}' at offset {1}")]
    UnexpectedChar(char, usize),
    /// Input ended inside a construct
    #[error("unexpected end of selector")]
    UnexpectedEnd,
}

/// One compound selector: every present part must match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    /// Tag name (`None` matches any)
    pub tag: Option<String>,
    /// Required ID
    pub id: Option<String>,
    /// Required classes
    pub classes: Vec<String>,
    /// Required attributes, optionally with a value
    pub attributes: Vec<(String, Option<String>)>,
}

impl Compound {
    fn matches(&self, scene: &Scene, node: NodeId) -> bool {
        let Some(n) = scene.node(node) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|tag| tag != n.tag()) {
            return false;
        }
        if self.id.is_some() && n.id() != self.id.as_deref() {
            return false;
        }
        if !self.classes.iter().all(|c| n.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|(name, value)| {
            let actual = if name == "class" {
                None
            } else {
                n.attribute(name)
            };
            match (actual, value) {
                (Some(actual), Some(want)) => actual == want,
                (Some(_), None) => true,
                (None, _) => false,
            }
        })
    }
}

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A single compound selector
    Compound(Compound),
    /// `ancestor descendant`
    Descendant(Box<Selector>, Compound),
    /// `parent > child`
    Child(Box<Selector>, Compound),
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Check if this selector matches a node.
    #[must_use]
    pub fn matches(&self, scene: &Scene, node: NodeId) -> bool {
        match self {
            Self::Compound(compound) => compound.matches(scene, node),
            Self::Child(parent, compound) => {
                compound.matches(scene, node)
                    && scene.parent(node).is_some_and(|p| parent.matches(scene, p))
            }
            Self::Descendant(ancestor, compound) => {
                if !compound.matches(scene, node) {
                    return false;
                }
                let mut current = scene.parent(node);
                while let Some(id) = current {
                    if ancestor.matches(scene, id) {
                        return true;
                    }
                    current = scene.parent(id);
                }
                false
            }
        }
    }
}

/// Selector parser.
struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos > start
    }

    fn parse(mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut selector = Selector::Compound(self.compound()?);
        loop {
            let had_space = self.skip_whitespace();
            match self.peek() {
                None => return Ok(selector),
                Some('>') => {
                    self.bump();
                    self.skip_whitespace();
                    selector = Selector::Child(Box::new(selector), self.compound()?);
                }
                Some(_) if had_space => {
                    selector = Selector::Descendant(Box::new(selector), self.compound()?);
                }
                Some(c) => return Err(SelectorError::UnexpectedChar(c, self.pos)),
            }
        }
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            self.bump();
        }
        if self.pos == start {
            return Err(self.peek().map_or(SelectorError::UnexpectedEnd, |c| {
                SelectorError::UnexpectedChar(c, self.pos)
            }));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let start = self.pos;

        match self.peek() {
            Some('*') => {
                self.bump();
            }
            Some(c) if c.is_alphanumeric() => {
                compound.tag = Some(self.ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.id = Some(self.ident()?);
                }
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attributes.push(self.attribute()?);
                }
                _ => break,
            }
        }

        if self.pos == start {
            return Err(self.peek().map_or(SelectorError::UnexpectedEnd, |c| {
                SelectorError::UnexpectedChar(c, self.pos)
            }));
        }
        Ok(compound)
    }

    fn attribute(&mut self) -> Result<(String, Option<String>), SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();
        let value = match self.bump() {
            Some(']') => return Ok((name, None)),
            Some('=') => {
                self.skip_whitespace();
                let value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => {
                        self.bump();
                        let rest = &self.input[self.pos..];
                        let end = rest.find(quote).ok_or(SelectorError::UnexpectedEnd)?;
                        let value = rest[..end].to_string();
                        self.pos += end + 1;
                        value
                    }
                    _ => self.ident()?,
                };
                self.skip_whitespace();
                value
            }
            Some(c) => return Err(SelectorError::UnexpectedChar(c, self.pos - c.len_utf8())),
            None => return Err(SelectorError::UnexpectedEnd),
        };
        match self.bump() {
            Some(']') => Ok((name, Some(value))),
            Some(c) => Err(SelectorError::UnexpectedChar(c, self.pos - c.len_utf8())),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }
}
