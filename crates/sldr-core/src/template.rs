//! Markup fragment parser used to build widget structure.
//!
//! Understands the small subset of HTML widget templates use: nested
//! elements, quoted or bare attributes, self-closing tags, comments and
//! text. Whitespace-only text between elements is dropped.

use thiserror::Error;

/// Errors produced while parsing a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Template contains no element
    #[error("template is empty")]
    Empty,
    /// Input ended inside a construct
    #[error("unexpected end of template, expected {expected}")]
    UnexpectedEof {
        /// What the parser was looking for
        expected: &'static str,
    },
    /// Character not valid at this position
    #[error("unexpected '{found}' at offset {offset}")]
    UnexpectedChar {
        /// Offending character
        found: char,
        /// Byte offset into the template
        offset: usize,
    },
    /// Closing tag does not match the open element
    #[error("mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        /// Tag that is open
        expected: String,
        /// Tag that was closed
        found: String,
    },
    /// More than one top-level element, or text beside the root
    #[error("template must have exactly one root element")]
    MultipleRoots,
}

/// A parsed element, before it is placed into a scene.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Tag name, lowercased
    pub tag: String,
    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
    /// Concatenated non-whitespace text content
    pub text: String,
    /// Child elements
    pub children: Vec<Element>,
}

/// Parse a fragment with exactly one root element.
///
/// # Errors
///
/// Returns a [`TemplateError`] describing the first problem found.
pub fn parse_fragment(input: &str) -> Result<Element, TemplateError> {
    let mut parser = Parser { input, pos: 0 };
    let mut roots = Vec::new();

    loop {
        let text = parser.text();
        if !text.trim().is_empty() {
            return Err(TemplateError::MultipleRoots);
        }
        if parser.at_end() {
            break;
        }
        if parser.skip_comment()? {
            continue;
        }
        roots.push(parser.element()?);
    }

    match roots.len() {
        0 => Err(TemplateError::Empty),
        1 => Ok(roots.remove(0)),
        _ => Err(TemplateError::MultipleRoots),
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, want: char, expected: &'static str) -> Result<(), TemplateError> {
        match self.peek() {
            Some(c) if c == want => {
                self.bump();
                Ok(())
            }
            Some(found) => Err(TemplateError::UnexpectedChar {
                found,
                offset: self.pos,
            }),
            None => Err(TemplateError::UnexpectedEof { expected }),
        }
    }

    /// Consume text up to the next `<`.
    fn text(&mut self) -> &str {
        let start = self.pos;
        let len = self.rest().find('<').unwrap_or(self.rest().len());
        self.pos += len;
        &self.input[start..self.pos]
    }

    fn skip_comment(&mut self) -> Result<bool, TemplateError> {
        if !self.rest().starts_with("<!--") {
            return Ok(false);
        }
        match self.rest()[4..].find("-->") {
            Some(end) => {
                self.pos += 4 + end + 3;
                Ok(true)
            }
            None => Err(TemplateError::UnexpectedEof { expected: "-->" }),
        }
    }

    fn name(&mut self, expected: &'static str) -> Result<String, TemplateError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
        {
            self.bump();
        }
        if self.pos == start {
            return match self.peek() {
                Some(found) => Err(TemplateError::UnexpectedChar {
                    found,
                    offset: self.pos,
                }),
                None => Err(TemplateError::UnexpectedEof { expected }),
            };
        }
        Ok(self.input[start..self.pos].to_ascii_lowercase())
    }

    fn attribute_value(&mut self) -> Result<String, TemplateError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let len = self
                    .rest()
                    .find(quote)
                    .ok_or(TemplateError::UnexpectedEof {
                        expected: "closing quote",
                    })?;
                let value = self.rest()[..len].to_string();
                self.pos += len + 1;
                Ok(value)
            }
            Some(_) => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| !c.is_whitespace() && c != '>' && c != '/')
                {
                    self.bump();
                }
                Ok(self.input[start..self.pos].to_string())
            }
            None => Err(TemplateError::UnexpectedEof {
                expected: "attribute value",
            }),
        }
    }

    fn element(&mut self) -> Result<Element, TemplateError> {
        self.expect('<', "'<'")?;
        let mut element = Element {
            tag: self.name("tag name")?,
            ..Element::default()
        };

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('>') => {
                    self.bump();
                    break;
                }
                Some('/') => {
                    self.bump();
                    self.expect('>', "'>'")?;
                    return Ok(element);
                }
                Some(_) => {
                    let name = self.name("attribute name")?;
                    self.skip_whitespace();
                    let value = if self.peek() == Some('=') {
                        self.bump();
                        self.skip_whitespace();
                        self.attribute_value()?
                    } else {
                        String::new()
                    };
                    element.attributes.push((name, value));
                }
                None => return Err(TemplateError::UnexpectedEof { expected: "'>'" }),
            }
        }

        loop {
            let text = self.text().trim();
            if !text.is_empty() {
                if !element.text.is_empty() {
                    element.text.push(' ');
                }
                element.text.push_str(text);
            }
            if self.at_end() {
                return Err(TemplateError::UnexpectedEof {
                    expected: "closing tag",
                });
            }
            if self.skip_comment()? {
                continue;
            }
            if self.rest().starts_with("</") {
                self.pos += 2;
                let found = self.name("closing tag name")?;
                self.skip_whitespace();
                self.expect('>', "'>'")?;
                if found != element.tag {
                    return Err(TemplateError::MismatchedTag {
                        expected: element.tag,
                        found,
                    });
                }
                return Ok(element);
            }
            element.children.push(self.element()?);
        }
    }
}
