//! CSS-like selector parsing for widget queries.
//!
//! Supports:
//! - `"DateInput"` - by widget type (the brick name)
//! - `"[data-testid='published']"` - by test ID
//! - `"[aria-label='Published at']"` - by accessible name (label text)
//! - `"[type=date]"`, `"[value='2010-01-04']"`, `"[role=alert]"` - control attributes
//! - `"DateInput[type=date]"` - every part must match

use adminform_core::{AccessibleRole, Widget};
use thiserror::Error;

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by widget type name
    Type(String),
    /// Match by test ID (e.g., `[data-testid='foo']`)
    TestId(String),
    /// Match by accessible name (e.g., `[aria-label='foo']`)
    Label(String),
    /// Match by displayed control value (e.g., `[value='2010-01-04']`)
    DisplayValue(String),
    /// Match by text content of a non-control node
    Text(String),
    /// Match by any other attribute (`type`, `role`)
    Attribute {
        /// Attribute name
        name: String,
        /// Expected value
        value: String,
    },
    /// All parts must match the same widget
    Compound(Vec<Selector>),
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

    /// Check if this selector matches a widget.
    #[must_use]
    pub fn matches(&self, widget: &dyn Widget) -> bool {
        match self {
            Self::Type(name) => widget.brick_name() == name,
            Self::TestId(id) => widget.test_id() == Some(id.as_str()),
            Self::Label(name) => widget.accessible_name() == Some(name.as_str()),
            Self::DisplayValue(value) => widget.display_value() == Some(value.as_str()),
            Self::Text(text) => widget.text_content() == Some(text.as_str()),
            Self::Attribute { name, value } => match name.as_str() {
                "type" => widget.input_type() == Some(value.as_str()),
                "role" => role_name(widget.accessible_role()) == value,
                "disabled" => widget.is_disabled(),
                _ => false,
            },
            Self::Compound(parts) => parts.iter().all(|part| part.matches(widget)),
        }
    }
}

/// ARIA role name for a role.
#[must_use]
pub const fn role_name(role: AccessibleRole) -> &'static str {
    match role {
        AccessibleRole::Generic => "generic",
        AccessibleRole::Form => "form",
        AccessibleRole::Label => "label",
        AccessibleRole::TextInput => "textbox",
        AccessibleRole::Alert => "alert",
    }
}

/// Selector parser.
#[derive(Debug)]
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the selector.
    ///
    /// # Errors
    ///
    /// Returns an error on empty input, unknown characters, or malformed
    /// attribute brackets.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();
        if self.peek_char().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut parts = Vec::new();
        while let Some(c) = self.peek_char() {
            match c {
                '[' => parts.push(self.parse_attribute()?),
                _ if c.is_alphabetic() && parts.is_empty() => parts.push(self.parse_type()?),
                _ if c.is_whitespace() => {
                    self.skip_whitespace();
                    if let Some(next) = self.peek_char() {
                        return Err(SelectorError::UnexpectedChar(next));
                    }
                }
                _ => return Err(SelectorError::UnexpectedChar(c)),
            }
        }

        if parts.len() == 1 {
            Ok(parts.remove(0))
        } else {
            Ok(Selector::Compound(parts))
        }
    }

    fn parse_type(&mut self) -> Result<Selector, SelectorError> {
        let name = self.read_identifier()?;
        Ok(Selector::Type(name))
    }

    fn parse_attribute(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // '['

        let name = self.read_until_any(&['=', ']']).trim().to_string();
        if name.is_empty() {
            return Err(SelectorError::InvalidAttribute);
        }

        // Bare attribute: `[disabled]`
        if self.peek_char() == Some(']') {
            self.advance();
            return Ok(Selector::Attribute {
                name,
                value: String::new(),
            });
        }
        if self.peek_char() != Some('=') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance(); // '='

        let value = match self.peek_char() {
            Some(quote @ ('\'' | '"')) => {
                self.advance();
                let value = self.read_until(quote);
                if self.peek_char() != Some(quote) {
                    return Err(SelectorError::UnclosedAttribute);
                }
                self.advance();
                value
            }
            _ => self.read_until(']').trim().to_string(),
        };

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        Ok(match name.as_str() {
            "data-testid" => Selector::TestId(value),
            "aria-label" => Selector::Label(value),
            "value" => Selector::DisplayValue(value),
            _ => Selector::Attribute { name, value },
        })
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier);
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn read_until(&mut self, stop: char) -> String {
        self.read_until_any(&[stop])
    }

    fn read_until_any(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Empty selector
    #[error("empty selector")]
    Empty,
    /// Unexpected character
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    /// Expected identifier
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// Invalid attribute syntax
    #[error("invalid attribute syntax")]
    InvalidAttribute,
    /// Unclosed attribute bracket or quote
    #[error("unclosed attribute bracket")]
    UnclosedAttribute,
}
