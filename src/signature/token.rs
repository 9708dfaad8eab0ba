//! Tokens and whitespace tokenization.

use std::fmt;

use crate::core::errors::Result;

/// Rendering of a masked position.
pub const WILDCARD: &str = "*";

/// A single unit of compared text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// A literal word taken from the source text
    Literal(Box<str>),
    /// A masked position that matches any token
    Wildcard,
}

impl Token {
    /// Create a literal token
    pub fn literal(value: impl Into<Box<str>>) -> Self {
        Self::Literal(value.into())
    }

    /// Whether this position is masked
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// The literal text, or `None` for a wildcard
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value.as_ref()),
            Self::Wildcard => None,
        }
    }

    /// Compatibility used by alignment and the metrics: equal literals match,
    /// and a wildcard on either side matches anything.
    ///
    /// Symmetric but not transitive.
    #[inline]
    pub fn matches(&self, other: &Token) -> bool {
        match (self, other) {
            (Self::Wildcard, _) | (_, Self::Wildcard) => true,
            (Self::Literal(a), Self::Literal(b)) => a == b,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.write_str(value),
            Self::Wildcard => f.write_str(WILDCARD),
        }
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

/// Split text on runs of whitespace into literal tokens.
///
/// Leading and trailing whitespace never yields empty tokens, so blank input
/// produces an empty sequence.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace().map(Token::literal).collect()
}

/// Tokenize raw bytes, rejecting input that is not UTF-8 text.
pub fn tokenize_bytes(bytes: &[u8]) -> Result<Vec<Token>> {
    let text = std::str::from_utf8(bytes)?;
    Ok(tokenize(text))
}
