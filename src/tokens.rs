//! Token types for source code classification
//!
//! This module defines the token classifications produced by the
//! scanner and the token value type itself.

/// Classifications assigned to scanned tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Reserved words of the language (if, else, int, etc.)
    Keyword,
    /// Identifier-like tokens explicitly listed as meaningful
    /// (built-in types, API names) but not reserved words
    Symbol,
    /// Quoted string literals, delimiters included
    String,
    /// Runs of operator characters
    Operator,
    /// Block and line comments
    Comment,
    /// Whitespace and anything the rules don't classify
    Unclassified,
    /// End of the input text
    EndOfText,
}

impl TokenType {
    /// Get a human-readable name for this token type
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Keyword => "Keyword",
            TokenType::Symbol => "Symbol",
            TokenType::String => "String",
            TokenType::Operator => "Operator",
            TokenType::Comment => "Comment",
            TokenType::Unclassified => "Unclassified",
            TokenType::EndOfText => "EndOfText",
        }
    }

    /// Parse a token type from a string name (for theme overrides)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Keyword" => Some(TokenType::Keyword),
            "Symbol" => Some(TokenType::Symbol),
            "String" => Some(TokenType::String),
            "Operator" => Some(TokenType::Operator),
            "Comment" => Some(TokenType::Comment),
            "Unclassified" => Some(TokenType::Unclassified),
            "EndOfText" => Some(TokenType::EndOfText),
            _ => None,
        }
    }
}

/// A single classified token
///
/// The text is the exact substring of the input that was consumed;
/// concatenating the text of every token in order reproduces the
/// input exactly. Escaping and markup happen downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'t> {
    /// The classification of this token
    pub kind: TokenType,
    /// The consumed substring, unmodified
    pub text: &'t str,
}

impl<'t> Token<'t> {
    /// Create a new token
    pub fn new(kind: TokenType, text: &'t str) -> Self {
        Self { kind, text }
    }

    /// The end-of-input marker token
    pub fn end_of_text() -> Self {
        Self {
            kind: TokenType::EndOfText,
            text: "",
        }
    }

    /// Check if this token marks the end of the input
    pub fn is_end(&self) -> bool {
        self.kind == TokenType::EndOfText
    }
}
