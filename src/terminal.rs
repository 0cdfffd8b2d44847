//! ANSI terminal rendering using crossterm
//!
//! The terminal counterpart of the HTML transform: walks the token
//! stream and wraps classified tokens in ANSI color sequences instead
//! of markup.

use crossterm::style::{Color, Stylize};

use crate::colorizer::Colorizer;
use crate::tokens::TokenType;

/// Colors applied to token types in terminal output
///
/// A type mapped to `None` is emitted unstyled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Color for keywords
    pub keyword: Option<Color>,
    /// Color for symbols
    pub symbol: Option<Color>,
    /// Color for string literals
    pub string: Option<Color>,
    /// Color for operators
    pub operator: Option<Color>,
    /// Color for comments
    pub comment: Option<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            keyword: Some(Color::Magenta),
            symbol: Some(Color::Yellow),
            string: Some(Color::Green),
            operator: Some(Color::White),
            comment: Some(Color::DarkGrey),
        }
    }
}

impl Theme {
    /// A theme with no colors; rendering with it is the identity
    pub fn plain() -> Self {
        Self {
            keyword: None,
            symbol: None,
            string: None,
            operator: None,
            comment: None,
        }
    }

    /// Get the color configured for a token type
    pub fn color_for(&self, kind: TokenType) -> Option<Color> {
        match kind {
            TokenType::Keyword => self.keyword,
            TokenType::Symbol => self.symbol,
            TokenType::String => self.string,
            TokenType::Operator => self.operator,
            TokenType::Comment => self.comment,
            TokenType::Unclassified | TokenType::EndOfText => None,
        }
    }
}

/// Render source code as ANSI-colored text
///
/// Tokens without a theme color pass through verbatim, so the output
/// printed to a terminal reads exactly like the input.
pub fn render_ansi(colorizer: &Colorizer, theme: &Theme, source: &str) -> String {
    let mut output = String::with_capacity(source.len() * 2);
    for token in colorizer.scan(source) {
        match theme.color_for(token.kind) {
            Some(color) => output.push_str(&token.text.with(color).to_string()),
            None => output.push_str(token.text),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::csharp_rules;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert!(theme.color_for(TokenType::Keyword).is_some());
        assert!(theme.color_for(TokenType::Comment).is_some());
        assert!(theme.color_for(TokenType::Unclassified).is_none());
        assert!(theme.color_for(TokenType::EndOfText).is_none());
    }

    #[test]
    fn test_render_plain_is_identity() {
        let colorizer = Colorizer::new(&csharp_rules()).unwrap();
        let source = "int i = 1234; // note\n";
        assert_eq!(render_ansi(&colorizer, &Theme::plain(), source), source);
    }

    #[test]
    fn test_render_styles_keywords() {
        let colorizer = Colorizer::new(&csharp_rules()).unwrap();
        let output = render_ansi(&colorizer, &Theme::default(), "int");
        assert!(output.contains("int"));
        assert!(output.contains("\u{1b}["));
    }
}
