//! codetint - rule-driven source code syntax colorizer
//!
//! Classifies substrings of source text into token categories
//! (keywords, symbols, strings, operators, comments) according to a
//! declarative per-language rule set, then re-emits the text with
//! markup around the classified tokens. No grammar and no AST: one
//! forward pass with longest-match delimiter dispatch.
//!
//! ```
//! use codetint::{Colorizer, LanguageRules, QuoteRule};
//!
//! let mut rules = LanguageRules::new("tiny");
//! rules.keywords = vec!["let".to_string()];
//! rules.quotes = vec![QuoteRule::with_escape('"', '\\')];
//!
//! let mut colorizer = Colorizer::new(&rules).unwrap();
//! colorizer.keyword_class = Some("kw".to_string());
//! assert_eq!(
//!     colorizer.transform("let x"),
//!     "<span class=\"kw\">let</span> x"
//! );
//! ```

pub mod builtin;
mod collection;
mod colorizer;
mod error;
mod rules;
mod scanner;
mod terminal;
mod tokens;

pub use collection::RulesCollection;
pub use colorizer::{escape_html, Colorizer, ColorizerOptions};
pub use error::{ColorizerError, Result};
pub use rules::{
    BlockCommentRule, LanguageRules, QuoteRule, DEFAULT_CASE_SENSITIVE, DEFAULT_OPERATOR_CHARS,
    DEFAULT_SYMBOL_CHARS, DEFAULT_SYMBOL_FIRST_CHARS,
};
pub use scanner::{CompiledRules, Scanner};
pub use terminal::{render_ansi, Theme};
pub use tokens::{Token, TokenType};
