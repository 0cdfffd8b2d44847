//! The tokenizing scanner
//!
//! This module compiles a [`LanguageRules`] value into fast lookup
//! structures and drives a single forward pass over an input text,
//! classifying substrings by a fixed priority order: whitespace,
//! block comments, line comments, keywords/symbols, quoted strings,
//! operators, then a one-character fallback. Concatenating the text
//! of every emitted token reproduces the input exactly.

use std::collections::HashSet;

use crate::error::{ColorizerError, Result};
use crate::rules::{BlockCommentRule, LanguageRules, QuoteRule};
use crate::tokens::{Token, TokenType};

/// Comparison strategy, selected once when rules are compiled
///
/// Case-insensitive mode uses ASCII folding; every character-set and
/// string-set lookup goes through the same strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CaseMode {
    Sensitive,
    Insensitive,
}

impl CaseMode {
    fn from_rules(case_sensitive: bool) -> Self {
        if case_sensitive {
            CaseMode::Sensitive
        } else {
            CaseMode::Insensitive
        }
    }

    fn fold_char(self, c: char) -> char {
        match self {
            CaseMode::Sensitive => c,
            CaseMode::Insensitive => c.to_ascii_lowercase(),
        }
    }

    fn fold_str(self, s: &str) -> String {
        match self {
            CaseMode::Sensitive => s.to_string(),
            CaseMode::Insensitive => s.to_ascii_lowercase(),
        }
    }

    fn chars_eq(self, a: char, b: char) -> bool {
        self.fold_char(a) == self.fold_char(b)
    }
}

/// A language rule set compiled into lookup structures
///
/// All rule collections are copied in, so mutating the source
/// [`LanguageRules`] afterwards does not affect the compiled form.
/// Delimiter lists are sorted longest-start-first at compile time so
/// that a longer delimiter always wins over a shorter prefix of it.
pub struct CompiledRules {
    case_mode: CaseMode,
    symbol_first_chars: HashSet<char>,
    symbol_chars: HashSet<char>,
    operator_chars: HashSet<char>,
    keywords: HashSet<String>,
    symbols: HashSet<String>,
    quotes: Vec<QuoteRule>,
    block_comments: Vec<BlockCommentRule>,
    line_comments: Vec<String>,
}

impl CompiledRules {
    /// Compile a rule set
    ///
    /// Empty character classes and lists are valid and compile to empty
    /// sets. Fails with
    /// [`InvalidConfiguration`](ColorizerError::InvalidConfiguration)
    /// only for rules that would stall the scanner: a block comment
    /// with an empty start or end delimiter, or an empty line comment
    /// start.
    pub fn compile(rules: &LanguageRules) -> Result<Self> {
        for comment in &rules.block_comments {
            if comment.start.is_empty() || comment.end.is_empty() {
                return Err(ColorizerError::InvalidConfiguration(format!(
                    "block comment delimiters must be non-empty ({})",
                    rules.name
                )));
            }
        }
        if rules.line_comments.iter().any(|c| c.is_empty()) {
            return Err(ColorizerError::InvalidConfiguration(format!(
                "line comment delimiters must be non-empty ({})",
                rules.name
            )));
        }

        let case_mode = CaseMode::from_rules(rules.case_sensitive);

        let char_set = |chars: &str| chars.chars().map(|c| case_mode.fold_char(c)).collect();
        let str_set = |strings: &[String]| {
            strings.iter().map(|s| case_mode.fold_str(s)).collect()
        };

        // Longest start string first; sort_by_key is stable, so
        // equal-length delimiters keep their input order.
        let mut block_comments = rules.block_comments.clone();
        block_comments.sort_by_key(|c| std::cmp::Reverse(c.start.chars().count()));
        let mut line_comments = rules.line_comments.clone();
        line_comments.sort_by_key(|c| std::cmp::Reverse(c.chars().count()));

        Ok(Self {
            case_mode,
            symbol_first_chars: char_set(&rules.symbol_first_chars),
            symbol_chars: char_set(&rules.symbol_chars),
            operator_chars: char_set(&rules.operator_chars),
            keywords: str_set(&rules.keywords),
            symbols: str_set(&rules.symbols),
            quotes: rules.quotes.clone(),
            block_comments,
            line_comments,
        })
    }

    fn is_symbol_first_char(&self, c: char) -> bool {
        self.symbol_first_chars.contains(&self.case_mode.fold_char(c))
    }

    fn is_symbol_char(&self, c: char) -> bool {
        self.symbol_chars.contains(&self.case_mode.fold_char(c))
    }

    fn is_operator_char(&self, c: char) -> bool {
        self.operator_chars.contains(&self.case_mode.fold_char(c))
    }

    fn is_keyword(&self, s: &str) -> bool {
        self.keywords.contains(&self.case_mode.fold_str(s))
    }

    fn is_symbol(&self, s: &str) -> bool {
        self.symbols.contains(&self.case_mode.fold_str(s))
    }

    /// Check whether `text[pos..]` begins with `delim` under the
    /// compiled case mode. Returns the byte length of the matched input.
    fn matches_at(&self, text: &str, pos: usize, delim: &str) -> Option<usize> {
        let mut len = 0;
        let mut input = text[pos..].chars();
        for expected in delim.chars() {
            let actual = input.next()?;
            if !self.case_mode.chars_eq(actual, expected) {
                return None;
            }
            len += actual.len_utf8();
        }
        Some(len)
    }

    /// Match descriptor for a block comment starting at `pos`. The
    /// returned rule carries the terminator the consumer must scan for.
    fn block_comment_at(&self, text: &str, pos: usize) -> Option<&BlockCommentRule> {
        self.block_comments
            .iter()
            .find(|c| self.matches_at(text, pos, &c.start).is_some())
    }

    fn line_comment_at(&self, text: &str, pos: usize) -> bool {
        self.line_comments
            .iter()
            .any(|c| self.matches_at(text, pos, c).is_some())
    }

    /// Match descriptor for a quote character. The returned rule
    /// carries the escape character the consumer must honor.
    fn quote_at(&self, c: char) -> Option<QuoteRule> {
        self.quotes
            .iter()
            .copied()
            .find(|q| self.case_mode.chars_eq(q.character, c))
    }
}

/// Single-pass tokenizer over one input text
///
/// Holds one cursor and nothing else; a fresh pass over the same text
/// requires [`reset`](Scanner::reset) or a new scanner. Scanning never
/// fails: every character of the input is classified into some token,
/// and unterminated comments or strings run to the end of the input.
pub struct Scanner<'r, 't> {
    rules: &'r CompiledRules,
    text: &'t str,
    pos: usize,
    unclassified_to_symbols: bool,
}

impl<'r, 't> Scanner<'r, 't> {
    /// Create a scanner positioned at the start of `text`
    pub fn new(rules: &'r CompiledRules, text: &'t str) -> Self {
        Self {
            rules,
            text,
            pos: 0,
            unclassified_to_symbols: false,
        }
    }

    /// Classify every identifier-like token that is not a keyword as a
    /// symbol, instead of requiring it to appear in the symbol list
    pub fn unclassified_to_symbols(mut self, enabled: bool) -> Self {
        self.unclassified_to_symbols = enabled;
        self
    }

    /// Move the cursor back to the start of the text
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    fn rest(&self) -> &'t str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance_char(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn take(&mut self, len: usize) -> &'t str {
        let start = self.pos;
        self.pos += len;
        &self.text[start..self.pos]
    }

    fn take_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'t str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(rest.len(), |(i, _)| i);
        self.take(len)
    }

    /// Produce the next token
    ///
    /// Checks run in a fixed priority order; the first match wins.
    /// Once the input is exhausted this returns
    /// [`EndOfText`](TokenType::EndOfText) on every call.
    pub fn next_token(&mut self) -> Token<'t> {
        let rules = self.rules;

        let Some(c) = self.peek() else {
            return Token::end_of_text();
        };

        if c.is_whitespace() {
            let text = self.take_while(char::is_whitespace);
            return Token::new(TokenType::Unclassified, text);
        }
        if let Some(comment) = rules.block_comment_at(self.text, self.pos) {
            let text = self.consume_block_comment(&comment.end);
            return Token::new(TokenType::Comment, text);
        }
        if rules.line_comment_at(self.text, self.pos) {
            let text = self.take_while(|c| c != '\n' && c != '\r');
            return Token::new(TokenType::Comment, text);
        }
        if rules.is_symbol_first_char(c) {
            let text = self.consume_word();
            let kind = if rules.is_keyword(text) {
                TokenType::Keyword
            } else if self.unclassified_to_symbols || rules.is_symbol(text) {
                TokenType::Symbol
            } else {
                TokenType::Unclassified
            };
            return Token::new(kind, text);
        }
        if let Some(quote) = rules.quote_at(c) {
            let text = self.consume_quoted(quote);
            return Token::new(TokenType::String, text);
        }
        if rules.is_operator_char(c) {
            let text = self.take_while(|c| rules.is_operator_char(c));
            return Token::new(TokenType::Operator, text);
        }

        let text = self.take(c.len_utf8());
        Token::new(TokenType::Unclassified, text)
    }

    /// Consume a block comment through the first occurrence of its
    /// terminator, inclusive, or through the end of input if the
    /// terminator never occurs. The search starts at the comment start
    /// position, so the terminator may overlap the start delimiter.
    fn consume_block_comment(&mut self, end: &str) -> &'t str {
        let rules = self.rules;
        let start = self.pos;
        let mut pos = self.pos;
        let mut end_pos = self.text.len();
        while pos < self.text.len() {
            if let Some(len) = rules.matches_at(self.text, pos, end) {
                end_pos = pos + len;
                break;
            }
            pos += self.text[pos..].chars().next().map_or(1, char::len_utf8);
        }
        self.pos = end_pos;
        &self.text[start..end_pos]
    }

    /// Consume the first character plus the maximal run of symbol
    /// characters. The first character is consumed unconditionally, so
    /// the cursor always advances.
    fn consume_word(&mut self) -> &'t str {
        let rules = self.rules;
        let start = self.pos;
        self.advance_char();
        self.take_while(|c| rules.is_symbol_char(c));
        &self.text[start..self.pos]
    }

    /// Consume a quoted string, delimiters included
    ///
    /// A quote character immediately preceded by the rule's escape
    /// character is literal content. The first unescaped closing quote
    /// ends the string; an unterminated string runs to end of input.
    fn consume_quoted(&mut self, quote: QuoteRule) -> &'t str {
        let rules = self.rules;
        let start = self.pos;
        self.advance_char();
        while let Some(c) = self.peek() {
            if let Some(escape) = quote.escape {
                if rules.case_mode.chars_eq(c, escape) {
                    let mut ahead = self.rest().chars();
                    ahead.next();
                    if let Some(next) = ahead.next() {
                        if rules.case_mode.chars_eq(next, quote.character) {
                            self.advance_char();
                            self.advance_char();
                            continue;
                        }
                    }
                }
            }
            self.advance_char();
            if rules.case_mode.chars_eq(c, quote.character) {
                break;
            }
        }
        &self.text[start..self.pos]
    }
}

impl<'r, 't> Iterator for Scanner<'r, 't> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Token<'t>> {
        let token = self.next_token();
        if token.is_end() {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// C-like rule set used by most scanner tests
    fn c_like_rules() -> LanguageRules {
        let mut rules = LanguageRules::new("c-like");
        rules.keywords = vec!["int".to_string(), "string".to_string()];
        rules.quotes = vec![
            QuoteRule::new('"'),
            QuoteRule::with_escape('\'', '\\'),
        ];
        rules.block_comments = vec![BlockCommentRule::new("/*", "*/")];
        rules.line_comments = vec!["//".to_string()];
        rules
    }

    fn scan_all(rules: &LanguageRules, text: &str) -> Vec<(TokenType, String)> {
        let compiled = CompiledRules::compile(rules).unwrap();
        Scanner::new(&compiled, text)
            .map(|t| (t.kind, t.text.to_string()))
            .collect()
    }

    #[test]
    fn test_dispatch_priority() {
        let tokens = scan_all(&c_like_rules(), "int i = 1234; // comment");
        let expected = [
            (TokenType::Keyword, "int"),
            (TokenType::Unclassified, " "),
            (TokenType::Unclassified, "i"),
            (TokenType::Unclassified, " "),
            (TokenType::Operator, "="),
            (TokenType::Unclassified, " "),
            (TokenType::Unclassified, "1"),
            (TokenType::Unclassified, "2"),
            (TokenType::Unclassified, "3"),
            (TokenType::Unclassified, "4"),
            (TokenType::Unclassified, ";"),
            (TokenType::Unclassified, " "),
            (TokenType::Comment, "// comment"),
        ];
        let expected: Vec<(TokenType, String)> = expected
            .iter()
            .map(|&(kind, text)| (kind, text.to_string()))
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_round_trip() {
        let inputs = [
            "int i = 1234; // comment\nstring s = \"abc\";\n",
            "/* block */ x += 'a\\'b' ~~~ @@@ £µ€\n\t  done",
            "",
            "   \t\r\n   ",
        ];
        for input in inputs {
            let tokens = scan_all(&c_like_rules(), input);
            let rebuilt: String = tokens.iter().map(|(_, text)| text.as_str()).collect();
            assert_eq!(rebuilt, input);
        }
    }

    #[test]
    fn test_deterministic() {
        let compiled = CompiledRules::compile(&c_like_rules()).unwrap();
        let text = "int a = \"x\"; /* c */ b";
        let first: Vec<_> = Scanner::new(&compiled, text).collect();
        let second: Vec<_> = Scanner::new(&compiled, text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset() {
        let compiled = CompiledRules::compile(&c_like_rules()).unwrap();
        let mut scanner = Scanner::new(&compiled, "int x");
        let first = scanner.next_token();
        assert_eq!(first.text, "int");
        scanner.reset();
        assert_eq!(scanner.next_token().text, "int");
    }

    #[test]
    fn test_longest_delimiter_wins() {
        let mut rules = LanguageRules::new("markup");
        rules.block_comments = vec![
            BlockCommentRule::new("<", ">"),
            BlockCommentRule::new("<!--", "-->"),
        ];
        let tokens = scan_all(&rules, "<!-- a > b --> tail");
        // The four-character start must win over its one-character
        // prefix, taking the comment through "-->" instead of ">".
        assert_eq!(tokens[0], (TokenType::Comment, "<!-- a > b -->".to_string()));
    }

    #[test]
    fn test_equal_length_delimiters_keep_input_order() {
        let mut rules = LanguageRules::new("dup");
        rules.block_comments = vec![
            BlockCommentRule::new("/*", "*/"),
            BlockCommentRule::new("/*", "!!"),
        ];
        let tokens = scan_all(&rules, "/* a !! b */");
        assert_eq!(tokens[0], (TokenType::Comment, "/* a !! b */".to_string()));
    }

    #[test]
    fn test_case_sensitivity_toggle() {
        let mut rules = c_like_rules();
        let tokens = scan_all(&rules, "INT int");
        assert_eq!(tokens[0].0, TokenType::Unclassified);
        assert_eq!(tokens[2].0, TokenType::Keyword);

        rules.case_sensitive = false;
        let tokens = scan_all(&rules, "INT int");
        assert_eq!(tokens[0].0, TokenType::Keyword);
        assert_eq!(tokens[2].0, TokenType::Keyword);
    }

    #[test]
    fn test_case_insensitive_delimiters() {
        let mut rules = LanguageRules::new("basic");
        rules.case_sensitive = false;
        rules.line_comments = vec!["REM".to_string()];
        let tokens = scan_all(&rules, "rem note\n");
        assert_eq!(tokens[0], (TokenType::Comment, "rem note".to_string()));
    }

    #[test]
    fn test_quote_with_escape() {
        let tokens = scan_all(&c_like_rules(), r"'a\'b'");
        assert_eq!(tokens, vec![(TokenType::String, r"'a\'b'".to_string())]);
    }

    #[test]
    fn test_escape_before_ordinary_char() {
        let tokens = scan_all(&c_like_rules(), r"'a\b'c");
        assert_eq!(tokens[0], (TokenType::String, r"'a\b'".to_string()));
    }

    #[test]
    fn test_quote_without_escape() {
        let tokens = scan_all(&c_like_rules(), r#""a"b""#);
        assert_eq!(tokens[0], (TokenType::String, "\"a\"".to_string()));
        assert_eq!(tokens[1], (TokenType::Unclassified, "b".to_string()));
        // The reopened string never terminates and runs to end of input.
        assert_eq!(tokens[2], (TokenType::String, "\"".to_string()));
    }

    #[test]
    fn test_doubled_quote_escape() {
        let mut rules = c_like_rules();
        rules.quotes = vec![QuoteRule::with_escape('"', '"')];
        let tokens = scan_all(&rules, r#""ab""cd" x"#);
        assert_eq!(tokens[0], (TokenType::String, r#""ab""cd""#.to_string()));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let tokens = scan_all(&c_like_rules(), "a /* never closed");
        assert_eq!(
            tokens.last().unwrap(),
            &(TokenType::Comment, "/* never closed".to_string())
        );
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = scan_all(&c_like_rules(), "\"runs to the end");
        assert_eq!(
            tokens,
            vec![(TokenType::String, "\"runs to the end".to_string())]
        );
    }

    #[test]
    fn test_line_comment_excludes_line_break() {
        let tokens = scan_all(&c_like_rules(), "// note\r\nint");
        assert_eq!(tokens[0], (TokenType::Comment, "// note".to_string()));
        assert_eq!(tokens[1], (TokenType::Unclassified, "\r\n".to_string()));
        assert_eq!(tokens[2], (TokenType::Keyword, "int".to_string()));
    }

    #[test]
    fn test_comment_beats_operator() {
        // '/' is an operator character, but comment detection runs first.
        let tokens = scan_all(&c_like_rules(), "a / b // c");
        assert_eq!(tokens[2], (TokenType::Operator, "/".to_string()));
        assert_eq!(tokens.last().unwrap().0, TokenType::Comment);
    }

    #[test]
    fn test_keyword_beats_symbol() {
        let mut rules = c_like_rules();
        rules.symbols = vec!["int".to_string(), "Console".to_string()];
        let tokens = scan_all(&rules, "int Console other");
        assert_eq!(tokens[0].0, TokenType::Keyword);
        assert_eq!(tokens[2].0, TokenType::Symbol);
        assert_eq!(tokens[4].0, TokenType::Unclassified);
    }

    #[test]
    fn test_unclassified_to_symbols_option() {
        let compiled = CompiledRules::compile(&c_like_rules()).unwrap();
        let tokens: Vec<_> = Scanner::new(&compiled, "int other")
            .unclassified_to_symbols(true)
            .collect();
        assert_eq!(tokens[0].kind, TokenType::Keyword);
        assert_eq!(tokens[2].kind, TokenType::Symbol);
    }

    #[test]
    fn test_empty_rules() {
        let tokens = scan_all(&LanguageRules::empty("bare"), "ab  c\n");
        let expected = [
            (TokenType::Unclassified, "a"),
            (TokenType::Unclassified, "b"),
            (TokenType::Unclassified, "  "),
            (TokenType::Unclassified, "c"),
            (TokenType::Unclassified, "\n"),
        ];
        let expected: Vec<(TokenType, String)> = expected
            .iter()
            .map(|&(kind, text)| (kind, text.to_string()))
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_end_of_text_is_sticky() {
        let compiled = CompiledRules::compile(&c_like_rules()).unwrap();
        let mut scanner = Scanner::new(&compiled, "x");
        scanner.next_token();
        assert!(scanner.next_token().is_end());
        assert!(scanner.next_token().is_end());
    }

    #[test]
    fn test_compile_rejects_empty_delimiters() {
        let mut rules = LanguageRules::new("bad");
        rules.block_comments = vec![BlockCommentRule::new("", "*/")];
        assert!(matches!(
            CompiledRules::compile(&rules),
            Err(ColorizerError::InvalidConfiguration(_))
        ));

        let mut rules = LanguageRules::new("bad");
        rules.line_comments = vec![String::new()];
        assert!(matches!(
            CompiledRules::compile(&rules),
            Err(ColorizerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_compiled_rules_are_a_copy() {
        let mut rules = c_like_rules();
        let compiled = CompiledRules::compile(&rules).unwrap();
        rules.keywords.clear();
        rules.line_comments.clear();
        let tokens: Vec<_> = Scanner::new(&compiled, "int // c").collect();
        assert_eq!(tokens[0].kind, TokenType::Keyword);
        assert_eq!(tokens[2].kind, TokenType::Comment);
    }
}
