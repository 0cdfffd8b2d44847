//! HTML colorizing of scanned tokens
//!
//! This module maps token types to CSS class names and re-emits the
//! scanned text with markup wrapped around classified tokens. It is a
//! stateless fold over the scanner's token stream; all the real work
//! happens in [`crate::scanner`].

use crate::error::Result;
use crate::rules::LanguageRules;
use crate::scanner::{CompiledRules, Scanner};
use crate::tokens::TokenType;

/// Options governing colorizer output
#[derive(Debug, Clone)]
pub struct ColorizerOptions {
    /// Markup template applied to classified tokens. `{0}` is replaced
    /// with the escaped token text and `{1}` with the class name.
    pub token_format: String,
    /// Classify every identifier-like token that is not a keyword as a
    /// symbol, instead of requiring it to appear in the symbol list
    pub unclassified_to_symbols: bool,
}

impl Default for ColorizerOptions {
    fn default() -> Self {
        Self {
            token_format: "<span class=\"{1}\">{0}</span>".to_string(),
            unclassified_to_symbols: false,
        }
    }
}

/// Colorizes source code by inserting markup around language tokens
///
/// Compiles a rule set once at construction; the rules are copied, so
/// changes to the [`LanguageRules`] value afterwards are not observed.
/// Tokens whose type has no class name (or a blank one) are emitted as
/// escaped text without markup.
pub struct Colorizer {
    rules: CompiledRules,
    /// Output options
    pub options: ColorizerOptions,
    /// Class name applied to keywords
    pub keyword_class: Option<String>,
    /// Class name applied to symbols
    pub symbol_class: Option<String>,
    /// Class name applied to string literals
    pub string_class: Option<String>,
    /// Class name applied to operators
    pub operator_class: Option<String>,
    /// Class name applied to comments
    pub comment_class: Option<String>,
}

impl Colorizer {
    /// Create a colorizer for the given language rules
    pub fn new(rules: &LanguageRules) -> Result<Self> {
        Ok(Self {
            rules: CompiledRules::compile(rules)?,
            options: ColorizerOptions::default(),
            keyword_class: None,
            symbol_class: None,
            string_class: None,
            operator_class: None,
            comment_class: None,
        })
    }

    /// Replace the active language rules
    ///
    /// Fully replaces the compiled state; class names and options are
    /// kept. Must not be called while a scanner borrowed from this
    /// colorizer is still in use (the borrow checker enforces this).
    pub fn set_language(&mut self, rules: &LanguageRules) -> Result<()> {
        self.rules = CompiledRules::compile(rules)?;
        Ok(())
    }

    /// Scan `source` into a token stream using the compiled rules
    pub fn scan<'c, 't>(&'c self, source: &'t str) -> Scanner<'c, 't> {
        Scanner::new(&self.rules, source)
            .unclassified_to_symbols(self.options.unclassified_to_symbols)
    }

    /// Look up the class name configured for a token type
    fn class_for(&self, kind: TokenType) -> Option<&str> {
        let class = match kind {
            TokenType::Keyword => &self.keyword_class,
            TokenType::Symbol => &self.symbol_class,
            TokenType::String => &self.string_class,
            TokenType::Operator => &self.operator_class,
            TokenType::Comment => &self.comment_class,
            TokenType::Unclassified | TokenType::EndOfText => return None,
        };
        class.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Transform source code into HTML with markup around classified
    /// tokens. The output reproduces the source exactly, up to HTML
    /// escaping and the inserted markup.
    pub fn transform(&self, source: &str) -> String {
        let mut output = String::with_capacity(source.len() * 2);
        for token in self.scan(source) {
            let escaped = escape_html(token.text);
            match self.class_for(token.kind) {
                Some(class) => {
                    output.push_str(&format_token(&self.options.token_format, &escaped, class))
                }
                None => output.push_str(&escaped),
            }
        }
        output
    }
}

/// Escape text for inclusion in HTML markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Substitute `{0}` (token text) and `{1}` (class name) in the token
/// format template. Single-pass, so placeholder-like sequences inside
/// the token text are never re-substituted.
fn format_token(format: &str, text: &str, class: &str) -> String {
    let mut output = String::with_capacity(format.len() + text.len() + class.len());
    let mut rest = format;
    while let Some(i) = rest.find('{') {
        output.push_str(&rest[..i]);
        if rest[i..].starts_with("{0}") {
            output.push_str(text);
            rest = &rest[i + 3..];
        } else if rest[i..].starts_with("{1}") {
            output.push_str(class);
            rest = &rest[i + 3..];
        } else {
            output.push('{');
            rest = &rest[i + 1..];
        }
    }
    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::csharp_rules;

    fn styled_colorizer() -> Colorizer {
        let mut colorizer = Colorizer::new(&csharp_rules()).unwrap();
        colorizer.keyword_class = Some("keyword".to_string());
        colorizer.symbol_class = Some("symbol".to_string());
        colorizer.string_class = Some("string".to_string());
        colorizer.operator_class = Some("operator".to_string());
        colorizer.comment_class = Some("comment".to_string());
        colorizer
    }

    const SAMPLE_CODE: &str = "\
// This is a comment

int func(int i, double d)
{
    /* Another comment */
    int i = 1234;
    string s = \"abc\";
}
";

    const COLORED_CODE: &str = "\
<span class=\"comment\">// This is a comment</span>

<span class=\"keyword\">int</span> func(<span class=\"keyword\">int</span> i, <span class=\"keyword\">double</span> d)
{
    <span class=\"comment\">/* Another comment */</span>
    <span class=\"keyword\">int</span> i <span class=\"operator\">=</span> 1234;
    <span class=\"keyword\">string</span> s <span class=\"operator\">=</span> <span class=\"string\">&quot;abc&quot;</span>;
}
";

    #[test]
    fn test_transform() {
        let colorizer = styled_colorizer();
        assert_eq!(colorizer.transform(SAMPLE_CODE), COLORED_CODE);
    }

    #[test]
    fn test_transform_without_classes() {
        let colorizer = Colorizer::new(&csharp_rules()).unwrap();
        let output = colorizer.transform("int i = \"a<b\";");
        assert_eq!(output, "int i = &quot;a&lt;b&quot;;");
    }

    #[test]
    fn test_blank_class_emits_bare_text() {
        let mut colorizer = styled_colorizer();
        colorizer.keyword_class = Some("  ".to_string());
        let output = colorizer.transform("int");
        assert_eq!(output, "int");
    }

    #[test]
    fn test_unclassified_to_symbols() {
        let mut colorizer = styled_colorizer();
        colorizer.options.unclassified_to_symbols = true;
        let output = colorizer.transform("func");
        assert_eq!(output, "<span class=\"symbol\">func</span>");
    }

    #[test]
    fn test_set_language_replaces_rules() {
        let mut colorizer = styled_colorizer();
        let mut basic = LanguageRules::new("basic");
        basic.case_sensitive = false;
        basic.keywords = vec!["dim".to_string()];
        basic.line_comments = vec!["'".to_string()];
        colorizer.set_language(&basic).unwrap();
        let output = colorizer.transform("DIM ' note");
        assert_eq!(
            output,
            "<span class=\"keyword\">DIM</span> <span class=\"comment\">&#39; note</span>"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("<x>"), "&lt;x&gt;");
        assert_eq!(escape_html("\"it's\""), "&quot;it&#39;s&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_format_token() {
        assert_eq!(
            format_token("<span class=\"{1}\">{0}</span>", "text", "cls"),
            "<span class=\"cls\">text</span>"
        );
        // Placeholders inside the token text are not re-substituted,
        // and unknown braces pass through.
        assert_eq!(format_token("{0}{1}", "{1}", "c"), "{1}c");
        assert_eq!(format_token("a{2}b{0}", "x", "c"), "a{2}bx");
    }
}
