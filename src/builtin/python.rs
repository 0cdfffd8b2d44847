//! Python language rules

use crate::rules::{LanguageRules, QuoteRule};

/// Create Python language rules
///
/// Python has no block comments; triple-quoted strings are outside
/// what literal delimiter rules can express and tokenize as adjacent
/// plain strings.
pub fn python_rules() -> LanguageRules {
    let mut rules = LanguageRules::new("python");
    rules.extensions = vec!["py".to_string(), "pyw".to_string()];
    rules.operator_chars = "+-*/%&|^~<>=!@".to_string();
    rules.quotes = vec![
        QuoteRule::with_escape('"', '\\'),
        QuoteRule::with_escape('\'', '\\'),
    ];
    rules.line_comments = vec!["#".to_string()];
    rules.keywords = [
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
        "try", "while", "with", "yield",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    rules.symbols = [
        "print", "len", "range", "int", "str", "float", "list", "dict", "set", "tuple", "bool",
        "object", "self",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    rules
}
