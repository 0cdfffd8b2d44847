//! Rust language rules

use crate::rules::{BlockCommentRule, LanguageRules, QuoteRule};

/// Create Rust language rules
pub fn rust_rules() -> LanguageRules {
    let mut rules = LanguageRules::new("rust");
    rules.extensions = vec!["rs".to_string()];
    rules.operator_chars = "+-*/%&|^~<>=!?".to_string();
    rules.quotes = vec![QuoteRule::with_escape('"', '\\')];
    rules.block_comments = vec![BlockCommentRule::new("/*", "*/")];
    rules.line_comments = vec!["//".to_string()];
    rules.keywords = [
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "type", "union", "unsafe", "use", "where", "while",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    // Built-in types and common std names
    rules.symbols = [
        "bool", "char", "str", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32",
        "i64", "i128", "isize", "f32", "f64", "String", "Vec", "Box", "Rc", "Arc", "Option",
        "Result", "Some", "None", "Ok", "Err",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    rules
}
