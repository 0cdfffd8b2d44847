//! C# language rules

use crate::rules::{BlockCommentRule, LanguageRules, QuoteRule};

/// Create C# language rules
pub fn csharp_rules() -> LanguageRules {
    let mut rules = LanguageRules::new("cs");
    rules.extensions = vec!["cs".to_string()];
    rules.quotes = vec![
        // Verbatim-style doubling escapes the double quote
        QuoteRule::with_escape('"', '"'),
        QuoteRule::with_escape('\'', '\\'),
    ];
    rules.block_comments = vec![BlockCommentRule::new("/*", "*/")];
    rules.line_comments = vec!["//".to_string()];
    rules.keywords = [
        "abstract",
        "as",
        "base",
        "bool",
        "break",
        "byte",
        "case",
        "catch",
        "char",
        "checked",
        "class",
        "const",
        "continue",
        "decimal",
        "default",
        "delegate",
        "do",
        "double",
        "else",
        "enum",
        "event",
        "explicit",
        "extern",
        "false",
        "finally",
        "fixed",
        "float",
        "for",
        "foreach",
        "goto",
        "if",
        "implicit",
        "in",
        "int",
        "interface",
        "internal",
        "is",
        "lock",
        "long",
        "nameof",
        "namespace",
        "new",
        "null",
        "object",
        "operator",
        "out",
        "override",
        "params",
        "private",
        "protected",
        "public",
        "readonly",
        "ref",
        "return",
        "sbyte",
        "sealed",
        "short",
        "sizeof",
        "stackalloc",
        "static",
        "string",
        "struct",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "uint",
        "ulong",
        "unchecked",
        "unsafe",
        "ushort",
        "using",
        "virtual",
        "void",
        "volatile",
        "while",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    rules
}
