//! Built-in language rule sets
//!
//! Ready-made rules for common languages, usable directly or as
//! starting points for custom rules files.

mod c_sharp;
mod python;
mod rust_lang;

pub use c_sharp::csharp_rules;
pub use python::python_rules;
pub use rust_lang::rust_rules;

use crate::rules::LanguageRules;

/// Get all built-in language rule sets
pub fn all_languages() -> Vec<LanguageRules> {
    vec![csharp_rules(), rust_rules(), python_rules()]
}
