//! Language rules collections
//!
//! Loads and saves named sets of [`LanguageRules`] from TOML files.
//!
//! Format: a `languages` array of tables, one per language:
//!
//! ```toml
//! [[languages]]
//! name = "cs"
//! extensions = ["cs"]
//! case-sensitive = true
//! operator-chars = "+-*/%&|^~<>=!"
//! line-comments = ["//"]
//! keywords = ["if", "else", "int"]
//!
//! [[languages.quotes]]
//! character = "\""
//! escape = "\""
//!
//! [[languages.block-comments]]
//! start = "/*"
//! end = "*/"
//! ```
//!
//! Omitted fields fall back to the defaults in [`crate::rules`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use toml::{Table, Value};

use crate::error::{ColorizerError, Result};
use crate::rules::{
    BlockCommentRule, LanguageRules, QuoteRule, DEFAULT_CASE_SENSITIVE, DEFAULT_OPERATOR_CHARS,
    DEFAULT_SYMBOL_CHARS, DEFAULT_SYMBOL_FIRST_CHARS,
};

/// A collection of language rule sets, indexed by name
///
/// Language names are not case-sensitive.
#[derive(Default)]
pub struct RulesCollection {
    languages: HashMap<String, LanguageRules>,
}

impl RulesCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection preloaded with the built-in languages
    pub fn with_builtin() -> Self {
        let mut collection = Self::new();
        for rules in crate::builtin::all_languages() {
            collection.add(rules);
        }
        collection
    }

    /// Load a collection from a TOML rules file
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Parse a collection from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: Table = text.parse()?;
        let mut collection = Self::new();

        let entries = match table.get("languages") {
            None => Vec::new(),
            Some(Value::Array(entries)) => entries.clone(),
            Some(_) => {
                return Err(ColorizerError::InvalidConfiguration(
                    "'languages' must be an array of tables".to_string(),
                ))
            }
        };

        for entry in &entries {
            let entry = entry.as_table().ok_or_else(|| {
                ColorizerError::InvalidConfiguration(
                    "'languages' must be an array of tables".to_string(),
                )
            })?;
            let rules = parse_language(entry)?;
            if collection.get(&rules.name).is_some() {
                return Err(ColorizerError::InvalidConfiguration(format!(
                    "duplicate language name '{}'",
                    rules.name
                )));
            }
            collection.add(rules);
        }

        Ok(collection)
    }

    /// Write the collection to a TOML rules file
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Serialize the collection to TOML text, languages sorted by name
    pub fn to_toml_string(&self) -> Result<String> {
        let mut names: Vec<&LanguageRules> = self.languages.values().collect();
        names.sort_by(|a, b| a.name.cmp(&b.name));

        let entries: Vec<Value> = names.into_iter().map(language_to_value).collect();
        let mut root = Table::new();
        root.insert("languages".to_string(), Value::Array(entries));
        Ok(toml::to_string_pretty(&root)?)
    }

    /// Add a rule set, replacing any existing one with the same name
    pub fn add(&mut self, rules: LanguageRules) {
        self.languages.insert(rules.name.to_lowercase(), rules);
    }

    /// Look up a language by name (not case-sensitive)
    pub fn get(&self, name: &str) -> Option<&LanguageRules> {
        self.languages.get(&name.to_lowercase())
    }

    /// Detect a language from a file's extension
    pub fn detect(&self, path: &Path) -> Option<&LanguageRules> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        self.languages
            .values()
            .find(|rules| rules.extensions.iter().any(|e| e.to_lowercase() == ext))
    }

    /// Number of languages in the collection
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Check whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Names of all languages in the collection, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.languages.values().map(|r| r.name.as_str()).collect();
        names.sort();
        names
    }
}

fn invalid(message: String) -> ColorizerError {
    ColorizerError::InvalidConfiguration(message)
}

fn str_field(table: &Table, key: &str, context: &str) -> Result<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(format!("'{key}' must be a string ({context})"))),
    }
}

fn bool_field(table: &Table, key: &str, context: &str) -> Result<Option<bool>> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Boolean(b)) => Ok(Some(*b)),
        Some(_) => Err(invalid(format!("'{key}' must be a boolean ({context})"))),
    }
}

fn str_list_field(table: &Table, key: &str, context: &str) -> Result<Vec<String>> {
    let entries = match table.get(key) {
        None => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(invalid(format!("'{key}' must be an array ({context})"))),
    };
    entries
        .iter()
        .map(|v| match v {
            Value::String(s) => Ok(s.clone()),
            _ => Err(invalid(format!(
                "'{key}' entries must be strings ({context})"
            ))),
        })
        .collect()
}

fn table_list_field<'a>(table: &'a Table, key: &str, context: &str) -> Result<Vec<&'a Table>> {
    let entries = match table.get(key) {
        None => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(invalid(format!("'{key}' must be an array ({context})"))),
    };
    entries
        .iter()
        .map(|v| {
            v.as_table().ok_or_else(|| {
                invalid(format!("'{key}' entries must be tables ({context})"))
            })
        })
        .collect()
}

/// Parse one `[[languages]]` entry
fn parse_language(entry: &Table) -> Result<LanguageRules> {
    let name = str_field(entry, "name", "language entry")?
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| invalid("language entry is missing a name".to_string()))?;

    let mut rules = LanguageRules::new(&name);
    rules.case_sensitive =
        bool_field(entry, "case-sensitive", &name)?.unwrap_or(DEFAULT_CASE_SENSITIVE);
    rules.symbol_first_chars = str_field(entry, "symbol-first-chars", &name)?
        .unwrap_or_else(|| DEFAULT_SYMBOL_FIRST_CHARS.to_string());
    rules.symbol_chars =
        str_field(entry, "symbol-chars", &name)?.unwrap_or_else(|| DEFAULT_SYMBOL_CHARS.to_string());
    rules.operator_chars = str_field(entry, "operator-chars", &name)?
        .unwrap_or_else(|| DEFAULT_OPERATOR_CHARS.to_string());
    rules.extensions = str_list_field(entry, "extensions", &name)?;
    rules.keywords = str_list_field(entry, "keywords", &name)?;
    rules.symbols = str_list_field(entry, "symbols", &name)?;
    rules.line_comments = str_list_field(entry, "line-comments", &name)?;

    for quote in table_list_field(entry, "quotes", &name)? {
        let character = str_field(quote, "character", &name)?
            .ok_or_else(|| invalid(format!("quote entry is missing 'character' ({name})")))?;
        let mut chars = character.chars();
        let (first, rest) = (chars.next(), chars.next());
        let character = match (first, rest) {
            (Some(c), None) => c,
            _ => {
                return Err(invalid(format!(
                    "quote 'character' must be exactly one character ({name})"
                )))
            }
        };
        let escape = match str_field(quote, "escape", &name)? {
            None => None,
            Some(escape) => {
                let mut chars = escape.chars();
                match (chars.next(), chars.next()) {
                    (None, _) => None,
                    (Some(c), None) => Some(c),
                    _ => {
                        return Err(invalid(format!(
                            "quote 'escape' must be at most one character ({name})"
                        )))
                    }
                }
            }
        };
        rules.quotes.push(QuoteRule { character, escape });
    }

    for comment in table_list_field(entry, "block-comments", &name)? {
        let start = str_field(comment, "start", &name)?
            .filter(|s| !s.is_empty())
            .ok_or_else(|| invalid(format!("block comment 'start' is missing ({name})")))?;
        let end = str_field(comment, "end", &name)?
            .filter(|s| !s.is_empty())
            .ok_or_else(|| invalid(format!("block comment 'end' is missing ({name})")))?;
        rules.block_comments.push(BlockCommentRule::new(&start, &end));
    }

    Ok(rules)
}

/// Serialize one language as a `[[languages]]` entry
fn language_to_value(rules: &LanguageRules) -> Value {
    let str_list = |strings: &[String]| {
        Value::Array(strings.iter().map(|s| Value::String(s.clone())).collect())
    };

    let mut entry = Table::new();
    entry.insert("name".to_string(), Value::String(rules.name.clone()));
    entry.insert(
        "case-sensitive".to_string(),
        Value::Boolean(rules.case_sensitive),
    );
    entry.insert(
        "symbol-first-chars".to_string(),
        Value::String(rules.symbol_first_chars.clone()),
    );
    entry.insert(
        "symbol-chars".to_string(),
        Value::String(rules.symbol_chars.clone()),
    );
    entry.insert(
        "operator-chars".to_string(),
        Value::String(rules.operator_chars.clone()),
    );
    entry.insert("extensions".to_string(), str_list(&rules.extensions));
    entry.insert("keywords".to_string(), str_list(&rules.keywords));
    entry.insert("symbols".to_string(), str_list(&rules.symbols));
    entry.insert("line-comments".to_string(), str_list(&rules.line_comments));

    let quotes: Vec<Value> = rules
        .quotes
        .iter()
        .map(|q| {
            let mut quote = Table::new();
            quote.insert("character".to_string(), Value::String(q.character.to_string()));
            if let Some(escape) = q.escape {
                quote.insert("escape".to_string(), Value::String(escape.to_string()));
            }
            Value::Table(quote)
        })
        .collect();
    entry.insert("quotes".to_string(), Value::Array(quotes));

    let block_comments: Vec<Value> = rules
        .block_comments
        .iter()
        .map(|c| {
            let mut comment = Table::new();
            comment.insert("start".to_string(), Value::String(c.start.clone()));
            comment.insert("end".to_string(), Value::String(c.end.clone()));
            Value::Table(comment)
        })
        .collect();
    entry.insert("block-comments".to_string(), Value::Array(block_comments));

    Value::Table(entry)
}
