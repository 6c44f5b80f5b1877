//! Translation capability.
//!
//! Widgets never look text up in a global registry; they receive an
//! `Arc<dyn Translator>` through their form context. [`IdentityTranslator`]
//! returns keys unchanged, which is what component tests assert against.
//! [`MessageCatalog`] resolves keys from a nested message table, with
//! `%{name}` interpolation and a `_` default argument.

use crate::error::ConfigError;
use crate::validation::ValidationError;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Named interpolation arguments. The `_` entry is the fallback text used
/// when a key has no translation.
pub type TranslateArgs = BTreeMap<String, String>;

/// Key → display text lookup.
pub trait Translator: Send + Sync {
    /// Translate `key`, interpolating `args`.
    fn translate(&self, key: &str, args: &TranslateArgs) -> String;

    /// Translate a validation error.
    fn translate_error(&self, error: &ValidationError) -> String {
        self.translate(&error.key, &error.args)
    }
}

/// Returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, key: &str, _args: &TranslateArgs) -> String {
        key.to_string()
    }
}

/// Flat key → message table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a message.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.insert(key, message);
        self
    }

    /// Add or replace a message.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Raw lookup without interpolation.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Build from nested TOML tables; nested keys are joined with dots.
    ///
    /// ```
    /// use adminform_core::i18n::MessageCatalog;
    ///
    /// let catalog = MessageCatalog::from_toml(r#"
    /// [resources.posts.fields]
    /// publishedAt = "Published at"
    /// "#).expect("valid toml");
    /// assert_eq!(catalog.get("resources.posts.fields.publishedAt"), Some("Published at"));
    /// ```
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(source)?;
        let mut catalog = Self::new();
        flatten_toml(&mut catalog, "", &toml::Value::Table(table))?;
        Ok(catalog)
    }

    /// Load a TOML catalog from disk.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Merge another catalog on top of this one.
    pub fn extend(&mut self, other: Self) {
        self.messages.extend(other.messages);
    }
}

fn flatten_toml(
    catalog: &mut MessageCatalog,
    prefix: &str,
    value: &toml::Value,
) -> Result<(), ConfigError> {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let full = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_toml(catalog, &full, child)?;
            }
            Ok(())
        }
        toml::Value::String(s) => {
            catalog.insert(prefix, s.clone());
            Ok(())
        }
        other => Err(ConfigError::InvalidValue(format!(
            "message {prefix:?} must be a string, got {}",
            other.type_str()
        ))),
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, key: &str, args: &TranslateArgs) -> String {
        let template = self
            .messages
            .get(key)
            .or_else(|| args.get("_"))
            .map_or(key, String::as_str);
        interpolate(template, args)
    }
}

/// Replace `%{name}` placeholders with `args[name]`. Unknown placeholders
/// are left as written.
#[must_use]
pub fn interpolate(template: &str, args: &TranslateArgs) -> String {
    if args.is_empty() || !template.contains("%{") {
        return template.to_string();
    }
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("%{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match args.get(name) {
                    Some(value) if name != "_" => out.push_str(value),
                    _ => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Translation key for a field label: `resources.<resource>.fields.<source>`.
#[must_use]
pub fn field_label_key(resource: &str, source: &str) -> String {
    format!("resources.{resource}.fields.{source}")
}

/// Human-readable default label for a source: `publishedAt` → `Published at`.
#[must_use]
pub fn humanize(source: &str) -> String {
    let leaf = source.rsplit('.').next().unwrap_or(source);
    let mut words = String::with_capacity(leaf.len() + 4);
    for (i, c) in leaf.chars().enumerate() {
        if c == '_' || c == '-' {
            words.push(' ');
        } else if c.is_uppercase() && i > 0 {
            words.push(' ');
            words.extend(c.to_lowercase());
        } else {
            words.push(c);
        }
    }
    let trimmed = words.trim();
    let mut chars = trimmed.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Resolve the label of a field.
///
/// An explicit `label` is translated as a key; otherwise the resource field
/// key is used, with the humanized source as the `_` fallback.
pub fn field_label(
    translator: &dyn Translator,
    resource: &str,
    source: &str,
    label: Option<&str>,
) -> String {
    match label {
        Some(label) => translator.translate(label, &TranslateArgs::new()),
        None => {
            let mut args = TranslateArgs::new();
            args.insert("_".to_string(), humanize(source));
            translator.translate(&field_label_key(resource, source), &args)
        }
    }
}
