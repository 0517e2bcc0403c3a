//! Schema entries: one declared configuration field with its metadata.
//!
//! Responsibilities:
//! - Carry the declared type, default, documentation text, validator, and secrecy flag.
//! - Resolve the string parser used by the environment source from the declared type.
//!
//! Does NOT handle:
//! - Registering entries under a name (see `schema`).
//! - Running validation (see `loader::validation`).
//!
//! Invariants:
//! - The parser is fixed when the entry is built; nothing inspects types at load time.
//! - `comment` and `description` are documentation only and never validated.

use std::fmt;
use std::sync::Arc;

use crate::loader::Config;
use crate::types::value::{ConfigValue, ValueType};

/// Parses a raw environment string into a typed value.
pub type EnvParser = Arc<dyn Fn(&str) -> Result<ConfigValue, String> + Send + Sync>;

/// Predicate invoked with the instance being loaded and the candidate value.
pub type ValidatorFn = Arc<dyn Fn(&Config, &ConfigValue) -> Result<(), String> + Send + Sync>;

/// Extra validation applied to a candidate after its type has been checked.
#[derive(Clone)]
pub enum Validator {
    /// Any error returned by the predicate fails the candidate.
    Predicate(ValidatorFn),
    /// The candidate must equal one of these values.
    OneOf(Vec<ConfigValue>),
}

impl Validator {
    /// Creates a predicate validator from a closure.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Config, &ConfigValue) -> Result<(), String> + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::OneOf(values) => f.debug_tuple("OneOf").field(values).finish(),
        }
    }
}

/// A single declared configuration entry.
#[derive(Clone)]
pub struct ConfigEntry {
    value_type: ValueType,
    default: Option<ConfigValue>,
    comment: Option<String>,
    description: Option<String>,
    validator: Option<Validator>,
    secret: bool,
    parser: EnvParser,
}

impl ConfigEntry {
    /// Create an entry of the given type with no default.
    pub fn new(value_type: ValueType) -> Self {
        let parser = default_parser(&value_type);
        Self {
            value_type,
            default: None,
            comment: None,
            description: None,
            validator: None,
            secret: false,
            parser,
        }
    }

    pub fn string() -> Self {
        Self::new(ValueType::String)
    }

    pub fn integer() -> Self {
        Self::new(ValueType::Integer)
    }

    pub fn float() -> Self {
        Self::new(ValueType::Float)
    }

    pub fn boolean() -> Self {
        Self::new(ValueType::Boolean)
    }

    pub fn datetime() -> Self {
        Self::new(ValueType::Datetime)
    }

    /// Create a list entry whose elements are of type `inner`.
    pub fn list(inner: ValueType) -> Self {
        Self::new(ValueType::list(inner))
    }

    /// Set the default value. Entries without a default must be supplied by a source.
    pub fn default(mut self, value: impl Into<ConfigValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the one-line comment written above the entry in generated documents.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set the long-form description written (wrapped) in generated documents.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Restrict the entry to a finite set of allowed values.
    pub fn one_of<I, V>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ConfigValue>,
    {
        self.validator(Validator::OneOf(allowed.into_iter().map(Into::into).collect()))
    }

    /// Mark the entry as secret: its value never appears in generated output or logs.
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Replace the parser used when reading this entry from the environment.
    pub fn parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(&str) -> Result<ConfigValue, String> + Send + Sync + 'static,
    {
        self.parser = Arc::new(parser);
        self
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn default_value(&self) -> Option<&ConfigValue> {
        self.default.as_ref()
    }

    pub fn comment_text(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn validator_ref(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    /// Parse a raw environment string with this entry's parser.
    pub fn parse_env(&self, raw: &str) -> Result<ConfigValue, String> {
        (self.parser)(raw)
    }
}

impl fmt::Debug for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let default: &dyn fmt::Debug = match (&self.default, self.secret) {
            (Some(_), true) => &"[REDACTED]",
            (default, _) => default,
        };
        f.debug_struct("ConfigEntry")
            .field("value_type", &self.value_type)
            .field("default", default)
            .field("comment", &self.comment)
            .field("description", &self.description)
            .field("validator", &self.validator)
            .field("secret", &self.secret)
            .finish_non_exhaustive()
    }
}

fn default_parser(value_type: &ValueType) -> EnvParser {
    let value_type = value_type.clone();
    Arc::new(move |raw| value_type.parse_str(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_without_default_is_required() {
        let entry = ConfigEntry::string().comment("The root url");
        assert!(entry.default_value().is_none());
        assert_eq!(entry.comment_text(), Some("The root url"));
        assert!(!entry.is_secret());
    }

    #[test]
    fn test_parser_resolved_from_declared_type() {
        let entry = ConfigEntry::list(ValueType::Integer);
        assert_eq!(
            entry.parse_env("1,2").unwrap(),
            ConfigValue::from(vec![1, 2])
        );
    }

    #[test]
    fn test_custom_parser_overrides_default() {
        let entry = ConfigEntry::string().parser(|raw| Ok(ConfigValue::from(raw.to_uppercase())));
        assert_eq!(entry.parse_env("abc").unwrap(), ConfigValue::from("ABC"));
    }

    #[test]
    fn test_one_of_builds_validator() {
        let entry = ConfigEntry::string().one_of(["debug", "info"]);
        match entry.validator_ref() {
            Some(Validator::OneOf(values)) => assert_eq!(values.len(), 2),
            other => panic!("expected OneOf validator, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_does_not_expose_secret_default() {
        let entry = ConfigEntry::string().default("hunter2").secret();
        let debug_output = format!("{:?}", entry);
        assert!(
            !debug_output.contains("hunter2"),
            "Debug output should not contain the secret default"
        );
        assert!(debug_output.contains("REDACTED"));
    }
}
