//! Configuration values and their declared types.
//!
//! Responsibilities:
//! - Represent the flat scalar and list values a configuration entry can hold.
//! - Describe declared entry types and check candidate values against them.
//! - Convert between configuration values and `toml::Value`.
//! - Parse raw strings (environment variables) into typed values.
//!
//! Does NOT handle:
//! - Flattening nested TOML tables (see `loader::file`).
//! - Deciding which parser an entry uses (see `types::entry`).
//!
//! Invariants:
//! - Type checks are exact: an integer never satisfies a float entry.
//! - A list satisfies `list[T]` only when every element satisfies `T`; empty lists
//!   satisfy any list type.
//! - Tables are never configuration values; they are rejected on conversion.

use std::fmt;

use toml::value::Datetime;

use crate::constants::ENV_LIST_SEPARATOR;
use crate::error::ConfigError;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Datetime(Datetime),
    List(Vec<ConfigValue>),
}

impl ConfigValue {
    /// Returns the name of this value's runtime type, as used in error messages.
    ///
    /// Lists report their element type when all elements agree, e.g. `list[string]`.
    pub fn type_name(&self) -> String {
        match self {
            Self::String(_) => "string".to_string(),
            Self::Integer(_) => "integer".to_string(),
            Self::Float(_) => "float".to_string(),
            Self::Boolean(_) => "boolean".to_string(),
            Self::Datetime(_) => "datetime".to_string(),
            Self::List(items) => {
                let mut names = items.iter().map(ConfigValue::type_name);
                match names.next() {
                    Some(first) if names.all(|name| name == first) => format!("list[{first}]"),
                    Some(_) => "list[mixed]".to_string(),
                    None => "list".to_string(),
                }
            }
        }
    }

    /// Converts a TOML value into a configuration value.
    ///
    /// `name` is only used for error context.
    pub fn from_toml(name: &str, value: toml::Value) -> Result<Self, ConfigError> {
        match value {
            toml::Value::String(s) => Ok(Self::String(s)),
            toml::Value::Integer(i) => Ok(Self::Integer(i)),
            toml::Value::Float(f) => Ok(Self::Float(f)),
            toml::Value::Boolean(b) => Ok(Self::Boolean(b)),
            toml::Value::Datetime(d) => Ok(Self::Datetime(d)),
            toml::Value::Array(items) => items
                .into_iter()
                .map(|item| Self::from_toml(name, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            toml::Value::Table(_) => Err(ConfigError::UnsupportedValue {
                name: name.to_string(),
                kind: "table".to_string(),
            }),
        }
    }

    /// Converts this value into its TOML representation.
    pub fn to_toml(&self) -> toml::Value {
        match self {
            Self::String(s) => toml::Value::String(s.clone()),
            Self::Integer(i) => toml::Value::Integer(*i),
            Self::Float(f) => toml::Value::Float(*f),
            Self::Boolean(b) => toml::Value::Boolean(*b),
            Self::Datetime(d) => toml::Value::Datetime(*d),
            Self::List(items) => toml::Value::Array(items.iter().map(Self::to_toml).collect()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&Datetime> {
        match self {
            Self::Datetime(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Renders the value as a TOML literal (strings are quoted).
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_toml())
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Datetime> for ConfigValue {
    fn from(value: Datetime) -> Self {
        Self::Datetime(value)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

/// The declared type of a configuration entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
    List(Box<ValueType>),
}

impl ValueType {
    /// Shorthand for `ValueType::List(Box::new(inner))`.
    pub fn list(inner: ValueType) -> Self {
        Self::List(Box::new(inner))
    }

    /// Returns true if `value` is an instance of this type.
    pub fn matches(&self, value: &ConfigValue) -> bool {
        match (self, value) {
            (Self::String, ConfigValue::String(_))
            | (Self::Integer, ConfigValue::Integer(_))
            | (Self::Float, ConfigValue::Float(_))
            | (Self::Boolean, ConfigValue::Boolean(_))
            | (Self::Datetime, ConfigValue::Datetime(_)) => true,
            (Self::List(inner), ConfigValue::List(items)) => {
                items.iter().all(|item| inner.matches(item))
            }
            _ => false,
        }
    }

    /// Parses a raw string into a value of this type.
    ///
    /// List types split on commas and parse each trimmed piece with the element type.
    pub fn parse_str(&self, raw: &str) -> Result<ConfigValue, String> {
        match self {
            Self::String => Ok(ConfigValue::String(raw.to_string())),
            Self::Integer => raw
                .parse()
                .map(ConfigValue::Integer)
                .map_err(|_| format!("expected integer, got {raw:?}")),
            Self::Float => raw
                .parse()
                .map(ConfigValue::Float)
                .map_err(|_| format!("expected float, got {raw:?}")),
            Self::Boolean => parse_bool(raw)
                .map(ConfigValue::Boolean)
                .ok_or_else(|| format!("expected boolean, got {raw:?}")),
            Self::Datetime => raw
                .parse::<Datetime>()
                .map(ConfigValue::Datetime)
                .map_err(|e| format!("expected datetime: {e}")),
            Self::List(inner) => {
                if matches!(**inner, Self::List(_)) {
                    return Err("nested lists cannot be parsed from a string".to_string());
                }
                raw.split(ENV_LIST_SEPARATOR)
                    .map(|piece| inner.parse_str(piece.trim()))
                    .collect::<Result<Vec<_>, _>>()
                    .map(ConfigValue::List)
            }
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Boolean => f.write_str("boolean"),
            Self::Datetime => f.write_str("datetime"),
            Self::List(inner) => write!(f, "list[{inner}]"),
        }
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
