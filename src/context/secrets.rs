//! Secret storage and rendering

use crate::constants::config::SECRET_ENV_PREFIX;
use crate::task::TaskError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;

/// A secret of arbitrary shape
///
/// Secrets are usually plain strings, but structured values (maps, lists,
/// numbers) are accepted as well. The `Display` form is what ends up on the
/// wire:
///
/// - a top-level string is written as-is
/// - maps are written as `{'key': value, ...}`
/// - lists are written as `[a, b]`
/// - strings inside maps and lists are single-quoted
/// - `true`/`false`/`null` are written as `True`/`False`/`None`
///
/// so `{"key": 42}` displays as `{'key': 42}`.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SecretValue(Value);

impl From<Value> for SecretValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for SecretValue {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<String> for SecretValue {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write_nested(f, other),
        }
    }
}

// Never print secret material through Debug.
impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(***)")
    }
}

fn write_nested(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("None"),
        Value::Bool(true) => f.write_str("True"),
        Value::Bool(false) => f.write_str("False"),
        Value::Number(n) => write!(f, "{}", n),
        Value::String(s) => write_quoted(f, s),
        Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_nested(f, item)?;
            }
            f.write_str("]")
        }
        Value::Object(map) => {
            f.write_str("{")?;
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_quoted(f, key)?;
                f.write_str(": ")?;
                write_nested(f, item)?;
            }
            f.write_str("}")
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    // Double quotes only when that avoids escaping a single quote.
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    write!(f, "{}", quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c if c == quote => write!(f, "\\{}", c)?,
            c if c.is_control() && (c as u32) <= 0xff => write!(f, "\\x{:02x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "{}", quote)
}

/// Named secrets available to a task run
#[derive(Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Secrets {
    values: BTreeMap<String, SecretValue>,
}

impl Secrets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect secrets from `GHPR_SECRET_<NAME>` environment variables
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_env() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Like [`Secrets::from_vars`], skipping pairs that are not valid Unicode
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_vars(vars.into_iter().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Collect secrets from `(name, value)` pairs carrying the env prefix
    ///
    /// Pairs without the prefix, or with nothing after it, are ignored.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(SECRET_ENV_PREFIX)
                    .filter(|name| !name.is_empty())
                    .map(|name| (name.to_string(), SecretValue::from(value)))
            })
            .collect()
    }

    /// Add or replace a secret
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SecretValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a secret by exact name
    ///
    /// # Errors
    /// Returns [`TaskError::SecretNotFound`] if no secret has that name
    pub fn get(&self, name: &str) -> Result<&SecretValue, TaskError> {
        self.values
            .get(name)
            .ok_or_else(|| TaskError::SecretNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge `other` into this store; entries from `other` win
    pub fn extend(&mut self, other: Secrets) {
        self.values.extend(other.values);
    }

    /// Names of all stored secrets
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Secrets
where
    K: Into<String>,
    V: Into<SecretValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut secrets = Secrets::new();
        for (name, value) in iter {
            secrets.insert(name, value);
        }
        secrets
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
