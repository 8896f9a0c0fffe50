use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of value a command keyword expects in the label that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Str,
    Int,
    Bool,
}

impl ValueKind {
    /// Casts a single wire label to this kind.
    ///
    /// Booleans never fail: a label is `false` iff it starts with `f`/`F` or
    /// is exactly `"0"`.
    pub fn cast(&self, label: &str) -> Result<CommandValue, DomainError> {
        match self {
            Self::Str => Ok(CommandValue::Str(label.to_string())),
            Self::Int => label.parse::<i64>().map(CommandValue::Int).map_err(|e| {
                DomainError::InvalidDnsRequest(format!(
                    "label '{}' is not an integer: {}",
                    label, e
                ))
            }),
            Self::Bool => Ok(CommandValue::Bool(label_to_bool(label))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Bool => "bool",
        }
    }
}

pub fn label_to_bool(label: &str) -> bool {
    let starts_with_f = label
        .as_bytes()
        .first()
        .is_some_and(|b| b.eq_ignore_ascii_case(&b'f'));
    !starts_with_f && label != "0"
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl CommandValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for CommandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Declarative schema for the command section of a query name:
/// keyword label → ordered list of expected value kinds.
///
/// An empty kind list declares a zero-argument flag. Keywords are stored
/// lowercase and matched ASCII case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandMapping {
    entries: Vec<(String, Vec<ValueKind>)>,
}

impl CommandMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, keyword: &str, kinds: &[ValueKind]) -> Self {
        self.insert(keyword, kinds.to_vec());
        self
    }

    pub fn insert(&mut self, keyword: &str, kinds: Vec<ValueKind>) {
        let keyword = keyword.to_ascii_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == keyword) {
            Some(entry) => entry.1 = kinds,
            None => self.entries.push((keyword, kinds)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&[ValueKind]> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(label))
            .map(|(_, kinds)| kinds.as_slice())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Command arguments decoded from one query name.
///
/// A `None` slot means the value label was missing (qname minimization) or
/// failed to cast to its declared kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    entries: Vec<(String, Vec<Option<CommandValue>>)>,
    consumed_labels: usize,
}

impl ParsedCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the values for `keyword`, replacing an earlier occurrence.
    pub fn insert(&mut self, keyword: &str, values: Vec<Option<CommandValue>>) {
        let keyword = keyword.to_ascii_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == keyword) {
            Some(entry) => entry.1 = values,
            None => self.entries.push((keyword, values)),
        }
    }

    pub fn with(mut self, keyword: &str, values: Vec<Option<CommandValue>>) -> Self {
        self.insert(keyword, values);
        self
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.values(keyword).is_some()
    }

    pub fn values(&self, keyword: &str) -> Option<&[Option<CommandValue>]> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(keyword))
            .map(|(_, v)| v.as_slice())
    }

    pub fn first(&self, keyword: &str) -> Option<&CommandValue> {
        self.values(keyword)
            .and_then(|values| values.first())
            .and_then(|value| value.as_ref())
    }

    pub fn first_str(&self, keyword: &str) -> Option<&str> {
        self.first(keyword).and_then(CommandValue::as_str)
    }

    pub fn first_bool(&self, keyword: &str) -> Option<bool> {
        self.first(keyword).and_then(CommandValue::as_bool)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Option<CommandValue>])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn consumed_labels(&self) -> usize {
        self.consumed_labels
    }

    pub fn set_consumed_labels(&mut self, consumed_labels: usize) {
        self.consumed_labels = consumed_labels;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
