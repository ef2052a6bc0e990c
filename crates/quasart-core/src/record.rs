// Generic record access for anything the query engine can filter
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Primitive value of a named record field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// An empty text value means "no constraint" when used as a filter
    pub fn is_wildcard(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }

    /// Exact equality between a stored value and a filter value.
    ///
    /// Text filters compare against the rendered value so that "3" matches
    /// an integer field holding 3. Integer and float values compare numerically.
    pub fn matches(&self, expected: &FieldValue) -> bool {
        match (self, expected) {
            (actual, FieldValue::Text(s)) => actual.to_string() == *s,
            (FieldValue::Int(a), FieldValue::Number(b))
            | (FieldValue::Number(b), FieldValue::Int(a)) => *a as f64 == *b,
            (actual, expected) => actual == expected,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Named counters computed over a whole collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats(BTreeMap<&'static str, usize>);

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, label: &'static str, value: usize) -> Self {
        self.0.insert(label, value);
        self
    }

    /// Missing labels read as zero
    pub fn get(&self, label: &str) -> usize {
        self.0.get(label).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

/// Anything with named fields the query engine can look at
pub trait Record {
    fn id(&self) -> u64;

    /// Value of a named field, `None` if the record has no such field
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Rewrite a filter value into the form `field` reports, so aliases
    /// like a translated status label still match. Identity by default.
    fn canonical_filter(_field: &str, value: &FieldValue) -> FieldValue
    where
        Self: Sized,
    {
        value.clone()
    }

    /// Text fields searched when a query doesn't name its own
    fn search_fields() -> &'static [&'static str]
    where
        Self: Sized;

    /// Fixed aggregates over a full collection
    fn summarize(records: &[Self]) -> Stats
    where
        Self: Sized;
}
