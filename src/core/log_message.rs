//! Structured log message: a sorted map of field name to value
//!
//! This module provides:
//! - `FieldValue`: dynamically typed field value
//! - `LogMessage`: the per-call field container consumed by the logger

use super::call_site::CallSite;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Reserved key holding the emission timestamp. Always set by the logger.
pub const KEY_TIME: &str = "time";
/// Reserved key holding the canonical level name. Always set by the logger.
pub const KEY_LEVEL: &str = "level";
/// Reserved key for the human-readable message.
pub const KEY_MESSAGE: &str = "message";
/// Reserved key for an error description.
pub const KEY_ERROR: &str = "error";

/// Reserved keys in the order the text formatter renders them.
pub const FIXED_KEYS: [&str; 4] = [KEY_TIME, KEY_LEVEL, KEY_MESSAGE, KEY_ERROR];

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Whether the text formatter renders this value without quotes.
    pub fn is_bare(&self) -> bool {
        matches!(
            self,
            FieldValue::Int(_) | FieldValue::Float(_) | FieldValue::Bool(_)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

// JSON has no representation for NaN or infinities; refuse them instead of
// silently writing `null`.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            FieldValue::Float(f) => Err(S::Error::custom(format!(
                "cannot serialize non-finite float {f}"
            ))),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::List(items) => serializer.collect_seq(items),
            FieldValue::Map(map) => serializer.collect_map(map),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
            nested => match serde_json::to_string(nested) {
                Ok(json) => f.write_str(&json),
                Err(_) => write!(f, "{:?}", nested),
            },
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u16> for FieldValue {
    fn from(i: u16) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u64> for FieldValue {
    fn from(i: u64) -> Self {
        i64::try_from(i)
            .map(FieldValue::Int)
            .unwrap_or(FieldValue::Float(i as f64))
    }
}

impl From<usize> for FieldValue {
    fn from(i: usize) -> Self {
        FieldValue::from(i as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(map: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Map(map)
    }
}

impl From<LogMessage> for FieldValue {
    fn from(msg: LogMessage) -> Self {
        FieldValue::Map(msg.fields)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => FieldValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                FieldValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Fields for a single log call.
///
/// Setters take `&mut self` and return it, so one instance accumulates
/// fields across chained calls. Keys are kept sorted, which makes JSON
/// output deterministic.
///
/// # Example
///
/// ```
/// use rust_stream_logger::LogMessage;
///
/// let mut msg = LogMessage::new();
/// msg.put_message("request failed")
///     .put("status", 502)
///     .put_error("upstream timed out");
///
/// assert_eq!(msg.len(), 3);
/// assert_eq!(msg.get("status").and_then(|v| v.as_i64()), Some(502));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogMessage {
    fields: BTreeMap<String, FieldValue>,
}

impl LogMessage {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Set a field, replacing any previous value under the same key
    pub fn put<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Set the reserved `message` field
    pub fn put_message<V: Into<FieldValue>>(&mut self, value: V) -> &mut Self {
        self.put(KEY_MESSAGE, value)
    }

    /// Set the reserved `error` field
    pub fn put_error<V: Into<FieldValue>>(&mut self, value: V) -> &mut Self {
        self.put(KEY_ERROR, value)
    }

    /// Add a field (consuming version)
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.put(key, value);
        self
    }

    #[must_use]
    pub fn with_message<V: Into<FieldValue>>(self, value: V) -> Self {
        self.with_field(KEY_MESSAGE, value)
    }

    #[must_use]
    pub fn with_error<V: Into<FieldValue>>(self, value: V) -> Self {
        self.with_field(KEY_ERROR, value)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Get a field, or `fallback` when the key is absent
    pub fn get_or<V: Into<FieldValue>>(&self, key: &str, fallback: V) -> FieldValue {
        match self.fields.get(key) {
            Some(value) => value.clone(),
            None => fallback.into(),
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(FieldValue::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in sorted key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// Attach `module`, `function` and `file` (`path:line`) fields
    /// describing a call site. Unknown parts are left out.
    pub fn add_call_site(&mut self, site: &CallSite) -> &mut Self {
        if let Some(module) = site.module {
            self.put("module", module);
        }
        if let Some(function) = site.function {
            self.put("function", function);
        }
        self.put("file", format!("{}:{}", site.file, site.line))
    }
}

impl From<&str> for LogMessage {
    fn from(message: &str) -> Self {
        LogMessage::new().with_message(message)
    }
}

impl From<String> for LogMessage {
    fn from(message: String) -> Self {
        LogMessage::new().with_message(message)
    }
}

impl From<BTreeMap<String, FieldValue>> for LogMessage {
    fn from(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }
}

impl<K, V> FromIterator<(K, V)> for LogMessage
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut msg = LogMessage::new();
        msg.extend(iter);
        msg
    }
}

impl<K, V> Extend<(K, V)> for LogMessage
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl IntoIterator for LogMessage {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
