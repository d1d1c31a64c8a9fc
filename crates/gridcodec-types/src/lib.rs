//! gridcodec value model
//!
//! Typed records as they exist before flattening into an editable grid and
//! after being read back from it. Values are JSON-shaped with an added
//! calendar date variant.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

mod types;
pub use types::*;

/// ISO calendar date format used for date cells
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("Nested objects are not supported (field {0})")]
    NestedObject(String),

    #[error("Expected a JSON object per record, got {0}")]
    NotAnObject(String),
}

/// A single field value
///
/// `Null` is the explicit "no value" marker, distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    List(Vec<Value>),
}

impl Value {
    /// Convert a JSON value, optionally promoting `YYYY-MM-DD` strings to dates
    pub fn from_json(json: serde_json::Value, infer_dates: bool) -> Result<Self, ValueError> {
        Self::from_json_field(json, infer_dates, "")
    }

    fn from_json_field(
        json: serde_json::Value,
        infer_dates: bool,
        field: &str,
    ) -> Result<Self, ValueError> {
        use serde_json::Value as Json;

        Ok(match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => {
                if infer_dates {
                    if let Some(date) = parse_date(&s) {
                        return Ok(Value::Date(date));
                    }
                }
                Value::String(s)
            }
            // Only whole field values become dates; list elements stay as written
            Json::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| Self::from_json_field(item, false, field))
                    .collect::<Result<_, _>>()?,
            ),
            Json::Object(_) => return Err(ValueError::NestedObject(field.to_string())),
        })
    }

    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::Date(d) => Json::String(d.format(DATE_FORMAT).to_string()),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// True for the empty string, which marks a placeholder cell
    pub fn is_blank(&self) -> bool {
        matches!(self, Value::String(s) if s.is_empty())
    }

    /// Short name of the variant, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::List(_) => "list",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            // Debug keeps the fractional part, so 88.0 stays distinguishable from 88
            Value::Float(x) => write!(f, "{:?}", x),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Value::from_json(json, false).map_err(serde::de::Error::custom)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// One logical row: field names mapped to values, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field, keeping the position of an existing one
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn from_json_object(json: serde_json::Value, infer_dates: bool) -> Result<Self, ValueError> {
        let map = match json {
            serde_json::Value::Object(map) => map,
            other => return Err(ValueError::NotAnObject(other.to_string())),
        };

        let mut record = Record::new();
        for (name, value) in map {
            let value = Value::from_json_field(value, infer_dates, &name)?;
            record.fields.push((name, value));
        }
        Ok(record)
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(n, v)| (n.clone(), v.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

/// Field order is presentation only; two records are equal when they hold
/// the same fields with the same values.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .fields
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Record::from_json_object(json, false).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_infers_dates() {
        let json = serde_json::json!({"name": "Alice", "birthday": "1993-01-15", "scores": [85.5, 92]});
        let record = Record::from_json_object(json, true).unwrap();

        assert_eq!(
            record.get("birthday"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(1993, 1, 15).unwrap()))
        );
        assert_eq!(
            record.get("scores"),
            Some(&Value::List(vec![Value::Float(85.5), Value::Int(92)]))
        );
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["name", "birthday", "scores"]);
    }

    #[test]
    fn test_dates_not_inferred_inside_lists() {
        let json = serde_json::json!({"tags": ["reading", "2020-01-01"]});
        let record = Record::from_json_object(json, true).unwrap();
        assert_eq!(record.get("tags"), Some(&Value::from(vec!["reading", "2020-01-01"])));
    }

    #[test]
    fn test_from_json_without_inference_keeps_strings() {
        let json = serde_json::json!({"birthday": "1993-01-15"});
        let record = Record::from_json_object(json, false).unwrap();
        assert_eq!(record.get("birthday"), Some(&Value::from("1993-01-15")));
    }

    #[test]
    fn test_nested_object_rejected() {
        let json = serde_json::json!({"address": {"city": "Chicago"}});
        let err = Record::from_json_object(json, true).unwrap_err();
        assert_eq!(err, ValueError::NestedObject("address".to_string()));
    }

    #[test]
    fn test_record_equality_ignores_field_order() {
        let a = Record::new().with("x", 1i64).with("y", "two");
        let b = Record::new().with("y", "two").with("x", 1i64);
        assert_eq!(a, b);
        assert_ne!(a, Record::new().with("x", 1i64));
    }

    #[test]
    fn test_display_keeps_float_fraction() {
        assert_eq!(Value::Float(88.0).to_string(), "88.0");
        assert_eq!(Value::Float(85.5).to_string(), "85.5");
        assert_eq!(Value::Int(88).to_string(), "88");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_serialize_record() {
        let record = Record::new()
            .with("name", "Bob")
            .with("birthday", NaiveDate::from_ymd_opt(1998, 4, 22).unwrap())
            .with("hobbies", vec!["swimming", "gaming"]);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Bob","birthday":"1998-04-22","hobbies":["swimming","gaming"]}"#
        );
    }
}
