//! Column typing for record collections

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a field's values, fixed once per collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    /// String, number or boolean, passed through unchanged
    Scalar,
    Date,
    NumberList,
    StringList,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldType::Scalar => "scalar",
            FieldType::Date => "date",
            FieldType::NumberList => "list-of-number",
            FieldType::StringList => "list-of-string",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub field_type: FieldType,
}

impl Column {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Ordered column list of a record collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in first-seen order
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.find_column(name).map(|c| c.field_type)
    }

    /// Keep only `names`, in the given order. Returns the first unknown name on failure.
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> Result<Schema, String> {
        names
            .iter()
            .map(|name| {
                self.find_column(name.as_ref())
                    .cloned()
                    .ok_or_else(|| name.as_ref().to_string())
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Schema::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new(vec![
            Column::new("name", FieldType::Scalar),
            Column::new("birthday", FieldType::Date),
            Column::new("scores", FieldType::NumberList),
        ])
    }

    #[test]
    fn test_project_reorders() {
        let projected = sample().project(&["scores", "name"]).unwrap();
        assert_eq!(projected.names(), vec!["scores", "name"]);
        assert_eq!(projected.field_type("scores"), Some(FieldType::NumberList));
    }

    #[test]
    fn test_project_unknown_column() {
        assert_eq!(sample().project(&["missing"]), Err("missing".to_string()));
    }

    #[test]
    fn test_field_type_serde_names() {
        let json = serde_json::to_string(&FieldType::NumberList).unwrap();
        assert_eq!(json, r#""list-of-number""#);
        assert_eq!(FieldType::StringList.to_string(), "list-of-string");
    }
}
