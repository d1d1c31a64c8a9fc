//! Conversion conventions shared by flattening and reconstruction

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Text form of list cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStyle {
    /// `85.5, 92.3` / `reading, hiking`
    #[default]
    CommaSpace,
    /// `[85.5,92.3]` / `["reading","hiking"]`
    JsonArray,
}

impl FromStr for ListStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comma_space" | "comma" => Ok(ListStyle::CommaSpace),
            "json_array" | "json" => Ok(ListStyle::JsonArray),
            other => Err(format!("unknown list style: {}", other)),
        }
    }
}

/// What flattening does with a value that does not fit its column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlattenMode {
    /// Fail with `TypeMismatch`
    #[default]
    Strict,
    /// Coerce the offending value to its string representation
    Lenient,
}

impl FromStr for FlattenMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(FlattenMode::Strict),
            "lenient" => Ok(FlattenMode::Lenient),
            other => Err(format!("unknown flatten mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub list_style: ListStyle,
    pub flatten_mode: FlattenMode,
}

impl CodecOptions {
    pub fn lenient() -> Self {
        Self {
            flatten_mode: FlattenMode::Lenient,
            ..Self::default()
        }
    }

    pub fn with_list_style(mut self, list_style: ListStyle) -> Self {
        self.list_style = list_style;
        self
    }
}
