use gridcodec_codec::CodecOptions;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What happens when an edited date or list cell does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPolicy {
    /// Return the error and leave the cell untouched
    Reject,
    /// Restore the previous cell text and report the failure
    #[default]
    Revert,
    /// Store the edited text anyway and report the failure
    KeepText,
}

impl FromStr for EditPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(EditPolicy::Reject),
            "revert" => Ok(EditPolicy::Revert),
            "keep_text" | "keep" => Ok(EditPolicy::KeepText),
            other => Err(format!("unknown edit policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub codec: CodecOptions,
    pub edit_policy: EditPolicy,
}

impl SessionOptions {
    pub fn with_edit_policy(mut self, edit_policy: EditPolicy) -> Self {
        self.edit_policy = edit_policy;
        self
    }

    pub fn with_codec(mut self, codec: CodecOptions) -> Self {
        self.codec = codec;
        self
    }
}
