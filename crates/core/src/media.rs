//! Issue media: how a set of drawings left the office.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Media through which drawings on an issue sheet were dispatched.
///
/// Stored as its lowercase name in the `issue_sheets.media` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Electronic,
    Physical,
}

impl MediaKind {
    /// Parse from the stored / wire name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "electronic" => Ok(Self::Electronic),
            "physical" => Ok(Self::Physical),
            other => Err(CoreError::Validation(format!(
                "Unknown media '{other}'. Must be one of: electronic, physical"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Electronic => "electronic",
            Self::Physical => "physical",
        }
    }
}

impl TryFrom<String> for MediaKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value)
    }
}
