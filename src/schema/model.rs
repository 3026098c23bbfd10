use crate::foundation::error::{CanopyError, CanopyResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Stored form of a [`crate::Block`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedBlock {
    /// Pattern reference and parameter overrides.
    pub pattern: SerializedPattern,
    /// Show time at which the block starts.
    pub start_time: f64,
    /// Block length in seconds.
    pub duration: f64,
    /// Extra time shift.
    #[serde(default)]
    pub render_offset: f64,
}

/// Pattern reference by catalog name plus the parameters that differ from the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedPattern {
    /// Catalog key.
    pub name: String,
    /// Stored parameters, keyed by uniform name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, SerializedParam>,
}

/// One stored parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedParam {
    /// Static value: number, hex color, palette stop list, or `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Timeline segments in order. Empty means not animated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<SerializedVariation>,
}

/// One stored timeline segment: `{kind, duration, ...kind fields}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedVariation {
    /// Kind tag, e.g. `"linear"`.
    pub kind: String,
    /// Segment length in seconds.
    pub duration: f64,
    /// Kind-specific fields.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl SerializedBlock {
    /// Parse a stored block from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CanopyResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CanopyError::serde(format!("parse block JSON: {e}")))
    }

    /// Parse a stored block from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CanopyResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CanopyError::validation(format!("open block JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> CanopyResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CanopyError::serde(format!("write block JSON: {e}")))
    }
}
