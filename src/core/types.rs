// File: src/core/types.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A corpus identifier: a symbol file name without its extension, lowercased.
pub type SymbolId = String;

/// One ranked result from the external object detector.
/// The detector gives no guarantee about its label vocabulary, so both fields
/// are tolerant: a missing name marks the record as unusable, and a missing or
/// junk confidence reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_confidence")]
    pub confidence: f64,
}

impl Detection {
    pub fn new(name: &str, confidence: f64) -> Self {
        Self {
            name: Some(name.to_string()),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// The label, if present and not blank.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

/// Parses a detector payload (a JSON array of records). Records that do not
/// have the expected shape are dropped one by one instead of failing the batch.
pub fn parse_detections(json: &str) -> Result<Vec<Detection>, serde_json::Error> {
    let records: Vec<Value> = serde_json::from_str(json)?;
    Ok(records
        .into_iter()
        .filter_map(|record| serde_json::from_value::<Detection>(record).ok())
        .collect())
}

/// Anything but a string reads as no name, so the record keeps its place in
/// the window and is skipped there.
fn lenient_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(name)) => Ok(Some(name)),
        _ => Ok(None),
    }
}

fn lenient_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let value = match raw {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if value.is_nan() {
        return Ok(0.0);
    }
    Ok(value.clamp(0.0, 1.0))
}

/// A detected word paired with the icon shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedTile {
    pub word: String,
    pub icon: String,
}

/// The per-request output handed to whatever surface presents the sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionEnvelope {
    pub detected: Vec<String>,
    #[serde(rename = "detectedTiles", default)]
    pub detected_tiles: Vec<DetectedTile>,
    pub suggested_words: Vec<String>,
    pub icons: Vec<String>,
    pub sentence: String,
}

/// A core word with its resolved icon, for the always-visible word board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreWordIcon {
    pub word: String,
    pub icon: String,
}
