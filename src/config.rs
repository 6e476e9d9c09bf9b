// File: src/config.rs
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Where symbol icons are served from, and the fallback used for unmatched words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    pub symbol_prefix: String,
    pub fallback_icon: String,
    /// A map value naming "no symbol"; it resolves to `fallback_icon`.
    pub sentinel_file: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            symbol_prefix: "/acc/symbols/".to_string(),
            fallback_icon: "/acc/unknown.svg".to_string(),
            sentinel_file: "unknown.svg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// How many of the detector's top results are considered.
    pub max_detections: usize,
    /// Substrings that make a primary noun read as something to want.
    pub food_keywords: Vec<String>,
    /// Append "AND <second word>" when a second object was detected.
    pub conjoin_secondary: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        let food_keywords = [
            "pizza", "cookie", "apple", "banana", "cake", "bread", "sandwich", "hot dog",
            "hotdog", "hamburger", "burger", "orange", "carrot", "broccoli", "cup", "bottle",
            "donut", "ice cream", "pasta", "rice", "soup", "cereal", "milk", "juice", "water",
            "drink", "food", "snack", "meal",
        ];
        Self {
            max_detections: 3,
            food_keywords: food_keywords.iter().map(|k| k.to_string()).collect(),
            conjoin_secondary: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub extra_verbs: Vec<String>,
    pub extra_nouns: Vec<String>,
    /// Suffixes naming the to-infinitive form of an action symbol, in priority order.
    pub infinitive_suffixes: Vec<String>,
    /// Suffixes naming numbered variants of an action symbol, in priority order.
    pub numbered_suffixes: Vec<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        let strings = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        Self {
            extra_verbs: strings(&[
                "WANT", "SEE", "LOOK", "GO", "STOP", "EAT", "DRINK", "PLAY", "HELP", "LIKE",
                "FEEL", "OPEN", "CLOSE", "COME",
            ]),
            extra_nouns: strings(&[
                "BALL", "BOOK", "CAR", "DOG", "CAT", "PHONE", "CUP", "BOTTLE", "TOY", "CHAIR",
                "BED", "PIZZA", "APPLE", "BANANA",
            ]),
            infinitive_suffixes: strings(&["_,_to", "_to"]),
            numbered_suffixes: strings(&["_1_,_to", "_2_,_to"]),
        }
    }
}

/// Everything the engine and the offline builder need to locate their inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub symbols_dir: PathBuf,
    /// Extension of symbol files, without the dot.
    pub symbol_extension: String,
    pub core_words_path: PathBuf,
    pub vocabulary_map_path: PathBuf,
    pub overrides_path: PathBuf,
    /// Extra label aliases layered over the built-in table.
    pub aliases_path: Option<PathBuf>,
    pub icons: IconConfig,
    pub synthesis: SynthesisConfig,
    pub builder: BuilderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            symbols_dir: PathBuf::from("public/acc/symbols"),
            symbol_extension: "svg".to_string(),
            core_words_path: PathBuf::from("core_words.json"),
            vocabulary_map_path: PathBuf::from("aac_map.json"),
            overrides_path: PathBuf::from("manual_symbol_map.json"),
            aliases_path: None,
            icons: IconConfig::default(),
            synthesis: SynthesisConfig::default(),
            builder: BuilderConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Reads a JSON config file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| EngineError::io(path, e))?;
        let config: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| EngineError::json(path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let ext = self.symbol_extension.trim_start_matches('.');
        if ext.is_empty() {
            return Err(EngineError::InvalidConfig("symbol_extension is empty".into()));
        }
        if self.synthesis.max_detections == 0 {
            return Err(EngineError::InvalidConfig("synthesis.max_detections must be at least 1".into()));
        }
        if self.icons.fallback_icon.trim().is_empty() {
            return Err(EngineError::InvalidConfig("icons.fallback_icon is empty".into()));
        }
        Ok(())
    }

    /// The symbol extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.symbol_extension.trim_start_matches('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"symbols_dir": "/srv/symbols", "synthesis": {{"conjoin_secondary": true}}}}"#)
            .unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.symbols_dir, PathBuf::from("/srv/symbols"));
        assert!(config.synthesis.conjoin_secondary);
        assert_eq!(config.synthesis.max_detections, 3);
        assert_eq!(config.icons, IconConfig::default());
        assert_eq!(config.builder.infinitive_suffixes, ["_,_to", "_to"]);
    }

    #[test]
    fn unusable_values_are_rejected() {
        let mut config = EngineConfig::default();
        config.symbol_extension = ".".into();
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        let mut config = EngineConfig::default();
        config.synthesis.max_detections = 0;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn extension_drops_leading_dot() {
        let mut config = EngineConfig::default();
        config.symbol_extension = ".png".into();
        assert_eq!(config.extension(), "png");
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let err = EngineConfig::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }
}
