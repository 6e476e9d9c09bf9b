// File: src/persistence.rs
use crate::core::normalizer::AliasTable;
use crate::core::vocabulary::{ManualOverrideMap, VocabularyMap};
use crate::error::{EngineError, Result};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes the map atomically: a temp file in the same directory is filled and
/// then renamed over `path`. Pretty-printed with sorted keys and a trailing
/// newline, so identical maps give identical bytes.
pub fn save_vocabulary_map(map: &VocabularyMap, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| EngineError::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| EngineError::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        serde_json::to_writer_pretty(&mut writer, map).map_err(|e| EngineError::json(path, e))?;
        writer.write_all(b"\n").map_err(|e| EngineError::io(path, e))?;
        writer.flush().map_err(|e| EngineError::io(path, e))?;
    }

    temp_file.persist(path).map_err(|e| EngineError::io(path, e.error))?;
    tracing::info!(path = %path.display(), entries = map.len(), "saved vocabulary map");
    Ok(())
}

/// Loads the persisted map. A missing file is not fatal: the engine still
/// answers, with fallback icons everywhere.
pub fn load_vocabulary_map(path: &Path) -> Result<VocabularyMap> {
    match read_json::<VocabularyMap>(path)? {
        Some(map) => {
            tracing::info!(path = %path.display(), entries = map.len(), "loaded vocabulary map");
            Ok(map)
        }
        None => {
            tracing::warn!(path = %path.display(), "vocabulary map not found; run the map builder first");
            Ok(VocabularyMap::new())
        }
    }
}

/// Loads the core vocabulary: uppercased, blank entries and repeats dropped,
/// order kept. The file is required.
pub fn load_core_vocabulary(path: &Path) -> Result<Vec<String>> {
    let raw: Vec<String> = read_json(path)?
        .ok_or_else(|| EngineError::MissingVocabularyFile { path: path.to_path_buf() })?;

    let mut seen = HashSet::new();
    let words: Vec<String> = raw
        .iter()
        .map(|word| word.trim().to_uppercase())
        .filter(|word| !word.is_empty() && seen.insert(word.clone()))
        .collect();
    tracing::info!(path = %path.display(), words = words.len(), "loaded core vocabulary");
    Ok(words)
}

/// Loads curator overrides if the file exists; keys are uppercased.
pub fn load_overrides(path: &Path) -> Result<ManualOverrideMap> {
    let raw: BTreeMap<String, String> = read_json(path)?.unwrap_or_default();
    let mut overrides = ManualOverrideMap::new();
    for (word, file_name) in &raw {
        overrides.insert(word, file_name.trim());
    }
    if !overrides.is_empty() {
        tracing::info!(path = %path.display(), overrides = overrides.len(), "loaded manual overrides");
    }
    Ok(overrides)
}

/// Layers aliases from `path` (a JSON object, label -> token) over the built-in table.
pub fn load_aliases(path: &Path) -> Result<AliasTable> {
    let extra: BTreeMap<String, String> = read_json(path)?.unwrap_or_default();
    Ok(AliasTable::default().merged_with(extra))
}

/// Lists symbol file names with `extension` (case-insensitive), sorted.
/// A missing or unreadable directory yields an empty listing and one warning.
pub fn scan_symbol_directory(dir: &Path, extension: &str) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(
                path = %dir.display(),
                error = %err,
                "symbol directory unavailable; every word will use the fallback icon"
            );
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .collect();
    names.sort();
    tracing::info!(path = %dir.display(), symbols = names.len(), "scanned symbol directory");
    names
}

/// `Ok(None)` when the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(EngineError::io(path, err)),
    };
    let value = serde_json::from_reader(BufReader::new(file)).map_err(|e| EngineError::json(path, e))?;
    Ok(Some(value))
}
