// File: src/c_api.rs
use crate::config::EngineConfig;
use crate::core::types::parse_detections;
use crate::SentenceEngine;
use std::ffi::{c_char, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::ptr;
use std::sync::OnceLock;

static ENGINE: OnceLock<SentenceEngine> = OnceLock::new();

pub const AAC_OK: i32 = 0;
pub const AAC_ALREADY_INITIALIZED: i32 = 1;
pub const AAC_INIT_FAILED: i32 = -1;

fn engine() -> Option<&'static SentenceEngine> {
    ENGINE.get()
}

fn build_engine(config_path: Option<&str>) -> crate::Result<SentenceEngine> {
    let config = match config_path {
        Some(path) if !path.is_empty() => EngineConfig::from_file(Path::new(path))?,
        _ => EngineConfig::default(),
    };
    SentenceEngine::from_config(&config)
}

/// Builds the engine from a JSON config file (or defaults when `config_path`
/// is null or empty). Returns `AAC_OK`, `AAC_ALREADY_INITIALIZED` or
/// `AAC_INIT_FAILED`; a path that is not UTF-8 fails rather than using defaults.
///
/// # Safety
/// `config_path` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn aac_engine_init(config_path: *const c_char) -> i32 {
    if engine().is_some() {
        return AAC_ALREADY_INITIALIZED;
    }
    let path = if config_path.is_null() {
        None
    } else {
        match unsafe { CStr::from_ptr(config_path) }.to_str() {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::error!(error = %err, "config path is not valid UTF-8");
                return AAC_INIT_FAILED;
            }
        }
    };
    let result = catch_unwind(|| build_engine(path));
    match result {
        Ok(Ok(built)) => {
            if ENGINE.set(built).is_err() {
                return AAC_ALREADY_INITIALIZED;
            }
            tracing::info!("AAC engine initialized");
            AAC_OK
        }
        Ok(Err(err)) => {
            tracing::error!(error = %err, "AAC engine initialization failed");
            AAC_INIT_FAILED
        }
        Err(_) => {
            tracing::error!("panic during AAC engine initialization");
            AAC_INIT_FAILED
        }
    }
}

/// Takes a JSON array of detections and returns the suggestion envelope as
/// JSON. Returns null if the engine is not initialized or the payload is not
/// a JSON array. Free the result with `aac_free_string`.
///
/// # Safety
/// `detections_json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn aac_engine_suggest(detections_json: *const c_char) -> *mut c_char {
    if detections_json.is_null() {
        return ptr::null_mut();
    }
    let payload = unsafe { CStr::from_ptr(detections_json) }.to_str().unwrap_or("");
    let result = catch_unwind(AssertUnwindSafe(|| {
        let engine = engine()?;
        let detections = parse_detections(payload).ok()?;
        serde_json::to_string(&engine.suggest(&detections)).ok()
    }));
    match result {
        Ok(Some(json)) => into_c_string(json),
        Ok(None) => ptr::null_mut(),
        Err(_) => {
            tracing::error!("panic in aac_engine_suggest");
            ptr::null_mut()
        }
    }
}

/// The core-word board as a JSON array of `{word, icon}`, or null if the
/// engine is not initialized. Free the result with `aac_free_string`.
#[no_mangle]
pub extern "C" fn aac_engine_core_words() -> *mut c_char {
    let result = catch_unwind(|| {
        let engine = engine()?;
        serde_json::to_string(&engine.core_word_icons()).ok()
    });
    match result {
        Ok(Some(json)) => into_c_string(json),
        _ => ptr::null_mut(),
    }
}

/// # Safety
/// `s` must be null or a pointer previously returned by this library.
#[no_mangle]
pub unsafe extern "C" fn aac_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

fn into_c_string(json: String) -> *mut c_char {
    CString::new(json).map(CString::into_raw).unwrap_or(ptr::null_mut())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // One test drives the whole lifecycle because the engine is process-wide.
    #[test]
    fn init_suggest_and_free() {
        let dir = tempfile::tempdir().unwrap();
        let symbols = dir.path().join("symbols");
        fs::create_dir(&symbols).unwrap();
        fs::write(symbols.join("pizza.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("core_words.json"), r#"["I", "want"]"#).unwrap();
        fs::write(dir.path().join("aac_map.json"), r#"{"WANT": "pizza.svg"}"#).unwrap();

        let mut config = EngineConfig::default();
        config.symbols_dir = symbols;
        config.core_words_path = dir.path().join("core_words.json");
        config.vocabulary_map_path = dir.path().join("aac_map.json");
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, serde_json::to_string(&config).unwrap()).unwrap();

        unsafe {
            assert!(aac_engine_suggest(c"[]".as_ptr()).is_null());
            assert!(aac_engine_core_words().is_null());

            assert_eq!(aac_engine_init(c"/tmp/\xff\xfe.json".as_ptr()), AAC_INIT_FAILED);
            assert!(aac_engine_core_words().is_null());

            let path = CString::new(config_path.to_str().unwrap()).unwrap();
            assert_eq!(aac_engine_init(path.as_ptr()), AAC_OK);
            assert_eq!(aac_engine_init(path.as_ptr()), AAC_ALREADY_INITIALIZED);

            let out = aac_engine_suggest(cr#"[{"name": "pizza", "confidence": 0.9}]"#.as_ptr());
            assert!(!out.is_null());
            let json: serde_json::Value =
                serde_json::from_str(CStr::from_ptr(out).to_str().unwrap()).unwrap();
            assert_eq!(json["sentence"], "I want pizza");
            assert_eq!(json["detectedTiles"][0]["icon"], "/acc/symbols/pizza.svg");
            aac_free_string(out);

            assert!(aac_engine_suggest(c"not json".as_ptr()).is_null());

            let board = aac_engine_core_words();
            let json: serde_json::Value =
                serde_json::from_str(CStr::from_ptr(board).to_str().unwrap()).unwrap();
            assert_eq!(json.as_array().map(Vec::len), Some(2));
            aac_free_string(board);

            aac_free_string(ptr::null_mut());
        }
    }
}
