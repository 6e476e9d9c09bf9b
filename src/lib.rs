// File: src/lib.rs

pub mod builder;
pub mod c_api;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod matching;
pub mod persistence;

pub use crate::config::EngineConfig;
pub use crate::core::engine::SentenceEngine;
pub use crate::error::{EngineError, Result};
pub use crate::logging::init_tracing;
