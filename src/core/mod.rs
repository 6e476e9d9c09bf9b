// File: src/core/mod.rs
pub mod corpus;
pub mod engine;
pub mod normalizer;
pub mod types;
pub mod vocabulary;
