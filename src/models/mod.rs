// src/models/mod.rs

//! Domain models for the wine crawler.

mod config;
mod wine;

// Re-export all public types
pub use config::{ApiConfig, Config, ExploreFilter};
pub use wine::{WineFile, WineRecord, WineType};
