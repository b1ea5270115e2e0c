//! Storage abstractions for wine persistence.
//!
//! The collection lives in a single JSON document:
//!
//! ```text
//! {
//!     "wines": [
//!         { "id": 1138, "name": "Barolo", ... },
//!         ...
//!     ]
//! }
//! ```
//!
//! Records are appended in the order they were first seen and never
//! updated or removed.

pub mod local;

use std::collections::HashSet;

use serde_json::Value;

use crate::error::Result;
use crate::models::{WineFile, WineRecord};

// Re-export for convenience
pub use local::LocalStorage;

/// Previously persisted entries, as stored, and their identifiers.
#[derive(Debug, Clone, Default)]
pub struct LoadedWines {
    pub wines: Vec<Value>,
    pub ids: HashSet<u64>,
}

impl From<WineFile> for LoadedWines {
    fn from(file: WineFile) -> Self {
        let ids = file.ids();
        Self {
            wines: file.wines,
            ids,
        }
    }
}

/// Trait for wine storage backends.
pub trait WineStorage {
    /// Load the persisted collection.
    ///
    /// An unreadable document degrades to an empty collection.
    fn load(&self) -> Result<LoadedWines>;

    /// Append the wines whose ids are neither in `known_ids` nor already
    /// stored, and return the ids actually written.
    fn save(&self, known_ids: &HashSet<u64>, wines: &[WineRecord]) -> Result<HashSet<u64>>;
}
