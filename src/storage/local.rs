//! Local filesystem storage implementation.
//!
//! Every save re-reads the document from disk, appends the new wines and
//! rewrites the whole file through a sibling temp file that is renamed over
//! the target. Stored entries are carried over as raw JSON, so only the
//! `id` of an existing entry is ever interpreted. A document that is not
//! valid JSON, or not a `{ "wines": [...] }` object, is moved aside to
//! `{file}.corrupt-{timestamp}` before it would be overwritten.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{AppError, Result};
use crate::models::{WineFile, WineRecord};
use crate::storage::{LoadedWines, WineStorage};

/// What was found at the storage path.
enum Document {
    Missing,
    Parsed(WineFile),
    Corrupt(serde_json::Error),
}

/// JSON file storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage writing to the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path next to the output file with `suffix` appended to its name.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    /// Ensure parent directory exists.
    fn ensure_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn read_document(&self) -> Result<Document> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::Missing),
            Err(e) => return Err(AppError::Io(e)),
        };

        Ok(match serde_json::from_slice::<WineFile>(&bytes) {
            Ok(file) => Document::Parsed(file),
            Err(e) => Document::Corrupt(e),
        })
    }

    /// Write the document pretty-printed with 4-space indentation
    /// (write to temp, then rename).
    fn write_document(&self, document: &WineFile) -> Result<()> {
        self.ensure_dir()?;

        let mut bytes = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
        document.serialize(&mut serializer)?;
        bytes.push(b'\n');

        let tmp = self.sibling(".tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Move an unparseable document out of the way, returning its new path.
    fn quarantine(&self) -> Result<PathBuf> {
        let stamp = Local::now().format("%Y%m%d%H%M%S");
        let backup = self.sibling(&format!(".corrupt-{stamp}"));
        fs::rename(&self.path, &backup)?;
        Ok(backup)
    }
}

impl WineStorage for LocalStorage {
    fn load(&self) -> Result<LoadedWines> {
        match self.read_document()? {
            Document::Missing => Ok(LoadedWines::default()),
            Document::Parsed(file) => Ok(LoadedWines::from(file)),
            Document::Corrupt(e) => {
                log::warn!(
                    "Existing file {} is corrupted or not valid JSON ({}). Starting fresh.",
                    self.path.display(),
                    e
                );
                Ok(LoadedWines::default())
            }
        }
    }

    fn save(&self, known_ids: &HashSet<u64>, wines: &[WineRecord]) -> Result<HashSet<u64>> {
        let mut document = match self.read_document()? {
            Document::Missing => WineFile::default(),
            Document::Parsed(file) => file,
            Document::Corrupt(e) => {
                let backup = self.quarantine()?;
                log::warn!(
                    "Existing file {} could not be parsed ({}). Moved it to {} and starting fresh.",
                    self.path.display(),
                    e,
                    backup.display()
                );
                WineFile::default()
            }
        };

        let mut stored = document.ids();
        let fresh: Vec<WineRecord> = wines
            .iter()
            .filter(|w| !known_ids.contains(&w.id))
            .filter(|w| stored.insert(w.id))
            .cloned()
            .collect();

        for wine in &fresh {
            document.push(wine)?;
        }
        self.write_document(&document)?;

        for wine in &fresh {
            log::info!("{}", wine.summary_line());
        }

        Ok(fresh.iter().map(|w| w.id).collect())
    }
}
