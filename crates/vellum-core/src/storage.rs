//! Document persistence.
//!
//! The on-disk format is a JSON document of pages plus the active page
//! index. Older saves predate pages and hold a bare element list; those
//! decode into a single-page document. Anything that fails to decode is
//! treated as "no prior document" so a corrupt save never blocks
//! startup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::element::Element;
use crate::page::Page;

/// A complete saved document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub pages: Vec<Page>,
    pub current_page_index: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            pages: vec![Page::default()],
            current_page_index: 0,
        }
    }
}

/// Pre-pages save format: one implicit page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyDocument {
    elements: Vec<Element>,
    #[serde(default)]
    element_counter: u64,
}

impl From<LegacyDocument> for Document {
    fn from(legacy: LegacyDocument) -> Self {
        let mut page = Page::default();
        page.elements = legacy.elements;
        page.element_counter = legacy.element_counter;
        Self {
            pages: vec![page],
            current_page_index: 0,
        }
    }
}

impl Document {
    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a saved document, falling back to the legacy single-page
    /// format. Returns None for anything unreadable.
    pub fn from_json(json: &str) -> Option<Self> {
        if let Ok(document) = serde_json::from_str::<Document>(json) {
            return Some(document);
        }
        match serde_json::from_str::<LegacyDocument>(json) {
            Ok(legacy) => {
                log::info!("migrating legacy single-page save");
                Some(legacy.into())
            }
            Err(err) => {
                log::warn!("discarding unreadable save: {err}");
                None
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("no writable data directory available")]
    NoDataDir,
}

/// Backing store for saved documents.
pub trait Storage {
    fn save(&mut self, document: &Document) -> Result<(), StorageError>;

    /// The previously saved document, or None if there is none (or the
    /// save is unreadable).
    fn load(&self) -> Result<Option<Document>, StorageError>;
}

/// In-memory store for tests and headless embedding.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    saved: Option<String>,
}

impl Storage for MemoryStorage {
    fn save(&mut self, document: &Document) -> Result<(), StorageError> {
        self.saved = Some(document.to_json()?);
        Ok(())
    }

    fn load(&self) -> Result<Option<Document>, StorageError> {
        Ok(self.saved.as_deref().and_then(Document::from_json))
    }
}

/// Store writing a single JSON file under the platform data directory.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStorage {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    const FILE_NAME: &str = "document.json";

    /// Store under the platform data directory, e.g.
    /// `~/.local/share/vellum/document.json` on Linux.
    pub fn in_data_dir() -> Result<Self, StorageError> {
        let dir = dirs::data_dir()
            .ok_or(StorageError::NoDataDir)?
            .join("vellum");
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            path: dir.join(Self::FILE_NAME),
        })
    }

    pub fn at_path(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Storage for FileStorage {
    fn save(&mut self, document: &Document) -> Result<(), StorageError> {
        std::fs::write(&self.path, document.to_json()?)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<Document>, StorageError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Document::from_json(&json))
    }
}
