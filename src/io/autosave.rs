//! Debounced mirror of the open document in the platform data directory, so
//! the board comes back the way it was left.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::model::Document;

use super::file::{load_document, save_document};
use super::IoError;

const CURRENT_FILE: &str = "current.gantt.json";

pub struct Autosave {
    path: PathBuf,
    delay: Duration,
    /// When the oldest unsaved change happened; `None` when clean.
    dirty_since: Option<Instant>,
    /// When the newest unsaved change happened.
    last_change: Option<Instant>,
}

impl Autosave {
    pub fn new(data_dir: &Path, delay: Duration) -> Self {
        Self {
            path: data_dir.join(CURRENT_FILE),
            delay,
            dirty_since: None,
            last_change: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    pub fn mark_dirty(&mut self, now: Instant) {
        self.dirty_since.get_or_insert(now);
        self.last_change = Some(now);
    }

    /// Write the document once `delay` has passed without further changes.
    /// Returns `Ok(true)` when a write happened.
    pub fn flush_due(&mut self, doc: &Document, now: Instant) -> Result<bool, IoError> {
        match self.last_change {
            Some(last) if now.duration_since(last) >= self.delay => self.flush(doc).map(|()| true),
            _ => Ok(false),
        }
    }

    /// Write immediately if anything is pending (used on shutdown).
    pub fn flush(&mut self, doc: &Document) -> Result<(), IoError> {
        if !self.is_dirty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        save_document(doc, &self.path)?;
        self.dirty_since = None;
        self.last_change = None;
        log::debug!("autosaved to {}", self.path.display());
        Ok(())
    }

    /// The last autosaved document, if there is one and it is still valid.
    pub fn load_current(&self) -> Option<Document> {
        if !self.path.exists() {
            return None;
        }
        match load_document(&self.path) {
            Ok(doc) => Some(doc),
            Err(err) => {
                log::warn!("ignoring autosave at {}: {err}", self.path.display());
                None
            }
        }
    }
}
