// src/file/mod.rs
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use crate::analysis::{AnalysisPayload, Dataset};

pub mod dataset;
pub mod payload;

// Core trait for file operations
pub trait FileHandler<T> {
    fn load(&self, path: &Path) -> Result<T>;
    fn save(&self, data: &T, path: &Path) -> Result<()>;
}

/// What a file turned out to contain.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedFile {
    /// Raw rows still to be analyzed.
    Dataset(Dataset),
    /// A producer's finished analysis.
    Payload(AnalysisPayload),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Table,
    Payload,
}

pub const TABLE_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];
pub const PAYLOAD_EXTENSIONS: [&str; 2] = ["json", "ron"];

pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

impl FileKind {
    pub fn of(path: &Path) -> Option<Self> {
        let ext = extension(path)?;
        if TABLE_EXTENSIONS.contains(&ext.as_str()) {
            Some(FileKind::Table)
        } else if PAYLOAD_EXTENSIONS.contains(&ext.as_str()) {
            Some(FileKind::Payload)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct FileManager {
    last_dir: Option<PathBuf>,
    dataset_handler: dataset::DatasetFileHandler,
    payload_handler: payload::PayloadFileHandler,
}

impl FileManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory of the last file opened, for the next file dialog.
    pub fn last_dir(&self) -> Option<&Path> {
        self.last_dir.as_deref()
    }

    pub fn load(&mut self, path: &Path) -> Result<LoadedFile> {
        if !path.exists() {
            return Err(anyhow!("File not found: {}", path.display()));
        }
        let kind = FileKind::of(path)
            .ok_or_else(|| anyhow!("Unsupported file type: {}", path.display()))?;

        let loaded = match kind {
            FileKind::Table => LoadedFile::Dataset(self.dataset_handler.load(path)?),
            FileKind::Payload => LoadedFile::Payload(self.payload_handler.load(path)?),
        };

        self.last_dir = path.parent().map(Path::to_path_buf);
        Ok(loaded)
    }

    /// Writes `payload` as JSON or RON, chosen by the extension of `path`.
    pub fn export_payload(&self, payload: &AnalysisPayload, path: &Path) -> Result<()> {
        match FileKind::of(path) {
            Some(FileKind::Payload) => self.payload_handler.save(payload, path),
            _ => Err(anyhow!("Analysis can only be exported as .json or .ron: {}", path.display())),
        }
    }
}
