//! # Sheet-Music Library
//!
//! A device-local collection of imported PDF scores. Viewing the PDFs is left
//! to whatever viewer the platform provides; this module only keeps the files.
//!
//! ## Behaviour
//! - Only `.pdf` files (any case) are listed or accepted
//! - Importing a file whose name already exists replaces the old copy, but only
//!   once the new copy is fully written; re-importing a library file is a no-op
//! - Removal failures are logged and otherwise ignored

use crate::error::SolfegeError;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Opaque reference to a document held by a [`DocumentStore`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentHandle(PathBuf);

impl DocumentHandle {
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// File name shown in the library list
    pub fn name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

pub trait DocumentStore {
    fn list(&self) -> Vec<DocumentHandle>;
    fn add(&mut self, source: &Path) -> Result<DocumentHandle, SolfegeError>;
    fn remove(&mut self, handle: &DocumentHandle);
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Library backed by a single directory
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    root: PathBuf,
}

impl DirectoryLibrary {
    /// Open (creating if needed) the library at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, SolfegeError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| SolfegeError::io(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a document by its file name
    pub fn find(&self, name: &str) -> Option<DocumentHandle> {
        self.list().into_iter().find(|handle| handle.name() == name)
    }
}

impl DocumentStore for DirectoryLibrary {
    fn list(&self) -> Vec<DocumentHandle> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Could not read library {}: {}", self.root.display(), e);
                return Vec::new();
            }
        };

        let mut documents: Vec<DocumentHandle> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_pdf(path))
            .map(DocumentHandle)
            .collect();
        documents.sort();
        documents
    }

    fn add(&mut self, source: &Path) -> Result<DocumentHandle, SolfegeError> {
        let file_name = match source.file_name() {
            Some(name) if is_pdf(source) => name,
            _ => return Err(SolfegeError::UnsupportedDocument(source.to_path_buf())),
        };
        let destination = self.root.join(file_name);
        if same_file(source, &destination) {
            info!("{} is already in the library", file_name.to_string_lossy());
            return Ok(DocumentHandle(destination));
        }

        // Stage next to the destination so the old copy survives a failed import
        let mut input = fs::File::open(source).map_err(|e| SolfegeError::io(source, e))?;
        let mut staged =
            NamedTempFile::new_in(&self.root).map_err(|e| SolfegeError::io(&self.root, e))?;
        io::copy(&mut input, &mut staged).map_err(|e| SolfegeError::io(&destination, e))?;
        staged
            .persist(&destination)
            .map_err(|e| SolfegeError::io(&destination, e.error))?;

        info!("Imported {} into {}", source.display(), self.root.display());
        Ok(DocumentHandle(destination))
    }

    fn remove(&mut self, handle: &DocumentHandle) {
        match fs::remove_file(handle.path()) {
            Ok(()) => info!("Removed {}", handle.name()),
            Err(e) => warn!("Could not remove {}: {}", handle.path().display(), e),
        }
    }
}
