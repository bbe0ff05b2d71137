// src/export/sink.rs

use crate::errors::AppResult;
use std::fs;
use std::path::{Path, PathBuf};

/// A named binary export, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

/// Receives finished artifacts (browser download, directory, ...).
pub trait DownloadSink {
    /// Returns where the artifact ended up.
    fn deliver(&mut self, artifact: &Artifact) -> AppResult<PathBuf>;
}

/// Saves artifacts into a directory, overwriting same-named files.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, artifact: &Artifact) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(artifact.file_name);
        fs::write(&path, &artifact.bytes)?;
        Ok(path)
    }
}
