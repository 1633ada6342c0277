//! Lab directory layout.
//!
//! All student inputs live under `{LAB_ROOT}/server`. Nothing here touches the
//! filesystem; callers decide how to treat missing files.

use std::path::{Path, PathBuf};

/// Resolved locations of the files the grader inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabPaths {
    root: PathBuf,
}

impl LabPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// {LAB_ROOT}/server
    pub fn server_dir(&self) -> PathBuf {
        self.root.join("server")
    }

    /// {LAB_ROOT}/server/.env
    pub fn env_file(&self) -> PathBuf {
        self.server_dir().join(".env")
    }

    /// {LAB_ROOT}/server/index.js
    pub fn index_file(&self) -> PathBuf {
        self.server_dir().join("index.js")
    }

    /// {LAB_ROOT}/server/models
    pub fn models_dir(&self) -> PathBuf {
        self.server_dir().join("models")
    }

    /// {LAB_ROOT}/server/models/song.model.js
    pub fn model_file(&self) -> PathBuf {
        self.models_dir().join("song.model.js")
    }

    /// Path relative to the lab root, for messages shown to students.
    pub fn display_relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}
