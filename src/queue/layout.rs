use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::constants::queue::{
    DONE_DIR, FAILED_DIR, INTENT_FILE_SUFFIX, PENDING_DIR, TEMP_FILE_SUFFIX,
};

use super::fs::QueueFs;

/// Terminal folder for a processed file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Done,
    Failed,
}

impl Destination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::Done => DONE_DIR,
            Destination::Failed => FAILED_DIR,
        }
    }
}

#[derive(Clone, Debug)]
pub struct QueueLayout {
    root: PathBuf,
}

impl QueueLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pending(&self) -> PathBuf {
        self.root.join(PENDING_DIR)
    }

    pub fn done(&self) -> PathBuf {
        self.root.join(DONE_DIR)
    }

    pub fn failed(&self) -> PathBuf {
        self.root.join(FAILED_DIR)
    }

    pub fn dir_for(&self, destination: Destination) -> PathBuf {
        match destination {
            Destination::Done => self.done(),
            Destination::Failed => self.failed(),
        }
    }

    /// Create the three folders if they are missing (first run)
    pub fn ensure(&self, fs: &dyn QueueFs) -> io::Result<()> {
        for dir in [self.pending(), self.done(), self.failed()] {
            fs.create_dir_all(&dir)?;
        }
        info!("📂 Queue ready under {}", self.root.display());
        Ok(())
    }

    /// Names of files in `pending` that look like finished intent files.
    /// Directory order unless `sorted`.
    pub fn pending_files(&self, fs: &dyn QueueFs, sorted: bool) -> io::Result<Vec<String>> {
        let mut names: Vec<String> = fs
            .list_files(&self.pending())?
            .into_iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .filter(|name| is_intent_file(name))
            .collect();
        if sorted {
            names.sort();
        }
        Ok(names)
    }

    /// Number of files currently in a folder
    pub fn count(&self, fs: &dyn QueueFs, dir: &Path) -> io::Result<usize> {
        Ok(fs.list_files(dir)?.len())
    }
}

pub fn is_intent_file(name: &str) -> bool {
    name.ends_with(INTENT_FILE_SUFFIX) && !name.ends_with(TEMP_FILE_SUFFIX)
}
