use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace};

use crate::error::{NumlabError, NumlabResult};

pub const SVG_MIME: &str = "image/svg+xml;charset=utf-8";

/// Destination for a finished export, the native stand-in for a browser
/// download.
pub trait DownloadSink {
    /// Stores `contents` under `file_name` and returns where it landed.
    fn deliver(&self, file_name: &str, mime: &str, contents: &[u8]) -> NumlabResult<PathBuf>;
}

impl<T: DownloadSink + ?Sized> DownloadSink for &T {
    fn deliver(&self, file_name: &str, mime: &str, contents: &[u8]) -> NumlabResult<PathBuf> {
        (**self).deliver(file_name, mime, contents)
    }
}

/// Rejects names that would escape the target directory.
pub fn validate_file_name(file_name: &str) -> NumlabResult<()> {
    if file_name.is_empty()
        || file_name == "."
        || file_name == ".."
        || file_name.contains(&['/', '\\', '\0'][..])
    {
        return Err(NumlabError::InvalidData(format!(
            "`{file_name}` is not a plain file name"
        )));
    }
    Ok(())
}

/// Writes downloads into one directory.
///
/// Each delivery goes through a [`StagedFile`] next to the target and is
/// renamed into place only once fully written; the staging file is removed
/// on every other path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&self, file_name: &str, mime: &str, contents: &[u8]) -> NumlabResult<PathBuf> {
        validate_file_name(file_name)?;
        let target = self.dir.join(file_name);
        debug!(path = %target.display(), mime, bytes = contents.len(), "delivering download");

        let mut staged = StagedFile::create(&self.dir, file_name)?;
        staged.write_all(contents)?;
        staged.persist(&target)?;
        Ok(target)
    }
}

static STAGING_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Scoped temporary file. Dropping it without `persist` deletes it.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    file: Option<File>,
    persisted: bool,
}

impl StagedFile {
    pub fn create(dir: &Path, file_name: &str) -> NumlabResult<Self> {
        let sequence = STAGING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let path = dir.join(format!(
            ".{file_name}.{}.{sequence}.part",
            std::process::id()
        ));
        let file = File::options()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| NumlabError::Io {
                path: path.clone(),
                source,
            })?;
        trace!(path = %path.display(), "staging file created");
        Ok(Self {
            path,
            file: Some(file),
            persisted: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_all(&mut self, contents: &[u8]) -> NumlabResult<()> {
        let Some(file) = self.file.as_mut() else {
            return Err(NumlabError::InvalidData(
                "staging file already closed".to_owned(),
            ));
        };
        file.write_all(contents)
            .and_then(|()| file.flush())
            .map_err(|source| NumlabError::Io {
                path: self.path.clone(),
                source,
            })
    }

    /// Closes the staging file and atomically moves it to `target`.
    pub fn persist(mut self, target: &Path) -> NumlabResult<()> {
        if let Some(file) = self.file.take() {
            file.sync_all().map_err(|source| NumlabError::Io {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::rename(&self.path, target).map_err(|source| NumlabError::Io {
            path: target.to_path_buf(),
            source,
        })?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        self.file.take();
        if self.persisted {
            return;
        }
        if let Err(err) = fs::remove_file(&self.path) {
            trace!(path = %self.path.display(), error = %err, "staging file already gone");
        } else {
            trace!(path = %self.path.display(), "staging file released");
        }
    }
}
