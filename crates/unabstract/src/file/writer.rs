//! Atomic file rewriting.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::error::{FileError, FileResult};

/// Rewrites a file through a temporary sibling and a rename.
///
/// Markup files are rewritten in place; a crash or a failed write must
/// leave the original untouched, so the new content goes to a hidden
/// temporary file next to the target and is renamed over it on commit.
///
/// # Example
///
/// ```ignore
/// use unabstract::file::AtomicWriter;
///
/// AtomicWriter::write("templates/card.html.twig", |w| {
///     w.write_str("<div class=\"p-4 rounded\"></div>\n")
/// })?;
/// ```
pub struct AtomicWriter {
    /// The target path for the final file.
    target_path: PathBuf,
    /// The temporary file path.
    temp_path: PathBuf,
    /// Writer for the temporary file, taken on commit.
    writer: Option<BufWriter<fs::File>>,
    /// Whether the write has been committed.
    committed: bool,
}

impl AtomicWriter {
    /// Creates a new atomic writer for the given target path.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> FileResult<Self> {
        let target_path = path.as_ref().to_path_buf();

        // Same directory keeps the rename on one filesystem.
        let parent = target_path.parent().unwrap_or(Path::new("."));
        let file_name = target_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());
        let temp_path = parent.join(format!(".{}.tmp.{}", file_name, std::process::id()));

        let file = fs::File::create(&temp_path).map_err(|e| FileError::from_io(e, &target_path))?;

        // An existing target keeps its mode across the rename.
        let permissions = fs::metadata(&target_path).ok().map(|m| m.permissions());
        let writer = Self {
            target_path,
            temp_path,
            writer: Some(BufWriter::new(file)),
            committed: false,
        };

        if let Some(permissions) = permissions {
            fs::set_permissions(&writer.temp_path, permissions)
                .map_err(|e| FileError::from_io(e, &writer.target_path))?;
        }

        Ok(writer)
    }

    /// Performs an atomic write with a closure.
    pub fn write<F>(path: impl AsRef<Path>, f: F) -> FileResult<()>
    where
        F: FnOnce(&mut AtomicWriter) -> FileResult<()>,
    {
        let mut writer = Self::new(path)?;
        f(&mut writer)?;
        writer.commit()
    }

    /// Returns the target path.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Writes a string to the temporary file.
    pub fn write_str(&mut self, s: &str) -> FileResult<()> {
        self.inner()?
            .write_all(s.as_bytes())
            .map_err(|e| FileError::from_io(e, &self.target_path))
    }

    /// Commits the write, replacing the target file.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush, sync, or rename fails. The temporary
    /// file is then removed and the target is left unchanged.
    pub fn commit(mut self) -> FileResult<()> {
        let mut writer = self.writer.take().ok_or_else(|| self.consumed())?;

        writer
            .flush()
            .map_err(|e| FileError::from_io(e, &self.target_path))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| FileError::from_io(e, &self.target_path))?;

        // Close the handle before renaming.
        drop(writer);

        fs::rename(&self.temp_path, &self.target_path)
            .map_err(|e| FileError::from_io(e, &self.target_path))?;

        self.committed = true;
        Ok(())
    }

    fn inner(&mut self) -> FileResult<&mut BufWriter<fs::File>> {
        match self.writer {
            Some(ref mut writer) => Ok(writer),
            None => Err(FileError::from_io(
                io::Error::other("atomic writer already consumed"),
                &self.target_path,
            )),
        }
    }

    fn consumed(&self) -> FileError {
        FileError::from_io(
            io::Error::other("atomic writer already consumed"),
            &self.target_path,
        )
    }
}

impl Drop for AtomicWriter {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

impl std::fmt::Debug for AtomicWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomicWriter")
            .field("target_path", &self.target_path)
            .field("temp_path", &self.temp_path)
            .field("committed", &self.committed)
            .finish_non_exhaustive()
    }
}
