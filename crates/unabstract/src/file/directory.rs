//! Recursive source-tree walking.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use super::error::{FileError, FileResult};

// ============================================================================
// WalkDir - Recursive file iterator
// ============================================================================

/// Configuration options for recursive directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkDirOptions {
    /// Glob patterns a file name must match (any of them). Empty = all files.
    pub patterns: Vec<String>,
    /// Directory names that are never descended into.
    pub excluded_dirs: Vec<String>,
}

impl WalkDirOptions {
    /// Creates a new `WalkDirOptions` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file-name glob pattern.
    pub fn glob(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Adds several file-name glob patterns.
    pub fn globs<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Skips directories with any of these names.
    pub fn exclude_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs.extend(names.into_iter().map(Into::into));
        self
    }
}

/// A file found while walking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    path: PathBuf,
}

impl WalkEntry {
    /// Returns the full path to this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the entry and returns the path.
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// A lazy, breadth-first walk yielding the files under a root.
///
/// Directories are never yielded, only descended into unless their name is
/// excluded. Symbolic links to directories are not followed.
///
/// # Example
///
/// ```ignore
/// use unabstract::file::{WalkDir, WalkDirOptions};
///
/// let walker = WalkDir::with_options("assets", WalkDirOptions::new()
///     .glob("*.scss")
///     .exclude_dirs(["node_modules"]))?;
///
/// for entry in walker {
///     println!("{}", entry?.path().display());
/// }
/// ```
pub struct WalkDir {
    /// Directories still to visit.
    queue: VecDeque<PathBuf>,
    /// Current directory iterator.
    current: Option<(fs::ReadDir, PathBuf)>,
    options: WalkDirOptions,
    /// Compiled file-name patterns.
    patterns: Vec<Regex>,
}

impl WalkDir {
    /// Creates a walker that yields every file under `path`.
    pub fn new(path: impl AsRef<Path>) -> FileResult<Self> {
        Self::with_options(path, WalkDirOptions::default())
    }

    /// Creates a walker with options.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is missing or not a directory, or if a
    /// glob pattern does not compile.
    pub fn with_options(path: impl AsRef<Path>, options: WalkDirOptions) -> FileResult<Self> {
        let root = path.as_ref().to_path_buf();

        let metadata = fs::metadata(&root).map_err(|e| FileError::from_io(e, &root))?;
        if !metadata.is_dir() {
            return Err(FileError::not_directory(root));
        }

        let patterns = options
            .patterns
            .iter()
            .map(|pattern| glob_to_regex(pattern))
            .collect::<FileResult<Vec<_>>>()?;

        let mut queue = VecDeque::new();
        queue.push_back(root);

        Ok(Self {
            queue,
            current: None,
            options,
            patterns,
        })
    }

    /// Collects all matching paths, sorted.
    ///
    /// # Errors
    ///
    /// Returns the first error met while reading a directory.
    pub fn collect_sorted(self) -> FileResult<Vec<PathBuf>> {
        let mut paths = self
            .map(|entry| entry.map(WalkEntry::into_path))
            .collect::<FileResult<Vec<_>>>()?;
        paths.sort();
        Ok(paths)
    }

    fn matches(&self, name: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|regex| regex.is_match(name))
    }

    fn should_descend(&self, path: &Path, file_type: fs::FileType) -> bool {
        if !file_type.is_dir() {
            return false;
        }

        let name = file_name(path);
        !self.options.excluded_dirs.iter().any(|excluded| *excluded == name)
    }
}

impl Iterator for WalkDir {
    type Item = FileResult<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((ref mut read_dir, ref dir_path)) = self.current {
                match read_dir.next() {
                    Some(Ok(fs_entry)) => {
                        let path = fs_entry.path();
                        let file_type = match fs_entry.file_type() {
                            Ok(ft) => ft,
                            Err(e) => return Some(Err(FileError::from_io(e, path))),
                        };

                        if self.should_descend(&path, file_type) {
                            self.queue.push_back(path);
                            continue;
                        }

                        let is_file = file_type.is_file()
                            || (file_type.is_symlink() && path.is_file());
                        if is_file && self.matches(&file_name(&path)) {
                            return Some(Ok(WalkEntry { path }));
                        }

                        continue;
                    }
                    Some(Err(e)) => {
                        return Some(Err(FileError::from_io(e, dir_path)));
                    }
                    None => {
                        self.current = None;
                    }
                }
            }

            match self.queue.pop_front() {
                Some(path) => match fs::read_dir(&path) {
                    Ok(read_dir) => {
                        tracing::trace!(dir = %path.display(), "walking directory");
                        self.current = Some((read_dir, path));
                    }
                    Err(e) => return Some(Err(FileError::from_io(e, path))),
                },
                None => return None,
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ============================================================================
// Glob Pattern Conversion
// ============================================================================

/// Converts a file-name glob pattern to an anchored regex.
///
/// Supported glob syntax:
/// - `*` matches any sequence of characters except path separators
/// - `?` matches any single character except path separators
/// - `[abc]`, `[a-z]` match any character in the brackets
/// - `[!abc]` or `[^abc]` match any character not in the brackets
/// - `**` matches any sequence of characters including path separators
pub(crate) fn glob_to_regex(pattern: &str) -> FileResult<Regex> {
    let mut regex = String::with_capacity(pattern.len() * 2);
    regex.push('^');

    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    regex.push_str(".*");
                    i += 2;
                } else {
                    regex.push_str("[^/\\\\]*");
                    i += 1;
                }
            }
            '?' => {
                regex.push_str("[^/\\\\]");
                i += 1;
            }
            '[' => {
                regex.push('[');
                i += 1;

                if i < chars.len() && (chars[i] == '!' || chars[i] == '^') {
                    regex.push('^');
                    i += 1;
                }

                while i < chars.len() && chars[i] != ']' {
                    let c = chars[i];
                    if c == '\\' || c == '^' {
                        regex.push('\\');
                    }
                    regex.push(c);
                    i += 1;
                }

                if i < chars.len() {
                    regex.push(']');
                    i += 1;
                }
            }
            '.' | '+' | '(' | ')' | '{' | '}' | '|' | '^' | '$' | '\\' => {
                regex.push('\\');
                regex.push(chars[i]);
                i += 1;
            }
            c => {
                regex.push(c);
                i += 1;
            }
        }
    }

    regex.push('$');

    Regex::new(&regex).map_err(|e| FileError::invalid_pattern(pattern, e))
}
