use std::path::{Path, PathBuf};

use unabstract_style::resolve::{AbstractionMap, flatten};

use crate::Result;
use crate::file::{canonicalize, read_lines};
use crate::logging::targets;
use crate::markup::ReplacementCandidate;

/// Whether a markup line is a replacement site for `selector`.
///
/// The line must mention `class` or `Class` and contain the selector as a
/// plain substring. There is no word-boundary check, so `btn` matches inside
/// `btn-lg`.
pub fn line_qualifies(line: &str, selector: &str) -> bool {
    (line.contains("class") || line.contains("Class")) && line.contains(selector)
}

/// Lazily yields replacement candidates.
///
/// Selectors are visited in map order, markup files in the given order,
/// lines top to bottom. A file is read each time a selector enters it, so
/// rewrites made while earlier candidates were consumed are seen by later
/// selectors. A file that cannot be read is yielded as an error and the
/// walk moves on to the next file.
pub struct CandidateMatcher<'a> {
    abstractions: &'a AbstractionMap,
    markup_files: &'a [PathBuf],
    next_selector: usize,
    active: Option<ActiveSelector<'a>>,
}

struct ActiveSelector<'a> {
    selector: &'a str,
    utility_classes: String,
    next_file: usize,
    file: Option<OpenFile>,
}

struct OpenFile {
    path: PathBuf,
    lines: Vec<String>,
    next_line: usize,
}

impl<'a> CandidateMatcher<'a> {
    pub fn new(abstractions: &'a AbstractionMap, markup_files: &'a [PathBuf]) -> Self {
        Self {
            abstractions,
            markup_files,
            next_selector: 0,
            active: None,
        }
    }

    /// Advance to the next selector whose flattened classes are non-empty.
    fn activate_next_selector(&mut self) -> bool {
        while let Some((selector, _)) = self.abstractions.get_index(self.next_selector) {
            self.next_selector += 1;

            let utility_classes = flatten(selector, self.abstractions);
            if utility_classes.is_empty() {
                tracing::trace!(target: targets::MARKUP, %selector, "no utility classes, skipping");
                continue;
            }

            tracing::debug!(
                target: targets::MARKUP,
                %selector,
                classes = %utility_classes,
                "matching selector"
            );
            self.active = Some(ActiveSelector {
                selector: selector.as_str(),
                utility_classes,
                next_file: 0,
                file: None,
            });
            return true;
        }
        false
    }
}

impl ActiveSelector<'_> {
    /// Next qualifying line of the open file, if any.
    fn next_in_file(&mut self) -> Option<ReplacementCandidate> {
        let file = self.file.as_mut()?;

        while let Some(line) = file.lines.get(file.next_line) {
            let line_number = file.next_line;
            file.next_line += 1;

            if line_qualifies(line, self.selector) {
                return Some(ReplacementCandidate {
                    selector: self.selector.to_string(),
                    utility_classes: self.utility_classes.clone(),
                    file_path: file.path.clone(),
                    line_number,
                    line_text: line.clone(),
                });
            }
        }

        self.file = None;
        None
    }
}

fn open(path: &Path) -> Result<OpenFile> {
    let path = canonicalize(path)?;
    let lines = read_lines(&path)?;
    Ok(OpenFile {
        path,
        lines,
        next_line: 0,
    })
}

impl Iterator for CandidateMatcher<'_> {
    type Item = Result<ReplacementCandidate>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(active) = self.active.as_mut() else {
                if !self.activate_next_selector() {
                    return None;
                }
                continue;
            };

            if active.file.is_some() {
                if let Some(candidate) = active.next_in_file() {
                    return Some(Ok(candidate));
                }
                continue;
            }

            let Some(path) = self.markup_files.get(active.next_file) else {
                self.active = None;
                continue;
            };
            active.next_file += 1;

            match open(path) {
                Ok(file) => active.file = Some(file),
                Err(err) => {
                    tracing::warn!(
                        target: targets::MARKUP,
                        file = %path.display(),
                        error = %err,
                        "unreadable markup file"
                    );
                    return Some(Err(err));
                }
            }
        }
    }
}
