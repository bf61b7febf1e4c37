use std::fmt;
use std::path::PathBuf;

/// One proposed rewrite: `selector` on a markup line becomes `utility_classes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementCandidate {
    pub selector: String,
    /// Flattened utility classes, never empty.
    pub utility_classes: String,
    /// Canonical absolute path of the markup file.
    pub file_path: PathBuf,
    /// 0-based line index.
    pub line_number: usize,
    /// The line as read, terminator included.
    pub line_text: String,
}

impl ReplacementCandidate {
    /// 1-based line number for display.
    pub fn display_line_number(&self) -> usize {
        self.line_number + 1
    }

    /// The line without surrounding whitespace, for context display.
    pub fn context(&self) -> &str {
        self.line_text.trim()
    }
}

impl fmt::Display for ReplacementCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Replace abstraction '{}' with '{}' on line {} in file {}?",
            self.selector,
            self.utility_classes,
            self.display_line_number(),
            self.file_path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_one_based() {
        let candidate = ReplacementCandidate {
            selector: "card".to_string(),
            utility_classes: "p-4 rounded".to_string(),
            file_path: PathBuf::from("/site/templates/page.html.twig"),
            line_number: 0,
            line_text: "  <div class=\"card\">\n".to_string(),
        };

        assert_eq!(candidate.display_line_number(), 1);
        assert_eq!(candidate.context(), "<div class=\"card\">");
        assert_eq!(
            candidate.to_string(),
            "Replace abstraction 'card' with 'p-4 rounded' on line 1 in file /site/templates/page.html.twig?"
        );
    }
}
