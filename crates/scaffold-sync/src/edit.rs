//
// edit.rs
//
// Addressed removal edits handed to whoever writes the file back
//

use std::ops::Range;
use std::path::{Path, PathBuf};

use ropey::Rope;
use serde::{Deserialize, Serialize};

use crate::removal_planner::PlannedRemoval;

/// Removal of `text` starting at byte offset `start` of the file at `path`.
///
/// `text` is exactly what sits at `start..start + text.len()` in the original
/// content, so callers can show it in a dry run and appliers can verify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub path: PathBuf,
    pub start: usize,
    pub text: String,
}

impl Edit {
    pub fn removal(path: &Path, start: usize, text: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            start,
            text: text.into(),
        }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The same range in chars of `source`.
    pub fn char_range(&self, source: &Rope) -> Range<usize> {
        source.byte_to_char(self.start)..source.byte_to_char(self.end())
    }

    /// 0-based line and char column of the start within `source`.
    pub fn line_col(&self, source: &Rope) -> (usize, usize) {
        let line = source.byte_to_line(self.start);
        let col = source.byte_to_char(self.start) - source.line_to_char(line);
        (line, col)
    }
}

/// Turn planned removals into edits against `content`.
pub fn emit_edits(path: &Path, content: &str, removals: &[PlannedRemoval<'_>]) -> Vec<Edit> {
    removals
        .iter()
        .map(|removal| Edit::removal(path, removal.span.start, &content[removal.span.clone()]))
        .collect()
}
