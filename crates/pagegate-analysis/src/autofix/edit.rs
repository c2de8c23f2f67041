//! Batched text edits applied to an immutable source.

use std::ops::Range;

use pagegate_core::errors::FixError;

use crate::catalog::FixKind;

/// Replace `range` of the source with `text`. An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

impl Edit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            range: at..at,
            text: text.into(),
        }
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }
}

/// Build a new string from `source` with every edit applied.
///
/// Edits are applied from the highest offset down so earlier offsets stay
/// valid. Overlapping or out-of-bounds edits are rejected.
pub fn apply_edits(fix: FixKind, source: &str, mut edits: Vec<Edit>) -> Result<String, FixError> {
    edits.sort_by(|a, b| b.range.start.cmp(&a.range.start).then(b.range.end.cmp(&a.range.end)));

    let failed = |message: String| FixError::TransformFailed {
        fix: fix.as_str().to_string(),
        message,
    };

    let mut floor = source.len();
    for edit in &edits {
        let Range { start, end } = edit.range;
        if start > end || end > source.len() {
            return Err(failed(format!("edit {start}..{end} is out of bounds")));
        }
        if !source.is_char_boundary(start) || !source.is_char_boundary(end) {
            return Err(failed(format!("edit {start}..{end} splits a character")));
        }
        if end > floor {
            return Err(failed(format!("edit {start}..{end} overlaps another edit")));
        }
        floor = start;
    }

    let mut out = source.to_string();
    for edit in edits {
        out.replace_range(edit.range, &edit.text);
    }
    Ok(out)
}
