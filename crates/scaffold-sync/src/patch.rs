//
// patch.rs
//
// Applies removal edits to file content
//

use crate::edit::Edit;
use crate::error::PatchError;

/// Apply `edits` to `content` and return the new text.
///
/// Every edit must lie inside `content`, match the text it claims to remove
/// and not overlap another edit. Order of `edits` does not matter; an empty
/// slice returns `content` unchanged.
pub fn apply_edits(content: &str, edits: &[Edit]) -> Result<String, PatchError> {
    let mut sorted: Vec<&Edit> = edits.iter().collect();
    sorted.sort_by_key(|edit| edit.start);

    for edit in &sorted {
        let found = content
            .get(edit.range())
            .ok_or(PatchError::OutOfBounds {
                start: edit.start,
                end: edit.end(),
                len: content.len(),
            })?;
        if found != edit.text {
            return Err(PatchError::Mismatch {
                start: edit.start,
                expected: edit.text.clone(),
                found: found.to_string(),
            });
        }
    }

    for pair in sorted.windows(2) {
        if pair[0].end() > pair[1].start {
            return Err(PatchError::Overlapping {
                first: pair[0].start,
                second: pair[1].start,
            });
        }
    }

    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    for edit in sorted {
        out.push_str(&content[cursor..edit.start]);
        cursor = edit.end();
    }
    out.push_str(&content[cursor..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn removal(start: usize, text: &str) -> Edit {
        Edit::removal(Path::new("a.ts"), start, text)
    }

    #[test]
    fn test_no_edits_is_identity() {
        assert_eq!(apply_edits("let a;", &[]).unwrap(), "let a;");
    }

    #[test]
    fn test_applies_in_any_order() {
        let content = "new C(a, b, c)";
        let edits = vec![removal(10, ", c"), removal(6, "a,")];
        assert_eq!(apply_edits(content, &edits).unwrap(), "new C( b)");
    }

    #[test]
    fn test_adjacent_edits_are_fine() {
        let content = "f(a, b)";
        let edits = vec![removal(2, "a"), removal(3, ", b")];
        assert_eq!(apply_edits(content, &edits).unwrap(), "f()");
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let err = apply_edits("abc", &[removal(2, "cd")]).unwrap_err();
        assert_eq!(err, PatchError::OutOfBounds { start: 2, end: 4, len: 3 });
    }

    #[test]
    fn test_rejects_mismatch() {
        let err = apply_edits("abc", &[removal(0, "x")]).unwrap_err();
        assert!(matches!(err, PatchError::Mismatch { start: 0, .. }));
    }

    #[test]
    fn test_rejects_overlap() {
        let err = apply_edits("abcdef", &[removal(1, "bcd"), removal(2, "cd")]).unwrap_err();
        assert_eq!(err, PatchError::Overlapping { first: 1, second: 2 });
    }

    #[test]
    fn test_rejects_split_char() {
        // `é` occupies bytes 0..2.
        let err = apply_edits("é", &[removal(1, "")]).unwrap_err();
        assert!(matches!(err, PatchError::OutOfBounds { .. }));
    }
}
