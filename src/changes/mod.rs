//! Edits applied to one side of the comparison and the description of what
//! they changed, which is what the update engine consumes.

mod types;
pub use types::*;

use crate::error::{ChunkError, Result};

/// The disjoint, ordered spans an edit changed in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDescription {
    spans: Vec<ChangeSpan>,
    old_len: usize,
    new_len: usize,
}

impl ChangeDescription {
    /// Validates host-supplied spans against the document lengths.
    ///
    /// Spans must be sorted, must not overlap in the old document, and each
    /// span's `new_from` must equal its `old_from` plus the length delta of
    /// every span before it.
    pub fn new(spans: Vec<ChangeSpan>, old_len: usize, new_len: usize) -> Result<Self> {
        let mut delta: isize = 0;
        let mut prev_end = 0;
        for (index, span) in spans.iter().enumerate() {
            let malformed = span.old_from > span.old_to
                || span.new_from > span.new_to
                || span.old_from < prev_end
                || span.old_to > old_len
                || span.new_from as isize != span.old_from as isize + delta;
            if malformed {
                return Err(ChunkError::InvalidChangeSpan { index });
            }
            delta += span.len_delta();
            prev_end = span.old_to;
        }
        if new_len as isize != old_len as isize + delta {
            return Err(ChunkError::LengthMismatch {
                expected: (old_len as isize + delta) as usize,
                actual: new_len,
            });
        }
        Ok(ChangeDescription {
            spans,
            old_len,
            new_len,
        })
    }

    /// A description of a document of length `len` that did not change.
    pub fn empty(len: usize) -> Self {
        ChangeDescription {
            spans: vec![],
            old_len: len,
            new_len: len,
        }
    }

    pub fn old_len(&self) -> usize {
        self.old_len
    }

    pub fn new_len(&self) -> usize {
        self.new_len
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter_changed_ranges(&self) -> impl Iterator<Item = &ChangeSpan> + '_ {
        self.spans.iter()
    }

    /// Maps a position in the old document to the new one. Positions inside
    /// a replaced span move to its end.
    pub fn map_pos(&self, pos: usize) -> usize {
        let mut delta: isize = 0;
        for span in &self.spans {
            if pos < span.old_from {
                break;
            }
            if pos < span.old_to {
                return span.new_to;
            }
            delta += span.len_delta();
        }
        (pos as isize + delta) as usize
    }
}

/// Applies sorted, non-overlapping edits (expressed in the coordinates of
/// `doc`) and returns the new text together with its change description.
///
/// ```
/// use chunkdiff::{apply_edits, Edit};
///
/// let (text, changes) = apply_edits("hello world", &[Edit::new(6, 11, "there")]).unwrap();
/// assert_eq!(text, "hello there");
/// assert_eq!(changes.new_len(), 11);
/// ```
pub fn apply_edits(doc: &str, edits: &[Edit]) -> Result<(String, ChangeDescription)> {
    let mut out = String::with_capacity(doc.len());
    let mut spans = vec![];
    let mut pos = 0;
    for edit in edits {
        if edit.from > edit.to || edit.to > doc.len() {
            return Err(ChunkError::EditOutOfBounds {
                from: edit.from,
                to: edit.to,
                len: doc.len(),
            });
        }
        if edit.from < pos {
            return Err(ChunkError::OverlappingEdits { at: edit.from });
        }
        for boundary in [edit.from, edit.to] {
            if !doc.is_char_boundary(boundary) {
                return Err(ChunkError::NotCharBoundary { pos: boundary });
            }
        }
        if edit.is_noop() {
            continue;
        }
        out.push_str(&doc[pos..edit.from]);
        let new_from = out.len();
        out.push_str(&edit.insert);
        spans.push(ChangeSpan::new(edit.from, edit.to, new_from, out.len()));
        pos = edit.to;
    }
    out.push_str(&doc[pos..]);
    let changes = ChangeDescription {
        spans,
        old_len: doc.len(),
        new_len: out.len(),
    };
    Ok((out, changes))
}
