//! Error type for the edit and update paths.
//!
//! Lookups (`find_pos`, `accept_chunk`, ...) clamp stale positions instead of
//! failing; only malformed edits and change descriptions end up here.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChunkError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    /// An edit names a range outside the document it is applied to.
    #[error("edit {from}..{to} is outside a document of length {len}")]
    EditOutOfBounds { from: usize, to: usize, len: usize },

    /// Edits passed together must be sorted and must not overlap.
    #[error("edits overlap or are out of order at offset {at}")]
    OverlappingEdits { at: usize },

    /// An edit boundary falls inside a multi-byte character.
    #[error("offset {pos} is not on a character boundary")]
    NotCharBoundary { pos: usize },

    /// A change span is reversed, unsorted, overlapping or disagrees with the
    /// running length delta of the spans before it.
    #[error("change span #{index} is malformed")]
    InvalidChangeSpan { index: usize },

    /// A document does not have the length the update expects.
    #[error("document length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
