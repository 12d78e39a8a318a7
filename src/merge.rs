//! Accept and reject a single chunk.
//!
//! Neither operation touches the chunk list. They return the edit that
//! resolves the chunk; the caller applies it and runs the matching update.

use crate::changes::Edit;
use crate::chunk::Chunk;

/// The chunk whose B range covers `pos` (`from_b <= pos <= end_b`).
pub fn chunk_at(chunks: &[Chunk], pos: usize) -> Option<&Chunk> {
    let index = chunks.partition_point(|c| c.end_b() < pos);
    chunks.get(index).filter(|c| c.from_b <= pos)
}

/// The edit to A that copies B's content of the chunk at `pos` into A.
/// Feed it back through [`update_a`](crate::update_a).
///
/// ```
/// use chunkdiff::{accept_chunk, build, DiffConfig, Edit};
///
/// let (a, b) = ("a\nb\nc", "a\nx\nc");
/// let chunks = build(a, b, &DiffConfig::default());
/// assert_eq!(accept_chunk(&chunks, a, b, 2), Some(Edit::new(2, 4, "x\n")));
/// assert_eq!(accept_chunk(&chunks, a, b, 0), None);
/// ```
pub fn accept_chunk(chunks: &[Chunk], a: &str, b: &str, pos: usize) -> Option<Edit> {
    let chunk = chunk_at(chunks, pos.min(b.len()))?;
    let insert = line_content(b, chunk.from_b, chunk.to_b, chunk.to_a <= a.len())?;
    Some(Edit::new(chunk.from_a, chunk.to_a.min(a.len()), insert))
}

/// The edit to B that restores A's content of the chunk at `pos` (a B
/// position). Feed it back through [`update_b`](crate::update_b).
pub fn reject_chunk(chunks: &[Chunk], a: &str, b: &str, pos: usize) -> Option<Edit> {
    let chunk = chunk_at(chunks, pos.min(b.len()))?;
    let insert = line_content(a, chunk.from_a, chunk.to_a, chunk.to_b <= b.len())?;
    Some(Edit::new(chunk.from_b, chunk.to_b.min(b.len()), insert))
}

/// The text of `from..to` without its final line break, with one added back
/// when the replaced range on the other side ends in one.
fn line_content(text: &str, from: usize, to: usize, break_after: bool) -> Option<String> {
    let end = from.max(to.saturating_sub(1));
    let mut content = text.get(from..end)?.to_string();
    if from != to && break_after {
        content.push('\n');
    }
    Some(content)
}
