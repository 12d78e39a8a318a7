use crate::chunk::Chunk;
use crate::mapping::Side;

/// The first chunk after `pos` on `side`, wrapping around to the first chunk
/// of the document. `None` when there is nowhere else to go.
pub fn next_chunk(chunks: &[Chunk], pos: usize, side: Side) -> Option<&Chunk> {
    let index = locate(chunks, pos, side, true)?;
    chunks.get(index % chunks.len())
}

/// The last chunk before `pos` on `side`, wrapping around to the last chunk
/// of the document.
pub fn previous_chunk(chunks: &[Chunk], pos: usize, side: Side) -> Option<&Chunk> {
    let index = locate(chunks, pos, side, false)?;
    chunks.get((index + chunks.len() - 1) % chunks.len())
}

fn locate(chunks: &[Chunk], pos: usize, side: Side, forward: bool) -> Option<usize> {
    if chunks.is_empty() {
        return None;
    }
    for (i, chunk) in chunks.iter().enumerate().rev() {
        let (from, to) = side.range(chunk);
        if to < pos {
            return Some(i + 1);
        }
        if from <= pos {
            // Already on the only chunk.
            if chunks.len() == 1 {
                return None;
            }
            return Some(if forward { i + 1 } else { i });
        }
    }
    Some(0)
}
