use crate::chunk::Chunk;

/// Which document of the pair a position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub(crate) fn pick<T>(self, a: T, b: T) -> T {
        match self {
            Side::A => a,
            Side::B => b,
        }
    }

    pub(crate) fn range(self, chunk: &Chunk) -> (usize, usize) {
        self.pick((chunk.from_a, chunk.to_a), (chunk.from_b, chunk.to_b))
    }
}

/// Which edge of a chunk a position inside it snaps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Start,
    End,
}

/// Finds `pos` (on `side`) in the chunk list.
///
/// A position in an unchanged region maps to the matching position on both
/// sides; one strictly inside a chunk snaps to that chunk's start or end.
/// Returns `(pos_in_a, pos_in_b)`.
///
/// `pos` is taken as is: it must already lie within its document, and the
/// result can be one past the end of a document whose last line has no line
/// break. Positions coming from outside go through [`map_pos`], which clamps.
pub fn find_pos(chunks: &[Chunk], pos: usize, side: Side, boundary: Boundary) -> (usize, usize) {
    let (mut lo, mut hi) = (0, chunks.len());
    loop {
        if lo == hi {
            let (ref_a, ref_b) = match lo.checked_sub(1) {
                Some(prev) => (chunks[prev].to_a, chunks[prev].to_b),
                None => (0, 0),
            };
            let off = pos - side.pick(ref_a, ref_b);
            return (ref_a + off, ref_b + off);
        }
        let mid = (lo + hi) / 2;
        let chunk = &chunks[mid];
        let (from, to) = side.range(chunk);
        if from > pos {
            hi = mid;
        } else if to <= pos {
            lo = mid + 1;
        } else {
            return match boundary {
                Boundary::Start => (chunk.from_a, chunk.from_b),
                Boundary::End => (chunk.to_a, chunk.to_b),
            };
        }
    }
}

/// [`find_pos`] for positions coming from outside the engine: `pos` is
/// clamped to its document and moved back onto a character boundary, and
/// the result is clamped to both documents.
pub fn map_pos(
    chunks: &[Chunk],
    a: &str,
    b: &str,
    pos: usize,
    side: Side,
    boundary: Boundary,
) -> (usize, usize) {
    let pos = floor_char_boundary(side.pick(a, b), pos);
    let (pos_a, pos_b) = find_pos(chunks, pos, side, boundary);
    (pos_a.min(a.len()), pos_b.min(b.len()))
}

pub(crate) fn floor_char_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

pub(crate) fn ceil_char_boundary(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return pos;
    }
    let mut pos = pos;
    while !text.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}
